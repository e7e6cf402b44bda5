//! Key management for signing.

mod private_key;

pub use self::private_key::PrivateKey;
