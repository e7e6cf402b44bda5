//! Transaction signing and signature checks.
//!
//! Supports P2PKH locks, the `SIGHASH_ALL` preimage and ECDSA over secp256k1.
//!
//! # Examples
//!
//! Sign a P2PKH input:
//! ```
//! use num_bigint::BigUint;
//! use txauth::messages::{OutPoint, Tx, TxIn, TxOut};
//! use txauth::network::Network;
//! use txauth::transaction::{p2pkh::create_lock_script, sign::apply};
//! use txauth::utxo::UtxoSet;
//! use txauth::validation::{validate, Verdict};
//! use txauth::wallet::PrivateKey;
//!
//! let key = PrivateKey::from_secret(&BigUint::from(8675309u32)).unwrap();
//! let spent = OutPoint::default();
//! let mut utxos = UtxoSet::new(Network::Testnet);
//! utxos.insert(spent, TxOut::new(1000, create_lock_script(&key.pubkey_hash())));
//!
//! let mut tx = Tx::new(
//!     vec![TxIn::new(spent)],
//!     vec![TxOut::new(900, create_lock_script(&key.pubkey_hash()))],
//!     Network::Testnet,
//! );
//! apply(&mut tx, 0, &key, &utxos).unwrap();
//! assert_eq!(validate(&tx, &utxos).unwrap(), Verdict::Accept);
//! ```
pub mod p2pkh;
pub mod sighash;
pub mod sign;

use self::sighash::{Challenge, SigHashType};
use crate::util::Result;
use crate::wallet::PrivateKey;
use secp256k1::{Message, PublicKey, Secp256k1, VerifyOnly, ecdsa::Signature};

/// Generates a DER-encoded ECDSA signature for the challenge, followed by the mode byte.
///
/// Normalizes S (low).
///
/// # Errors
/// `Error::UnsupportedSighashMode` for modes other than `All`.
pub fn generate_signature(private_key: &PrivateKey, challenge: &Challenge, sighash_type: SigHashType) -> Result<Vec<u8>> {
    sighash_type.ensure_supported()?;
    let mut der = private_key.sign(challenge);
    der.push(sighash_type.to_u8());
    Ok(der)
}

/// Checks a signature over a challenge.
pub trait SignatureVerifier {
    /// Returns whether `signature` (DER, no mode byte) signs `challenge` for `public_key`.
    ///
    /// Malformed keys or signatures verify as false. Both low-S and high-S forms are valid.
    fn verify(&self, public_key: &[u8], challenge: &Challenge, signature: &[u8]) -> bool;
}

/// ECDSA verification over secp256k1.
#[derive(Debug, Clone)]
pub struct Secp256k1Verifier {
    secp: Secp256k1<VerifyOnly>,
}

impl Secp256k1Verifier {
    /// Creates a verification-only context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::verification_only(),
        }
    }
}

impl Default for Secp256k1Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureVerifier for Secp256k1Verifier {
    fn verify(&self, public_key: &[u8], challenge: &Challenge, signature: &[u8]) -> bool {
        let Ok(mut signature) = Signature::from_der(signature) else {
            return false;
        };
        // libsecp256k1 rejects high-S signatures, which P2PKH spends may carry.
        signature.normalize_s();
        let Ok(public_key) = PublicKey::from_slice(public_key) else {
            return false;
        };
        let message = Message::from_digest(challenge.0);
        self.secp.verify_ecdsa(&message, &signature, &public_key).is_ok()
    }
}
