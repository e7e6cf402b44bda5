//! Base58check P2PKH addresses.
//!
//! An address is a version byte, a 20-byte public key hash and the first four
//! bytes of their double SHA-256, encoded in base58. The version byte names the
//! network (see [`Network::p2pkh_version`]).

use crate::network::Network;
use crate::script::Script;
use crate::transaction::p2pkh;
use crate::util::{Error, Hash160, Result, sha256d};
use base58::{FromBase58, ToBase58};

const ADDRESS_LEN: usize = 25;

/// Encodes a base58check address from a version byte and 20-byte payload.
///
/// # Errors
/// `Error::BadArgument` if the payload is not 20 bytes.
///
/// # Examples
/// ```
/// use txauth::address::encode_address;
/// let addr = encode_address(0x00, &[0u8; 20]).unwrap();
/// assert_eq!(addr, "1111111111111111111114oLvT2");
/// ```
pub fn encode_address(version: u8, payload: &[u8]) -> Result<String> {
    if payload.len() != 20 {
        return Err(Error::BadArgument(format!("Payload must be 20 bytes, got {}", payload.len())));
    }
    let mut v = [0u8; ADDRESS_LEN];
    v[0] = version;
    v[1..21].copy_from_slice(payload);
    let checksum = sha256d(&v[..21]);
    v[21..].copy_from_slice(&checksum.0[..4]);
    Ok(v.to_base58())
}

/// Decodes a base58check address into its version byte and payload.
///
/// # Errors
/// `Error::FromBase58Error` for invalid characters, `Error::BadData` for a bad length or checksum.
pub fn decode_address(input: &str) -> Result<(u8, Hash160)> {
    let bytes = input.from_base58()?;
    if bytes.len() != ADDRESS_LEN {
        return Err(Error::BadData(format!("Invalid address length: {}", bytes.len())));
    }
    let checksum = sha256d(&bytes[..21]);
    if checksum.0[..4] != bytes[21..] {
        return Err(Error::BadData("Invalid checksum".to_string()));
    }
    let mut payload = Hash160([0; 20]);
    payload.0.copy_from_slice(&bytes[1..21]);
    Ok((bytes[0], payload))
}

/// Encodes the P2PKH address of `pubkey_hash` on `network`.
#[must_use]
pub fn p2pkh_address(network: Network, pubkey_hash: &Hash160) -> String {
    let mut v = Vec::with_capacity(ADDRESS_LEN);
    v.push(network.p2pkh_version());
    v.extend_from_slice(&pubkey_hash.0);
    let checksum = sha256d(&v);
    v.extend_from_slice(&checksum.0[..4]);
    v.to_base58()
}

/// Decodes a P2PKH address, checking that it belongs to `network`.
///
/// # Errors
/// See [`decode_address`]. `Error::BadData` if the version byte is not `network`'s.
pub fn address_to_pubkey_hash(address: &str, network: Network) -> Result<Hash160> {
    let (version, pubkey_hash) = decode_address(address)?;
    if version != network.p2pkh_version() {
        return Err(Error::BadData(format!(
            "Address version {:#04x} is not P2PKH on {}",
            version, network
        )));
    }
    Ok(pubkey_hash)
}

/// Builds the P2PKH lock script paying to `address`.
///
/// # Errors
/// See [`address_to_pubkey_hash`].
pub fn create_lock_script_for_address(address: &str, network: Network) -> Result<Script> {
    let pubkey_hash = address_to_pubkey_hash(address, network)?;
    Ok(p2pkh::create_lock_script(&pubkey_hash))
}
