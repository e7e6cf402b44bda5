//! secp256k1 private keys for signing inputs.

use crate::network::Network;
use crate::transaction::sighash::Challenge;
use crate::util::{Error, Hash160, Result, hash160, sha256d};
use base58::{FromBase58, ToBase58};
use num_bigint::BigUint;
use num_traits::Zero;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use std::fmt;

const MAINNET_WIF_VERSION: u8 = 0x80;
const TESTNET_WIF_VERSION: u8 = 0xef;
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// A private key and its public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret_key: SecretKey,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Creates a key from a 32-byte big-endian secret.
    ///
    /// # Errors
    /// `Error::Secp256k1Error` if the secret is zero or not below the curve order.
    pub fn from_bytes(secret: &[u8; 32]) -> Result<PrivateKey> {
        let secret_key = SecretKey::from_slice(secret)?;
        let secp = Secp256k1::signing_only();
        let public_key = PublicKey::from_secret_key(&secp, &secret_key);
        Ok(PrivateKey { secret_key, public_key })
    }

    /// Creates a key from a secret integer.
    ///
    /// # Errors
    /// `Error::BadArgument` for zero or a secret wider than 256 bits,
    /// `Error::Secp256k1Error` if it is not below the curve order.
    ///
    /// # Examples
    /// ```
    /// use num_bigint::BigUint;
    /// use txauth::wallet::PrivateKey;
    ///
    /// let key = PrivateKey::from_secret(&BigUint::from(8675309u32)).unwrap();
    /// assert_eq!(key.pubkey_hash().to_string(), "d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f");
    /// ```
    pub fn from_secret(secret: &BigUint) -> Result<PrivateKey> {
        if secret.is_zero() {
            return Err(Error::BadArgument("Secret is zero".to_string()));
        }
        let be = secret.to_bytes_be();
        if be.len() > 32 {
            return Err(Error::BadArgument(format!("Secret is {} bytes", be.len())));
        }
        let mut bytes = [0u8; 32];
        bytes[32 - be.len()..].copy_from_slice(&be);
        PrivateKey::from_bytes(&bytes)
    }

    /// The secret as 32 big-endian bytes.
    #[must_use]
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret_key.secret_bytes()
    }

    /// The public key.
    #[must_use]
    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Compressed SEC encoding of the public key (33 bytes).
    #[must_use]
    pub fn public_key_bytes(&self) -> Vec<u8> {
        self.public_key.serialize().to_vec()
    }

    /// Uncompressed SEC encoding of the public key (65 bytes).
    #[must_use]
    pub fn uncompressed_public_key_bytes(&self) -> Vec<u8> {
        self.public_key.serialize_uncompressed().to_vec()
    }

    /// hash160 of the compressed public key, as embedded in P2PKH lock scripts.
    #[must_use]
    pub fn pubkey_hash(&self) -> Hash160 {
        hash160(&self.public_key.serialize())
    }

    /// Signs a challenge, returning a low-S DER signature without a mode byte.
    ///
    /// The nonce is derived deterministically (RFC 6979).
    #[must_use]
    pub fn sign(&self, challenge: &Challenge) -> Vec<u8> {
        let secp = Secp256k1::signing_only();
        let message = Message::from_digest(challenge.0);
        let mut signature = secp.sign_ecdsa(&message, &self.secret_key);
        signature.normalize_s();
        signature.serialize_der().to_vec()
    }

    /// Encodes the key in wallet import format for `network`, flagged compressed.
    #[must_use]
    pub fn to_wif(&self, network: Network) -> String {
        let version = if network.is_test() { TESTNET_WIF_VERSION } else { MAINNET_WIF_VERSION };
        let mut v = Vec::with_capacity(38);
        v.push(version);
        v.extend_from_slice(&self.secret_key.secret_bytes());
        v.push(WIF_COMPRESSED_FLAG);
        let checksum = sha256d(&v);
        v.extend_from_slice(&checksum.0[..4]);
        v.to_base58()
    }

    /// Decodes a compressed wallet-import-format key, returning the key and its network.
    ///
    /// Test networks share a version byte, so they decode as `Network::Testnet`.
    ///
    /// # Errors
    /// `Error::BadData` for a bad length, checksum, version or compression flag.
    pub fn from_wif(s: &str) -> Result<(PrivateKey, Network)> {
        let v = s.from_base58()?;
        if v.len() != 38 {
            return Err(Error::BadData(format!("Invalid WIF length: {}", v.len())));
        }
        let checksum = sha256d(&v[..34]);
        if checksum.0[..4] != v[34..] {
            return Err(Error::BadData("Invalid checksum".to_string()));
        }
        let network = match v[0] {
            MAINNET_WIF_VERSION => Network::Mainnet,
            TESTNET_WIF_VERSION => Network::Testnet,
            other => return Err(Error::BadData(format!("Invalid WIF version: {:#04x}", other))),
        };
        if v[33] != WIF_COMPRESSED_FLAG {
            return Err(Error::BadData("WIF key is not compressed".to_string()));
        }
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&v[1..33]);
        Ok((PrivateKey::from_bytes(&secret)?, network))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &hex::encode(self.public_key.serialize()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_secret() -> Result<()> {
        let key = PrivateKey::from_secret(&BigUint::from(8675309u32))?;
        assert_eq!(
            hex::encode(key.public_key_bytes()),
            "03935581e52c354cd2f484fe8ed83af7a3097005b2f9c60bff71d35bd795f54b67"
        );
        assert_eq!(key.uncompressed_public_key_bytes().len(), 65);
        assert_eq!(key.pubkey_hash().to_string(), "d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f");
        assert_eq!(key.secret_bytes()[29..], [0x84, 0x5f, 0xed]);
        Ok(())
    }

    #[test]
    fn invalid_secrets() {
        assert!(PrivateKey::from_secret(&BigUint::zero()).is_err());
        assert!(PrivateKey::from_secret(&(BigUint::from(1u8) << 256)).is_err());
        assert!(PrivateKey::from_bytes(&[0xff; 32]).is_err());
    }

    #[test]
    fn wif() -> Result<()> {
        let key = PrivateKey::from_secret(&BigUint::from(8675309u32))?;
        for network in [Network::Mainnet, Network::Testnet] {
            let wif = key.to_wif(network);
            let (decoded, decoded_network) = PrivateKey::from_wif(&wif)?;
            assert_eq!(decoded, key);
            assert_eq!(decoded_network, network);
        }
        let mut bad = key.to_wif(Network::Mainnet);
        let last = bad.pop().unwrap();
        bad.push(if last == '2' { '3' } else { '2' });
        assert!(PrivateKey::from_wif(&bad).is_err());
        Ok(())
    }

    #[test]
    fn debug_hides_secret() -> Result<()> {
        let key = PrivateKey::from_secret(&BigUint::from(8675309u32))?;
        let s = format!("{:?}", key);
        assert!(s.contains("03935581"));
        assert!(!s.contains(&hex::encode(key.secret_bytes())));
        Ok(())
    }
}
