//! Signature preimage and challenge computation.
//!
//! The preimage for input `n` is the transaction encoded with every input's
//! unlocking data cleared, except input `n`, which carries the locking script
//! of the output it spends, followed by the 4-byte little-endian sighash mode.
//! Its double SHA-256, read as a big-endian integer, is the challenge `z` that
//! gets signed and verified.
//!
//! Only [`SigHashType::All`] is implemented.
use crate::messages::{Tx, UnlockView};
use crate::utxo::UtxoLookup;
use crate::util::{Error, Result, sha256d};
use byteorder::{LittleEndian, WriteBytesExt};
use num_bigint::BigUint;
use std::fmt;

/// Signs all inputs and outputs.
pub const SIGHASH_ALL: u8 = 0x01;
/// Signs no outputs.
pub const SIGHASH_NONE: u8 = 0x02;
/// Signs only the matching output.
pub const SIGHASH_SINGLE: u8 = 0x03;

/// Authorization mode appended to the preimage and to each signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigHashType {
    /// Commit to every input and output.
    All,
    /// Named only. Not implemented.
    None,
    /// Named only. Not implemented.
    Single,
}

impl SigHashType {
    /// Parses a mode byte.
    ///
    /// # Errors
    /// `Error::UnsupportedSighashMode` for unknown codes.
    pub fn from_u8(code: u8) -> Result<SigHashType> {
        match code {
            SIGHASH_ALL => Ok(SigHashType::All),
            SIGHASH_NONE => Ok(SigHashType::None),
            SIGHASH_SINGLE => Ok(SigHashType::Single),
            _ => Err(Error::UnsupportedSighashMode(code as u32)),
        }
    }

    /// The mode byte.
    #[must_use]
    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            SigHashType::All => SIGHASH_ALL,
            SigHashType::None => SIGHASH_NONE,
            SigHashType::Single => SIGHASH_SINGLE,
        }
    }

    /// Fails for modes whose preimage rules are not implemented.
    ///
    /// # Errors
    /// `Error::UnsupportedSighashMode` for anything but `All`.
    pub fn ensure_supported(self) -> Result<()> {
        match self {
            SigHashType::All => Ok(()),
            other => Err(Error::UnsupportedSighashMode(other.to_u8() as u32)),
        }
    }
}

/// The value `z` that is signed: double SHA-256 of the preimage, big-endian.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Challenge(pub [u8; 32]);

impl Challenge {
    /// Hashes a preimage into its challenge.
    #[must_use]
    #[inline]
    pub fn from_preimage(preimage: &[u8]) -> Challenge {
        Challenge(sha256d(preimage).0)
    }

    /// Big-endian bytes of `z`.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `z` as an unsigned integer.
    #[must_use]
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Challenge({})", self)
    }
}

/// Builds the preimage for `n_input`, resolving its locking script through `utxos`.
///
/// # Errors
/// - `Error::InvalidInputIndex` if `n_input` is out of range.
/// - `Error::UnsupportedSighashMode` for modes other than `All`.
/// - `Error::LookupFailed` if the spent output is unknown; lookup backend errors as returned.
pub fn sighash_preimage<U: UtxoLookup + ?Sized>(
    tx: &Tx,
    n_input: usize,
    sighash_type: SigHashType,
    utxos: &U,
) -> Result<Vec<u8>> {
    check_index(tx, n_input)?;
    sighash_type.ensure_supported()?;
    let prev_output = &tx.inputs[n_input].prev_output;
    let spent = utxos
        .resolve(tx.network, prev_output)?
        .ok_or(Error::LookupFailed(*prev_output))?;
    preimage_for_script(tx, n_input, &spent.lock_script.0, sighash_type)
}

/// Builds the preimage for `n_input` given the locking script it spends.
///
/// # Errors
/// `Error::InvalidInputIndex` or `Error::UnsupportedSighashMode`.
pub fn preimage_for_script(
    tx: &Tx,
    n_input: usize,
    script_code: &[u8],
    sighash_type: SigHashType,
) -> Result<Vec<u8>> {
    check_index(tx, n_input)?;
    sighash_type.ensure_supported()?;
    let mut s = tx.encode_view(UnlockView::Signing {
        input: n_input,
        script_code,
    });
    s.write_u32::<LittleEndian>(sighash_type.to_u8() as u32)?;
    Ok(s)
}

/// Computes the challenge for `n_input`, resolving its locking script through `utxos`.
///
/// # Errors
/// See [`sighash_preimage`].
///
/// # Examples
/// ```
/// use txauth::messages::{OutPoint, Tx, TxIn, TxOut};
/// use txauth::network::Network;
/// use txauth::transaction::p2pkh::create_lock_script;
/// use txauth::transaction::sighash::{sighash, SigHashType};
/// use txauth::util::Hash160;
/// use txauth::utxo::UtxoSet;
///
/// let spent = OutPoint::default();
/// let mut utxos = UtxoSet::new(Network::Testnet);
/// utxos.insert(spent, TxOut::new(1000, create_lock_script(&Hash160([1; 20]))));
/// let tx = Tx::new(
///     vec![TxIn::new(spent)],
///     vec![TxOut::new(900, create_lock_script(&Hash160([2; 20])))],
///     Network::Testnet,
/// );
/// let z = sighash(&tx, 0, SigHashType::All, &utxos).unwrap();
/// assert_eq!(z, sighash(&tx, 0, SigHashType::All, &utxos).unwrap());
/// ```
pub fn sighash<U: UtxoLookup + ?Sized>(
    tx: &Tx,
    n_input: usize,
    sighash_type: SigHashType,
    utxos: &U,
) -> Result<Challenge> {
    let preimage = sighash_preimage(tx, n_input, sighash_type, utxos)?;
    Ok(Challenge::from_preimage(&preimage))
}

/// Computes the challenge for `n_input` given the locking script it spends.
///
/// # Errors
/// See [`preimage_for_script`].
pub fn sighash_for_script(
    tx: &Tx,
    n_input: usize,
    script_code: &[u8],
    sighash_type: SigHashType,
) -> Result<Challenge> {
    let preimage = preimage_for_script(tx, n_input, script_code, sighash_type)?;
    Ok(Challenge::from_preimage(&preimage))
}

fn check_index(tx: &Tx, n_input: usize) -> Result<()> {
    if n_input >= tx.inputs.len() {
        return Err(Error::InvalidInputIndex {
            index: n_input,
            len: tx.inputs.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{OutPoint, TxIn, TxOut};
    use crate::network::Network;
    use crate::script::Script;
    use crate::transaction::p2pkh;
    use crate::utxo::UtxoSet;
    use crate::util::{Hash160, Hash256};
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    const SOURCE_PKH: [u8; 20] = hex!("d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f");
    const TARGET_PKH: [u8; 20] = hex!("507b27411ccf7f16f10297de6cef3f291623eddf");

    fn scenario() -> (Tx, UtxoSet) {
        let spent = OutPoint::from_txid("0d6fe5213c0b3291f208cba8bfb59b7476dffacc4e5cb66f6eb20a080843a299", 13).unwrap();
        let mut utxos = UtxoSet::new(Network::Testnet);
        utxos.insert(spent, TxOut::new(33_000_000, p2pkh::create_lock_script(&Hash160(SOURCE_PKH))));
        let tx = Tx::new(
            vec![TxIn::new(spent)],
            vec![
                TxOut::new(10_000_000, p2pkh::create_lock_script(&Hash160(TARGET_PKH))),
                TxOut::new(22_990_000, p2pkh::create_lock_script(&Hash160(SOURCE_PKH))),
            ],
            Network::Testnet,
        );
        (tx, utxos)
    }

    #[test]
    fn preimage_bytes() -> Result<()> {
        let (tx, utxos) = scenario();
        let preimage = sighash_preimage(&tx, 0, SigHashType::All, &utxos)?;
        let expected = "010000000199a24308080ab26e6fb65c4eccfadf76749bb5bfa8cb08f291320b3c21e56f0d0d0000001976a914d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f88acffffffff0280969800000000001976a914507b27411ccf7f16f10297de6cef3f291623eddf88acb0cc5e01000000001976a914d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f88ac0000000001000000";
        assert_eq!(hex::encode(&preimage), expected);
        let z = sighash(&tx, 0, SigHashType::All, &utxos)?;
        assert_eq!(z.to_string(), "a7b14b45aa0771b705a4bd2d7dbb7b1fc71a991700d625845fcfcc8ecf297603");
        Ok(())
    }

    #[test]
    fn known_mainnet_challenge() -> Result<()> {
        let tx = Tx::from_hex("0100000001813f79011acb80925dfe69b3def355fe914bd1d96a3f5f71bf8303c6a989c7d1000000006b483045022100ed81ff192e75a3fd2304004dcadb746fa5e24c5031ccfcf21320b0277457c98f02207a986d955c6e0cb35d446a89d3f56100f4d7f67801c31967743a9c8e10615bed01210349fc4e631e3624a545de3f89f5d8684c7b8138bd94bdd531d2e213bf016b278afeffffff02a135ef01000000001976a914bc3b654dca7e56b04dca18f2566cdaf02e8d9ada88ac99c39800000000001976a9141c4bc762dd5423e332166702cb75f40df79fea1288ac19430600", Network::Mainnet)?;
        let lock_script = hex::decode("76a914a802fc56c704ce87c42d7c92eb75e7896bdc41ae88ac")?;
        let z = sighash_for_script(&tx, 0, &lock_script, SigHashType::All)?;
        assert_eq!(
            z.to_biguint(),
            BigUint::parse_bytes(b"27e0c5994dec7824e56dec6b2fcb342eb7cdb0d0957c2fce9882f715e85d81a6", 16).unwrap()
        );
        Ok(())
    }

    #[test]
    fn deterministic_and_pure() -> Result<()> {
        let (tx, utxos) = scenario();
        let before = tx.clone();
        let a = sighash_preimage(&tx, 0, SigHashType::All, &utxos)?;
        let b = sighash_preimage(&tx, 0, SigHashType::All, &utxos)?;
        assert_eq!(a, b);
        assert_eq!(tx, before);
        Ok(())
    }

    #[test]
    fn existing_unlock_data_is_ignored() -> Result<()> {
        let (mut tx, utxos) = scenario();
        let unsigned = sighash(&tx, 0, SigHashType::All, &utxos)?;
        tx.inputs[0].unlock_script = Script(vec![1, 2, 3]);
        assert_eq!(sighash(&tx, 0, SigHashType::All, &utxos)?, unsigned);
        Ok(())
    }

    #[test]
    fn each_input_gets_its_own_preimage() -> Result<()> {
        let (mut tx, mut utxos) = scenario();
        let second = OutPoint {
            hash: Hash256([4; 32]),
            index: 0,
        };
        utxos.insert(second, TxOut::new(5, p2pkh::create_lock_script(&Hash160(TARGET_PKH))));
        tx.inputs.push(TxIn::new(second));
        let p0 = sighash_preimage(&tx, 0, SigHashType::All, &utxos)?;
        let p1 = sighash_preimage(&tx, 1, SigHashType::All, &utxos)?;
        assert!(p0 != p1);
        Ok(())
    }

    #[test]
    fn errors() {
        let (tx, utxos) = scenario();
        assert_eq!(
            sighash_preimage(&tx, 1, SigHashType::All, &utxos).unwrap_err().to_string(),
            "Invalid input index: 1 (tx has 1 inputs)"
        );
        assert_eq!(
            sighash_preimage(&tx, 0, SigHashType::Single, &utxos).unwrap_err().to_string(),
            "Unsupported sighash mode: 0x03"
        );
        assert!(matches!(
            sighash_preimage(&tx, 0, SigHashType::None, &utxos),
            Err(Error::UnsupportedSighashMode(2))
        ));
        let empty = UtxoSet::new(Network::Testnet);
        assert!(matches!(
            sighash_preimage(&tx, 0, SigHashType::All, &empty),
            Err(Error::LookupFailed(o)) if o == tx.inputs[0].prev_output
        ));
    }

    #[test]
    fn mode_codes() {
        assert_eq!(SigHashType::from_u8(1).unwrap(), SigHashType::All);
        assert_eq!(SigHashType::from_u8(3).unwrap().to_u8(), SIGHASH_SINGLE);
        assert!(SigHashType::from_u8(0x41).is_err());
    }
}
