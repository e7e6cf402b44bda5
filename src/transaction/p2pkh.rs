//! Pay-to-Public-Key-Hash (P2PKH) scripts.
//!
//! The only locking pattern this library validates and signs for:
//! `OP_DUP OP_HASH160 <20-byte hash> OP_EQUALVERIFY OP_CHECKSIG`.
use crate::script::op_codes::{OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, OP_PUSH};
use crate::script::{Script, ScriptElement};
use crate::util::{Error, Hash160, Result};

/// Size of a P2PKH lock script in bytes.
pub const LOCK_SCRIPT_LEN: usize = 25;

/// Creates P2PKH lock script (DUP HASH160 [hash] EQUALVERIFY CHECKSIG).
#[must_use]
#[inline]
pub fn create_lock_script(address: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_DUP);
    script.append(OP_HASH160);
    script.append(OP_PUSH + 20);
    script.append_slice(&address.0);
    script.append(OP_EQUALVERIFY);
    script.append(OP_CHECKSIG);
    script
}

/// Creates P2PKH unlock script (push sig + pubkey).
#[must_use]
#[inline]
pub fn create_unlock_script(sig: &[u8], public_key: &[u8]) -> Script {
    let mut script = Script::new();
    script.append_data(sig);
    script.append_data(public_key);
    script
}

/// Checks if script is a P2PKH lock. Only the 20-byte hash may vary.
#[must_use]
#[inline]
pub fn check_lock_script(lock_script: &[u8]) -> bool {
    lock_script.len() == LOCK_SCRIPT_LEN
        && lock_script[0] == OP_DUP
        && lock_script[1] == OP_HASH160
        && lock_script[2] == OP_PUSH + 20
        && lock_script[23] == OP_EQUALVERIFY
        && lock_script[24] == OP_CHECKSIG
}

/// Checks if P2PKH lock matches hash160.
#[must_use]
#[inline]
pub fn check_lock_script_addr(hash160: &Hash160, lock_script: &[u8]) -> bool {
    check_lock_script(lock_script) && lock_script[3..23] == hash160.0
}

/// Extracts hash160 from P2PKH lock.
///
/// # Errors
/// `Error::UnsupportedScript` for any other script shape.
pub fn extract_pubkeyhash(lock_script: &[u8]) -> Result<Hash160> {
    if !check_lock_script(lock_script) {
        return Err(Error::UnsupportedScript(format!("Not P2PKH lock: {}", hex::encode(lock_script))));
    }
    let mut hash160 = Hash160([0; 20]);
    hash160.0.copy_from_slice(&lock_script[3..23]);
    Ok(hash160)
}

/// Splits a P2PKH unlock script into (signature with mode byte, public key).
///
/// # Errors
/// `Error::BadData` unless the script is exactly two data pushes.
pub fn parse_unlock_script(unlock_script: &Script) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut elements = unlock_script.elements()?.into_iter();
    match (elements.next(), elements.next(), elements.next()) {
        (Some(ScriptElement::Push(sig)), Some(ScriptElement::Push(pubkey)), None) => Ok((sig, pubkey)),
        _ => Err(Error::BadData("Unlock script is not [signature, public key]".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::op_codes::OP_1;
    use pretty_assertions::assert_eq;

    #[test]
    fn check_lock_script_test() {
        let mut s = Script::new();
        assert!(!check_lock_script(&s.0));
        s.append(OP_DUP);
        s.append(OP_HASH160);
        s.append(OP_PUSH + 20);
        s.append_slice(&[0; 20]);
        s.append(OP_EQUALVERIFY);
        s.append(OP_CHECKSIG);
        assert!(check_lock_script(&s.0));
        s.append(OP_1);
        assert!(!check_lock_script(&s.0));
    }

    #[test]
    fn lock_script_layout() {
        let h = Hash160(hex_literal::hex!("d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f"));
        let s = create_lock_script(&h);
        assert_eq!(hex::encode(&s.0), "76a914d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f88ac");
        assert_eq!(
            s.elements().unwrap(),
            vec![
                ScriptElement::Op(OP_DUP),
                ScriptElement::Op(OP_HASH160),
                ScriptElement::Push(h.0.to_vec()),
                ScriptElement::Op(OP_EQUALVERIFY),
                ScriptElement::Op(OP_CHECKSIG),
            ]
        );
        assert_eq!(s.to_string(), "OP_DUP OP_HASH160 d52ad7ca9b3d096a38e752c2018e6fbc40cdf26f OP_EQUALVERIFY OP_CHECKSIG");
    }

    #[test]
    fn other_shapes_are_unsupported() {
        // 21-byte push in the hash position
        let mut s = Script::new();
        s.append(OP_DUP);
        s.append(OP_HASH160);
        s.append_data(&[0; 21]);
        s.append(OP_EQUALVERIFY);
        s.append(OP_CHECKSIG);
        assert!(!check_lock_script(&s.0));
        let e = extract_pubkeyhash(&[OP_1]).unwrap_err();
        assert_eq!(e.to_string(), "Unsupported script: Not P2PKH lock: 51");
    }

    #[test]
    fn check_lock_script_addr_test() {
        let s = create_lock_script(&Hash160([5; 20]));
        assert!(check_lock_script_addr(&Hash160([5; 20]), &s.0));
        assert!(!check_lock_script_addr(&Hash160([6; 20]), &s.0));
        assert_eq!(extract_pubkeyhash(&s.0).unwrap(), Hash160([5; 20]));
    }

    #[test]
    fn parse_unlock_script_test() {
        let s = create_unlock_script(&[5; 71], &[6; 33]);
        assert_eq!(parse_unlock_script(&s).unwrap(), (vec![5; 71], vec![6; 33]));

        let mut three = s.clone();
        three.append_data(&[1]);
        assert!(parse_unlock_script(&three).is_err());

        let mut op = Script::new();
        op.append_data(&[5; 71]);
        op.append(OP_1);
        assert!(parse_unlock_script(&op).is_err());
        assert!(parse_unlock_script(&Script::new()).is_err());
    }
}
