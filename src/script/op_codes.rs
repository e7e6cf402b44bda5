//! Script opcodes used by pay-to-public-key-hash scripts.
//!
//! # Examples
//! ```
//! use txauth::script::op_codes::*;
//! assert_eq!(OP_CHECKSIG, 172);
//! ```

// Pushdata and Constants
/// Pushes empty array (0/false) onto the stack.
pub const OP_0: u8 = 0;
/// Push opcodes 1-75 are `OP_PUSH + n` and push the next n bytes.
pub const OP_PUSH: u8 = 0;
/// Next byte is push length (up to 255 bytes).
pub const OP_PUSHDATA1: u8 = 76;
/// Next two bytes are push length (up to 65535 bytes).
pub const OP_PUSHDATA2: u8 = 77;
/// Next four bytes are push length.
pub const OP_PUSHDATA4: u8 = 78;
/// Pushes 1 (true) onto the stack.
pub const OP_1: u8 = 81;

// Stack
/// Duplicates top.
pub const OP_DUP: u8 = 118;

// Bitwise logic
/// Equals + VERIFY.
pub const OP_EQUALVERIFY: u8 = 136;

// Cryptography
/// RIPEMD160(SHA256(top)).
pub const OP_HASH160: u8 = 169;
/// Verifies sig for pubkey/tx (1/0).
pub const OP_CHECKSIG: u8 = 172;

/// Returns the mnemonic for a non-push opcode, if it is one this library names.
#[must_use]
pub fn op_name(op: u8) -> Option<&'static str> {
    Some(match op {
        OP_0 => "OP_0",
        OP_1 => "OP_1",
        OP_DUP => "OP_DUP",
        OP_EQUALVERIFY => "OP_EQUALVERIFY",
        OP_HASH160 => "OP_HASH160",
        OP_CHECKSIG => "OP_CHECKSIG",
        _ => return None,
    })
}
