//! Transaction validation against a set of unspent outputs.
//!
//! A transaction is accepted when every input spends a known output, no value
//! is created and every input's unlock script carries a valid signature by the
//! key its P2PKH lock names.
//!
//! Checks run in this order, and the first failure decides the verdict:
//!
//! 1. the transaction has inputs and outputs
//! 2. every spent output resolves
//! 3. inputs cover outputs and their total is in range
//! 4. each input's signature, checked in parallel and reported by lowest index
//!
//! Rejections are returned as [`Verdict::Reject`]. `Err` is only returned when
//! the UTXO backend fails.

use crate::messages::{MAX_SATOSHIS, Tx, TxOut};
use crate::transaction::p2pkh::{check_lock_script, check_lock_script_addr, parse_unlock_script};
use crate::transaction::sighash::{SIGHASH_ALL, SigHashType, sighash_for_script};
use crate::transaction::{Secp256k1Verifier, SignatureVerifier};
use crate::utxo::UtxoLookup;
use crate::util::{Error, Result, hash160};
use rayon::prelude::*;
use std::fmt;
use tracing::{debug, trace};

/// Why a transaction was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// The transaction spends nothing.
    NoInputs,
    /// The transaction creates no outputs.
    NoOutputs,
    /// The output spent by this input is unknown or already spent.
    AlreadySpentOrUnknown(usize),
    /// Summing amounts overflowed.
    ArithmeticOverflow,
    /// An amount total exceeds the money supply.
    ValueOutOfRange,
    /// Outputs are worth more than inputs.
    NegativeFee {
        /// Sum of spent output amounts.
        input: u64,
        /// Sum of created output amounts.
        output: u64,
    },
    /// The output spent by this input is not P2PKH.
    UnsupportedScript(usize),
    /// The signature on this input does not verify.
    InvalidSignature(usize),
    /// The public key on this input does not hash to the lock's key hash.
    PublicKeyHashMismatch(usize),
    /// The signature on this input commits to another sighash mode.
    SighashMismatch(usize),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::NoInputs => f.write_str("No inputs"),
            RejectReason::NoOutputs => f.write_str("No outputs"),
            RejectReason::AlreadySpentOrUnknown(i) => write!(f, "Input {} spends an unknown or spent output", i),
            RejectReason::ArithmeticOverflow => f.write_str("Amount overflow"),
            RejectReason::ValueOutOfRange => f.write_str("Amount out of range"),
            RejectReason::NegativeFee { input, output } => {
                write!(f, "Outputs ({}) exceed inputs ({})", output, input)
            }
            RejectReason::UnsupportedScript(i) => write!(f, "Input {} spends an unsupported script", i),
            RejectReason::InvalidSignature(i) => write!(f, "Input {} has an invalid signature", i),
            RejectReason::PublicKeyHashMismatch(i) => write!(f, "Input {} public key does not match lock", i),
            RejectReason::SighashMismatch(i) => write!(f, "Input {} signs with an unexpected sighash mode", i),
        }
    }
}

/// Outcome of validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// All checks passed.
    Accept,
    /// The first check that failed.
    Reject(RejectReason),
}

impl Verdict {
    /// Whether the transaction was accepted.
    #[must_use]
    #[inline]
    pub fn is_accept(&self) -> bool {
        *self == Verdict::Accept
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Accept => f.write_str("Accept"),
            Verdict::Reject(reason) => write!(f, "Reject: {}", reason),
        }
    }
}

/// Validates transactions against a UTXO lookup.
pub struct TxValidator<'a, U: ?Sized, V = Secp256k1Verifier> {
    utxos: &'a U,
    verifier: V,
}

impl<'a, U: UtxoLookup + Sync + ?Sized> TxValidator<'a, U> {
    /// Creates a validator that checks ECDSA signatures over secp256k1.
    #[must_use]
    pub fn new(utxos: &'a U) -> Self {
        Self::with_verifier(utxos, Secp256k1Verifier::new())
    }
}

impl<'a, U: UtxoLookup + Sync + ?Sized, V: SignatureVerifier + Sync> TxValidator<'a, U, V> {
    /// Creates a validator with a custom signature verifier.
    #[must_use]
    pub fn with_verifier(utxos: &'a U, verifier: V) -> Self {
        TxValidator { utxos, verifier }
    }

    /// Validates the whole transaction.
    ///
    /// # Errors
    /// Lookup backend failures, unchanged.
    pub fn validate(&self, tx: &Tx) -> Result<Verdict> {
        let verdict = self.check(tx)?;
        match verdict {
            Verdict::Accept => debug!(txid = %tx.hash(), "transaction accepted"),
            Verdict::Reject(reason) => debug!(txid = %tx.hash(), %reason, "transaction rejected"),
        }
        Ok(verdict)
    }

    /// Checks that input `index` spends a known output and carries a valid signature.
    ///
    /// Amounts are not checked.
    ///
    /// # Errors
    /// `Error::InvalidInputIndex` if `index` is out of range, or a lookup backend failure.
    pub fn verify_input(&self, tx: &Tx, index: usize) -> Result<Verdict> {
        if index >= tx.inputs.len() {
            return Err(Error::InvalidInputIndex {
                index,
                len: tx.inputs.len(),
            });
        }
        let Some(spent) = self.utxos.resolve(tx.network, &tx.inputs[index].prev_output)? else {
            return Ok(Verdict::Reject(RejectReason::AlreadySpentOrUnknown(index)));
        };
        Ok(match self.check_input(tx, index, &spent)? {
            Some(reason) => Verdict::Reject(reason),
            None => Verdict::Accept,
        })
    }

    fn check(&self, tx: &Tx) -> Result<Verdict> {
        if tx.inputs.is_empty() {
            return Ok(Verdict::Reject(RejectReason::NoInputs));
        }
        if tx.outputs.is_empty() {
            return Ok(Verdict::Reject(RejectReason::NoOutputs));
        }

        let mut spent = Vec::with_capacity(tx.inputs.len());
        for (i, tx_in) in tx.inputs.iter().enumerate() {
            match self.utxos.resolve(tx.network, &tx_in.prev_output)? {
                Some(out) => spent.push(out),
                None => return Ok(Verdict::Reject(RejectReason::AlreadySpentOrUnknown(i))),
            }
        }

        if let Some(reason) = check_amounts(tx, &spent) {
            return Ok(Verdict::Reject(reason));
        }

        let results: Vec<Result<Option<RejectReason>>> = spent
            .par_iter()
            .enumerate()
            .map(|(i, out)| self.check_input(tx, i, out))
            .collect();
        for result in results {
            if let Some(reason) = result? {
                return Ok(Verdict::Reject(reason));
            }
        }
        Ok(Verdict::Accept)
    }

    fn check_input(&self, tx: &Tx, index: usize, spent: &TxOut) -> Result<Option<RejectReason>> {
        let lock_script = &spent.lock_script.0;
        if !check_lock_script(lock_script) {
            return Ok(Some(RejectReason::UnsupportedScript(index)));
        }
        let Ok((sig, pubkey)) = parse_unlock_script(&tx.inputs[index].unlock_script) else {
            return Ok(Some(RejectReason::InvalidSignature(index)));
        };
        if !check_lock_script_addr(&hash160(&pubkey), lock_script) {
            return Ok(Some(RejectReason::PublicKeyHashMismatch(index)));
        }
        let Some((&mode, der)) = sig.split_last() else {
            return Ok(Some(RejectReason::InvalidSignature(index)));
        };
        if mode != SIGHASH_ALL {
            return Ok(Some(RejectReason::SighashMismatch(index)));
        }
        let challenge = sighash_for_script(tx, index, lock_script, SigHashType::All)?;
        if !self.verifier.verify(&pubkey, &challenge, der) {
            return Ok(Some(RejectReason::InvalidSignature(index)));
        }
        trace!(input = index, %challenge, "signature verified");
        Ok(None)
    }
}

fn check_amounts(tx: &Tx, spent: &[TxOut]) -> Option<RejectReason> {
    let Some(input) = spent.iter().try_fold(0u64, |total, out| total.checked_add(out.satoshis)) else {
        return Some(RejectReason::ArithmeticOverflow);
    };
    let Some(output) = tx.total_output() else {
        return Some(RejectReason::ArithmeticOverflow);
    };
    if input < output {
        return Some(RejectReason::NegativeFee { input, output });
    }
    if input > MAX_SATOSHIS {
        return Some(RejectReason::ValueOutOfRange);
    }
    trace!(fee = input - output, "amounts balance");
    None
}

/// Validates `tx` against `utxos` with ECDSA over secp256k1.
///
/// # Errors
/// Lookup backend failures, unchanged.
pub fn validate<U: UtxoLookup + Sync + ?Sized>(tx: &Tx, utxos: &U) -> Result<Verdict> {
    TxValidator::new(utxos).validate(tx)
}
