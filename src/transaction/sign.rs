//! Signing P2PKH inputs.
use crate::messages::Tx;
use crate::script::Script;
use crate::transaction::generate_signature;
use crate::transaction::p2pkh::create_unlock_script;
use crate::transaction::sighash::{SigHashType, sighash};
use crate::utxo::UtxoLookup;
use crate::util::Result;
use crate::wallet::PrivateKey;
use tracing::debug;

/// Builds the unlock script `[signature ‖ mode, compressed public key]` for `n_input`.
///
/// The transaction is not modified.
///
/// # Errors
/// `Error::InvalidInputIndex`, `Error::UnsupportedSighashMode`,
/// `Error::LookupFailed` or a lookup backend error.
pub fn sign_input<U: UtxoLookup + ?Sized>(
    tx: &Tx,
    n_input: usize,
    private_key: &PrivateKey,
    sighash_type: SigHashType,
    utxos: &U,
) -> Result<Script> {
    let challenge = sighash(tx, n_input, sighash_type, utxos)?;
    let signature = generate_signature(private_key, &challenge, sighash_type)?;
    debug!(input = n_input, %challenge, "signed input");
    Ok(create_unlock_script(&signature, &private_key.public_key_bytes()))
}

/// Signs `n_input` with `SIGHASH_ALL` and stores the unlock script in the transaction.
///
/// Other inputs are left as they are. Inputs may be signed in any order.
///
/// # Errors
/// See [`sign_input`]. On error the transaction is unchanged.
pub fn apply<U: UtxoLookup + ?Sized>(tx: &mut Tx, n_input: usize, private_key: &PrivateKey, utxos: &U) -> Result<()> {
    let unlock_script = sign_input(tx, n_input, private_key, SigHashType::All, utxos)?;
    tx.inputs[n_input].unlock_script = unlock_script;
    Ok(())
}
