//! Transaction model: out points, inputs, outputs and transactions with their
//! canonical binary encoding.

mod out_point;
mod tx;
mod tx_in;
mod tx_out;

pub use self::out_point::OutPoint;
pub use self::tx::{MAX_INPUTS, MAX_OUTPUTS, MAX_SATOSHIS, Tx, UnlockView};
pub use self::tx_in::{MAX_SCRIPT_LEN, SEQUENCE_FINAL, TxIn};
pub use self::tx_out::TxOut;
