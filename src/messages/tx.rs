//! Transaction and its canonical wire encoding.
//!
//! The same encoder produces the network/storage bytes and the signature
//! preimage. [`UnlockView`] selects which unlocking data is written for each
//! input, so the preimage never requires mutating a transaction.

use crate::messages::{TxIn, TxOut};
use crate::network::Network;
use crate::util::{Error, Hash256, Result, Serializable, sha256d, var_int};
use crate::utxo::UtxoLookup;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io;
use std::io::{Cursor, Read, Write};

/// Maximum number of satoshis possible (21M coins).
pub const MAX_SATOSHIS: u64 = 21_000_000 * 100_000_000;

/// Maximum number of inputs accepted when decoding.
pub const MAX_INPUTS: u64 = 1_000_000;
/// Maximum number of outputs accepted when decoding.
pub const MAX_OUTPUTS: u64 = 1_000_000;

/// Which unlocking data the encoder writes for each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockView<'a> {
    /// Every input's own unlock script, as sent on the wire.
    Wire,
    /// The input being authorized carries `script_code`; every other input is
    /// written with empty unlocking data.
    Signing {
        /// Index of the input being authorized.
        input: usize,
        /// Locking script of the output that input spends.
        script_code: &'a [u8],
    },
}

/// Ledger transaction.
#[derive(Default, PartialEq, Eq, Hash, Clone)]
pub struct Tx {
    /// Transaction version.
    pub version: u32,
    /// Transaction inputs. Order determines each input's signing index.
    pub inputs: Vec<TxIn>,
    /// Transaction outputs.
    pub outputs: Vec<TxOut>,
    /// The block number or timestamp at which this transaction is unlocked.
    pub lock_time: u32,
    /// Chain the inputs are looked up on. Not part of the encoding.
    pub network: Network,
}

impl Tx {
    /// Creates a version 1 transaction with no lock time.
    #[must_use]
    pub fn new(inputs: Vec<TxIn>, outputs: Vec<TxOut>, network: Network) -> Tx {
        Tx {
            version: 1,
            inputs,
            outputs,
            lock_time: 0,
            network,
        }
    }

    /// Calculates the hash of the transaction (txid).
    #[must_use]
    pub fn hash(&self) -> Hash256 {
        sha256d(&self.to_bytes())
    }

    /// Returns the wire encoding.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_view(UnlockView::Wire)
    }

    /// Encodes with the given unlock view into a new buffer.
    #[must_use]
    pub fn encode_view(&self, view: UnlockView) -> Vec<u8> {
        let mut b = Vec::with_capacity(self.size());
        self.write_view(&mut b, view).expect("writing to a Vec cannot fail");
        b
    }

    /// Decodes a transaction that must span exactly `bytes`.
    ///
    /// # Errors
    /// `Error::MalformedEncoding` for truncated data, out-of-range counts or trailing bytes.
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Tx> {
        let mut cursor = Cursor::new(bytes);
        let tx = Tx::read_with_network(&mut cursor, network)?;
        let trailing = bytes.len() - cursor.position() as usize;
        if trailing != 0 {
            return Err(Error::MalformedEncoding(format!("{} trailing bytes", trailing)));
        }
        Ok(tx)
    }

    /// Decodes a transaction from hex.
    ///
    /// # Errors
    /// Bad hex, or see [`Tx::from_bytes`].
    pub fn from_hex(s: &str, network: Network) -> Result<Tx> {
        Tx::from_bytes(&hex::decode(s)?, network)
    }

    /// Reads a transaction, tagging it with `network`.
    ///
    /// # Errors
    /// `Error::MalformedEncoding` for truncated data or out-of-range counts.
    pub fn read_with_network(reader: &mut dyn Read, network: Network) -> Result<Tx> {
        let version = reader.read_u32::<LittleEndian>()?;
        let n_inputs = var_int::read(reader)?;
        if n_inputs > MAX_INPUTS {
            return Err(Error::MalformedEncoding(format!("Too many inputs: {}", n_inputs)));
        }
        let mut inputs = Vec::with_capacity(n_inputs.min(256) as usize);
        for _ in 0..n_inputs {
            inputs.push(TxIn::read(reader)?);
        }
        let n_outputs = var_int::read(reader)?;
        if n_outputs > MAX_OUTPUTS {
            return Err(Error::MalformedEncoding(format!("Too many outputs: {}", n_outputs)));
        }
        let mut outputs = Vec::with_capacity(n_outputs.min(256) as usize);
        for _ in 0..n_outputs {
            outputs.push(TxOut::read(reader)?);
        }
        let lock_time = reader.read_u32::<LittleEndian>()?;
        Ok(Tx {
            version,
            inputs,
            outputs,
            lock_time,
            network,
        })
    }

    /// Writes the transaction, choosing each input's unlocking data from `view`.
    pub fn write_view(&self, writer: &mut dyn Write, view: UnlockView) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.version)?;
        var_int::write(self.inputs.len() as u64, writer)?;
        for (i, tx_in) in self.inputs.iter().enumerate() {
            match view {
                UnlockView::Wire => tx_in.write(writer)?,
                UnlockView::Signing { input, script_code } if input == i => {
                    tx_in.write_with_script(script_code, writer)?
                }
                UnlockView::Signing { .. } => tx_in.write_with_script(&[], writer)?,
            }
        }
        var_int::write(self.outputs.len() as u64, writer)?;
        for tx_out in &self.outputs {
            tx_out.write(writer)?;
        }
        writer.write_u32::<LittleEndian>(self.lock_time)
    }

    /// Returns the size of the wire encoding in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        8 + var_int::size(self.inputs.len() as u64)
            + self.inputs.iter().map(TxIn::size).sum::<usize>()
            + var_int::size(self.outputs.len() as u64)
            + self.outputs.iter().map(TxOut::size).sum::<usize>()
    }

    /// Sum of output amounts, or `None` on overflow.
    #[must_use]
    pub fn total_output(&self) -> Option<u64> {
        self.outputs.iter().try_fold(0u64, |total, out| total.checked_add(out.satoshis))
    }

    /// Fee paid: resolved input amounts minus output amounts.
    ///
    /// # Errors
    /// `Error::LookupFailed` for an unknown input, `Error::BadData` if the
    /// outputs exceed the inputs or a sum overflows.
    pub fn fee<U: UtxoLookup + ?Sized>(&self, utxos: &U) -> Result<u64> {
        let mut total_in = 0u64;
        for tx_in in &self.inputs {
            let prev = utxos
                .resolve(self.network, &tx_in.prev_output)?
                .ok_or(Error::LookupFailed(tx_in.prev_output))?;
            total_in = total_in
                .checked_add(prev.satoshis)
                .ok_or_else(|| Error::BadData("Total in overflow".to_string()))?;
        }
        let total_out = self
            .total_output()
            .ok_or_else(|| Error::BadData("Total out overflow".to_string()))?;
        total_in
            .checked_sub(total_out)
            .ok_or_else(|| Error::BadData("Output total exceeds input".to_string()))
    }

    /// Whether every input carries unlocking data.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.inputs.iter().all(TxIn::is_signed)
    }
}

impl Serializable<Tx> for Tx {
    /// Reads a mainnet transaction. Use [`Tx::read_with_network`] for other networks.
    fn read(reader: &mut dyn Read) -> Result<Tx> {
        Tx::read_with_network(reader, Network::Mainnet)
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.write_view(writer, UnlockView::Wire)
    }
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let inputs_str = format!("[<{} inputs>]", self.inputs.len());
        let outputs_str = format!("[<{} outputs>]", self.outputs.len());
        f.debug_struct("Tx")
            .field("version", &self.version)
            .field("inputs", if self.inputs.len() <= 3 { &self.inputs } else { &inputs_str })
            .field("outputs", if self.outputs.len() <= 3 { &self.outputs } else { &outputs_str })
            .field("lock_time", &self.lock_time)
            .field("network", &self.network)
            .finish()
    }
}
