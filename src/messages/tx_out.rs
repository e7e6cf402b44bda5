//! Transaction output.

use crate::messages::tx_in::MAX_SCRIPT_LEN;
use crate::script::Script;
use crate::util::{Result, Serializable, read_var_bytes, var_int, write_var_bytes};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Transaction output.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxOut {
    /// Number of satoshis to spend.
    pub satoshis: u64,
    /// Public key script to claim the output.
    pub lock_script: Script,
}

impl TxOut {
    /// Creates an output paying `satoshis` to `lock_script`.
    #[must_use]
    pub fn new(satoshis: u64, lock_script: Script) -> TxOut {
        TxOut { satoshis, lock_script }
    }

    /// Returns the size of the transaction output in bytes.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        8 + var_int::size(self.lock_script.0.len() as u64) + self.lock_script.0.len()
    }
}

impl Serializable<TxOut> for TxOut {
    fn read(reader: &mut dyn Read) -> Result<TxOut> {
        let satoshis = reader.read_u64::<LittleEndian>()?;
        let lock_script = read_var_bytes(reader, MAX_SCRIPT_LEN, "Lock script")?;
        Ok(TxOut {
            satoshis,
            lock_script: Script(lock_script),
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.satoshis)?;
        write_var_bytes(&self.lock_script.0, writer)
    }
}
