//! Transaction input.
use crate::messages::out_point::OutPoint;
use crate::script::Script;
use crate::util::{Result, Serializable, read_var_bytes, var_int, write_var_bytes};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Maximum script length accepted when decoding (consensus script size limit).
pub const MAX_SCRIPT_LEN: usize = 10_000;

/// Sequence number that disables lock time and relative lock time for an input.
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Transaction input.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxIn {
    /// The previous output transaction reference.
    pub prev_output: OutPoint,
    /// Unlocking data proving authorization to spend `prev_output`. Empty until signed.
    pub unlock_script: Script,
    /// Sequence number as defined by the sender.
    pub sequence: u32,
}

impl TxIn {
    /// Creates an unsigned input spending `prev_output` with a final sequence number.
    #[must_use]
    pub fn new(prev_output: OutPoint) -> TxIn {
        TxIn {
            prev_output,
            unlock_script: Script::new(),
            sequence: SEQUENCE_FINAL,
        }
    }

    /// Returns the size of the transaction input in bytes.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        OutPoint::SIZE + var_int::size(self.unlock_script.0.len() as u64) + self.unlock_script.0.len() + 4
    }

    /// Whether unlocking data has been written to this input.
    #[must_use]
    #[inline]
    pub fn is_signed(&self) -> bool {
        !self.unlock_script.is_empty()
    }

    /// Writes the input with `unlock_script` in place of its own unlocking data.
    pub(crate) fn write_with_script(&self, unlock_script: &[u8], writer: &mut dyn Write) -> io::Result<()> {
        self.prev_output.write(writer)?;
        write_var_bytes(unlock_script, writer)?;
        writer.write_u32::<LittleEndian>(self.sequence)
    }
}

impl Serializable<TxIn> for TxIn {
    fn read(reader: &mut dyn Read) -> Result<TxIn> {
        let prev_output = OutPoint::read(reader)?;
        let unlock_script = read_var_bytes(reader, MAX_SCRIPT_LEN, "Unlock script")?;
        let sequence = reader.read_u32::<LittleEndian>()?;
        Ok(TxIn {
            prev_output,
            unlock_script: Script(unlock_script),
            sequence,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.write_with_script(&self.unlock_script.0, writer)
    }
}
