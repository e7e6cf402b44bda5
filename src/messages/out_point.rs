//! OutPoint, a reference to a previously created transaction output.

use crate::util::{Hash256, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// Reference to a transaction output.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub struct OutPoint {
    /// Hash of the referenced transaction, in wire order.
    pub hash: Hash256,
    /// Index of the output in the transaction, zero-indexed.
    pub index: u32,
}

impl OutPoint {
    /// Size of the out point in bytes (32 + 4 = 36).
    pub const SIZE: usize = 36;

    /// Creates an out point from a txid in display hex and an output index.
    ///
    /// # Errors
    /// Bad hex or a txid that is not 32 bytes.
    pub fn from_txid(txid: &str, index: u32) -> Result<OutPoint> {
        Ok(OutPoint {
            hash: Hash256::decode(txid)?,
            index,
        })
    }

    /// Returns the size of the out point in bytes.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        Self::SIZE
    }
}

impl Serializable<OutPoint> for OutPoint {
    fn read(reader: &mut dyn Read) -> Result<OutPoint> {
        let hash = Hash256::read(reader)?;
        let index = reader.read_u32::<LittleEndian>()?;
        Ok(OutPoint { hash, index })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.hash.write(writer)?;
        writer.write_u32::<LittleEndian>(self.index)
    }
}

impl fmt::Display for OutPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.hash.encode(), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn write_read() {
        let mut v = Vec::new();
        let t = OutPoint::from_txid("123412345678567890ab90abcdefcdef123412345678567890ab90abcdefcdef", 7).unwrap();
        t.write(&mut v).unwrap();
        assert_eq!(v.len(), t.size());
        assert_eq!(&v[32..], &[7, 0, 0, 0]);
        assert_eq!(OutPoint::read(&mut Cursor::new(&v)).unwrap(), t);
    }

    #[test]
    fn display() {
        let t = OutPoint::from_txid("0d6fe5213c0b3291f208cba8bfb59b7476dffacc4e5cb66f6eb20a080843a299", 13).unwrap();
        assert_eq!(t.to_string(), "0d6fe5213c0b3291f208cba8bfb59b7476dffacc4e5cb66f6eb20a080843a299:13");
    }

    #[test]
    fn truncated() {
        let v = vec![0u8; 35];
        assert_eq!(
            OutPoint::read(&mut Cursor::new(&v)).unwrap_err().to_string(),
            "Malformed encoding: unexpected end of data"
        );
    }
}
