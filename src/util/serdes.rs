//! Binary serialization/deserialization trait for wire objects.
use crate::util::Result;
use std::io;
use std::io::{Read, Write};

/// An object that may be serialized and deserialized.
pub trait Serializable<T> {
    /// Reads the object from serialized form.
    ///
    /// # Errors
    /// `Error::MalformedEncoding` for truncated or out-of-range data.
    fn read(reader: &mut dyn Read) -> Result<T>
    where
        Self: Sized;

    /// Writes the object to serialized form.
    ///
    /// # Errors
    /// IO errors.
    fn write(&self, writer: &mut dyn Write) -> io::Result<()>;
}

/// Reads a length-prefixed byte string, rejecting lengths above `max_len`.
pub(crate) fn read_var_bytes(reader: &mut dyn Read, max_len: usize, what: &str) -> Result<Vec<u8>> {
    let len = crate::util::var_int::read(reader)?;
    if len > max_len as u64 {
        return Err(crate::util::Error::MalformedEncoding(format!("{} too long: {}", what, len)));
    }
    let mut bytes = vec![0; len as usize];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Writes a length-prefixed byte string.
pub(crate) fn write_var_bytes(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    crate::util::var_int::write(bytes.len() as u64, writer)?;
    writer.write_all(bytes)
}
