//! Standard error and result types for the library.
use crate::messages::OutPoint;
use base58::FromBase58Error;
use hex::FromHexError;
use secp256k1::Error as Secp256k1Error;
use std::io;

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// An argument provided is invalid
    BadArgument(String),
    /// The data given is not valid
    BadData(String),
    /// Base58 string could not be decoded
    FromBase58Error(FromBase58Error),
    /// Hex string could not be decoded
    FromHexError(FromHexError),
    /// Input index is past the end of the transaction's inputs
    InvalidInputIndex {
        /// Requested input
        index: usize,
        /// Number of inputs in the transaction
        len: usize,
    },
    /// Standard library IO error
    IOError(io::Error),
    /// The UTXO backend failed while resolving an output
    Lookup(String),
    /// The referenced output could not be resolved
    LookupFailed(OutPoint),
    /// Bytes do not form a well-formed transaction or script
    MalformedEncoding(String),
    /// Error in the Secp256k1 library
    Secp256k1Error(Secp256k1Error),
    /// The script shape is not handled by this library
    UnsupportedScript(String),
    /// The sighash mode is named but not implemented, or unknown
    UnsupportedSighashMode(u32),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::BadArgument(s) => write!(f, "Bad argument: {}", s),
            Error::BadData(s) => write!(f, "Bad data: {}", s),
            Error::FromBase58Error(e) => write!(f, "Base58 decoding error: {:?}", e),
            Error::FromHexError(e) => write!(f, "Hex decoding error: {}", e),
            Error::InvalidInputIndex { index, len } => {
                write!(f, "Invalid input index: {} (tx has {} inputs)", index, len)
            }
            Error::IOError(e) => write!(f, "IO error: {}", e),
            Error::Lookup(s) => write!(f, "UTXO lookup error: {}", s),
            Error::LookupFailed(outpoint) => write!(f, "Lookup failed: {}", outpoint),
            Error::MalformedEncoding(s) => write!(f, "Malformed encoding: {}", s),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
            Error::UnsupportedScript(s) => write!(f, "Unsupported script: {}", s),
            Error::UnsupportedSighashMode(mode) => {
                write!(f, "Unsupported sighash mode: {:#04x}", mode)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FromHexError(e) => Some(e),
            Error::IOError(e) => Some(e),
            Error::Secp256k1Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FromBase58Error> for Error {
    fn from(e: FromBase58Error) -> Self {
        Error::FromBase58Error(e)
    }
}

impl From<FromHexError> for Error {
    fn from(e: FromHexError) -> Self {
        Error::FromHexError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::MalformedEncoding("unexpected end of data".to_string()),
            _ => Error::IOError(e),
        }
    }
}

impl From<Secp256k1Error> for Error {
    fn from(e: Secp256k1Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn eof_is_malformed() {
        let e: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "short").into();
        assert_eq!(e.to_string(), "Malformed encoding: unexpected end of data");
        let e: Error = io::Error::new(io::ErrorKind::Other, "disk").into();
        assert_eq!(e.to_string(), "IO error: disk");
    }

    #[test]
    fn display() {
        let e = Error::InvalidInputIndex { index: 3, len: 1 };
        assert_eq!(e.to_string(), "Invalid input index: 3 (tx has 1 inputs)");
        assert_eq!(Error::UnsupportedSighashMode(2).to_string(), "Unsupported sighash mode: 0x02");
    }
}
