//! Script containers and element parsing.
//!
//! A script is kept as its raw bytes so that encoding is exact. [`Script::elements`]
//! splits it into a closed set of [`ScriptElement`]s, opcodes and data pushes,
//! which is all the pattern recognition in this crate needs.
//!
//! # Examples
//!
//! ```
//! use txauth::script::{Script, ScriptElement, op_codes::*};
//!
//! let mut s = Script::new();
//! s.append(OP_DUP);
//! s.append_data(&[1, 2, 3]);
//! assert_eq!(
//!     s.elements().unwrap(),
//!     vec![ScriptElement::Op(OP_DUP), ScriptElement::Push(vec![1, 2, 3])]
//! );
//! ```
pub mod op_codes;

use self::op_codes::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4, op_name};
use crate::util::{Error, Result};
use std::fmt;

/// Transaction script.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

/// A single parsed script element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptElement {
    /// A non-push opcode, including `OP_0`.
    Op(u8),
    /// Data pushed onto the stack.
    Push(Vec<u8>),
}

impl Script {
    /// Creates a new empty script.
    #[must_use]
    #[inline]
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Appends a single opcode or data byte.
    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Appends a slice of data.
    #[inline]
    pub fn append_slice(&mut self, slice: &[u8]) {
        self.0.extend_from_slice(slice);
    }

    /// Appends the opcodes and provided data that push it onto the stack,
    /// using the smallest push form.
    pub fn append_data(&mut self, data: &[u8]) {
        let len = data.len();
        match len {
            0..=75 => self.0.push(len as u8),
            76..=0xff => {
                self.0.push(OP_PUSHDATA1);
                self.0.push(len as u8);
            }
            0x100..=0xffff => {
                self.0.push(OP_PUSHDATA2);
                self.0.extend_from_slice(&(len as u16).to_le_bytes());
            }
            _ => {
                self.0.push(OP_PUSHDATA4);
                self.0.extend_from_slice(&(len as u32).to_le_bytes());
            }
        }
        self.0.extend_from_slice(data);
    }

    /// Builds a script from elements.
    ///
    /// An empty push is written as `OP_0` and parses back as `ScriptElement::Op(OP_0)`.
    #[must_use]
    pub fn from_elements(elements: &[ScriptElement]) -> Script {
        let mut script = Script::new();
        for element in elements {
            match element {
                ScriptElement::Op(op) => script.append(*op),
                ScriptElement::Push(data) => script.append_data(data),
            }
        }
        script
    }

    /// Splits the script into opcodes and data pushes.
    ///
    /// # Errors
    /// `Error::MalformedEncoding` if a push runs past the end of the script.
    pub fn elements(&self) -> Result<Vec<ScriptElement>> {
        let script = &self.0;
        let mut elements = Vec::new();
        let mut i = 0;
        while i < script.len() {
            let op = script[i];
            let (header, len) = match op {
                1..=75 => (1, op as usize),
                OP_PUSHDATA1 => (2, read_len(script, i + 1, 1)?),
                OP_PUSHDATA2 => (3, read_len(script, i + 1, 2)?),
                OP_PUSHDATA4 => (5, read_len(script, i + 1, 4)?),
                _ => {
                    elements.push(ScriptElement::Op(op));
                    i += 1;
                    continue;
                }
            };
            let start = i + header;
            let end = start
                .checked_add(len)
                .filter(|end| *end <= script.len())
                .ok_or_else(|| Error::MalformedEncoding(format!("Push of {} bytes at {} overruns script", len, i)))?;
            elements.push(ScriptElement::Push(script[start..end].to_vec()));
            i = end;
        }
        Ok(elements)
    }

    /// Returns the raw bytes of the script.
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the script length in bytes.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the script has no bytes.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn read_len(script: &[u8], at: usize, width: usize) -> Result<usize> {
    if at + width > script.len() {
        return Err(Error::MalformedEncoding("Push length overruns script".to_string()));
    }
    let mut buf = [0u8; 4];
    buf[..width].copy_from_slice(&script[at..at + width]);
    Ok(u32::from_le_bytes(buf) as usize)
}

impl From<Vec<u8>> for Script {
    fn from(bytes: Vec<u8>) -> Self {
        Script(bytes)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let elements = match self.elements() {
            Ok(elements) => elements,
            Err(_) => return write!(f, "<malformed {}>", hex::encode(&self.0)),
        };
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match element {
                ScriptElement::Op(op) => match op_name(*op) {
                    Some(name) => f.write_str(name)?,
                    None => write!(f, "OP_[{}]", op)?,
                },
                ScriptElement::Push(data) => f.write_str(&hex::encode(data))?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", self)
    }
}
