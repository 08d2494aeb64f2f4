//! Register name validation
//!
//! Companion to the mark table: the parser consumes one character where a
//! register is allowed and delegates the "is this a register" question here.

use serde::{Deserialize, Serialize};

/// A validated single-character register name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterName(char);

impl RegisterName {
    /// Validate one character as a register name.
    ///
    /// Covers the named registers (letters), the numbered registers, and the
    /// special registers: unnamed, small-delete, last command, last inserted
    /// text, file names, last search, expression, black hole, and the
    /// selection/clipboard registers.
    pub fn from_char(ch: char) -> Option<Self> {
        let valid = ch.is_ascii_alphabetic()
            || ch.is_ascii_digit()
            || matches!(ch, '"' | '-' | ':' | '.' | '%' | '#' | '/' | '=' | '_' | '*' | '+');
        if valid { Some(RegisterName(ch)) } else { None }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}
