//! Mark name validation
//!
//! The parser consumes a single character after `'` (or inside a `:marks`
//! argument) and asks this module whether it names a mark. The validity set
//! lives here; the grammar never enumerates it.

use serde::{Deserialize, Serialize};

/// A validated single-character mark name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark(char);

impl Mark {
    /// Validate one character as a mark name.
    ///
    /// Letters are the per-file and per-session marks, digits are the
    /// numbered jump marks, and the punctuation set covers the automatic
    /// marks (`'`, `` ` ``, last change, visual bounds, sentence/paragraph
    /// motions).
    pub fn from_char(ch: char) -> Option<Self> {
        let valid = ch.is_ascii_alphabetic()
            || ch.is_ascii_digit()
            || matches!(
                ch,
                '\'' | '`' | '"' | '^' | '.' | '[' | ']' | '<' | '>' | '(' | ')' | '{' | '}'
            );
        if valid { Some(Mark(ch)) } else { None }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits_are_marks() {
        for ch in ['a', 'z', 'A', 'Z', '0', '9'] {
            assert_eq!(Mark::from_char(ch).map(Mark::as_char), Some(ch));
        }
    }

    #[test]
    fn test_automatic_marks() {
        for ch in ['\'', '`', '"', '^', '.', '[', ']', '<', '>'] {
            assert!(Mark::from_char(ch).is_some(), "{ch} should be a mark");
        }
    }

    #[test]
    fn test_invalid_marks() {
        for ch in ['!', '#', '$', '%', '/', '?', ' ', '\t', '+', '-'] {
            assert!(Mark::from_char(ch).is_none(), "{ch} should not be a mark");
        }
    }
}
