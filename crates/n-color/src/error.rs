// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors produced when parsing a color from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input did not contain exactly six hex digits.
    #[error("expected 6 hex digits, got {len} in {input:?}")]
    InvalidLength { input: String, len: usize },

    /// The input contained a character outside `0-9a-fA-F`.
    #[error("invalid hex digit {digit:?} in {input:?}")]
    InvalidDigit { input: String, digit: char },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_error_names_input() {
        let err = ColorError::InvalidLength { input: "#12345".into(), len: 5 };
        let msg = err.to_string();
        assert!(msg.contains("got 5"), "{msg}");
        assert!(msg.contains("#12345"), "{msg}");
    }

    #[test]
    fn digit_error_names_digit() {
        let err = ColorError::InvalidDigit { input: "#12345G".into(), digit: 'G' };
        assert!(err.to_string().contains("'G'"));
    }
}
