//! Error types for the strict decoding helpers.
//!
//! The regular decoders are total and never return an error, invalid input is either copied
//! literally or replaced with `U+FFFD`. [`DecodeError`] is only returned by the `try_*` and
//! `*_str` variants that refuse to be lossy.

/// An error that can occur when decoded bytes are required to be valid UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Decoded bytes is not valid UTF-8.
    Utf8 {
        /// Length of the valid UTF-8 prefix of the decoded bytes that failed, a single path segment,
        /// query key or query value when decoding a whole structure.
        valid_up_to: usize,
    },
}

impl DecodeError {
    pub(crate) fn from_utf8(err: &std::str::Utf8Error) -> Self {
        Self::Utf8 { valid_up_to: err.valid_up_to() }
    }
}

impl std::error::Error for DecodeError {}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 { valid_up_to } => {
                write!(f, "decoded bytes is not valid UTF-8 after byte {valid_up_to}")
            }
        }
    }
}
