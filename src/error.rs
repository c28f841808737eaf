use thiserror::Error;

/// Errors produced while decoding, encoding, or mutating .pgm data.
///
/// Two kinds exist: format errors (the buffer is too short for a declared
/// record) abort a parse outright; range errors (a value outside a field's
/// inclusive bounds, or a bad sample name) fail the single parse or mutation
/// that triggered them and leave previously set fields intact.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PgmError {
    #[error("'{record}' record truncated: need {need} bytes, have {have}")]
    Truncated {
        record: &'static str,
        need: usize,
        have: usize,
    },

    #[error("{field} out of range ({min} to {max}): {value}")]
    OutOfRange {
        field: &'static str,
        min: i32,
        max: i32,
        value: i32,
    },

    #[error("{field} too long: {len} characters (max {max})")]
    NameTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("invalid character in {field}: {ch:?}")]
    InvalidNameChar { field: &'static str, ch: char },
}

impl PgmError {
    /// True for errors caused by a buffer shorter than a declared record.
    pub fn is_format_error(&self) -> bool {
        matches!(self, PgmError::Truncated { .. })
    }

    /// True for errors caused by a value violating a field's constraints.
    pub fn is_range_error(&self) -> bool {
        !self.is_format_error()
    }
}

pub type Result<T> = std::result::Result<T, PgmError>;
