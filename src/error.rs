//! Error types for the ASDU codec.

use thiserror::Error;

/// Result type alias for ASDU operations.
pub type Result<T> = std::result::Result<T, AsduError>;

/// Broad category of an [`AsduError`].
///
/// Callers that only need to decide what to do with a failed message
/// (drop it, reconfigure the link, ask for a retransmission) match on this
/// instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Link parameters out of range. Fatal to the link configuration.
    Config,
    /// An address does not fit its field, or is a reserved value.
    Address,
    /// Counts and lengths are inconsistent, or the buffer is too short.
    Size,
    /// The type identification has no known element size.
    UnknownType,
    /// The cause of transmission is unused.
    Cause,
}

/// ASDU codec error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsduError {
    /// Invalid link parameter
    #[error("Invalid parameter: {0}")]
    InvalidParam(&'static str),

    /// Common address zero is reserved
    #[error("Common address zero is reserved")]
    CommonAddrZero,

    /// Common address does not fit the configured width
    #[error("Common address {addr} does not fit in {size} byte(s)")]
    CommonAddrFit { addr: u16, size: u8 },

    /// Information object address does not fit the configured width
    #[error("Information object address {addr} does not fit in {size} byte(s)")]
    InfoObjAddrFit { addr: u32, size: u8 },

    /// Originator address set while the cause field has no room for it
    #[error("Originator address {0} requires a 2-byte cause of transmission")]
    OriginAddrFit(u8),

    /// Variable structure count outside 1..=127
    #[error("Variable structure count {0} out of range")]
    InfoObjIndexFit(usize),

    /// Computed information object length is zero
    #[error("Information object length is zero")]
    ZeroLength,

    /// Payload length disagrees with the variable structure qualifier
    #[error("Payload length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Not enough bytes
    #[error("Unexpected end of buffer: need {needed} byte(s), have {available}")]
    EndOfBuffer { needed: usize, available: usize },

    /// Payload does not fit the fixed ASDU buffer
    #[error("Payload overflow: {needed} byte(s) exceed capacity of {capacity}")]
    PayloadOverflow { needed: usize, capacity: usize },

    /// Unknown type identifier
    #[error("Unknown type ID: {0}")]
    UnknownTypeId(u8),

    /// Cause of transmission is unused (zero)
    #[error("Cause of transmission is unused")]
    CauseZero,
}

impl AsduError {
    /// Create an invalid parameter error.
    pub const fn invalid_param(msg: &'static str) -> Self {
        Self::InvalidParam(msg)
    }

    /// Create an end-of-buffer error.
    pub const fn end_of_buffer(needed: usize, available: usize) -> Self {
        Self::EndOfBuffer { needed, available }
    }

    /// Category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParam(_) => ErrorKind::Config,
            Self::CommonAddrZero
            | Self::CommonAddrFit { .. }
            | Self::InfoObjAddrFit { .. }
            | Self::OriginAddrFit(_) => ErrorKind::Address,
            Self::InfoObjIndexFit(_)
            | Self::ZeroLength
            | Self::LengthMismatch { .. }
            | Self::EndOfBuffer { .. }
            | Self::PayloadOverflow { .. } => ErrorKind::Size,
            Self::UnknownTypeId(_) => ErrorKind::UnknownType,
            Self::CauseZero => ErrorKind::Cause,
        }
    }

    /// Check if this error indicates a bad link configuration.
    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Check if this error is an address range violation.
    pub fn is_address_error(&self) -> bool {
        self.kind() == ErrorKind::Address
    }

    /// Check if this error is a count or length violation.
    pub fn is_size_error(&self) -> bool {
        self.kind() == ErrorKind::Size
    }

    /// Check if a retransmission by a higher layer may help.
    ///
    /// Only size errors qualify: a truncated or garbled frame can arrive
    /// intact the next time, the other kinds will fail again.
    pub fn is_retryable(&self) -> bool {
        self.is_size_error()
    }
}
