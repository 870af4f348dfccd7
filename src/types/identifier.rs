//! Data unit identifier: the ASDU header.
//!
//! ```text
//! | type ID | variable structure | cause  [| originator] | common address |
//! |    1    |         1          |      1 or 2           |     1 or 2     |
//! ```

use crate::types::{CauseOfTransmission, TypeId};

/// Information object address, 1 to 3 bytes on the wire.
pub type InfoObjAddr = u32;

/// Common address of ASDU (station address), 1 or 2 bytes on the wire.
pub type CommonAddr = u16;

/// Originator address, present when the cause field is 2 bytes wide.
pub type OriginAddr = u8;

/// Reserved common address, never valid.
pub const INVALID_COMMON_ADDR: CommonAddr = 0;

/// Global (broadcast) common address.
///
/// With a 1-byte common address field it is sent as 255.
pub const GLOBAL_COMMON_ADDR: CommonAddr = 0xFFFF;

/// Information object address used by system commands that address no object.
pub const INFO_OBJ_ADDR_IRRELEVANT: InfoObjAddr = 0;

/// Variable Structure Qualifier (VSQ).
///
/// Defines the structure of information objects in an ASDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Vsq {
    /// Number of information objects (1-127)
    pub count: u8,
    /// If true, addresses are sequential (SQ=1)
    pub sequence: bool,
}

impl Vsq {
    /// Create a new VSQ.
    #[inline]
    pub const fn new(count: u8, sequence: bool) -> Self {
        Self { count, sequence }
    }

    /// Parse VSQ from byte.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self {
            count: value & 0x7F,
            sequence: (value & 0x80) != 0,
        }
    }

    /// Encode VSQ to byte.
    #[inline]
    pub const fn as_u8(&self) -> u8 {
        (self.count & 0x7F) | if self.sequence { 0x80 } else { 0 }
    }
}

/// Data unit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier {
    /// Type identification
    pub type_id: TypeId,
    /// Variable structure qualifier
    pub variable: Vsq,
    /// Cause of transmission
    pub cause: CauseOfTransmission,
    /// Originator address, 0 for the default
    pub orig_addr: OriginAddr,
    /// Common address of ASDU (station address)
    pub common_addr: CommonAddr,
}

impl Identifier {
    /// Create an identifier with an empty, non-sequential VSQ.
    pub fn new(
        type_id: TypeId,
        cause: impl Into<CauseOfTransmission>,
        common_addr: CommonAddr,
    ) -> Self {
        Self {
            type_id,
            variable: Vsq::default(),
            cause: cause.into(),
            orig_addr: 0,
            common_addr,
        }
    }

    /// Set the variable structure qualifier.
    pub fn with_variable(mut self, variable: Vsq) -> Self {
        self.variable = variable;
        self
    }

    /// Set the originator address.
    pub fn with_orig_addr(mut self, orig_addr: OriginAddr) -> Self {
        self.orig_addr = orig_addr;
        self
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.orig_addr == 0 {
            write!(f, "{} {} @{}", self.type_id, self.cause, self.common_addr)
        } else {
            write!(
                f,
                "{} {} {}@{}",
                self.type_id, self.cause, self.orig_addr, self.common_addr
            )
        }
    }
}
