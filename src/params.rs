//! Link-wide ASDU parameters.
//!
//! The field widths of an ASDU are not fixed by the standard; each link
//! agrees on them up front (companion standard 101, subclause 7.1). IEC 104
//! always uses the widest layout.

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{AsduError, Result};
use crate::types::{
    CauseOfTransmission, CommonAddr, Identifier, OriginAddr, TypeId, INVALID_COMMON_ADDR,
};

/// ASDU parameters for one link.
///
/// Build once at link setup and share by reference with every ASDU on the
/// link. Nothing in the codec mutates it.
///
/// # Example
///
/// ```rust
/// use voltage_asdu::Params;
///
/// let params = Params::narrow().common_addr_size(2);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.identifier_size(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    /// Width of the cause of transmission, 1 or 2 bytes.
    /// A width of 2 activates the originator address.
    pub cause_size: u8,
    /// Originator address, 0 for the default.
    /// Only meaningful when `cause_size` is 2.
    pub orig_address: OriginAddr,
    /// Width of the common address (station address), 1 or 2 bytes.
    pub common_addr_size: u8,
    /// Width of an information object address, 1 to 3 bytes.
    pub info_obj_addr_size: u8,
    /// Time zone of embedded time tags.
    pub info_obj_time_zone: FixedOffset,
}

impl Params {
    /// Smallest layout: 1-byte cause, common address and object address.
    pub fn narrow() -> Self {
        Self {
            cause_size: 1,
            orig_address: 0,
            common_addr_size: 1,
            info_obj_addr_size: 1,
            info_obj_time_zone: Utc.fix(),
        }
    }

    /// Largest layout, as mandated by IEC 104.
    pub fn wide() -> Self {
        Self {
            cause_size: 2,
            orig_address: 0,
            common_addr_size: 2,
            info_obj_addr_size: 3,
            info_obj_time_zone: Utc.fix(),
        }
    }

    /// Set the cause of transmission width.
    pub fn cause_size(mut self, size: u8) -> Self {
        self.cause_size = size;
        self
    }

    /// Set the default originator address.
    pub fn orig_address(mut self, addr: OriginAddr) -> Self {
        self.orig_address = addr;
        self
    }

    /// Set the common address width.
    pub fn common_addr_size(mut self, size: u8) -> Self {
        self.common_addr_size = size;
        self
    }

    /// Set the information object address width.
    pub fn info_obj_addr_size(mut self, size: u8) -> Self {
        self.info_obj_addr_size = size;
        self
    }

    /// Set the time zone used for time tags.
    pub fn time_zone(mut self, tz: FixedOffset) -> Self {
        self.info_obj_time_zone = tz;
        self
    }

    /// Check every width against the range the standard allows.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.cause_size, 1 | 2) {
            return Err(AsduError::invalid_param("cause size must be 1 or 2"));
        }
        if !matches!(self.common_addr_size, 1 | 2) {
            return Err(AsduError::invalid_param(
                "common address size must be 1 or 2",
            ));
        }
        if !matches!(self.info_obj_addr_size, 1..=3) {
            return Err(AsduError::invalid_param(
                "information object address size must be 1, 2 or 3",
            ));
        }
        Ok(())
    }

    /// Check that a station address is usable on this link.
    pub fn validate_common_addr(&self, addr: CommonAddr) -> Result<()> {
        if addr == INVALID_COMMON_ADDR {
            return Err(AsduError::CommonAddrZero);
        }
        let bits = u16::BITS - addr.leading_zeros();
        if bits > u32::from(self.common_addr_size) * 8 {
            return Err(AsduError::CommonAddrFit {
                addr,
                size: self.common_addr_size,
            });
        }
        Ok(())
    }

    /// Identifier for a new ASDU on this link.
    ///
    /// Carries the link's default originator address when the cause field
    /// has room for it.
    pub fn identifier(
        &self,
        type_id: TypeId,
        cause: impl Into<CauseOfTransmission>,
        common_addr: CommonAddr,
    ) -> Identifier {
        let orig_addr = if self.cause_size == 2 {
            self.orig_address
        } else {
            0
        };
        Identifier::new(type_id, cause, common_addr).with_orig_addr(orig_addr)
    }

    /// Size of the data unit identifier (header) in bytes.
    #[inline]
    pub fn identifier_size(&self) -> usize {
        2 + self.cause_size as usize + self.common_addr_size as usize
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::wide()
    }
}
