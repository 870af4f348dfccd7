//! ASDU (Application Service Data Unit).
//!
//! ```text
//!      | <------------  data unit identifier  ------------>|
//!      | type ID | variable struct | cause  | common addr  |
//! bytes|    1    |        1        | [1, 2] |    [1, 2]    |
//!      | <------------  information object  ------------->|
//!      | object address | element set | object time tag   |
//! bytes|    [1, 2, 3]   |             |                   |
//! ```
//!
//! Every ASDU owns a buffer of [`ASDU_SIZE_MAX`] bytes. The header is
//! written into the front of it on encode; information objects are
//! appended directly behind the header, so encoding never copies the
//! payload and appends never reallocate.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::error::{AsduError, Result};
use crate::params::Params;
use crate::types::{
    Cause, CauseOfTransmission, CommonAddr, Cp56Time2a, Identifier, InfoObjAddr, TypeId, Vsq,
};

/// Maximum size of an ASDU, header included.
pub const ASDU_SIZE_MAX: usize = 249;

/// Application Service Data Unit.
///
/// Bound to the [`Params`] of its link for its whole life; many ASDUs may
/// share one `Params`.
///
/// # Example
///
/// ```rust
/// use voltage_asdu::{Asdu, Cause, Identifier, Params, TypeId};
///
/// let params = Params::wide();
/// let mut asdu = Asdu::new(
///     &params,
///     Identifier::new(TypeId::InterrogationCommand, Cause::Activation, 1),
/// );
/// asdu.append_info_obj_addr(0)?;
/// asdu.append_u8(20)?;
/// asdu.inc_variable_number(1)?;
///
/// let bytes = asdu.encode()?;
/// assert_eq!(bytes, [100, 1, 6, 0, 1, 0, 0, 0, 0, 20]);
/// # Ok::<(), voltage_asdu::AsduError>(())
/// ```
#[derive(Clone)]
pub struct Asdu<'p> {
    params: &'p Params,
    /// Data unit identifier
    pub identifier: Identifier,
    buf: [u8; ASDU_SIZE_MAX],
    info_len: usize,
}

impl<'p> Asdu<'p> {
    /// Create an ASDU without information objects.
    pub fn new(params: &'p Params, identifier: Identifier) -> Self {
        Self {
            params,
            identifier,
            buf: [0; ASDU_SIZE_MAX],
            info_len: 0,
        }
    }

    /// Link parameters this ASDU is bound to.
    #[inline]
    pub fn params(&self) -> &'p Params {
        self.params
    }

    /// Information object bytes (addresses and elements).
    #[inline]
    pub fn info_obj(&self) -> &[u8] {
        let start = self.header_len();
        &self.buf[start..start + self.info_len]
    }

    /// Number of information object bytes.
    #[inline]
    pub fn info_obj_len(&self) -> usize {
        self.info_len
    }

    /// Free space left for information objects.
    #[inline]
    pub fn remaining(&self) -> usize {
        ASDU_SIZE_MAX - self.header_len() - self.info_len
    }

    /// Drop all information objects and reset the object count.
    pub fn clear_info_obj(&mut self) {
        self.info_len = 0;
        self.identifier.variable.count = 0;
    }

    // Clamped so that nonsense widths cannot index past the buffer; such
    // params are rejected before anything is written.
    #[inline]
    pub(crate) fn header_len(&self) -> usize {
        self.params.identifier_size().min(ASDU_SIZE_MAX)
    }

    /// Buffer region for `len` information object bytes, set as the payload.
    pub(crate) fn info_obj_mut(&mut self, len: usize) -> Result<&mut [u8]> {
        let start = self.header_len();
        if start + len > ASDU_SIZE_MAX {
            return Err(AsduError::PayloadOverflow {
                needed: start + len,
                capacity: ASDU_SIZE_MAX,
            });
        }
        self.info_len = len;
        Ok(&mut self.buf[start..start + len])
    }

    /// Header plus information objects, as laid out in the buffer.
    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        let end = self.header_len() + self.info_len;
        &mut self.buf[..end]
    }

    /// Append raw bytes to the information objects.
    pub fn append_bytes(&mut self, data: &[u8]) -> Result<()> {
        let start = self.header_len() + self.info_len;
        let end = start + data.len();
        if end > ASDU_SIZE_MAX {
            return Err(AsduError::PayloadOverflow {
                needed: end,
                capacity: ASDU_SIZE_MAX,
            });
        }
        self.buf[start..end].copy_from_slice(data);
        self.info_len += data.len();
        Ok(())
    }

    /// Append one byte to the information objects.
    #[inline]
    pub fn append_u8(&mut self, value: u8) -> Result<()> {
        self.append_bytes(&[value])
    }

    /// Append an information object address using the link's address width.
    pub fn append_info_obj_addr(&mut self, addr: InfoObjAddr) -> Result<()> {
        let size = self.params.info_obj_addr_size;
        let max: InfoObjAddr = match size {
            1 => 0xFF,
            2 => 0xFFFF,
            3 => 0xFF_FFFF,
            _ => {
                return Err(AsduError::invalid_param(
                    "information object address size must be 1, 2 or 3",
                ))
            }
        };
        if addr > max {
            return Err(AsduError::InfoObjAddrFit { addr, size });
        }
        self.append_bytes(&addr.to_le_bytes()[..usize::from(size)])
    }

    /// Decode an information object address from the front of `buf`.
    pub fn parse_info_obj_addr(&self, buf: &[u8]) -> Result<InfoObjAddr> {
        let size = usize::from(self.params.info_obj_addr_size);
        if !(1..=3).contains(&size) {
            return Err(AsduError::invalid_param(
                "information object address size must be 1, 2 or 3",
            ));
        }
        let bytes = buf
            .get(..size)
            .ok_or(AsduError::end_of_buffer(size, buf.len()))?;

        let mut le = [0u8; 4];
        le[..size].copy_from_slice(bytes);
        Ok(InfoObjAddr::from_le_bytes(le))
    }

    /// Add `n` to the number of information objects (companion standard
    /// 101, subclause 7.2.2).
    pub fn inc_variable_number(&mut self, n: usize) -> Result<()> {
        let count = usize::from(self.identifier.variable.count) + n;
        if count >= 128 {
            return Err(AsduError::InfoObjIndexFit(count));
        }
        self.identifier.variable.count = count as u8;
        Ok(())
    }

    /// Append a CP56Time2a tag for `time`, in the link's time zone.
    pub fn append_cp56time2a<Tz: TimeZone>(&mut self, time: &DateTime<Tz>) -> Result<()> {
        let tag = Cp56Time2a::from_datetime(time, &self.params.info_obj_time_zone);
        self.append_bytes(&tag.to_bytes())
    }

    /// Read a CP56Time2a tag from the front of `buf`, in the link's time zone.
    ///
    /// `Ok(None)` means the tag was complete but does not describe a valid
    /// date and time.
    pub fn parse_cp56time2a(&self, buf: &[u8]) -> Result<Option<DateTime<FixedOffset>>> {
        let tag = Cp56Time2a::from_bytes(buf)?;
        Ok(tag.to_datetime(&self.params.info_obj_time_zone))
    }

    /// New ASDU on the same link answering this one with a different type.
    ///
    /// Common and originator address are kept, as is the test flag.
    pub fn respond(&self, type_id: TypeId, cause: Cause) -> Asdu<'p> {
        Asdu::new(
            self.params,
            Identifier {
                type_id,
                variable: Vsq::default(),
                cause: CauseOfTransmission::new(cause).with_test(self.identifier.cause.test),
                orig_addr: self.identifier.orig_addr,
                common_addr: self.identifier.common_addr,
            },
        )
    }

    /// Copy of this ASDU, information objects included, with a new cause and
    /// common address. The test flag is kept.
    pub fn reply(&self, cause: Cause, common_addr: CommonAddr) -> Asdu<'p> {
        let mut reply = self.clone();
        reply.identifier.cause =
            CauseOfTransmission::new(cause).with_test(self.identifier.cause.test);
        reply.identifier.common_addr = common_addr;
        reply
    }
}

impl PartialEq for Asdu<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.identifier == other.identifier
            && self.info_obj() == other.info_obj()
    }
}

impl Eq for Asdu<'_> {}

impl std::fmt::Debug for Asdu<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Asdu")
            .field("params", self.params)
            .field("identifier", &self.identifier)
            .field("info_obj", &self.info_obj())
            .finish()
    }
}
