//! # voltage_asdu
//!
//! IEC 60870-5-101/104 ASDU codec for Rust.
//!
//! This crate converts between Application Service Data Units and their wire
//! bytes. The widths of the cause of transmission, the common address and
//! the information object address are negotiated per link and captured in
//! [`Params`]; IEC 104 uses the widest layout, IEC 101 links may use any.
//!
//! Link framing (FT1.2, APCI), sessions and sequence numbers are left to the
//! transport layer. Information elements are handled as opaque bytes whose
//! size is known from the type identification.
//!
//! ## Quick Start
//!
//! ```rust
//! use voltage_asdu::{Asdu, Cause, Params, TypeId};
//!
//! let params = Params::wide();
//!
//! // Build a single command for object 3000 at station 1
//! let mut asdu = Asdu::new(
//!     &params,
//!     params.identifier(TypeId::SingleCommand, Cause::Activation, 1),
//! );
//! asdu.append_info_obj_addr(3000)?;
//! asdu.append_u8(0x01)?;
//! asdu.inc_variable_number(1)?;
//! let frame = asdu.encode()?.to_vec();
//!
//! // ... and read it back
//! let received = Asdu::decode(&params, &frame)?;
//! assert_eq!(received, asdu);
//! # Ok::<(), voltage_asdu::AsduError>(())
//! ```
//!
//! ## ASDU Structure
//!
//! ```text
//! +---------+-----+---------------------+----------------+---------------------+
//! | Type ID | VSQ | COT [+ originator]  | Common address | Information objects |
//! |    1    |  1  |       1 or 2        |     1 or 2     |      variable       |
//! +---------+-----+---------------------+----------------+---------------------+
//! ```
//!
//! The information objects are either one address followed by `count`
//! elements (SQ=1) or `count` address/element pairs (SQ=0).

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod error;
pub mod params;
pub mod parser;
pub mod types;

// Re-export main types
pub use codec::info_obj_size;
pub use error::{AsduError, ErrorKind, Result};
pub use params::Params;
pub use parser::{InfoObjects, InformationObject};
pub use types::*;
