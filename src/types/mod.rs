//! IEC 60870-5 ASDU type definitions.
//!
//! This module contains the value types of the ASDU codec:
//!
//! - `TypeId` - Type identification and element sizes
//! - `Cause`, `CauseOfTransmission` - Cause of transmission
//! - `Vsq`, `Identifier` - Data unit identifier
//! - `Cp56Time2a` - Seven-byte time tag
//! - `Asdu` - Application Service Data Unit

mod asdu;
mod cot;
mod identifier;
mod time;
mod type_id;

pub use asdu::*;
pub use cot::*;
pub use identifier::*;
pub use time::*;
pub use type_id::*;
