//! Information object walking.
//!
//! Splits the information object bytes of an ASDU into (address, element)
//! pairs using the VSQ and the element size of the type identification.
//! Element contents are returned as raw bytes.

use std::fmt;

use crate::error::{AsduError, Result};
use crate::types::{Asdu, InfoObjAddr};

/// One information object of an ASDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InformationObject<'a> {
    /// Information object address
    pub address: InfoObjAddr,
    /// Element bytes, time tag included
    pub element: &'a [u8],
}

/// Iterator over the information objects of an ASDU.
///
/// Yields at most as many objects as the VSQ announces. A payload that ends
/// early yields one `EndOfBuffer` error and then stops.
///
/// # Example
///
/// ```rust
/// use voltage_asdu::{Asdu, Params};
///
/// let params = Params::narrow();
/// // M_SP_NA_1, 2 objects, sequence, spontaneous, station 7
/// let asdu = Asdu::decode(&params, &[1, 0x82, 3, 7, 10, 0x01, 0x00])?;
///
/// let addresses: Vec<u32> = asdu
///     .info_objects()
///     .map(|obj| obj.map(|obj| obj.address))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(addresses, [10, 11]);
/// # Ok::<(), voltage_asdu::AsduError>(())
/// ```
pub struct InfoObjects<'a, 'p> {
    asdu: &'a Asdu<'p>,
    element_size: usize,
    offset: usize,
    index: usize,
    next_addr: InfoObjAddr,
    done: bool,
}

impl<'a, 'p> InfoObjects<'a, 'p> {
    fn new(asdu: &'a Asdu<'p>) -> Self {
        Self {
            asdu,
            element_size: asdu.identifier.type_id.element_size(),
            offset: 0,
            index: 0,
            next_addr: 0,
            done: false,
        }
    }

    fn read(&mut self) -> Result<InformationObject<'a>> {
        let asdu = self.asdu;
        let data = asdu.info_obj();
        let sequence = asdu.identifier.variable.sequence;

        let address = if sequence && self.index > 0 {
            self.next_addr
        } else {
            let rest = data.get(self.offset..).unwrap_or_default();
            let address = asdu.parse_info_obj_addr(rest)?;
            self.offset += usize::from(asdu.params().info_obj_addr_size);
            address
        };

        let end = self.offset + self.element_size;
        let element = data
            .get(self.offset..end)
            .ok_or(AsduError::end_of_buffer(end, data.len()))?;
        self.offset = end;
        self.next_addr = address.wrapping_add(1);

        Ok(InformationObject { address, element })
    }
}

impl<'a> Iterator for InfoObjects<'a, '_> {
    type Item = Result<InformationObject<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.index >= usize::from(self.asdu.identifier.variable.count) {
            return None;
        }
        let item = self.read();
        self.index += 1;
        self.done = item.is_err();
        Some(item)
    }
}

impl<'p> Asdu<'p> {
    /// Iterate over the information objects.
    pub fn info_objects(&self) -> InfoObjects<'_, 'p> {
        InfoObjects::new(self)
    }
}

impl fmt::Display for Asdu<'_> {
    /// Identifier followed by `address:0x<element>` for each object.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        if self.identifier.variable.sequence {
            f.write_str(" seq")?;
        }
        for obj in self.info_objects() {
            let Ok(obj) = obj else {
                return f.write_str(" <EOF>");
            };
            write!(f, " {}", obj.address)?;
            if !obj.element.is_empty() {
                f.write_str(":0x")?;
                for byte in obj.element {
                    write!(f, "{:02x}", byte)?;
                }
            }
        }
        Ok(())
    }
}
