//! ASDU encoding and decoding.
//!
//! The transport layer (FT1.2 for IEC 101, APCI for IEC 104) hands over the
//! bytes of exactly one ASDU and takes the encoded bytes back; framing is
//! not handled here.

use bytes::{BufMut, BytesMut};

use crate::error::{AsduError, Result};
use crate::params::Params;
use crate::types::{
    Asdu, Cause, CauseOfTransmission, Identifier, TypeId, Vsq, GLOBAL_COMMON_ADDR,
    INVALID_COMMON_ADDR,
};

/// Number of information object bytes announced by a VSQ.
///
/// With SQ=1 a single address is followed by `count` elements; with SQ=0
/// every element carries its own address.
pub fn info_obj_size(params: &Params, variable: Vsq, element_size: usize) -> Result<usize> {
    let addr_size = match params.info_obj_addr_size {
        size @ 1..=3 => usize::from(size),
        _ => {
            return Err(AsduError::invalid_param(
                "information object address size must be 1, 2 or 3",
            ))
        }
    };
    let count = usize::from(variable.count);
    // the count field is 7 bits wide
    if count > 127 {
        return Err(AsduError::InfoObjIndexFit(count));
    }

    let size = if variable.sequence {
        addr_size + count * element_size
    } else {
        count * (addr_size + element_size)
    };
    if size == 0 {
        return Err(AsduError::ZeroLength);
    }
    if count == 0 {
        return Err(AsduError::InfoObjIndexFit(0));
    }
    Ok(size)
}

impl<'p> Asdu<'p> {
    /// Encode the ASDU.
    ///
    /// The header is written in front of the information objects already in
    /// the buffer and the whole frame is returned without copying. Nothing
    /// is written unless every check passes.
    pub fn encode(&mut self) -> Result<&[u8]> {
        self.check_encodable()?;

        let params = self.params();
        let id = self.identifier;
        let raw = self.raw_mut();

        raw[0] = id.type_id.as_u8();
        raw[1] = id.variable.as_u8();
        raw[2] = id.cause.value();
        let mut offset = 3;
        if params.cause_size == 2 {
            raw[offset] = id.orig_addr;
            offset += 1;
        }
        if params.common_addr_size == 1 {
            raw[offset] = if id.common_addr == GLOBAL_COMMON_ADDR {
                0xFF
            } else {
                id.common_addr as u8
            };
        } else {
            raw[offset..offset + 2].copy_from_slice(&id.common_addr.to_le_bytes());
        }

        Ok(&*raw)
    }

    /// Encode the ASDU onto the end of `buf`.
    pub fn encode_to(&mut self, buf: &mut BytesMut) -> Result<()> {
        let raw = self.encode()?;
        buf.put_slice(raw);
        Ok(())
    }

    /// Length of the encoded ASDU.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        self.params().identifier_size() + self.info_obj_len()
    }

    fn check_encodable(&self) -> Result<()> {
        let params = self.params();
        let id = &self.identifier;

        if id.cause.cause == Cause::Unused {
            return Err(AsduError::CauseZero);
        }
        if !matches!(params.cause_size, 1 | 2) {
            return Err(AsduError::invalid_param("cause size must be 1 or 2"));
        }
        if params.cause_size == 1 && id.orig_addr != 0 {
            return Err(AsduError::OriginAddrFit(id.orig_addr));
        }
        if id.common_addr == INVALID_COMMON_ADDR {
            return Err(AsduError::CommonAddrZero);
        }
        if !matches!(params.common_addr_size, 1 | 2) {
            return Err(AsduError::invalid_param(
                "common address size must be 1 or 2",
            ));
        }
        // 255 is the 1-byte spelling of the global address
        if params.common_addr_size == 1
            && id.common_addr != GLOBAL_COMMON_ADDR
            && id.common_addr >= 0xFF
        {
            return Err(AsduError::CommonAddrFit {
                addr: id.common_addr,
                size: 1,
            });
        }

        let expected = info_obj_size(params, id.variable, id.type_id.element_size())?;
        if expected != self.info_obj_len() {
            return Err(AsduError::LengthMismatch {
                expected,
                actual: self.info_obj_len(),
            });
        }
        Ok(())
    }

    /// Decode one ASDU received on the link described by `params`.
    ///
    /// Bytes beyond the information objects announced by the VSQ are
    /// discarded rather than rejected; the standard does not prohibit them.
    pub fn decode(params: &'p Params, data: &[u8]) -> Result<Self> {
        Self::decode_frame(params, data).map_err(|err| {
            #[cfg(feature = "tracing-support")]
            tracing::debug!(%err, len = data.len(), "rejected inbound ASDU");
            err
        })
    }

    fn decode_frame(params: &'p Params, data: &[u8]) -> Result<Self> {
        let header_len = params.identifier_size();
        if data.len() < header_len {
            return Err(AsduError::end_of_buffer(header_len, data.len()));
        }
        let available = data.len() - header_len;

        let type_id = TypeId::from_u8(data[0])?;
        let variable = Vsq::from_u8(data[1]);

        let size = info_obj_size(params, variable, type_id.element_size())?;
        if size > available {
            return Err(AsduError::end_of_buffer(size, available));
        }
        if size < available {
            #[cfg(feature = "tracing-support")]
            tracing::trace!(
                expected = size,
                available,
                "discarding trailing bytes after information objects"
            );
        }

        let cause = CauseOfTransmission::from_u8(data[2]);

        let orig_addr = match params.cause_size {
            1 => 0,
            2 => data[3],
            _ => return Err(AsduError::invalid_param("cause size must be 1 or 2")),
        };

        let common_addr = match params.common_addr_size {
            1 => match data[header_len - 1] {
                0xFF => GLOBAL_COMMON_ADDR,
                addr => u16::from(addr),
            },
            2 => u16::from_le_bytes([data[header_len - 2], data[header_len - 1]]),
            _ => {
                return Err(AsduError::invalid_param(
                    "common address size must be 1 or 2",
                ))
            }
        };

        let mut asdu = Asdu::new(
            params,
            Identifier {
                type_id,
                variable,
                cause,
                orig_addr,
                common_addr,
            },
        );
        asdu.info_obj_mut(size)?
            .copy_from_slice(&data[header_len..header_len + size]);

        Ok(asdu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ASDU_SIZE_MAX;
    use crate::ErrorKind;

    fn build<'p>(params: &'p Params, id: Identifier, info: &[u8]) -> Asdu<'p> {
        let mut asdu = Asdu::new(params, id);
        asdu.append_bytes(info).unwrap();
        asdu
    }

    fn single_point(common_addr: u16) -> Identifier {
        Identifier::new(TypeId::SinglePoint, Cause::Spontaneous, common_addr)
            .with_variable(Vsq::new(1, false))
    }

    #[test]
    fn test_encode_wide_layout() {
        let params = Params::wide();
        let id = Identifier::new(
            TypeId::MeasuredFloat,
            CauseOfTransmission::new(Cause::Spontaneous).with_test(true),
            0x1234,
        )
        .with_variable(Vsq::new(2, true))
        .with_orig_addr(9);

        let mut asdu = Asdu::new(&params, id);
        asdu.append_info_obj_addr(0x010203).unwrap();
        asdu.append_bytes(&[0, 0, 0x80, 0x3F, 0x00]).unwrap();
        asdu.append_bytes(&[0, 0, 0x00, 0x40, 0x00]).unwrap();

        assert_eq!(asdu.encoded_len(), 6 + 3 + 10);
        let bytes = asdu.encode().unwrap().to_vec();
        assert_eq!(&bytes[..6], &[13, 0x82, 0x83, 9, 0x34, 0x12]);
        assert_eq!(&bytes[6..9], &[0x03, 0x02, 0x01]);
        assert_eq!(bytes.len(), 19);
    }

    #[test]
    fn test_encode_narrow_layout() {
        let params = Params::narrow();
        let mut asdu = build(&params, single_point(7), &[5, 0x01]);
        assert_eq!(asdu.encode().unwrap(), &[1, 1, 3, 7, 5, 0x01]);
    }

    #[test]
    fn test_encode_to_bytes_mut() {
        let params = Params::narrow();
        let mut asdu = build(&params, single_point(7), &[5, 0x01]);
        let mut buf = BytesMut::from(&[0x68u8][..]);
        asdu.encode_to(&mut buf).unwrap();
        assert_eq!(&buf[..], &[0x68, 1, 1, 3, 7, 5, 0x01]);
    }

    #[test]
    fn test_encode_validation_order() {
        let params = Params::narrow();

        let mut id = single_point(0).with_orig_addr(1);
        id.cause = CauseOfTransmission::new(Cause::Unused);
        let mut asdu = build(&params, id, &[5, 1]);
        assert_eq!(asdu.encode(), Err(AsduError::CauseZero));

        asdu.identifier.cause = Cause::Spontaneous.into();
        assert_eq!(asdu.encode(), Err(AsduError::OriginAddrFit(1)));

        asdu.identifier.orig_addr = 0;
        assert_eq!(asdu.encode(), Err(AsduError::CommonAddrZero));

        asdu.identifier.common_addr = 255;
        assert_eq!(
            asdu.encode(),
            Err(AsduError::CommonAddrFit { addr: 255, size: 1 })
        );

        asdu.identifier.common_addr = 254;
        assert!(asdu.encode().is_ok());
    }

    #[test]
    fn test_encode_rejects_bad_widths() {
        let params = Params::narrow().cause_size(3);
        let mut asdu = build(&params, single_point(1), &[5, 1]);
        assert!(asdu.encode().unwrap_err().is_config_error());

        let params = Params::narrow().common_addr_size(0);
        let mut asdu = build(&params, single_point(1), &[5, 1]);
        assert!(asdu.encode().unwrap_err().is_config_error());
    }

    #[test]
    fn test_encode_common_addr_zero_any_width() {
        for params in [Params::narrow(), Params::wide()] {
            let mut asdu = Asdu::new(&params, single_point(0));
            asdu.append_info_obj_addr(1).unwrap();
            asdu.append_u8(0).unwrap();
            assert_eq!(asdu.encode(), Err(AsduError::CommonAddrZero));
        }
    }

    #[test]
    fn test_encode_payload_must_match_vsq() {
        let params = Params::narrow();

        let mut asdu = build(&params, single_point(1), &[5]);
        assert_eq!(
            asdu.encode(),
            Err(AsduError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );

        let mut asdu = build(
            &params,
            single_point(1).with_variable(Vsq::new(0, true)),
            &[5],
        );
        assert_eq!(asdu.encode(), Err(AsduError::InfoObjIndexFit(0)));
    }

    #[test]
    fn test_global_address_one_byte() {
        let params = Params::narrow();
        let mut asdu = build(&params, single_point(GLOBAL_COMMON_ADDR), &[5, 1]);
        let bytes = asdu.encode().unwrap().to_vec();
        assert_eq!(bytes[3], 0xFF);

        let decoded = Asdu::decode(&params, &bytes).unwrap();
        assert_eq!(decoded.identifier.common_addr, GLOBAL_COMMON_ADDR);
        assert_ne!(decoded.identifier.common_addr, 255);
    }

    #[test]
    fn test_global_address_two_bytes() {
        let params = Params::wide();
        let mut asdu = Asdu::new(&params, single_point(GLOBAL_COMMON_ADDR));
        asdu.append_info_obj_addr(1).unwrap();
        asdu.append_u8(0).unwrap();
        let bytes = asdu.encode().unwrap().to_vec();
        assert_eq!(&bytes[4..6], &[0xFF, 0xFF]);

        // 255 has no special meaning in two bytes
        let mut raw = bytes.clone();
        raw[4..6].copy_from_slice(&[0xFF, 0x00]);
        let decoded = Asdu::decode(&params, &raw).unwrap();
        assert_eq!(decoded.identifier.common_addr, 255);
    }

    #[test]
    fn test_roundtrip_all_layouts() {
        for cause_size in 1..=2 {
            for ca_size in 1..=2 {
                for ioa_size in 1..=3u8 {
                    let params = Params::narrow()
                        .cause_size(cause_size)
                        .common_addr_size(ca_size)
                        .info_obj_addr_size(ioa_size);
                    let orig_addr = if cause_size == 2 { 17 } else { 0 };
                    let id = Identifier::new(
                        TypeId::MeasuredScaled,
                        CauseOfTransmission::new(Cause::InterrogatedByStation)
                            .with_negative(true),
                        200,
                    )
                    .with_orig_addr(orig_addr);

                    let mut asdu = Asdu::new(&params, id);
                    for (i, addr) in [10u32, 20, 30].into_iter().enumerate() {
                        asdu.append_info_obj_addr(addr).unwrap();
                        asdu.append_bytes(&[i as u8, 0x01, 0x00]).unwrap();
                        asdu.inc_variable_number(1).unwrap();
                    }

                    let bytes = asdu.encode().unwrap().to_vec();
                    assert_eq!(bytes.len(), asdu.encoded_len());
                    let decoded = Asdu::decode(&params, &bytes).unwrap();
                    assert_eq!(decoded, asdu, "{:?}", params);
                }
            }
        }
    }

    #[test]
    fn test_roundtrip_sequence() {
        let params = Params::wide();
        let id = Identifier::new(TypeId::SinglePoint, Cause::Periodic, 3)
            .with_variable(Vsq::new(0, true));
        let mut asdu = Asdu::new(&params, id);
        asdu.append_info_obj_addr(4000).unwrap();
        for value in [0u8, 1, 0, 1] {
            asdu.append_u8(value).unwrap();
            asdu.inc_variable_number(1).unwrap();
        }

        let bytes = asdu.encode().unwrap().to_vec();
        assert_eq!(bytes[1], 0x84);
        assert_eq!(Asdu::decode(&params, &bytes).unwrap(), asdu);
    }

    #[test]
    fn test_info_obj_size_formula() {
        let params = Params::wide().info_obj_addr_size(2);
        assert_eq!(info_obj_size(&params, Vsq::new(3, true), 4), Ok(14));
        assert_eq!(info_obj_size(&params, Vsq::new(3, false), 4), Ok(18));
        assert_eq!(info_obj_size(&params, Vsq::new(127, false), 0), Ok(254));
        assert_eq!(
            info_obj_size(&params, Vsq::new(0, false), 4),
            Err(AsduError::ZeroLength)
        );
        assert_eq!(
            info_obj_size(&params, Vsq::new(0, true), 4),
            Err(AsduError::InfoObjIndexFit(0))
        );
        assert!(info_obj_size(&params.info_obj_addr_size(0), Vsq::new(1, true), 4)
            .unwrap_err()
            .is_config_error());
    }

    #[test]
    fn test_decode_sequence_lengths() {
        // C_BO_NA_1: 4-byte elements, 2-byte addresses
        let params = Params::wide().info_obj_addr_size(2);
        let header = [51u8, 0x83, 6, 0, 1, 0];

        let mut frame = header.to_vec();
        frame.extend_from_slice(&[0u8; 13]);
        let err = Asdu::decode(&params, &frame).unwrap_err();
        assert_eq!(err, AsduError::end_of_buffer(14, 13));
        assert!(err.is_size_error());

        frame.push(0);
        let asdu = Asdu::decode(&params, &frame).unwrap();
        assert_eq!(asdu.info_obj_len(), 14);
        assert_eq!(asdu.identifier.variable, Vsq::new(3, true));

        let mut discrete = header.to_vec();
        discrete[1] = 0x03;
        discrete.extend_from_slice(&[0u8; 17]);
        assert!(Asdu::decode(&params, &discrete).unwrap_err().is_size_error());
        discrete.push(0);
        assert_eq!(Asdu::decode(&params, &discrete).unwrap().info_obj_len(), 18);
    }

    #[test]
    fn test_decode_truncates_trailing_bytes() {
        // Over-long frames are accepted and cut to the announced length.
        // Whether to reject them instead is undecided, so pin the behavior.
        let params = Params::narrow();
        let frame = [1u8, 1, 3, 7, 5, 0x01, 0xEE, 0xEE];
        let asdu = Asdu::decode(&params, &frame).unwrap();
        assert_eq!(asdu.info_obj(), &[5, 0x01]);
        assert_eq!(asdu.encoded_len(), 6);
    }

    #[test]
    fn test_decode_short_header() {
        for params in [Params::narrow(), Params::wide()] {
            let size = params.identifier_size();
            for len in 0..size {
                let data = vec![1u8; len];
                assert_eq!(
                    Asdu::decode(&params, &data),
                    Err(AsduError::end_of_buffer(size, len))
                );
            }
        }
    }

    #[test]
    fn test_decode_unknown_type() {
        let params = Params::narrow();
        let err = Asdu::decode(&params, &[0, 1, 3, 7, 5, 1]).unwrap_err();
        assert_eq!(err, AsduError::UnknownTypeId(0));
        assert_eq!(err.kind(), ErrorKind::UnknownType);
    }

    #[test]
    fn test_decode_zero_count() {
        let params = Params::narrow();
        assert_eq!(
            Asdu::decode(&params, &[1, 0x00, 3, 7, 5, 1]),
            Err(AsduError::ZeroLength)
        );
        assert_eq!(
            Asdu::decode(&params, &[1, 0x80, 3, 7, 5, 1]),
            Err(AsduError::InfoObjIndexFit(0))
        );
    }

    #[test]
    fn test_decode_cause_and_origin() {
        let params = Params::wide();
        let frame = [45u8, 1, 0xC7, 12, 1, 0, 0x10, 0x00, 0x00, 0x01];
        let asdu = Asdu::decode(&params, &frame).unwrap();
        let cause = asdu.identifier.cause;
        assert_eq!(cause.cause, Cause::ActivationConfirm);
        assert!(cause.test);
        assert!(cause.negative);
        assert_eq!(asdu.identifier.orig_addr, 12);
        assert_eq!(asdu.identifier.common_addr, 1);
    }

    #[test]
    fn test_roundtrip_unnamed_causes() {
        let params = Params::narrow();
        for code in [14u8, 48, 63] {
            let frame = [1u8, 1, code | 0x80, 7, 5, 1];
            let mut asdu = Asdu::decode(&params, &frame).unwrap();
            assert_eq!(asdu.identifier.cause.cause, Cause::Other(code));
            assert!(asdu.identifier.cause.test);
            assert_eq!(asdu.encode().unwrap(), &frame);
        }
    }

    #[test]
    fn test_encode_rejects_count_above_127() {
        let params = Params::narrow();

        // C_RD_NA_1 elements are empty, so 128 addresses match the length
        let id = Identifier::new(TypeId::ReadCommand, Cause::Request, 1)
            .with_variable(Vsq::new(128, false));
        let mut asdu = build(&params, id, &[1u8; 128]);
        assert_eq!(asdu.encode(), Err(AsduError::InfoObjIndexFit(128)));

        let id = Identifier::new(TypeId::ReadCommand, Cause::Request, 1)
            .with_variable(Vsq::new(200, true));
        let mut asdu = build(&params, id, &[1u8]);
        let err = asdu.encode().unwrap_err();
        assert_eq!(err, AsduError::InfoObjIndexFit(200));
        assert!(err.is_size_error());

        assert_eq!(
            info_obj_size(&params, Vsq::new(127, false), 0),
            Ok(127)
        );
    }

    #[test]
    fn test_decode_rejects_bad_widths() {
        let frame = [1u8, 1, 3, 7, 7, 7, 7, 7, 7, 7];
        for params in [
            Params::narrow().cause_size(3),
            Params::narrow().common_addr_size(3),
            Params::narrow().info_obj_addr_size(0),
        ] {
            let err = Asdu::decode(&params, &frame).unwrap_err();
            assert!(err.is_config_error(), "{:?}", params);
        }
    }

    #[test]
    fn test_decode_payload_overflow() {
        // 127 x M_ME_TF_1 with 3-byte addresses cannot fit 249 bytes
        let params = Params::wide();
        let mut frame = vec![36u8, 127, 3, 0, 1, 0];
        frame.resize(6 + 127 * 15, 0);
        assert_eq!(
            Asdu::decode(&params, &frame),
            Err(AsduError::PayloadOverflow {
                needed: 6 + 127 * 15,
                capacity: ASDU_SIZE_MAX
            })
        );
    }
}
