//! IEC 60870-5 Type Identification.
//!
//! Type identification defines the structure of the information objects in
//! an ASDU. The codec only needs one thing from it: the fixed size of one
//! information element, which determines the payload length.

use crate::error::{AsduError, Result};

/// IEC 60870-5-101/104 Type Identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeId {
    // ============================================
    // Process information in monitoring direction
    // ============================================
    /// Single-point information (M_SP_NA_1)
    SinglePoint = 1,

    /// Single-point information with time tag (M_SP_TA_1)
    SinglePointTime24 = 2,

    /// Double-point information (M_DP_NA_1)
    DoublePoint = 3,

    /// Double-point information with time tag (M_DP_TA_1)
    DoublePointTime24 = 4,

    /// Step position information (M_ST_NA_1)
    StepPosition = 5,

    /// Step position information with time tag (M_ST_TA_1)
    StepPositionTime24 = 6,

    /// Bitstring of 32 bit (M_BO_NA_1)
    Bitstring32 = 7,

    /// Bitstring of 32 bit with time tag (M_BO_TA_1)
    Bitstring32Time24 = 8,

    /// Measured value, normalized (M_ME_NA_1)
    MeasuredNormalized = 9,

    /// Measured value, normalized with time tag (M_ME_TA_1)
    MeasuredNormalizedTime24 = 10,

    /// Measured value, scaled (M_ME_NB_1)
    MeasuredScaled = 11,

    /// Measured value, scaled with time tag (M_ME_TB_1)
    MeasuredScaledTime24 = 12,

    /// Measured value, short floating point (M_ME_NC_1)
    MeasuredFloat = 13,

    /// Measured value, short floating point with time tag (M_ME_TC_1)
    MeasuredFloatTime24 = 14,

    /// Integrated totals (M_IT_NA_1)
    IntegratedTotals = 15,

    /// Integrated totals with time tag (M_IT_TA_1)
    IntegratedTotalsTime24 = 16,

    /// Event of protection equipment with time tag (M_EP_TA_1)
    ProtectionEventTime24 = 17,

    /// Packed start events of protection equipment with time tag (M_EP_TB_1)
    PackedStartEventsTime24 = 18,

    /// Packed output circuit information with time tag (M_EP_TC_1)
    PackedOutputCircuitTime24 = 19,

    /// Packed single-point information with status change detection (M_PS_NA_1)
    PackedSinglePoint = 20,

    /// Measured value, normalized without quality descriptor (M_ME_ND_1)
    MeasuredNormalizedNoQuality = 21,

    /// Single-point information with time tag CP56Time2a (M_SP_TB_1)
    SinglePointTime56 = 30,

    /// Double-point information with time tag CP56Time2a (M_DP_TB_1)
    DoublePointTime56 = 31,

    /// Step position information with time tag CP56Time2a (M_ST_TB_1)
    StepPositionTime56 = 32,

    /// Bitstring of 32 bit with time tag CP56Time2a (M_BO_TB_1)
    Bitstring32Time56 = 33,

    /// Measured value, normalized with time tag CP56Time2a (M_ME_TD_1)
    MeasuredNormalizedTime56 = 34,

    /// Measured value, scaled with time tag CP56Time2a (M_ME_TE_1)
    MeasuredScaledTime56 = 35,

    /// Measured value, short floating point with time tag CP56Time2a (M_ME_TF_1)
    MeasuredFloatTime56 = 36,

    /// Integrated totals with time tag CP56Time2a (M_IT_TB_1)
    IntegratedTotalsTime56 = 37,

    /// Event of protection equipment with time tag CP56Time2a (M_EP_TD_1)
    ProtectionEventTime56 = 38,

    /// Packed start events of protection equipment with time tag CP56Time2a (M_EP_TE_1)
    PackedStartEventsTime56 = 39,

    /// Packed output circuit information with time tag CP56Time2a (M_EP_TF_1)
    PackedOutputCircuitTime56 = 40,

    // ============================================
    // Process information in control direction
    // ============================================
    /// Single command (C_SC_NA_1)
    SingleCommand = 45,

    /// Double command (C_DC_NA_1)
    DoubleCommand = 46,

    /// Regulating step command (C_RC_NA_1)
    RegulatingStep = 47,

    /// Set-point command, normalized (C_SE_NA_1)
    SetpointNormalized = 48,

    /// Set-point command, scaled (C_SE_NB_1)
    SetpointScaled = 49,

    /// Set-point command, short floating point (C_SE_NC_1)
    SetpointFloat = 50,

    /// Bitstring of 32 bit command (C_BO_NA_1)
    Bitstring32Command = 51,

    /// Single command with time tag CP56Time2a (C_SC_TA_1)
    SingleCommandTime56 = 58,

    /// Double command with time tag CP56Time2a (C_DC_TA_1)
    DoubleCommandTime56 = 59,

    /// Regulating step command with time tag CP56Time2a (C_RC_TA_1)
    RegulatingStepTime56 = 60,

    /// Set-point command, normalized with time tag CP56Time2a (C_SE_TA_1)
    SetpointNormalizedTime56 = 61,

    /// Set-point command, scaled with time tag CP56Time2a (C_SE_TB_1)
    SetpointScaledTime56 = 62,

    /// Set-point command, short floating point with time tag CP56Time2a (C_SE_TC_1)
    SetpointFloatTime56 = 63,

    /// Bitstring of 32 bit command with time tag CP56Time2a (C_BO_TA_1)
    Bitstring32CommandTime56 = 64,

    // ============================================
    // System information in monitoring direction
    // ============================================
    /// End of initialization (M_EI_NA_1)
    EndOfInit = 70,

    // ============================================
    // System information in control direction
    // ============================================
    /// Interrogation command (C_IC_NA_1)
    InterrogationCommand = 100,

    /// Counter interrogation command (C_CI_NA_1)
    CounterInterrogation = 101,

    /// Read command (C_RD_NA_1)
    ReadCommand = 102,

    /// Clock synchronization command (C_CS_NA_1)
    ClockSync = 103,

    /// Test command (C_TS_NA_1)
    TestCommand = 104,

    /// Reset process command (C_RP_NA_1)
    ResetProcess = 105,

    /// Delay acquisition command (C_CD_NA_1)
    DelayAcquisition = 106,

    /// Test command with time tag CP56Time2a (C_TS_TA_1)
    TestCommandTime56 = 107,

    // ============================================
    // Parameter in control direction
    // ============================================
    /// Parameter of measured value, normalized (P_ME_NA_1)
    ParameterNormalized = 110,

    /// Parameter of measured value, scaled (P_ME_NB_1)
    ParameterScaled = 111,

    /// Parameter of measured value, short floating point (P_ME_NC_1)
    ParameterFloat = 112,

    /// Parameter activation (P_AC_NA_1)
    ParameterActivation = 113,
}

impl TypeId {
    /// Create TypeId from raw byte value.
    #[inline]
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Self::SinglePoint),
            2 => Ok(Self::SinglePointTime24),
            3 => Ok(Self::DoublePoint),
            4 => Ok(Self::DoublePointTime24),
            5 => Ok(Self::StepPosition),
            6 => Ok(Self::StepPositionTime24),
            7 => Ok(Self::Bitstring32),
            8 => Ok(Self::Bitstring32Time24),
            9 => Ok(Self::MeasuredNormalized),
            10 => Ok(Self::MeasuredNormalizedTime24),
            11 => Ok(Self::MeasuredScaled),
            12 => Ok(Self::MeasuredScaledTime24),
            13 => Ok(Self::MeasuredFloat),
            14 => Ok(Self::MeasuredFloatTime24),
            15 => Ok(Self::IntegratedTotals),
            16 => Ok(Self::IntegratedTotalsTime24),
            17 => Ok(Self::ProtectionEventTime24),
            18 => Ok(Self::PackedStartEventsTime24),
            19 => Ok(Self::PackedOutputCircuitTime24),
            20 => Ok(Self::PackedSinglePoint),
            21 => Ok(Self::MeasuredNormalizedNoQuality),
            30 => Ok(Self::SinglePointTime56),
            31 => Ok(Self::DoublePointTime56),
            32 => Ok(Self::StepPositionTime56),
            33 => Ok(Self::Bitstring32Time56),
            34 => Ok(Self::MeasuredNormalizedTime56),
            35 => Ok(Self::MeasuredScaledTime56),
            36 => Ok(Self::MeasuredFloatTime56),
            37 => Ok(Self::IntegratedTotalsTime56),
            38 => Ok(Self::ProtectionEventTime56),
            39 => Ok(Self::PackedStartEventsTime56),
            40 => Ok(Self::PackedOutputCircuitTime56),
            45 => Ok(Self::SingleCommand),
            46 => Ok(Self::DoubleCommand),
            47 => Ok(Self::RegulatingStep),
            48 => Ok(Self::SetpointNormalized),
            49 => Ok(Self::SetpointScaled),
            50 => Ok(Self::SetpointFloat),
            51 => Ok(Self::Bitstring32Command),
            58 => Ok(Self::SingleCommandTime56),
            59 => Ok(Self::DoubleCommandTime56),
            60 => Ok(Self::RegulatingStepTime56),
            61 => Ok(Self::SetpointNormalizedTime56),
            62 => Ok(Self::SetpointScaledTime56),
            63 => Ok(Self::SetpointFloatTime56),
            64 => Ok(Self::Bitstring32CommandTime56),
            70 => Ok(Self::EndOfInit),
            100 => Ok(Self::InterrogationCommand),
            101 => Ok(Self::CounterInterrogation),
            102 => Ok(Self::ReadCommand),
            103 => Ok(Self::ClockSync),
            104 => Ok(Self::TestCommand),
            105 => Ok(Self::ResetProcess),
            106 => Ok(Self::DelayAcquisition),
            107 => Ok(Self::TestCommandTime56),
            110 => Ok(Self::ParameterNormalized),
            111 => Ok(Self::ParameterScaled),
            112 => Ok(Self::ParameterFloat),
            113 => Ok(Self::ParameterActivation),
            _ => Err(AsduError::UnknownTypeId(value)),
        }
    }

    /// Convert to raw byte value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Size in bytes of one information element, without its address.
    ///
    /// Time tags are included: 3 bytes for CP24Time2a, 7 for CP56Time2a.
    pub const fn element_size(&self) -> usize {
        match self {
            Self::SinglePoint | Self::DoublePoint => 1,
            Self::SinglePointTime24 | Self::DoublePointTime24 => 4,
            Self::StepPosition => 2,
            Self::StepPositionTime24 => 5,
            Self::Bitstring32 => 5,
            Self::Bitstring32Time24 => 8,
            Self::MeasuredNormalized | Self::MeasuredScaled => 3,
            Self::MeasuredNormalizedTime24 | Self::MeasuredScaledTime24 => 6,
            Self::MeasuredFloat => 5,
            Self::MeasuredFloatTime24 => 8,
            Self::IntegratedTotals => 5,
            Self::IntegratedTotalsTime24 => 8,
            Self::ProtectionEventTime24 => 6,
            Self::PackedStartEventsTime24 | Self::PackedOutputCircuitTime24 => 7,
            Self::PackedSinglePoint => 5,
            Self::MeasuredNormalizedNoQuality => 2,
            Self::SinglePointTime56 | Self::DoublePointTime56 => 8,
            Self::StepPositionTime56 => 9,
            Self::Bitstring32Time56 => 12,
            Self::MeasuredNormalizedTime56 | Self::MeasuredScaledTime56 => 10,
            Self::MeasuredFloatTime56 => 12,
            Self::IntegratedTotalsTime56 => 12,
            Self::ProtectionEventTime56 => 10,
            Self::PackedStartEventsTime56 | Self::PackedOutputCircuitTime56 => 11,
            Self::SingleCommand | Self::DoubleCommand | Self::RegulatingStep => 1,
            Self::SetpointNormalized | Self::SetpointScaled => 3,
            Self::SetpointFloat => 5,
            Self::Bitstring32Command => 4,
            Self::SingleCommandTime56
            | Self::DoubleCommandTime56
            | Self::RegulatingStepTime56 => 8,
            Self::SetpointNormalizedTime56 | Self::SetpointScaledTime56 => 10,
            Self::SetpointFloatTime56 => 12,
            Self::Bitstring32CommandTime56 => 11,
            Self::EndOfInit => 1,
            Self::InterrogationCommand | Self::CounterInterrogation => 1,
            // C_RD_NA_1 carries the address only
            Self::ReadCommand => 0,
            Self::ClockSync => 7,
            Self::TestCommand => 2,
            Self::ResetProcess => 1,
            Self::DelayAcquisition => 2,
            Self::TestCommandTime56 => 9,
            Self::ParameterNormalized | Self::ParameterScaled => 3,
            Self::ParameterFloat => 5,
            Self::ParameterActivation => 1,
        }
    }

    /// Check if this type is in the monitoring direction (from RTU to master).
    #[inline]
    pub const fn is_monitoring(&self) -> bool {
        matches!(self.as_u8(), 1..=44 | 70)
    }

    /// Check if this type is in the control direction (from master to RTU).
    #[inline]
    pub const fn is_control(&self) -> bool {
        matches!(self.as_u8(), 45..=69 | 100..=109)
    }

    /// Check if this type is a parameter in control direction.
    #[inline]
    pub const fn is_parameter(&self) -> bool {
        matches!(self.as_u8(), 110..=119)
    }

    /// Check if this type contains a time tag.
    #[inline]
    pub const fn has_time_tag(&self) -> bool {
        matches!(self.as_u8(), 2 | 4 | 6 | 8 | 10 | 12 | 14 | 16..=19 | 30..=40 | 58..=64 | 107)
    }

    /// Get the IEC standard name (e.g., "M_SP_NA_1").
    #[inline]
    pub const fn standard_name(&self) -> &'static str {
        match self {
            Self::SinglePoint => "M_SP_NA_1",
            Self::SinglePointTime24 => "M_SP_TA_1",
            Self::DoublePoint => "M_DP_NA_1",
            Self::DoublePointTime24 => "M_DP_TA_1",
            Self::StepPosition => "M_ST_NA_1",
            Self::StepPositionTime24 => "M_ST_TA_1",
            Self::Bitstring32 => "M_BO_NA_1",
            Self::Bitstring32Time24 => "M_BO_TA_1",
            Self::MeasuredNormalized => "M_ME_NA_1",
            Self::MeasuredNormalizedTime24 => "M_ME_TA_1",
            Self::MeasuredScaled => "M_ME_NB_1",
            Self::MeasuredScaledTime24 => "M_ME_TB_1",
            Self::MeasuredFloat => "M_ME_NC_1",
            Self::MeasuredFloatTime24 => "M_ME_TC_1",
            Self::IntegratedTotals => "M_IT_NA_1",
            Self::IntegratedTotalsTime24 => "M_IT_TA_1",
            Self::ProtectionEventTime24 => "M_EP_TA_1",
            Self::PackedStartEventsTime24 => "M_EP_TB_1",
            Self::PackedOutputCircuitTime24 => "M_EP_TC_1",
            Self::PackedSinglePoint => "M_PS_NA_1",
            Self::MeasuredNormalizedNoQuality => "M_ME_ND_1",
            Self::SinglePointTime56 => "M_SP_TB_1",
            Self::DoublePointTime56 => "M_DP_TB_1",
            Self::StepPositionTime56 => "M_ST_TB_1",
            Self::Bitstring32Time56 => "M_BO_TB_1",
            Self::MeasuredNormalizedTime56 => "M_ME_TD_1",
            Self::MeasuredScaledTime56 => "M_ME_TE_1",
            Self::MeasuredFloatTime56 => "M_ME_TF_1",
            Self::IntegratedTotalsTime56 => "M_IT_TB_1",
            Self::ProtectionEventTime56 => "M_EP_TD_1",
            Self::PackedStartEventsTime56 => "M_EP_TE_1",
            Self::PackedOutputCircuitTime56 => "M_EP_TF_1",
            Self::SingleCommand => "C_SC_NA_1",
            Self::DoubleCommand => "C_DC_NA_1",
            Self::RegulatingStep => "C_RC_NA_1",
            Self::SetpointNormalized => "C_SE_NA_1",
            Self::SetpointScaled => "C_SE_NB_1",
            Self::SetpointFloat => "C_SE_NC_1",
            Self::Bitstring32Command => "C_BO_NA_1",
            Self::SingleCommandTime56 => "C_SC_TA_1",
            Self::DoubleCommandTime56 => "C_DC_TA_1",
            Self::RegulatingStepTime56 => "C_RC_TA_1",
            Self::SetpointNormalizedTime56 => "C_SE_TA_1",
            Self::SetpointScaledTime56 => "C_SE_TB_1",
            Self::SetpointFloatTime56 => "C_SE_TC_1",
            Self::Bitstring32CommandTime56 => "C_BO_TA_1",
            Self::EndOfInit => "M_EI_NA_1",
            Self::InterrogationCommand => "C_IC_NA_1",
            Self::CounterInterrogation => "C_CI_NA_1",
            Self::ReadCommand => "C_RD_NA_1",
            Self::ClockSync => "C_CS_NA_1",
            Self::TestCommand => "C_TS_NA_1",
            Self::ResetProcess => "C_RP_NA_1",
            Self::DelayAcquisition => "C_CD_NA_1",
            Self::TestCommandTime56 => "C_TS_TA_1",
            Self::ParameterNormalized => "P_ME_NA_1",
            Self::ParameterScaled => "P_ME_NB_1",
            Self::ParameterFloat => "P_ME_NC_1",
            Self::ParameterActivation => "P_AC_NA_1",
        }
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.standard_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_VALUES: [u8; 59] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 30, 31, 32,
        33, 34, 35, 36, 37, 38, 39, 40, 45, 46, 47, 48, 49, 50, 51, 58, 59, 60, 61, 62, 63, 64,
        70, 100, 101, 102, 103, 104, 105, 106, 107, 110, 111, 112, 113,
    ];

    #[test]
    fn test_type_id_from_u8() {
        assert_eq!(TypeId::from_u8(1).unwrap(), TypeId::SinglePoint);
        assert_eq!(TypeId::from_u8(13).unwrap(), TypeId::MeasuredFloat);
        assert_eq!(TypeId::from_u8(100).unwrap(), TypeId::InterrogationCommand);
        assert_eq!(TypeId::from_u8(113).unwrap(), TypeId::ParameterActivation);
    }

    #[test]
    fn test_type_id_all_values_roundtrip() {
        for val in VALID_VALUES {
            let type_id = TypeId::from_u8(val).unwrap();
            assert_eq!(type_id.as_u8(), val, "Roundtrip failed for value {}", val);
        }
    }

    #[test]
    fn test_type_id_invalid_values() {
        for val in [0u8, 22, 29, 41, 44, 52, 57, 65, 69, 71, 99, 108, 109, 114, 120, 255] {
            assert_eq!(
                TypeId::from_u8(val),
                Err(AsduError::UnknownTypeId(val)),
                "Expected error for type ID {}",
                val
            );
        }
    }

    #[test]
    fn test_element_size() {
        assert_eq!(TypeId::SinglePoint.element_size(), 1);
        assert_eq!(TypeId::MeasuredNormalized.element_size(), 3);
        assert_eq!(TypeId::MeasuredFloat.element_size(), 5);
        assert_eq!(TypeId::MeasuredFloatTime24.element_size(), 8);
        assert_eq!(TypeId::MeasuredFloatTime56.element_size(), 12);
        assert_eq!(TypeId::ReadCommand.element_size(), 0);
        assert_eq!(TypeId::ClockSync.element_size(), 7);
        assert_eq!(TypeId::TestCommandTime56.element_size(), 9);
        assert_eq!(TypeId::Bitstring32Command.element_size(), 4);
    }

    #[test]
    fn test_time56_types_carry_seven_byte_tag() {
        let pairs = [
            (TypeId::SinglePoint, TypeId::SinglePointTime56),
            (TypeId::DoublePoint, TypeId::DoublePointTime56),
            (TypeId::MeasuredNormalized, TypeId::MeasuredNormalizedTime56),
            (TypeId::MeasuredScaled, TypeId::MeasuredScaledTime56),
            (TypeId::MeasuredFloat, TypeId::MeasuredFloatTime56),
            (TypeId::SingleCommand, TypeId::SingleCommandTime56),
            (TypeId::SetpointFloat, TypeId::SetpointFloatTime56),
        ];
        for (plain, tagged) in pairs {
            assert_eq!(tagged.element_size(), plain.element_size() + 7, "{}", tagged);
            assert!(tagged.has_time_tag());
            assert!(!plain.has_time_tag());
        }
    }

    #[test]
    fn test_type_id_direction() {
        assert!(TypeId::SinglePoint.is_monitoring());
        assert!(TypeId::EndOfInit.is_monitoring());
        assert!(!TypeId::SingleCommand.is_monitoring());

        assert!(TypeId::SingleCommand.is_control());
        assert!(TypeId::ClockSync.is_control());
        assert!(!TypeId::MeasuredFloat.is_control());

        assert!(TypeId::ParameterFloat.is_parameter());
        assert!(!TypeId::ParameterFloat.is_control());
    }

    #[test]
    fn test_type_id_standard_name() {
        assert_eq!(TypeId::SinglePoint.standard_name(), "M_SP_NA_1");
        assert_eq!(TypeId::MeasuredFloatTime56.standard_name(), "M_ME_TF_1");
        assert_eq!(TypeId::DelayAcquisition.standard_name(), "C_CD_NA_1");
        assert_eq!(TypeId::ParameterActivation.to_string(), "P_AC_NA_1");
    }
}
