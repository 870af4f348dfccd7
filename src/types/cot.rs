//! IEC 60870-5 Cause of Transmission (COT).
//!
//! The cause of transmission defines the reason for sending an ASDU. On the
//! wire it is one byte: the cause in bits 0-5, the negative confirmation
//! flag in bit 6 and the test flag in bit 7.

/// Test flag (T) of the cause byte.
pub const TEST_FLAG: u8 = 0x80;

/// Negative confirmation flag (P/N) of the cause byte.
pub const NEGATIVE_FLAG: u8 = 0x40;

/// Cause code, lower 6 bits of the cause byte.
///
/// Codes without a name (reserved 14-19, 42-43 and the private range
/// 48-63) are kept as [`Cause::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cause {
    /// Not used (0). Never transmitted.
    Unused,

    /// Periodic, cyclic (1)
    Periodic,

    /// Background scan (2)
    Background,

    /// Spontaneous (3)
    Spontaneous,

    /// Initialized (4)
    Initialized,

    /// Request or requested (5)
    Request,

    /// Activation (6)
    Activation,

    /// Activation confirmation (7)
    ActivationConfirm,

    /// Deactivation (8)
    Deactivation,

    /// Deactivation confirmation (9)
    DeactivationConfirm,

    /// Activation termination (10)
    ActivationTermination,

    /// Return information caused by a remote command (11)
    ReturnRemoteCommand,

    /// Return information caused by a local command (12)
    ReturnLocalCommand,

    /// File transfer (13)
    FileTransfer,

    /// Interrogated by station interrogation (20)
    InterrogatedByStation,

    /// Interrogated by group 1 interrogation (21)
    InterrogatedByGroup1,

    /// Interrogated by group 2 interrogation (22)
    InterrogatedByGroup2,

    /// Interrogated by group 3 interrogation (23)
    InterrogatedByGroup3,

    /// Interrogated by group 4 interrogation (24)
    InterrogatedByGroup4,

    /// Interrogated by group 5 interrogation (25)
    InterrogatedByGroup5,

    /// Interrogated by group 6 interrogation (26)
    InterrogatedByGroup6,

    /// Interrogated by group 7 interrogation (27)
    InterrogatedByGroup7,

    /// Interrogated by group 8 interrogation (28)
    InterrogatedByGroup8,

    /// Interrogated by group 9 interrogation (29)
    InterrogatedByGroup9,

    /// Interrogated by group 10 interrogation (30)
    InterrogatedByGroup10,

    /// Interrogated by group 11 interrogation (31)
    InterrogatedByGroup11,

    /// Interrogated by group 12 interrogation (32)
    InterrogatedByGroup12,

    /// Interrogated by group 13 interrogation (33)
    InterrogatedByGroup13,

    /// Interrogated by group 14 interrogation (34)
    InterrogatedByGroup14,

    /// Interrogated by group 15 interrogation (35)
    InterrogatedByGroup15,

    /// Interrogated by group 16 interrogation (36)
    InterrogatedByGroup16,

    /// Requested by general counter request (37)
    RequestedByGeneralCounter,

    /// Requested by group 1 counter request (38)
    RequestedByGroup1Counter,

    /// Requested by group 2 counter request (39)
    RequestedByGroup2Counter,

    /// Requested by group 3 counter request (40)
    RequestedByGroup3Counter,

    /// Requested by group 4 counter request (41)
    RequestedByGroup4Counter,

    /// Unknown type identification (44)
    UnknownTypeId,

    /// Unknown cause of transmission (45)
    UnknownCot,

    /// Unknown common address of ASDU (46)
    UnknownCommonAddress,

    /// Unknown information object address (47)
    UnknownIoa,

    /// Reserved or private code without a name
    Other(u8),
}

impl Cause {
    /// Create a cause from the lower 6 bits of a byte.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        let code = value & 0x3F;

        match code {
            0 => Self::Unused,
            1 => Self::Periodic,
            2 => Self::Background,
            3 => Self::Spontaneous,
            4 => Self::Initialized,
            5 => Self::Request,
            6 => Self::Activation,
            7 => Self::ActivationConfirm,
            8 => Self::Deactivation,
            9 => Self::DeactivationConfirm,
            10 => Self::ActivationTermination,
            11 => Self::ReturnRemoteCommand,
            12 => Self::ReturnLocalCommand,
            13 => Self::FileTransfer,
            20 => Self::InterrogatedByStation,
            21 => Self::InterrogatedByGroup1,
            22 => Self::InterrogatedByGroup2,
            23 => Self::InterrogatedByGroup3,
            24 => Self::InterrogatedByGroup4,
            25 => Self::InterrogatedByGroup5,
            26 => Self::InterrogatedByGroup6,
            27 => Self::InterrogatedByGroup7,
            28 => Self::InterrogatedByGroup8,
            29 => Self::InterrogatedByGroup9,
            30 => Self::InterrogatedByGroup10,
            31 => Self::InterrogatedByGroup11,
            32 => Self::InterrogatedByGroup12,
            33 => Self::InterrogatedByGroup13,
            34 => Self::InterrogatedByGroup14,
            35 => Self::InterrogatedByGroup15,
            36 => Self::InterrogatedByGroup16,
            37 => Self::RequestedByGeneralCounter,
            38 => Self::RequestedByGroup1Counter,
            39 => Self::RequestedByGroup2Counter,
            40 => Self::RequestedByGroup3Counter,
            41 => Self::RequestedByGroup4Counter,
            44 => Self::UnknownTypeId,
            45 => Self::UnknownCot,
            46 => Self::UnknownCommonAddress,
            47 => Self::UnknownIoa,
            _ => Self::Other(code),
        }
    }

    /// Convert to raw byte value.
    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Unused => 0,
            Self::Periodic => 1,
            Self::Background => 2,
            Self::Spontaneous => 3,
            Self::Initialized => 4,
            Self::Request => 5,
            Self::Activation => 6,
            Self::ActivationConfirm => 7,
            Self::Deactivation => 8,
            Self::DeactivationConfirm => 9,
            Self::ActivationTermination => 10,
            Self::ReturnRemoteCommand => 11,
            Self::ReturnLocalCommand => 12,
            Self::FileTransfer => 13,
            Self::InterrogatedByStation => 20,
            Self::InterrogatedByGroup1 => 21,
            Self::InterrogatedByGroup2 => 22,
            Self::InterrogatedByGroup3 => 23,
            Self::InterrogatedByGroup4 => 24,
            Self::InterrogatedByGroup5 => 25,
            Self::InterrogatedByGroup6 => 26,
            Self::InterrogatedByGroup7 => 27,
            Self::InterrogatedByGroup8 => 28,
            Self::InterrogatedByGroup9 => 29,
            Self::InterrogatedByGroup10 => 30,
            Self::InterrogatedByGroup11 => 31,
            Self::InterrogatedByGroup12 => 32,
            Self::InterrogatedByGroup13 => 33,
            Self::InterrogatedByGroup14 => 34,
            Self::InterrogatedByGroup15 => 35,
            Self::InterrogatedByGroup16 => 36,
            Self::RequestedByGeneralCounter => 37,
            Self::RequestedByGroup1Counter => 38,
            Self::RequestedByGroup2Counter => 39,
            Self::RequestedByGroup3Counter => 40,
            Self::RequestedByGroup4Counter => 41,
            Self::UnknownTypeId => 44,
            Self::UnknownCot => 45,
            Self::UnknownCommonAddress => 46,
            Self::UnknownIoa => 47,
            Self::Other(code) => code & 0x3F,
        }
    }

    /// Check if this is a positive confirmation.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        matches!(
            self,
            Self::ActivationConfirm | Self::DeactivationConfirm | Self::ActivationTermination
        )
    }

    /// Check if this cause reports an unknown element of the request.
    #[inline]
    pub const fn is_unknown_reply(&self) -> bool {
        matches!(
            self,
            Self::UnknownTypeId | Self::UnknownCot | Self::UnknownCommonAddress | Self::UnknownIoa
        )
    }

    /// Check if this cause indicates an interrogation response.
    #[inline]
    pub const fn is_interrogation_response(&self) -> bool {
        matches!(self.as_u8(), 20..=36)
    }

    /// Check if this cause indicates a counter request response.
    #[inline]
    pub const fn is_counter_response(&self) -> bool {
        matches!(self.as_u8(), 37..=41)
    }
}

impl std::fmt::Display for Cause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(code) => write!(f, "Cause({})", code),
            named => std::fmt::Debug::fmt(named, f),
        }
    }
}

/// Cause of transmission with its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CauseOfTransmission {
    /// Cause code
    pub cause: Cause,
    /// Test flag (T): the ASDU was generated under test conditions
    pub test: bool,
    /// Negative flag (P/N): negative confirmation of an activation
    pub negative: bool,
}

impl CauseOfTransmission {
    /// Create a cause of transmission with both flags cleared.
    #[inline]
    pub const fn new(cause: Cause) -> Self {
        Self {
            cause,
            test: false,
            negative: false,
        }
    }

    /// Set the test flag.
    pub const fn with_test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    /// Set the negative confirmation flag.
    pub const fn with_negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Parse the cause byte.
    #[inline]
    pub const fn from_u8(value: u8) -> Self {
        Self {
            cause: Cause::from_u8(value),
            test: value & TEST_FLAG != 0,
            negative: value & NEGATIVE_FLAG != 0,
        }
    }

    /// Encode to the cause byte.
    #[inline]
    pub const fn value(&self) -> u8 {
        let mut byte = self.cause.as_u8();
        if self.test {
            byte |= TEST_FLAG;
        }
        if self.negative {
            byte |= NEGATIVE_FLAG;
        }
        byte
    }
}

impl From<Cause> for CauseOfTransmission {
    fn from(cause: Cause) -> Self {
        Self::new(cause)
    }
}

impl std::fmt::Display for CauseOfTransmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cause)?;
        if self.negative {
            f.write_str(",neg")?;
        }
        if self.test {
            f.write_str(",test")?;
        }
        Ok(())
    }
}
