//! Error types for picopub
//!
//! no_std compatible error handling with optional defmt support

/// Which structural rule a header broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// A non-zero Packet Identifier was supplied while QoS is 0
    PacketIdWithQos0,
    /// DUP flag set on a QoS 0 PUBLISH
    DupWithQos0,
}

impl core::fmt::Display for Violation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Violation::PacketIdWithQos0 => {
                write!(f, "Packet Identifier MUST NOT be set if QoS is 0")
            }
            Violation::DupWithQos0 => write!(f, "DUP MUST be 0 if QoS is 0"),
        }
    }
}

/// Errors raised while building or decoding packet headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// QoS value outside {0, 1, 2}
    InvalidProtocolValue { qos: u8 },
    /// Structural protocol rule broken
    ProtocolViolation { violation: Violation },
    /// QoS > 0 but no Packet Identifier was supplied
    MissingPacketIdentifier,
    /// Packet Identifier is zero where a non-zero one is required
    InvalidPacketIdentifier,
    /// Buffer too small for packet
    BufferTooSmall,
    /// Incomplete packet (not enough data)
    IncompletePacket,
    /// Invalid variable length integer encoding
    InvalidLengthEncoding,
    /// Invalid UTF-8 in string field
    InvalidUtf8,
    /// Invalid or unexpected packet type
    InvalidPacketType { packet_type: u8 },
    /// Invalid fixed header flags for a packet type
    InvalidFixedHeaderFlags { expected: u8, actual: u8 },
    /// Packet length does not match the remaining length
    InvalidPacketLength { expected: usize, actual: usize },
    /// String longer than a 16-bit length prefix can describe
    StringTooLong { length: usize },
    /// Topic name length exceeded maximum allowed length
    TopicNameLengthExceeded {
        max_length: usize,
        actual_length: usize,
    },
    /// Payload size exceeded maximum allowed size
    PayloadTooLarge { max_size: usize, actual_size: usize },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidProtocolValue { qos } => write!(f, "Invalid QoS level: {}", qos),
            Error::ProtocolViolation { violation } => {
                write!(f, "Protocol violation: {}", violation)
            }
            Error::MissingPacketIdentifier => {
                write!(f, "Packet Identifier MUST be set if QoS is not 0")
            }
            Error::InvalidPacketIdentifier => write!(f, "Packet Identifier MUST be non-zero"),
            Error::BufferTooSmall => write!(f, "Buffer too small for packet"),
            Error::IncompletePacket => write!(f, "Incomplete packet (not enough data)"),
            Error::InvalidLengthEncoding => write!(f, "Invalid variable length integer encoding"),
            Error::InvalidUtf8 => write!(f, "Invalid UTF-8 in string field"),
            Error::InvalidPacketType { packet_type } => {
                write!(f, "Invalid packet type: {}", packet_type)
            }
            Error::InvalidFixedHeaderFlags { expected, actual } => {
                write!(
                    f,
                    "Invalid fixed header flags: expected {:04b}, actual {:04b}",
                    expected, actual
                )
            }
            Error::InvalidPacketLength { expected, actual } => {
                write!(
                    f,
                    "Invalid packet length: expected {}, got {}",
                    expected, actual
                )
            }
            Error::StringTooLong { length } => {
                write!(f, "String too long for length prefix: {} bytes", length)
            }
            Error::TopicNameLengthExceeded {
                max_length,
                actual_length,
            } => {
                write!(
                    f,
                    "Topic name length exceeded: max {}, actual {}",
                    max_length, actual_length
                )
            }
            Error::PayloadTooLarge {
                max_size,
                actual_size,
            } => {
                write!(
                    f,
                    "Payload too large: max {} bytes, actual {} bytes",
                    max_size, actual_size
                )
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Violation {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Violation::PacketIdWithQos0 => defmt::write!(f, "Packet Identifier set with QoS 0"),
            Violation::DupWithQos0 => defmt::write!(f, "DUP set with QoS 0"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::InvalidProtocolValue { qos } => defmt::write!(f, "Invalid QoS level: {}", qos),
            Error::ProtocolViolation { violation } => {
                defmt::write!(f, "Protocol violation: {}", violation)
            }
            Error::MissingPacketIdentifier => defmt::write!(f, "Missing Packet Identifier"),
            Error::InvalidPacketIdentifier => defmt::write!(f, "Invalid Packet Identifier"),
            Error::BufferTooSmall => defmt::write!(f, "Buffer too small"),
            Error::IncompletePacket => defmt::write!(f, "Incomplete packet"),
            Error::InvalidLengthEncoding => defmt::write!(f, "Invalid length encoding"),
            Error::InvalidUtf8 => defmt::write!(f, "Invalid UTF-8"),
            Error::InvalidPacketType { packet_type } => {
                defmt::write!(f, "Invalid packet type: {}", packet_type)
            }
            Error::InvalidFixedHeaderFlags { expected, actual } => {
                defmt::write!(
                    f,
                    "Invalid fixed header flags: expected {=u8:b}, actual {=u8:b}",
                    *expected,
                    *actual
                )
            }
            Error::InvalidPacketLength { expected, actual } => {
                defmt::write!(f, "Invalid packet length: expected {}, got {}", expected, actual)
            }
            Error::StringTooLong { length } => defmt::write!(f, "String too long: {}", length),
            Error::TopicNameLengthExceeded {
                max_length,
                actual_length,
            } => defmt::write!(
                f,
                "Topic name length exceeded: max {}, actual {}",
                max_length,
                actual_length
            ),
            Error::PayloadTooLarge {
                max_size,
                actual_size,
            } => defmt::write!(f, "Payload too large: max {}, actual {}", max_size, actual_size),
        }
    }
}

impl core::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    fn render(error: Error) -> heapless::String<96> {
        let mut out = heapless::String::new();
        write!(out, "{}", error).unwrap();
        out
    }

    #[test]
    fn test_display_protocol_violation() {
        let text = render(Error::ProtocolViolation {
            violation: Violation::DupWithQos0,
        });
        assert_eq!(text.as_str(), "Protocol violation: DUP MUST be 0 if QoS is 0");
    }

    #[test]
    fn test_display_fixed_header_flags_binary() {
        let text = render(Error::InvalidFixedHeaderFlags {
            expected: 0b0010,
            actual: 0b0000,
        });
        assert_eq!(
            text.as_str(),
            "Invalid fixed header flags: expected 0010, actual 0000"
        );
    }
}
