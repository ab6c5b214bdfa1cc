use crate::error::Error;

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum QoS {
    #[default]
    AtMostOnce = 0,
    AtLeastOnce = 1,
    ExactlyOnce = 2,
}

impl QoS {
    pub const fn from_u8(value: u8) -> Result<Self, Error> {
        match value {
            0 => Ok(QoS::AtMostOnce),
            1 => Ok(QoS::AtLeastOnce),
            2 => Ok(QoS::ExactlyOnce),
            _ => Err(Error::InvalidProtocolValue { qos: value }),
        }
    }

    /// QoS 1 and 2 deliveries carry a Packet Identifier
    pub const fn requires_packet_id(self) -> bool {
        !matches!(self, QoS::AtMostOnce)
    }
}

impl TryFrom<u8> for QoS {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        QoS::from_u8(value)
    }
}

impl From<QoS> for u8 {
    fn from(qos: QoS) -> Self {
        qos as u8
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for QoS {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "QoS{=u8}", *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_levels() {
        assert_eq!(QoS::from_u8(0), Ok(QoS::AtMostOnce));
        assert_eq!(QoS::from_u8(1), Ok(QoS::AtLeastOnce));
        assert_eq!(QoS::from_u8(2), Ok(QoS::ExactlyOnce));
    }

    #[test]
    fn test_invalid_levels() {
        for level in 3..=u8::MAX {
            assert_eq!(
                QoS::from_u8(level),
                Err(Error::InvalidProtocolValue { qos: level })
            );
        }
    }

    #[test]
    fn test_requires_packet_id() {
        assert!(!QoS::AtMostOnce.requires_packet_id());
        assert!(QoS::AtLeastOnce.requires_packet_id());
        assert!(QoS::ExactlyOnce.requires_packet_id());
    }
}
