//! DUP / QoS / RETAIN flag nibble
//!
//! The low nibble of the first fixed header byte. MQTT 3.1 named these bits
//! DUP, QoS 1, QoS 0, RETAIN for every packet; 3.1.1 keeps the names only for
//! PUBLISH, but the mandated PUBREL/SUBSCRIBE/UNSUBSCRIBE value `0010` reads the
//! same way (QoS 1, nothing else set).

use crate::error::Result;
use crate::protocol::qos::QoS;

const DUP_BIT: u8 = 0b1000;
const QOS_MASK: u8 = 0b0110;
const RETAIN_BIT: u8 = 0b0001;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HeaderFlags {
    pub dup: bool,
    pub qos: QoS,
    pub retain: bool,
}

impl HeaderFlags {
    pub const fn new(dup: bool, qos: QoS, retain: bool) -> Self {
        HeaderFlags { dup, qos, retain }
    }

    pub const fn to_nibble(self) -> u8 {
        let dup = if self.dup { 1u8 } else { 0u8 };
        let retain = if self.retain { 1u8 } else { 0u8 };
        (dup << 3) | ((self.qos as u8) << 1) | retain
    }

    /// Splits a nibble into its three fields. Bits above the nibble are ignored.
    pub fn from_nibble(nibble: u8) -> Result<Self> {
        let qos = QoS::from_u8((nibble & QOS_MASK) >> 1)?;
        Ok(HeaderFlags {
            dup: (nibble & DUP_BIT) != 0,
            qos,
            retain: (nibble & RETAIN_BIT) != 0,
        })
    }
}

impl From<HeaderFlags> for u8 {
    fn from(flags: HeaderFlags) -> Self {
        flags.to_nibble()
    }
}

impl TryFrom<u8> for HeaderFlags {
    type Error = crate::error::Error;

    fn try_from(nibble: u8) -> Result<Self> {
        HeaderFlags::from_nibble(nibble)
    }
}
