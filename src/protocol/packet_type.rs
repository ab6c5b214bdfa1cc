/// MQTT control packet type, the high nibble of the first fixed header byte
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub enum PacketType {
    /// Reserved
    /// Direction: Forbidden
    #[default]
    Reserved = 0,

    /// Client request to connect to Server
    /// Direction: Client to Server
    Connect = 1,

    /// Connect acknowledgment
    /// Direction: Server to Client
    ConnAck = 2,

    /// Publish message
    /// Direction: Client to Server or Server to Client
    Publish = 3,

    /// Publish acknowledgment
    /// Direction: Client to Server or Server to Client
    PubAck = 4,

    /// Publish received (assured delivery part 1)
    /// Direction: Client to Server or Server to Client
    PubRec = 5,

    /// Publish release (assured delivery part 2)
    /// Direction: Client to Server or Server to Client
    PubRel = 6,

    /// Publish complete (assured delivery part 3)
    /// Direction: Client to Server or Server to Client
    PubComp = 7,

    /// Client subscribe request
    /// Direction: Client to Server
    Subscribe = 8,

    /// Subscribe acknowledgment
    /// Direction: Server to Client
    SubAck = 9,

    /// Client unsubscribe request
    /// Direction: Client to Server
    Unsubscribe = 10,

    /// Unsubscribe acknowledgment
    /// Direction: Server to Client
    UnsubAck = 11,

    /// Ping request
    /// Direction: Client to Server
    PingReq = 12,

    /// Ping response
    /// Direction: Server to Client
    PingResp = 13,

    /// Client disconnect request
    /// Direction: Client to Server
    Disconnect = 14,

    /// Reserved
    /// Direction: Forbidden
    Reserved2 = 15,
}

impl PacketType {
    /// Packet type from the high nibble of a fixed header byte
    pub const fn from_header_byte(byte: u8) -> Self {
        match byte >> 4 {
            1 => PacketType::Connect,
            2 => PacketType::ConnAck,
            3 => PacketType::Publish,
            4 => PacketType::PubAck,
            5 => PacketType::PubRec,
            6 => PacketType::PubRel,
            7 => PacketType::PubComp,
            8 => PacketType::Subscribe,
            9 => PacketType::SubAck,
            10 => PacketType::Unsubscribe,
            11 => PacketType::UnsubAck,
            12 => PacketType::PingReq,
            13 => PacketType::PingResp,
            14 => PacketType::Disconnect,
            15 => PacketType::Reserved2,
            _ => PacketType::Reserved,
        }
    }

    pub const fn is_reserved(self) -> bool {
        matches!(self, PacketType::Reserved | PacketType::Reserved2)
    }

    /// Fixed header flags mandated for every packet type except PUBLISH.
    ///
    /// PUBREL, SUBSCRIBE and UNSUBSCRIBE read as DUP=0, QoS=1, RETAIN=0 in the
    /// PUBLISH flag layout. PUBLISH carries dynamic flags and returns `None`.
    pub const fn reserved_flags(self) -> Option<u8> {
        match self {
            PacketType::Publish => None,
            PacketType::PubRel | PacketType::Subscribe | PacketType::Unsubscribe => Some(0b0010),
            _ => Some(0b0000),
        }
    }

    /// True for packet types whose variable header is a Packet Identifier and
    /// nothing else
    pub const fn has_packet_id_only(self) -> bool {
        matches!(
            self,
            PacketType::PubAck
                | PacketType::PubRec
                | PacketType::PubRel
                | PacketType::PubComp
                | PacketType::Subscribe
                | PacketType::SubAck
                | PacketType::Unsubscribe
                | PacketType::UnsubAck
        )
    }

    /// True for the identifier-only packet types that carry a payload after
    /// the Packet Identifier. The rest have a remaining length of exactly 2.
    pub const fn has_payload(self) -> bool {
        matches!(
            self,
            PacketType::Subscribe | PacketType::SubAck | PacketType::Unsubscribe
        )
    }
}

impl core::fmt::Display for PacketType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            PacketType::Reserved | PacketType::Reserved2 => "RESERVED",
            PacketType::Connect => "CONNECT",
            PacketType::ConnAck => "CONNACK",
            PacketType::Publish => "PUBLISH",
            PacketType::PubAck => "PUBACK",
            PacketType::PubRec => "PUBREC",
            PacketType::PubRel => "PUBREL",
            PacketType::PubComp => "PUBCOMP",
            PacketType::Subscribe => "SUBSCRIBE",
            PacketType::SubAck => "SUBACK",
            PacketType::Unsubscribe => "UNSUBSCRIBE",
            PacketType::UnsubAck => "UNSUBACK",
            PacketType::PingReq => "PINGREQ",
            PacketType::PingResp => "PINGRESP",
            PacketType::Disconnect => "DISCONNECT",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PacketType {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8}", *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_byte_ignores_flags() {
        assert_eq!(PacketType::from_header_byte(0x30), PacketType::Publish);
        assert_eq!(PacketType::from_header_byte(0x3F), PacketType::Publish);
        assert_eq!(PacketType::from_header_byte(0x62), PacketType::PubRel);
        assert_eq!(PacketType::from_header_byte(0x0F), PacketType::Reserved);
        assert_eq!(PacketType::from_header_byte(0xF0), PacketType::Reserved2);
    }

    #[test]
    fn test_reserved_flags_table() {
        assert_eq!(PacketType::Publish.reserved_flags(), None);
        assert_eq!(PacketType::PubRel.reserved_flags(), Some(0b0010));
        assert_eq!(PacketType::Subscribe.reserved_flags(), Some(0b0010));
        assert_eq!(PacketType::Unsubscribe.reserved_flags(), Some(0b0010));
        assert_eq!(PacketType::PubAck.reserved_flags(), Some(0b0000));
        assert_eq!(PacketType::Disconnect.reserved_flags(), Some(0b0000));
    }

    #[test]
    fn test_packet_id_only_types() {
        assert!(PacketType::PubRel.has_packet_id_only());
        assert!(PacketType::UnsubAck.has_packet_id_only());
        assert!(!PacketType::Publish.has_packet_id_only());
        assert!(!PacketType::Connect.has_packet_id_only());
        assert!(!PacketType::PingReq.has_packet_id_only());
    }

    #[test]
    fn test_payload_types() {
        assert!(PacketType::Subscribe.has_payload());
        assert!(PacketType::SubAck.has_payload());
        assert!(PacketType::Unsubscribe.has_payload());
        assert!(!PacketType::PubAck.has_payload());
        assert!(!PacketType::PubRel.has_payload());
        assert!(!PacketType::UnsubAck.has_payload());
    }
}
