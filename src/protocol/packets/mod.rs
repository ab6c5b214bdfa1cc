mod identified;
mod publish;

pub use crate::protocol::packets::identified::PacketIdHeader;
pub use crate::protocol::packets::publish::{PublishHeader, PublishHeaderBuilder};

use crate::error::{Error, Result};
use crate::protocol::header::{FixedHeader, HeaderCodec};
use crate::protocol::packet_type::PacketType;

/// A decoded packet header together with the payload bytes that followed it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet<'a> {
    Publish {
        header: PublishHeader<'a>,
        payload: &'a [u8],
    },
    Identified {
        header: PacketIdHeader,
        payload: &'a [u8],
    },
}

impl<'a> Packet<'a> {
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::Publish { .. } => PacketType::Publish,
            Packet::Identified { header, .. } => header.packet_type(),
        }
    }

    /// Decodes the packet at the front of `bytes`, dispatching on the fixed
    /// header's packet type. Returns the packet and the total bytes it used.
    pub fn decode(bytes: &'a [u8]) -> Result<(Self, usize)> {
        let (fixed, header_len) = FixedHeader::decode(bytes)?;
        let packet_len = header_len + fixed.remaining_length;
        match fixed.packet_type {
            PacketType::Publish => {
                let (header, payload) = PublishHeader::decode(bytes)?;
                Ok((Packet::Publish { header, payload }, packet_len))
            }
            packet_type if packet_type.has_packet_id_only() => {
                let (header, payload) = PacketIdHeader::decode(bytes)?;
                Ok((Packet::Identified { header, payload }, packet_len))
            }
            packet_type => Err(Error::InvalidPacketType {
                packet_type: packet_type as u8,
            }),
        }
    }

    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize> {
        match self {
            Packet::Publish { header, payload } => header.encode_with_payload(payload, buffer),
            Packet::Identified { header, payload } => header.encode_with_payload(payload, buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_dispatch() {
        let bytes = [
            0x32, 0x07, 0x00, 0x01, b't', 0x00, 0x05, b'h', b'i', // PUBLISH
            0x62, 0x02, 0x00, 0x05, // PUBREL
        ];

        let (first, used) = Packet::decode(&bytes).unwrap();
        assert_eq!(used, 9);
        match first {
            Packet::Publish { header, payload } => {
                assert_eq!(header.topic(), "t");
                assert_eq!(payload, b"hi");
            }
            other => panic!("unexpected packet {:?}", other),
        }

        let (second, used2) = Packet::decode(&bytes[used..]).unwrap();
        assert_eq!(used2, 4);
        assert_eq!(second.packet_type(), PacketType::PubRel);

        let mut buffer = [0u8; 16];
        let len = first.encode(&mut buffer).unwrap();
        assert_eq!(&buffer[..len], &bytes[..9]);
    }

    #[test]
    fn test_decode_ack_with_trailing_bytes() {
        assert_eq!(
            Packet::decode(&[0x40, 0x03, 0x00, 0x01, 0xFF]),
            Err(Error::InvalidPacketLength {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_decode_unsupported_type() {
        assert_eq!(
            Packet::decode(&[0xE0, 0x00]),
            Err(Error::InvalidPacketType { packet_type: 14 })
        );
    }
}
