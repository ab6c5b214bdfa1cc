use log::warn;

use crate::error::{Error, Result};
use crate::protocol::header::{FixedHeader, HeaderCodec};
use crate::protocol::packet_id::PacketId;
use crate::protocol::packet_type::PacketType;

/// Variable header made of a Packet Identifier only.
///
/// Covers PUBACK, PUBREC, PUBREL, PUBCOMP and the SUBSCRIBE / UNSUBSCRIBE
/// exchanges. SUBSCRIBE and UNSUBSCRIBE carry their topic filters as payload,
/// which [`HeaderCodec::decode`] hands back untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketIdHeader {
    packet_type: PacketType,
    packet_id: PacketId,
}

impl PacketIdHeader {
    pub fn new(packet_type: PacketType, packet_id: PacketId) -> Result<Self> {
        if !packet_type.has_packet_id_only() {
            return Err(Error::InvalidPacketType {
                packet_type: packet_type as u8,
            });
        }
        Ok(PacketIdHeader {
            packet_type,
            packet_id,
        })
    }

    pub const fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    pub const fn packet_id(&self) -> PacketId {
        self.packet_id
    }
}

impl<'a> HeaderCodec<'a> for PacketIdHeader {
    fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    fn flags(&self) -> u8 {
        self.packet_type.reserved_flags().unwrap_or(0)
    }

    fn variable_header_len(&self) -> usize {
        PacketId::ENCODED_LEN
    }

    fn validate(&self, payload: &[u8]) -> Result<()> {
        if !self.packet_type.has_payload() && !payload.is_empty() {
            return Err(Error::InvalidPacketLength {
                expected: PacketId::ENCODED_LEN,
                actual: PacketId::ENCODED_LEN + payload.len(),
            });
        }
        Ok(())
    }

    fn encode_variable_header(&self, buffer: &mut [u8], offset: &mut usize) -> Result<()> {
        self.packet_id.write(buffer, offset)
    }

    fn decode_variable_header(
        fixed: &FixedHeader,
        bytes: &'a [u8],
        offset: &mut usize,
    ) -> Result<Self> {
        if !fixed.packet_type.has_packet_id_only() {
            return Err(Error::InvalidPacketType {
                packet_type: fixed.packet_type as u8,
            });
        }
        fixed.validate_reserved_flags()?;
        if !fixed.packet_type.has_payload() && fixed.remaining_length != PacketId::ENCODED_LEN {
            warn!(
                "{} rejected: remaining length {}",
                fixed.packet_type, fixed.remaining_length
            );
            return Err(Error::InvalidPacketLength {
                expected: PacketId::ENCODED_LEN,
                actual: fixed.remaining_length,
            });
        }
        let packet_id = PacketId::read(bytes, offset)?;
        Ok(PacketIdHeader {
            packet_type: fixed.packet_type,
            packet_id,
        })
    }
}
