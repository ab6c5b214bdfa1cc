//! Fixed header assembly shared by every packet codec
//!
//! A packet type implements [`HeaderCodec`] by describing its variable header;
//! the default methods prepend the first byte (type + flags) and the remaining
//! length, and on the way in bound the variable header parse to the remaining
//! length window.

use crate::error::{Error, Result};
use crate::protocol::packet_type::PacketType;
use crate::protocol::utils::{
    read_variable_length, variable_length_length, write_variable_length, MAX_REMAINING_LENGTH,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedHeader {
    pub packet_type: PacketType,
    /// Low nibble of the first byte
    pub flags: u8,
    pub remaining_length: usize,
}

impl FixedHeader {
    pub const fn new(packet_type: PacketType, flags: u8, remaining_length: usize) -> Self {
        FixedHeader {
            packet_type,
            flags: flags & 0x0F,
            remaining_length,
        }
    }

    pub const fn first_byte(&self) -> u8 {
        (self.packet_type as u8) << 4 | (self.flags & 0x0F)
    }

    /// Bytes taken by the fixed header itself
    pub const fn encoded_len(&self) -> usize {
        1 + variable_length_length(self.remaining_length)
    }

    /// Fixed header plus everything the remaining length covers
    pub const fn packet_len(&self) -> usize {
        self.encoded_len() + self.remaining_length
    }

    pub fn encode(&self, buffer: &mut [u8], offset: &mut usize) -> Result<()> {
        if self.remaining_length > MAX_REMAINING_LENGTH {
            return Err(Error::InvalidLengthEncoding);
        }
        if *offset + self.encoded_len() > buffer.len() {
            return Err(Error::BufferTooSmall);
        }
        buffer[*offset] = self.first_byte();
        let len_bytes = write_variable_length(self.remaining_length, &mut buffer[*offset + 1..])?;
        *offset += 1 + len_bytes;
        Ok(())
    }

    /// Parses the first byte and remaining length. Returns the header and the
    /// number of bytes it occupied.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.is_empty() {
            return Err(Error::IncompletePacket);
        }
        let header_byte = bytes[0];
        let packet_type = PacketType::from_header_byte(header_byte);
        if packet_type.is_reserved() {
            return Err(Error::InvalidPacketType {
                packet_type: header_byte >> 4,
            });
        }
        let (remaining_length, len_bytes) = read_variable_length(&bytes[1..])?;
        Ok((
            FixedHeader::new(packet_type, header_byte & 0x0F, remaining_length),
            1 + len_bytes,
        ))
    }

    /// Rejects flags that differ from the value mandated for the packet type.
    /// PUBLISH flags are dynamic and always pass.
    pub fn validate_reserved_flags(&self) -> Result<()> {
        match self.packet_type.reserved_flags() {
            Some(expected) if expected != self.flags => Err(Error::InvalidFixedHeaderFlags {
                expected,
                actual: self.flags,
            }),
            _ => Ok(()),
        }
    }
}

/// Build and decode capability shared by the packet header codecs
pub trait HeaderCodec<'a>: Sized {
    fn packet_type(&self) -> PacketType;

    /// Low nibble of the first fixed header byte
    fn flags(&self) -> u8;

    fn variable_header_len(&self) -> usize;

    fn encode_variable_header(&self, buffer: &mut [u8], offset: &mut usize) -> Result<()>;

    /// Parses the variable header from `bytes`, starting and finishing at
    /// `offset`. `bytes` ends where the remaining length ends.
    fn decode_variable_header(
        fixed: &FixedHeader,
        bytes: &'a [u8],
        offset: &mut usize,
    ) -> Result<Self>;

    /// Checks everything that could stop the packet from encoding, other than
    /// buffer space. Runs before any byte is written.
    fn validate(&self, _payload: &[u8]) -> Result<()> {
        Ok(())
    }

    fn fixed_header(&self, payload_len: usize) -> FixedHeader {
        FixedHeader::new(
            self.packet_type(),
            self.flags(),
            self.variable_header_len() + payload_len,
        )
    }

    /// Encodes fixed and variable header. Returns the number of bytes written.
    fn encode(&self, buffer: &mut [u8]) -> Result<usize> {
        self.encode_with_payload(&[], buffer)
    }

    /// Encodes the whole packet with `payload` appended after the variable
    /// header. Nothing is written unless the packet fits in `buffer`.
    fn encode_with_payload(&self, payload: &[u8], buffer: &mut [u8]) -> Result<usize> {
        self.validate(payload)?;
        let fixed = self.fixed_header(payload.len());
        if fixed.remaining_length > MAX_REMAINING_LENGTH {
            return Err(Error::InvalidLengthEncoding);
        }
        if fixed.packet_len() > buffer.len() {
            return Err(Error::BufferTooSmall);
        }

        let mut offset = 0;
        fixed.encode(buffer, &mut offset)?;
        let variable_start = offset;
        self.encode_variable_header(buffer, &mut offset)?;
        let written = offset - variable_start;
        if written != self.variable_header_len() {
            return Err(Error::InvalidPacketLength {
                expected: self.variable_header_len(),
                actual: written,
            });
        }

        buffer[offset..offset + payload.len()].copy_from_slice(payload);
        offset += payload.len();
        Ok(offset)
    }

    /// Decodes one packet from the front of `bytes`. Returns the header and
    /// whatever follows the variable header inside the remaining length.
    fn decode(bytes: &'a [u8]) -> Result<(Self, &'a [u8])> {
        let (fixed, header_len) = FixedHeader::decode(bytes)?;
        let end = header_len + fixed.remaining_length;
        if bytes.len() < end {
            return Err(Error::IncompletePacket);
        }
        let window = &bytes[header_len..end];
        let mut offset = 0;
        let header = Self::decode_variable_header(&fixed, window, &mut offset)?;
        Ok((header, &window[offset..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_byte_masks_flags() {
        let fixed = FixedHeader::new(PacketType::Publish, 0xFB, 0);
        assert_eq!(fixed.flags, 0x0B);
        assert_eq!(fixed.first_byte(), 0x3B);
    }

    #[test]
    fn test_encode_multi_byte_length() {
        let fixed = FixedHeader::new(PacketType::Publish, 0b0010, 321);
        let mut buffer = [0u8; 4];
        let mut offset = 0;
        fixed.encode(&mut buffer, &mut offset).unwrap();
        assert_eq!(&buffer[..offset], &[0x32, 0xC1, 0x02]);
        assert_eq!(offset, fixed.encoded_len());
        assert_eq!(fixed.packet_len(), 3 + 321);
    }

    #[test]
    fn test_encode_buffer_too_small_writes_nothing() {
        let fixed = FixedHeader::new(PacketType::Publish, 0, 200);
        let mut buffer = [0xAAu8; 2];
        let mut offset = 0;
        assert_eq!(fixed.encode(&mut buffer, &mut offset), Err(Error::BufferTooSmall));
        assert_eq!(buffer, [0xAA, 0xAA]);
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_decode() {
        let (fixed, len) = FixedHeader::decode(&[0x62, 0x02, 0x00, 0x01]).unwrap();
        assert_eq!(fixed.packet_type, PacketType::PubRel);
        assert_eq!(fixed.flags, 0b0010);
        assert_eq!(fixed.remaining_length, 2);
        assert_eq!(len, 2);
    }

    #[test]
    fn test_decode_rejects_reserved_types() {
        assert_eq!(
            FixedHeader::decode(&[0x00, 0x00]),
            Err(Error::InvalidPacketType { packet_type: 0 })
        );
        assert_eq!(
            FixedHeader::decode(&[0xF0, 0x00]),
            Err(Error::InvalidPacketType { packet_type: 15 })
        );
    }

    #[test]
    fn test_decode_truncated() {
        assert_eq!(FixedHeader::decode(&[]), Err(Error::IncompletePacket));
        assert_eq!(FixedHeader::decode(&[0x30]), Err(Error::IncompletePacket));
        assert_eq!(FixedHeader::decode(&[0x30, 0x80]), Err(Error::IncompletePacket));
    }

    #[test]
    fn test_validate_reserved_flags() {
        assert!(FixedHeader::new(PacketType::PubRel, 0b0010, 2)
            .validate_reserved_flags()
            .is_ok());
        assert_eq!(
            FixedHeader::new(PacketType::Subscribe, 0b0000, 2).validate_reserved_flags(),
            Err(Error::InvalidFixedHeaderFlags {
                expected: 0b0010,
                actual: 0b0000
            })
        );
        assert_eq!(
            FixedHeader::new(PacketType::PubAck, 0b0001, 2).validate_reserved_flags(),
            Err(Error::InvalidFixedHeaderFlags {
                expected: 0b0000,
                actual: 0b0001
            })
        );
        assert!(FixedHeader::new(PacketType::Publish, 0b1101, 2)
            .validate_reserved_flags()
            .is_ok());
    }
}
