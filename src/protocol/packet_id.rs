use core::num::NonZeroU16;

use crate::error::{Error, Result};

/// Non-zero 16-bit Packet Identifier
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PacketId(NonZeroU16);

impl PacketId {
    /// Size of a packed identifier on the wire
    pub const ENCODED_LEN: usize = 2;

    pub const fn new(id: u16) -> Result<Self> {
        match NonZeroU16::new(id) {
            Some(id) => Ok(PacketId(id)),
            None => Err(Error::InvalidPacketIdentifier),
        }
    }

    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Writes the identifier as two big-endian bytes at `offset`
    pub fn write(self, buffer: &mut [u8], offset: &mut usize) -> Result<()> {
        if *offset + Self::ENCODED_LEN > buffer.len() {
            return Err(Error::BufferTooSmall);
        }
        let pid_bytes = self.get().to_be_bytes();
        buffer[*offset] = pid_bytes[0];
        buffer[*offset + 1] = pid_bytes[1];
        *offset += Self::ENCODED_LEN;
        Ok(())
    }

    /// Reads a big-endian identifier at `offset`. Zero is rejected.
    pub fn read(bytes: &[u8], offset: &mut usize) -> Result<Self> {
        if *offset + Self::ENCODED_LEN > bytes.len() {
            return Err(Error::IncompletePacket);
        }
        let id = Self::new(u16::from_be_bytes([bytes[*offset], bytes[*offset + 1]]))?;
        *offset += Self::ENCODED_LEN;
        Ok(id)
    }
}

impl TryFrom<u16> for PacketId {
    type Error = Error;

    fn try_from(id: u16) -> Result<Self> {
        PacketId::new(id)
    }
}

impl From<PacketId> for u16 {
    fn from(id: PacketId) -> Self {
        id.get()
    }
}

impl core::fmt::Display for PacketId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_invalid() {
        assert_eq!(PacketId::new(0), Err(Error::InvalidPacketIdentifier));
        assert_eq!(PacketId::new(1).map(PacketId::get), Ok(1));
        assert_eq!(PacketId::new(u16::MAX).map(PacketId::get), Ok(65535));
    }

    #[test]
    fn test_write_big_endian() {
        let mut buffer = [0u8; 4];
        let mut offset = 1;
        PacketId::new(0x1234).unwrap().write(&mut buffer, &mut offset).unwrap();
        assert_eq!(buffer, [0x00, 0x12, 0x34, 0x00]);
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_write_buffer_too_small() {
        let mut buffer = [0u8; 3];
        let mut offset = 2;
        let result = PacketId::new(7).unwrap().write(&mut buffer, &mut offset);
        assert_eq!(result, Err(Error::BufferTooSmall));
        assert_eq!(offset, 2);
    }

    #[test]
    fn test_read_advances_cursor() {
        let bytes = [0xFF, 0x00, 0x2A, 0xEE];
        let mut offset = 1;
        assert_eq!(PacketId::read(&bytes, &mut offset).map(PacketId::get), Ok(42));
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_read_rejects_zero_and_short_input() {
        let mut offset = 0;
        assert_eq!(
            PacketId::read(&[0x00, 0x00], &mut offset),
            Err(Error::InvalidPacketIdentifier)
        );
        assert_eq!(offset, 0);
        assert_eq!(PacketId::read(&[0x01], &mut offset), Err(Error::IncompletePacket));
    }
}
