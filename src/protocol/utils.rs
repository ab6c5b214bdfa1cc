use crate::error::{Error, Result};

/// MQTT limits the remaining length to 268,435,455 (0x0FFFFFFF)
pub const MAX_REMAINING_LENGTH: usize = 268_435_455;

/// Longest string a 16-bit length prefix can describe
pub const MAX_STRING_LENGTH: usize = u16::MAX as usize;

pub const fn variable_length_length(value: usize) -> usize {
    if value < 128 {
        1
    } else if value < 16384 {
        2
    } else if value < 2097152 {
        3
    } else {
        4
    }
}

/// Decodes a remaining length from the front of `bytes`. Returns the value and
/// the number of length bytes consumed.
pub fn read_variable_length(bytes: &[u8]) -> Result<(usize, usize)> {
    let mut value = 0usize;
    for (index, &byte) in bytes.iter().take(4).enumerate() {
        value |= usize::from(byte & 0x7F) << (7 * index);
        if byte & 0x80 == 0 {
            return Ok((value, index + 1));
        }
    }

    // a fifth length byte is never legal
    if bytes.len() >= 4 {
        Err(Error::InvalidLengthEncoding)
    } else {
        Err(Error::IncompletePacket)
    }
}

/// Encodes `value` as a remaining length at the front of `buffer`. Nothing is
/// written on failure.
pub fn write_variable_length(value: usize, buffer: &mut [u8]) -> Result<usize> {
    if value > MAX_REMAINING_LENGTH {
        return Err(Error::InvalidLengthEncoding);
    }
    let len = variable_length_length(value);
    if len > buffer.len() {
        return Err(Error::BufferTooSmall);
    }

    let mut rest = value;
    for slot in &mut buffer[..len] {
        *slot = (rest & 0x7F) as u8 | 0x80;
        rest >>= 7;
    }
    // last byte has no continuation bit
    buffer[len - 1] &= 0x7F;
    Ok(len)
}

/// Encoded size of a length-prefixed string
pub const fn string_length(s: &str) -> usize {
    2 + s.len()
}

/// Reads a length-prefixed UTF-8 string and advances `offset` past it.
/// The returned slice borrows from `bytes`.
pub fn read_string<'a>(bytes: &'a [u8], offset: &'_ mut usize) -> Result<&'a str> {
    if *offset + 2 > bytes.len() {
        return Err(Error::IncompletePacket);
    }
    let len = u16::from_be_bytes([bytes[*offset], bytes[*offset + 1]]) as usize;
    let start = *offset + 2;
    if start + len > bytes.len() {
        return Err(Error::IncompletePacket);
    }
    let str_slice = core::str::from_utf8(&bytes[start..start + len]).map_err(|_| Error::InvalidUtf8)?;
    *offset = start + len;
    Ok(str_slice)
}

/// Writes `s` with its 2-byte big-endian length prefix at `offset`
pub fn write_string(s: &str, buffer: &mut [u8], offset: &mut usize) -> Result<()> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    if len > MAX_STRING_LENGTH {
        return Err(Error::StringTooLong { length: len });
    }
    if *offset + 2 + len > buffer.len() {
        return Err(Error::BufferTooSmall);
    }
    let len_bytes = (len as u16).to_be_bytes();
    buffer[*offset] = len_bytes[0];
    buffer[*offset + 1] = len_bytes[1];
    *offset += 2;
    buffer[*offset..*offset + len].copy_from_slice(bytes);
    *offset += len;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_length_boundaries() {
        let cases: [(usize, &[u8]); 8] = [
            (0, &[0x00]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (16_383, &[0xFF, 0x7F]),
            (16_384, &[0x80, 0x80, 0x01]),
            (2_097_151, &[0xFF, 0xFF, 0x7F]),
            (2_097_152, &[0x80, 0x80, 0x80, 0x01]),
            (MAX_REMAINING_LENGTH, &[0xFF, 0xFF, 0xFF, 0x7F]),
        ];
        for (value, encoded) in cases {
            let mut buffer = [0u8; 4];
            let written = write_variable_length(value, &mut buffer).unwrap();
            assert_eq!(&buffer[..written], encoded);
            assert_eq!(written, variable_length_length(value));
            assert_eq!(read_variable_length(encoded), Ok((value, encoded.len())));
        }
    }

    #[test]
    fn test_variable_length_too_large() {
        let mut buffer = [0u8; 4];
        assert_eq!(
            write_variable_length(MAX_REMAINING_LENGTH + 1, &mut buffer),
            Err(Error::InvalidLengthEncoding)
        );
        assert_eq!(
            read_variable_length(&[0xFF, 0xFF, 0xFF, 0xFF, 0x01]),
            Err(Error::InvalidLengthEncoding)
        );
    }

    #[test]
    fn test_variable_length_truncated() {
        assert_eq!(read_variable_length(&[]), Err(Error::IncompletePacket));
        assert_eq!(read_variable_length(&[0x80]), Err(Error::IncompletePacket));
        assert_eq!(
            read_variable_length(&[0xFF, 0xFF, 0xFF]),
            Err(Error::IncompletePacket)
        );
    }

    #[test]
    fn test_variable_length_continuation_on_fourth_byte() {
        assert_eq!(
            read_variable_length(&[0xFF, 0xFF, 0xFF, 0xFF]),
            Err(Error::InvalidLengthEncoding)
        );
        assert_eq!(
            read_variable_length(&[0x80, 0x80, 0x80, 0x80, 0x00]),
            Err(Error::InvalidLengthEncoding)
        );
    }

    #[test]
    fn test_write_variable_length_buffer_too_small_writes_nothing() {
        let mut buffer = [0xAAu8; 2];
        assert_eq!(
            write_variable_length(16_384, &mut buffer),
            Err(Error::BufferTooSmall)
        );
        assert_eq!(buffer, [0xAA, 0xAA]);
    }

    #[test]
    fn test_write_string_prefix() {
        let mut buffer = [0u8; 8];
        let mut offset = 0;
        write_string("a/b", &mut buffer, &mut offset).unwrap();
        assert_eq!(&buffer[..offset], &[0x00, 0x03, b'a', b'/', b'b']);
        assert_eq!(offset, string_length("a/b"));
    }

    #[test]
    fn test_write_string_buffer_too_small() {
        let mut buffer = [0u8; 4];
        let mut offset = 0;
        assert_eq!(
            write_string("abc", &mut buffer, &mut offset),
            Err(Error::BufferTooSmall)
        );
        assert_eq!(offset, 0);
    }

    #[test]
    fn test_read_string_exact_cursor() {
        let bytes = [0x00, 0x01, b'x', 0x00, 0x2A];
        let mut offset = 0;
        assert_eq!(read_string(&bytes, &mut offset), Ok("x"));
        assert_eq!(offset, 3);
    }

    #[test]
    fn test_read_string_errors_leave_cursor() {
        let mut offset = 0;
        assert_eq!(
            read_string(&[0x00, 0x05, b'a'], &mut offset),
            Err(Error::IncompletePacket)
        );
        assert_eq!(
            read_string(&[0x00, 0x01, 0xFF], &mut offset),
            Err(Error::InvalidUtf8)
        );
        assert_eq!(offset, 0);
    }
}
