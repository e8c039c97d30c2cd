/*
# Bits Reader Module

 Big-endian integer readers shared by the box framing and payload decoders.

 Key components:
 - Stream readers: `read_u32_be()`, `read_u64_be()` for box headers read off an `io::Read`
 - Slice readers: `read_u32()`, `read_u64()` with position tracking for in-memory payloads
*/

use std::io::{self, Read};

/// Read a 32-bit big endian value from `r`.
pub fn read_u32_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

/// Read a 64-bit big endian value from `r`.
pub fn read_u64_be<R: Read + ?Sized>(r: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}

/// Read a 32-bit big endian value from a byte slice advancing the position.
pub fn read_u32(data: &[u8], pos: &mut usize) -> Option<u32> {
    let bytes = data.get(*pos..pos.checked_add(4)?)?;
    *pos += 4;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a 64-bit big endian value from a byte slice advancing the position.
pub fn read_u64(data: &[u8], pos: &mut usize) -> Option<u64> {
    let bytes = data.get(*pos..pos.checked_add(8)?)?;
    *pos += 8;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    Some(u64::from_be_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_stream_values() {
        let data = [0x00u8, 0x00, 0x00, 0x10, 0, 0, 0, 0, 0, 0, 0x01, 0x00];
        let mut r = Cursor::new(&data);
        assert_eq!(read_u32_be(&mut r).unwrap(), 16);
        assert_eq!(read_u64_be(&mut r).unwrap(), 256);
        assert!(read_u32_be(&mut r).is_err());
    }

    #[test]
    fn test_read_slice_values() {
        let data = [0x73u8, 0x74, 0x73, 0x73, 0x00, 0x00];
        let mut pos = 0;
        assert_eq!(read_u32(&data, &mut pos), Some(0x7374_7373));
        assert_eq!(pos, 4);
        // Not enough bytes left: position stays put
        assert_eq!(read_u32(&data, &mut pos), None);
        assert_eq!(pos, 4);
        assert_eq!(read_u64(&data, &mut pos), None);
    }
}
