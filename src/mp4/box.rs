use crate::errors::{MediaResult, Mp4Error};
use log::trace;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::bits::reader::{read_u32, read_u32_be, read_u64, read_u64_be};

/// Size of a compact box header (32-bit size + type tag)
pub const BOX_HEADER_SIZE: u64 = 8;

/// Box header information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxHeader {
    pub name: String,
    pub name_bytes: [u8; 4],
    /// Total box size including the header; 0 means the box runs to the end of its parent
    pub size: u64,
    pub header_size: u64,
}

/// A leaf box that can be decoded from, and encoded to, its on-wire form.
///
/// `decode` receives a reader bounded to the bytes following the box header;
/// `encode` writes the header followed by the payload. Parent containers
/// use `size` to compute their own total size.
pub trait Mp4Box: Sized {
    /// Four character type tag
    const TYPE: [u8; 4];

    fn decode<R: Read + ?Sized>(r: &mut R) -> MediaResult<Self>;

    /// Total encoded size in bytes, header included
    fn size(&self) -> u64;

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> MediaResult<()>;

    /// Write the compact 8-byte header for this box.
    fn write_header<W: Write + ?Sized>(&self, w: &mut W) -> MediaResult<()> {
        let size = self.size();
        let size32 = u32::try_from(size).map_err(|_| Mp4Error::BoxTooLarge { size })?;
        let mut header = Vec::with_capacity(BOX_HEADER_SIZE as usize);
        write_box_header(&mut header, &Self::TYPE, size32);
        w.write_all(&header)?;
        Ok(())
    }
}

/// Read a box header from an io source
pub fn read_box_header<R: Read + ?Sized>(r: &mut R) -> MediaResult<BoxHeader> {
    let size32 = read_u32_be(r)?;
    let mut name_buf = [0u8; 4];
    r.read_exact(&mut name_buf)?;
    let mut size = size32 as u64;
    let mut header_size = BOX_HEADER_SIZE;
    if size32 == 1 {
        size = read_u64_be(r)?;
        header_size = 16;
    }
    Ok(BoxHeader {
        name: String::from_utf8_lossy(&name_buf).into_owned(),
        name_bytes: name_buf,
        size,
        header_size,
    })
}

/// Read one box of type `B`: header first, then the payload through a reader
/// bounded to exactly the size the header declares.
pub fn read_box<B: Mp4Box, R: Read>(r: &mut R) -> MediaResult<B> {
    let header = read_box_header(r)?;
    if header.name_bytes != B::TYPE {
        return Err(Mp4Error::UnexpectedBox {
            expected: B::TYPE,
            found: header.name_bytes,
        }
        .into());
    }
    trace!("Reading {} box ({} bytes)", header.name, header.size);

    match header.size {
        0 => B::decode(r),
        size if size < header.header_size => Err(Mp4Error::InvalidBoxSize {
            size,
            header_size: header.header_size,
        }
        .into()),
        size => B::decode(&mut r.by_ref().take(size - header.header_size)),
    }
}

/// Parse a box header from a byte slice advancing the cursor
pub(crate) fn parse_box_header(data: &[u8], pos: &mut usize) -> Option<([u8; 4], u64)> {
    let size = read_u32(data, pos)? as u64;
    let name: [u8; 4] = data.get(*pos..*pos + 4)?.try_into().ok()?;
    *pos += 4;
    let real_size = if size == 1 { read_u64(data, pos)? } else { size };
    Some((name, real_size))
}

/// Write a box header to a vector
pub fn write_box_header(output: &mut Vec<u8>, name: &[u8; 4], size: u32) {
    output.extend_from_slice(&size.to_be_bytes());
    output.extend_from_slice(name);
}

/// Find a box and return the contained slice
pub fn find_box<'a>(data: &'a [u8], name: &[u8; 4]) -> Option<&'a [u8]> {
    let (_, start, end) = find_box_range(data, name)?;
    Some(&data[start..end])
}

/// Find a box and return its start plus the start and end indices of its payload
pub fn find_box_range(data: &[u8], name: &[u8; 4]) -> Option<(usize, usize, usize)> {
    let mut pos = 0usize;

    while pos + BOX_HEADER_SIZE as usize <= data.len() {
        let start = pos;
        let (box_name, size) = parse_box_header(data, &mut pos)?;
        let payload_start = pos;

        let payload_end = match size {
            // Box extends to the end of the enclosing data
            0 => data.len(),
            size if size < (payload_start - start) as u64 => return None,
            size if size > (data.len() - start) as u64 => return None,
            size => start + size as usize,
        };

        if &box_name == name {
            return Some((start, payload_start, payload_end));
        }

        pos = payload_end;
        if pos <= start {
            return None;
        }
    }
    None
}
