use super::r#box::{find_box, Mp4Box, BOX_HEADER_SIZE};
use crate::bits::reader::read_u32;
use crate::errors::{MediaResult, Mp4Error};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

/// Version, flags and entry count
const STSS_FIELDS_SIZE: u64 = 8;
const ENTRY_SIZE: u64 = 4;

/// Sync Sample Box (stss)
///
/// Contained in the Sample Table box (stbl). Lists the 1-based numbers of the
/// samples that decode without reference to earlier samples (key frames for
/// video tracks). A track without this box treats every sample as a sync sample.
///
/// `sample_numbers` is expected in strictly ascending order. This is not
/// verified; lookups on an unsorted table return unspecified entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSampleBox {
    pub version: u8,
    pub flags: [u8; 3],
    pub sample_numbers: Vec<u32>,
}

impl SyncSampleBox {
    /// Version 0 box with no flags set.
    pub fn new(sample_numbers: Vec<u32>) -> Self {
        Self {
            version: 0,
            flags: [0; 3],
            sample_numbers,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.sample_numbers.len()
    }

    /// Whether the 1-based `sample_number` is a sync sample.
    pub fn is_sync_sample(&self, sample_number: u32) -> bool {
        self.sample_numbers.is_empty() || self.sample_numbers.binary_search(&sample_number).is_ok()
    }

    /// Snap a zero-based sample index to the nearest sync sample.
    ///
    /// Returns a 1-based sample number. Targets outside the table clamp to its
    /// first or last entry, and when the target sits exactly halfway between two
    /// sync samples the later one wins. An empty table returns `sample + 1`.
    /// The conversion to 1-based wraps, so `u32::MAX` becomes 0 and clamps low.
    pub fn closest_sample(&self, sample: u32) -> u32 {
        let target = sample.wrapping_add(1);

        let (first, last) = match (self.sample_numbers.first(), self.sample_numbers.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return target,
        };
        if target < first {
            return first;
        }
        if target > last {
            return last;
        }

        // First entry strictly greater than the target, and the one before it
        let idx = self.sample_numbers.partition_point(|&n| n <= target);
        let lower = idx.checked_sub(1).and_then(|i| self.sample_numbers.get(i));
        let closest = match (lower, self.sample_numbers.get(idx)) {
            (Some(&lower), Some(&upper)) => {
                if upper.abs_diff(target) > target.abs_diff(lower) {
                    lower
                } else {
                    upper
                }
            }
            _ => target,
        };

        trace!("Sample {} snapped to sync sample #{}", sample, closest);
        closest
    }

    /// Write a human readable listing of the key frame table.
    pub fn dump<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "Key frames:")?;
        for (i, n) in self.sample_numbers.iter().enumerate() {
            writeln!(w, " #{} : sample #{}", i, n)?;
        }
        Ok(())
    }
}

impl Mp4Box for SyncSampleBox {
    const TYPE: [u8; 4] = *b"stss";

    /// Decode the payload following the box header. The reader must be
    /// bounded to this box; everything it yields is consumed.
    fn decode<R: Read + ?Sized>(r: &mut R) -> MediaResult<Self> {
        let mut data = Vec::new();
        r.read_to_end(&mut data)?;

        let available = data.len() as u64;
        let truncated = |declared_entries: u32, needed: u64| Mp4Error::TruncatedData {
            declared_entries,
            needed,
            available,
        };

        let mut pos = 4;
        let entry_count =
            read_u32(&data, &mut pos).ok_or_else(|| truncated(0, STSS_FIELDS_SIZE))?;
        let needed = STSS_FIELDS_SIZE + ENTRY_SIZE * entry_count as u64;
        if available < needed {
            return Err(truncated(entry_count, needed).into());
        }
        if available > needed {
            debug!("Ignoring {} trailing bytes in stss box", available - needed);
        }

        let sample_numbers = data[STSS_FIELDS_SIZE as usize..needed as usize]
            .chunks_exact(ENTRY_SIZE as usize)
            .map(|entry| u32::from_be_bytes([entry[0], entry[1], entry[2], entry[3]]))
            .collect::<Vec<_>>();

        debug!("Decoded stss box with {} sync samples", sample_numbers.len());

        Ok(Self {
            version: data[0],
            flags: [data[1], data[2], data[3]],
            sample_numbers,
        })
    }

    fn size(&self) -> u64 {
        BOX_HEADER_SIZE + STSS_FIELDS_SIZE + ENTRY_SIZE * self.sample_numbers.len() as u64
    }

    fn encode<W: Write + ?Sized>(&self, w: &mut W) -> MediaResult<()> {
        self.write_header(w)?;

        let mut buf = Vec::with_capacity((self.size() - BOX_HEADER_SIZE) as usize);
        buf.push(self.version);
        buf.extend_from_slice(&self.flags);
        // write_header already rejected tables too large for a u32 count
        buf.extend_from_slice(&(self.sample_numbers.len() as u32).to_be_bytes());
        for n in &self.sample_numbers {
            buf.extend_from_slice(&n.to_be_bytes());
        }
        w.write_all(&buf)?;

        trace!("Encoded stss box ({} bytes)", self.size());
        Ok(())
    }
}

/// Locate and decode the stss box inside an stbl payload (optional box)
pub fn parse_stss(stbl: &[u8]) -> MediaResult<Option<SyncSampleBox>> {
    let Some(mut stss) = find_box(stbl, &SyncSampleBox::TYPE) else {
        return Ok(None);
    };
    SyncSampleBox::decode(&mut stss).map(Some)
}

alias_lenient!(parse_stss_lenient, parse_stss, Option<SyncSampleBox>);
