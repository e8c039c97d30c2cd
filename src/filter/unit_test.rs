use super::{encode_filtered, CountingWriter, Filter};
use crate::errors::{FilterError, MediaError, MediaResult};
use crate::mp4::{Mp4Box, SyncSampleBox};
use std::io::{self, Write};

/// Keeps the key frames nearest to a zero-based sample range and records
/// every call made on it.
struct KeyFrameTrim {
    stss: SyncSampleBox,
    start: u32,
    end: u32,
    calls: Vec<&'static str>,
}

impl KeyFrameTrim {
    fn new(sample_numbers: &[u32], start: u32, end: u32) -> Self {
        Self {
            stss: SyncSampleBox::new(sample_numbers.to_vec()),
            start,
            end,
            calls: Vec::new(),
        }
    }
}

impl Filter for KeyFrameTrim {
    fn filter(&mut self) -> MediaResult<()> {
        self.calls.push("filter");
        if self.start > self.end {
            return Err(FilterError::new(format!(
                "invalid sample range {}..{}",
                self.start, self.end
            ))
            .into());
        }
        let first = self.stss.closest_sample(self.start);
        let last = self.stss.closest_sample(self.end);
        self.stss
            .sample_numbers
            .retain(|&n| n >= first && n <= last);
        Ok(())
    }

    fn write_to(&mut self, w: &mut dyn Write) -> MediaResult<u64> {
        self.calls.push("write");
        let mut counter = CountingWriter::new(w);
        self.stss.encode(&mut counter)?;
        Ok(counter.bytes_written())
    }
}

struct ClosedSink;

impl Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_encode_filtered_trims_then_writes() {
    let mut trim = KeyFrameTrim::new(&[1, 31, 61, 91], 40, 70);
    let mut out = Vec::new();

    encode_filtered(&mut out, &mut trim).unwrap();

    assert_eq!(trim.calls, vec!["filter", "write"]);
    assert_eq!(trim.stss.sample_numbers, vec![31, 61]);

    let mut expected = Vec::new();
    SyncSampleBox::new(vec![31, 61]).encode(&mut expected).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn test_filter_failure_skips_write() {
    let mut trim = KeyFrameTrim::new(&[1, 31], 10, 5);
    let mut out = Vec::new();

    let err = encode_filtered(&mut out, &mut trim).unwrap_err();

    assert!(matches!(err, MediaError::Filter(_)));
    assert_eq!(err.to_string(), "Filter error: invalid sample range 10..5");
    assert_eq!(trim.calls, vec!["filter"]);
    assert!(out.is_empty());
}

#[test]
fn test_write_failure_propagates() {
    let mut trim = KeyFrameTrim::new(&[1, 31], 0, 40);

    let err = encode_filtered(&mut ClosedSink, &mut trim).unwrap_err();

    match err {
        MediaError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected I/O error, got {:?}", other),
    }
    assert_eq!(trim.calls, vec!["filter", "write"]);
}

#[test]
fn test_encode_filtered_through_trait_object() {
    let mut trim = KeyFrameTrim::new(&[5], 0, 100);
    let filter: &mut dyn Filter = &mut trim;
    let mut out = Vec::new();

    encode_filtered(&mut out, filter).unwrap();

    assert_eq!(out.len(), 20);
}

#[test]
fn test_counting_writer() {
    let mut counter = CountingWriter::new(Vec::new());
    counter.write_all(b"stss").unwrap();
    counter.write_all(&[0; 12]).unwrap();
    assert_eq!(counter.bytes_written(), 16);
    assert_eq!(counter.into_inner().len(), 16);
}
