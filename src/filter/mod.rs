/*
# Filter Module

 Runs a caller supplied transformation over an in-memory media structure and then
 serializes the result to an output sink.

 Key components:
 - `Filter`: the transformation + serialization contract a filter implements
 - `encode_filtered()`: filter first, write second, stop at the first failure
 - `CountingWriter`: sink adapter reporting how many bytes a serializer produced
*/

use crate::errors::MediaResult;
use log::debug;
use std::io::{self, Write};

/// A transformation over a structure the filter owns, plus a way to write it out.
pub trait Filter {
    /// Apply the transformation. Errors should describe why the structure
    /// could not be transformed (e.g. an invalid target range).
    fn filter(&mut self) -> MediaResult<()>;

    /// Serialize the current state of the structure into `w`, returning the
    /// number of bytes written.
    fn write_to(&mut self, w: &mut dyn Write) -> MediaResult<u64>;
}

/// Encode the structure held by `f` into `w`, filtering it first.
///
/// Nothing is written when the transformation fails. A failure while writing
/// leaves `w` partially written.
pub fn encode_filtered<W: Write, F: Filter + ?Sized>(w: &mut W, f: &mut F) -> MediaResult<()> {
    f.filter()?;
    let written = f.write_to(w)?;
    debug!("Filtered encode wrote {} bytes", written);
    Ok(())
}

/// Writer adapter that counts the bytes passed through to the inner sink
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    bytes_written: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod unit_test;
