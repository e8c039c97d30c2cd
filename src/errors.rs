use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors returned by the codec and filter pipeline
#[derive(Debug)]
pub enum MediaError {
    Io(io::Error),
    Mp4(Mp4Error),
    Filter(FilterError),
}

/// MP4 format specific errors
#[derive(Debug, PartialEq, Eq)]
pub enum Mp4Error {
    /// The declared entry count needs more bytes than the payload holds
    TruncatedData {
        declared_entries: u32,
        needed: u64,
        available: u64,
    },
    /// A box header carried a different type tag than the one being decoded
    UnexpectedBox { expected: [u8; 4], found: [u8; 4] },
    /// A box header declared a size smaller than the header itself
    InvalidBoxSize { size: u64, header_size: u64 },
    /// The box does not fit the 32-bit size field
    BoxTooLarge { size: u64 },
}

/// Error reported by the transformation step of a filter
#[derive(Debug)]
pub struct FilterError {
    pub message: String,
}

impl FilterError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Io(err) => write!(f, "I/O error: {}", err),
            MediaError::Mp4(err) => write!(f, "MP4 error: {}", err),
            MediaError::Filter(err) => write!(f, "Filter error: {}", err),
        }
    }
}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::TruncatedData {
                declared_entries,
                needed,
                available,
            } => write!(
                f,
                "truncated data for {} entries: expected {} bytes, got {}",
                declared_entries, needed, available
            ),
            Mp4Error::UnexpectedBox { expected, found } => write!(
                f,
                "expected {} box, found {}",
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(found)
            ),
            Mp4Error::InvalidBoxSize { size, header_size } => write!(
                f,
                "invalid box size {}: smaller than its {} byte header",
                size, header_size
            ),
            Mp4Error::BoxTooLarge { size } => {
                write!(f, "box size {} does not fit a 32-bit size field", size)
            }
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for MediaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MediaError::Io(err) => Some(err),
            MediaError::Mp4(err) => Some(err),
            MediaError::Filter(err) => Some(err),
        }
    }
}
impl Error for Mp4Error {}
impl Error for FilterError {}

// Conversion implementations
impl From<io::Error> for MediaError {
    fn from(err: io::Error) -> Self {
        MediaError::Io(err)
    }
}

impl From<Mp4Error> for MediaError {
    fn from(err: Mp4Error) -> Self {
        MediaError::Mp4(err)
    }
}

impl From<FilterError> for MediaError {
    fn from(err: FilterError) -> Self {
        MediaError::Filter(err)
    }
}

// Conversion to io::Error for callers working on io::Result
impl From<MediaError> for io::Error {
    fn from(err: MediaError) -> Self {
        match err {
            MediaError::Io(err) => err,
            MediaError::Mp4(err) => io::Error::new(io::ErrorKind::InvalidData, err),
            MediaError::Filter(err) => io::Error::other(err),
        }
    }
}

// Type alias for Result with MediaError
pub type MediaResult<T> = Result<T, MediaError>;
