pub mod bits;
pub use bits::reader::{read_u32, read_u32_be, read_u64, read_u64_be};

pub mod mp4;
pub use mp4::{read_box, read_box_header, BoxHeader, Mp4Box, SyncSampleBox};

pub mod filter;
pub use filter::{encode_filtered, CountingWriter, Filter};

pub mod errors;
pub use errors::{FilterError, MediaError, MediaResult, Mp4Error};
