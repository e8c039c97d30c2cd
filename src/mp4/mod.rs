#[macro_use]
mod macros;
pub mod r#box;
pub use r#box::{
    find_box, find_box_range, read_box, read_box_header, write_box_header, BoxHeader, Mp4Box,
    BOX_HEADER_SIZE,
};
pub mod stss;
pub use stss::{parse_stss, parse_stss_lenient, SyncSampleBox};
