//! DXF (Drawing Exchange Format) writing

mod writer;

pub use writer::{
    format_double, write_r12, write_r12_file, DxfStreamWriter, DxfStreamWriterExt, DxfTextWriter,
    R12Writer, TextOptions, DEFAULT_TEXT_STYLE, FIXED_TABLES,
};
