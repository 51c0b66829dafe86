//! DXF R12 writer module

mod r12_writer;
mod stream_writer;
mod text_writer;

pub use r12_writer::{
    write_r12, write_r12_file, R12Writer, TextOptions, DEFAULT_TEXT_STYLE, FIXED_TABLES,
};
pub use stream_writer::{format_double, DxfStreamWriter, DxfStreamWriterExt};
pub use text_writer::DxfTextWriter;
