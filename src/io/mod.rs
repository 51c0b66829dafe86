//! I/O module for writing DXF files

pub mod dxf;

pub use dxf::{write_r12, write_r12_file, R12Writer};
