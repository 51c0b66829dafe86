//! KiCad board description driver
//!
//! Reads a `.kicad_pcb` file line by line, recognizes drawing primitives,
//! texts and dimensions on a fixed set of layers, and writes them through
//! the R12 entity writer. Lines that match nothing are skipped.

mod converter;
pub mod geometry;
pub mod layers;
pub mod tokens;

pub use converter::{
    convert, convert_file, output_path_for, ConversionSummary, ConverterConfiguration,
    PcbConverter, Placement,
};
pub use layers::{match_layer, LayerStyle, LAYER_TABLE, QUOTE_STYLE};
