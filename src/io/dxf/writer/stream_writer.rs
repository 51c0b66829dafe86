//! DXF stream writer trait and common helpers

use crate::error::Result;
use crate::types::Vertex;

/// Trait for writing DXF code/value pairs
pub trait DxfStreamWriter {
    /// Write a code/value pair with a string value
    fn write_string(&mut self, code: i32, value: &str) -> Result<()>;

    /// Write a code/value pair with an integer value
    fn write_i16(&mut self, code: i32, value: i16) -> Result<()>;

    /// Write a code/value pair with a double value, rounded to 6 decimals
    fn write_double(&mut self, code: i32, value: f64) -> Result<()>;

    /// Write pre-encoded DXF text verbatim
    fn write_raw(&mut self, text: &str) -> Result<()>;

    /// Flush the writer
    fn flush(&mut self) -> Result<()>;
}

/// Extension trait for convenient writing operations
pub trait DxfStreamWriterExt: DxfStreamWriter {
    /// Write every axis of a vertex, starting at `code` and stepping by 10
    /// (10/20 for a planar point, 10/20/30 for a spatial one)
    fn write_vertex(&mut self, code: i32, vertex: &Vertex) -> Result<()> {
        for (axis, value) in vertex.components().enumerate() {
            self.write_double(code + 10 * axis as i32, value)?;
        }
        Ok(())
    }

    /// Write the entity type marker
    fn write_entity_type(&mut self, entity_type: &str) -> Result<()> {
        self.write_string(0, entity_type)
    }

    /// Write section start
    fn write_section_start(&mut self, section_name: &str) -> Result<()> {
        self.write_string(0, "SECTION")?;
        self.write_string(2, section_name)?;
        Ok(())
    }

    /// Write section end
    fn write_section_end(&mut self) -> Result<()> {
        self.write_string(0, "ENDSEC")
    }

    /// Write end of file
    fn write_eof(&mut self) -> Result<()> {
        self.write_string(0, "EOF")
    }
}

// Auto-implement the extension trait for all stream writers
impl<T: DxfStreamWriter> DxfStreamWriterExt for T {}

/// Render a double the way every DXF value in this crate is rendered:
/// rounded to 6 decimals, trailing zeros removed, at least one decimal kept.
pub fn format_double(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = format!("{:.6}", value);
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}
