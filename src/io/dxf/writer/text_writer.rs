//! ASCII DXF writer

use std::io::Write;

use super::stream_writer::{format_double, DxfStreamWriter};
use crate::error::Result;

/// ASCII DXF stream writer.
///
/// Group codes are written as bare integers on their own line, the value on
/// the next one. Nothing is buffered here beyond what the sink buffers.
pub struct DxfTextWriter<W: Write> {
    writer: W,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a new ASCII DXF writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_code(&mut self, code: i32) -> Result<()> {
        writeln!(self.writer, "{}", code)?;
        Ok(())
    }

    /// Get a reference to the inner writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_i16(&mut self, code: i32, value: i16) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", value)?;
        Ok(())
    }

    fn write_double(&mut self, code: i32, value: f64) -> Result<()> {
        self.write_code(code)?;
        writeln!(self.writer, "{}", format_double(value))?;
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::stream_writer::DxfStreamWriterExt;
    use super::*;
    use crate::types::{Vector2, Vector3, Vertex};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut DxfTextWriter<&mut Vec<u8>>) -> Result<()>,
    {
        let mut buf = Vec::new();
        {
            let mut writer = DxfTextWriter::new(&mut buf);
            f(&mut writer).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_string() {
        let output = render(|w| w.write_string(0, "LINE"));
        assert_eq!(output, "0\nLINE\n");
    }

    #[test]
    fn test_codes_are_not_padded() {
        let output = render(|w| {
            w.write_i16(62, 7)?;
            w.write_i16(5, 1)
        });
        assert_eq!(output, "62\n7\n5\n1\n");
    }

    #[test]
    fn test_write_double_rounds() {
        let output = render(|w| w.write_double(40, 1.0 / 3.0));
        assert_eq!(output, "40\n0.333333\n");
    }

    #[test]
    fn test_write_planar_vertex() {
        let output = render(|w| w.write_vertex(11, &Vertex::from(Vector2::new(1.0, 2.5))));
        assert_eq!(output, "11\n1.0\n21\n2.5\n");
    }

    #[test]
    fn test_write_spatial_vertex() {
        let output = render(|w| w.write_vertex(10, &Vertex::from(Vector3::new(1.0, 2.0, 3.0))));
        assert_eq!(output, "10\n1.0\n20\n2.0\n30\n3.0\n");
    }

    #[test]
    fn test_write_raw_is_verbatim() {
        let output = render(|w| w.write_raw("  0\nSECTION\n"));
        assert_eq!(output, "  0\nSECTION\n");
    }

    #[test]
    fn test_section_markers() {
        let output = render(|w| {
            w.write_section_start("ENTITIES")?;
            w.write_section_end()?;
            w.write_eof()
        });
        assert_eq!(output, "0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n");
    }
}
