//! Streaming DXF R12 entity writer
//!
//! Writes a file that consists of an ENTITIES section only, optionally
//! preceded by a fixed HEADER/TABLES block for readers that refuse files
//! without a TABLES section. Every `add_*` call writes its entity
//! immediately; no drawing is kept in memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace};

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
use super::text_writer::DxfTextWriter;
use crate::error::{DxfError, Result};
use crate::types::{
    EntityAttributes, InvisibleEdgeFlags, TextAlignment, Vertex, COLOR_BY_BLOCK, COLOR_BY_LAYER,
};

/// HEADER ($ACADVER AC1009, $DWGCODEPAGE) and TABLES (LTYPE, STYLE, empty
/// VIEW) sections, written verbatim ahead of ENTITIES when requested.
pub const FIXED_TABLES: &str = include_str!("fixed_tables.dxf");

/// Default text style name; the STYLE tag is omitted for it
pub const DEFAULT_TEXT_STYLE: &str = "STANDARD";

/// Optional properties of a TEXT entity
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    /// Text height (group code 40)
    pub height: f64,
    /// Relative width factor (group code 41)
    pub width: f64,
    /// Alignment, written as group codes 72/73
    pub align: TextAlignment,
    /// Rotation in degrees (group code 50)
    pub rotation: f64,
    /// Oblique angle in degrees (group code 51)
    pub oblique: f64,
    /// Text style name (group code 7), written as given
    pub style: String,
}

impl TextOptions {
    pub fn new() -> Self {
        Self {
            height: 1.0,
            width: 1.0,
            align: TextAlignment::Left,
            rotation: 0.0,
            oblique: 0.0,
            style: DEFAULT_TEXT_STYLE.to_string(),
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_alignment(mut self, align: TextAlignment) -> Self {
        self.align = align;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_oblique(mut self, oblique: f64) -> Self {
        self.oblique = oblique;
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming writer for DXF R12 entities
pub struct R12Writer<W: Write> {
    writer: DxfTextWriter<W>,
    entities: usize,
}

impl<W: Write> R12Writer<W> {
    /// Start a drawing on `sink`, writing the fixed tables first if asked,
    /// then the ENTITIES section header.
    pub fn open(sink: W, fixed_tables: bool) -> Result<Self> {
        let mut writer = DxfTextWriter::new(sink);
        if fixed_tables {
            writer.write_raw(FIXED_TABLES)?;
        }
        writer.write_section_start("ENTITIES")?;
        debug!(fixed_tables, "opened DXF R12 entity stream");
        Ok(Self {
            writer,
            entities: 0,
        })
    }

    /// Write the section footer and EOF marker and hand back the sink
    pub fn close(mut self) -> Result<W> {
        self.writer.write_section_end()?;
        self.writer.write_eof()?;
        self.writer.flush()?;
        debug!(entities = self.entities, "closed DXF R12 entity stream");
        Ok(self.writer.into_inner())
    }

    /// Number of entities written so far
    pub fn entity_count(&self) -> usize {
        self.entities
    }

    /// Validate the attributes, then write the entity type and the
    /// layer/linetype/color block.
    fn begin_entity(
        &mut self,
        entity_type: &str,
        layer: &str,
        color: Option<i16>,
        linetype: Option<&str>,
    ) -> Result<()> {
        if let Some(color) = color {
            check_color(color)?;
        }
        trace!(entity_type, layer, "writing entity");
        self.writer.write_entity_type(entity_type)?;
        self.write_attributes(layer, color, linetype)?;
        self.entities += 1;
        Ok(())
    }

    fn write_attributes(
        &mut self,
        layer: &str,
        color: Option<i16>,
        linetype: Option<&str>,
    ) -> Result<()> {
        self.writer.write_string(8, layer)?;
        if let Some(linetype) = linetype {
            self.writer.write_string(6, linetype)?;
        }
        if let Some(color) = color {
            self.writer.write_i16(62, color)?;
        }
        Ok(())
    }

    fn begin_with(&mut self, entity_type: &str, attrs: &EntityAttributes) -> Result<()> {
        self.begin_entity(
            entity_type,
            &attrs.layer,
            attrs.color,
            attrs.linetype.as_deref(),
        )
    }

    /// Write a LINE entity
    pub fn add_line(
        &mut self,
        start: impl Into<Vertex>,
        end: impl Into<Vertex>,
        attrs: &EntityAttributes,
    ) -> Result<()> {
        self.begin_with("LINE", attrs)?;
        self.writer.write_vertex(10, &start.into())?;
        self.writer.write_vertex(11, &end.into())?;
        Ok(())
    }

    /// Write a CIRCLE entity
    pub fn add_circle(
        &mut self,
        center: impl Into<Vertex>,
        radius: f64,
        attrs: &EntityAttributes,
    ) -> Result<()> {
        self.begin_with("CIRCLE", attrs)?;
        self.writer.write_vertex(10, &center.into())?;
        self.writer.write_double(40, radius)?;
        Ok(())
    }

    /// Write an ARC entity. Angles are in degrees and written as given;
    /// the arc runs counter-clockwise from `start_angle` to `end_angle`.
    pub fn add_arc(
        &mut self,
        center: impl Into<Vertex>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        attrs: &EntityAttributes,
    ) -> Result<()> {
        self.begin_with("ARC", attrs)?;
        self.writer.write_vertex(10, &center.into())?;
        self.writer.write_double(40, radius)?;
        self.writer.write_double(50, start_angle)?;
        self.writer.write_double(51, end_angle)?;
        Ok(())
    }

    /// Write a POINT entity
    pub fn add_point(&mut self, location: impl Into<Vertex>, attrs: &EntityAttributes) -> Result<()> {
        self.begin_with("POINT", attrs)?;
        self.writer.write_vertex(10, &location.into())?;
        Ok(())
    }

    /// Write a 3DFACE entity from 3 or 4 corners
    pub fn add_3dface<I>(
        &mut self,
        vertices: I,
        invisible: InvisibleEdgeFlags,
        attrs: &EntityAttributes,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Vertex>,
    {
        self.add_quadrilateral("3DFACE", vertices, invisible.bits(), attrs)
    }

    /// Write a SOLID entity from 3 or 4 corners
    pub fn add_solid<I>(&mut self, vertices: I, attrs: &EntityAttributes) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Vertex>,
    {
        self.add_quadrilateral("SOLID", vertices, 0, attrs)
    }

    fn add_quadrilateral<I>(
        &mut self,
        entity_type: &'static str,
        vertices: I,
        flags: i16,
        attrs: &EntityAttributes,
    ) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Vertex>,
    {
        let mut corners: Vec<Vertex> = vertices.into_iter().map(Into::into).collect();
        match corners.len() {
            3 => corners.push(corners[2]),
            4 => {}
            count => {
                return Err(DxfError::VertexCount {
                    entity: entity_type,
                    count,
                })
            }
        }

        self.begin_with(entity_type, attrs)?;
        for (code, corner) in (10..).zip(corners.iter()) {
            self.writer.write_vertex(code, corner)?;
        }
        if flags != 0 {
            self.writer.write_i16(70, flags)?;
        }
        Ok(())
    }

    /// Write a POLYLINE with its VERTEX records and SEQEND.
    ///
    /// The first vertex decides the mode: three coordinates make a 3D
    /// polyline (flags 8, vertex flags 32), two make a 2D one (0/0).
    /// An empty sequence writes nothing.
    pub fn add_polyline<I>(&mut self, vertices: I, attrs: &EntityAttributes) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Vertex>,
    {
        let mut vertex_flags: Option<i16> = None;
        for vertex in vertices {
            let vertex = vertex.into();
            let flags = match vertex_flags {
                Some(flags) => flags,
                None => {
                    let (polyline_flags, flags) = if vertex.is_3d() { (8, 32) } else { (0, 0) };
                    self.begin_with("POLYLINE", attrs)?;
                    self.writer.write_i16(66, 1)?;
                    self.writer.write_i16(70, polyline_flags)?;
                    vertex_flags = Some(flags);
                    flags
                }
            };

            self.writer.write_entity_type("VERTEX")?;
            self.write_attributes(&attrs.layer, None, None)?;
            self.writer.write_i16(70, flags)?;
            self.writer.write_vertex(10, &vertex)?;
        }
        if vertex_flags.is_some() {
            self.writer.write_entity_type("SEQEND")?;
        }
        Ok(())
    }

    /// Write a single-line TEXT entity.
    ///
    /// The insertion point doubles as the alignment point. Width, rotation,
    /// oblique and style tags are left out when they hold their defaults.
    pub fn add_text(
        &mut self,
        text: &str,
        insert: impl Into<Vertex>,
        options: &TextOptions,
        layer: &str,
        color: Option<i16>,
    ) -> Result<()> {
        let insert = insert.into();
        self.begin_entity("TEXT", layer, color, None)?;
        self.writer.write_vertex(10, &insert)?;
        self.writer.write_string(1, text)?;
        self.writer.write_double(40, options.height)?;
        if options.width != 1.0 {
            self.writer.write_double(41, options.width)?;
        }
        if options.rotation != 0.0 {
            self.writer.write_double(50, options.rotation)?;
        }
        if options.oblique != 0.0 {
            self.writer.write_double(51, options.oblique)?;
        }
        if options.style != DEFAULT_TEXT_STYLE {
            self.writer.write_string(7, &options.style)?;
        }
        let (halign, valign) = options.align.flags();
        self.writer.write_i16(72, halign)?;
        self.writer.write_i16(73, valign)?;
        self.writer.write_vertex(11, &insert)?;
        Ok(())
    }
}

fn check_color(color: i16) -> Result<()> {
    if (COLOR_BY_BLOCK..=COLOR_BY_LAYER).contains(&color) {
        Ok(())
    } else {
        Err(DxfError::InvalidColor(color))
    }
}

/// Write one drawing to `sink`.
///
/// The ENTITIES footer is written only if `body` succeeds; on error the
/// output stays unterminated and the error is returned.
pub fn write_r12<W, F>(sink: W, fixed_tables: bool, body: F) -> Result<W>
where
    W: Write,
    F: FnOnce(&mut R12Writer<W>) -> Result<()>,
{
    let mut writer = R12Writer::open(sink, fixed_tables)?;
    body(&mut writer)?;
    writer.close()
}

/// Write one drawing to a new file at `path`
pub fn write_r12_file<P, F>(path: P, fixed_tables: bool, body: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut R12Writer<BufWriter<File>>) -> Result<()>,
{
    let file = File::create(path)?;
    write_r12(BufWriter::new(file), fixed_tables, body)?;
    Ok(())
}
