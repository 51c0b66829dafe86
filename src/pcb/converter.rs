//! Line-oriented KiCad board to DXF conversion

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace};

use super::geometry::{arc_angles, circle_radius};
use super::layers::{match_layer, LayerStyle, QUOTE_STYLE};
use super::tokens;
use crate::error::Result;
use crate::io::dxf::{write_r12, R12Writer, TextOptions};
use crate::types::{TextAlignment, Vector2, Vector3};

/// Configuration for a board conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfiguration {
    /// Write the fixed HEADER/TABLES block before the entities.
    ///
    /// Default: `false`.
    pub fixed_tables: bool,
    /// Move the text of a dimension onto the "Quote" layer (color 127).
    ///
    /// Default: `true`.
    pub quote_layer: bool,
    /// Style name written on every TEXT entity.
    ///
    /// Default: `"SIMPLEX"`.
    pub text_style: String,
    /// Distance between stacked lines of a multi-line text, as a multiple
    /// of the text height.
    ///
    /// Default: `1.3`.
    pub line_spacing: f64,
}

impl Default for ConverterConfiguration {
    fn default() -> Self {
        Self {
            fixed_tables: false,
            quote_layer: true,
            text_style: "SIMPLEX".to_string(),
            line_spacing: 1.3,
        }
    }
}

/// Counts gathered over one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Input lines read
    pub lines_read: usize,
    /// Input lines that matched no marker
    pub lines_skipped: usize,
    /// LINE entities written (primitives and dimension bars)
    pub lines: usize,
    /// CIRCLE entities written
    pub circles: usize,
    /// ARC entities written
    pub arcs: usize,
    /// TEXT entities written, one per physical text line
    pub texts: usize,
    /// A text was still waiting for its effects line at end of input
    pub unterminated_text: bool,
}

impl ConversionSummary {
    /// Total number of entities written
    pub fn entities(&self) -> usize {
        self.lines + self.circles + self.arcs + self.texts
    }
}

/// Coordinate frame of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    /// Relative to the current footprint placement
    Footprint,
    /// Board coordinates
    Board,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Line,
    Circle,
    Arc,
}

const PRIMITIVE_MARKERS: [(&str, Frame, Shape); 6] = [
    ("fp_line", Frame::Footprint, Shape::Line),
    ("fp_circle", Frame::Footprint, Shape::Circle),
    ("fp_arc", Frame::Footprint, Shape::Arc),
    ("gr_line", Frame::Board, Shape::Line),
    ("gr_circle", Frame::Board, Shape::Circle),
    ("gr_arc", Frame::Board, Shape::Arc),
];

const DIMENSION_BAR_MARKERS: [&str; 3] = ["(feature", "(crossbar", "(arrow"];

/// Current footprint placement
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Placement {
    pub offset: Vector2,
    /// Footprint rotation in degrees; recorded, not applied to primitives
    pub rotation: f64,
}

/// A `gr_text` waiting for its effects line
#[derive(Debug, Clone, PartialEq)]
struct PendingText {
    content: String,
    position: Vector2,
    rotation: f64,
    style: LayerStyle,
}

/// Text/dimension state carried from one line to the next
#[derive(Debug, Clone, PartialEq)]
enum DriverState {
    Idle,
    /// A dimension started; the next closed text is its value
    DimensionPending,
    AccumulatingText { text: PendingText, dimension: bool },
}

/// Converts board description lines into DXF entities
pub struct PcbConverter {
    config: ConverterConfiguration,
    state: DriverState,
    placement: Placement,
    /// Style of the most recent layer match, used by dimension bars
    style: Option<LayerStyle>,
    summary: ConversionSummary,
}

impl PcbConverter {
    /// Create a converter in the idle state with a zero placement
    pub fn new(config: ConverterConfiguration) -> Self {
        Self {
            config,
            state: DriverState::Idle,
            placement: Placement::default(),
            style: None,
            summary: ConversionSummary::default(),
        }
    }

    /// Current footprint placement
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Whether a text line has been seen without its effects line yet
    pub fn has_pending_text(&self) -> bool {
        matches!(self.state, DriverState::AccumulatingText { .. })
    }

    /// Process one input line, writing any entities it produces
    pub fn process_line<W: Write>(&mut self, line: &str, writer: &mut R12Writer<W>) -> Result<()> {
        self.summary.lines_read += 1;
        let line_no = self.summary.lines_read;
        let mut handled = false;

        if line.trim().starts_with("(at ") && !line.contains("(at (xyz") {
            let (offset, rotation) = tokens::placement(line, line_no)?;
            self.placement = Placement {
                offset,
                rotation: rotation.unwrap_or(0.0),
            };
            trace!(line = line_no, %offset, "footprint placement");
            handled = true;
        }

        for (marker, frame, shape) in PRIMITIVE_MARKERS {
            if line.contains(marker) {
                handled |= self.write_primitive(line, line_no, frame, shape, writer)?;
            }
        }

        if line.contains("gr_text") {
            if let Some(style) = match_layer(line) {
                self.begin_text(line, line_no, style)?;
                handled = true;
            }
        }

        if line.contains("(effects") && self.has_pending_text() {
            self.close_text(line, line_no, writer)?;
            handled = true;
        }

        if line.contains("(dimension") {
            self.begin_dimension();
            handled = true;
        }

        if DIMENSION_BAR_MARKERS.iter().any(|marker| line.contains(marker)) {
            let (start, end) = tokens::xy_pair(line, line_no)?;
            let style = self.style.unwrap_or_default();
            writer.add_line(start.flip_y(), end.flip_y(), &style.attributes())?;
            self.summary.lines += 1;
            handled = true;
        }

        if !handled {
            self.summary.lines_skipped += 1;
        }
        Ok(())
    }

    /// Map a primitive point into the drawing plane
    fn to_drawing(&self, point: Vector2, frame: Frame) -> Vector2 {
        match frame {
            Frame::Footprint => (point + self.placement.offset).flip_y(),
            Frame::Board => point.flip_y(),
        }
    }

    fn write_primitive<W: Write>(
        &mut self,
        line: &str,
        line_no: usize,
        frame: Frame,
        shape: Shape,
        writer: &mut R12Writer<W>,
    ) -> Result<bool> {
        let Some(style) = match_layer(line) else {
            return Ok(false);
        };
        self.style = Some(style);
        let attrs = style.attributes();

        let fields = tokens::primitive_tokens(line);
        let (first, second) = tokens::primitive_points(&fields, line_no)?;
        let first = self.to_drawing(first, frame);
        let second = self.to_drawing(second, frame);

        match shape {
            Shape::Line => {
                writer.add_line(first, second, &attrs)?;
                self.summary.lines += 1;
            }
            Shape::Circle => {
                writer.add_circle(first, circle_radius(first, second), &attrs)?;
                self.summary.circles += 1;
            }
            Shape::Arc => {
                let sweep = tokens::arc_sweep(&fields, line_no)?;
                let (start, end) = arc_angles(first, second, sweep);
                writer.add_arc(
                    Vector3::from_xy(first, 0.0),
                    circle_radius(first, second),
                    start,
                    end,
                    &attrs,
                )?;
                self.summary.arcs += 1;
            }
        }
        debug!(line = line_no, ?shape, ?frame, layer = style.name, "primitive written");
        Ok(true)
    }

    fn begin_text(&mut self, line: &str, line_no: usize, style: LayerStyle) -> Result<()> {
        let (content, position, rotation) = tokens::text_fields(line, line_no)?;
        self.style = Some(style);
        let text = PendingText {
            content,
            position,
            rotation,
            style,
        };
        let dimension = match &self.state {
            DriverState::Idle => false,
            DriverState::DimensionPending => true,
            DriverState::AccumulatingText { dimension, .. } => *dimension,
        };
        trace!(line = line_no, dimension, "text started");
        self.state = DriverState::AccumulatingText { text, dimension };
        Ok(())
    }

    fn begin_dimension(&mut self) {
        self.state = match std::mem::replace(&mut self.state, DriverState::Idle) {
            DriverState::AccumulatingText { text, .. } => DriverState::AccumulatingText {
                text,
                dimension: true,
            },
            _ => DriverState::DimensionPending,
        };
    }

    fn close_text<W: Write>(
        &mut self,
        line: &str,
        line_no: usize,
        writer: &mut R12Writer<W>,
    ) -> Result<()> {
        let DriverState::AccumulatingText { text, dimension } =
            std::mem::replace(&mut self.state, DriverState::Idle)
        else {
            return Ok(());
        };
        let (height, width) = tokens::text_size(line, line_no)?;

        let mut style = text.style;
        if dimension && self.config.quote_layer {
            style = QUOTE_STYLE;
            self.style = Some(QUOTE_STYLE);
        }
        let align = if dimension {
            TextAlignment::MiddleCenter
        } else {
            TextAlignment::Left
        };
        let options = TextOptions::new()
            .with_height(height)
            .with_width(width)
            .with_alignment(align)
            .with_rotation(text.rotation)
            .with_style(self.config.text_style.as_str());

        let mut y = -text.position.y;
        for part in text.content.split("\\n") {
            writer.add_text(part, (text.position.x, y), &options, style.name, style.color)?;
            self.summary.texts += 1;
            y -= height * self.config.line_spacing;
        }
        debug!(line = line_no, dimension, layer = style.name, "text written");
        Ok(())
    }

    /// Finish the run and return its counts
    pub fn finish(mut self) -> ConversionSummary {
        self.summary.unterminated_text = self.has_pending_text();
        self.summary
    }
}

/// Convert a board description read from `input` into a DXF drawing on `sink`
pub fn convert<R, W>(
    input: R,
    sink: W,
    config: &ConverterConfiguration,
) -> Result<(W, ConversionSummary)>
where
    R: BufRead,
    W: Write,
{
    let mut converter = PcbConverter::new(config.clone());
    let sink = write_r12(sink, config.fixed_tables, |writer| {
        for line in input.lines() {
            converter.process_line(&line?, writer)?;
        }
        Ok(())
    })?;
    let summary = converter.finish();
    info!(
        lines = summary.lines_read,
        entities = summary.entities(),
        skipped = summary.lines_skipped,
        "conversion finished"
    );
    Ok((sink, summary))
}

/// Convert the board file at `input` into a DXF file at `output`
pub fn convert_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &ConverterConfiguration,
) -> Result<ConversionSummary> {
    let (input, output) = (input.as_ref(), output.as_ref());
    info!(input = %input.display(), output = %output.display(), "converting board");
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    let (_, summary) = convert(reader, writer, config)?;
    Ok(summary)
}

/// Output path for a board file: same directory and stem, `.dxf` extension
pub fn output_path_for(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension("dxf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> (String, ConversionSummary) {
        run_with(input, &ConverterConfiguration::default())
    }

    fn run_with(input: &str, config: &ConverterConfiguration) -> (String, ConversionSummary) {
        let (buf, summary) = convert(input.as_bytes(), Vec::new(), config).unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    #[test]
    fn test_board_line() {
        let (output, summary) =
            run("  (gr_line (start 10 20) (end 30 40) (angle 90) (layer Edge.Cuts) (width 0.1))\n");
        assert!(output.contains(
            "0\nLINE\n8\nEdge\n62\n2\n10\n10.0\n20\n-20.0\n11\n30.0\n21\n-40.0\n"
        ));
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn test_footprint_offset() {
        let input = "  (module R_0805 (layer F.Cu) (tedit 5A0F)\n\
                     \x20   (at 100 50)\n\
                     \x20   (fp_line (start -1 -1) (end 1 1) (layer F.Fab) (width 0.1))\n";
        let (output, _) = run(input);
        assert!(output.contains("8\nFFab\n62\n5\n10\n99.0\n20\n-49.0\n11\n101.0\n21\n-51.0\n"));
    }

    #[test]
    fn test_board_primitive_ignores_offset() {
        let input = "(at 100 50)\n(gr_circle (center 0 0) (end 3 4) (layer Cmts.User) (width 0.1))\n";
        let (output, summary) = run(input);
        assert!(output.contains("0\nCIRCLE\n8\nCmts\n62\n1\n10\n0.0\n20\n-0.0\n40\n5.0\n"));
        assert_eq!(summary.circles, 1);
    }

    #[test]
    fn test_at_xyz_is_not_a_placement() {
        let input = "(at 100 50)\n      (at (xyz 0 0 0))\n(fp_line (start 0 0) (end 1 0) (layer Dwgs.User) (width 0.1))\n";
        let (output, _) = run(input);
        assert!(output.contains("0\nLINE\n8\n0\n10\n100.0\n20\n-50.0\n"));
    }

    #[test]
    fn test_arc_sweep_sign() {
        let (output, _) = run("(gr_arc (start 0 0) (end 1 0) (angle -90) (layer Edge.Cuts) (width 0.1))\n");
        assert!(output.contains("40\n1.0\n50\n0.0\n51\n90.0\n"));

        let (output, _) = run("(gr_arc (start 0 0) (end 1 0) (angle 90) (layer Edge.Cuts) (width 0.1))\n");
        assert!(output.contains("40\n1.0\n50\n-90.0\n51\n0.0\n"));
    }

    #[test]
    fn test_unknown_layer_is_ignored() {
        let (output, summary) =
            run("(gr_line (start 0 0) (end 1 1) (layer F.SilkS) (width 0.1))\n");
        assert!(!output.contains("LINE"));
        assert_eq!(summary.entities(), 0);
        assert_eq!(summary.lines_skipped, 1);
    }

    #[test]
    fn test_multiline_text() {
        let input = "  (gr_text \"A\\nB\" (at 10 20) (layer Cmts.User)\n\
                     \x20   (effects (font (size 2 2) (thickness 0.3)))\n\
                     \x20 )\n";
        let (output, summary) = run(input);
        assert_eq!(summary.texts, 2);
        assert!(output.contains("1\nA\n40\n2.0\n41\n2.0\n7\nSIMPLEX\n72\n0\n73\n0\n"));
        assert!(output.contains("10\n10.0\n20\n-20.0\n1\nA\n"));
        assert!(output.contains("10\n10.0\n20\n-22.6\n1\nB\n"));
    }

    #[test]
    fn test_dimension_text_on_quote_layer() {
        let input = "  (dimension 50 (width 0.3) (layer Dwgs.User)\n\
                     \x20   (gr_text \"50 mm\" (at 125 60) (layer Dwgs.User)\n\
                     \x20     (effects (font (size 1.5 1.5) (thickness 0.3)))\n\
                     \x20   )\n\
                     \x20   (feature1 (pts (xy 150 70) (xy 150 58)))\n\
                     \x20   (gr_text Note (at 0 0) (layer Dwgs.User)\n\
                     \x20     (effects (font (size 1 1) (thickness 0.15)))\n";
        let (output, summary) = run(input);
        assert!(output.contains("0\nTEXT\n8\nQuote\n62\n127\n10\n125.0\n20\n-60.0\n1\n50 mm\n"));
        assert!(output.contains("72\n1\n73\n2\n"));
        assert!(output.contains("0\nLINE\n8\nQuote\n62\n127\n10\n150.0\n20\n-70.0\n11\n150.0\n21\n-58.0\n"));
        assert!(output.contains("0\nTEXT\n8\n0\n10\n0.0\n20\n-0.0\n1\nNote\n"));
        assert_eq!(summary.texts, 2);
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn test_dimension_without_quote_layer() {
        let config = ConverterConfiguration {
            quote_layer: false,
            ..ConverterConfiguration::default()
        };
        let input = "(dimension 50 (width 0.3) (layer Dwgs.User)\n\
                     (gr_text 50 (at 1 2) (layer Eco1.User)\n\
                     (effects (font (size 1 1) (thickness 0.15)))\n";
        let (output, _) = run_with(input, &config);
        assert!(output.contains("0\nTEXT\n8\nEco1\n62\n3\n"));
        assert!(output.contains("72\n1\n73\n2\n"));
    }

    #[test]
    fn test_bar_without_layer_match_uses_layer_zero() {
        let (output, summary) = run("      (crossbar (pts (xy 10 10) (xy 50 10)))\n");
        assert!(output.contains("0\nLINE\n8\n0\n10\n10.0\n20\n-10.0\n11\n50.0\n21\n-10.0\n"));
        assert!(!output.contains("\n62\n"));
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn test_bar_follows_text_layer_without_quote_layer() {
        let config = ConverterConfiguration {
            quote_layer: false,
            ..ConverterConfiguration::default()
        };
        let input = "(dimension 50 (width 0.3) (layer Dwgs.User)\n\
                     (gr_text 50 (at 1 2) (layer Eco1.User)\n\
                     (effects (font (size 1 1) (thickness 0.15)))\n\
                     (feature1 (pts (xy 150 70) (xy 150 58)))\n";
        let (output, summary) = run_with(input, &config);
        assert!(output.contains(
            "0\nLINE\n8\nEco1\n62\n3\n10\n150.0\n20\n-70.0\n11\n150.0\n21\n-58.0\n"
        ));
        assert!(!output.contains("Quote"));
        assert_eq!(summary.lines, 1);
    }

    #[test]
    fn test_text_rotation() {
        let input = "(gr_text Rotate (at 325.374 52.705 15) (layer Eco2.User)\n\
                     (effects (font (size 1.5 1.5) (thickness 0.3)))\n";
        let (output, _) = run(input);
        assert!(output.contains("50\n15.0\n"));
        assert!(output.contains("8\nEco2\n62\n4\n"));
    }

    #[test]
    fn test_effects_without_text_is_ignored() {
        let input = "(fp_text reference R1 (at 0 2) (layer F.SilkS)\n\
                     (effects (font (size 1 1) (thickness 0.15)))\n";
        let (output, summary) = run(input);
        assert!(!output.contains("TEXT"));
        assert_eq!(summary.texts, 0);
    }

    #[test]
    fn test_unterminated_text_is_reported() {
        let (_, summary) = run("(gr_text Lost (at 0 0) (layer Cmts.User)\n");
        assert!(summary.unterminated_text);
    }

    #[test]
    fn test_malformed_primitive_fails() {
        let result = convert(
            "(gr_line (start 0 0) (layer Edge.Cuts))\n".as_bytes(),
            Vec::new(),
            &ConverterConfiguration::default(),
        );
        assert!(matches!(
            result,
            Err(crate::error::DxfError::Extraction { line: 1, .. })
        ));
    }

    #[test]
    fn test_placement_tracks_rotation() {
        let mut converter = PcbConverter::new(ConverterConfiguration::default());
        let mut writer = R12Writer::open(Vec::new(), false).unwrap();
        converter.process_line("    (at 10 20 90)", &mut writer).unwrap();
        assert_eq!(converter.placement().offset, Vector2::new(10.0, 20.0));
        assert_eq!(converter.placement().rotation, 90.0);
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for("/tmp/boards/demo.kicad_pcb"),
            PathBuf::from("/tmp/boards/demo.dxf")
        );
        assert_eq!(output_path_for("board"), PathBuf::from("board.dxf"));
    }
}
