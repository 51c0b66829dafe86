//! Board layer to drawing layer mapping

use crate::types::EntityAttributes;

/// Output layer name and color for entities taken from one board layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerStyle {
    pub name: &'static str,
    pub color: Option<i16>,
}

impl LayerStyle {
    pub const fn new(name: &'static str, color: Option<i16>) -> Self {
        Self { name, color }
    }

    /// Drawing attributes for entities on this layer
    pub fn attributes(&self) -> EntityAttributes {
        EntityAttributes::on_layer(self.name).with_optional_color(self.color)
    }
}

impl Default for LayerStyle {
    fn default() -> Self {
        DEFAULT_STYLE
    }
}

/// Style used for drawing annotations (`Dwgs.User`) and as the fallback
pub const DEFAULT_STYLE: LayerStyle = LayerStyle::new("0", None);

/// Style for dimension text when dimensions are moved to their own layer
pub const QUOTE_STYLE: LayerStyle = LayerStyle::new("Quote", Some(127));

/// Board layer substrings, in match order
pub const LAYER_TABLE: [(&str, LayerStyle); 9] = [
    ("Dwgs", DEFAULT_STYLE),
    ("Cmts", LayerStyle::new("Cmts", Some(1))),
    ("Edge", LayerStyle::new("Edge", Some(2))),
    ("Eco1", LayerStyle::new("Eco1", Some(3))),
    ("Eco2", LayerStyle::new("Eco2", Some(4))),
    ("F.Fab", LayerStyle::new("FFab", Some(5))),
    ("B.Fab", LayerStyle::new("BFab", Some(6))),
    ("F.CrtYd", LayerStyle::new("FCrtYd", Some(7))),
    ("B.CrtYd", LayerStyle::new("BCrtYd", Some(8))),
];

/// Find the drawing style for a board line.
///
/// Every table entry is tested; when a line mentions several layers the
/// last entry in table order wins.
pub fn match_layer(line: &str) -> Option<LayerStyle> {
    LAYER_TABLE
        .iter()
        .rev()
        .find(|(marker, _)| line.contains(marker))
        .map(|(_, style)| *style)
}
