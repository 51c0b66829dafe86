//! Layer, color and linetype attached to every entity

/// Color index meaning "use the color of the block"
pub const COLOR_BY_BLOCK: i16 = 0;

/// Color index meaning "use the color of the layer"
pub const COLOR_BY_LAYER: i16 = 256;

/// Common entity attributes.
///
/// The layer tag is always written. Color and linetype are only written
/// when set; the color index is range-checked when the entity is written,
/// not when it is assigned here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityAttributes {
    /// Layer name (default "0")
    pub layer: String,
    /// AutoCAD Color Index, valid range 0..=256
    pub color: Option<i16>,
    /// Linetype name
    pub linetype: Option<String>,
}

impl EntityAttributes {
    /// Attributes on the default layer "0"
    pub fn new() -> Self {
        Self::on_layer("0")
    }

    /// Attributes on the given layer, without color or linetype
    pub fn on_layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            color: None,
            linetype: None,
        }
    }

    /// Set the color index
    pub fn with_color(mut self, color: i16) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the color index if present
    pub fn with_optional_color(mut self, color: Option<i16>) -> Self {
        self.color = color;
        self
    }

    /// Set the linetype name
    pub fn with_linetype(mut self, linetype: impl Into<String>) -> Self {
        self.linetype = Some(linetype.into());
        self
    }
}

impl Default for EntityAttributes {
    fn default() -> Self {
        Self::new()
    }
}
