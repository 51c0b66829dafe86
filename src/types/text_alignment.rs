//! TEXT alignment table

use std::fmt;
use std::str::FromStr;

use crate::error::DxfError;

/// Named TEXT alignment, mapped to the (72, 73) flag pair of a TEXT entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    BottomLeft,
    BottomCenter,
    BottomRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    TopLeft,
    TopCenter,
    TopRight,
}

static ALIGNMENTS: [(TextAlignment, &str, i16, i16); 12] = [
    (TextAlignment::Left, "LEFT", 0, 0),
    (TextAlignment::Center, "CENTER", 1, 0),
    (TextAlignment::Right, "RIGHT", 2, 0),
    (TextAlignment::BottomLeft, "BOTTOM_LEFT", 0, 1),
    (TextAlignment::BottomCenter, "BOTTOM_CENTER", 1, 1),
    (TextAlignment::BottomRight, "BOTTOM_RIGHT", 2, 1),
    (TextAlignment::MiddleLeft, "MIDDLE_LEFT", 0, 2),
    (TextAlignment::MiddleCenter, "MIDDLE_CENTER", 1, 2),
    (TextAlignment::MiddleRight, "MIDDLE_RIGHT", 2, 2),
    (TextAlignment::TopLeft, "TOP_LEFT", 0, 3),
    (TextAlignment::TopCenter, "TOP_CENTER", 1, 3),
    (TextAlignment::TopRight, "TOP_RIGHT", 2, 3),
];

impl TextAlignment {
    fn entry(&self) -> &'static (TextAlignment, &'static str, i16, i16) {
        // The table covers every variant
        &ALIGNMENTS[*self as usize]
    }

    /// Table name of this alignment
    pub fn name(&self) -> &'static str {
        self.entry().1
    }

    /// Horizontal (group code 72) and vertical (group code 73) flags
    pub fn flags(&self) -> (i16, i16) {
        let (_, _, h, v) = *self.entry();
        (h, v)
    }
}

impl FromStr for TextAlignment {
    type Err = DxfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        ALIGNMENTS
            .iter()
            .find(|(_, name, _, _)| *name == upper)
            .map(|(align, _, _, _)| *align)
            .ok_or_else(|| DxfError::UnknownAlignment(s.to_string()))
    }
}

impl fmt::Display for TextAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
