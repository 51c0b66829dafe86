//! Core value types shared by the writer and the board driver

mod attributes;
mod edge_flags;
mod text_alignment;
mod vector;
mod vertex;

pub use attributes::{EntityAttributes, COLOR_BY_BLOCK, COLOR_BY_LAYER};
pub use edge_flags::InvisibleEdgeFlags;
pub use text_alignment::TextAlignment;
pub use vector::{Vector2, Vector3};
pub use vertex::Vertex;
