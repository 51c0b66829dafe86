//! Vertices of arity 2 or 3

use super::{Vector2, Vector3};

/// A drawing point with either two or three coordinates.
///
/// DXF point tags are emitted per axis, so the arity decides whether a
/// Z tag (code + 20) is written at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vertex {
    /// Planar point (X, Y)
    Xy(Vector2),
    /// Spatial point (X, Y, Z)
    Xyz(Vector3),
}

impl Vertex {
    /// Whether this vertex carries a Z coordinate
    pub fn is_3d(&self) -> bool {
        matches!(self, Vertex::Xyz(_))
    }

    /// Coordinates in axis order
    pub fn components(&self) -> impl Iterator<Item = f64> {
        let (values, len) = match *self {
            Vertex::Xy(p) => ([p.x, p.y, 0.0], 2),
            Vertex::Xyz(p) => ([p.x, p.y, p.z], 3),
        };
        values.into_iter().take(len)
    }
}

impl From<Vector2> for Vertex {
    fn from(point: Vector2) -> Self {
        Vertex::Xy(point)
    }
}

impl From<Vector3> for Vertex {
    fn from(point: Vector3) -> Self {
        Vertex::Xyz(point)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Vertex::Xy(Vector2::new(x, y))
    }
}

impl From<(f64, f64, f64)> for Vertex {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Vertex::Xyz(Vector3::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planar_components() {
        let v: Vertex = (1.0, 2.0).into();
        assert!(!v.is_3d());
        assert_eq!(v.components().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_spatial_components() {
        let v: Vertex = Vector3::new(1.0, 2.0, 3.0).into();
        assert!(v.is_3d());
        assert_eq!(v.components().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    }
}
