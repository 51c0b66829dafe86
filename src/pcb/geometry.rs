//! Geometry derived from board primitives

use crate::types::Vector2;

/// Radius of a circle given its center and a point on its rim
pub fn circle_radius(center: Vector2, edge: Vector2) -> f64 {
    center.distance(&edge)
}

/// Start and end angles (degrees) of an arc from its center, the point
/// stored on the board and its signed sweep.
///
/// A negative sweep means the stored point is the start of the arc; a
/// zero or positive sweep means it is the end. The other angle is derived
/// by subtracting the sweep and is not normalized to [0, 360).
pub fn arc_angles(center: Vector2, edge: Vector2, sweep: f64) -> (f64, f64) {
    let angle = (edge - center).angle_degrees();
    if sweep < 0.0 {
        (angle, angle - sweep)
    } else {
        (angle - sweep, angle)
    }
}
