//! Normalized map coordinates.
//!
//! A `MapPoint` places a location on the campus map image with both axes
//! scaled to `[0, 1]`.  Coordinates are a rendering and interpolation
//! attribute only: two locations may share a point and remain distinct
//! graph nodes, so nothing in the workspace looks a location up by its point.

/// A point in normalized map space (`x` right, `y` down, both in `[0, 1]`).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `true` when both axes lie in `[0, 1]`.
    #[inline]
    pub fn is_normalized(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`.
    #[inline]
    pub fn lerp(self, other: MapPoint, t: f32) -> MapPoint {
        let t = t.clamp(0.0, 1.0);
        MapPoint {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Euclidean distance in map units.
    pub fn distance(self, other: MapPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for MapPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// Ease-in/ease-out curve `t²(3 − 2t)`, clamped to `[0, 1]`.
///
/// Used for the visual position of a travelling agent only; arrival timing
/// is driven by the linear progress value.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
