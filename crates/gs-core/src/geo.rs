//! Planar layout coordinates.
//!
//! Layout positions are plain `f64` x/y in layout units.  The x axis points
//! east and the y axis points north, so compass bearings are measured
//! clockwise from +y.

/// A point in the layout plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Compass bearing from `self` toward `other` in degrees, [0, 360).
    /// North (+y) is 0, east (+x) is 90.  Coincident points yield 0.
    pub fn bearing_to(self, other: Point2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx == 0.0 && dy == 0.0 {
            return 0.0;
        }
        dx.atan2(dy).to_degrees().rem_euclid(360.0)
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Smallest angle between two compass headings, in [0, 180].
pub fn heading_difference(a_deg: f64, b_deg: f64) -> f64 {
    let d = (a_deg - b_deg).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
