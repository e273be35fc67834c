//! Closed rings.
//!
//! Containment uses the even-odd rule, so a ring whose edges cross (for
//! instance a strip built from two talus lines that cross each other) still
//! classifies points consistently: each lobe counts as inside.

use itertools::Itertools;

use super::segment::{point_segment_distance, segments_cross};
use super::{BBox, GeometryError, Point2D};

/// Where a point lies relative to a region, given a boundary tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Location {
    Inside,
    Boundary,
    Outside,
}

/// A ring of at least three points, implicitly closed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Polygon {
    ring: Vec<Point2D>,
    #[serde(skip)]
    bbox: BBox,
}

impl Polygon {
    /// Builds a ring from `points`; a repeated closing point is dropped.
    pub fn new(points: Vec<Point2D>) -> Result<Self, GeometryError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite { index });
        }
        let mut ring = points;
        ring.dedup();
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(GeometryError::TooFewPoints {
                count: ring.len(),
                required: 3,
            });
        }
        let bbox = BBox::from_points(&ring);
        Ok(Self { ring, bbox })
    }

    /// Vertices without the closing repeat.
    #[inline]
    pub fn ring(&self) -> &[Point2D] {
        &self.ring
    }

    #[inline]
    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    /// Ring edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.ring.iter().copied().circular_tuple_windows()
    }

    /// Shoelace area; positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        0.5 * self.edges().map(|(a, b)| a.cross(b)).sum::<f64>()
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Even-odd containment; points exactly on an edge may land either way.
    pub fn contains(&self, p: Point2D) -> bool {
        if !self.bbox.contains(p) {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Distance from `p` to the nearest ring edge.
    pub fn boundary_distance(&self, p: Point2D) -> f64 {
        self.edges()
            .map(|(a, b)| point_segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Classifies `p`; anything within `eps` of an edge is on the boundary.
    pub fn locate(&self, p: Point2D, eps: f64) -> Location {
        if !self.bbox.expanded(eps).contains(p) {
            return Location::Outside;
        }
        if self.boundary_distance(p) <= eps {
            Location::Boundary
        } else if self.contains(p) {
            Location::Inside
        } else {
            Location::Outside
        }
    }

    /// `true` when no two non-adjacent edges properly cross.
    pub fn is_simple(&self) -> bool {
        let edges: Vec<_> = self.edges().collect();
        let n = edges.len();
        for i in 0..n {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    continue;
                }
                let (a, b) = edges[i];
                let (c, d) = edges[j];
                if segments_cross(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }
}

impl<'de> serde::Deserialize<'de> for Polygon {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            ring: Vec<Point2D>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Polygon::new(raw.ring).map_err(serde::de::Error::custom)
    }
}
