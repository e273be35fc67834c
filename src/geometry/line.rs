//! Open polylines.

use itertools::Itertools;

use super::{BBox, GeometryError, Point2D};

/// An ordered sequence of at least two points with no consecutive duplicates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct LineString {
    points: Vec<Point2D>,
}

impl LineString {
    /// Validates `points` and drops consecutive duplicates.
    ///
    /// Fails if a coordinate is not finite or fewer than two distinct
    /// consecutive points remain.
    pub fn new(points: Vec<Point2D>) -> Result<Self, GeometryError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::NonFinite { index });
        }
        let mut points = points;
        points.dedup();
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints {
                count: points.len(),
                required: 2,
            });
        }
        Ok(Self { points })
    }

    #[inline]
    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }

    #[inline]
    pub fn start(&self) -> Point2D {
        self.points[0]
    }

    #[inline]
    pub fn end(&self) -> Point2D {
        self.points[self.points.len() - 1]
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false` for a constructed line.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Consecutive vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        self.points.iter().copied().tuple_windows()
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance(b)).sum()
    }

    /// Point at half the arc length.
    pub fn midpoint(&self) -> Point2D {
        self.interpolate(0.5)
    }

    /// Point at fraction `f ∈ [0, 1]` of the arc length.
    pub fn interpolate(&self, f: f64) -> Point2D {
        let total = self.length();
        let target = total * f.clamp(0.0, 1.0);
        let mut walked = 0.0;
        for (a, b) in self.segments() {
            let len = a.distance(b);
            if walked + len >= target && len > 0.0 {
                return a.lerp(b, ((target - walked) / len).clamp(0.0, 1.0));
            }
            walked += len;
        }
        self.end()
    }

    pub fn reversed(&self) -> LineString {
        let mut points = self.points.clone();
        points.reverse();
        LineString { points }
    }

    pub fn bbox(&self) -> BBox {
        BBox::from_points(&self.points)
    }
}

impl TryFrom<Vec<Point2D>> for LineString {
    type Error = GeometryError;

    fn try_from(points: Vec<Point2D>) -> Result<Self, Self::Error> {
        LineString::new(points)
    }
}

impl<'de> serde::Deserialize<'de> for LineString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let points = Vec::<Point2D>::deserialize(deserializer)?;
        LineString::new(points).map_err(serde::de::Error::custom)
    }
}
