//! `Point2D` and axis-aligned bounding boxes.

use std::ops::{Add, Mul, Sub};

/// An immutable planar point, copied by value.
#[derive(Copy, Clone, Debug, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn dot(self, other: Point2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3-D cross product.
    #[inline]
    pub fn cross(self, other: Point2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance(self, other: Point2D) -> f64 {
        (self - other).norm()
    }

    #[inline]
    pub fn distance_sq(self, other: Point2D) -> f64 {
        let d = self - other;
        d.dot(d)
    }

    /// Point at parameter `t` on the segment `self → other`.
    ///
    /// Returns the exact endpoints for `t == 0` and `t == 1`.
    #[inline]
    pub fn lerp(self, other: Point2D, t: f64) -> Point2D {
        if t == 0.0 {
            self
        } else if t == 1.0 {
            other
        } else {
            Point2D::new(
                self.x + (other.x - self.x) * t,
                self.y + (other.y - self.y) * t,
            )
        }
    }

    /// Left-hand unit normal of the direction `self`, or `None` for a zero vector.
    #[inline]
    pub fn unit_normal(self) -> Option<Point2D> {
        let n = self.norm();
        if n == 0.0 || !n.is_finite() {
            None
        } else {
            Some(Point2D::new(-self.y / n, self.x / n))
        }
    }
}

impl Add for Point2D {
    type Output = Point2D;
    #[inline]
    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    #[inline]
    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2D {
    type Output = Point2D;
    #[inline]
    fn mul(self, rhs: f64) -> Point2D {
        Point2D::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Point2D::new(x, y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Point2D::new(x, y)
    }
}

/// Axis-aligned bounding box. An empty box has `min > max`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BBox {
    pub min: Point2D,
    pub max: Point2D,
}

impl BBox {
    pub const EMPTY: BBox = BBox {
        min: Point2D::new(f64::INFINITY, f64::INFINITY),
        max: Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
    };

    pub fn from_points<'a, I>(points: I) -> BBox
    where
        I: IntoIterator<Item = &'a Point2D>,
    {
        points.into_iter().fold(BBox::EMPTY, |b, p| b.including(*p))
    }

    #[inline]
    pub fn including(self, p: Point2D) -> BBox {
        BBox {
            min: Point2D::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2D::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    #[inline]
    pub fn union(self, other: BBox) -> BBox {
        BBox {
            min: Point2D::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2D::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.min.x <= self.max.x && self.min.y <= self.max.y)
    }

    /// Grows the box by `d` on every side.
    #[inline]
    pub fn expanded(self, d: f64) -> BBox {
        BBox {
            min: Point2D::new(self.min.x - d, self.min.y - d),
            max: Point2D::new(self.max.x + d, self.max.y + d),
        }
    }

    /// Closed-interval overlap test.
    #[inline]
    pub fn intersects(&self, other: &BBox) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    #[inline]
    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
