//! Planar geometry primitives for the trimming pipeline.
//!
//! All coordinates live in one planar reference frame; no reprojection is
//! performed here. Constructors validate their input (finite coordinates,
//! enough distinct points) so downstream code can rely on the invariants:
//! - [`LineString`]: at least 2 points, no consecutive duplicates.
//! - [`Polygon`]: an implicitly closed ring of at least 3 points, no
//!   consecutive duplicates, closing point not repeated.

pub mod buffer;
pub mod line;
pub mod point;
pub mod polygon;
pub mod segment;

pub use buffer::{buffer_line, buffer_ring};
pub use line::LineString;
pub use point::{BBox, Point2D};
pub use polygon::{Location, Polygon};

use thiserror::Error;

/// Errors raised while constructing geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer distinct points than the shape requires.
    #[error("expected at least {required} distinct points, got {count}")]
    TooFewPoints { count: usize, required: usize },
    /// A coordinate is NaN or infinite.
    #[error("non-finite coordinate at vertex {index}")]
    NonFinite { index: usize },
    /// A buffer width that is negative or not finite.
    #[error("invalid buffer width {0}")]
    InvalidWidth(f64),
}
