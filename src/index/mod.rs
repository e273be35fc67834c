//! Static spatial indexes.
//!
//! The pairing engine needs nearest-neighbour queries over one representative
//! point per talus line. [`KdTree`] is built once and is read-only afterwards;
//! to change its contents, build a new one.

pub mod kdtree;

pub use kdtree::{KdTree, Neighbor};
