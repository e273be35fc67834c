//! Talus lines, their pairing, and the strips between pairs.
//!
//! A talus (slope or embankment) is drawn as two lines: its low edge and its
//! high edge. The pairing engine matches LOW lines to HIGH lines one-to-one
//! ([`pairing`]); each confirmed pair then becomes a ribbon polygon
//! ([`strip`]) covering the slope's footprint.
//!
//! Pairs are an index relation ([`TalusPair`] holds two ids), never links
//! stored on the lines themselves.

pub mod pairing;
pub mod strip;

use std::fmt;

use crate::geometry::LineString;
use crate::ids::TalusId;

pub use pairing::{PairingOutcome, pair_talus};
pub use strip::{Strip, build_strip, build_strips};

/// Which edge of the slope a talus line draws.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum TalusSide {
    Low,
    High,
}

impl fmt::Display for TalusSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TalusSide::Low => f.write_str("LOW"),
            TalusSide::High => f.write_str("HIGH"),
        }
    }
}

/// A validated talus line.
#[derive(Clone, Debug, PartialEq)]
pub struct TalusLine {
    pub id: TalusId,
    pub side: TalusSide,
    pub line: LineString,
}

impl TalusLine {
    pub fn new(id: TalusId, side: TalusSide, line: LineString) -> Self {
        Self { id, side, line }
    }
}

/// A confirmed LOW/HIGH match and the distance between their midpoints.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TalusPair {
    pub low: TalusId,
    pub high: TalusId,
    pub distance: f64,
}
