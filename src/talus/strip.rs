//! Ribbon polygons between paired talus lines.
//!
//! The HIGH line is oriented to follow the LOW line: of the two endpoint
//! correspondences (start↔start with end↔end, or start↔end with end↔start)
//! the one with the smaller summed endpoint distance wins. The ring then walks
//! the LOW line forward and the oriented HIGH line backward. Both lines keep
//! their own vertices; nothing is resampled, so lines with very different
//! vertex counts still close into one ring.

use hashbrown::HashMap;

use super::{TalusLine, TalusPair};
use crate::geometry::{GeometryError, Polygon};
use crate::ids::{EntityRef, TalusId};
use crate::trim_error::TrimError;

/// The footprint of one paired talus.
#[derive(Clone, Debug, PartialEq)]
pub struct Strip {
    pub pair: TalusPair,
    pub polygon: Polygon,
}

/// Builds the strip polygon for `low` and `high`.
///
/// A zero-area band still yields a polygon as long as the ring has three
/// distinct vertices; clipping against it removes nothing of substance.
pub fn build_strip(low: &TalusLine, high: &TalusLine, pair: TalusPair) -> Result<Strip, GeometryError> {
    let (l0, l1) = (low.line.start(), low.line.end());
    let (h0, h1) = (high.line.start(), high.line.end());
    let same = l0.distance(h0) + l1.distance(h1);
    let flipped = l0.distance(h1) + l1.distance(h0);

    let mut ring = Vec::with_capacity(low.line.len() + high.line.len());
    ring.extend_from_slice(low.line.points());
    if flipped < same {
        ring.extend(high.line.points().iter().copied());
    } else {
        ring.extend(high.line.points().iter().rev().copied());
    }
    let polygon = Polygon::new(ring)?;
    if !polygon.is_simple() {
        log::debug!(
            "strip for talus #{} / #{} self-intersects; kept with even-odd containment",
            pair.low,
            pair.high
        );
    }
    Ok(Strip { pair, polygon })
}

/// Builds strips for every pair; failures are returned as diagnostics
/// against the pair's LOW line.
///
/// A pair whose lines collapse onto each other encloses nothing: it gets no
/// strip and no diagnostic, and its corridors still cover the lines.
pub fn build_strips(lines: &[TalusLine], pairs: &[TalusPair]) -> (Vec<Strip>, Vec<TrimError>) {
    let by_id: HashMap<TalusId, &TalusLine> = lines.iter().map(|t| (t.id, t)).collect();
    let mut strips = Vec::with_capacity(pairs.len());
    let mut issues = Vec::new();

    for pair in pairs {
        let (Some(low), Some(high)) = (by_id.get(&pair.low), by_id.get(&pair.high)) else {
            issues.push(TrimError::DegenerateGeometry {
                entity: EntityRef::Talus(pair.low),
                reason: format!("pair references unknown talus #{} / #{}", pair.low, pair.high),
            });
            continue;
        };
        match build_strip(low, high, *pair) {
            Ok(strip) => strips.push(strip),
            Err(GeometryError::TooFewPoints { count, .. }) => {
                log::debug!(
                    "talus #{} / #{} enclose no band ({count} distinct ring points); no strip built",
                    pair.low,
                    pair.high
                );
            }
            Err(err) => {
                log::debug!("skipping strip for talus #{} / #{}: {err}", pair.low, pair.high);
                issues.push(TrimError::DegenerateGeometry {
                    entity: EntityRef::Talus(pair.low),
                    reason: format!("strip with talus #{}: {err}", pair.high),
                });
            }
        }
    }
    (strips, issues)
}
