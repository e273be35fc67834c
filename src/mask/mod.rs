//! The trimming mask: every region contour lines must not cross.
//!
//! The compositor gathers three kinds of polygons into one read-only set:
//! - strips between paired talus lines,
//! - building footprints (optionally grown by a margin) and corridors around
//!   open building outlines,
//! - corridors around every talus line, paired or not.
//!
//! The set is not merged into a single region; a point is masked when it is
//! inside, or within the boundary tolerance of, any member polygon. A
//! uniform grid over the members' bounding boxes keeps lookups local.
//!
//! Once built, a [`TrimMask`] is never mutated and is shared by reference
//! with every trim task.

mod grid;

use crate::dataset::{Building, BuildingGeometry};
use crate::geometry::{BBox, GeometryError, Location, Point2D, Polygon, buffer_line, buffer_ring};
use crate::ids::{BuildingId, EntityRef, TalusId};
use crate::talus::{Strip, TalusLine};
use crate::trim_error::TrimError;

use grid::GridIndex;

/// Where a mask polygon came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaskSource {
    Strip { low: TalusId, high: TalusId },
    Building(BuildingId),
    Corridor(TalusId),
}

/// One member polygon of the mask.
#[derive(Clone, Debug)]
pub struct MaskPolygon {
    pub polygon: Polygon,
    pub source: MaskSource,
}

/// Widths used when composing the mask.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaskParams {
    /// Half-width of the corridor around each talus line.
    pub corridor_half_width: f64,
    /// Talus lines not longer than this get no corridor.
    pub min_corridor_length: f64,
    /// Outward growth applied to building footprints.
    pub building_margin: f64,
    /// Half-width of the corridor around an open building outline.
    pub outline_half_width: f64,
    /// Arc steps per quarter turn for round joins.
    pub join_segments: usize,
}

/// Immutable polygon set with a spatial lookup.
#[derive(Clone, Debug)]
pub struct TrimMask {
    polygons: Vec<MaskPolygon>,
    grid: GridIndex,
}

impl TrimMask {
    /// Indexes `polygons` as they are; no buffering or validation.
    pub fn from_polygons(polygons: Vec<MaskPolygon>) -> Self {
        let boxes: Vec<BBox> = polygons.iter().map(|m| m.polygon.bbox()).collect();
        let grid = GridIndex::build(&boxes);
        Self { polygons, grid }
    }

    pub fn polygons(&self) -> &[MaskPolygon] {
        &self.polygons
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn strip_count(&self) -> usize {
        self.count(|s| matches!(s, MaskSource::Strip { .. }))
    }

    pub fn building_count(&self) -> usize {
        self.count(|s| matches!(s, MaskSource::Building(_)))
    }

    pub fn corridor_count(&self) -> usize {
        self.count(|s| matches!(s, MaskSource::Corridor(_)))
    }

    fn count(&self, pred: impl Fn(&MaskSource) -> bool) -> usize {
        self.polygons.iter().filter(|m| pred(&m.source)).count()
    }

    /// Member polygons whose bounding box meets `query`.
    pub fn candidates<'a>(&'a self, query: &BBox) -> impl Iterator<Item = &'a MaskPolygon> + 'a {
        let query = *query;
        self.grid
            .query(&query)
            .into_iter()
            .map(move |i| &self.polygons[i])
            .filter(move |m| m.polygon.bbox().intersects(&query))
    }

    /// Location of `p` relative to the union of all member polygons.
    pub fn locate(&self, p: Point2D, eps: f64) -> Location {
        let around = BBox { min: p, max: p }.expanded(eps);
        let mut on_boundary = false;
        for m in self.candidates(&around) {
            match m.polygon.locate(p, eps) {
                Location::Inside => return Location::Inside,
                Location::Boundary => on_boundary = true,
                Location::Outside => {}
            }
        }
        if on_boundary {
            Location::Boundary
        } else {
            Location::Outside
        }
    }

    /// `true` when `p` is farther than `eps` from every member and inside none.
    #[inline]
    pub fn is_outside(&self, p: Point2D, eps: f64) -> bool {
        self.locate(p, eps) == Location::Outside
    }
}

fn mask_failure(entity: EntityRef, err: GeometryError) -> TrimError {
    TrimError::MaskConstruction {
        entity,
        reason: err.to_string(),
    }
}

/// Composes the mask from strips, buildings and talus corridors.
///
/// Strips are taken by value: the mask owns them from here on. Any buffer
/// that cannot be formed is fatal, since every trim task needs this mask.
pub fn compose_mask(
    strips: Vec<Strip>,
    buildings: &[Building],
    talus: &[TalusLine],
    params: &MaskParams,
) -> Result<TrimMask, TrimError> {
    let mut polygons = Vec::with_capacity(strips.len() + buildings.len() + talus.len() * 2);

    for strip in strips {
        polygons.push(MaskPolygon {
            source: MaskSource::Strip {
                low: strip.pair.low,
                high: strip.pair.high,
            },
            polygon: strip.polygon,
        });
    }

    for building in buildings {
        let source = MaskSource::Building(building.id);
        let pieces = match &building.geometry {
            BuildingGeometry::Footprint(footprint) if params.building_margin > 0.0 => {
                buffer_ring(footprint, params.building_margin, params.join_segments)
            }
            BuildingGeometry::Footprint(footprint) => Ok(vec![footprint.clone()]),
            BuildingGeometry::Outline(line) => {
                buffer_line(line, params.outline_half_width, params.join_segments)
            }
        }
        .map_err(|e| mask_failure(EntityRef::Building(building.id), e))?;
        if pieces.is_empty() {
            log::debug!("building #{} adds nothing to the mask", building.id);
        }
        polygons.extend(pieces.into_iter().map(|polygon| MaskPolygon { polygon, source }));
    }

    let mut short = 0usize;
    for t in talus {
        if t.line.length() <= params.min_corridor_length {
            short += 1;
            log::debug!("talus #{} too short for a corridor", t.id);
            continue;
        }
        let pieces = buffer_line(&t.line, params.corridor_half_width, params.join_segments)
            .map_err(|e| mask_failure(EntityRef::Talus(t.id), e))?;
        let source = MaskSource::Corridor(t.id);
        polygons.extend(pieces.into_iter().map(|polygon| MaskPolygon { polygon, source }));
    }

    let mask = TrimMask::from_polygons(polygons);
    log::debug!(
        "mask: {} strip, {} building, {} corridor polygons ({} short talus lines skipped)",
        mask.strip_count(),
        mask.building_count(),
        mask.corridor_count(),
        short
    );
    Ok(mask)
}
