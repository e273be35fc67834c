//! Input boundary: typed records in, validated entities out.
//!
//! The parsing collaborator classifies CAD entities once, into the closed
//! [`Record`] enum; nothing downstream ever looks at layer-name strings.
//! [`Dataset::from_records`] validates geometry, skips and reports degenerate
//! entities, and refuses duplicate identifiers within a kind.
//!
//! Buildings arrive either as closed footprints or as open outlines (a wall
//! drawn as a polyline or a single line). Outlines stay lines; the mask
//! buffers them instead of closing them into polygons.

use hashbrown::HashSet;

use crate::geometry::{GeometryError, LineString, Point2D, Polygon};
use crate::ids::{BuildingId, CourbeId, EntityRef, TalusId};
use crate::talus::{TalusLine, TalusSide};
use crate::trim::{Courbe, CourbeLayer};
use crate::trim_error::TrimError;

/// How a building was drawn.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BuildingShape {
    /// A closed ring.
    #[default]
    Footprint,
    /// An open polyline.
    Outline,
}

/// One raw input entity, already classified by the parser.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Building {
        id: BuildingId,
        #[serde(default)]
        category: String,
        #[serde(default)]
        shape: BuildingShape,
        points: Vec<Point2D>,
    },
    Talus {
        id: TalusId,
        side: TalusSide,
        points: Vec<Point2D>,
    },
    Courbe {
        id: CourbeId,
        layer: CourbeLayer,
        points: Vec<Point2D>,
    },
}

impl Record {
    pub fn entity(&self) -> EntityRef {
        match self {
            Record::Building { id, .. } => EntityRef::Building(*id),
            Record::Talus { id, .. } => EntityRef::Talus(*id),
            Record::Courbe { id, .. } => EntityRef::Courbe(*id),
        }
    }
}

/// Validated building geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildingGeometry {
    Footprint(Polygon),
    Outline(LineString),
}

/// A building. The category label is carried through untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub id: BuildingId,
    pub category: String,
    pub geometry: BuildingGeometry,
}

/// Validated input for one pipeline run.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub buildings: Vec<Building>,
    pub talus: Vec<TalusLine>,
    pub courbes: Vec<Courbe>,
    /// Entities skipped during validation.
    pub issues: Vec<TrimError>,
}

fn degenerate(entity: EntityRef, err: GeometryError) -> TrimError {
    TrimError::DegenerateGeometry {
        entity,
        reason: err.to_string(),
    }
}

impl Dataset {
    /// Validates `records` in order.
    ///
    /// Degenerate geometry is skipped and recorded in [`Dataset::issues`];
    /// a repeated identifier within a kind fails the whole dataset.
    pub fn from_records<I>(records: I) -> Result<Self, TrimError>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut ds = Dataset::default();
        let mut seen: HashSet<EntityRef> = HashSet::new();

        for record in records {
            let entity = record.entity();
            if !seen.insert(entity) {
                return Err(TrimError::DuplicateId(entity));
            }
            match record {
                Record::Building {
                    id,
                    category,
                    shape,
                    points,
                } => {
                    let geometry = match shape {
                        BuildingShape::Footprint => Polygon::new(points).map(BuildingGeometry::Footprint),
                        BuildingShape::Outline => LineString::new(points).map(BuildingGeometry::Outline),
                    };
                    match geometry {
                        Ok(geometry) => ds.buildings.push(Building {
                            id,
                            category,
                            geometry,
                        }),
                        Err(e) => ds.skip(degenerate(entity, e)),
                    }
                }
                Record::Talus { id, side, points } => match LineString::new(points) {
                    Ok(line) => ds.talus.push(TalusLine::new(id, side, line)),
                    Err(e) => ds.skip(degenerate(entity, e)),
                },
                Record::Courbe { id, layer, points } => match LineString::new(points) {
                    Ok(line) => ds.courbes.push(Courbe::new(id, layer, line)),
                    Err(e) => ds.skip(degenerate(entity, e)),
                },
            }
        }
        Ok(ds)
    }

    fn skip(&mut self, issue: TrimError) {
        log::debug!("skipping input entity: {issue}");
        self.issues.push(issue);
    }

    /// Courbes skipped as degenerate at the input boundary.
    pub fn skipped_courbes(&self) -> usize {
        self.issues
            .iter()
            .filter(|e| matches!(e.entity(), Some(EntityRef::Courbe(_))))
            .count()
    }
}
