//! # talus-trim
//!
//! talus-trim removes the parts of terrain contour lines ("courbes de niveau")
//! that run through buildings, through talus strips, or too close to talus
//! lines. Talus (embankment) lines come in LOW/HIGH pairs; the ground between a
//! paired top and bottom edge is drawn as a strip, and contours crossing it
//! would be misleading.
//!
//! ## Pipeline
//! 1. **Pairing** ([`talus::pair_talus`]): each LOW line is matched to at most
//!    one HIGH line by representative-point distance, using a static
//!    [`index::KdTree`] and a global greedy matching.
//! 2. **Strips** ([`talus::build_strips`]): each pair becomes a closed polygon.
//! 3. **Mask** ([`mask::compose_mask`]): strips, building footprints and
//!    buffered talus corridors form one read-only [`mask::TrimMask`].
//! 4. **Trimming** ([`trim::trim_courbe`]): every courbe is clipped against the
//!    mask on a rayon pool, one task per courbe.
//! 5. **Output**: fragments are handed to an [`io::CourbeSink`] once every task
//!    has finished.
//!
//! [`pipeline::Pipeline`] runs all of it and reports a
//! [`pipeline::RunSummary`].
//!
//! ## Determinism
//!
//! Pairing breaks distance ties by identifier and fragments are returned in
//! input order, so the same input and configuration give the same output
//! regardless of the worker count.
//!
//! ## Usage
//!
//! ```no_run
//! use talus_trim::prelude::*;
//!
//! # fn main() -> Result<(), TrimError> {
//! let records = talus_trim::io::read_records(std::fs::File::open("site.json")?)?;
//! let dataset = Dataset::from_records(records)?;
//! let pipeline = Pipeline::new(TrimConfig::default())?;
//! let mut sink = JsonLinesSink::new(std::io::stdout());
//! let summary = pipeline.run(&dataset, &mut sink)?;
//! eprintln!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod geometry;
pub mod ids;
pub mod index;
pub mod io;
pub mod mask;
pub mod pipeline;
pub mod talus;
pub mod trim;
pub mod trim_error;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::dataset::{Building, BuildingGeometry, BuildingShape, Dataset, Record};
    pub use crate::geometry::{BBox, LineString, Location, Point2D, Polygon};
    pub use crate::ids::{BuildingId, CourbeId, EntityRef, TalusId};
    pub use crate::io::{CourbeSink, JsonLinesSink, VecSink};
    pub use crate::mask::{MaskSource, TrimMask};
    pub use crate::pipeline::{Pipeline, RunOutput, RunSummary, TrimConfig};
    pub use crate::talus::{TalusLine, TalusPair, TalusSide};
    pub use crate::trim::{Courbe, CourbeLayer, TrimmedCourbe};
    pub use crate::trim_error::TrimError;
}
