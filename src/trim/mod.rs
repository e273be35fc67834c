//! Contour lines ("courbes") and their trimming against the mask.
//!
//! Trimming one courbe is independent of every other, which is what lets the
//! pipeline run one task per courbe on the worker pool. A task only reads the
//! shared [`TrimMask`] and owns the fragments it returns.

pub mod clip;

use std::fmt;

use crate::geometry::LineString;
use crate::ids::CourbeId;
use crate::mask::TrimMask;
use crate::trim_error::TrimError;

pub use clip::{ClipError, clip_polyline};

/// Contour category; the output writer re-emits fragments on the same layer.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CourbeLayer {
    Principale,
    Intermediaire,
    Secondaire,
}

impl CourbeLayer {
    pub const ALL: [CourbeLayer; 3] = [
        CourbeLayer::Principale,
        CourbeLayer::Intermediaire,
        CourbeLayer::Secondaire,
    ];

    /// CAD layer name the contour category is drawn on.
    pub fn cad_layer_name(self) -> &'static str {
        match self {
            CourbeLayer::Principale => "COURBES_DE_NIVEAU_PRINCIPALES",
            CourbeLayer::Intermediaire => "COURBES_DE_NIVEAU_INTERMEDIAIRES",
            CourbeLayer::Secondaire => "COURBES_DE_NIVEAU_SECONDAIRES",
        }
    }
}

impl fmt::Display for CourbeLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cad_layer_name())
    }
}

/// A validated contour line.
#[derive(Clone, Debug, PartialEq)]
pub struct Courbe {
    pub id: CourbeId,
    pub layer: CourbeLayer,
    pub line: LineString,
}

impl Courbe {
    pub fn new(id: CourbeId, layer: CourbeLayer, line: LineString) -> Self {
        Self { id, layer, line }
    }
}

/// One surviving piece of a courbe.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrimmedCourbe {
    /// The courbe this fragment was cut from.
    pub source: CourbeId,
    pub layer: CourbeLayer,
    pub line: LineString,
}

/// Trims `courbe` against `mask`.
///
/// A courbe that never meets the mask comes back as a single fragment equal
/// to its input; one entirely inside comes back empty.
pub fn trim_courbe(courbe: &Courbe, mask: &TrimMask, eps: f64) -> Result<Vec<TrimmedCourbe>, TrimError> {
    let parts = clip_polyline(courbe.line.points(), mask, eps).map_err(|e| TrimError::TaskFailure {
        id: courbe.id,
        reason: e.to_string(),
    })?;
    parts
        .into_iter()
        .map(|points| {
            LineString::new(points)
                .map(|line| TrimmedCourbe {
                    source: courbe.id,
                    layer: courbe.layer,
                    line,
                })
                .map_err(|e| TrimError::TaskFailure {
                    id: courbe.id,
                    reason: format!("fragment rejected: {e}"),
                })
        })
        .collect()
}
