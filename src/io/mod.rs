//! Input/output boundary.
//!
//! The core never parses or writes CAD files itself. This module holds the
//! seams to the collaborators that do:
//! - [`CourbeSink`]: where finished fragments go once a run completes.
//! - [`json`]: a JSON reader for [`Record`](crate::dataset::Record)s and a
//!   JSON-lines fragment writer, handy for tooling and tests.
//! - [`layers`]: CAD layer-name classification, applied once at the boundary.

pub mod json;
pub mod layers;

pub use json::{JsonLinesSink, read_records};
pub use layers::{LayerClass, classify_layer};

use crate::trim::TrimmedCourbe;
use crate::trim_error::TrimError;

/// Receives the complete set of trimmed fragments at the end of a run.
///
/// The writer is expected to replace the original courbe entities wholesale
/// with these fragments, each on its `layer`.
pub trait CourbeSink {
    fn write_courbes(&mut self, fragments: &[TrimmedCourbe]) -> Result<(), TrimError>;
}

/// Collects fragments in memory.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub fragments: Vec<TrimmedCourbe>,
}

impl CourbeSink for VecSink {
    fn write_courbes(&mut self, fragments: &[TrimmedCourbe]) -> Result<(), TrimError> {
        self.fragments.extend_from_slice(fragments);
        Ok(())
    }
}
