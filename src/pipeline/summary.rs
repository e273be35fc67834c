//! Diagnostic summary of one pipeline run.

use std::fmt;
use std::time::Duration;

use crate::ids::{CourbeId, TalusId};
use crate::trim_error::TrimError;

/// Counts and recoverable issues gathered over a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub talus_lines: usize,
    pub pairs: usize,
    /// Talus lines of either side left without a partner.
    pub unpaired_talus: Vec<TalusId>,
    pub strips: usize,
    pub buildings: usize,
    pub mask_polygons: usize,
    pub courbes_in: usize,
    /// Courbes skipped at the input boundary as degenerate.
    pub courbes_skipped: usize,
    /// Courbes trimmed away entirely.
    pub courbes_dropped: Vec<CourbeId>,
    /// Courbes whose trim task failed.
    pub courbes_failed: Vec<CourbeId>,
    pub fragments_out: usize,
    /// Every recoverable issue, in the order it was found.
    pub issues: Vec<TrimError>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// Writes the summary through the `log` facade.
    pub fn log_report(&self) {
        log::info!("{self}");
        for issue in &self.issues {
            log::warn!("{issue}");
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "talus: {} lines, {} pairs, {} unpaired, {} strips | buildings: {} | mask: {} polygons | \
             courbes: {} in, {} skipped, {} dropped, {} failed, {} fragments out | {} issues in {:.2?}",
            self.talus_lines,
            self.pairs,
            self.unpaired_talus.len(),
            self.strips,
            self.buildings,
            self.mask_polygons,
            self.courbes_in,
            self.courbes_skipped,
            self.courbes_dropped.len(),
            self.courbes_failed.len(),
            self.fragments_out,
            self.issues.len(),
            self.elapsed
        )
    }
}
