//! Pipeline orchestrator.
//!
//! One run executes each phase exactly once, in order:
//! 1. pair LOW and HIGH talus lines (KD-tree + global greedy matching),
//! 2. build a strip polygon per pair,
//! 3. compose the trimming mask from strips, buildings and talus corridors,
//! 4. trim every courbe against the mask on the worker pool, one task per
//!    courbe,
//! 5. merge the per-task results after all tasks have finished.
//!
//! Phases 1–3 are serial. Phase 4 shares the mask by reference; tasks never
//! see each other's output. A failing task loses only its own courbe's
//! fragments; a mask that cannot be built aborts the run.

pub mod config;
pub mod summary;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::ThreadPool;
use rayon::prelude::*;

use crate::dataset::Dataset;
use crate::io::CourbeSink;
use crate::mask::compose_mask;
use crate::talus::{build_strips, pair_talus};
use crate::trim::{Courbe, TrimmedCourbe, trim_courbe};
use crate::trim_error::TrimError;

pub use config::TrimConfig;
pub use summary::RunSummary;

/// Everything a run produces.
#[derive(Clone, Debug, Default)]
pub struct RunOutput {
    /// Surviving fragments, grouped by courbe in input order.
    pub fragments: Vec<TrimmedCourbe>,
    pub summary: RunSummary,
}

type TaskResult = Result<Vec<TrimmedCourbe>, TrimError>;

/// Runs the trimming pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: TrimConfig,
}

impl Pipeline {
    pub fn new(config: TrimConfig) -> Result<Self, TrimError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    /// Runs every phase and returns fragments plus the diagnostic summary.
    pub fn process(&self, dataset: &Dataset) -> Result<RunOutput, TrimError> {
        let started = Instant::now();
        let cfg = &self.config;
        let mut summary = RunSummary {
            talus_lines: dataset.talus.len(),
            buildings: dataset.buildings.len(),
            courbes_skipped: dataset.skipped_courbes(),
            courbes_in: dataset.courbes.len() + dataset.skipped_courbes(),
            issues: dataset.issues.clone(),
            ..Default::default()
        };

        let phase = Instant::now();
        let pairing = pair_talus(&dataset.talus, cfg.max_pair_distance);
        for &(id, side) in &pairing.unpaired {
            summary.unpaired_talus.push(id);
            summary.issues.push(TrimError::PairingDeficit {
                id,
                side,
                max_distance: cfg.max_pair_distance,
            });
        }
        summary.pairs = pairing.pairs.len();
        log::info!(
            "paired {} talus lines into {} pairs ({} unpaired) in {:.2?}",
            dataset.talus.len(),
            pairing.pairs.len(),
            pairing.unpaired.len(),
            phase.elapsed()
        );

        let phase = Instant::now();
        let (strips, strip_issues) = build_strips(&dataset.talus, &pairing.pairs);
        summary.strips = strips.len();
        summary.issues.extend(strip_issues);
        log::info!("built {} strips in {:.2?}", strips.len(), phase.elapsed());

        let phase = Instant::now();
        let mask = compose_mask(strips, &dataset.buildings, &dataset.talus, &cfg.mask_params())?;
        summary.mask_polygons = mask.len();
        log::info!("composed mask of {} polygons in {:.2?}", mask.len(), phase.elapsed());

        let phase = Instant::now();
        let pool = build_pool(cfg.workers)?;
        let eps = cfg.epsilon;
        let results = run_tasks(&pool, &dataset.courbes, |c| trim_courbe(c, &mask, eps));

        let mut fragments = Vec::with_capacity(dataset.courbes.len());
        for (courbe, result) in dataset.courbes.iter().zip(results) {
            match result {
                Ok(parts) if parts.is_empty() => summary.courbes_dropped.push(courbe.id),
                Ok(parts) => fragments.extend(parts),
                Err(err) => {
                    summary.courbes_failed.push(courbe.id);
                    summary.issues.push(err);
                }
            }
        }
        summary.fragments_out = fragments.len();
        log::info!(
            "trimmed {} courbes into {} fragments on {} workers in {:.2?}",
            dataset.courbes.len(),
            fragments.len(),
            pool.current_num_threads(),
            phase.elapsed()
        );

        summary.elapsed = started.elapsed();
        summary.log_report();
        Ok(RunOutput { fragments, summary })
    }

    /// Runs the pipeline and hands the fragments to `sink`.
    ///
    /// Nothing is written unless every phase, and every trim task, has
    /// finished.
    pub fn run<S>(&self, dataset: &Dataset, sink: &mut S) -> Result<RunSummary, TrimError>
    where
        S: CourbeSink + ?Sized,
    {
        let output = self.process(dataset)?;
        sink.write_courbes(&output.fragments)?;
        Ok(output.summary)
    }
}

fn build_pool(workers: usize) -> Result<ThreadPool, TrimError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("trim-{i}"))
        .build()
        .map_err(|e| TrimError::WorkerPool(e.to_string()))
}

/// Runs `task` once per courbe on `pool` and waits for all of them.
///
/// Results come back in input order. A panicking task is turned into a
/// [`TrimError::TaskFailure`] for its courbe; its siblings are unaffected.
fn run_tasks<F>(pool: &ThreadPool, courbes: &[Courbe], task: F) -> Vec<TaskResult>
where
    F: Fn(&Courbe) -> TaskResult + Sync,
{
    pool.install(|| {
        courbes
            .par_iter()
            .map(|c| {
                panic::catch_unwind(AssertUnwindSafe(|| task(c))).unwrap_or_else(|payload| {
                    Err(TrimError::TaskFailure {
                        id: c.id,
                        reason: panic_message(payload.as_ref()),
                    })
                })
            })
            .collect()
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
