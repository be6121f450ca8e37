// ============================================================================
// tumvol-core/src/processing.rs
// ============================================================================
//
// BATCH PROCESSING: Measuring Many Sweeps in One Run
//
// This module houses the batch orchestration of the tumvol-core library. A
// batch input directory holds one sub-directory per sweep; each sweep
// directory holds `frame_<index>.json` annotations and, optionally, a
// `calibration.json` record.
//
// KEY COMPONENTS:
// - find_sweep_dirs: Discovery of sweep directories
// - resolve_calibration: Per-sweep record, falling back to config defaults
// - process_sweeps: Main entry point, one SweepOutcome per sweep
// - SweepObserver: Hook for progress display
//
// WORKFLOW:
// For each sweep:
//    a. Resolve its calibration (fails before any metric is computed)
//    b. Load its annotations
//    c. Run the measurement pipeline
//    d. Record success or failure and continue with the next sweep
//
// AI-ASSISTANT-INFO: Batch measurement orchestration

// ---- Internal crate imports ----
use crate::calibration::{Calibration, CalibrationRecord};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::loader::{CALIBRATION_FILE_NAME, find_annotation_files, load_annotation_dir};
use crate::pipeline::{VolumeResult, measure};
use crate::utils::display_name;

// ---- External crate imports ----
use chrono::{DateTime, Local};
use log::{debug, error, info};

// ---- Standard library imports ----
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// TYPES
// ============================================================================

/// One sweep directory to be measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepInput {
    pub name: String,
    pub dir: PathBuf,
}

impl SweepInput {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            name: display_name(&dir),
            dir,
        }
    }
}

/// A successfully measured sweep.
#[derive(Debug, Clone)]
pub struct SweepMeasurement {
    pub calibration: Calibration,
    pub result: VolumeResult,
}

/// The outcome of measuring one sweep in a batch.
#[derive(Debug)]
pub struct SweepOutcome {
    pub sweep: SweepInput,
    /// When the sweep finished, successfully or not.
    pub measured_at: DateTime<Local>,
    pub outcome: CoreResult<SweepMeasurement>,
}

impl SweepOutcome {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Receives progress events during [`process_sweeps`].
pub trait SweepObserver {
    fn sweep_started(&self, _index: usize, _total: usize, _sweep: &SweepInput) {}
    fn sweep_finished(&self, _outcome: &SweepOutcome) {}
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl SweepObserver for NoopObserver {}

// ============================================================================
// DISCOVERY
// ============================================================================

/// Finds sub-directories of `input_dir` holding at least one annotation file.
pub fn find_sweep_dirs(input_dir: &Path) -> CoreResult<Vec<SweepInput>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.is_dir() && find_annotation_files(&path).is_ok() {
                Some(path)
            } else {
                None
            }
        })
        .collect();

    if dirs.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    dirs.sort();
    Ok(dirs.into_iter().map(SweepInput::new).collect())
}

// ============================================================================
// CALIBRATION
// ============================================================================

/// Calibration for the sweep in `dir`.
///
/// A `calibration.json` record wins over the configured ratio; its slice
/// thickness, when present, wins over the configured thickness.
pub fn resolve_calibration(config: &CoreConfig, dir: &Path) -> CoreResult<Calibration> {
    let record_path = dir.join(CALIBRATION_FILE_NAME);
    if record_path.is_file() {
        let record = CalibrationRecord::read(&record_path)?;
        let thickness = record
            .slice_thickness_mm
            .unwrap_or(config.slice_thickness_mm);
        debug!(
            "Using calibration record {}: {} px/mm, {} mm slices",
            record_path.display(),
            record.pixel_to_mm_ratio,
            thickness
        );
        return Calibration::new(record.pixel_to_mm_ratio, thickness);
    }

    config.default_calibration().unwrap_or_else(|| {
        Err(CoreError::InvalidCalibration(format!(
            "no {} in {} and no default pixel-to-mm ratio configured",
            CALIBRATION_FILE_NAME,
            dir.display()
        )))
    })
}

// ============================================================================
// MAIN PROCESSING FUNCTION
// ============================================================================

/// Measures a single sweep directory.
pub fn process_sweep(config: &CoreConfig, sweep: &SweepInput) -> CoreResult<SweepMeasurement> {
    let calibration = resolve_calibration(config, &sweep.dir)?;
    let annotations = load_annotation_dir(&sweep.dir, config.duplicate_policy)?;
    let result = measure(&annotations, &calibration)?;
    Ok(SweepMeasurement {
        calibration,
        result,
    })
}

/// Measures every sweep in order.
///
/// A failing sweep is logged and recorded; it never stops the remaining
/// sweeps from being measured.
pub fn process_sweeps<O: SweepObserver>(
    config: &CoreConfig,
    sweeps: &[SweepInput],
    observer: &O,
) -> Vec<SweepOutcome> {
    let total = sweeps.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, sweep) in sweeps.iter().enumerate() {
        observer.sweep_started(index, total, sweep);
        info!("Processing {}...", sweep.name);

        let outcome = process_sweep(config, sweep);
        match &outcome {
            Ok(m) => info!(
                "{}: {:.3} mm³ over {} frames",
                sweep.name, m.result.volume_mm3, m.result.frame_count
            ),
            Err(e) => error!("{}: {}. Skipping sweep.", sweep.name, e),
        }

        let outcome = SweepOutcome {
            sweep: sweep.clone(),
            measured_at: Local::now(),
            outcome,
        };
        observer.sweep_finished(&outcome);
        outcomes.push(outcome);
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    info!("Measured {} of {} sweeps", total - failed, total);
    outcomes
}
