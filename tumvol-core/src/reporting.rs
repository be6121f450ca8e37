//! Batch report generation.
//!
//! A [`BatchReport`] holds one row per sweep, carrying either the rounded
//! measurement together with the calibration it was taken with, or the
//! error that stopped the sweep. Reports are written as pretty-printed JSON.

use crate::error::CoreResult;
use crate::pipeline::Measurement;
use crate::processing::SweepOutcome;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Format of the timestamp embedded in report file names.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Ok,
    Failed,
}

/// One sweep's line in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub sweep: String,
    pub status: RowStatus,
    pub measured_at: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<Measurement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_thickness_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_to_mm_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&SweepOutcome> for ReportRow {
    fn from(outcome: &SweepOutcome) -> Self {
        let sweep = outcome.sweep.name.clone();
        let measured_at = outcome.measured_at;
        match &outcome.outcome {
            Ok(m) => Self {
                sweep,
                status: RowStatus::Ok,
                measured_at,
                measurement: Some(m.result.rounded()),
                frame_count: Some(m.result.frame_count),
                slice_thickness_mm: Some(m.calibration.slice_thickness_mm()),
                pixel_to_mm_ratio: Some(m.calibration.pixels_per_mm()),
                error: None,
            },
            Err(e) => Self {
                sweep,
                status: RowStatus::Failed,
                measured_at,
                measurement: None,
                frame_count: None,
                slice_thickness_mm: None,
                pixel_to_mm_ratio: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Summary of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Local>,
    pub rows: Vec<ReportRow>,
}

impl BatchReport {
    pub fn new(generated_at: DateTime<Local>, outcomes: &[SweepOutcome]) -> Self {
        Self {
            generated_at,
            rows: outcomes.iter().map(ReportRow::from).collect(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.rows.iter().filter(|r| r.status == RowStatus::Ok).count()
    }

    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }

    /// `tumour_volume_results_<YYYYMMDD_HHMMSS>.json`
    pub fn file_name(&self) -> String {
        format!(
            "tumour_volume_results_{}.json",
            self.generated_at.format(REPORT_TIMESTAMP_FORMAT)
        )
    }

    /// Writes the report into `dir` under [`BatchReport::file_name`].
    pub fn write_to_dir(&self, dir: &Path) -> CoreResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(path)
    }
}
