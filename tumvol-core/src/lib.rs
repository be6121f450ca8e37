//! Core library for estimating tumour volume from annotated sweep frames.
//!
//! This crate turns a sparse set of closed contours, each drawn on one frame
//! of an ultrasound or endoscopic sweep, into per-frame metrics (area, width,
//! depth) and a trapezoidal volume estimate in physical units.
//!
//! Pipeline: annotation loader -> per-frame metrics -> cross-frame
//! aggregation and volume integration. Data only flows forward.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tumvol_core::{Calibration, DuplicateFramePolicy, load_annotation_dir, measure};
//! use std::path::Path;
//!
//! let calibration = Calibration::new(12.4, 0.5).unwrap();
//! let annotations =
//!     load_annotation_dir(Path::new("/path/to/annotations"), DuplicateFramePolicy::Overwrite)
//!         .unwrap();
//!
//! let result = measure(&annotations, &calibration).unwrap();
//! println!("{:?}", result.rounded());
//! ```

pub mod aggregate;
pub mod annotation;
pub mod calibration;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod metrics;
pub mod pipeline;
pub mod processing;
pub mod reporting;
pub mod sampling;
pub mod session;
pub mod utils;
pub mod volume;

// Re-exports for public API
pub use aggregate::{DimensionSummary, aggregate_frame_metrics, sweep_length_mm};
pub use annotation::{Annotation, AnnotationRecord, AnnotationSet, DuplicateFramePolicy};
pub use calibration::{Calibration, CalibrationRecord, DEFAULT_REFERENCE_LENGTH_MM};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use geometry::{Point, close_polygon, polygon_area, resample_polygon};
pub use loader::{
    AnnotationSource, FileAnnotationSource, InMemorySource, find_annotation_files,
    load_annotation_dir, load_annotations, write_annotation,
};
pub use metrics::{FrameMetrics, compute_frame_metrics};
pub use pipeline::{Measurement, VolumeResult, measure, measure_sources};
pub use processing::{
    NoopObserver, SweepInput, SweepObserver, SweepOutcome, find_sweep_dirs, process_sweeps,
};
pub use reporting::BatchReport;
pub use sampling::sample_frame_indices;
pub use session::{AnnotationSession, SessionState};
pub use utils::{format_mm, format_volume, round3};
pub use volume::{VolumeEstimate, integrate_volume};
