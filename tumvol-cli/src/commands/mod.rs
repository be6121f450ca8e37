//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Measures a single sweep directory.
pub mod measure;

/// Measures many sweeps and writes a JSON report.
pub mod batch;

pub mod normalize;
pub mod sample;

pub use batch::run_batch;
pub use measure::run_measure;
pub use normalize::run_normalize;
pub use sample::run_sample;
