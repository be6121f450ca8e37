// ============================================================================
// tumvol-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Measurement Pipeline
//
// This module defines the single error enum used throughout tumvol-core and
// the `CoreResult` alias returned by every fallible operation.
//
// KEY COMPONENTS:
// - CoreError: All failure modes of loading, geometry, metrics and batch runs
// - CoreResult: Result alias used across the crate and by tumvol-cli
//
// Every error is terminal for the sweep being measured. Batch processing
// records the failure and moves on to the next sweep.
//
// AI-ASSISTANT-INFO: Error types for the tumvol-core library

use thiserror::Error;

/// Errors produced by tumvol-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An annotation identifier or record could not be decoded into a frame
    /// index or a point sequence.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Too few points or non-finite coordinates.
    #[error("Malformed annotation '{identifier}': {reason}")]
    MalformedAnnotation { identifier: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("Duplicate annotation for frame {0}")]
    DuplicateFrame(u32),

    #[error("Invalid session transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No annotation files found")]
    NoFilesFound,

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for tumvol-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
