// ============================================================================
// tumvol-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// This module implements the builder pattern for the CoreConfig structure,
// providing a fluent API for creating and configuring CoreConfig instances.
// Unset fields fall back to the same defaults as `CoreConfig::default()`,
// including the environment overrides.
//
// KEY COMPONENTS:
// - CoreConfigBuilder: Builder struct for creating CoreConfig instances
//
// AI-ASSISTANT-INFO: Builder pattern implementation for CoreConfig

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;
use crate::annotation::DuplicateFramePolicy;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use tumvol_core::annotation::DuplicateFramePolicy;
/// use tumvol_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/sweeps"))
///     .output_dir(PathBuf::from("/path/to/reports"))
///     .slice_thickness_mm(0.5)
///     .pixels_per_mm(10.0)
///     .duplicate_policy(DuplicateFramePolicy::Reject)
///     .build();
///
/// assert_eq!(config.slice_thickness_mm, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfigBuilder {
    // Required fields
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,

    // Optional fields with defaults
    slice_thickness_mm: Option<f64>,
    pixels_per_mm: Option<f64>,
    reference_length_mm: Option<f64>,
    duplicate_policy: Option<DuplicateFramePolicy>,
}

impl Default for CoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with nothing set.
    pub fn new() -> Self {
        Self {
            input_dir: None,
            output_dir: None,
            slice_thickness_mm: None,
            pixels_per_mm: None,
            reference_length_mm: None,
            duplicate_policy: None,
        }
    }

    /// Sets the directory holding one sub-directory per sweep.
    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.input_dir = Some(input_dir);
        self
    }

    /// Sets the directory where reports will be written.
    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Sets the default slice thickness in millimetres.
    pub fn slice_thickness_mm(mut self, slice_thickness_mm: f64) -> Self {
        self.slice_thickness_mm = Some(slice_thickness_mm);
        self
    }

    /// Sets the default pixel-to-mm ratio.
    pub fn pixels_per_mm(mut self, pixels_per_mm: f64) -> Self {
        self.pixels_per_mm = Some(pixels_per_mm);
        self
    }

    /// Sets the physical length of the calibration reference line.
    pub fn reference_length_mm(mut self, reference_length_mm: f64) -> Self {
        self.reference_length_mm = Some(reference_length_mm);
        self
    }

    /// Sets how repeated frame indices are handled.
    pub fn duplicate_policy(mut self, policy: DuplicateFramePolicy) -> Self {
        self.duplicate_policy = Some(policy);
        self
    }

    /// Builds the CoreConfig. Call [`CoreConfig::validate`] before use.
    pub fn build(self) -> CoreConfig {
        let defaults = CoreConfig::default();
        CoreConfig {
            input_dir: self.input_dir.unwrap_or(defaults.input_dir),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            slice_thickness_mm: self.slice_thickness_mm.unwrap_or(defaults.slice_thickness_mm),
            pixels_per_mm: self.pixels_per_mm.or(defaults.pixels_per_mm),
            reference_length_mm: self
                .reference_length_mm
                .unwrap_or(defaults.reference_length_mm),
            duplicate_policy: self.duplicate_policy.unwrap_or(defaults.duplicate_policy),
        }
    }
}
