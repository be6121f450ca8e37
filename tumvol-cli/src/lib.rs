// tumvol-cli/src/lib.rs
//
// Library portion of the tumvol CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{BatchArgs, Cli, Commands, MeasureArgs, NormalizeArgs, ReferenceLine, SampleArgs};
pub use commands::{run_batch, run_measure, run_normalize, run_sample};
