//! Implementation of the 'sample' subcommand.

use crate::cli::SampleArgs;
use crate::error::CliResult;

use log::info;

/// Prints the frame indices to annotate, one per line on stdout.
pub fn run_sample(args: SampleArgs) -> CliResult<()> {
    let indices = tumvol_core::sample_frame_indices(args.start, args.end)?;
    info!(
        "Annotate {} of {} frames between {} and {}",
        indices.len(),
        u64::from(args.end) - u64::from(args.start) + 1,
        args.start,
        args.end
    );
    for index in indices {
        println!("{index}");
    }
    Ok(())
}
