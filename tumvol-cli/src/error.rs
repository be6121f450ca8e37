// tumvol-cli/src/error.rs
//
// Result alias for the command handlers and a helper that prefixes a failure
// with what the command was doing when it happened.

use tumvol_core::{CoreError, CoreResult};

use std::fmt;

/// Command handlers report failures as core errors.
pub type CliResult<T> = CoreResult<T>;

/// Prefixes a failure with a lazily built message, keeping the source error's text.
pub trait CliErrorContext<T> {
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}
