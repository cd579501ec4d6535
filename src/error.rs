use std::process;
use thiserror::Error;

/// Exit status used when the real implementation cannot be reached.
pub const FATAL_EXIT_STATUS: i32 = -1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShimError {
    #[error("Unable to open {library}: {reason}")]
    LibraryNotFound { library: String, reason: String },
    #[error("Unable to locate {symbol} function in {library}")]
    SymbolNotFound  { symbol: String, library: String },
}

/// Reports `err` and terminates the process.
///
/// A lookup that cannot reach the real implementation must never turn into
/// a "not found" answer, so there is no way back from here. The message goes
/// straight to stderr, once, whatever logger the host process has installed.
pub fn fatal(err: &ShimError) -> ! {
    eprintln!("{err}");
    process::exit(FATAL_EXIT_STATUS)
}

/// Unwraps `result` or terminates the process through [`fatal`].
pub fn or_exit<T>(result: Result<T, ShimError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => fatal(&err),
    }
}
