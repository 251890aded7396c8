//! Error types for RevX
//!
//! Every failure is terminal for the run that produced it. Nothing is retried
//! and no line is skipped; the caller decides how to present the error.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Exit status used when a run is interrupted (128 + SIGINT)
pub const EXIT_CANCELLED: u8 = 130;

/// Exit status for every other failure
pub const EXIT_FAILURE: u8 = 1;

pub type Result<T> = std::result::Result<T, RevError>;

#[derive(Debug, Error)]
pub enum RevError {
    /// The input could not be read or was not valid UTF-8
    #[error("failed to read line {line}: {source}")]
    ReadFailed {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// The output rejected a write or a flush
    #[error("failed to write output: {source}")]
    WriteFailed {
        #[source]
        source: io::Error,
    },

    /// Cancellation was observed before `line` was written
    ///
    /// `line` is 0 when the signal arrived between inputs.
    #[error("operation cancelled at line {line}")]
    Cancelled { line: usize },

    /// A named input file could not be opened
    #[error("{}", open_error_message(.path, .source))]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RevError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RevError::Cancelled { .. })
    }

    /// True when the reader of our output went away (e.g. `revx file | head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, RevError::WriteFailed { source } if source.kind() == io::ErrorKind::BrokenPipe)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            RevError::Cancelled { .. } => EXIT_CANCELLED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Build an actionable message for a file that could not be opened
fn open_error_message(path: &Path, err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => format!(
            "File not found: '{}'\n\n\
             Possible fixes:\n\
             1. Check the file path is correct\n\
             2. Use an absolute path if the relative path is ambiguous\n\
             3. Use '-' or no file arguments to read from stdin",
            path.display()
        ),
        io::ErrorKind::PermissionDenied => format!(
            "Permission denied when opening '{}'\n\n\
             Possible fixes:\n\
             1. Check file permissions: ls -l '{}'\n\
             2. Grant read access with: chmod u+r '{}'",
            path.display(),
            path.display(),
            path.display()
        ),
        _ => format!("Failed to open '{}': {}", path.display(), err),
    }
}
