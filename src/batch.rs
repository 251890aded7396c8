//! Multi-input processing
//!
//! Runs the stream driver over stdin or a list of files, one input at a time,
//! all writing to the same output.

use crate::cancel::Cancellation;
use crate::driver::{self, RunSummary};
use crate::error::{Result, RevError};
use crate::reverse::ReversalPolicy;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a run reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for InputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSpec::Stdin => write!(f, "<stdin>"),
            InputSpec::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Turn positional arguments into inputs; none means stdin, `-` is stdin
pub fn inputs_from_args(files: &[PathBuf]) -> Vec<InputSpec> {
    if files.is_empty() {
        return vec![InputSpec::Stdin];
    }

    files
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                InputSpec::Stdin
            } else {
                InputSpec::File(path.clone())
            }
        })
        .collect()
}

/// Totals across every input of an invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub inputs: usize,
    pub totals: RunSummary,
}

/// Process `inputs` in order, stopping the whole batch at the first error
///
/// Files are opened just before they are processed, so a missing file late
/// in the list fails only after the earlier inputs were written.
pub fn process_inputs<S, W, C>(
    inputs: &[InputSpec],
    mut stdin: S,
    mut output: W,
    policy: ReversalPolicy,
    cancel: &C,
) -> Result<BatchSummary>
where
    S: BufRead,
    W: Write,
    C: Cancellation + ?Sized,
{
    let mut batch = BatchSummary::default();

    for input in inputs {
        if cancel.is_cancelled() {
            return Err(RevError::Cancelled { line: 0 });
        }

        debug!("Processing {}", input);
        let summary = match input {
            InputSpec::Stdin => driver::run(&mut stdin, &mut output, policy, cancel)?,
            InputSpec::File(path) => {
                let reader = open_input(path)?;
                driver::run(reader, &mut output, policy, cancel)?
            }
        };

        batch.inputs += 1;
        batch.totals.absorb(summary);
    }

    info!(
        "Processed {} input(s), {} lines",
        batch.inputs, batch.totals.lines
    );
    Ok(batch)
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| RevError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::{CancelToken, Never};
    use std::fs;
    use std::io;
    use tempfile::TempDir;

    #[test]
    fn test_inputs_from_args() {
        assert_eq!(inputs_from_args(&[]), vec![InputSpec::Stdin]);

        let args = vec![PathBuf::from("a.txt"), PathBuf::from("-"), PathBuf::from("b.txt")];
        assert_eq!(
            inputs_from_args(&args),
            vec![
                InputSpec::File(PathBuf::from("a.txt")),
                InputSpec::Stdin,
                InputSpec::File(PathBuf::from("b.txt")),
            ]
        );
    }

    #[test]
    fn test_stdin_input() {
        let mut out = Vec::new();
        let batch = process_inputs(
            &[InputSpec::Stdin],
            &b"hello\n"[..],
            &mut out,
            ReversalPolicy::WholeLine,
            &Never,
        )
        .unwrap();

        assert_eq!(out, b"olleh\n");
        assert_eq!(batch.inputs, 1);
        assert_eq!(batch.totals.lines, 1);
    }

    #[test]
    fn test_files_processed_in_order() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, "abc\ndef\n").unwrap();
        fs::write(&second, "hello world").unwrap();

        let inputs = inputs_from_args(&[first, second]);
        let mut out = Vec::new();
        let batch = process_inputs(&inputs, io::empty(), &mut out, ReversalPolicy::PerWord, &Never).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "cba\nfed\nolleh dlrow\n");
        assert_eq!(batch.inputs, 2);
        assert_eq!(batch.totals.lines, 3);
    }

    #[test]
    fn test_missing_file_fails_invocation() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("present.txt");
        let missing = dir.path().join("missing.txt");
        fs::write(&present, "abc\n").unwrap();

        let inputs = inputs_from_args(&[present, missing.clone()]);
        let mut out = Vec::new();
        let err = process_inputs(&inputs, io::empty(), &mut out, ReversalPolicy::WholeLine, &Never).unwrap_err();

        match err {
            RevError::OpenFailed { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected OpenFailed, got {:?}", other),
        }
        assert_eq!(out, b"cba\n");
    }

    #[test]
    fn test_cancelled_before_opening() {
        let token = CancelToken::new();
        token.cancel();
        let inputs = inputs_from_args(&[PathBuf::from("/nonexistent/never-opened.txt")]);

        let err = process_inputs(&inputs, io::empty(), Vec::new(), ReversalPolicy::WholeLine, &token).unwrap_err();

        assert!(err.is_cancelled());
    }

    #[test]
    fn test_input_display() {
        assert_eq!(InputSpec::Stdin.to_string(), "<stdin>");
        assert_eq!(InputSpec::File(PathBuf::from("notes.txt")).to_string(), "notes.txt");
    }
}
