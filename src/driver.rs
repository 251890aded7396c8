//! Stream driver
//!
//! Reads one line, reverses it, writes it, then moves on. Lines are handled
//! strictly in input order and nothing is read ahead, so memory stays bounded
//! by the longest line.
//!
//! Cancellation is checked before each line is read and again after the
//! engine returns, so a run that starts cancelled fails even on empty input.
//! A line whose reversal was interrupted is discarded rather than written
//! half-reversed; the run then fails with [`RevError::Cancelled`].

use crate::cancel::Cancellation;
use crate::error::{Result, RevError};
use crate::reverse::{ReversalPolicy, reverse};
use crate::source::LineSource;
use std::io::{BufRead, Write};
use tracing::{debug, trace, warn};

/// Totals for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines: usize,
    pub bytes: u64,
}

impl RunSummary {
    /// Fold another run's totals into this one
    pub fn absorb(&mut self, other: RunSummary) {
        self.lines += other.lines;
        self.bytes += other.bytes;
    }
}

/// Reverse every line of `input` into `output`
///
/// Stops at the first read fault, write fault, or observed cancellation.
/// Lines written before the failure stay written.
pub fn run<R, W, C>(input: R, mut output: W, policy: ReversalPolicy, cancel: &C) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    C: Cancellation + ?Sized,
{
    debug!("Starting {} reversal", policy);

    let mut source = LineSource::new(input);
    let mut summary = RunSummary::default();

    loop {
        if cancel.is_cancelled() {
            return Err(cancelled(source.lines_read() + 1));
        }
        let Some(line) = source.next_line()? else {
            break;
        };

        let reversed = reverse(&line.text, policy, cancel);
        if cancel.is_cancelled() {
            return Err(cancelled(line.number));
        }

        write_line(&mut output, &reversed)?;
        summary.lines += 1;
        summary.bytes += reversed.len() as u64 + 1;
        trace!("Line {}: {} -> {} bytes", line.number, line.text.len(), reversed.len());
    }

    output
        .flush()
        .map_err(|source| RevError::WriteFailed { source })?;

    debug!("Reversed {} lines, wrote {} bytes", summary.lines, summary.bytes);
    Ok(summary)
}

fn write_line<W: Write>(output: &mut W, text: &str) -> Result<()> {
    output
        .write_all(text.as_bytes())
        .and_then(|()| output.write_all(b"\n"))
        .map_err(|source| RevError::WriteFailed { source })
}

fn cancelled(line: usize) -> RevError {
    warn!("Cancelled before writing line {}", line);
    RevError::Cancelled { line }
}
