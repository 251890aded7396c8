//! Line source
//!
//! Pulls newline-delimited UTF-8 lines out of a byte stream one at a time.
//! Only the current line is held in memory.

use crate::error::{Result, RevError};
use std::io::{self, BufRead};
use std::iter::FusedIterator;

/// One decoded input line, terminator stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the input
    pub number: usize,
    pub text: String,
}

/// Pull cursor over the lines of a reader
///
/// Consumed once. After end-of-stream or the first error it yields nothing.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
    lines_read: usize,
    finished: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            lines_read: 0,
            finished: false,
        }
    }

    /// Number of lines successfully produced so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Read the next line, `Ok(None)` at end of stream
    ///
    /// `\n` ends a line and is dropped together with one `\r` before it. A
    /// final line without a terminator is still returned.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        if self.finished {
            return Ok(None);
        }

        let number = self.lines_read + 1;
        self.buf.clear();

        let read = match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(read) => read,
            Err(source) => return Err(self.fail(number, source)),
        };
        if read == 0 {
            self.finished = true;
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }

        let text = match std::str::from_utf8(&self.buf) {
            Ok(text) => text.to_owned(),
            Err(e) => {
                let source = io::Error::new(io::ErrorKind::InvalidData, e);
                return Err(self.fail(number, source));
            }
        };

        self.lines_read = number;
        Ok(Some(Line { number, text }))
    }

    fn fail(&mut self, line: usize, source: io::Error) -> RevError {
        self.finished = true;
        RevError::ReadFailed { line, source }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

impl<R: BufRead> FusedIterator for LineSource<R> {}
