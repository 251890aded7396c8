//! Reversal engine
//!
//! Reverses text by Unicode code point, never by byte, so multi-byte
//! characters survive intact. Grapheme clusters are not kept together: a
//! base letter followed by a combining mark comes out with the mark first.
//!
//! Long reversals poll a [`Cancellation`] signal every
//! [`REVERSE_POLL_STRIDE`] positions. When the signal is raised mid-line the
//! engine stops and hands back the partially reversed buffer as it stands.

use crate::cancel::Cancellation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Swaps performed between cancellation polls inside one reversal
pub const REVERSE_POLL_STRIDE: usize = 1000;

/// Words processed between cancellation polls in per-word mode
pub const WORD_POLL_STRIDE: usize = 100;

/// How a line is reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReversalPolicy {
    /// Reverse the whole line as one unit, whitespace included
    #[default]
    WholeLine,
    /// Reverse each whitespace-delimited word, rejoined by single spaces
    PerWord,
}

impl ReversalPolicy {
    /// Map the `--separate` option onto a policy
    pub fn from_separate(separate: bool) -> Self {
        if separate {
            ReversalPolicy::PerWord
        } else {
            ReversalPolicy::WholeLine
        }
    }
}

impl fmt::Display for ReversalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReversalPolicy::WholeLine => write!(f, "whole-line"),
            ReversalPolicy::PerWord => write!(f, "per-word"),
        }
    }
}

/// Reverse `buf` in place with a two-pointer walk
///
/// Returns `false` if the walk was interrupted, leaving `buf` partially
/// reversed: the outermost positions are swapped, the middle is untouched.
pub fn reverse_chars<C: Cancellation + ?Sized>(buf: &mut [char], cancel: &C) -> bool {
    if buf.len() < 2 {
        return true;
    }

    let (mut i, mut j) = (0, buf.len() - 1);
    while i < j {
        if i != 0 && i % REVERSE_POLL_STRIDE == 0 && cancel.is_cancelled() {
            return false;
        }
        buf.swap(i, j);
        i += 1;
        j -= 1;
    }
    true
}

/// Reverse one line of text according to `policy`
///
/// Never fails. If `cancel` is raised during the reversal the result is the
/// work done so far, which callers must not treat as a complete reversal.
pub fn reverse<C: Cancellation + ?Sized>(text: &str, policy: ReversalPolicy, cancel: &C) -> String {
    match policy {
        ReversalPolicy::WholeLine => reverse_whole_line(text, cancel),
        ReversalPolicy::PerWord => reverse_per_word(text, cancel),
    }
}

fn reverse_whole_line<C: Cancellation + ?Sized>(text: &str, cancel: &C) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    reverse_chars(&mut chars, cancel);
    chars.into_iter().collect()
}

fn reverse_per_word<C: Cancellation + ?Sized>(text: &str, cancel: &C) -> String {
    let mut words: Vec<Vec<char>> = text
        .split_whitespace()
        .map(|word| word.chars().collect())
        .collect();

    for (index, word) in words.iter_mut().enumerate() {
        if index != 0 && index % WORD_POLL_STRIDE == 0 && cancel.is_cancelled() {
            break;
        }
        if !reverse_chars(word, cancel) {
            break;
        }
    }

    let mut out = String::with_capacity(text.len());
    for (index, word) in words.iter().enumerate() {
        if index > 0 {
            out.push(' ');
        }
        out.extend(word.iter());
    }
    out
}
