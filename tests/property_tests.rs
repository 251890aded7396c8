//! Property-based tests for RevX
//!
//! This module uses proptest to verify core invariants of RevX operations.
//! Property-based testing generates hundreds of random inputs to verify
//! that certain properties always hold true.

use revx::{Never, ReversalPolicy, reverse, run};

// Import proptest macro
use proptest::prelude::*;

fn whole(text: &str) -> String {
    reverse(text, ReversalPolicy::WholeLine, &Never)
}

fn per_word(text: &str) -> String {
    reverse(text, ReversalPolicy::PerWord, &Never)
}

fn sorted_chars(text: &str) -> Vec<char> {
    let mut chars: Vec<char> = text.chars().collect();
    chars.sort_unstable();
    chars
}

// ============================================================================
// Property 1: Whole-line reversal
// ============================================================================

proptest! {
    /// Reversing twice gives back the original line
    #[test]
    fn prop_double_reversal_is_identity(line in "\\PC{0,200}") {
        prop_assert_eq!(whole(&whole(&line)), line);
    }

    /// Reversal only reorders code points
    #[test]
    fn prop_whole_line_preserves_code_points(line in "\\PC{0,200}") {
        let out = whole(&line);
        prop_assert_eq!(out.chars().count(), line.chars().count());
        prop_assert_eq!(sorted_chars(&out), sorted_chars(&line));
    }

    /// The first code point of the output is the last of the input
    #[test]
    fn prop_whole_line_mirrors_ends(line in "\\PC{1,100}") {
        let out = whole(&line);
        prop_assert_eq!(out.chars().next(), line.chars().last());
        prop_assert_eq!(out.chars().last(), line.chars().next());
    }

    /// Long lines cross the polling stride without losing anything
    #[test]
    fn prop_long_lines_round_trip(unit in "[a-z日本]{1,8}", repeat in 200usize..600) {
        let line = unit.repeat(repeat);
        prop_assert_eq!(whole(&whole(&line)), line);
    }
}

// ============================================================================
// Property 2: Per-word reversal
// ============================================================================

proptest! {
    /// Word count is unchanged
    #[test]
    fn prop_per_word_preserves_word_count(line in "[a-z \\t\u{3000}]{0,120}") {
        let out = per_word(&line);
        prop_assert_eq!(out.split_whitespace().count(), line.split_whitespace().count());
    }

    /// Each output word is the reversal of the matching input word
    #[test]
    fn prop_per_word_reverses_each_word(words in prop::collection::vec("[a-zé]{1,10}", 0..20), gap in "[ \\t]{1,4}") {
        let line = words.join(&gap);
        let out = per_word(&line);

        let expected: Vec<String> = words.iter().map(|w| whole(w)).collect();
        prop_assert_eq!(out, expected.join(" "));
    }

    /// Applying per-word reversal twice normalizes spacing but restores words
    #[test]
    fn prop_per_word_twice_restores_words(line in "[a-z ]{0,80}") {
        let twice = per_word(&per_word(&line));
        let normalized = line.split_whitespace().collect::<Vec<_>>().join(" ");
        prop_assert_eq!(twice, normalized);
    }
}

// ============================================================================
// Property 3: Stream driver
// ============================================================================

proptest! {
    /// N newline-terminated lines in, N lines out
    #[test]
    fn prop_line_count_preserved(
        lines in prop::collection::vec("[^\\n\\r]{0,40}", 0..50),
        separate in any::<bool>()
    ) {
        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let mut out = Vec::new();

        let summary = run(input.as_bytes(), &mut out, ReversalPolicy::from_separate(separate), &Never).unwrap();

        let text = String::from_utf8(out).unwrap();
        prop_assert_eq!(summary.lines, lines.len());
        prop_assert_eq!(text.matches('\n').count(), lines.len());
    }

    /// The driver emits exactly what the engine produces, line by line,
    /// including a final line that lacks its terminator
    #[test]
    fn prop_driver_matches_engine(
        lines in prop::collection::vec("[^\\n\\r]{0,40}", 0..20),
        last in "[^\\n\\r]{1,40}"
    ) {
        let mut input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        input.push_str(&last);
        let mut out = Vec::new();

        run(input.as_bytes(), &mut out, ReversalPolicy::WholeLine, &Never).unwrap();

        let mut expected: String = lines.iter().map(|l| format!("{}\n", whole(l))).collect();
        expected.push_str(&format!("{}\n", whole(&last)));
        prop_assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
