//! Trigger scanning (input pre-classification).
//!
//! This module inspects the normalized statement and produces coarse signals
//! that let the parser skip rules that cannot possibly match.
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains a hyphen"
//!   or "mentions an open-ended marker".
//! - **Phrases** (`TriggerInfo::phrases`): the lowercased open-ended markers
//!   that were seen, kept for traces.
//!
//! ## Design notes
//!
//! - The scan runs once, before the first stage. Stages only delete text, so
//!   a feature absent from the initial scan stays absent for every stage and
//!   gating on it never hides a match.
//! - False positives are fine: the rule still has to match its regex.

use super::compiled_rules::BucketMask;
use std::collections::BTreeSet;

/// Words that mark a range as running to the present.
const OPEN_ENDED_PHRASES: &[&str] =
    &["date", "present", "current", "now", "ongoing", "continuing", "cont", "since"];

/// Input characteristics detected from the normalized statement.
#[derive(Debug, Clone)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
    pub phrases: BTreeSet<&'static str>,
}

impl TriggerInfo {
    /// Scan `input` for coarse buckets and open-ended phrases.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let mut phrases = BTreeSet::new();

        for b in input.bytes() {
            match b {
                b'0'..=b'9' => buckets |= BucketMask::HAS_DIGITS,
                b'-' => buckets |= BucketMask::HAS_HYPHEN,
                b'/' => buckets |= BucketMask::HAS_SLASH,
                b':' => buckets |= BucketMask::HAS_COLON,
                b'(' | b'[' => buckets |= BucketMask::HAS_PAREN,
                b'+' => buckets |= BucketMask::HAS_PLUS,
                _ => {}
            }
        }

        let lower = input.to_ascii_lowercase();
        for phrase in OPEN_ENDED_PHRASES {
            if lower.contains(phrase) {
                phrases.insert(*phrase);
            }
        }
        if !phrases.is_empty() {
            buckets |= BucketMask::OPEN_ENDED;
        }

        TriggerInfo { buckets, phrases }
    }

    /// Whether every feature in `required` was seen.
    pub fn satisfies(&self, required: BucketMask) -> bool {
        self.buckets.contains(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_punctuation_buckets() {
        let info = TriggerInfo::scan(" v.1(1980/81)-v.25:2005+ ");
        assert!(info.satisfies(
            BucketMask::HAS_DIGITS
                | BucketMask::HAS_HYPHEN
                | BucketMask::HAS_SLASH
                | BucketMask::HAS_COLON
                | BucketMask::HAS_PAREN
                | BucketMask::HAS_PLUS
        ));
        assert!(!info.satisfies(BucketMask::OPEN_ENDED));
    }

    #[test]
    fn detects_open_ended_phrases() {
        let info = TriggerInfo::scan(" 1980 To Date ");
        assert!(info.satisfies(BucketMask::OPEN_ENDED | BucketMask::HAS_DIGITS));
        assert!(info.phrases.contains("date"));
        assert!(!info.satisfies(BucketMask::HAS_HYPHEN));
    }

    #[test]
    fn empty_statement_has_no_buckets() {
        assert!(TriggerInfo::scan("  ").buckets.is_empty());
    }
}
