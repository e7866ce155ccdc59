//! Explicit two-endpoint ranges, most specific first.
//!
//! Two-group rules capture `(start, end)`. Three-group rules capture
//! `(start, penultimate, end)` where `penultimate` is the full year written
//! just before a short end year ("2004/05") and serves as its century
//! context. End groups are always `\d{4}|\d{1,2}` so short forms reach the
//! two-digit resolver with a valid width.
//!
//! Between two parenthesized endpoints sits at most one enumeration token,
//! optionally followed by a single space: "v.1 (1980)-v.5 (1984)".

use crate::engine::BucketMask;
use crate::rules::helpers::closed_range;
use crate::{Rule, Stage};

/// "v.1(1980/81)-v.25(2004/05)"
pub fn rule_doubled_parenthesized() -> Rule {
    rule! {
        name: "(YYYY/YY)-(YYYY/YY)",
        stage: Stage::ClosedRange,
        pattern: r"\(([0-9]{4})/[0-9]{1,4}\)-[^\s()]*\s?\(([0-9]{4})/([0-9]{4}|[0-9]{1,2})\)",
        arity: 3,
        buckets: (BucketMask::HAS_PAREN | BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "v.1(1980)-v.25(2004/05)"
pub fn rule_parenthesized_right_doubled() -> Rule {
    rule! {
        name: "(YYYY)-(YYYY/YY)",
        stage: Stage::ClosedRange,
        pattern: r"\(([0-9]{4})\)-[^\s()]*\s?\(([0-9]{4})/([0-9]{4}|[0-9]{1,2})\)",
        arity: 3,
        buckets: (BucketMask::HAS_PAREN | BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "v.1(1980/81)-v.25(2005)"
pub fn rule_parenthesized_left_doubled() -> Rule {
    rule! {
        name: "(YYYY/YY)-(YYYY)",
        stage: Stage::ClosedRange,
        pattern: r"\(([0-9]{4})/[0-9]{1,4}\)-[^\s()]*\s?\(([0-9]{4}|[0-9]{1,2})\)",
        arity: 2,
        buckets: (BucketMask::HAS_PAREN | BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "v.1(1980)-v.25(2005)", "(1980)-(85)"
pub fn rule_doubly_parenthesized() -> Rule {
    rule! {
        name: "(YYYY)-(YYYY)",
        stage: Stage::ClosedRange,
        pattern: r"\(([0-9]{4})\)-[^\s()]*\s?\(([0-9]{4}|[0-9]{1,2})\)",
        arity: 2,
        buckets: (BucketMask::HAS_PAREN | BucketMask::HAS_HYPHEN).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "1:1980-25:2005", "v.1:1980-v.25:05"
pub fn rule_enumeration_colon() -> Rule {
    rule! {
        name: "<enum>:YYYY-<enum>:YYYY",
        stage: Stage::ClosedRange,
        pattern: r"(?i)[\s(\[](?:[a-z]+\.)?[0-9]+:([0-9]{4})-(?:[a-z]+\.)?[0-9]+:([0-9]{4}|[0-9]{1,2})[\s)\],;.:]",
        arity: 2,
        buckets: (BucketMask::HAS_COLON | BucketMask::HAS_HYPHEN).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "v.1 1980-v.5 1984": the enumeration label of the end volume sits
/// between the years.
pub fn rule_enumerated_end() -> Rule {
    rule! {
        name: "YYYY-<enum> YYYY",
        stage: Stage::ClosedRange,
        pattern: r"(?i)[\s(\[]([0-9]{4})-[a-z]+\.[0-9]+\s+([0-9]{4})[\s)\],;.:]",
        arity: 2,
        buckets: (BucketMask::HAS_DIGITS | BucketMask::HAS_HYPHEN).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "1995/96-2004/05", "1995/6-2004/5"
pub fn rule_doubled_both() -> Rule {
    rule! {
        name: "YYYY/YY-YYYY/YY",
        stage: Stage::ClosedRange,
        pattern: r"[\s(\[]([0-9]{4})/[0-9]{1,4}-([0-9]{4})/([0-9]{4}|[0-9]{1,2})[\s)\],;.:]",
        arity: 3,
        buckets: (BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "1995/96-99/00": the penultimate year is itself short.
pub fn rule_short_all() -> Rule {
    rule! {
        name: "YYYY/YY-YY/YY",
        stage: Stage::ClosedRange,
        pattern: r"[\s(\[]([0-9]{4})/[0-9]{1,2}-([0-9]{1,2})/([0-9]{1,2})[\s)\],;.:]",
        arity: 3,
        buckets: (BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "1980-2005/06"
pub fn rule_right_doubled() -> Rule {
    rule! {
        name: "YYYY-YYYY/YY",
        stage: Stage::ClosedRange,
        pattern: r"[\s(\[]([0-9]{4})-([0-9]{4})/([0-9]{4}|[0-9]{1,2})[\s)\],;.:]",
        arity: 3,
        buckets: (BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "1995/96-2005", "1995/6-99"
pub fn rule_left_doubled() -> Rule {
    rule! {
        name: "YYYY/YY-YYYY",
        stage: Stage::ClosedRange,
        pattern: r"[\s(\[]([0-9]{4})/[0-9]{1,4}-([0-9]{4}|[0-9]{1,2})[\s)\],;.:]",
        arity: 2,
        buckets: (BucketMask::HAS_HYPHEN | BucketMask::HAS_SLASH).bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "(1980 - 2005)", "(1998-09)"
pub fn rule_parenthesized() -> Rule {
    rule! {
        name: "(YYYY-YYYY)",
        stage: Stage::ClosedRange,
        pattern: r"\(([0-9]{4})\s*[-/]\s*([0-9]{4}|[0-9]{1,2})\)",
        arity: 2,
        buckets: BucketMask::HAS_PAREN.bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

/// "1980-2005", "1984-85", "1995/6", "1999/01"
pub fn rule_plain() -> Rule {
    rule! {
        name: "YYYY-YYYY",
        stage: Stage::ClosedRange,
        pattern: r"[\s(\[]([0-9]{4})[-/]([0-9]{4}|[0-9]{1,2})[\s)\],;.:]",
        arity: 2,
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |cap, _ctx| { closed_range(cap) }
    }
}

pub fn get() -> Vec<Rule> {
    vec![
        rule_doubled_parenthesized(),
        rule_parenthesized_right_doubled(),
        rule_parenthesized_left_doubled(),
        rule_doubly_parenthesized(),
        rule_enumeration_colon(),
        rule_enumerated_end(),
        rule_doubled_both(),
        rule_short_all(),
        rule_right_doubled(),
        rule_left_doubled(),
        rule_parenthesized(),
        rule_plain(),
    ]
}
