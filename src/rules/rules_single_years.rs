//! Lone years left over after both range stages.

use crate::engine::BucketMask;
use crate::rules::helpers::single_year;
use crate::{Rule, Stage};

/// "v.1(1980)", "[1980]"
pub fn rule_parenthesized_year() -> Rule {
    rule! {
        name: "(YYYY)",
        stage: Stage::SingleYear,
        pattern: r"[(\[]([0-9]{4})[)\]]",
        arity: 1,
        buckets: BucketMask::HAS_PAREN.bits(),
        prod: |cap, _ctx| { single_year(cap) }
    }
}

/// "1980"
pub fn rule_plain_year() -> Rule {
    rule! {
        name: "YYYY",
        stage: Stage::SingleYear,
        pattern: r"[\s(\[]([0-9]{4})[\s)\],;.:]",
        arity: 1,
        buckets: BucketMask::HAS_DIGITS.bits(),
        prod: |cap, _ctx| { single_year(cap) }
    }
}

pub fn get() -> Vec<Rule> {
    vec![rule_parenthesized_year(), rule_plain_year()]
}
