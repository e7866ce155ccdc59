//! Open-ended ranges: "1980-", "1980-to date", "since 1980", "v.1(1980)-".
//!
//! Every rule captures exactly the start year; the end is the context's
//! current year.

use crate::engine::BucketMask;
use crate::rules::helpers::open_range;
use crate::{Rule, Stage};

/// "1980-to date", "1980-present", "1995/96-current", "1980-cont."
pub fn rule_hyphen_to_date() -> Rule {
    rule! {
        name: "<year>-to date|present|current",
        stage: Stage::ToCurrent,
        pattern: r"(?i)[\s(\[]([0-9]{4})(?:/[0-9]{1,4})?\s*-\s*(?:to\s+date|to\s+present|present|current|date|now|ongoing|continuing|cont\.?)[\s)\],;.:]",
        arity: 1,
        buckets: (BucketMask::HAS_HYPHEN | BucketMask::OPEN_ENDED).bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

/// "1980 to date", "1980 to present"
pub fn rule_to_date() -> Rule {
    rule! {
        name: "<year> to date|present",
        stage: Stage::ToCurrent,
        pattern: r"(?i)[\s(\[]([0-9]{4})\s+to\s+(?:date|present|current|now)[\s)\],;.:]",
        arity: 1,
        buckets: BucketMask::OPEN_ENDED.bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

/// "since 1980"
pub fn rule_since() -> Rule {
    rule! {
        name: "since <year>",
        stage: Stage::ToCurrent,
        pattern: r"(?i)\bsince\s+([0-9]{4})[\s)\],;.:]",
        arity: 1,
        buckets: BucketMask::OPEN_ENDED.bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

/// "1980+"
pub fn rule_plus() -> Rule {
    rule! {
        name: "<year>+",
        stage: Stage::ToCurrent,
        pattern: r"[\s(\[]([0-9]{4})\+[\s)\],;.:]",
        arity: 1,
        buckets: BucketMask::HAS_PLUS.bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

/// "v.1(1980)-", "v.1(1995/96)-"
pub fn rule_parenthesized_open() -> Rule {
    rule! {
        name: "(<year>)-",
        stage: Stage::ToCurrent,
        pattern: r"\(([0-9]{4})(?:/[0-9]{1,4})?\)-[\s,;\]]",
        arity: 1,
        buckets: (BucketMask::HAS_PAREN | BucketMask::HAS_HYPHEN).bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

/// "v.1:1980-"
pub fn rule_enumeration_open() -> Rule {
    rule! {
        name: "<enum>:<year>-",
        stage: Stage::ToCurrent,
        pattern: r"(?i)[\s(\[](?:[a-z]+\.)?[0-9]+:([0-9]{4})-[\s)\],;]",
        arity: 1,
        buckets: (BucketMask::HAS_COLON | BucketMask::HAS_HYPHEN).bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

/// "1980-", "(1980-)", "1995/96-"
pub fn rule_trailing_hyphen() -> Rule {
    rule! {
        name: "<year>-",
        stage: Stage::ToCurrent,
        pattern: r"[\s(\[]([0-9]{4})(?:/[0-9]{1,4})?-[\s)\],;]",
        arity: 1,
        buckets: BucketMask::HAS_HYPHEN.bits(),
        prod: |cap, ctx| { open_range(cap, ctx.current_year) }
    }
}

pub fn get() -> Vec<Rule> {
    vec![
        rule_hyphen_to_date(),
        rule_to_date(),
        rule_since(),
        rule_plus(),
        rule_parenthesized_open(),
        rule_enumeration_open(),
        rule_trailing_hyphen(),
    ]
}
