//! Extraction engine.
//!
//! ## How the parts work together
//!
//! ```text
//! rules (all)  ──┐
//!               │  CompiledRules::new           (compiled_rules.rs)
//!               │    - check capture arity per stage
//!               └───────────────┬──────────────
//!                               │
//! input ── normalize ── TriggerInfo::scan ──┼─ gate rules per stage
//!          (rules/normalize.rs) (trigger.rs)│
//!                               v
//!                     Parser::run (parser.rs)
//!                       - to-current  stage
//!                       - closed-range stage
//!                       - single-year stage
//!                       each match: production -> RangeExpression
//!                               │
//!                               v
//!                     resolve_expression (resolve.rs)
//!                       - plausibility guard
//!                       - reversed ranges
//!                               │
//!                               v
//!                     RunResult (metrics.rs) -> YearSet
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: validates `Rule`s and indexes them by stage.
//! - `trigger.rs`: scans the normalized statement for coarse features.
//! - `parser.rs`: folds the stages over the working text.
//! - `resolve.rs`: expands range expressions into years, or diagnostics.
//! - `metrics.rs`: per-stage timing and counts.
//!
//! ## Adding new rules
//!
//! - Add a `rule_*` function under `src/rules/` and list it in that file's
//!   `get()` at the position it should run. Specific patterns go before
//!   general ones of the same stage.
//! - Declare the buckets the regex cannot match without. Adding a new
//!   feature means a new `BucketMask` bit and teaching `TriggerInfo::scan`
//!   to detect it.
//!
//! ## Debugging
//!
//! The engine logs through `tracing`: `debug` for trigger buckets, rule
//! selection and stage summaries, `trace` for every match, `warn` for
//! discarded matches.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;

pub use compiled_rules::{BucketMask, CompiledRules};
#[allow(unused_imports)]
pub use metrics::{RunMetrics, RunResult, StageMetrics};
pub use parser::Parser;
#[allow(unused_imports)]
pub use trigger::TriggerInfo;
