//! The extraction cascade.
//!
//! This module is the operational core of the engine:
//!
//! - Normalize the statement and scan it for triggers.
//! - Select, per stage, the rules whose bucket requirements are met.
//! - Fold the stages over the working text in their fixed order, deleting
//!   every match before the next rule or stage looks at the text.
//! - Resolve each match into years (see `resolve.rs`), keeping diagnostics
//!   for matches that contribute nothing.
//!
//! ## Pass structure
//!
//! ```text
//! (0) normalize + trigger scan  -> working text, buckets
//! (1) to-current rules          -> "1980-" claimed, replaced by " "
//! (2) closed-range rules        -> "1984-85" claimed, replaced by " "
//! (3) single-year rules         -> whatever four-digit years remain
//! ```
//!
//! Deleting matches is what keeps the stages honest: once "1980-1985" is
//! gone, the single-year pass cannot count 1980 and 1985 again, and the
//! to-current pass runs first so a closed range never leaves a dangling
//! "1980-" behind for it.
//!
//! Within a stage, each rule is re-applied to the shrinking text until it no
//! longer matches. Matches consume their boundary characters and are
//! replaced by a single space, which becomes the boundary of the next token.

use super::compiled_rules::{CompiledRules, STAGE_COUNT};
use super::metrics::{RunMetrics, RunResult, StageMetrics};
use super::resolve::resolve_expression;
use super::trigger::TriggerInfo;
use crate::rules::normalize::normalize;
use crate::{Captured, Context, Extraction, Options, Range, RangeExpression, Result, Rule, Stage, YearGuard};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// A single rule hit, copied out of the working text so the text can be
/// edited.
struct Hit {
    range: Range,
    matched: String,
    expression: RangeExpression,
}

/// Parser binds one statement to a compiled rule table.
///
/// Usage: `Parser::new_compiled(input, &compiled)` then `run(context, options)`.
///
/// ```text
/// new_compiled() -> normalize, scan, gate rules
/// run()          -> stage 1 -> stage 2 -> stage 3 -> RunResult
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    /// Statement after normalization.
    normalized: String,
    normalize_time: Duration,
    /// Active rules per stage, in table order.
    active: [Vec<&'a Rule>; STAGE_COUNT],
}

impl<'a> Parser<'a> {
    /// Create a new `Parser` for `input` using pre-compiled rules.
    pub fn new_compiled(input: &str, compiled: &CompiledRules<'a>) -> Self {
        let normalize_start = Instant::now();
        let normalized = normalize(input);
        let normalize_time = normalize_start.elapsed();

        let trigger_info = TriggerInfo::scan(&normalized);
        tracing::debug!(
            normalized = normalized.as_str(),
            buckets = ?trigger_info.buckets,
            phrases = ?trigger_info.phrases,
            "trigger scan"
        );

        let mut active: [Vec<&'a Rule>; STAGE_COUNT] = Default::default();
        let mut gated = 0;
        for stage in Stage::ORDER {
            for &id in &compiled.index.by_stage[stage as usize] {
                if trigger_info.satisfies(compiled.metas[id].buckets) {
                    active[stage as usize].push(compiled.rules[id]);
                } else {
                    gated += 1;
                }
            }
        }

        tracing::debug!(
            active = compiled.len() - gated,
            total = compiled.len(),
            gated,
            "rules selected"
        );

        Parser { normalized, normalize_time, active }
    }

    /// Names of rules that passed gating, in cascade order.
    pub(crate) fn active_rule_names(&self) -> Vec<&'static str> {
        self.active.iter().flatten().map(|r| r.name).collect()
    }

    /// Find the leftmost match of `rule` in `text` and run its production.
    fn match_once(rule: &Rule, text: &str, context: &Context) -> Result<Option<Hit>> {
        let Some(caps) = rule.pattern.captures(text) else {
            return Ok(None);
        };
        let Some(whole) = caps.get(0) else {
            return Ok(None);
        };

        let groups: Vec<&str> = (1..caps.len()).map(|i| caps.get(i).map_or("", |g| g.as_str())).collect();
        let captured = Captured { rule: rule.name, groups };
        let expression = (rule.production)(&captured, context)?;

        Ok(Some(Hit {
            range: Range { start: whole.start(), end: whole.end() },
            matched: whole.as_str().to_string(),
            expression,
        }))
    }

    /// Run one stage over `residual`, deleting every match from it.
    fn run_stage(
        &self,
        stage: Stage,
        residual: &mut String,
        context: &Context,
        guard: &YearGuard,
        extractions: &mut Vec<Extraction>,
        diagnostics: &mut Vec<crate::Diagnostic>,
    ) -> Result<StageMetrics> {
        let stage_start = Instant::now();
        let rules = &self.active[stage as usize];
        let mut matches = 0;
        let mut produced: BTreeSet<i32> = BTreeSet::new();

        for rule in rules {
            while let Some(hit) = Self::match_once(rule, residual, context)? {
                matches += 1;
                tracing::trace!(
                    stage = stage.label(),
                    rule = rule.name,
                    span = ?(hit.range.start..hit.range.end),
                    matched = hit.matched.as_str(),
                    expression = ?hit.expression,
                    "rule matched"
                );

                let years = match resolve_expression(stage, rule.name, &hit.matched, hit.expression, guard) {
                    Ok(years) => years,
                    Err(diagnostic) => {
                        diagnostics.push(diagnostic);
                        Vec::new()
                    }
                };
                produced.extend(years.iter().copied());

                residual.replace_range(hit.range.start..hit.range.end, " ");
                extractions.push(Extraction {
                    rule_name: rule.name,
                    stage,
                    range: hit.range,
                    matched: hit.matched,
                    expression: hit.expression,
                    years,
                });
            }
        }

        Ok(StageMetrics {
            stage,
            duration: stage_start.elapsed(),
            rules_active: rules.len(),
            matches,
            produced: produced.len(),
            residual: residual.clone(),
        })
    }

    /// Run the cascade.
    ///
    /// # Errors
    ///
    /// Only contract violations inside the rule table surface here: a
    /// production handed groups it cannot read, or a short-year capture of
    /// the wrong width. Bad statement text never produces an error.
    pub fn run(self, context: &Context, options: &Options) -> Result<RunResult> {
        let total_start = Instant::now();
        let guard = YearGuard::new(context, options);

        let mut residual = self.normalized.clone();
        let mut extractions = Vec::new();
        let mut diagnostics = Vec::new();
        let mut stages = Vec::with_capacity(STAGE_COUNT);

        for stage in Stage::ORDER {
            let metrics =
                self.run_stage(stage, &mut residual, context, &guard, &mut extractions, &mut diagnostics)?;
            tracing::debug!(
                stage = stage.label(),
                matches = metrics.matches,
                produced = metrics.produced,
                residual = metrics.residual.as_str(),
                "stage complete"
            );
            stages.push(metrics);
        }

        let active_rules = self.active_rule_names();
        let metrics =
            RunMetrics { total: total_start.elapsed() + self.normalize_time, normalize: self.normalize_time, stages };

        Ok(RunResult { normalized: self.normalized, extractions, diagnostics, active_rules, metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::helpers::{full_year, to_four_digit_year};
    use crate::{DiagnosticKind, HoldingsError};

    fn run(input: &str) -> RunResult {
        let rules = crate::rules::get();
        let compiled = CompiledRules::new(&rules).unwrap();
        Parser::new_compiled(input, &compiled).run(&Context::new(2024), &Options::default()).unwrap()
    }

    fn years(result: &RunResult) -> Vec<i32> {
        let set: crate::YearSet = result.extractions.iter().flat_map(|e| e.years.iter().copied()).collect();
        set.years().to_vec()
    }

    #[test]
    fn stages_run_in_order() {
        let result = run("1950-1952 2020- 1960");
        let stages: Vec<Stage> = result.extractions.iter().map(|e| e.stage).collect();
        assert_eq!(stages, vec![Stage::ToCurrent, Stage::ClosedRange, Stage::SingleYear]);
        assert_eq!(years(&result), vec![1950, 1951, 1952, 1960, 2020, 2021, 2022, 2023, 2024]);
    }

    #[test]
    fn closed_range_is_not_recounted_as_single_years() {
        let result = run("1980-1982");
        assert_eq!(result.extractions.len(), 1);
        assert_eq!(result.metrics.stages[2].matches, 0);
        assert_eq!(result.metrics.stages[1].residual.trim(), "");
    }

    #[test]
    fn adjacent_years_share_a_boundary() {
        let result = run("1980 1981 1983");
        assert_eq!(years(&result), vec![1980, 1981, 1983]);
        assert_eq!(result.metrics.stages[2].matches, 3);
    }

    #[test]
    fn gated_rules_are_not_active() {
        let result = run("1980");
        assert!(result.active_rules.contains(&"YYYY"));
        assert!(!result.active_rules.contains(&"<year>+"));
        assert!(!result.active_rules.contains(&"since <year>"));
    }

    #[test]
    fn discarded_match_still_consumes_text() {
        let result = run("2030-2031 1990");
        assert_eq!(years(&result), vec![1990]);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::OutOfRange { year: 2030 });
        assert_eq!(result.metrics.stages[2].matches, 1);
    }

    #[test]
    fn production_errors_abort_the_run() {
        let rules = vec![rule! {
            name: "bad short year",
            stage: Stage::ClosedRange,
            pattern: r"(\d{4})~(\d{3})",
            arity: 2,
            prod: |cap, _ctx| {
                let start = full_year(cap, 0)?;
                let end = to_four_digit_year(&start.to_string(), cap.groups[1])?;
                Ok(RangeExpression::span(start, end))
            }
        }];
        let compiled = CompiledRules::new(&rules).unwrap();
        let err =
            Parser::new_compiled("1980~123", &compiled).run(&Context::new(2024), &Options::default()).unwrap_err();
        assert!(matches!(err, HoldingsError::ShortYearContract { .. }));

        // The same table is fine on text it does not match.
        let ok = Parser::new_compiled("1980", &compiled).run(&Context::new(2024), &Options::default()).unwrap();
        assert!(ok.extractions.is_empty());
    }
}
