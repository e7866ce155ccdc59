use crate::engine::{self, CompiledRules, RunResult};
use crate::{RangeExpression, Rule, Stage, YearSet};
use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use std::ops::RangeInclusive;
use std::time::Duration;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(crate::rules::get);

static DEFAULT_COMPILED: Lazy<CompiledRules<'static>> = Lazy::new(|| {
    CompiledRules::new(DEFAULT_RULES.as_slice())
        .unwrap_or_else(|err| panic!("built-in holdings rule table is malformed: {err}"))
});

/// Earliest year accepted by the default [`Options`].
pub const DEFAULT_MIN_YEAR: i32 = 1400;

/// Parsing context.
///
/// Holds the environment needed to resolve open-ended ranges ("1980-" means
/// "1980 through the current year"). Supply it explicitly for deterministic
/// results; the default reads the local clock once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Year used as the end of to-current ranges and, plus one, as the upper
    /// bound of plausible years.
    pub current_year: i32,
}

impl Context {
    pub fn new(current_year: i32) -> Self {
        Context { current_year }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self { current_year: Local::now().year() }
    }
}

/// Options that affect extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Lower bound of plausible publication years.
    pub min_year: i32,
}

impl Default for Options {
    fn default() -> Self {
        Options { min_year: DEFAULT_MIN_YEAR }
    }
}

/// Why a match contributed no years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A start or end year failed the plausibility guard.
    OutOfRange { year: i32 },
    /// The range ends before it starts.
    Reversed { start: i32, end: i32 },
}

/// A data-quality note recorded while parsing. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub rule: &'static str,
    /// The matched slice of the normalized statement.
    pub matched: String,
    pub kind: DiagnosticKind,
}

/// Years held for one holdings statement.
///
/// All extraction happens in [`parse_with`]; a `Holdings` value is an
/// immutable result and every query is a plain read.
#[derive(Debug, Clone)]
pub struct Holdings {
    statement: String,
    normalized: String,
    years: YearSet,
    diagnostics: Vec<Diagnostic>,
}

impl Holdings {
    /// The statement as supplied by the caller.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The statement after normalization, as seen by the first stage.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn years(&self) -> &YearSet {
        &self.years
    }

    /// Distinct held years, ascending.
    pub fn years_held(&self) -> &[i32] {
        self.years.years()
    }

    /// Earliest held year, or `""` when none was found.
    pub fn earliest_year(&self) -> String {
        self.years.earliest()
    }

    /// Latest held year, or `""` when none was found.
    pub fn latest_year(&self) -> String {
        self.years.latest()
    }

    /// Number of years from the earliest to the latest held year, inclusive.
    pub fn year_span(&self) -> u32 {
        self.years.span()
    }

    /// Years inside `[earliest, latest]` that are not held.
    pub fn missing_years(&self) -> Vec<i32> {
        self.years.missing()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.years.first()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.years.last()
    }

    /// Whether the library holds `year`.
    pub fn holds(&self, year: i32) -> bool {
        self.years.contains(year)
    }

    /// Whether the library holds every year of `range`.
    pub fn holds_all(&self, range: RangeInclusive<i32>) -> bool {
        self.years.contains_all(range)
    }

    /// Coverage gaps as inclusive runs of missing years.
    pub fn gaps(&self) -> Vec<RangeInclusive<i32>> {
        self.years.gaps()
    }

    /// Matches that were discarded, in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// A compact summary of one rule match, used in verbose traces.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub rule: String,
    /// Matched slice of the working text at the time of the match.
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub expression: RangeExpression,
    /// Years kept after the plausibility guard; empty for discarded matches.
    pub years: YearSet,
}

/// Per-stage trace in [`ParseDetails`].
#[derive(Debug, Clone)]
pub struct StageTrace {
    pub stage: Stage,
    pub duration: Duration,
    /// Rules of this stage that passed trigger gating.
    pub rules_active: usize,
    /// Distinct years this stage contributed.
    pub produced: usize,
    pub matches: Vec<MatchSummary>,
    /// Working text left for the next stage.
    pub residual: String,
}

/// Additional details returned by [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseDetails {
    pub total: Duration,
    pub normalize: Duration,
    pub stages: Vec<StageTrace>,
    /// Names of rules that passed trigger gating.
    pub active_rules: Vec<String>,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone)]
pub struct ParseResultVerbose {
    pub holdings: Holdings,
    pub details: ParseDetails,
}

/// Parse `text` with a default [`Context`] (current year from the local
/// clock) and default [`Options`].
///
/// # Example
/// ```
/// use holdings_years::parse;
///
/// let held = parse("v.1-25 1980-2004");
/// assert_eq!(held.earliest_year(), "1980");
/// assert_eq!(held.year_span(), 25);
/// ```
pub fn parse(text: &str) -> Holdings {
    parse_with(text, &Context::default(), &Options::default())
}

/// Parse `text` using the built-in rule table and the provided
/// `context`/`options`.
///
/// # Panics
///
/// Panics if the built-in rule table violates its own contracts (a capture
/// arity mismatch or a short-year capture of the wrong width). That is a bug
/// in static data, never a consequence of the statement text.
pub fn parse_with(text: &str, context: &Context, options: &Options) -> Holdings {
    holdings_from_run(text, run_default(text, context, options))
}

/// Parse `text` and return per-stage traces alongside the result.
///
/// # Panics
///
/// Same conditions as [`parse_with`].
pub fn parse_verbose_with(text: &str, context: &Context, options: &Options) -> ParseResultVerbose {
    let run = run_default(text, context, options);

    let stages = run
        .metrics
        .stages
        .iter()
        .map(|stage| StageTrace {
            stage: stage.stage,
            duration: stage.duration,
            rules_active: stage.rules_active,
            produced: stage.produced,
            matches: run
                .extractions
                .iter()
                .filter(|ex| ex.stage == stage.stage)
                .map(|ex| MatchSummary {
                    rule: ex.rule_name.to_string(),
                    text: ex.matched.clone(),
                    start: ex.range.start,
                    end: ex.range.end,
                    expression: ex.expression,
                    years: ex.years.iter().copied().collect(),
                })
                .collect(),
            residual: stage.residual.clone(),
        })
        .collect();

    let details = ParseDetails {
        total: run.metrics.total,
        normalize: run.metrics.normalize,
        stages,
        active_rules: run.active_rules.iter().map(|name| name.to_string()).collect(),
    };

    ParseResultVerbose { holdings: holdings_from_run(text, run), details }
}

fn run_default(text: &str, context: &Context, options: &Options) -> RunResult {
    engine::Parser::new_compiled(text, &DEFAULT_COMPILED)
        .run(context, options)
        .unwrap_or_else(|err| panic!("built-in holdings rule table is malformed: {err}"))
}

fn holdings_from_run(text: &str, run: RunResult) -> Holdings {
    let years: YearSet = run.extractions.iter().flat_map(|ex| ex.years.iter().copied()).collect();
    Holdings { statement: text.to_string(), normalized: run.normalized, years, diagnostics: run.diagnostics }
}
