extern crate self as holdings_years;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod rules;
mod year_set;

pub use api::{
    Context, DEFAULT_MIN_YEAR, Diagnostic, DiagnosticKind, Holdings, MatchSummary, Options, ParseDetails,
    ParseResultVerbose, StageTrace, parse, parse_verbose_with, parse_with,
};
pub use error::{HoldingsError, Result};
pub use rules::helpers::to_four_digit_year;
pub use rules::normalize::normalize;
pub use year_set::{RangeExpression, YearGuard, YearSet};

// --- Internal types ---------------------------------------------------------

/// One pass of the extraction cascade.
///
/// The declaration order is the execution order: every stage deletes its
/// matches from the working text before the next one starts, so reordering
/// the variants changes results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Open-ended ranges whose end is the current year.
    ToCurrent,
    /// Explicit two-endpoint ranges, including short-year forms.
    ClosedRange,
    /// Lone years not claimed by a range.
    SingleYear,
}

impl Stage {
    /// All stages in execution order.
    pub const ORDER: [Stage; 3] = [Stage::ToCurrent, Stage::ClosedRange, Stage::SingleYear];

    /// Short human-readable label used in traces and reports.
    pub fn label(self) -> &'static str {
        match self {
            Stage::ToCurrent => "to-current",
            Stage::ClosedRange => "closed-range",
            Stage::SingleYear => "single-year",
        }
    }

    /// Capture-group counts a rule of this stage may declare.
    pub(crate) fn allowed_arities(self) -> &'static [usize] {
        match self {
            Stage::ToCurrent | Stage::SingleYear => &[1],
            Stage::ClosedRange => &[2, 3],
        }
    }

    pub(crate) fn arity_description(self) -> &'static str {
        match self {
            Stage::ToCurrent | Stage::SingleYear => "1",
            Stage::ClosedRange => "2 or 3",
        }
    }
}

/// The capture groups of a single rule match, handed to the rule's
/// production. `groups` excludes the whole-match group 0.
#[derive(Debug, Clone)]
pub(crate) struct Captured<'t> {
    pub rule: &'static str,
    pub groups: Vec<&'t str>,
}

pub(crate) type Production = Box<dyn Fn(&Captured<'_>, &Context) -> Result<RangeExpression> + Send + Sync>;

/// An extraction rule: a name, the stage it runs in, one regex with a
/// declared capture arity, and a production turning the captured groups into
/// a [`RangeExpression`].
///
/// `buckets` lists the coarse input features the regex cannot match without;
/// the parser skips the rule when the trigger scan did not see all of them.
pub(crate) struct Rule {
    pub name: &'static str,
    pub stage: Stage,
    pub pattern: &'static Regex,
    pub arity: usize,
    pub production: Production,
    pub buckets: u32,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .field("pattern", &self.pattern.as_str())
            .field("arity", &self.arity)
            .field("production", &"<function>")
            .field("buckets", &self.buckets)
            .finish()
    }
}

/// Byte span of a match inside the working text it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// A rule match after resolution: the producing rule, the matched text,
/// the expression it produced and the years that survived the guard.
#[derive(Debug, Clone)]
pub(crate) struct Extraction {
    pub rule_name: &'static str,
    pub stage: Stage,
    pub range: Range,
    pub matched: String,
    pub expression: RangeExpression,
    pub years: Vec<i32>,
}
