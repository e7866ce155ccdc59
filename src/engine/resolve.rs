//! Turning a rule's [`RangeExpression`] into held years.
//!
//! Both ends must pass the [`YearGuard`] and the range must not run
//! backwards. A failing match contributes nothing and yields a
//! [`Diagnostic`] which is also logged as a warning; the run continues.

use crate::{Diagnostic, DiagnosticKind, RangeExpression, Stage, YearGuard};

/// Expand `expression` into years, or explain why it contributes none.
pub(crate) fn resolve_expression(
    stage: Stage,
    rule: &'static str,
    matched: &str,
    expression: RangeExpression,
    guard: &YearGuard,
) -> Result<Vec<i32>, Diagnostic> {
    let kind = if !guard.is_plausible(expression.start) {
        Some(DiagnosticKind::OutOfRange { year: expression.start })
    } else if !guard.is_plausible(expression.end) {
        Some(DiagnosticKind::OutOfRange { year: expression.end })
    } else if expression.is_reversed() {
        Some(DiagnosticKind::Reversed { start: expression.start, end: expression.end })
    } else {
        None
    };

    match kind {
        None => Ok(expression.years().collect()),
        Some(kind) => {
            tracing::warn!(
                stage = stage.label(),
                rule,
                matched = matched.trim(),
                ?kind,
                "discarding holdings match"
            );
            Err(Diagnostic { stage, rule, matched: matched.to_string(), kind })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, Options};

    fn guard() -> YearGuard {
        YearGuard::new(&Context::new(2024), &Options::default())
    }

    #[test]
    fn expands_valid_range() {
        let years = resolve_expression(Stage::ClosedRange, "t", "1999/01", RangeExpression::span(1999, 2001), &guard());
        assert_eq!(years, Ok(vec![1999, 2000, 2001]));
    }

    #[test]
    fn implausible_end_discards_whole_match() {
        let err =
            resolve_expression(Stage::ClosedRange, "t", "2020-99", RangeExpression::span(2020, 2099), &guard())
                .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::OutOfRange { year: 2099 });
        assert_eq!(err.matched, "2020-99");
    }

    #[test]
    fn implausible_start_is_reported_first() {
        let err = resolve_expression(Stage::ClosedRange, "t", "1000-3000", RangeExpression::span(1000, 3000), &guard())
            .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::OutOfRange { year: 1000 });
    }

    #[test]
    fn reversed_range_is_empty_not_fatal() {
        let err = resolve_expression(Stage::ToCurrent, "t", "2025-", RangeExpression::span(2025, 2024), &guard())
            .unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Reversed { start: 2025, end: 2024 });
    }
}
