use crate::{Captured, HoldingsError, RangeExpression, Result};

/// Expand a 1–2 digit year into a four-digit year using `full` as century
/// context.
///
/// The short form replaces the trailing digits of `full`. A short year in a
/// holdings range always denotes a year after its context, so when the naive
/// splice goes backwards one decade (one-digit form) or one century
/// (two-digit form) is added:
///
/// ```
/// use holdings_years::to_four_digit_year;
///
/// assert_eq!(to_four_digit_year("1995", "6").unwrap(), 1996);
/// assert_eq!(to_four_digit_year("1999", "01").unwrap(), 2001);
/// assert_eq!(to_four_digit_year("1999", "1").unwrap(), 2001);
/// ```
///
/// # Errors
///
/// [`HoldingsError::ShortYearContract`] when `full` is not exactly four ASCII
/// digits or `short` is not one or two ASCII digits.
pub fn to_four_digit_year(full: &str, short: &str) -> Result<i32> {
    let contract = || HoldingsError::ShortYearContract { full: full.to_string(), short: short.to_string() };

    if full.len() != 4 || !full.bytes().all(|b| b.is_ascii_digit()) {
        return Err(contract());
    }
    if !(1..=2).contains(&short.len()) || !short.bytes().all(|b| b.is_ascii_digit()) {
        return Err(contract());
    }

    let context: i32 = full.parse().map_err(|_| contract())?;
    let spliced = format!("{}{}", &full[..4 - short.len()], short);
    let candidate: i32 = spliced.parse().map_err(|_| contract())?;

    if candidate < context {
        let unit = if short.len() == 1 { 10 } else { 100 };
        Ok(candidate + unit)
    } else {
        Ok(candidate)
    }
}

/// Parse the `idx`-th capture group as a full year.
pub fn full_year(cap: &Captured<'_>, idx: usize) -> Result<i32> {
    let text = group(cap, idx)?;
    text.parse::<i32>().map_err(|_| HoldingsError::UnparsedYear { rule: cap.rule, text: text.to_string() })
}

/// Parse the `idx`-th capture group as a year that may be written short,
/// resolving it against `context` when it has fewer than three digits.
pub fn year_after(cap: &Captured<'_>, idx: usize, context: i32) -> Result<i32> {
    let text = group(cap, idx)?;
    if text.len() >= 3 {
        return full_year(cap, idx);
    }
    if context > 9999 {
        return roll_forward(cap, text, context);
    }
    to_four_digit_year(&format!("{context:04}"), text)
}

/// `to_four_digit_year` for a context that no longer fits in four digits,
/// as after "9999/00-00/1". The result stays far outside any plausible
/// range, so the guard discards the match.
fn roll_forward(cap: &Captured<'_>, short: &str, context: i32) -> Result<i32> {
    let value: i32 =
        short.parse().map_err(|_| HoldingsError::UnparsedYear { rule: cap.rule, text: short.to_string() })?;
    let unit = if short.len() == 1 { 10 } else { 100 };
    let candidate = context - context % unit + value;
    Ok(if candidate < context { candidate + unit } else { candidate })
}

fn group<'t>(cap: &Captured<'t>, idx: usize) -> Result<&'t str> {
    match cap.groups.get(idx) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(HoldingsError::UnparsedYear { rule: cap.rule, text: String::new() }),
    }
}

// --- Productions shared by the rule tables ------------------------------------

/// One group: the start of an open-ended range, ending at the current year.
pub fn open_range(cap: &Captured<'_>, current_year: i32) -> Result<RangeExpression> {
    let start = full_year(cap, 0)?;
    Ok(RangeExpression::span(start, current_year))
}

/// Two groups `(start, end)` or three groups `(start, penultimate, end)`.
///
/// A short penultimate resolves against `start`; a short end resolves
/// against the resolved penultimate, which equals `start` for two groups.
pub fn closed_range(cap: &Captured<'_>) -> Result<RangeExpression> {
    let start = full_year(cap, 0)?;
    match cap.groups.len() {
        2 => {
            let end = year_after(cap, 1, start)?;
            Ok(RangeExpression { start, penultimate: start, end })
        }
        3 => {
            let penultimate = year_after(cap, 1, start)?;
            let end = year_after(cap, 2, penultimate)?;
            Ok(RangeExpression { start, penultimate, end })
        }
        found => Err(HoldingsError::CaptureArity { rule: cap.rule, expected: "2 or 3", found }),
    }
}

/// One group: a lone year.
pub fn single_year(cap: &Captured<'_>) -> Result<RangeExpression> {
    Ok(RangeExpression::single(full_year(cap, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn captured(groups: Vec<&'static str>) -> Captured<'static> {
        Captured { rule: "test", groups }
    }

    #[test]
    fn short_year_moves_forward() {
        assert_eq!(to_four_digit_year("1984", "85"), Ok(1985));
        assert_eq!(to_four_digit_year("1995", "6"), Ok(1996));
        assert_eq!(to_four_digit_year("1999", "9"), Ok(1999));
        assert_eq!(to_four_digit_year("1999", "01"), Ok(2001));
        assert_eq!(to_four_digit_year("1999", "1"), Ok(2001));
        assert_eq!(to_four_digit_year("2009", "08"), Ok(2108));
    }

    #[test]
    fn contract_violations_are_errors() {
        assert!(matches!(to_four_digit_year("199", "1"), Err(HoldingsError::ShortYearContract { .. })));
        assert!(matches!(to_four_digit_year("19999", "1"), Err(HoldingsError::ShortYearContract { .. })));
        assert!(matches!(to_four_digit_year("1999", ""), Err(HoldingsError::ShortYearContract { .. })));
        assert!(matches!(to_four_digit_year("1999", "001"), Err(HoldingsError::ShortYearContract { .. })));
        assert!(matches!(to_four_digit_year("19x9", "01"), Err(HoldingsError::ShortYearContract { .. })));
    }

    #[test]
    fn three_groups_chain_through_penultimate() {
        // 1998/99-00/01: penultimate "00" resolves against 1998, end "01" against 2000.
        let expr = closed_range(&captured(vec!["1998", "00", "01"])).unwrap();
        assert_eq!(expr, RangeExpression { start: 1998, penultimate: 2000, end: 2001 });

        let expr = closed_range(&captured(vec!["1980", "2004", "05"])).unwrap();
        assert_eq!(expr, RangeExpression { start: 1980, penultimate: 2004, end: 2005 });
    }

    #[test]
    fn two_groups_use_start_as_context() {
        let expr = closed_range(&captured(vec!["1999", "01"])).unwrap();
        assert_eq!(expr, RangeExpression { start: 1999, penultimate: 1999, end: 2001 });

        let expr = closed_range(&captured(vec!["1980", "2005"])).unwrap();
        assert_eq!(expr.end, 2005);
    }

    #[test]
    fn wrong_group_count_is_an_arity_error() {
        let err = closed_range(&captured(vec!["1980"])).unwrap_err();
        assert_eq!(err, HoldingsError::CaptureArity { rule: "test", expected: "2 or 3", found: 1 });
    }

    #[test]
    fn chained_short_years_may_pass_9999() {
        let expr = closed_range(&captured(vec!["9999", "00", "1"])).unwrap();
        assert_eq!(expr, RangeExpression { start: 9999, penultimate: 10000, end: 10001 });

        let expr = closed_range(&captured(vec!["9998", "99", "05"])).unwrap();
        assert_eq!(expr, RangeExpression { start: 9998, penultimate: 9999, end: 10005 });
    }

    #[test]
    fn open_range_ends_at_current_year() {
        let expr = open_range(&captured(vec!["1990"]), 2024).unwrap();
        assert_eq!(expr, RangeExpression::span(1990, 2024));
    }
}
