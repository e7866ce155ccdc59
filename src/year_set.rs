//! Year values: the plausibility guard, the intermediate range expression a
//! rule produces, and the final aggregated set of held years.

use crate::{Context, Options};
use std::fmt;
use std::ops::RangeInclusive;

/// Decides whether an integer is a plausible publication year.
///
/// The upper bound is one past the context's current year so statements
/// that already list next year's volume are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearGuard {
    min_year: i32,
    max_year: i32,
}

impl YearGuard {
    pub fn new(context: &Context, options: &Options) -> Self {
        YearGuard { min_year: options.min_year, max_year: context.current_year.saturating_add(1) }
    }

    /// True iff `min_year <= year <= current_year + 1`.
    pub fn is_plausible(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }
}

/// The result of a single rule match before expansion.
///
/// `penultimate` is the full year immediately left of the end year and is
/// only used as century context while resolving a short end year. Rules with
/// two capture groups set it equal to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeExpression {
    pub start: i32,
    pub penultimate: i32,
    pub end: i32,
}

impl RangeExpression {
    pub fn single(year: i32) -> Self {
        RangeExpression { start: year, penultimate: year, end: year }
    }

    pub fn span(start: i32, end: i32) -> Self {
        RangeExpression { start, penultimate: start, end }
    }

    /// Every year in `start..=end`; empty when the range runs backwards.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn is_reversed(&self) -> bool {
        self.end < self.start
    }
}

/// Sorted, duplicate-free set of held years.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct YearSet {
    years: Vec<i32>,
}

impl YearSet {
    pub fn empty() -> Self {
        YearSet { years: Vec::new() }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn first(&self) -> Option<i32> {
        self.years.first().copied()
    }

    pub fn last(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Minimum year as a string, or `""` when nothing is held.
    pub fn earliest(&self) -> String {
        self.first().map(|y| y.to_string()).unwrap_or_default()
    }

    /// Maximum year as a string, or `""` when nothing is held.
    pub fn latest(&self) -> String {
        self.last().map(|y| y.to_string()).unwrap_or_default()
    }

    /// `max - min + 1`, or `0` when nothing is held.
    pub fn span(&self) -> u32 {
        match (self.first(), self.last()) {
            (Some(min), Some(max)) => max.abs_diff(min) + 1,
            _ => 0,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// True when every year of `range` is held. An empty range is trivially held.
    pub fn contains_all(&self, range: RangeInclusive<i32>) -> bool {
        range.into_iter().all(|y| self.contains(y))
    }

    /// Years between the first and last held year that are not held.
    pub fn missing(&self) -> Vec<i32> {
        self.years.windows(2).flat_map(|pair| pair[0] + 1..pair[1]).collect()
    }

    /// Missing years collapsed into inclusive runs.
    pub fn gaps(&self) -> Vec<RangeInclusive<i32>> {
        self.years.windows(2).filter(|pair| pair[1] - pair[0] > 1).map(|pair| pair[0] + 1..=pair[1] - 1).collect()
    }

    /// Held years collapsed into inclusive runs.
    pub fn runs(&self) -> Vec<RangeInclusive<i32>> {
        let mut runs: Vec<RangeInclusive<i32>> = Vec::new();
        for &year in &self.years {
            match runs.last_mut() {
                Some(run) if *run.end() + 1 == year => *run = *run.start()..=year,
                _ => runs.push(year..=year),
            }
        }
        runs
    }
}

impl FromIterator<i32> for YearSet {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut years: Vec<i32> = iter.into_iter().collect();
        years.sort_unstable();
        years.dedup();
        YearSet { years }
    }
}

impl fmt::Display for YearSet {
    /// Compact run form, e.g. `1980-1985, 1990`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, run) in self.runs().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            if run.start() == run.end() {
                write!(f, "{}", run.start())?;
            } else {
                write!(f, "{}-{}", run.start(), run.end())?;
            }
        }
        Ok(())
    }
}
