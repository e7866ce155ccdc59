//! The static vocabulary: statement normalization, the two-digit-year
//! resolver, and the rule tables for each cascade stage.

use crate::Rule;

pub mod helpers;
pub mod normalize;
pub mod rules_closed_ranges;
pub mod rules_single_years;
pub mod rules_to_current;

#[cfg(test)]
mod tests;

/// The built-in rule table, grouped by stage in cascade order. Within a
/// stage, rules run in the order listed here.
pub fn get() -> Vec<Rule> {
    let mut rules = Vec::new();
    rules.extend(rules_to_current::get());
    rules.extend(rules_closed_ranges::get());
    rules.extend(rules_single_years::get());
    rules
}
