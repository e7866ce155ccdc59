use holdings_years::{Context, Options, normalize, parse_with, to_four_digit_year};
use proptest::prelude::*;

const CURRENT_YEAR: i32 = 2024;

fn ctx() -> Context {
    Context::new(CURRENT_YEAR)
}

/// Mostly realistic years, with a tail near the four-digit limit.
fn arb_year() -> impl Strategy<Value = i32> {
    prop_oneof![4 => 1300i32..2100, 1 => 9900i32..10000]
}

/// Statements stitched together from holdings-like fragments.
fn arb_statement() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        arb_year().prop_map(|y| y.to_string()),
        prop_oneof![
            (arb_year(), 0u32..100).prop_map(|(y, s)| format!("{y}/{s}")),
            (arb_year(), 0u32..100, 0u32..100, 0u32..10).prop_map(|(y, a, b, c)| format!("{y}/{a:02}-{b:02}/{c}")),
        ],
        (arb_year(), arb_year()).prop_map(|(a, b)| format!("{a}-{b}")),
        (arb_year(), 0u32..100).prop_map(|(a, b)| format!("({a}-{b:02})")),
        (1u32..40, arb_year()).prop_map(|(v, y)| format!("v.{v}({y})-")),
        (arb_year(), 1u32..40, arb_year()).prop_map(|(a, v, b)| format!("{a} - v.{v} {b}")),
        Just("to date".to_string()),
        Just("suppl.".to_string()),
        Just("no.".to_string()),
        "[ -~]{0,6}",
    ];
    prop::collection::vec(fragment, 0..8).prop_map(|parts| parts.join(" "))
}

proptest! {
    /// A short year resolves to the nearest year at or after its context
    /// that ends in the same digits.
    #[test]
    fn prop_short_year_never_goes_backwards(full in 1000i32..10000, short in "[0-9]{1,2}") {
        let resolved = to_four_digit_year(&full.to_string(), &short).unwrap();
        let unit = if short.len() == 1 { 10 } else { 100 };

        prop_assert!(resolved >= full);
        prop_assert!(resolved - full < unit);
        prop_assert_eq!(resolved % unit, short.parse::<i32>().unwrap());
    }

    /// Held years are distinct, ascending and inside the plausibility guard.
    #[test]
    fn prop_years_are_sorted_and_plausible(statement in arb_statement()) {
        let held = parse_with(&statement, &ctx(), &Options::default());
        let years = held.years_held();

        prop_assert!(years.windows(2).all(|w| w[0] < w[1]), "not strictly ascending: {:?}", years);
        prop_assert!(years.iter().all(|&y| (1400..=CURRENT_YEAR + 1).contains(&y)), "implausible year in {:?}", years);
    }

    /// Free text never makes the parser fail.
    #[test]
    fn prop_arbitrary_text_is_accepted(statement in "\\PC{0,60}") {
        let held = parse_with(&statement, &ctx(), &Options::default());
        prop_assert!(held.years_held().windows(2).all(|w| w[0] < w[1]));
    }

    /// Held and missing years partition `earliest..=latest`.
    #[test]
    fn prop_held_and_missing_cover_the_span(statement in arb_statement()) {
        let held = parse_with(&statement, &ctx(), &Options::default());
        let years = held.years_held();
        let missing = held.missing_years();

        match (held.first_year(), held.last_year()) {
            (Some(first), Some(last)) => {
                prop_assert_eq!(held.earliest_year(), first.to_string());
                prop_assert_eq!(held.latest_year(), last.to_string());
                prop_assert_eq!(held.year_span() as usize, years.len() + missing.len());

                let mut all: Vec<i32> = years.iter().copied().chain(missing.iter().copied()).collect();
                all.sort_unstable();
                prop_assert_eq!(all, (first..=last).collect::<Vec<_>>());
            }
            _ => {
                prop_assert_eq!(held.earliest_year(), "");
                prop_assert_eq!(held.latest_year(), "");
                prop_assert_eq!(held.year_span(), 0);
                prop_assert!(missing.is_empty());
            }
        }
    }

    /// A plain closed range yields exactly its years.
    #[test]
    fn prop_plain_range_is_expanded(start in 1400i32..=CURRENT_YEAR, len in 0i32..60) {
        let end = (start + len).min(CURRENT_YEAR);
        let held = parse_with(&format!("{start}-{end}"), &ctx(), &Options::default());

        prop_assert_eq!(held.years_held().to_vec(), (start..=end).collect::<Vec<_>>());
        prop_assert!(held.missing_years().is_empty());
    }

    #[test]
    fn prop_normalize_is_idempotent(text in "\\PC{0,60}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }
}
