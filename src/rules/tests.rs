use crate::engine::{CompiledRules, Parser};
use crate::{Context, DiagnosticKind, Options, YearSet};

const CURRENT_YEAR: i32 = 2024;

fn years(range: std::ops::RangeInclusive<i32>) -> Vec<i32> {
    range.collect()
}

fn held(input: &str) -> (Vec<i32>, Vec<DiagnosticKind>) {
    let rules = crate::rules::get();
    let compiled = CompiledRules::new(&rules).unwrap();

    // Run the full cascade (like `parse_with`) so stage interplay is covered.
    let result = Parser::new_compiled(input, &compiled).run(&Context::new(CURRENT_YEAR), &Options::default()).unwrap();
    let set: YearSet = result.extractions.iter().flat_map(|e| e.years.iter().copied()).collect();
    (set.years().to_vec(), result.diagnostics.iter().map(|d| d.kind).collect())
}

#[test]
fn holdings_examples_matching() {
    // Array of (expected_years, input_string)
    let cases: Vec<(Vec<i32>, &str)> = vec![
        // short end years and the century rollover
        (years(1995..=1996), " 1.1 1995/6 "),
        (years(1984..=1985), " 1.1 1984/85 "),
        (years(1999..=2001), " 1.1 1999/01 "),
        (years(1999..=2001), " 1.1 1999/1 "),
        (years(1984..=1985), "1984-85"),
        (years(1984..=1985), "1984/1985"),
        // plain and parenthesized ranges
        (years(1980..=2005), "v.1-25 1980-2005"),
        (years(1998..=2009), "(1998- 2009)"),
        (years(1998..=2009), "(1998- 09)"),
        (years(1998..=2009), "1998 - 2009"),
        (years(1970..=1979), "v.1-10 (1970-1979)"),
        // endpoints written per volume
        (years(1980..=2005), "v.1(1980)-v.25(2005)"),
        (years(1980..=2005), "v.1(1980)- v.25(2005)"),
        (years(1998..=2001), "v.1(1998)-v.4(01)"),
        (years(1980..=2005), "v.1(1980/81)-v.25(2004/05)"),
        (years(1980..=2005), "v.1(1980)-v.25(2004/05)"),
        (years(1980..=2005), "v.1(1980/81)-v.25(2005)"),
        (years(1980..=2005), "1:1980-25:2005"),
        (years(1998..=2001), "v.1:1998-v.4:01"),
        (years(1980..=1984), "v.1 (1980)-v.5 (1984)"),
        (years(1980..=1984), "v.1 (1980) - v.5 (1984)"),
        (years(1980..=2005), "v.1 (1980/81)-v.25 (2004/05)"),
        (years(1980..=1984), "v.1 1980-v.5 1984"),
        (years(1980..=1984), "v.1 1980- v.5 1984"),
        (years(1980..=1984), "1980 - v.5 1984"),
        // doubled and short-all compact forms
        (years(1995..=2005), "1995/96-2004/05"),
        (years(1995..=2005), "1995/6-2004/5"),
        (years(1995..=2000), "1995/96-99/00"),
        (years(1998..=2001), "1998/99-00/01"),
        (years(1980..=2006), "1980-2005/06"),
        (years(1995..=2005), "1995/96-2005"),
        (years(1995..=1999), "1995/6-99"),
        // to-current
        (years(1980..=CURRENT_YEAR), "1980-"),
        (years(1980..=CURRENT_YEAR), "1980 -"),
        (years(1980..=CURRENT_YEAR), "1980-to date"),
        (years(1980..=CURRENT_YEAR), "1980-Present"),
        (years(1980..=CURRENT_YEAR), "1980 to present"),
        (years(2020..=CURRENT_YEAR), "since 2020"),
        (years(2020..=CURRENT_YEAR), "2020+"),
        (years(2019..=CURRENT_YEAR), "v.1(2019)-"),
        (years(2018..=CURRENT_YEAR), "v.1:2018-"),
        (years(1995..=CURRENT_YEAR), "(1995/96-)"),
        (years(1970..=CURRENT_YEAR), "v.1-10 (1970-1979) v.11- (1980- )"),
        // single years
        (vec![1960], "1960"),
        (vec![1980], "[1980]"),
        (vec![1990], "No. 1111 1990"),
        (vec![1950, 1952, 1953, 1954, 1960], "1950, 1952-1954; 1960"),
        // mixtures, duplicates and addenda
        (years(1980..=1985), "1980-1985 1983"),
        (years(1980..=1985), "1980-1985 Suppl. 1990"),
        (years(1980..=1985), "1980 - 1985 lacking 1983"),
        (vec![1980], "1980 19??"),
        ([years(1980..=1984), years(1990..=CURRENT_YEAR)].concat(), "v.1(1980)-v.5(1984), v.10(1990)-"),
        // nothing usable
        (vec![], ""),
        (vec![], "v.1-25"),
        (vec![], "3000"),
        (vec![], "١٩٨٠-١٩٨٥"),
    ];

    for (expected, input) in cases {
        let (actual, diagnostics) = held(input);
        assert_eq!(actual, expected, "wrong years for input '{}' (diagnostics: {:?})", input, diagnostics);
    }
}

#[test]
fn data_quality_issues_become_diagnostics() {
    let cases: Vec<(DiagnosticKind, &str)> = vec![
        (DiagnosticKind::OutOfRange { year: 3000 }, "3000"),
        (DiagnosticKind::OutOfRange { year: 1111 }, "1111"),
        (DiagnosticKind::OutOfRange { year: 2099 }, "2020-99"),
        (DiagnosticKind::Reversed { start: 1999, end: 1995 }, "1999-1995"),
        (DiagnosticKind::Reversed { start: 2025, end: CURRENT_YEAR }, "2025-"),
        (DiagnosticKind::OutOfRange { year: 9999 }, "9999/00-00/1"),
        (DiagnosticKind::OutOfRange { year: 9998 }, "9998/99-05"),
    ];

    for (expected, input) in cases {
        let (actual, diagnostics) = held(input);
        assert!(actual.is_empty(), "input '{}' should hold nothing, got {:?}", input, actual);
        assert_eq!(diagnostics, vec![expected], "wrong diagnostics for input '{}'", input);
    }
}

#[test]
fn label_closing_keeps_issue_numbers_out() {
    // "No. 1500" would otherwise read as the year 1500.
    let (actual, diagnostics) = held("No. 1500 1990");
    assert_eq!(actual, vec![1990]);
    assert!(diagnostics.is_empty());
}
