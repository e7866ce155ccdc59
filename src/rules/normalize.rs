//! Statement normalization.
//!
//! Every stage pattern assumes a padded statement with no whitespace inside
//! a range and no trailing annotation text. `normalize` establishes that:
//!
//! ```text
//! " v.1(1980)- v.25(2005) suppl. 1990"
//!   pad      -> " v.1(1980)- v.25(2005) suppl. 1990 "
//!   close    -> " v.1(1980)-v.25(2005) suppl. 1990 "
//!   truncate -> " v.1(1980)-v.25(2005) "
//! ```
//!
//! Padding only adds a space where one is missing.
//!
//! The step sequence is repeated until the text stops changing, so the
//! result is a fixed point: `normalize(&normalize(s)) == normalize(s)`.

use regex::Regex;
use std::borrow::Cow;

/// Annotation markers after which a statement no longer describes holdings.
/// Matched case-insensitively as substrings.
const STOP_PHRASES: &[&str] = &[
    "suppl",
    "index",
    "lacking",
    "lacks",
    "wanting",
    "missing",
    "note:",
    "with gaps",
    "latest",
    "retain",
    "bound with",
    "title varies",
];

/// Capture-and-splice rules that drop whitespace between two tokens.
fn closing_rules() -> [(&'static Regex, &'static str); 6] {
    [
        // "No. 1111" -> "No.1111"
        (regex!(r"(?i)(\b(?:nos?|vols?|v|pt|bd|jahrg|t|ser)\.)\s+(\d)"), "$1$2"),
        // "1998 -2009" -> "1998-2009"
        (regex!(r"(\d{4})\s+(-)"), "$1$2"),
        // "(1998- 2009)" -> "(1998-2009)"
        (regex!(r"(\d{4}-)\s+(\d{4})"), "$1$2"),
        // "1980- v.5 1984" -> "1980-v.5 1984"
        (regex!(r"(?i)(\d{4}-)\s+([a-z]+\.\d+\s+\d{4})"), "$1$2"),
        // "(1998- 09)" -> "(1998-09)"
        (regex!(r"(\(\d{4}-)\s+(\d{1,2}\))"), "$1$2"),
        // "v.1(1980)- v.25(2005)" -> "v.1(1980)-v.25(2005)"
        (regex!(r"(?i)(\d{4}\))\s*-\s*([a-z0-9(])"), "$1-$2"),
    ]
}

/// Normalize a raw holdings statement for the extraction cascade.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn normalize_once(input: &str) -> String {
    let mut text = pad(input);

    for (re, replacement) in closing_rules() {
        if let Cow::Owned(replaced) = re.replace_all(&text, replacement) {
            text = replaced;
        }
    }

    truncate_addenda(&mut text);
    text = strip_uncertain_years(&text);

    if !text.ends_with(' ') {
        text.push(' ');
    }
    text
}

fn pad(input: &str) -> String {
    let mut text = String::with_capacity(input.len() + 2);
    if !input.starts_with(' ') {
        text.push(' ');
    }
    text.push_str(input);
    if !input.ends_with(' ') {
        text.push(' ');
    }
    text
}

/// Cut the statement at the first occurrence of every stop phrase.
fn truncate_addenda(text: &mut String) {
    for phrase in STOP_PHRASES {
        // ASCII lowercasing keeps byte offsets aligned with `text`.
        let lower = text.to_ascii_lowercase();
        if let Some(pos) = lower.find(phrase) {
            text.truncate(pos);
        }
    }
}

/// Delete uncertain-year fragments such as `9?-` or `19??`.
fn strip_uncertain_years(text: &str) -> String {
    let re = regex!(r"(\D)\d{1,2}\?{1,2}-?");
    re.replace_all(text, "$1").into_owned()
}
