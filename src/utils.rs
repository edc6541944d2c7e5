//! Ordinal, case-insensitive string helpers.
//!
//! Names are compared the way the host runtime's ordinal-ignore-case comparer does: both
//! strings are upper-cased character by character and the results compared by code point.
//! Each character folds to exactly one character; one whose upper case expands (`ß` to
//! `SS`) stays as it is. No culture rules apply, so results are identical on every machine.

use std::cmp::Ordering;

fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().map(fold)
}

/// Compare two strings ordinally, ignoring case.
#[must_use]
pub fn cmp_ignore_case(left: &str, right: &str) -> Ordering {
    folded(left).cmp(folded(right))
}

/// Returns `true` if both strings are equal, ignoring case.
#[must_use]
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    cmp_ignore_case(left, right) == Ordering::Equal
}

/// Returns `true` if `text` starts with `prefix`, ignoring case.
#[must_use]
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text = folded(text);
    folded(prefix).all(|expected| text.next() == Some(expected))
}

/// Returns `true` if `text` contains `needle`, ignoring case.
#[must_use]
pub fn contains_ignore_case(text: &str, needle: &str) -> bool {
    let haystack: String = folded(text).collect();
    let needle: String = folded(needle).collect();
    haystack.contains(&needle)
}
