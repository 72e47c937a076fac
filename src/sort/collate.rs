//! Locale-aware string ordering
//!
//! Approximates root-locale collation without pulling in locale data.
//! Text is compared in canonical decomposition (NFD), so an accented
//! letter is its base letter plus combining marks:
//!
//! 1. Primary: base letters only, case-insensitive, with character
//!    classes ordered whitespace < punctuation/symbols < digits < letters
//! 2. Secondary: accents, unaccented before accented
//! 3. Tertiary: at the first case difference, lowercase sorts first
//! 4. Final: code point order, so distinct strings never compare equal

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two strings the way a human-facing list expects
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    primary_keys(a)
        .cmp(primary_keys(b))
        .then_with(|| accent_keys(a).cmp(&accent_keys(b)))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_keys(s: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

/// Combining marks attached to each base character, in order
fn accent_keys(s: &str) -> Vec<Vec<char>> {
    let mut keys: Vec<Vec<char>> = Vec::new();
    for c in s.nfd() {
        match keys.last_mut() {
            Some(marks) if is_combining_mark(c) => marks.push(c),
            _ => keys.push(if is_combining_mark(c) { vec![c] } else { Vec::new() }),
        }
    }
    keys
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_numeric() {
        2
    } else if c.is_alphabetic() {
        3
    } else {
        1
    }
}

fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
