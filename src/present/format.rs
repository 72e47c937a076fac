//! Cell formatting

use crate::record::ValueRef;

/// Widest display for loan ids
pub const ID_WIDTH: usize = 8;
/// Widest display for city names
pub const CITY_WIDTH: usize = 15;
/// Widest display for property types
pub const PROPERTY_TYPE_WIDTH: usize = 20;

const ELLIPSIS: &str = "...";

/// Money cell.
///
/// Numbers get thousands separators and at most three decimals; text
/// that already carries separators is shown as-is. Missing values render
/// empty.
pub fn format_currency(value: Option<ValueRef<'_>>) -> String {
    match value {
        None | Some(ValueRef::Null) => String::new(),
        Some(ValueRef::Number(n)) => format!("${}", group_thousands(n)),
        Some(other) => format!("${}", other),
    }
}

/// Cuts `text` to `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

fn group_thousands(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let rounded = format!("{:.3}", n.abs());
    let (int, frac) = rounded
        .split_once('.')
        .unwrap_or((rounded.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int.len() / 3 + 1);
    if n < 0.0 && (int != "0" || !frac.is_empty()) {
        out.push('-');
    }
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}
