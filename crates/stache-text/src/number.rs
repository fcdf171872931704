/*
 * number.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Numeric formatting.

/// Largest number of decimal places honored; larger requests are clamped.
pub const MAX_DECIMAL_PLACES: usize = 1000;

/// Format numeric text with thousands separators and a fixed number of
/// decimal places, e.g. `format_number("1234.567", 2) == "1,234.57"`.
///
/// Text that does not parse as a finite number is returned unchanged.
pub fn format_number(text: &str, decimal_places: usize) -> String {
    try_format_number(text, decimal_places).unwrap_or_else(|| text.to_string())
}

/// Like [`format_number`], but `None` when `text` is not a finite number.
pub fn try_format_number(text: &str, decimal_places: usize) -> Option<String> {
    let value = text.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let decimal_places = decimal_places.min(MAX_DECIMAL_PLACES);

    let fixed = format!("{:.*}", decimal_places, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // Rounding can turn a tiny negative into zero; no sign in that case.
    if value.is_sign_negative() && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
