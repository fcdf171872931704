/*
 * cleanup.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Case folding and character/line cleanup.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Uppercase the first character; the rest of the text is left as-is.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip diacritics: `"Crème brûlée"` becomes `"Creme brulee"`.
///
/// Characters are decomposed (NFD), combining marks dropped, and the
/// remainder recomposed.
pub fn normalize_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).nfc().collect()
}

/// Drop every line that is empty or contains only whitespace.
///
/// Line terminators of the kept lines are preserved.
pub fn remove_blank_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Drop every character outside the ASCII range.
pub fn remove_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}
