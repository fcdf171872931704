/*
 * encoding.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! HTML and URL encoding helpers.

use percent_encoding::percent_decode_str;
use quick_xml::escape::resolve_html5_entity;

/// Longest entity body (between `&` and `;`) we try to decode.
const MAX_ENTITY_LEN: usize = 32;

/// Escape HTML special characters.
pub fn html_encode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Decode HTML character references.
///
/// Named HTML5 entities and decimal/hex numeric references are decoded.
/// Anything that does not form a valid reference (a lone `&`, an unknown
/// name) is copied through untouched.
pub fn html_decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&after[..end]).map(|d| (d, end)));

        match decoded {
            Some((text, end)) => {
                out.push_str(&text);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    resolve_html5_entity(entity).map(str::to_string)
}

/// Form-encode text: spaces become `+`, reserved bytes become `%XX`.
pub fn url_encode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Decode form-encoded text: `+` becomes a space and `%XX` sequences are
/// decoded. Invalid UTF-8 is replaced rather than rejected.
pub fn url_decode(text: &str) -> String {
    let spaced = text.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
