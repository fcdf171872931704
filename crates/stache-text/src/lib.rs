/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Text helpers for the stache template engine.
//!
//! Every function here is a pure `&str -> String` transformation. The engine's
//! content tags call exactly one of them on the fully rendered body of the tag.
//! Malformed input never fails: a helper that cannot make sense of its input
//! hands the text back unchanged.

pub mod cleanup;
pub mod digest;
pub mod encoding;
pub mod number;

pub use cleanup::{capitalize, normalize_accents, remove_blank_lines, remove_non_ascii};
pub use digest::{md5_hex, sha256_hex};
pub use encoding::{html_decode, html_encode, url_decode, url_encode};
pub use number::{MAX_DECIMAL_PLACES, format_number, try_format_number};
