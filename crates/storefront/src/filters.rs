//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Spells out an item count: `1 item`, `3 items`.
///
/// Usage in templates: `{{ shell.cart.item_count|item_label }}`
#[askama::filter_fn]
pub fn item_label(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let count = count.to_string();
    let noun = if count == "1" { "item" } else { "items" };
    Ok(format!("{count} {noun}"))
}

/// Returns the content hash for main.css, computed by the build script.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}
