//! Text helpers shared by the admin forms.

/// Turn a display name into a URL slug.
///
/// Lowercases, replaces each run of whitespace with `-`, then drops every
/// character that is not an ASCII letter, digit, `_` or `-`.
///
/// ```
/// use freshcart_commerce::text::slugify;
/// assert_eq!(slugify("Garden Fresh Salad"), "garden-fresh-salad");
/// ```
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }

    out
}

/// True when the value is missing or only whitespace.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}
