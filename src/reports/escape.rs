//! Escaping utilities for safe report generation.
//!
//! Question text, comments, and evidence URLs are free text entered by
//! reviewers. They may contain Markdown syntax that breaks tables, or
//! commas, quotes, and line breaks that corrupt CSV rows. Escape every
//! user-controllable value before embedding it in a report.

/// Escape a string for safe inclusion in a Markdown table cell.
///
/// # Examples
///
/// ```
/// use tmmi_tracker::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a|b"), "a\\|b");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in Markdown inline content.
///
/// # Examples
///
/// ```
/// use tmmi_tracker::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// ```
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' | '_' | '`' | '[' | ']' | '#' | '!' | '~' | '|' | '<' | '>' => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Quote a CSV field per RFC 4180.
///
/// Fields containing a comma, a double quote, or a line break are wrapped
/// in double quotes with embedded quotes doubled; other fields pass through.
///
/// # Examples
///
/// ```
/// use tmmi_tracker::reports::escape::escape_csv_field;
///
/// assert_eq!(escape_csv_field("plain"), "plain");
/// assert_eq!(escape_csv_field("a, b"), "\"a, b\"");
/// assert_eq!(escape_csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
#[must_use]
pub fn escape_csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Escape an optional Markdown table value, rendering `None` as `-`.
#[must_use]
pub fn escape_md_opt(s: Option<&str>) -> String {
    s.filter(|v| !v.trim().is_empty())
        .map_or_else(|| "-".to_string(), escape_markdown_table)
}
