//! Brace expansion and extglob rewriting.
//!
//! Both run before a pattern is split into segments: `{a,b}` and `@(a|b)`
//! each become two patterns. Brace groups expand first, so commas inside an
//! extglob group are never read as brace separators.

use crate::utils::{find_closing, split_top_level};

/// Largest numeric or character range a single `{x..y}` group may expand to.
const MAX_RANGE_LEN: usize = 10_000;

/// Expands every brace group in `pattern`.
///
/// Supports comma lists (`{a,b}`), nesting (`{a,{b,c}}`), empty alternatives
/// (`a{,.bak}`), and numeric or character ranges (`{1..3}`, `{a..c}`). Groups
/// with a single alternative are left untouched.
///
/// # Examples
///
/// ```
/// use patterns::expand_braces;
///
/// assert_eq!(expand_braces("*.{js,ts}"), vec!["*.js", "*.ts"]);
/// assert_eq!(expand_braces("v{1..3}"), vec!["v1", "v2", "v3"]);
/// assert_eq!(expand_braces("plain"), vec!["plain"]);
/// ```
#[must_use]
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        match chars[index] {
            '\\' => {
                index += 2;
                continue;
            }
            '{' => {
                if let Some(end) = find_closing(&chars, index, '{', '}') {
                    let body: String = chars[index + 1..end].iter().collect();
                    if let Some(alternatives) = alternatives(&body) {
                        let prefix: String = chars[..index].iter().collect();
                        let suffix: String = chars[end + 1..].iter().collect();
                        let mut expanded = Vec::new();
                        for alternative in alternatives {
                            expanded.extend(expand_braces(&format!("{prefix}{alternative}{suffix}")));
                        }
                        return expanded;
                    }
                }
            }
            _ => {}
        }
        index += 1;
    }
    vec![pattern.to_owned()]
}

fn alternatives(body: &str) -> Option<Vec<String>> {
    let parts = split_top_level(body, ',');
    if parts.len() > 1 {
        return Some(parts);
    }
    range(body)
}

fn range(body: &str) -> Option<Vec<String>> {
    let (start, end) = body.split_once("..")?;

    if let (Ok(start), Ok(end)) = (start.parse::<i64>(), end.parse::<i64>()) {
        let len = start.abs_diff(end);
        if len >= MAX_RANGE_LEN as u64 {
            return None;
        }
        let values: Vec<String> = if start <= end {
            (start..=end).map(|value| value.to_string()).collect()
        } else {
            (end..=start).rev().map(|value| value.to_string()).collect()
        };
        return Some(values);
    }

    let mut start_chars = start.chars();
    let mut end_chars = end.chars();
    match (start_chars.next(), start_chars.next(), end_chars.next(), end_chars.next()) {
        (Some(first), None, Some(last), None)
            if first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric() =>
        {
            let values: Vec<String> = if first <= last {
                (first..=last).map(String::from).collect()
            } else {
                (last..=first).rev().map(String::from).collect()
            };
            Some(values)
        }
        _ => None,
    }
}

/// Expands `@(..)` and `?(..)` groups into separate patterns.
///
/// `@(a|b)` yields one pattern per alternative and `?(a|b)` adds one more
/// without the group. This runs whether or not brace expansion is enabled.
/// `*(..)`, `+(..)`, and `!(..)` groups, along with anything nested in them,
/// stay in place for the segment matcher.
///
/// # Examples
///
/// ```
/// use patterns::expand_extglob;
///
/// assert_eq!(expand_extglob("@(a|b).js"), vec!["a.js", "b.js"]);
/// assert_eq!(expand_extglob("app?(.min).js"), vec!["app.js", "app.min.js"]);
/// assert_eq!(expand_extglob("*(a|b).js"), vec!["*(a|b).js"]);
/// ```
#[must_use]
pub fn expand_extglob(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        if ch == '\\' {
            index += 2;
            continue;
        }

        if matches!(ch, '@' | '?' | '*' | '+' | '!')
            && chars.get(index + 1) == Some(&'(')
            && let Some(end) = find_closing(&chars, index + 1, '(', ')')
        {
            if matches!(ch, '@' | '?') {
                let prefix: String = chars[..index].iter().collect();
                let suffix: String = chars[end + 1..].iter().collect();
                let body: String = chars[index + 2..end].iter().collect();
                let mut expanded = Vec::new();
                if ch == '?' {
                    expanded.extend(expand_extglob(&format!("{prefix}{suffix}")));
                }
                for alternative in split_top_level(&body, '|') {
                    expanded.extend(expand_extglob(&format!("{prefix}{alternative}{suffix}")));
                }
                return expanded;
            }
            index = end + 1;
            continue;
        }
        index += 1;
    }
    vec![pattern.to_owned()]
}
