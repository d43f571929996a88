//! Pattern classification helpers shared by task generation and filtering.

use crate::MatchOptions;

/// Characters that carry glob meaning and must be escaped in literal paths.
const SPECIAL_CHARS: &[char] = &['*', '?', '[', ']', '{', '}', '(', ')', '!', '@', '+', '\\'];

/// Returns `true` when the pattern is a negation (`!pattern`).
///
/// A leading `!(` opens an extglob group and is not a negation.
#[must_use]
pub fn is_negative(pattern: &str) -> bool {
    pattern.starts_with('!') && !pattern.starts_with("!(")
}

/// Returns `true` when the pattern is not a negation.
#[must_use]
pub fn is_positive(pattern: &str) -> bool {
    !is_negative(pattern)
}

/// Strips the negation marker, if any.
#[must_use]
pub fn convert_to_positive(pattern: &str) -> &str {
    if is_negative(pattern) {
        &pattern[1..]
    } else {
        pattern
    }
}

/// Prefixes the pattern with the negation marker.
#[must_use]
pub fn convert_to_negative(pattern: &str) -> String {
    format!("!{pattern}")
}

/// Returns `true` when the pattern needs matching rather than an exact stat.
///
/// Negations are always dynamic. Braces and extglob groups only count when the
/// corresponding syntax is enabled in `options`.
#[must_use]
pub fn is_dynamic(pattern: &str, options: &MatchOptions) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if is_negative(pattern) {
        return true;
    }
    has_magic(pattern, options)
}

/// Inverse of [`is_dynamic`].
#[must_use]
pub fn is_static(pattern: &str, options: &MatchOptions) -> bool {
    !is_dynamic(pattern, options)
}

pub(crate) fn has_magic(pattern: &str, options: &MatchOptions) -> bool {
    let chars: Vec<char> = pattern.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        match chars[index] {
            '\\' => {
                index += 2;
                continue;
            }
            '*' | '?' => return true,
            '[' if find_class_end(&chars, index).is_some() => return true,
            '{' if options.brace => {
                if let Some(end) = find_closing(&chars, index, '{', '}') {
                    let body: String = chars[index + 1..end].iter().collect();
                    if split_top_level(&body, ',').len() > 1 || body.contains("..") {
                        return true;
                    }
                }
            }
            '@' | '!' | '+' if options.extglob && chars.get(index + 1) == Some(&'(') => {
                return true;
            }
            _ => {}
        }
        index += 1;
    }
    false
}

/// Returns the static directory prefix of a pattern.
///
/// The prefix stops at the first segment carrying glob syntax, and never
/// includes the final segment. An empty prefix is reported as `.`, and a bare
/// root (`/*`) as `/`.
///
/// # Examples
///
/// ```
/// use patterns::{MatchOptions, get_base_directory};
///
/// let options = MatchOptions::default();
/// assert_eq!(get_base_directory("a/b/*.js", &options), "a/b");
/// assert_eq!(get_base_directory("a/file.json", &options), "a");
/// assert_eq!(get_base_directory("**/*.md", &options), ".");
/// assert_eq!(get_base_directory("{a,b}/*", &options), ".");
/// ```
#[must_use]
pub fn get_base_directory(pattern: &str, options: &MatchOptions) -> String {
    let segments = split_segments(pattern);
    let mut base: Vec<&str> = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        if index + 1 == segments.len() || is_dynamic(segment, options) {
            break;
        }
        base.push(segment);
    }

    let joined = base.join("/");
    if joined.is_empty() {
        if pattern.starts_with('/') {
            "/".to_owned()
        } else {
            ".".to_owned()
        }
    } else {
        joined
    }
}

/// Splits a pattern on `/`, keeping separators inside `{}`, `[]`, and `()` groups.
#[must_use]
pub fn split_segments(pattern: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut escaped = false;
    for (offset, ch) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&pattern[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    segments.push(&pattern[start..]);
    segments
}

/// Returns `true` when the pattern excludes a whole subtree (`dir/**`).
#[must_use]
pub fn ends_with_globstar(pattern: &str) -> bool {
    pattern == "**" || pattern.ends_with("/**")
}

/// Removes a trailing `/**`, leaving the pattern for the subtree root.
#[must_use]
pub fn strip_globstar_suffix(pattern: &str) -> &str {
    pattern.strip_suffix("/**").unwrap_or(pattern)
}

/// Strips every leading `./` (or `.\`) segment.
#[must_use]
pub fn remove_leading_dot_segment(path: &str) -> &str {
    let mut path = path;
    while let Some(rest) = path.strip_prefix("./").or_else(|| path.strip_prefix(".\\")) {
        path = rest;
    }
    path
}

/// Converts a Windows-style path to POSIX separators.
#[must_use]
pub fn unixify(path: &str) -> String {
    path.replace('\\', "/")
}

/// Joins `path` onto `cwd` unless it is already absolute.
///
/// Leading `..` segments of `path` are folded into `cwd`, so a path reached
/// by leaving the working directory has a single absolute spelling.
#[must_use]
pub fn make_absolute(cwd: &str, path: &str) -> String {
    if is_absolute(path) {
        return path.to_owned();
    }
    let mut relative = remove_leading_dot_segment(path);
    let mut cwd = cwd.trim_end_matches('/');
    loop {
        let rest = if relative == ".." {
            ""
        } else if let Some(rest) = relative.strip_prefix("../") {
            rest
        } else {
            break;
        };
        relative = remove_leading_dot_segment(rest.trim_start_matches('/'));
        if let Some(parent) = cwd.rfind('/') {
            cwd = &cwd[..parent];
        }
    }
    if relative.is_empty() || relative == "." {
        if cwd.is_empty() { "/".to_owned() } else { cwd.to_owned() }
    } else {
        format!("{cwd}/{relative}")
    }
}

/// Returns `true` for POSIX absolute paths and drive-prefixed Windows paths.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/')
}

/// Escapes glob syntax so `path` only matches itself.
#[must_use]
pub fn escape(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for ch in path.chars() {
        if SPECIAL_CHARS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Removes backslash escapes, turning a static pattern into a filesystem path.
#[must_use]
pub fn unescape(pattern: &str) -> String {
    let mut unescaped = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                unescaped.push(next);
            }
        } else {
            unescaped.push(ch);
        }
    }
    unescaped
}

/// Finds the `close` matching the `open` at `open_index`, honouring nesting.
pub(crate) fn find_closing(chars: &[char], open_index: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut index = open_index;
    while index < chars.len() {
        let ch = chars[index];
        if ch == '\\' {
            index += 2;
            continue;
        }
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
        index += 1;
    }
    None
}

/// Finds the `]` closing a character class. A `]` right after `[` or `[!` is literal.
pub(crate) fn find_class_end(chars: &[char], open_index: usize) -> Option<usize> {
    let mut index = open_index + 1;
    if matches!(chars.get(index), Some('!' | '^')) {
        index += 1;
    }
    if chars.get(index) == Some(&']') {
        index += 1;
    }
    while index < chars.len() {
        match chars[index] {
            '\\' => index += 2,
            ']' => return Some(index),
            '/' => return None,
            _ => index += 1,
        }
    }
    None
}

/// Splits `body` on `separator` outside nested groups and escapes.
pub(crate) fn split_top_level(body: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                current.push(ch);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
                continue;
            }
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth = depth.saturating_sub(1),
            _ if ch == separator && depth == 0 => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    parts.push(current);
    parts
}
