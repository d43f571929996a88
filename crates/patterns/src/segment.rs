//! Segment-wise compilation and matching of a single brace-free pattern.

use globset::GlobBuilder;

use crate::extglob::{ExtglobMatcher, has_extglob_group};
use crate::utils::{find_class_end, has_magic, remove_leading_dot_segment, split_segments, unescape};
use crate::{MatchOptions, PatternError};

#[derive(Debug)]
pub(crate) enum Segment {
    Globstar,
    Literal(String),
    Wildcard {
        matcher: globset::GlobMatcher,
        explicit_dot: bool,
    },
    Extglob {
        matcher: ExtglobMatcher,
        explicit_dot: bool,
    },
}

/// One alternative of a pattern after brace and extglob expansion, split on `/`.
#[derive(Debug)]
pub(crate) struct CompiledPattern {
    segments: Vec<Segment>,
    directory_only: bool,
    dot: bool,
    case_sensitive: bool,
}

impl CompiledPattern {
    pub(crate) fn compile(
        source: &str,
        alternative: &str,
        options: &MatchOptions,
    ) -> Result<Self, PatternError> {
        let directory_only = alternative.len() > 1 && alternative.ends_with('/');
        let trimmed = remove_leading_dot_segment(alternative);
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);

        let literal_options = MatchOptions {
            brace: false,
            extglob: false,
            ..*options
        };

        let mut segments = Vec::new();
        for (index, part) in split_segments(trimmed).into_iter().enumerate() {
            if part.is_empty() {
                if index == 0 && trimmed.starts_with('/') {
                    segments.push(Segment::Literal(String::new()));
                }
                continue;
            }
            if part == "**" && options.globstar {
                // consecutive globstars collapse into one
                if !matches!(segments.last(), Some(Segment::Globstar)) {
                    segments.push(Segment::Globstar);
                }
                continue;
            }
            if options.extglob && has_extglob_group(part) {
                segments.push(Segment::Extglob {
                    matcher: ExtglobMatcher::new(source, part, options.case_sensitive)?,
                    explicit_dot: part.starts_with('.'),
                });
            } else if has_magic(part, &literal_options) {
                let glob = to_segment_glob(part);
                let matcher = GlobBuilder::new(&glob)
                    .literal_separator(true)
                    .backslash_escape(true)
                    .case_insensitive(!options.case_sensitive)
                    .build()
                    .map_err(|error| PatternError::glob(source, error))?
                    .compile_matcher();
                segments.push(Segment::Wildcard {
                    matcher,
                    explicit_dot: part.starts_with('.'),
                });
            } else {
                let literal = unescape(part);
                let literal = if options.case_sensitive {
                    literal
                } else {
                    literal.to_lowercase()
                };
                segments.push(Segment::Literal(literal));
            }
        }

        Ok(Self {
            segments,
            directory_only,
            dot: options.dot,
            case_sensitive: options.case_sensitive,
        })
    }

    /// Full match of `parts`. `is_dir` gates patterns written with a trailing `/`.
    pub(crate) fn matches(&self, parts: &[&str], is_dir: bool) -> bool {
        if self.directory_only && !is_dir {
            return false;
        }
        if self.segments.is_empty() {
            return parts.is_empty();
        }
        let mut memo = vec![None; (self.segments.len() + 1) * (parts.len() + 1)];
        self.match_from(0, 0, parts, &mut memo)
    }

    /// Returns `true` when some descendant of the directory `parts` could match.
    pub(crate) fn partial_matches(&self, parts: &[&str]) -> bool {
        if parts.is_empty() {
            return !self.segments.is_empty();
        }
        self.partial_from(0, 0, parts)
    }

    fn match_from(
        &self,
        segment: usize,
        part: usize,
        parts: &[&str],
        memo: &mut [Option<bool>],
    ) -> bool {
        let slot = segment * (parts.len() + 1) + part;
        if let Some(result) = memo[slot] {
            return result;
        }

        let result = match self.segments.get(segment) {
            None => part == parts.len(),
            Some(Segment::Globstar) => {
                self.match_from(segment + 1, part, parts, memo)
                    || (part < parts.len()
                        && self.globstar_can_consume(parts[part])
                        && self.match_from(segment, part + 1, parts, memo))
            }
            Some(current) => {
                part < parts.len()
                    && self.segment_matches(current, parts[part])
                    && self.match_from(segment + 1, part + 1, parts, memo)
            }
        };

        memo[slot] = Some(result);
        result
    }

    fn partial_from(&self, segment: usize, part: usize, parts: &[&str]) -> bool {
        if part == parts.len() {
            return segment < self.segments.len();
        }
        match self.segments.get(segment) {
            None => false,
            Some(Segment::Globstar) => {
                // a trailing globstar reaches everything below a visible directory
                if segment + 1 == self.segments.len() {
                    return parts[part..]
                        .iter()
                        .all(|name| self.globstar_can_consume(name));
                }
                self.partial_from(segment + 1, part, parts)
                    || (self.globstar_can_consume(parts[part])
                        && self.partial_from(segment, part + 1, parts))
            }
            Some(current) => {
                self.segment_matches(current, parts[part])
                    && self.partial_from(segment + 1, part + 1, parts)
            }
        }
    }

    fn globstar_can_consume(&self, part: &str) -> bool {
        self.dot || !part.starts_with('.')
    }

    fn segment_matches(&self, segment: &Segment, part: &str) -> bool {
        match segment {
            Segment::Globstar => self.globstar_can_consume(part),
            Segment::Literal(literal) => {
                if self.case_sensitive {
                    literal == part
                } else {
                    *literal == part.to_lowercase()
                }
            }
            Segment::Wildcard {
                matcher,
                explicit_dot,
            } => {
                if part.is_empty() {
                    return false;
                }
                if part.starts_with('.') && !self.dot && !explicit_dot {
                    return false;
                }
                matcher.is_match(part)
            }
            Segment::Extglob {
                matcher,
                explicit_dot,
            } => {
                if part.is_empty() || (part.starts_with('.') && !self.dot && !explicit_dot) {
                    return false;
                }
                matcher.is_match(part)
            }
        }
    }
}

/// Rewrites one segment into globset syntax.
///
/// Braces were already expanded, so any left over are literal. A `**` that
/// shares its segment with other text behaves like `*`.
fn to_segment_glob(segment: &str) -> String {
    let chars: Vec<char> = segment.chars().collect();
    let mut glob = String::with_capacity(segment.len() + 4);
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        match ch {
            '\\' => {
                glob.push('\\');
                match chars.get(index + 1) {
                    Some(next) => glob.push(*next),
                    None => glob.push('\\'),
                }
                index += 2;
                continue;
            }
            '{' | '}' => {
                glob.push('\\');
                glob.push(ch);
            }
            '*' => {
                glob.push('*');
                while chars.get(index + 1) == Some(&'*') {
                    index += 1;
                }
            }
            '[' => {
                if let Some(end) = find_class_end(&chars, index) {
                    glob.extend(&chars[index..=end]);
                    index = end + 1;
                    continue;
                }
                glob.push_str("\\[");
            }
            ']' => glob.push_str("\\]"),
            _ => glob.push(ch),
        }
        index += 1;
    }
    glob
}

/// Splits a slash-separated path into parts.
///
/// Absolute paths keep an empty first part so they only line up with
/// absolute patterns. Repeated and trailing separators are ignored.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let path = remove_leading_dot_segment(path);
    let mut parts = Vec::new();
    if path.starts_with('/') {
        parts.push("");
    }
    parts.extend(path.split('/').filter(|part| !part.is_empty()));
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(pattern: &str) -> CompiledPattern {
        CompiledPattern::compile(pattern, pattern, &MatchOptions::default()).unwrap()
    }

    fn compile_with(pattern: &str, options: MatchOptions) -> CompiledPattern {
        CompiledPattern::compile(pattern, pattern, &options).unwrap()
    }

    #[test]
    fn globstar_matches_zero_or_more_directories() {
        let pattern = compile("src/**/*.rs");
        assert!(pattern.matches(&["src", "lib.rs"], false));
        assert!(pattern.matches(&["src", "a", "b", "lib.rs"], false));
        assert!(!pattern.matches(&["lib.rs"], false));
    }

    #[test]
    fn star_does_not_cross_separators() {
        let pattern = compile("*.rs");
        assert!(pattern.matches(&["main.rs"], false));
        assert!(!pattern.matches(&["src", "main.rs"], false));
    }

    #[test]
    fn hidden_parts_need_explicit_dot_unless_enabled() {
        let plain = compile("*");
        assert!(!plain.matches(&[".env"], false));

        let explicit = compile(".*");
        assert!(explicit.matches(&[".env"], false));

        let dotted = compile_with("*", MatchOptions { dot: true, ..MatchOptions::default() });
        assert!(dotted.matches(&[".env"], false));
    }

    #[test]
    fn globstar_skips_hidden_directories_without_dot() {
        let pattern = compile("**/*.js");
        assert!(!pattern.matches(&[".cache", "a.js"], false));
        assert!(!pattern.partial_matches(&[".cache"]));

        let dotted = compile_with("**/*.js", MatchOptions { dot: true, ..MatchOptions::default() });
        assert!(dotted.matches(&[".cache", "a.js"], false));
    }

    #[test]
    fn partial_match_follows_pattern_depth() {
        let pattern = compile("a/*/c");
        assert!(pattern.partial_matches(&["a"]));
        assert!(pattern.partial_matches(&["a", "b"]));
        assert!(!pattern.partial_matches(&["a", "b", "c"]));
        assert!(!pattern.partial_matches(&["x"]));
    }

    #[test]
    fn trailing_globstar_reaches_any_depth() {
        let pattern = compile("a/**");
        assert!(pattern.partial_matches(&["a", "b", "c", "d"]));
        assert!(pattern.matches(&["a", "b", "c"], false));
    }

    #[test]
    fn trailing_slash_only_matches_directories() {
        let pattern = compile("build/");
        assert!(pattern.matches(&["build"], true));
        assert!(!pattern.matches(&["build"], false));
    }

    #[test]
    fn case_insensitive_applies_to_literals_and_wildcards() {
        let options = MatchOptions {
            case_sensitive: false,
            ..MatchOptions::default()
        };
        let pattern = compile_with("Docs/*.MD", options);
        assert!(pattern.matches(&["docs", "readme.md"], false));
    }

    #[test]
    fn leftover_braces_are_literal() {
        let pattern = compile("{a}*");
        assert!(pattern.matches(&["{a}x"], false));
        assert!(!pattern.matches(&["ax"], false));
    }

    #[test]
    fn absolute_pattern_keeps_root_part() {
        let pattern = compile("/tmp/*.log");
        assert!(pattern.matches(&split_path("/tmp/a.log"), false));
        assert!(!pattern.matches(&split_path("tmp/a.log"), false));
    }

    #[test]
    fn wildcard_never_matches_root_part() {
        let pattern = compile("*/a");
        assert!(!pattern.matches(&split_path("/a"), false));
    }

    #[test]
    fn split_path_ignores_leading_dot_and_extra_separators() {
        assert_eq!(split_path("./a//b/"), vec!["a", "b"]);
        assert_eq!(split_path("/a"), vec!["", "a"]);
        assert!(split_path("").is_empty());
    }

    #[test]
    fn segment_glob_collapses_double_star() {
        assert_eq!(to_segment_glob("a**b"), "a*b");
        assert_eq!(to_segment_glob("[]a]"), "[]a]");
        assert_eq!(to_segment_glob("x{y}"), "x\\{y\\}");
    }
}
