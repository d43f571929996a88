//! Matching of one path segment that holds extglob groups.
//!
//! `@(..)`, `?(..)`, `*(..)`, `+(..)`, and `!(..)` may nest and mix with
//! `*`, `?`, and bracket classes. A segment is matched by tracking the set of
//! positions each node can end at, so repetition and negation never
//! backtrack exponentially.

use globset::{GlobBuilder, GlobMatcher};

use crate::PatternError;
use crate::utils::{find_class_end, find_closing, split_top_level};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GroupKind {
    ExactlyOne,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
    Not,
}

impl GroupKind {
    const fn from_operator(operator: char) -> Option<Self> {
        match operator {
            '@' => Some(Self::ExactlyOne),
            '?' => Some(Self::ZeroOrOne),
            '*' => Some(Self::ZeroOrMore),
            '+' => Some(Self::OneOrMore),
            '!' => Some(Self::Not),
            _ => None,
        }
    }
}

#[derive(Debug)]
enum Node {
    Char(char),
    AnyChar,
    AnyRun,
    Class(GlobMatcher),
    Group {
        kind: GroupKind,
        alternatives: Vec<Vec<Node>>,
    },
}

/// Returns `true` when `segment` opens at least one closed extglob group.
pub(crate) fn has_extglob_group(segment: &str) -> bool {
    let chars: Vec<char> = segment.chars().collect();
    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        if ch == '\\' {
            index += 2;
            continue;
        }
        if GroupKind::from_operator(ch).is_some()
            && chars.get(index + 1) == Some(&'(')
            && find_closing(&chars, index + 1, '(', ')').is_some()
        {
            return true;
        }
        index += 1;
    }
    false
}

/// Compiled extglob segment.
#[derive(Debug)]
pub(crate) struct ExtglobMatcher {
    nodes: Vec<Node>,
    case_sensitive: bool,
}

impl ExtglobMatcher {
    pub(crate) fn new(
        source: &str,
        segment: &str,
        case_sensitive: bool,
    ) -> Result<Self, PatternError> {
        let chars: Vec<char> = segment.chars().collect();
        Ok(Self {
            nodes: parse(source, &chars, case_sensitive)?,
            case_sensitive,
        })
    }

    pub(crate) fn is_match(&self, part: &str) -> bool {
        let text: Vec<char> = if self.case_sensitive {
            part.chars().collect()
        } else {
            part.to_lowercase().chars().collect()
        };
        let mut start = vec![false; text.len() + 1];
        start[0] = true;
        sequence_ends(&self.nodes, &text, start)[text.len()]
    }
}

fn parse(source: &str, chars: &[char], case_sensitive: bool) -> Result<Vec<Node>, PatternError> {
    let mut nodes = Vec::new();
    let push_literal = |nodes: &mut Vec<Node>, ch: char| {
        if case_sensitive {
            nodes.push(Node::Char(ch));
        } else {
            nodes.extend(ch.to_lowercase().map(Node::Char));
        }
    };

    let mut index = 0;
    while index < chars.len() {
        let ch = chars[index];
        if chars.get(index + 1) == Some(&'(')
            && let Some(kind) = GroupKind::from_operator(ch)
            && let Some(end) = find_closing(chars, index + 1, '(', ')')
        {
            let body: String = chars[index + 2..end].iter().collect();
            let alternatives = split_top_level(&body, '|')
                .iter()
                .map(|alternative| {
                    let alternative: Vec<char> = alternative.chars().collect();
                    parse(source, &alternative, case_sensitive)
                })
                .collect::<Result<Vec<_>, _>>()?;
            nodes.push(Node::Group { kind, alternatives });
            index = end + 1;
            continue;
        }

        match ch {
            '\\' => {
                push_literal(&mut nodes, chars.get(index + 1).copied().unwrap_or('\\'));
                index += 2;
                continue;
            }
            '*' => {
                if !matches!(nodes.last(), Some(Node::AnyRun)) {
                    nodes.push(Node::AnyRun);
                }
            }
            '?' => nodes.push(Node::AnyChar),
            '[' => {
                if let Some(end) = find_class_end(chars, index) {
                    let class: String = chars[index..=end].iter().collect();
                    let matcher = GlobBuilder::new(&class)
                        .backslash_escape(true)
                        .case_insensitive(!case_sensitive)
                        .build()
                        .map_err(|error| PatternError::glob(source, error))?
                        .compile_matcher();
                    nodes.push(Node::Class(matcher));
                    index = end + 1;
                    continue;
                }
                push_literal(&mut nodes, ch);
            }
            _ => push_literal(&mut nodes, ch),
        }
        index += 1;
    }
    Ok(nodes)
}

/// Positions reachable after matching `nodes` from any position set in `from`.
fn sequence_ends(nodes: &[Node], text: &[char], from: Vec<bool>) -> Vec<bool> {
    nodes
        .iter()
        .fold(from, |reached, node| node_ends(node, text, &reached))
}

fn node_ends(node: &Node, text: &[char], from: &[bool]) -> Vec<bool> {
    let mut reached = vec![false; text.len() + 1];
    for start in positions(from) {
        match node {
            Node::Char(expected) => {
                if text.get(start) == Some(expected) {
                    reached[start + 1] = true;
                }
            }
            Node::AnyChar => {
                if start < text.len() {
                    reached[start + 1] = true;
                }
            }
            Node::AnyRun => {
                reached[start..].iter_mut().for_each(|slot| *slot = true);
                break;
            }
            Node::Class(matcher) => {
                if text
                    .get(start)
                    .is_some_and(|ch| matcher.is_match(ch.to_string()))
                {
                    reached[start + 1] = true;
                }
            }
            Node::Group { kind, alternatives } => {
                for end in group_ends(*kind, alternatives, text, start) {
                    reached[end] = true;
                }
            }
        }
    }
    reached
}

fn group_ends(
    kind: GroupKind,
    alternatives: &[Vec<Node>],
    text: &[char],
    start: usize,
) -> Vec<usize> {
    let once = |from: usize| {
        let mut seed = vec![false; text.len() + 1];
        seed[from] = true;
        let mut reached = vec![false; text.len() + 1];
        for alternative in alternatives {
            let ends = sequence_ends(alternative, text, seed.clone());
            for (slot, end) in reached.iter_mut().zip(ends) {
                *slot |= end;
            }
        }
        reached
    };

    match kind {
        GroupKind::ExactlyOne => positions(&once(start)).collect(),
        GroupKind::ZeroOrOne => {
            let mut reached = once(start);
            reached[start] = true;
            positions(&reached).collect()
        }
        GroupKind::ZeroOrMore | GroupKind::OneOrMore => {
            let mut reached = vec![false; text.len() + 1];
            let mut pending: Vec<usize> = if kind == GroupKind::ZeroOrMore {
                vec![start]
            } else {
                positions(&once(start)).collect()
            };
            while let Some(position) = pending.pop() {
                if reached[position] {
                    continue;
                }
                reached[position] = true;
                pending.extend(positions(&once(position)).filter(|next| !reached[*next]));
            }
            positions(&reached).collect()
        }
        GroupKind::Not => {
            let excluded = once(start);
            (start..=text.len()).filter(|end| !excluded[*end]).collect()
        }
    }
}

fn positions(set: &[bool]) -> impl Iterator<Item = usize> + '_ {
    set.iter()
        .enumerate()
        .filter_map(|(position, reached)| reached.then_some(position))
}
