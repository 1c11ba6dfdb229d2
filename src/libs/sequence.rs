//! Interval sequence patterns.
//!
//! A sequence describes back-to-back phases, optionally grouped and
//! repeated:
//!
//! ```text
//! (25m work, 5m rest)x4, 20m 'long break'
//! ```
//!
//! Parsing runs in three passes: the pattern is tokenized, the tokens are
//! parsed by recursive descent into a tree of phases and groups, and the tree
//! is expanded depth-first into the flat list of [`Phase`] values a sequence
//! timer walks through.
//!
//! The parser is best-effort and never fails. Unknown characters are
//! skipped, an unmatched `)` ends the current group (at the top level it ends
//! the pattern), and whatever phases were recognised are returned. An empty
//! result means the pattern held no usable phase.
//!
//! Patterns are size-limited before expansion: a group multiplier above
//! [`MAX_MULTIPLIER`], or a pattern that would expand to more than
//! [`MAX_PHASES`] phases, is rejected as a whole and yields no phases.

use super::duration::{is_duration_token, parse_duration};
use super::formatter::format_human;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL: &str = "Timer";
pub const MAX_MULTIPLIER: u32 = 100;
pub const MAX_PHASES: usize = 1000;

/// One timed segment of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Phase {
    pub seconds: i64,
    pub label: String,
    pub duration: String,
    /// Dot-joined position of the innermost group that produced this phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_iteration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loop_total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    Comma,
    Mult(u32),
    Label(String),
    Duration(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Phase { seconds: i64, label: String },
    Group { items: Vec<Node>, multiply: u32 },
}

/// Totals derived from a flattened phase list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSummary {
    pub total_seconds: i64,
    pub phase_count: usize,
    pub description: String,
}

/// Parses a sequence pattern into its flattened phases.
pub fn parse_sequence(pattern: &str) -> Vec<Phase> {
    let tokens = tokenize(pattern);
    let mut pos = 0;
    let nodes = parse_items(&tokens, &mut pos);
    if !phase_count(&nodes).is_some_and(|count| count <= MAX_PHASES) {
        return Vec::new();
    }

    let mut phases = Vec::new();
    expand(&nodes, None, &mut phases);
    phases
}

/// Computes total length and a grouped label description of a sequence.
pub fn summarize(phases: &[Phase]) -> SequenceSummary {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for phase in phases {
        match counts.iter_mut().find(|(label, _)| *label == phase.label) {
            Some((_, count)) => *count += 1,
            None => counts.push((phase.label.as_str(), 1)),
        }
    }

    let description = counts.iter().map(|(label, count)| format!("{}x {}", count, label)).collect::<Vec<_>>().join(", ");

    SequenceSummary {
        total_seconds: phases.iter().fold(0i64, |total, p| total.saturating_add(p.seconds)),
        phase_count: phases.len(),
        description,
    }
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            ',' => {
                tokens.push(Token::Comma);
                i += 1;
            }
            '"' | '\'' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && chars[end] != c {
                    end += 1;
                }
                tokens.push(Token::Label(chars[start..end].iter().collect()));
                // Skip the closing quote when there is one.
                i = (end + 1).min(chars.len());
            }
            c if is_word_char(c) => {
                let start = i;
                while i < chars.len() && is_word_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(classify_word(word, tokens.last()));
            }
            _ => i += 1,
        }
    }

    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn classify_word(word: String, previous: Option<&Token>) -> Token {
    // `xN` is only a multiplier right after a group closes.
    if previous == Some(&Token::RParen) {
        if let Some(rest) = word.strip_prefix(['x', 'X']) {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                // Too large for u32 is still a multiplier, just an over-limit one.
                return Token::Mult(rest.parse().unwrap_or(u32::MAX));
            }
        }
    }

    if is_duration_token(&word) {
        Token::Duration(word)
    } else {
        Token::Label(word)
    }
}

fn parse_items(tokens: &[Token], pos: &mut usize) -> Vec<Node> {
    let mut items = Vec::new();

    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::LParen => {
                *pos += 1;
                let group_items = parse_items(tokens, pos);
                let mut multiply = 1;
                if let Some(Token::Mult(n)) = tokens.get(*pos) {
                    multiply = (*n).max(1);
                    *pos += 1;
                }
                items.push(Node::Group { items: group_items, multiply });
            }
            Token::RParen => {
                *pos += 1;
                return items;
            }
            Token::Duration(text) => {
                *pos += 1;
                let label = match tokens.get(*pos) {
                    Some(Token::Label(label)) => {
                        *pos += 1;
                        label.clone()
                    }
                    _ => DEFAULT_LABEL.to_string(),
                };
                items.push(Node::Phase {
                    seconds: parse_duration(text),
                    label,
                });
            }
            // Stray commas, labels and multipliers carry no phase.
            Token::Comma | Token::Label(_) | Token::Mult(_) => *pos += 1,
        }
    }

    items
}

/// Number of phases `nodes` expand to, or `None` past the size limits.
fn phase_count(nodes: &[Node]) -> Option<usize> {
    nodes.iter().try_fold(0usize, |total, node| {
        let count = match node {
            Node::Phase { .. } => 1,
            Node::Group { items, multiply } => {
                if *multiply > MAX_MULTIPLIER {
                    return None;
                }
                phase_count(items)?.checked_mul(*multiply as usize)?
            }
        };
        total.checked_add(count).filter(|&sum| sum <= MAX_PHASES)
    })
}

fn expand(nodes: &[Node], group: Option<(&str, u32, u32)>, out: &mut Vec<Phase>) {
    let mut group_ordinal = 0;

    for node in nodes {
        match node {
            Node::Phase { seconds, label } => out.push(Phase {
                seconds: *seconds,
                label: label.clone(),
                duration: format_human(*seconds),
                loop_id: group.map(|(id, _, _)| id.to_string()),
                loop_iteration: group.map(|(_, iteration, _)| iteration),
                loop_total: group.map(|(_, _, total)| total),
            }),
            Node::Group { items, multiply } => {
                group_ordinal += 1;
                let loop_id = match group {
                    Some((parent, _, _)) => format!("{}.{}", parent, group_ordinal),
                    None => group_ordinal.to_string(),
                };
                for iteration in 1..=*multiply {
                    expand(items, Some((&loop_id, iteration, *multiply)), out);
                }
            }
        }
    }
}
