//! Trigger pattern compilation.
//!
//! Two flavors: `smart` is a small user-facing DSL compiled down to a
//! regex, `regex` is taken as written. Both end up as `fancy_regex`
//! expressions because smart-match tokens repeat via named-group
//! backreferences (`(?P=name)`), which the backtracking engine supports.
//!
//! Smart syntax: `*` is a greedy wildcard, `%` a lazy one, `[name]` captures
//! one-or-more characters under `name` on first use and backreferences it
//! afterwards. `\*`, `\[`, `\]` and `\\` escape; everything else matches
//! literally.

use fancy_regex::Regex;

use crate::error::{Error, Result};

/// Which dialect a pattern source is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternKind {
    Smart,
    Regex,
}

/// A compiled trigger pattern.
#[derive(Debug)]
pub struct Pattern {
    kind: PatternKind,
    source: String,
    regex: Regex,
    tokens: Vec<String>,
}

impl Pattern {
    /// Compile a pattern of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] when the source does not compile: bad
    /// smart-match token syntax, or an invalid regular expression.
    pub fn compile(kind: PatternKind, source: &str) -> Result<Self> {
        let expression = match kind {
            PatternKind::Smart => smart_to_regex(source)?,
            PatternKind::Regex => source.to_string(),
        };
        let regex = Regex::new(&expression).map_err(|e| Error::Pattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        let tokens = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();
        Ok(Self {
            kind,
            source: source.to_string(),
            regex,
            tokens,
        })
    }

    /// The original pattern source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The dialect the pattern was written in.
    #[must_use]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Named capture tokens, in declaration order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Translate smart-match source into a regex expression.
fn smart_to_regex(source: &str) -> Result<String> {
    let mut expression = String::with_capacity(source.len() * 2);
    let mut seen_tokens: Vec<String> = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('*' | '[' | ']' | '\\')) => {
                    push_escaped(&mut expression, escaped);
                }
                Some(other) => push_escaped(&mut expression, other),
                None => push_escaped(&mut expression, '\\'),
            },
            '*' => expression.push_str(".*"),
            '%' => expression.push_str(".*?"),
            '[' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(c) if c.is_ascii_alphanumeric() || c == '_' => name.push(c),
                        Some(c) => {
                            return Err(Error::Pattern {
                                pattern: source.to_string(),
                                message: format!("invalid character {c:?} in token name"),
                            });
                        }
                        None => {
                            return Err(Error::Pattern {
                                pattern: source.to_string(),
                                message: "unterminated token".to_string(),
                            });
                        }
                    }
                }
                if name.is_empty() {
                    return Err(Error::Pattern {
                        pattern: source.to_string(),
                        message: "empty token name".to_string(),
                    });
                }
                if seen_tokens.contains(&name) {
                    expression.push_str(&format!("(?P={name})"));
                } else {
                    expression.push_str(&format!("(?P<{name}>.+)"));
                    seen_tokens.push(name);
                }
            }
            ']' => {
                return Err(Error::Pattern {
                    pattern: source.to_string(),
                    message: "unmatched ']'".to_string(),
                });
            }
            other => push_escaped(&mut expression, other),
        }
    }
    Ok(expression)
}

/// Append a literal character, escaping it when it is a regex metacharacter.
fn push_escaped(expression: &mut String, c: char) {
    if matches!(
        c,
        '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
    ) {
        expression.push('\\');
    }
    expression.push(c);
}
