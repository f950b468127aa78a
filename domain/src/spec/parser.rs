//! Signature parser
//!
//! Turns one raw signature such as
//! `ReadBlogPost(url: str, read_latest_n_posts: int = 3)` into a [`ToolSpec`].
//! Pure text processing: no I/O, and every failure is returned as a
//! [`ParseError`] carrying the offending slice verbatim.
//!
//! # Grammar
//!
//! ```text
//! signature := name ws* '(' params? ')'
//! params    := param (',' param)* ','?
//! param     := ident ws* ':' ws* type (ws* '=' ws* literal)?
//! ```
//!
//! Parameters are returned in declaration order. Reordering into the
//! required-then-defaulted calling convention is the validator's job.

use super::entities::{ParameterSpec, Provenance, ToolSpec, is_identifier};
use super::literal::parse_literal;
use super::registry::{TypeToken, UnknownType};
use std::collections::HashSet;
use thiserror::Error;

/// The format users are pointed at when a signature is malformed.
pub const EXPECTED_FORMAT: &str = "ToolName(param: type, param: type = default)";

/// Why a signature could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid signature `{input}`: {reason} (at `{fragment}`); expected {}", EXPECTED_FORMAT)]
    InvalidSignature {
        input: String,
        fragment: String,
        reason: String,
    },

    #[error(
        "unknown type `{token}` for parameter `{parameter}` in `{input}`; expected one of str, int, float, bool, list, dict, Any"
    )]
    UnknownType {
        input: String,
        parameter: String,
        token: String,
    },
}

impl ParseError {
    /// The full signature that failed.
    pub fn input(&self) -> &str {
        match self {
            ParseError::InvalidSignature { input, .. } | ParseError::UnknownType { input, .. } => {
                input
            }
        }
    }

    /// The offending part of the signature.
    pub fn fragment(&self) -> &str {
        match self {
            ParseError::InvalidSignature { fragment, .. } => fragment,
            ParseError::UnknownType { token, .. } => token,
        }
    }

    pub fn is_unknown_type(&self) -> bool {
        matches!(self, ParseError::UnknownType { .. })
    }
}

/// Parse one raw signature.
pub fn parse_signature(raw: &str, provenance: Provenance) -> Result<ToolSpec, ParseError> {
    let input = raw.trim();
    let invalid = |fragment: &str, reason: String| ParseError::InvalidSignature {
        input: input.to_string(),
        fragment: fragment.to_string(),
        reason,
    };

    if input.is_empty() {
        return Err(invalid(input, "signature is empty".to_string()));
    }

    // Tool name
    let name_end = input
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(input.len());
    let name = &input[..name_end];
    if name.is_empty() {
        return Err(invalid(input, "missing tool name".to_string()));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(invalid(name, "tool name must not start with a digit".to_string()));
    }

    // Parameter list
    let rest = &input[name_end..];
    let after_ws = rest.trim_start();
    let open = name_end + (rest.len() - after_ws.len());
    match after_ws.chars().next() {
        Some('(') => {}
        None => {
            return Err(invalid(
                input,
                "missing parameter list `(...)` after tool name".to_string(),
            ));
        }
        Some(_) => return Err(invalid(after_ws, "expected `(` after tool name".to_string())),
    }

    let close = find_closing(input, open).map_err(|(fragment, reason)| invalid(fragment, reason))?;
    let trailing = input[close + 1..].trim();
    if !trailing.is_empty() {
        return Err(invalid(
            trailing,
            "unexpected characters after the closing `)`".to_string(),
        ));
    }

    let body = &input[open + 1..close];
    let mut parameters = Vec::new();
    let mut seen = HashSet::new();
    if !body.trim().is_empty() {
        let segments = split_top_level(body, ',');
        let last = segments.len() - 1;
        for (i, segment) in segments.iter().enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                // A single trailing comma is tolerated
                if i == last && i > 0 {
                    continue;
                }
                return Err(invalid(body, "empty parameter slot".to_string()));
            }
            let param = parse_parameter(input, segment)?;
            if !seen.insert(param.name().to_string()) {
                return Err(invalid(
                    segment,
                    format!("duplicate parameter `{}`", param.name()),
                ));
            }
            parameters.push(param);
        }
    }

    Ok(ToolSpec::new(name, parameters, provenance))
}

fn parse_parameter(input: &str, segment: &str) -> Result<ParameterSpec, ParseError> {
    let invalid = |fragment: &str, reason: String| ParseError::InvalidSignature {
        input: input.to_string(),
        fragment: fragment.to_string(),
        reason,
    };

    let (declaration, default_text) = match find_top_level(segment, '=') {
        Some(eq) => (&segment[..eq], Some(&segment[eq + 1..])),
        None => (segment, None),
    };

    let Some(colon) = find_top_level(declaration, ':') else {
        return Err(invalid(
            segment,
            format!("parameter `{}` has no type annotation", declaration.trim()),
        ));
    };

    let name = declaration[..colon].trim();
    if !is_identifier(name) {
        return Err(invalid(
            segment,
            format!("`{}` is not a valid parameter name", name),
        ));
    }

    let type_text = declaration[colon + 1..].trim();
    if type_text.is_empty() {
        return Err(invalid(
            segment,
            format!("parameter `{}` has an empty type annotation", name),
        ));
    }
    let type_token =
        TypeToken::resolve(type_text).map_err(|UnknownType(token)| ParseError::UnknownType {
            input: input.to_string(),
            parameter: name.to_string(),
            token,
        })?;

    let Some(default_text) = default_text else {
        return Ok(ParameterSpec::required(name, type_token));
    };

    let default_text = default_text.trim();
    let literal = parse_literal(default_text).map_err(|reason| {
        invalid(
            if default_text.is_empty() { segment } else { default_text },
            format!("invalid default for `{}`: {}", name, reason),
        )
    })?;

    let grammar = type_token.default_grammar();
    if !grammar.accepts(&literal) {
        return Err(invalid(
            default_text,
            format!(
                "default for `{}: {}` must be {}, found {}",
                name,
                type_token,
                grammar.describe(),
                literal.kind()
            ),
        ));
    }

    Ok(ParameterSpec::with_default(name, type_token, literal))
}

fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Find the `)` matching the `(` at `open`, honouring nested brackets and quotes.
///
/// On failure returns the offending slice and a reason.
fn find_closing(input: &str, open: usize) -> Result<usize, (&str, String)> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<(char, usize)> = None;
    let mut escaped = false;

    for (offset, c) in input[open..].char_indices() {
        let i = open + offset;
        if let Some((q, _)) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some((c, i)),
            '(' | '[' | '{' => stack.push((c, i)),
            ')' | ']' | '}' => {
                let Some((opener, at)) = stack.pop() else {
                    return Err((&input[i..], format!("unbalanced `{}`", c)));
                };
                if closer_for(opener) != c {
                    return Err((
                        &input[at..i + c.len_utf8()],
                        format!("`{}` closed by `{}`", opener, c),
                    ));
                }
                if stack.is_empty() {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }

    if let Some((_, at)) = quote {
        return Err((&input[at..], "unterminated string literal".to_string()));
    }
    match stack.last() {
        Some(&(opener, at)) if opener != '(' || at != open => Err((
            &input[at..],
            format!("unbalanced `{}`: missing `{}`", opener, closer_for(opener)),
        )),
        _ => Err((
            &input[open..],
            "unbalanced parentheses: missing `)`".to_string(),
        )),
    }
}

/// Byte offsets of `target` outside quotes and brackets.
fn top_level_positions(text: &str, target: char) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if c == target && depth == 0 => positions.push(i),
            _ => {}
        }
    }
    positions
}

fn find_top_level(text: &str, target: char) -> Option<usize> {
    top_level_positions(text, target).into_iter().next()
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for pos in top_level_positions(text, separator) {
        parts.push(&text[start..pos]);
        start = pos + separator.len_utf8();
    }
    parts.push(&text[start..]);
    parts
}
