//! Default-value literals.
//!
//! Defaults are written in Python literal syntax inside a signature
//! (`count: int = 3`, `tags: list = ["a", "b"]`). [`parse_literal`] reads one
//! literal and [`Literal`]'s `Display` writes it back in canonical form, so a
//! parsed default always re-parses to the same value.
//!
//! Integers must fit in an `i64` and floats must be finite. Collections nest
//! at most [`MAX_DEPTH`] levels.

use std::fmt;
use std::num::IntErrorKind;

/// Deepest allowed nesting of list and dict defaults.
pub const MAX_DEPTH: usize = 64;

/// A parsed default value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

/// Shape of a literal, used by the type registry's default grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Dict,
}

impl LiteralKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiteralKind::None => "None",
            LiteralKind::Bool => "boolean",
            LiteralKind::Int => "integer",
            LiteralKind::Float => "float",
            LiteralKind::Str => "string",
            LiteralKind::List => "list",
            LiteralKind::Dict => "dict",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::None => LiteralKind::None,
            Literal::Bool(_) => LiteralKind::Bool,
            Literal::Int(_) => LiteralKind::Int,
            Literal::Float(_) => LiteralKind::Float,
            Literal::Str(_) => LiteralKind::Str,
            Literal::List(_) => LiteralKind::List,
            Literal::Dict(_) => LiteralKind::Dict,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::None => f.write_str("None"),
            Literal::Bool(true) => f.write_str("True"),
            Literal::Bool(false) => f.write_str("False"),
            Literal::Int(value) => write!(f, "{}", value),
            // Debug keeps a `.0` on whole numbers so the value stays a float
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::Str(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Literal::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Literal::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Parse a complete literal. The whole input must be consumed.
///
/// The error is a human-readable description of what went wrong.
pub fn parse_literal(text: &str) -> Result<Literal, String> {
    let mut parser = LiteralParser {
        src: text,
        pos: 0,
        depth: 0,
    };
    parser.skip_ws();
    if parser.at_end() {
        return Err("missing default value after `=`".to_string());
    }
    let literal = parser.value()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(format!(
            "unexpected `{}` after default value",
            &parser.src[parser.pos..]
        ));
    }
    Ok(literal)
}

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl LiteralParser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(format!("expected `{}` but found `{}`", expected, c)),
            None => Err(format!("expected `{}` but the value ended", expected)),
        }
    }

    fn value(&mut self) -> Result<Literal, String> {
        self.skip_ws();
        match self.peek() {
            Some('"') | Some('\'') => self.string(),
            Some('[') => self.list(),
            Some('{') => self.dict(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.word(),
            Some(c) => Err(format!("`{}` does not start a literal", c)),
            None => Err("value ended unexpectedly".to_string()),
        }
    }

    fn string(&mut self) -> Result<Literal, String> {
        let start = self.pos;
        let quote = self.bump().unwrap_or('"');
        let mut out = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(format!(
                        "unterminated string literal `{}`",
                        &self.src[start..]
                    ));
                }
                Some(c) if c == quote => return Ok(Literal::Str(out)),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('\\') => out.push('\\'),
                    Some('\'') => out.push('\''),
                    Some('"') => out.push('"'),
                    Some(other) => {
                        out.push('\\');
                        out.push(other);
                    }
                    None => {
                        return Err(format!(
                            "unterminated string literal `{}`",
                            &self.src[start..]
                        ));
                    }
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn enter(&mut self) -> Result<(), String> {
        if self.depth >= MAX_DEPTH {
            return Err(format!(
                "default value is nested too deeply (more than {} levels)",
                MAX_DEPTH
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn list(&mut self) -> Result<Literal, String> {
        self.enter()?;
        let list = self.list_items();
        self.depth -= 1;
        list
    }

    fn list_items(&mut self) -> Result<Literal, String> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(']') {
                self.bump();
                return Ok(Literal::List(items));
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Literal::List(items)),
                Some(c) => return Err(format!("expected `,` or `]` in list but found `{}`", c)),
                None => return Err("list literal is missing its closing `]`".to_string()),
            }
        }
    }

    fn dict(&mut self) -> Result<Literal, String> {
        self.enter()?;
        let dict = self.dict_entries();
        self.depth -= 1;
        dict
    }

    fn dict_entries(&mut self) -> Result<Literal, String> {
        self.expect('{')?;
        let mut entries = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Literal::Dict(entries));
            }
            let key = self.value()?;
            if matches!(key, Literal::List(_) | Literal::Dict(_)) {
                return Err(format!("{} values cannot be used as dict keys", key.kind()));
            }
            self.expect(':')?;
            let value = self.value()?;
            entries.push((key, value));
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Literal::Dict(entries)),
                Some(c) => return Err(format!("expected `,` or `}}` in dict but found `{}`", c)),
                None => return Err("dict literal is missing its closing `}`".to_string()),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, String> {
        let start = self.pos;
        if matches!(self.peek(), Some('-') | Some('+')) {
            self.bump();
        }
        let mut digits = 0;
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => digits += 1,
                '.' if !is_float => is_float = true,
                'e' | 'E' if digits > 0 => {
                    is_float = true;
                    self.bump();
                    if matches!(self.peek(), Some('-') | Some('+')) {
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.bump();
        }
        let text = &self.src[start..self.pos];
        if digits == 0 {
            return Err(format!("`{}` is not a number", text));
        }
        if is_float {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Literal::Float(value)),
                Ok(_) => Err(format!("`{}` is out of range for a float", text)),
                Err(_) => Err(format!("`{}` is not a valid float", text)),
            }
        } else {
            text.parse::<i64>().map(Literal::Int).map_err(|e| {
                match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        format!("`{}` does not fit in a 64-bit integer", text)
                    }
                    _ => format!("`{}` is not a valid integer", text),
                }
            })
        }
    }

    fn word(&mut self) -> Result<Literal, String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "None" => Ok(Literal::None),
            "True" | "true" => Ok(Literal::Bool(true)),
            "False" | "false" => Ok(Literal::Bool(false)),
            other => Err(format!(
                "`{}` is not a literal (quote it if it is meant as a string)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_literal("3"), Ok(Literal::Int(3)));
        assert_eq!(parse_literal(" -42 "), Ok(Literal::Int(-42)));
        assert_eq!(parse_literal("1.5"), Ok(Literal::Float(1.5)));
        assert_eq!(parse_literal("2e3"), Ok(Literal::Float(2000.0)));
        assert_eq!(parse_literal("True"), Ok(Literal::Bool(true)));
        assert_eq!(parse_literal("false"), Ok(Literal::Bool(false)));
        assert_eq!(parse_literal("None"), Ok(Literal::None));
    }

    #[test]
    fn test_parse_strings_with_either_quote() {
        assert_eq!(parse_literal("'summary'"), Ok(Literal::Str("summary".into())));
        assert_eq!(parse_literal("\"json\""), Ok(Literal::Str("json".into())));
        assert_eq!(
            parse_literal(r#""say \"hi\"""#),
            Ok(Literal::Str("say \"hi\"".into()))
        );
    }

    #[test]
    fn test_parse_collections() {
        assert_eq!(parse_literal("[]"), Ok(Literal::List(vec![])));
        assert_eq!(parse_literal("{}"), Ok(Literal::Dict(vec![])));
        assert_eq!(
            parse_literal("[1, 'a', [True]]"),
            Ok(Literal::List(vec![
                Literal::Int(1),
                Literal::Str("a".into()),
                Literal::List(vec![Literal::Bool(true)]),
            ]))
        );
        assert_eq!(
            parse_literal("{'k': 1,}"),
            Ok(Literal::Dict(vec![(Literal::Str("k".into()), Literal::Int(1))]))
        );
    }

    #[test]
    fn test_rejects_non_literals() {
        assert!(parse_literal("five").is_err());
        assert!(parse_literal("'open").is_err());
        assert!(parse_literal("[1, 2").is_err());
        assert!(parse_literal("3 4").is_err());
        assert!(parse_literal("").is_err());
        assert!(parse_literal("{[1]: 2}").is_err());
    }

    #[test]
    fn test_display_is_canonical_and_reparses() {
        let cases = ["3", "3.0", "-0.25", "\"a\\\"b\"", "[1, \"x\"]", "{\"k\": None}", "True"];
        for case in cases {
            let literal = parse_literal(case).unwrap();
            assert_eq!(literal.to_string(), case);
            assert_eq!(parse_literal(&literal.to_string()).unwrap(), literal);
        }
    }

    #[test]
    fn test_rejects_non_finite_floats() {
        let err = parse_literal("1e999").unwrap_err();
        assert!(err.contains("out of range"), "{}", err);
        assert!(parse_literal("-1e999").is_err());
        assert_eq!(parse_literal("1e300"), Ok(Literal::Float(1e300)));
    }

    #[test]
    fn test_integer_range_is_64_bit() {
        assert_eq!(parse_literal("9223372036854775807"), Ok(Literal::Int(i64::MAX)));
        let err = parse_literal("10000000000000000000").unwrap_err();
        assert!(err.contains("64-bit"), "{}", err);
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse_literal(&ok).is_ok());

        let too_deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = parse_literal(&too_deep).unwrap_err();
        assert!(err.contains("nested too deeply"), "{}", err);

        // Unbalanced input far past the limit fails without exhausting the stack
        let err = parse_literal(&"[{'k': ".repeat(200_000)).unwrap_err();
        assert!(err.contains("nested too deeply"), "{}", err);
    }

    #[test]
    fn test_display_normalizes_quotes() {
        let literal = parse_literal("'summary'").unwrap();
        assert_eq!(literal.to_string(), "\"summary\"");
    }
}
