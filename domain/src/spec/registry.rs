//! Type registry
//!
//! Maps the closed set of type annotations accepted in signatures to
//! [`TypeToken`] and defines which default literals each type accepts.
//!
//! | Token | Aliases | Accepted defaults |
//! |-------|---------|-------------------|
//! | `str` | | string |
//! | `int` | | integer |
//! | `float` | | float, integer |
//! | `bool` | | boolean |
//! | `list` | `List`, `list[...]` | list |
//! | `dict` | `Dict`, `dict[...]` | dict |
//! | `Any` | | any literal |
//!
//! `None` is accepted by every type: it marks an optional parameter whose
//! default is "no value".
//!
//! Integer defaults must fit in a signed 64-bit integer and float defaults
//! must be finite. Anything larger is an invalid signature, even though
//! Python itself would accept it.

use super::literal::{Literal, LiteralKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical semantic type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeToken {
    String,
    Integer,
    Float,
    Boolean,
    List,
    Mapping,
    Any,
}

/// Error returned when an annotation is outside the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl TypeToken {
    pub const ALL: [TypeToken; 7] = [
        TypeToken::String,
        TypeToken::Integer,
        TypeToken::Float,
        TypeToken::Boolean,
        TypeToken::List,
        TypeToken::Mapping,
        TypeToken::Any,
    ];

    /// Resolve an annotation such as `int`, `Dict` or `list[str]`.
    pub fn resolve(token: &str) -> Result<Self, UnknownType> {
        let token = token.trim();
        let base = match token.split_once('[') {
            Some((base, rest)) if rest.trim_end().ends_with(']') => base.trim_end(),
            Some(_) => return Err(UnknownType(token.to_string())),
            None => token,
        };
        let resolved = match base {
            "str" => TypeToken::String,
            "int" => TypeToken::Integer,
            "float" => TypeToken::Float,
            "bool" => TypeToken::Boolean,
            "list" | "List" => TypeToken::List,
            "dict" | "Dict" => TypeToken::Mapping,
            "Any" => TypeToken::Any,
            _ => return Err(UnknownType(token.to_string())),
        };
        // Only the container types take a subscript
        if base.len() != token.len() && !matches!(resolved, TypeToken::List | TypeToken::Mapping)
        {
            return Err(UnknownType(token.to_string()));
        }
        Ok(resolved)
    }

    /// The canonical annotation written back into signatures and generated code.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeToken::String => "str",
            TypeToken::Integer => "int",
            TypeToken::Float => "float",
            TypeToken::Boolean => "bool",
            TypeToken::List => "list",
            TypeToken::Mapping => "dict",
            TypeToken::Any => "Any",
        }
    }

    /// Default-literal grammar for this type.
    pub fn default_grammar(&self) -> LiteralGrammar {
        let kinds: &'static [LiteralKind] = match self {
            TypeToken::String => &[LiteralKind::None, LiteralKind::Str],
            TypeToken::Integer => &[LiteralKind::None, LiteralKind::Int],
            TypeToken::Float => &[LiteralKind::None, LiteralKind::Float, LiteralKind::Int],
            TypeToken::Boolean => &[LiteralKind::None, LiteralKind::Bool],
            TypeToken::List => &[LiteralKind::None, LiteralKind::List],
            TypeToken::Mapping => &[LiteralKind::None, LiteralKind::Dict],
            TypeToken::Any => &[
                LiteralKind::None,
                LiteralKind::Bool,
                LiteralKind::Int,
                LiteralKind::Float,
                LiteralKind::Str,
                LiteralKind::List,
                LiteralKind::Dict,
            ],
        };
        LiteralGrammar { kinds }
    }

    /// Whether generated code needs `from typing import Any`.
    pub fn needs_typing_import(&self) -> bool {
        matches!(self, TypeToken::Any)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeToken {
    type Err = UnknownType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

/// The literal forms a type accepts as its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralGrammar {
    kinds: &'static [LiteralKind],
}

impl LiteralGrammar {
    pub fn accepts(&self, literal: &Literal) -> bool {
        self.kinds.contains(&literal.kind())
    }

    /// Human-readable list of accepted forms, for error messages.
    pub fn describe(&self) -> String {
        self.kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
