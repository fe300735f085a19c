//! Errors raised while building tables.

use crate::codepointset::CodePoint;
use std::fmt;
use thiserror::Error;

/// The family a requested table name belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TableKind {
    Category,
    Script,
    Property,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            TableKind::Category => "category",
            TableKind::Script => "script",
            TableKind::Property => "property",
        })
    }
}

/// Represents a fatal inconsistency in the input data or the derived tables.
/// There is no recovery: the generator stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("point U+{0:04X} reused")]
    Duplicate(CodePoint),

    #[error("code point {0:#X} is outside the Unicode range")]
    OutOfDomain(CodePoint),

    #[error("U+{cp:04X}: {reason}")]
    Malformed { cp: CodePoint, reason: String },

    #[error("bad state {state} at U+{cp:04X}")]
    RangeState { cp: CodePoint, state: &'static str },

    #[error("LowerUpper sequence at U+{0:04X}: should not happen")]
    LowerUpper(CodePoint),

    #[error("unknown {kind} {name:?}")]
    UnknownTable { kind: TableKind, name: String },

    #[error("U+{cp:04X} has unknown Latin-1 category {category:?}")]
    LatinCategory { cp: CodePoint, category: String },
}

pub type Result<T> = std::result::Result<T, Error>;
