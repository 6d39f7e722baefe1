use std::{fmt::Display, num::ParseIntError};

use thiserror::Error;

/// The textual inputs a pass can be handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Source,
    Optab,
    Intermediate,
    Symtab,
}

impl Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Artifact::Source => write!(f, "Source code"),
            Artifact::Optab => write!(f, "Operation table"),
            Artifact::Intermediate => write!(f, "Intermediate code"),
            Artifact::Symtab => write!(f, "Symbol table"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AsmError {
    #[error("{0} is empty.")]
    EmptyInput(Artifact),
    #[error("Syntax error: {0}")]
    Syntax(String),
    #[error("Duplicate label: {0} found.")]
    DuplicateLabel(String),
    #[error("Invalid opcode: {0} found.")]
    InvalidOpcode(String),
    #[error("Undefined symbol: '{0}' found.")]
    UndefinedSymbol(String),
    #[error("{source} ({value})")]
    NumericParse {
        value: String,
        source: ParseIntError,
    },
}

impl AsmError {
    pub(crate) fn syntax<S: Into<String>>(msg: S) -> Self {
        Self::Syntax(msg.into())
    }

    /// Wraps an integer parse failure together with the text that failed.
    pub(crate) fn numeric(value: &str) -> impl FnOnce(ParseIntError) -> Self + '_ {
        move |source| Self::NumericParse {
            value: value.to_owned(),
            source,
        }
    }
}

pub type Result<T, E = AsmError> = std::result::Result<T, E>;
