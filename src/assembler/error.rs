use std::num::ParseIntError;

use thiserror::Error;

use super::builder::BuildError;

/// The diagnostic produced by a failed `parse`, tagged with the
/// source line the function body came from.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: AsmErrorKind,
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum AsmErrorKind {
    #[error("unknown WASM token: {0}")]
    UnknownToken(String),
    #[error("missing token in wasm text format after token: {after}")]
    MissingToken { after: String },
    #[error("invalid integer operand `{token}`: {source}")]
    InvalidInteger {
        token: String,
        source: ParseIntError,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl AsmErrorKind {
    /// Tags the fault with the line it was raised for.
    pub fn at_line(self, line: usize) -> AsmError {
        AsmError { line, kind: self }
    }
}
