//! Error types for the style checker
//!
//! None of these abort a run.  Lex and structure errors are collected while a
//! file is checked and reported next to its warnings; [`CheckError::Io`] is
//! produced by the driver when an input cannot be read at all, and the
//! remaining inputs are still processed.

use crate::tokenizer::{LexError, StructureError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// A line contained something no token pattern accepts
    #[error("{0}")]
    Lex(#[from] LexError),

    /// Unbalanced or unclosed brackets
    #[error("{0}")]
    Structure(#[from] StructureError),

    /// The input could not be read
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    /// Zero-based line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CheckError::Lex(e) => Some(e.line),
            CheckError::Structure(e) => Some(e.line()),
            CheckError::Io(_) => None,
        }
    }
}
