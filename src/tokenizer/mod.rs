//! C tokenizer for style checking
//!
//! This module turns source lines into a structured token stream:
//! - [`lexer`]: Line scanning (lines → flat tokens), comment and macro skipping
//! - [`structure`]: Bracket matching and nesting depths over the flat tokens
//! - [`token`]: Token definitions
//!
//! The tokenizer only understands as much C as the style rules need.  There
//! is no preprocessing and no grammar; it never fails as a whole, errors are
//! collected and returned next to whatever could be tokenized.

pub mod lexer;
pub mod structure;
pub mod token;

pub use lexer::{LexError, Lexer};
pub use structure::{StructureError, TokenStream};
pub use token::{Keyword, Token, TokenKind};

/// Result of tokenizing one file
#[derive(Debug, Clone)]
pub struct Tokenized {
    pub stream: TokenStream,
    pub lex_errors: Vec<LexError>,
    pub structure_errors: Vec<StructureError>,
}

/// Tokenize right-trimmed source lines and recover their bracket structure.
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> Tokenized {
    let (tokens, lex_errors) = Lexer::new().tokenize(lines);
    let (stream, structure_errors) = TokenStream::new(tokens);
    log::trace!(
        "tokenized {} lines into {} tokens ({} lex errors, {} structure errors)",
        lines.len(),
        stream.len(),
        lex_errors.len(),
        structure_errors.len()
    );
    Tokenized {
        stream,
        lex_errors,
        structure_errors,
    }
}
