//! Token stream with bracket structure
//!
//! Tokens live in a single vector and refer to each other by index: the
//! predecessor and successor of token `i` are `i - 1` and `i + 1`, and
//! bracket partners are stored in [`Token::matching`].  Every lookup is
//! bounds-checked, so a missing neighbour is simply `None`.
//!
//! Depths are assigned after a closer has been popped and before an opener
//! has been pushed, so a bracket pair shares the same depth and everything
//! between them is one level deeper.

use super::token::Token;
use std::ops::Range;
use thiserror::Error;

/// Malformed bracket nesting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("Unbalanced `{text}' (col {column})")]
    Unbalanced {
        text: String,
        line: usize,
        column: usize,
    },
    #[error("Unclosed `{text}' (col {column})")]
    Unclosed {
        text: String,
        line: usize,
        column: usize,
    },
}

impl StructureError {
    pub fn line(&self) -> usize {
        match self {
            StructureError::Unbalanced { line, .. }
            | StructureError::Unclosed { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bracket {
    Paren = 0,
    Brace = 1,
    Square = 2,
}

impl Bracket {
    fn opened_by(text: &str) -> Option<Self> {
        match text {
            "(" => Some(Bracket::Paren),
            "{" => Some(Bracket::Brace),
            "[" => Some(Bracket::Square),
            _ => None,
        }
    }

    fn closed_by(text: &str) -> Option<Self> {
        match text {
            ")" => Some(Bracket::Paren),
            "}" => Some(Bracket::Brace),
            "]" => Some(Bracket::Square),
            _ => None,
        }
    }
}

/// Ordered, indexable token sequence
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    balanced: bool,
}

impl TokenStream {
    /// Match brackets and assign depths.
    ///
    /// The stream is balanced only when every bracket found its partner.  A
    /// stray closer or an opener left open at the end shifts the depth of
    /// everything after it.
    pub fn new(mut tokens: Vec<Token>) -> (Self, Vec<StructureError>) {
        let mut stacks: [Vec<usize>; 3] = Default::default();
        let mut errors = Vec::new();

        for i in 0..tokens.len() {
            if let Some(bracket) = Bracket::closed_by(&tokens[i].text) {
                match stacks[bracket as usize].pop() {
                    Some(open) => {
                        tokens[i].matching = Some(open);
                        tokens[open].matching = Some(i);
                    }
                    None => errors.push(StructureError::Unbalanced {
                        text: tokens[i].text.clone(),
                        line: tokens[i].line,
                        column: tokens[i].column,
                    }),
                }
            }

            tokens[i].paren_depth = stacks[Bracket::Paren as usize].len();
            tokens[i].brace_depth = stacks[Bracket::Brace as usize].len();

            if let Some(bracket) = Bracket::opened_by(&tokens[i].text) {
                stacks[bracket as usize].push(i);
            }
        }

        let mut unclosed: Vec<usize> = stacks.into_iter().flatten().collect();
        unclosed.sort_unstable();
        errors.extend(unclosed.into_iter().map(|i| StructureError::Unclosed {
            text: tokens[i].text.clone(),
            line: tokens[i].line,
            column: tokens[i].column,
        }));

        let balanced = errors.is_empty();
        (Self { tokens, balanced }, errors)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// False when some bracket had no partner; depth and matching information
    /// is then unreliable.
    pub fn is_balanced(&self) -> bool {
        self.balanced
    }

    pub fn get(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Token)> {
        self.tokens.iter().enumerate()
    }

    pub fn prev(&self, i: usize) -> Option<&Token> {
        i.checked_sub(1).and_then(|p| self.tokens.get(p))
    }

    pub fn next(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i + 1)
    }

    pub fn matching(&self, i: usize) -> Option<usize> {
        self.tokens.get(i)?.matching
    }

    /// Split the argument list of the call whose `(` is at `open` into
    /// per-argument index ranges.
    ///
    /// Only commas directly inside the call parentheses separate arguments.
    /// `f()` yields a single empty range.
    pub fn call_arguments(&self, open: usize) -> Option<Vec<Range<usize>>> {
        let open_tok = self.tokens.get(open)?;
        if !open_tok.is_punct("(") {
            return None;
        }
        let close = open_tok.matching?;
        let depth = open_tok.paren_depth + 1;

        let mut args = Vec::new();
        let mut start = open + 1;
        for i in open + 1..close {
            let t = &self.tokens[i];
            if t.is_punct(",")
                && t.paren_depth == depth
                && t.brace_depth == open_tok.brace_depth
            {
                args.push(start..i);
                start = i + 1;
            }
        }
        args.push(start..close);
        Some(args)
    }
}

impl std::ops::Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, i: usize) -> &Token {
        &self.tokens[i]
    }
}
