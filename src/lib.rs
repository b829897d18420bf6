//! # Introduction
//!
//! cstyle checks C sources against the Gwyddion coding style.  It does not
//! parse C: a line-oriented tokenizer recovers just enough structure (tokens,
//! matching brackets, nesting depth) for a set of independent style rules to
//! work on, and every rule reports line-addressed warnings.
//!
//! ## Checking pipeline
//!
//! ```text
//! Source → Lines → Tokenizer → TokenStream → Rules → Sorted warnings
//! ```
//!
//! 1. [`tokenizer`]: scans right-trimmed lines into [`tokenizer::Token`]s,
//!    skipping comments and preprocessor lines, then matches brackets and
//!    assigns nesting depths in a [`tokenizer::TokenStream`].
//! 2. [`checker`]: runs each enabled [`checker::Rule`] over the raw lines
//!    and the token stream and sorts the resulting [`checker::Warning`]s.
//! 3. [`report`]: prints warnings as `file:line: message`.
//!
//! Malformed input never aborts a check.  Lex errors drop the rest of a
//! line, unbalanced brackets disable the rules that need bracket structure,
//! and both are returned next to the warnings.
//!
//! ```
//! let report = cstyle::check_source("if(x) y=1;\n");
//! assert!(report.warnings.iter().any(|w| w.message.starts_with("Missing space after `if'")));
//! ```

pub mod checker;
pub mod report;
pub mod tokenizer;

pub use checker::{CheckError, CheckOptions, CheckReport, Checker, Rule, Warning};

/// Check a source text with the default options.
pub fn check_source(source: &str) -> CheckReport {
    Checker::default().check_source(source)
}
