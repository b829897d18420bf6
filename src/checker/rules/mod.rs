//! Style rules
//!
//! - [`lines`]: Rules over raw line text (length, tabs, trailing whitespace)
//! - [`spacing`]: Whitespace around operators, punctuation and keywords
//! - [`layout`]: Statement and brace placement across lines
//! - [`calls`]: Function calls, jump statements and boolean usage
//!
//! Every rule has the signature `fn(&RuleContext) -> Vec<Warning>` and reports
//! every occurrence it finds.

pub mod calls;
pub mod layout;
pub mod lines;
pub mod spacing;
