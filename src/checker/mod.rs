//! Coding style checker
//!
//! This module runs the style rules over one source file:
//! - [`rules`]: The individual rules, grouped by what they inspect
//! - [`errors`]: Error types collected while checking
//! - [`constants`]: Operator sets, the boolean-argument table and limits
//!
//! # Checking Model
//!
//! Every [`Rule`] is an independent function from a [`RuleContext`] to a list
//! of [`Warning`]s.  Line rules look at the raw text, token rules at the
//! [`TokenStream`].  The [`Checker`] runs every enabled rule, merges the
//! results and sorts them by `(line, message)`, so the output does not
//! depend on rule order.
//!
//! Rules that rely on bracket matching or nesting depth are skipped when some
//! bracket in the file has no partner.  Everything else still runs.

pub mod constants;
pub mod errors;
pub mod rules;

pub use errors::CheckError;

use crate::tokenizer::{self, TokenStream};
use constants::{BOOLEAN_ARGUMENT_FUNCTIONS, DEFAULT_MAX_LINE_LENGTH};
use rustc_hash::{FxHashMap, FxHashSet};

/// One style violation on a zero-based source line.
///
/// Ordering is by line first and message second.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Warning {
    pub line: usize,
    pub message: String,
}

impl Warning {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// All style rules, in the order they are run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum,
)]
pub enum Rule {
    TrailingWhitespace,
    LongLines,
    TabCharacters,
    SpacesAround,
    SpaceAfter,
    SpaceBefore,
    SeparateBraces,
    KeywordSpacing,
    MultipleStatements,
    OneLiners,
    EolOperators,
    CallSpacing,
    ExtraParentheses,
    BooleanComparison,
    BooleanArguments,
}

impl Rule {
    pub const ALL: [Rule; 15] = [
        Rule::TrailingWhitespace,
        Rule::LongLines,
        Rule::TabCharacters,
        Rule::SpacesAround,
        Rule::SpaceAfter,
        Rule::SpaceBefore,
        Rule::SeparateBraces,
        Rule::KeywordSpacing,
        Rule::MultipleStatements,
        Rule::OneLiners,
        Rule::EolOperators,
        Rule::CallSpacing,
        Rule::ExtraParentheses,
        Rule::BooleanComparison,
        Rule::BooleanArguments,
    ];

    /// Name as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Rule::TrailingWhitespace => "trailing-whitespace",
            Rule::LongLines => "long-lines",
            Rule::TabCharacters => "tab-characters",
            Rule::SpacesAround => "spaces-around",
            Rule::SpaceAfter => "space-after",
            Rule::SpaceBefore => "space-before",
            Rule::SeparateBraces => "separate-braces",
            Rule::KeywordSpacing => "keyword-spacing",
            Rule::MultipleStatements => "multiple-statements",
            Rule::OneLiners => "one-liners",
            Rule::EolOperators => "eol-operators",
            Rule::CallSpacing => "call-spacing",
            Rule::ExtraParentheses => "extra-parentheses",
            Rule::BooleanComparison => "boolean-comparison",
            Rule::BooleanArguments => "boolean-arguments",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Rule::TrailingWhitespace => "whitespace at the end of a line",
            Rule::LongLines => "lines longer than the length limit",
            Rule::TabCharacters => "literal tab characters",
            Rule::SpacesAround => {
                "missing spaces around comparisons, assignments and `{'"
            }
            Rule::SpaceAfter => "missing space after `,' and `:'",
            Rule::SpaceBefore => "missing space before `}'",
            Rule::SeparateBraces => "statement `{' on its own line",
            Rule::KeywordSpacing => {
                "missing space after if, for, while and switch"
            }
            Rule::MultipleStatements => "more than one statement on a line",
            Rule::OneLiners => "control statement body on the same line",
            Rule::EolOperators => "binary operator at the end of a line",
            Rule::CallSpacing => "space between function name and `('",
            Rule::ExtraParentheses => {
                "parenthesised return, case and goto expressions"
            }
            Rule::BooleanComparison => "comparison to TRUE or FALSE",
            Rule::BooleanArguments => "boolean arguments passed as 0 or 1",
        }
    }

    /// Whether the rule relies on bracket matching or nesting depths
    pub fn needs_structure(self) -> bool {
        matches!(
            self,
            Rule::SeparateBraces
                | Rule::MultipleStatements
                | Rule::OneLiners
                | Rule::EolOperators
                | Rule::CallSpacing
                | Rule::ExtraParentheses
                | Rule::BooleanArguments
        )
    }

    pub fn run(self, cx: &RuleContext<'_>) -> Vec<Warning> {
        use rules::{calls, layout, lines, spacing};

        match self {
            Rule::TrailingWhitespace => lines::trailing_whitespace(cx),
            Rule::LongLines => lines::long_lines(cx),
            Rule::TabCharacters => lines::tab_characters(cx),
            Rule::SpacesAround => spacing::missing_spaces_around(cx),
            Rule::SpaceAfter => spacing::missing_space_after(cx),
            Rule::SpaceBefore => spacing::missing_space_before(cx),
            Rule::SeparateBraces => layout::separate_opening_braces(cx),
            Rule::KeywordSpacing => spacing::keyword_spacing(cx),
            Rule::MultipleStatements => layout::multiple_statements(cx),
            Rule::OneLiners => layout::one_liners(cx),
            Rule::EolOperators => layout::eol_operators(cx),
            Rule::CallSpacing => calls::function_call_spaces(cx),
            Rule::ExtraParentheses => calls::extra_parentheses(cx),
            Rule::BooleanComparison => calls::boolean_comparison(cx),
            Rule::BooleanArguments => calls::boolean_arguments(cx),
        }
    }
}

/// Functions with known `gboolean` parameters, keyed by name.
///
/// Positions are 1-based.  The table is built once and never changes.
#[derive(Debug, Clone)]
pub struct BooleanArgs {
    functions: FxHashMap<&'static str, &'static [usize]>,
}

impl BooleanArgs {
    pub fn new<I>(functions: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static [usize])>,
    {
        Self {
            functions: functions.into_iter().collect(),
        }
    }

    pub fn positions(&self, function: &str) -> Option<&'static [usize]> {
        self.functions.get(function).copied()
    }
}

impl Default for BooleanArgs {
    fn default() -> Self {
        Self::new(BOOLEAN_ARGUMENT_FUNCTIONS)
    }
}

/// Checker configuration
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub max_line_length: usize,
    pub disabled: FxHashSet<Rule>,
    pub boolean_args: BooleanArgs,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            disabled: FxHashSet::default(),
            boolean_args: BooleanArgs::default(),
        }
    }
}

/// Everything a rule may look at
pub struct RuleContext<'a> {
    /// Lines as read, without the newline
    pub raw_lines: &'a [&'a str],
    /// Right-trimmed lines
    pub lines: &'a [&'a str],
    /// Fully trimmed lines; token columns refer to these
    pub stripped: &'a [&'a str],
    pub tokens: &'a TokenStream,
    pub options: &'a CheckOptions,
}

impl RuleContext<'_> {
    /// Trimmed text of a line, quoted in messages
    pub fn stripped_line(&self, line: usize) -> &str {
        self.stripped.get(line).copied().unwrap_or("")
    }
}

/// Warnings and errors for one file
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Sorted by `(line, message)`
    pub warnings: Vec<Warning>,
    pub errors: Vec<CheckError>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// Runs the enabled rules over source files
#[derive(Debug, Clone, Default)]
pub struct Checker {
    options: CheckOptions,
}

impl Checker {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    /// Check a whole source text.
    pub fn check_source(&self, source: &str) -> CheckReport {
        self.check_lines(&split_lines(source))
    }

    /// Check source lines given without their newline characters.
    pub fn check_lines(&self, raw_lines: &[&str]) -> CheckReport {
        let lines: Vec<&str> = raw_lines.iter().map(|l| l.trim_end()).collect();
        let tokenized = tokenizer::tokenize(&lines);
        let stripped: Vec<&str> = lines.iter().map(|l| l.trim_start()).collect();

        let cx = RuleContext {
            raw_lines,
            lines: &lines,
            stripped: &stripped,
            tokens: &tokenized.stream,
            options: &self.options,
        };

        let mut warnings = Vec::new();
        for rule in Rule::ALL {
            if self.options.disabled.contains(&rule) {
                log::trace!("rule {} disabled", rule.name());
                continue;
            }
            if rule.needs_structure() && !cx.tokens.is_balanced() {
                log::debug!("unbalanced brackets, skipping {}", rule.name());
                continue;
            }
            warnings.extend(rule.run(&cx));
        }
        warnings.sort();

        let mut errors: Vec<CheckError> = tokenized
            .lex_errors
            .into_iter()
            .map(CheckError::from)
            .chain(tokenized.structure_errors.into_iter().map(CheckError::from))
            .collect();
        errors.sort_by_key(|e| e.line());

        log::debug!(
            "checked {} lines, {} tokens: {} warnings, {} errors",
            raw_lines.len(),
            tokenized.stream.len(),
            warnings.len(),
            errors.len()
        );

        CheckReport { warnings, errors }
    }
}

/// Split source text into lines without their `\n`.
///
/// A trailing newline does not start another line.  `\r` is kept so that
/// DOS line ends count as trailing whitespace.
pub fn split_lines(source: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = source.split('\n').collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// Run a single rule over `source`, for rule unit tests.
#[cfg(test)]
pub(crate) fn run_rule(rule: Rule, source: &str) -> Vec<Warning> {
    let mut options = CheckOptions::default();
    options.disabled = Rule::ALL.into_iter().filter(|r| *r != rule).collect();
    Checker::new(options).check_source(source).warnings
}
