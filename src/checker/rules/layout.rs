//! Layout rules
//!
//! These rules look at how statements and braces are distributed over lines
//! and need bracket matching and nesting depths.

use crate::checker::constants::EOL_OPERATORS;
use crate::checker::{RuleContext, Warning};
use crate::tokenizer::{Keyword, TokenKind, TokenStream};

/// A statement `{` on its own line after a `)`.
///
/// Braces at depth 0 open function bodies and top-level initializers, which
/// go on their own line.
pub fn separate_opening_braces(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.tokens
        .iter()
        .filter(|(_, t)| t.brace_depth > 0 && t.is_punct("{"))
        .filter(|&(i, t)| {
            cx.tokens
                .prev(i)
                .is_some_and(|p| t.line > p.line && p.is_punct(")"))
        })
        .map(|(_, t)| {
            Warning::new(
                t.line,
                format!("Opening brace on a separate line (col {})", t.column),
            )
        })
        .collect()
}

/// A `;` outside parentheses followed by something on the same line.
pub fn multiple_statements(cx: &RuleContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (i, t) in cx.tokens.iter() {
        if t.paren_depth > 0 || !t.is_punct(";") {
            continue;
        }
        let Some(succ) = cx.tokens.next(i) else {
            break;
        };
        if succ.line == t.line {
            warnings.push(Warning::new(
                t.line,
                format!(
                    "More than one statement on a line (col {}): {}",
                    succ.column,
                    cx.stripped_line(t.line)
                ),
            ));
        }
    }
    warnings
}

/// Index of the first token after `i`, stepping over a single `{`.
fn body_start(tokens: &TokenStream, i: usize) -> Option<usize> {
    let next = i + 1;
    if tokens.get(next)?.is_punct("{") {
        tokens.get(next + 1).map(|_| next + 1)
    } else {
        Some(next)
    }
}

/// Whether the `while` at `i` closes a `do { ... } while (...)` loop.
fn closes_do_loop(tokens: &TokenStream, i: usize) -> bool {
    let Some(prev) = tokens.prev(i) else {
        return false;
    };
    if !prev.is_punct("}") {
        return false;
    }
    prev.matching
        .and_then(|open| tokens.prev(open))
        .is_some_and(|t| t.is_keyword(Keyword::Do))
}

/// Bodies of `if`, `for`, `while` and `else` starting on the keyword's line.
///
/// `else if` on one line is fine.
pub fn one_liners(cx: &RuleContext<'_>) -> Vec<Warning> {
    let tokens = cx.tokens;
    let mut warnings = Vec::new();

    for (i, t) in tokens.iter() {
        let Some(keyword) = t.keyword else {
            continue;
        };

        let (succ, anchor_line) = match keyword {
            Keyword::Else => {
                let Some(succ) = body_start(tokens, i) else {
                    continue;
                };
                if tokens[succ].is_keyword(Keyword::If) {
                    continue;
                }
                (succ, t.line)
            }
            Keyword::If | Keyword::For | Keyword::While => {
                if keyword == Keyword::While && closes_do_loop(tokens, i) {
                    continue;
                }
                let open = i + 1;
                if !tokens.get(open).is_some_and(|t| t.is_punct("(")) {
                    continue;
                }
                let Some(close) = tokens.matching(open) else {
                    continue;
                };
                let Some(succ) = body_start(tokens, close) else {
                    continue;
                };
                (succ, tokens[close].line)
            }
            _ => continue,
        };

        let succ = &tokens[succ];
        if succ.line > anchor_line {
            continue;
        }
        warnings.push(Warning::new(
            succ.line,
            format!(
                "Statement for `{}' on the same line (col {}): {}",
                t.text,
                succ.column,
                cx.stripped_line(succ.line)
            ),
        ));
    }
    warnings
}

/// Binary operators ending a line inside a function body.
pub fn eol_operators(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.tokens
        .iter()
        .filter(|(_, t)| {
            t.brace_depth > 0
                && t.kind == TokenKind::Punctuation
                && EOL_OPERATORS.contains(&t.text.as_str())
        })
        .filter(|&(i, t)| cx.tokens.next(i).is_some_and(|s| s.line != t.line))
        .map(|(_, t)| {
            Warning::new(
                t.line,
                format!(
                    "Line ends with an operator `{}' (col {}): {}",
                    t.text,
                    t.column,
                    cx.stripped_line(t.line)
                ),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::checker::{run_rule, Rule, Warning};

    fn messages(rule: Rule, source: &str) -> Vec<String> {
        run_rule(rule, source).into_iter().map(|w| w.message).collect()
    }

    #[test]
    fn test_separate_opening_brace() {
        let source = "\
static void
foo(void)
{
    if (x)
    {
        y();
    }
    while (z) {
        w();
    }
}
";
        assert_eq!(
            run_rule(Rule::SeparateBraces, source),
            vec![Warning::new(4, "Opening brace on a separate line (col 0)")]
        );
    }

    #[test]
    fn test_multiple_statements_outside_parens_only() {
        let source = "\
void f(void)
{
    for (i = 0; i < 10; i++) {
        x++;
    }
    a = 1; b = 2;
}
";
        assert_eq!(
            messages(Rule::MultipleStatements, source),
            vec!["More than one statement on a line (col 7): a = 1; b = 2;"]
        );
    }

    #[test]
    fn test_last_semicolon_in_file() {
        assert!(messages(Rule::MultipleStatements, "x = 1;").is_empty());
    }

    #[test]
    fn test_one_liners() {
        let source = "\
void f(void)
{
    if (x) y = 1;
    for (;;) { z(); }
    while (w)
        w--;
    if (a) {
        b();
    } else c();
}
";
        assert_eq!(
            run_rule(Rule::OneLiners, source),
            vec![
                Warning::new(2, "Statement for `if' on the same line (col 7): if (x) y = 1;"),
                Warning::new(3, "Statement for `for' on the same line (col 11): for (;;) { z(); }"),
                Warning::new(8, "Statement for `else' on the same line (col 7): } else c();"),
            ]
        );
    }

    #[test]
    fn test_else_if_and_do_while_are_fine() {
        let source = "\
void f(void)
{
    if (a) {
        b();
    } else if (c) {
        d();
    }
    do {
        e();
    } while (g);
}
";
        assert!(run_rule(Rule::OneLiners, source).is_empty());
    }

    #[test]
    fn test_eol_operators() {
        let source = "\
int x = a +
        b;
void f(void)
{
    if (a &&
        b)
        c = d
            || e;
}
";
        assert_eq!(
            messages(Rule::EolOperators, source),
            vec!["Line ends with an operator `&&' (col 6): if (a &&"]
        );
    }
}
