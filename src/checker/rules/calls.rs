//! Function call and expression rules

use crate::checker::constants::BOOLEAN_LITERALS;
use crate::checker::{RuleContext, Warning};
use crate::tokenizer::{Keyword, TokenKind};

/// GNU style `name (args)` calls inside function bodies.
///
/// `(*fp) (x)` and declarations like `gint (*fp)(gint)` are left alone: the
/// first has no identifier before `(`, the second is followed by another `(`.
pub fn function_call_spaces(cx: &RuleContext<'_>) -> Vec<Warning> {
    let tokens = cx.tokens;
    let mut warnings = Vec::new();

    for (i, t) in tokens.iter() {
        if t.brace_depth == 0 || !t.is_punct("(") {
            continue;
        }
        let Some(prev) = tokens.prev(i) else {
            continue;
        };
        if prev.kind != TokenKind::Identifier
            || prev.keyword.is_some_and(|k| k.is_control() || k.is_jump())
            || prev.is_flush_with(t)
        {
            continue;
        }
        let Some(close) = t.matching else {
            continue;
        };
        if tokens.next(close).is_some_and(|s| s.is_punct("(")) {
            continue;
        }
        warnings.push(Warning::new(
            t.line,
            format!(
                "Space between function name and parenthesis (col {}): {}",
                t.column,
                cx.stripped_line(t.line)
            ),
        ));
    }
    warnings
}

/// `return (x);`, `goto (label);` and `case (X):`.
pub fn extra_parentheses(cx: &RuleContext<'_>) -> Vec<Warning> {
    let tokens = cx.tokens;
    let mut warnings = Vec::new();

    for (i, t) in tokens.iter() {
        if !t.is_punct("(") {
            continue;
        }
        let terminator = match tokens.prev(i).and_then(|p| p.keyword) {
            Some(Keyword::Return | Keyword::Goto) => ";",
            Some(Keyword::Case) => ":",
            _ => continue,
        };
        let Some(close) = t.matching else {
            continue;
        };
        if tokens.next(close).is_some_and(|s| s.is_punct(terminator)) {
            warnings.push(Warning::new(
                t.line,
                format!("Extra return/case/goto parentheses (col {})", t.column),
            ));
        }
    }
    warnings
}

/// `x == TRUE`, `y != FALSE`.
pub fn boolean_comparison(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.tokens
        .iter()
        .filter(|(_, t)| {
            t.kind == TokenKind::Identifier
                && BOOLEAN_LITERALS.contains(&t.text.as_str())
        })
        .filter(|&(i, _)| {
            cx.tokens
                .prev(i)
                .is_some_and(|p| p.is_punct("==") || p.is_punct("!="))
        })
        .map(|(_, t)| {
            Warning::new(
                t.line,
                format!(
                    "Comparison to boolean literal `{}' (col {}): {}",
                    t.text,
                    t.column,
                    cx.stripped_line(t.line)
                ),
            )
        })
        .collect()
}

/// Literal `0` or `1` passed where a known function expects a `gboolean`.
pub fn boolean_arguments(cx: &RuleContext<'_>) -> Vec<Warning> {
    let tokens = cx.tokens;
    let mut warnings = Vec::new();

    for (i, t) in tokens.iter() {
        if t.kind != TokenKind::Identifier {
            continue;
        }
        let Some(positions) = cx.options.boolean_args.positions(&t.text) else {
            continue;
        };
        let Some(args) = tokens.call_arguments(i + 1) else {
            continue;
        };

        for &pos in positions {
            let Some(arg) = pos.checked_sub(1).and_then(|k| args.get(k)) else {
                continue;
            };
            if arg.len() != 1 {
                continue;
            }
            let arg = &tokens[arg.start];
            if arg.kind != TokenKind::IntLiteral
                || !matches!(arg.text.as_str(), "0" | "1")
            {
                continue;
            }
            warnings.push(Warning::new(
                arg.line,
                format!(
                    "Boolean argument {} of {} passed as number (col {}): {}",
                    pos,
                    t.text,
                    arg.column,
                    cx.stripped_line(arg.line)
                ),
            ));
        }
    }
    warnings
}
