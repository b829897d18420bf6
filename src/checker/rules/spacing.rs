//! Spacing rules
//!
//! Two tokens are *flush* when the second starts on the same line exactly
//! where the first ends.  A missing neighbour is never flush.

use crate::checker::constants::{SPACED_OPERATORS, SPACE_AFTER, SPACE_BEFORE};
use crate::checker::{RuleContext, Warning};
use crate::tokenizer::{Token, TokenKind};

fn flush_before(cx: &RuleContext<'_>, i: usize, t: &Token) -> bool {
    cx.tokens.prev(i).is_some_and(|p| p.is_flush_with(t))
}

fn flush_after(cx: &RuleContext<'_>, i: usize, t: &Token) -> bool {
    cx.tokens.next(i).is_some_and(|s| t.is_flush_with(s))
}

fn needs_spaces_around(t: &Token) -> bool {
    t.kind == TokenKind::Punctuation
        && (SPACED_OPERATORS.contains(&t.text.as_str()) || t.text.contains('='))
}

/// Comparisons, assignments, `&&`, `||`, `?` and `{` flush with a neighbour.
pub fn missing_spaces_around(cx: &RuleContext<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (i, t) in cx.tokens.iter() {
        if !needs_spaces_around(t) {
            continue;
        }
        let what = match (flush_before(cx, i, t), flush_after(cx, i, t)) {
            (false, false) => continue,
            (true, false) => "Missing space before",
            (false, true) => "Missing space after",
            (true, true) => "Missing spaces around",
        };
        warnings.push(Warning::new(
            t.line,
            format!(
                "{} `{}' (col {}): {}",
                what,
                t.text,
                t.column,
                cx.stripped_line(t.line)
            ),
        ));
    }
    warnings
}

/// `,` and `:` flush with the next token.
pub fn missing_space_after(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.tokens
        .iter()
        .filter(|(_, t)| {
            t.kind == TokenKind::Punctuation
                && SPACE_AFTER.contains(&t.text.as_str())
        })
        .filter(|&(i, t)| flush_after(cx, i, t))
        .map(|(_, t)| missing_after(cx, t))
        .collect()
}

/// `}` flush with the previous token.
pub fn missing_space_before(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.tokens
        .iter()
        .filter(|(_, t)| {
            t.kind == TokenKind::Punctuation
                && SPACE_BEFORE.contains(&t.text.as_str())
        })
        .filter(|&(i, t)| flush_before(cx, i, t))
        .map(|(_, t)| {
            Warning::new(
                t.line,
                format!(
                    "Missing space before `{}' (col {}): {}",
                    t.text,
                    t.column,
                    cx.stripped_line(t.line)
                ),
            )
        })
        .collect()
}

/// `if(`, `for(`, `while(`, `switch(`.
pub fn keyword_spacing(cx: &RuleContext<'_>) -> Vec<Warning> {
    cx.tokens
        .iter()
        .filter(|(_, t)| t.keyword.is_some_and(|k| k.is_control()))
        .filter(|&(i, t)| flush_after(cx, i, t))
        .map(|(_, t)| missing_after(cx, t))
        .collect()
}

fn missing_after(cx: &RuleContext<'_>, t: &Token) -> Warning {
    Warning::new(
        t.line,
        format!(
            "Missing space after `{}' (col {}): {}",
            t.text,
            t.column,
            cx.stripped_line(t.line)
        ),
    )
}

#[cfg(test)]
mod tests {
    use crate::checker::{run_rule, Rule};

    fn messages(rule: Rule, source: &str) -> Vec<String> {
        run_rule(rule, source).into_iter().map(|w| w.message).collect()
    }

    #[test]
    fn test_spaces_around() {
        assert_eq!(
            messages(Rule::SpacesAround, "a=b;\nc =d;\ne= f;\ng == h;\n"),
            vec![
                "Missing spaces around `=' (col 1): a=b;",
                "Missing space after `=' (col 2): c =d;",
                "Missing space before `=' (col 1): e= f;",
            ]
        );
    }

    #[test]
    fn test_spaces_around_compound_and_logic() {
        let found = messages(Rule::SpacesAround, "x+=1;\nif (a&&b || c<d) {\n");
        assert_eq!(
            found,
            vec![
                "Missing spaces around `+=' (col 1): x+=1;",
                "Missing spaces around `&&' (col 5): if (a&&b || c<d) {",
                "Missing spaces around `<' (col 13): if (a&&b || c<d) {",
            ]
        );
    }

    #[test]
    fn test_spaces_around_each_operator_class() {
        let source = "x = a>b;\ny = c?d : e;\nz = p||q;\nw = m!= n;\n";
        assert_eq!(
            messages(Rule::SpacesAround, source),
            vec![
                "Missing spaces around `>' (col 5): x = a>b;",
                "Missing spaces around `?' (col 5): y = c?d : e;",
                "Missing spaces around `||' (col 5): z = p||q;",
                "Missing space before `!=' (col 5): w = m!= n;",
            ]
        );
        assert!(messages(Rule::SpacesAround, "v = a > b ? c : d || e;\n").is_empty());
    }

    #[test]
    fn test_shift_and_arrow_are_not_spaced_operators() {
        assert!(messages(Rule::SpacesAround, "x = a<<2;\ny = p->q;\n").is_empty());
    }

    #[test]
    fn test_space_after_comma_and_colon() {
        assert_eq!(
            messages(Rule::SpaceAfter, "f(a,b, c);\nx = y ? 1 :2;\n"),
            vec![
                "Missing space after `,' (col 3): f(a,b, c);",
                "Missing space after `:' (col 10): x = y ? 1 :2;",
            ]
        );
        assert!(messages(Rule::SpaceAfter, "f(a,\n  b);\n").is_empty());
    }

    #[test]
    fn test_space_before_closing_brace() {
        assert_eq!(
            messages(Rule::SpaceBefore, "x = { 1, 2};\ny = { 1, 2 };\n"),
            vec!["Missing space before `}' (col 10): x = { 1, 2};"]
        );
    }

    #[test]
    fn test_keyword_spacing() {
        assert_eq!(
            messages(Rule::KeywordSpacing, "if(x)\n    while (y)\n        switch(z)\n"),
            vec![
                "Missing space after `if' (col 0): if(x)",
                "Missing space after `switch' (col 0): switch(z)",
            ]
        );
        assert!(messages(Rule::KeywordSpacing, "return(x);\n").is_empty());
    }
}
