//! Line-oriented lexer for C source code
//!
//! The lexer works on right-trimmed lines and carries two bits of state from
//! one line to the next: whether a block comment is still open and whether
//! the previous line was a preprocessor line ending in a backslash.
//! Preprocessor lines produce no tokens at all, so `#if`/`#else` branches are
//! both scanned as ordinary code.
//!
//! Each line is left-trimmed before scanning and columns are counted in that
//! trimmed line.  At every position the matchers in [`MATCHERS`] are tried in
//! order and the first one that accepts wins.  A character no matcher accepts
//! produces a [`LexError`] and the whole line is dropped, including the tokens
//! already scanned on it.

use super::token::{Token, TokenKind};
use thiserror::Error;

/// A position on a line no token pattern accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Completely ugly code (trying to sync): {rest}")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    /// The unparsed remainder of the line.
    pub rest: String,
}

type Matcher = fn(&LineCursor) -> Option<usize>;

/// Token patterns in priority order.
///
/// Floats are tried before integers: a float needs a decimal point or an
/// exponent, anything else falls through to the integer pattern.
const MATCHERS: [(Matcher, TokenKind); 6] = [
    (LineCursor::match_string, TokenKind::String),
    (LineCursor::match_char, TokenKind::Char),
    (LineCursor::match_identifier, TokenKind::Identifier),
    (LineCursor::match_float, TokenKind::FloatLiteral),
    (LineCursor::match_int, TokenKind::IntLiteral),
    (LineCursor::match_punctuation, TokenKind::Punctuation),
];

const THREE_CHAR_PUNCT: [&str; 3] = ["<<=", ">>=", "..."];

const TWO_CHAR_PUNCT: [&str; 20] = [
    "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
    "&&", "||", "<<", ">>", "->", "::", "++", "--",
];

const ONE_CHAR_PUNCT: &str = "[](){};:?,.+-~!%^&*|/<>=";

/// Lexer state carried across lines
#[derive(Debug, Default)]
pub struct Lexer {
    in_block_comment: bool,
    in_macro: bool,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize all lines, returning the tokens and any per-line errors.
    pub fn tokenize<S: AsRef<str>>(
        mut self,
        lines: &[S],
    ) -> (Vec<Token>, Vec<LexError>) {
        for (line_no, line) in lines.iter().enumerate() {
            self.scan_line(line_no, line.as_ref());
        }
        (self.tokens, self.errors)
    }

    fn scan_line(&mut self, line_no: usize, raw: &str) {
        let text = raw.trim();
        let mut cursor = LineCursor::new(text);

        if self.in_block_comment {
            match cursor.find("*/", 0) {
                Some(pos) => {
                    cursor.position = pos + 2;
                    self.in_block_comment = false;
                }
                None => return,
            }
        } else if self.in_macro {
            self.in_macro = text.ends_with('\\');
            return;
        } else if text.starts_with('#') {
            self.in_macro = text.ends_with('\\');
            return;
        }

        let mut line_tokens = Vec::new();
        loop {
            cursor.skip_whitespace();
            if cursor.is_at_end() {
                break;
            }

            if cursor.starts_with("/*") {
                match cursor.find("*/", cursor.position + 2) {
                    Some(pos) => cursor.position = pos + 2,
                    None => {
                        self.in_block_comment = true;
                        break;
                    }
                }
                continue;
            }
            if cursor.starts_with("//") {
                break;
            }

            match self.next_token(&mut cursor, line_no) {
                Some(token) => line_tokens.push(token),
                None => {
                    log::trace!(
                        "line {}: dropping {} tokens before junk",
                        line_no,
                        line_tokens.len()
                    );
                    self.errors.push(LexError {
                        line: line_no,
                        column: cursor.position,
                        rest: cursor.rest(),
                    });
                    return;
                }
            }
        }
        self.tokens.append(&mut line_tokens);
    }

    fn next_token(
        &self,
        cursor: &mut LineCursor,
        line_no: usize,
    ) -> Option<Token> {
        MATCHERS.iter().find_map(|(matcher, kind)| {
            let len = matcher(&*cursor)?;
            let column = cursor.position;
            let text = cursor.take(len);
            Some(Token::new(*kind, text, line_no, column))
        })
    }
}

/// Character cursor over one left-trimmed line
struct LineCursor {
    input: Vec<char>,
    position: usize,
}

impl LineCursor {
    fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            position: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_ahead(0)
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    fn starts_with(&self, pat: &str) -> bool {
        pat.chars()
            .enumerate()
            .all(|(i, c)| self.peek_ahead(i) == Some(c))
    }

    /// Absolute index of the next occurrence of `pat` at or after `from`.
    fn find(&self, pat: &str, from: usize) -> Option<usize> {
        let pat: Vec<char> = pat.chars().collect();
        if from > self.input.len() {
            return None;
        }
        self.input[from..]
            .windows(pat.len())
            .position(|w| w == pat.as_slice())
            .map(|i| from + i)
    }

    fn take(&mut self, len: usize) -> String {
        let text = self.input[self.position..self.position + len]
            .iter()
            .collect();
        self.position += len;
        text
    }

    fn rest(&self) -> String {
        self.input[self.position..].iter().collect()
    }

    fn count_while(&self, from: usize, pred: impl Fn(char) -> bool) -> usize {
        let mut n = 0;
        while self.peek_ahead(from + n).is_some_and(&pred) {
            n += 1;
        }
        n
    }

    fn is_word_at(&self, offset: usize) -> bool {
        self.peek_ahead(offset).is_some_and(is_word_char)
    }

    /// `"..."` with backslash escapes, closed on the same line
    fn match_string(&self) -> Option<usize> {
        if self.peek()? != '"' {
            return None;
        }
        let mut i = 1;
        loop {
            match self.peek_ahead(i)? {
                '\\' => {
                    self.peek_ahead(i + 1)?;
                    i += 2;
                }
                '"' => return Some(i + 1),
                _ => i += 1,
            }
        }
    }

    /// `'c'`, `'\n'`, `'\0'`, `'\177'`, `'\x7f'`
    fn match_char(&self) -> Option<usize> {
        if self.peek()? != '\'' {
            return None;
        }
        let mut i = 1;
        match self.peek_ahead(i)? {
            '\\' => {
                i += 1;
                let escaped = self.peek_ahead(i)?;
                if escaped.is_digit(8) {
                    i += self.count_while(i, |c| c.is_digit(8)).min(3);
                } else if escaped == 'x' {
                    let digits = self.count_while(i + 1, |c| c.is_ascii_hexdigit());
                    if digits == 0 {
                        return None;
                    }
                    i += 1 + digits;
                } else {
                    i += 1;
                }
            }
            '\'' => return None,
            _ => i += 1,
        }
        (self.peek_ahead(i)? == '\'').then_some(i + 1)
    }

    fn match_identifier(&self) -> Option<usize> {
        let first = self.peek()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        Some(1 + self.count_while(1, is_word_char))
    }

    /// `1.5`, `1.`, `.5`, `1e10`, `2.5e-3f`
    fn match_float(&self) -> Option<usize> {
        let int_digits = self.count_while(0, |c| c.is_ascii_digit());
        let mut i = int_digits;
        let mut frac_digits = 0;
        let has_dot = self.peek_ahead(i) == Some('.');
        if has_dot {
            i += 1;
            frac_digits = self.count_while(i, |c| c.is_ascii_digit());
            i += frac_digits;
        }
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        let mut has_exponent = false;
        if matches!(self.peek_ahead(i), Some('e' | 'E')) {
            let mut j = i + 1;
            if matches!(self.peek_ahead(j), Some('+' | '-')) {
                j += 1;
            }
            let exp_digits = self.count_while(j, |c| c.is_ascii_digit());
            if exp_digits > 0 {
                i = j + exp_digits;
                has_exponent = true;
            }
        }
        if !has_dot && !has_exponent {
            return None;
        }

        if matches!(self.peek_ahead(i), Some('f' | 'F' | 'l' | 'L')) {
            i += 1;
        }
        (!self.is_word_at(i)).then_some(i)
    }

    /// Hexadecimal, octal or decimal integers with `LlUu` suffixes
    fn match_int(&self) -> Option<usize> {
        let mut i = if self.peek()? == '0'
            && matches!(self.peek_ahead(1), Some('x' | 'X'))
            && self.peek_ahead(2).is_some_and(|c| c.is_ascii_hexdigit())
        {
            2 + self.count_while(2, |c| c.is_ascii_hexdigit())
        } else {
            self.count_while(0, |c| c.is_ascii_digit())
        };
        if i == 0 {
            return None;
        }
        i += self.count_while(i, |c| matches!(c, 'l' | 'L' | 'u' | 'U'));
        (!self.is_word_at(i)).then_some(i)
    }

    /// Longest operator or punctuator at the cursor
    fn match_punctuation(&self) -> Option<usize> {
        if THREE_CHAR_PUNCT.iter().any(|p| self.starts_with(p)) {
            return Some(3);
        }
        if TWO_CHAR_PUNCT.iter().any(|p| self.starts_with(p)) {
            return Some(2);
        }
        ONE_CHAR_PUNCT.contains(self.peek()?).then_some(1)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(lines: &[&str]) -> Vec<Token> {
        let (tokens, errors) = Lexer::new().tokenize(lines);
        assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
        tokens
    }

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = lex(&["int x = 1;"]);
        let summary: Vec<_> = tokens
            .iter()
            .map(|t| (t.kind, t.text.as_str(), t.column))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenKind::Identifier, "int", 0),
                (TokenKind::Identifier, "x", 4),
                (TokenKind::Punctuation, "=", 6),
                (TokenKind::IntLiteral, "1", 8),
                (TokenKind::Punctuation, ";", 9),
            ]
        );
    }

    #[test]
    fn test_columns_ignore_indentation() {
        let tokens = lex(&["        return x;"]);
        assert_eq!(tokens[0].column, 0);
        assert_eq!(tokens[1].column, 7);
        assert_eq!(tokens[2].column, 8);
    }

    #[test]
    fn test_comments_produce_no_tokens() {
        let with_comment = lex(&["int x; /* comment */ int y;"]);
        let without = lex(&["int x;  int y;"]);
        assert_eq!(texts(&with_comment), texts(&without));

        let tokens = lex(&["a = b; // trailing remark"]);
        assert_eq!(texts(&tokens), vec!["a", "=", "b", ";"]);
    }

    #[test]
    fn test_multiline_comment() {
        let tokens = lex(&["x = 1; /* start", "still comment", "end */ y = 2;"]);
        assert_eq!(texts(&tokens), vec!["x", "=", "1", ";", "y", "=", "2", ";"]);
        let y = &tokens[4];
        assert_eq!((y.line, y.column), (2, 7));
    }

    #[test]
    fn test_preprocessor_lines_skipped() {
        let tokens = lex(&[
            "#include <stdio.h>",
            "#define MAX(a, b) \\",
            "    ((a) > (b) ? (a) : (b))",
            "int x;",
        ]);
        assert_eq!(texts(&tokens), vec!["int", "x", ";"]);
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn test_string_and_char_literals() {
        let tokens = lex(&[r#"s = "a \"quoted\" \\ str"; c = '\''; o = '\012'; h = '\x7f';"#]);
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].text, r#""a \"quoted\" \\ str""#);
        assert_eq!(tokens[6].kind, TokenKind::Char);
        assert_eq!(tokens[6].text, r"'\''");
        assert_eq!(tokens[10].text, r"'\012'");
        assert_eq!(tokens[14].text, r"'\x7f'");
    }

    #[test]
    fn test_numbers() {
        let tokens = lex(&["a = 0x1fUL + 017 + 42 + 1.5e-3f + 2. + .5 + 1e6;"]);
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|t| {
                matches!(t.kind, TokenKind::IntLiteral | TokenKind::FloatLiteral)
            })
            .map(|t| (t.kind, t.text.as_str()))
            .collect();
        assert_eq!(
            numbers,
            vec![
                (TokenKind::IntLiteral, "0x1fUL"),
                (TokenKind::IntLiteral, "017"),
                (TokenKind::IntLiteral, "42"),
                (TokenKind::FloatLiteral, "1.5e-3f"),
                (TokenKind::FloatLiteral, "2."),
                (TokenKind::FloatLiteral, ".5"),
                (TokenKind::FloatLiteral, "1e6"),
            ]
        );
    }

    #[test]
    fn test_member_access_after_index() {
        let tokens = lex(&["v = a[1].y;"]);
        assert_eq!(texts(&tokens), vec!["v", "=", "a", "[", "1", "]", ".", "y", ";"]);
    }

    #[test]
    fn test_operators() {
        let tokens = lex(&["a <<= b->c++ && d != e || f... >= g::h"]);
        assert_eq!(
            texts(&tokens),
            vec![
                "a", "<<=", "b", "->", "c", "++", "&&", "d", "!=", "e", "||",
                "f", "...", ">=", "g", "::", "h"
            ]
        );
    }

    #[test]
    fn test_error_drops_whole_line() {
        let (tokens, errors) =
            Lexer::new().tokenize(&["a = 1; @ b = 2;", "c = 3;"]);
        assert_eq!(texts(&tokens), vec!["c", "=", "3", ";"]);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 0);
        assert_eq!(errors[0].column, 7);
        assert_eq!(errors[0].rest, "@ b = 2;");
        assert!(errors[0].to_string().contains("trying to sync"));
    }

    #[test]
    fn test_error_line_leaves_no_open_brackets() {
        let (tokens, errors) = Lexer::new().tokenize(&["g(a, @b);", "x = 1;"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column, 5);
        assert_eq!(texts(&tokens), vec!["x", "=", "1", ";"]);
    }

    #[test]
    fn test_tokens_before_open_comment_are_kept() {
        let tokens = lex(&["a = 1; /* open", "*/ b = 2;"]);
        assert_eq!(texts(&tokens), vec!["a", "=", "1", ";", "b", "=", "2", ";"]);
    }
}
