//! Logos-based lexer for the schedule text notation.
//!
//! The notation writes one action per token: `R1(X)` reads object `X` in
//! transaction 1, `W2(Y)` writes, `C1` commits, `A2` aborts. Actions are
//! separated by whitespace or commas, `//` starts a line comment.
//!
//! # Example input
//!
//! ```text
//! // lost update
//! R1(X) W2(X) W1(X) C2 C1
//! ```

use core::ops::Range;

/// All token kinds produced by the schedule lexer.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(::logos::Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A line comment starting with `//` and running to end of line.
    #[regex(r"//[^\n]*")]
    Comment,

    /// A read head: `R` or `r` followed by a transaction number.
    #[regex(r"[Rr][0-9]+", priority = 10)]
    Read,

    /// A write head: `W` or `w` followed by a transaction number.
    #[regex(r"[Ww][0-9]+", priority = 10)]
    Write,

    /// A commit: `C` or `c` followed by a transaction number.
    #[regex(r"[Cc][0-9]+", priority = 10)]
    Commit,

    /// An abort: `A` or `a` followed by a transaction number.
    #[regex(r"[Aa][0-9]+", priority = 10)]
    Abort,

    /// Opening parenthesis `(`.
    #[token("(")]
    ParenOpen,

    /// Closing parenthesis `)`.
    #[token(")")]
    ParenClose,

    /// Optional action separator `,`.
    #[token(",")]
    Comma,

    /// An object identifier: starts with a letter or underscore, followed
    /// by letters, digits, or underscores.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    /// A newline (`\n` or `\r\n`).
    #[regex(r"\r?\n")]
    Newline,

    /// Spaces or tabs. Emitted so the tokenizer can be used for syntax
    /// highlighting where whitespace positioning matters.
    #[regex(r"[ \t]+")]
    Whitespace,
}

/// A single token with its kind and the byte-offset span in the source.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Byte range `start..end` into the original input string.
    pub span: Range<usize>,
}

impl Token {
    /// Construct a new [`Token`].
    #[must_use]
    pub const fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Return the source text for this token given the original input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.span.clone()]
    }
}

/// Tokenize `input` and return all valid tokens.
///
/// Tokens that the lexer cannot recognise are silently skipped.
/// Use [`tokenize_with_text`] if you also need the source slice for each token.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|kind| Token { kind, span }))
        .collect()
}

/// Tokenize `input` and return tokens paired with their source text slices.
///
/// Tokens that the lexer cannot recognise are silently skipped.
#[must_use]
pub fn tokenize_with_text(input: &str) -> Vec<(Token, &str)> {
    use logos::Logos as _;
    TokenKind::lexer(input)
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|kind| {
                let text = &input[span.clone()];
                (Token { kind, span }, text)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{tokenize, tokenize_with_text, TokenKind};

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_schedule() {
        let input = "R1(X) W2(X) C1\n";
        let expected_kinds = [
            TokenKind::Read,
            TokenKind::ParenOpen,
            TokenKind::Ident, // X
            TokenKind::ParenClose,
            TokenKind::Whitespace,
            TokenKind::Write,
            TokenKind::ParenOpen,
            TokenKind::Ident, // X
            TokenKind::ParenClose,
            TokenKind::Whitespace,
            TokenKind::Commit,
            TokenKind::Newline,
        ];
        assert_eq!(kinds(input), expected_kinds);
    }

    #[test]
    fn test_action_heads_beat_idents() {
        // `R1`, `W23`, `C4`, `A5` are action heads, not identifiers.
        let ks = kinds("R1 W23 C4 A5");
        assert_eq!(ks[0], TokenKind::Read);
        assert_eq!(ks[2], TokenKind::Write);
        assert_eq!(ks[4], TokenKind::Commit);
        assert_eq!(ks[6], TokenKind::Abort);
    }

    #[test]
    fn test_bare_letters_are_idents() {
        let ks = kinds("R W C A xyz");
        assert!(ks
            .iter()
            .step_by(2)
            .all(|kind| *kind == TokenKind::Ident));
    }

    #[test]
    fn test_comment_tokenization() {
        let input = "// lost update\nR1(X)\n";
        let ks = kinds(input);
        assert_eq!(ks[0], TokenKind::Comment);
        assert_eq!(ks[1], TokenKind::Newline);
        assert_eq!(ks[2], TokenKind::Read);
    }

    #[test]
    fn test_comma_separator() {
        let ks = kinds("C1, A2");
        assert_eq!(
            ks,
            [
                TokenKind::Commit,
                TokenKind::Comma,
                TokenKind::Whitespace,
                TokenKind::Abort,
            ]
        );
    }

    #[test]
    fn test_tokenize_with_text_spans() {
        let input = "W7(acct)";
        let pairs = tokenize_with_text(input);
        let texts: Vec<&str> = pairs.iter().map(|(_, s)| *s).collect();
        assert_eq!(texts, &["W7", "(", "acct", ")"]);
    }

    #[test]
    fn test_token_text_helper() {
        let input = "R12(balance)";
        let tokens = tokenize(input);
        assert_eq!(tokens[0].text(input), "R12");
        assert_eq!(tokens[2].text(input), "balance");
    }

    #[test]
    fn test_span_correctness() {
        let input = "C1 A2";
        let tokens = tokenize(input);
        assert_eq!(tokens[0].span, 0..2);
        assert_eq!(tokens[1].span, 2..3);
        assert_eq!(tokens[2].span, 3..5);
    }
}
