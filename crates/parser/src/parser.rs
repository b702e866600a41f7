//! Winnow-based parser for the schedule text notation.
//!
//! Grammar:
//! ```text
//! schedule = trivia action (trivia action)* trivia
//! action   = read | write | commit | abort
//! read     = ("R" | "r") INTEGER "(" object ")"
//! write    = ("W" | "w") INTEGER "(" object ")"
//! commit   = ("C" | "c") INTEGER
//! abort    = ("A" | "a") INTEGER
//! object   = IDENT
//! ```
//! Actions are separated by whitespace, newlines, or an optional comma.
//! `//` comments run to end of line. An input with no actions at all is a
//! valid empty schedule.

use schedcheck_core::schedule::types::{Action, Schedule, TransactionId};
use winnow::ascii::dec_uint;
use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse a schedule in the compact text notation.
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when the input
/// does not conform to the grammar.
pub fn parse_schedule(input: &str) -> Result<Schedule<String>, ParseError> {
    let original = input;
    let mut stream: &str = input;
    match schedule_parser.parse_next(&mut stream) {
        Ok(schedule) => Ok(schedule),
        Err(e) => {
            // Compute how many bytes were consumed before the error.
            let remaining_len = stream.len();
            let consumed = original.len().saturating_sub(remaining_len);
            let (line, column) = offset_to_line_col(original, consumed);
            Err(ParseError {
                message: e.to_string(),
                line,
                column,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Trivia
// ---------------------------------------------------------------------------

/// A `//` comment running to end of line (exclusive of the newline).
fn comment(input: &mut &str) -> ModalResult<()> {
    literal("//").parse_next(input)?;
    take_while(0.., |c: char| c != '\n').void().parse_next(input)
}

/// Skip whitespace, newlines, comments, and action-separating commas.
fn trivia(input: &mut &str) -> ModalResult<()> {
    loop {
        let before = input.len();
        take_while(0.., |c: char| c.is_ascii_whitespace() || c == ',')
            .void()
            .parse_next(input)?;
        if input.starts_with("//") {
            comment.parse_next(input)?;
        }
        if input.len() == before {
            return Ok(());
        }
    }
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// Parse a transaction number.
fn transaction(input: &mut &str) -> ModalResult<TransactionId> {
    dec_uint.parse_next(input).map(TransactionId)
}

/// Parse an object identifier: a letter or underscore, then letters,
/// digits, or underscores.
fn object(input: &mut &str) -> ModalResult<String> {
    let head = one_of(|c: char| c.is_alphabetic() || c == '_').parse_next(input)?;
    let tail: &str =
        take_while(0.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)?;
    let mut name = String::new();
    name.push(head);
    name.push_str(tail);
    Ok(name)
}

/// `"(" object ")"`
fn parenthesized_object(input: &mut &str) -> ModalResult<String> {
    literal("(").parse_next(input)?;
    let name = object.parse_next(input)?;
    literal(")").parse_next(input)?;
    Ok(name)
}

// ---------------------------------------------------------------------------
// Action parsers
// ---------------------------------------------------------------------------

/// `("R" | "r") INTEGER "(" object ")"`  -- read action
fn read_action(input: &mut &str) -> ModalResult<Action<String>> {
    one_of(['R', 'r']).parse_next(input)?;
    let t = transaction.parse_next(input)?;
    let obj = parenthesized_object.parse_next(input)?;
    Ok(Action::read(t, obj))
}

/// `("W" | "w") INTEGER "(" object ")"`  -- write action
fn write_action(input: &mut &str) -> ModalResult<Action<String>> {
    one_of(['W', 'w']).parse_next(input)?;
    let t = transaction.parse_next(input)?;
    let obj = parenthesized_object.parse_next(input)?;
    Ok(Action::write(t, obj))
}

/// `("C" | "c") INTEGER`  -- commit
fn commit_action(input: &mut &str) -> ModalResult<Action<String>> {
    one_of(['C', 'c']).parse_next(input)?;
    let t = transaction.parse_next(input)?;
    Ok(Action::commit(t))
}

/// `("A" | "a") INTEGER`  -- abort
fn abort_action(input: &mut &str) -> ModalResult<Action<String>> {
    one_of(['A', 'a']).parse_next(input)?;
    let t = transaction.parse_next(input)?;
    Ok(Action::abort(t))
}

/// Any action.
fn action(input: &mut &str) -> ModalResult<Action<String>> {
    alt((read_action, write_action, commit_action, abort_action)).parse_next(input)
}

// ---------------------------------------------------------------------------
// Schedule parser
// ---------------------------------------------------------------------------

/// The top-level schedule: trivia-separated actions until end-of-input.
fn schedule_parser(input: &mut &str) -> ModalResult<Schedule<String>> {
    let mut actions = Vec::new();

    trivia.parse_next(input)?;
    while !input.is_empty() {
        actions.push(action.parse_next(input)?);
        trivia.parse_next(input)?;
    }

    Ok(actions)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use schedcheck_core::schedule::display::format_schedule;

    use super::*;

    // Shorthand constructors for tests.
    fn r(t: u64, obj: &str) -> Action<String> {
        Action::read(TransactionId(t), obj.to_string())
    }
    fn w(t: u64, obj: &str) -> Action<String> {
        Action::write(TransactionId(t), obj.to_string())
    }
    fn c(t: u64) -> Action<String> {
        Action::commit(TransactionId(t))
    }
    fn a(t: u64) -> Action<String> {
        Action::abort(TransactionId(t))
    }

    // -----------------------------------------------------------------------
    // Happy-path tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_single_action() {
        let result = parse_schedule("R1(X)\n").expect("should parse");
        assert_eq!(result, vec![r(1, "X")]);
    }

    #[test]
    fn test_full_schedule() {
        let result = parse_schedule("R1(X) W2(X) W1(X) C2 C1\n").expect("should parse");
        assert_eq!(result, vec![r(1, "X"), w(2, "X"), w(1, "X"), c(2), c(1)]);
    }

    #[test]
    fn test_aborts_and_multi_digit_ids() {
        let result = parse_schedule("W12(acct) A12 C3").expect("should parse");
        assert_eq!(result, vec![w(12, "acct"), a(12), c(3)]);
    }

    #[test]
    fn test_lowercase_heads() {
        let result = parse_schedule("r1(x) w2(x) c1 a2\n").expect("should parse");
        assert_eq!(result, vec![r(1, "x"), w(2, "x"), c(1), a(2)]);
    }

    #[test]
    fn test_commas_and_newlines_as_separators() {
        let input = "R1(X), W2(X)\nW1(X),\nC2 C1\n";
        let result = parse_schedule(input).expect("should parse");
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "// lost update\nR1(X) W2(X)\n// terminators\nC1 C2\n";
        let result = parse_schedule(input).expect("should parse");
        assert_eq!(result, vec![r(1, "X"), w(2, "X"), c(1), c(2)]);
    }

    #[test]
    fn test_empty_input_is_empty_schedule() {
        assert_eq!(parse_schedule("").expect("should parse"), vec![]);
        assert_eq!(
            parse_schedule("// nothing\n").expect("should parse"),
            vec![]
        );
        assert_eq!(parse_schedule("  \n\t\n").expect("should parse"), vec![]);
    }

    #[test]
    fn test_round_trips_through_display() {
        let schedule = vec![r(1, "X"), w(2, "X"), w(1, "X"), c(2), a(1)];
        let text = format_schedule(&schedule);
        assert_eq!(parse_schedule(&text).expect("should parse"), schedule);
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_unknown_head_is_rejected() {
        // `X1(A)` is not one of the four action kinds.
        let err = parse_schedule("R1(A) X1(A)\n").expect_err("should fail");
        assert_eq!(err.line, 1, "expected error on line 1, got: {err}");
    }

    #[test]
    fn test_missing_object_is_rejected() {
        let err = parse_schedule("R1()\n").expect_err("should fail");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_read_without_object_is_rejected() {
        // A read head must carry an object; a bare `R1` is malformed.
        assert!(parse_schedule("R1 C1\n").is_err());
    }

    #[test]
    fn test_parse_error_has_line_column() {
        let err = parse_schedule("R1(X)\n@bad\n").expect_err("should fail");
        assert_eq!(err.line, 2, "expected error on line 2, got: {err}");
    }

    #[test]
    fn test_parse_error_display() {
        let err = parse_schedule("@bad\n").expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.contains("parse error"),
            "display should contain 'parse error': {msg}"
        );
        assert!(msg.contains("line"), "display should contain 'line': {msg}");
    }

    #[test]
    fn test_offset_to_line_col_first_line() {
        let (line, col) = offset_to_line_col("hello\nworld\n", 0);
        assert_eq!(line, 1);
        assert_eq!(col, 1);
    }

    #[test]
    fn test_offset_to_line_col_second_line() {
        // "hello\n" is 6 bytes; offset 6 is start of second line.
        let (line, col) = offset_to_line_col("hello\nworld\n", 6);
        assert_eq!(line, 2);
        assert_eq!(col, 1);
    }
}
