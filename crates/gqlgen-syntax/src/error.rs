use crate::lexer::{Token, TokenKind};
use std::fmt;

/// Position of the first character of a token or node.
///
/// Both fields are 0-based; [`Display`](fmt::Display) renders them 1-based as
/// `line,column`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    pub line: usize,
    pub column: usize,
}

impl Loc {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.display_line(), self.display_column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: String },
    /// The parser needed a real token and met an `ERROR` token from the lexer.
    LexError { message: String },
    MismatchedBrackets,
    /// Definitions stopped matching before the end of the input. `cause` is
    /// the failure that got furthest into the token stream.
    Premature { cause: Option<Box<ParseError>> },
}

/// A syntax error paired with the token the parser was looking at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Token,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: Token) -> Self {
        Self { kind, token }
    }

    pub fn unexpected(expected: impl Into<String>, token: Token) -> Self {
        if token.kind == TokenKind::Error {
            return Self::new(ParseErrorKind::LexError { message: token.value.clone() }, token);
        }
        Self::new(ParseErrorKind::UnexpectedToken { expected: expected.into() }, token)
    }

    /// Where this error was raised. For `Premature` that is the leftover
    /// token; use [`root_cause`](Self::root_cause) to reach the token that
    /// actually failed.
    pub fn loc(&self) -> Loc {
        self.token.loc
    }

    fn write_at(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " at line {}, column {}",
            self.token.loc.display_line(),
            self.token.loc.display_column()
        )
    }

    /// Follows `Premature` causes down to the innermost failure.
    pub fn root_cause(&self) -> &ParseError {
        match &self.kind {
            ParseErrorKind::Premature { cause: Some(cause) } => cause.root_cause(),
            _ => self,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected } => {
                write!(f, "expected {}, found {}", expected, self.token.display_name())?;
                self.write_at(f)
            }
            ParseErrorKind::LexError { message } => {
                write!(f, "{}", message)?;
                self.write_at(f)
            }
            ParseErrorKind::MismatchedBrackets => {
                if self.token.kind == TokenKind::RightBracket {
                    write!(f, "mismatched list brackets: ']' without a matching '['")?;
                } else {
                    write!(
                        f,
                        "mismatched list brackets: expected ']', found {}",
                        self.token.display_name()
                    )?;
                }
                self.write_at(f)
            }
            ParseErrorKind::Premature { cause } => {
                write!(f, "stopped parsing prematurely at {}", self.token.display_name())?;
                self.write_at(f)?;
                if let Some(cause) = cause {
                    write!(f, ": {}", cause)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Renders a [`ParseError`] against the source it came from, with the
/// offending line and a caret under the failing token.
pub struct Diagnostic<'a> {
    source: &'a str,
    error: &'a ParseError,
}

impl<'a> Diagnostic<'a> {
    pub fn new(source: &'a str, error: &'a ParseError) -> Self {
        Self { source, error }
    }

    fn label(&self) -> &str {
        match self.error.root_cause().kind {
            ParseErrorKind::LexError { .. } => "lexical error",
            ParseErrorKind::MismatchedBrackets => "unbalanced list type",
            _ => "parse error",
        }
    }

    pub fn format_error(&self) -> String {
        let mut output = String::new();
        let cause = self.error.root_cause();
        let loc = cause.loc();

        output.push_str(&format!("\x1b[1;31merror\x1b[0m: {}\n", self.error));
        output.push_str(&format!(
            "  \x1b[1;34m-->\x1b[0m line {}:{}\n",
            loc.display_line(),
            loc.display_column()
        ));
        output.push_str("   \x1b[1;34m|\x1b[0m\n");

        let lines: Vec<&str> = self.source.lines().collect();
        // EOF after a trailing newline sits one line past the last one
        let line_idx = loc.line.min(lines.len().saturating_sub(1));

        if let Some(line_content) = lines.get(line_idx) {
            let column = if line_idx == loc.line {
                loc.column
            } else {
                line_content.chars().count()
            };
            let width = (line_idx + 2).to_string().len().max(2);
            output.push_str(&format!(
                " {: >width$} \x1b[1;34m|\x1b[0m {}\n",
                line_idx + 1,
                line_content,
                width = width
            ));

            let visual_col: usize = line_content
                .chars()
                .take(column)
                .map(|ch| if ch == '\t' { 4 } else { 1 })
                .sum();

            output.push_str(&format!(
                " {: >width$} \x1b[1;34m|\x1b[0m {}\x1b[1;31m{}\x1b[0m {}\n",
                "",
                " ".repeat(visual_col),
                "^".repeat(cause.token.width()),
                self.label(),
                width = width
            ));
        }

        output.push_str("   \x1b[1;34m|\x1b[0m\n");
        output
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str, line: usize, column: usize) -> Token {
        Token::new(TokenKind::Text, Loc::new(line, column), value)
    }

    #[test]
    fn test_loc_displays_one_based() {
        assert_eq!(Loc::new(0, 0).to_string(), "1,1");
        assert_eq!(Loc::new(2, 7).to_string(), "3,8");
    }

    #[test]
    fn test_unexpected_on_error_token_becomes_lex_error() {
        let token = Token::new(TokenKind::Error, Loc::new(0, 4), "unknown character '%'");
        let err = ParseError::unexpected("':'", token);

        assert!(matches!(err.kind, ParseErrorKind::LexError { .. }));
        assert_eq!(err.to_string(), "unknown character '%' at line 1, column 5");
    }

    #[test]
    fn test_root_cause_unwraps_premature() {
        let inner = ParseError::unexpected("'}'", text("ping", 1, 2));
        let outer = ParseError::new(
            ParseErrorKind::Premature { cause: Some(Box::new(inner.clone())) },
            text("type", 0, 0),
        );

        assert_eq!(outer.root_cause(), &inner);
        assert!(outer.to_string().starts_with("stopped parsing prematurely at 'type'"));
    }

    #[test]
    fn test_diagnostic_points_at_token() {
        let source = "type Query {\n  ping: Strin%\n}";
        let token = Token::new(TokenKind::Error, Loc::new(1, 13), "unknown character '%'");
        let err = ParseError::unexpected("'}'", token);

        let rendered = Diagnostic::new(source, &err).format_error();
        assert!(rendered.contains("line 2:14"));
        assert!(rendered.contains("ping: Strin%"));
        assert!(rendered.contains("lexical error"));
    }

    #[test]
    fn test_diagnostic_at_eof_after_trailing_newline() {
        let source = "type Query {\n";
        let token = Token::new(TokenKind::Eof, Loc::new(1, 0), "");
        let err = ParseError::unexpected("'}'", token);

        let rendered = Diagnostic::new(source, &err).format_error();
        assert!(rendered.contains("line 2:1"));
        assert!(rendered.contains("type Query {\n"));
        assert!(rendered.contains(&format!("{}\x1b[1;31m^", " ".repeat(12))));
    }

    #[test]
    fn test_premature_loc_is_leftover_token() {
        let inner = ParseError::new(ParseErrorKind::MismatchedBrackets, text("", 0, 27));
        let outer = ParseError::new(
            ParseErrorKind::Premature { cause: Some(Box::new(inner)) },
            text("type", 0, 0),
        );

        assert_eq!(outer.loc(), Loc::new(0, 0));
        assert_eq!(outer.root_cause().loc(), Loc::new(0, 27));
    }
}
