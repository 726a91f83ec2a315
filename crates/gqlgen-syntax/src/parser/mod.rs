mod combinators;
mod grammar;

use crate::ast::DocumentNode;
use crate::error::{Loc, ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind, lex};

/// Cursor over a materialised token stream.
///
/// Whitespace tokens are stepped over on every move, so the grammar never
/// sees them. The stream always ends in an EOF token and the cursor never
/// moves past it.
pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    furthest: Option<(usize, ParseError)>,
}

impl Parser {
    pub(crate) fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut tokens: Vec<Token> = tokens.into_iter().collect();

        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let loc = tokens.last().map(|t| t.loc).unwrap_or_default();
            tokens.push(Token::new(TokenKind::Eof, loc, ""));
        }

        let mut parser = Self {
            tokens,
            pos: 0,
            furthest: None,
        };
        parser.skip_whitespace();
        parser
    }

    fn skip_whitespace(&mut self) {
        while self.tokens[self.pos].kind == TokenKind::Whitespace {
            self.pos += 1;
        }
    }

    #[inline]
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
            self.skip_whitespace();
        }
        token
    }

    /// True only on the final EOF. A stream spliced from several lexer runs
    /// can carry an EOF earlier on; that one does not end the document.
    pub(crate) fn at_end(&self) -> bool {
        self.pos + 1 == self.tokens.len()
    }

    #[inline]
    pub(crate) fn loc(&self) -> Loc {
        self.peek().loc
    }

    #[inline]
    pub(crate) fn mark(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn reset(&mut self, mark: usize) {
        self.pos = mark;
    }

    /// Records `err` as the furthest failure if it got at least as far as the
    /// one on record, and hands it back. A lexer error keeps its place against
    /// later failures at the same position.
    pub(crate) fn fail(&mut self, err: ParseError) -> ParseError {
        let replace = match &self.furthest {
            None => true,
            Some((pos, recorded)) => {
                self.pos > *pos
                    || (self.pos == *pos
                        && !matches!(recorded.kind, ParseErrorKind::LexError { .. }))
            }
        };

        if replace {
            tracing::trace!(position = self.pos, "furthest failure: {}", err);
            self.furthest = Some((self.pos, err.clone()));
        }
        err
    }

    pub(crate) fn take_furthest(&mut self) -> Option<ParseError> {
        self.furthest.take().map(|(_, err)| err)
    }
}

/// Parses a token stream into a [`DocumentNode`].
///
/// The stream is usually the output of [`lex`](crate::lexer::lex) or a
/// [`Lexer`](crate::lexer::Lexer); an EOF token is assumed if it is missing.
/// The first syntax error aborts the parse and no partial tree is returned.
pub fn parse<I>(tokens: I) -> Result<DocumentNode, ParseError>
where
    I: IntoIterator<Item = Token>,
{
    let mut parser = Parser::new(tokens);
    tracing::debug!(tokens = parser.tokens.len(), "parsing document");

    let document = grammar::document()(&mut parser)?;

    tracing::debug!(definitions = document.definitions.len(), "parsed document");
    Ok(document)
}

/// Lexes and parses `source` in one go.
pub fn parse_str(source: &str) -> Result<DocumentNode, ParseError> {
    parse(lex(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_skips_leading_whitespace() {
        let p = Parser::new(lex("   \n  type"));

        assert_eq!(p.peek().value, "type");
        assert_eq!(p.loc(), Loc::new(1, 2));
    }

    #[test]
    fn test_missing_eof_is_appended() {
        let tokens = vec![Token::new(TokenKind::Text, Loc::new(0, 0), "type")];
        let mut p = Parser::new(tokens);

        p.advance();
        assert_eq!(p.peek().kind, TokenKind::Eof);
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut p = Parser::new(lex(""));

        assert_eq!(p.advance().kind, TokenKind::Eof);
        assert_eq!(p.advance().kind, TokenKind::Eof);
        assert_eq!(p.mark(), 0);
    }

    #[test]
    fn test_furthest_failure_wins() {
        let mut p = Parser::new(lex("a b c"));
        let near = ParseError::unexpected("':'", p.peek().clone());
        p.fail(near);

        p.advance();
        p.advance();
        let far = ParseError::unexpected("'{'", p.peek().clone());
        p.fail(far.clone());

        p.reset(0);
        let again = ParseError::unexpected("'('", p.peek().clone());
        p.fail(again);

        assert_eq!(p.take_furthest(), Some(far));
        assert_eq!(p.take_furthest(), None);
    }

    #[test]
    fn test_lex_error_kept_at_same_position() {
        let mut p = Parser::new(lex("%"));
        let lexical = ParseError::unexpected("identifier", p.peek().clone());
        p.fail(lexical.clone());
        let later = ParseError::new(
            ParseErrorKind::UnexpectedToken { expected: "a definition".to_string() },
            p.peek().clone(),
        );
        p.fail(later);

        assert_eq!(p.take_furthest(), Some(lexical));
    }

    #[test]
    fn test_inner_eof_is_not_the_end() {
        let mut p = Parser::new(lex("a").into_iter().chain(lex("b")));

        p.advance();
        assert_eq!(p.peek().kind, TokenKind::Eof);
        assert!(!p.at_end());
    }

    #[test]
    fn test_parse_str_empty_document() {
        let doc = parse_str("  \n ").unwrap();

        assert!(doc.definitions.is_empty());
    }
}
