use crate::error::Loc;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

static PUNCTUATION: Lazy<HashMap<char, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::with_capacity(10);
    m.insert('{', TokenKind::LeftCurly);
    m.insert('}', TokenKind::RightCurly);
    m.insert(':', TokenKind::Colon);
    m.insert('(', TokenKind::LeftParen);
    m.insert(')', TokenKind::RightParen);
    m.insert(',', TokenKind::Comma);
    m.insert('!', TokenKind::Bang);
    m.insert('@', TokenKind::At);
    m.insert('[', TokenKind::LeftBracket);
    m.insert(']', TokenKind::RightBracket);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    LeftCurly,
    RightCurly,
    Colon,
    LeftParen,
    RightParen,
    Comma,
    Bang,
    At,
    LeftBracket,
    RightBracket,
    Whitespace,
    Error,
    Eof,
}

impl TokenKind {
    /// The source character of a punctuation kind.
    pub fn symbol(&self) -> Option<char> {
        match self {
            TokenKind::LeftCurly => Some('{'),
            TokenKind::RightCurly => Some('}'),
            TokenKind::Colon => Some(':'),
            TokenKind::LeftParen => Some('('),
            TokenKind::RightParen => Some(')'),
            TokenKind::Comma => Some(','),
            TokenKind::Bang => Some('!'),
            TokenKind::At => Some('@'),
            TokenKind::LeftBracket => Some('['),
            TokenKind::RightBracket => Some(']'),
            TokenKind::Text | TokenKind::Whitespace | TokenKind::Error | TokenKind::Eof => None,
        }
    }

    /// How the parser names this kind when it expected it and got something else.
    pub fn expected_name(&self) -> String {
        match self.symbol() {
            Some(ch) => format!("'{}'", ch),
            None => match self {
                TokenKind::Text => "identifier".to_string(),
                TokenKind::Eof => "end of file".to_string(),
                other => other.to_string(),
            },
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Text => write!(f, "text"),
            TokenKind::LeftCurly => write!(f, "left curly"),
            TokenKind::RightCurly => write!(f, "right curly"),
            TokenKind::Colon => write!(f, "colon"),
            TokenKind::LeftParen => write!(f, "left paren"),
            TokenKind::RightParen => write!(f, "right paren"),
            TokenKind::Comma => write!(f, "comma"),
            TokenKind::Bang => write!(f, "bang"),
            TokenKind::At => write!(f, "at"),
            TokenKind::LeftBracket => write!(f, "left bracket"),
            TokenKind::RightBracket => write!(f, "right bracket"),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Error => write!(f, "error"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A lexical token. `value` is the literal text for [`TokenKind::Text`], the
/// run length for [`TokenKind::Whitespace`], a diagnostic for
/// [`TokenKind::Error`] and empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Loc,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, loc: Loc, value: impl Into<String>) -> Self {
        Self { kind, loc, value: value.into() }
    }

    pub fn display_name(&self) -> String {
        match self.kind {
            TokenKind::Text => format!("'{}'", self.value),
            TokenKind::Whitespace => "whitespace".to_string(),
            TokenKind::Error => format!("invalid input ({})", self.value),
            TokenKind::Eof => "end of file".to_string(),
            kind => kind.expected_name(),
        }
    }

    /// Number of source characters the token covers.
    pub fn width(&self) -> usize {
        match self.kind {
            TokenKind::Text => self.value.chars().count().max(1),
            TokenKind::Whitespace => self.value.parse().unwrap_or(1),
            _ => 1,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.value.is_empty() {
            write!(f, "{} token @({})", self.kind, self.loc)
        } else {
            write!(f, "{} token = {} @({})", self.kind, self.value, self.loc)
        }
    }
}

/// Streaming tokenizer. Yields every token of the document in order,
/// whitespace runs included, and finishes with exactly one EOF token.
///
/// Invalid characters never stop the stream; they come out as
/// [`TokenKind::Error`] tokens and lexing continues after them.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(document: &'a str) -> Self {
        Self {
            chars: document.chars().peekable(),
            line: 0,
            column: 0,
            done: false,
        }
    }

    fn loc(&self) -> Loc {
        Loc::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn take_while(&mut self, cond: impl Fn(char) -> bool) -> String {
        let mut run = String::with_capacity(16);
        while let Some(&ch) = self.chars.peek() {
            if !cond(ch) {
                break;
            }
            run.push(ch);
            self.bump();
        }
        run
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        let start = self.loc();

        let Some(&ch) = self.chars.peek() else {
            self.done = true;
            return Some(Token::new(TokenKind::Eof, start, ""));
        };

        if let Some(&kind) = PUNCTUATION.get(&ch) {
            self.bump();
            return Some(Token::new(kind, start, ""));
        }

        let token = match ch {
            _ if ch.is_whitespace() => {
                let run = self.take_while(char::is_whitespace);
                Token::new(TokenKind::Whitespace, start, run.chars().count().to_string())
            }
            _ if is_identifier_char(ch) => {
                let text = self.take_while(is_identifier_char);
                Token::new(TokenKind::Text, start, text)
            }
            _ => {
                self.bump();
                tracing::trace!(line = start.line, column = start.column, "unknown character {:?}", ch);
                Token::new(TokenKind::Error, start, format!("unknown character '{}'", ch))
            }
        };

        Some(token)
    }
}

/// Tokenizes a whole document eagerly.
pub fn lex(document: &str) -> Vec<Token> {
    Lexer::new(document).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(
            kinds("{ } : ( ) , ! @ [ ]"),
            vec![
                TokenKind::LeftCurly,
                TokenKind::RightCurly,
                TokenKind::Colon,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Bang,
                TokenKind::At,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_text_keeps_keywords_as_text() {
        let tokens = lex("type input schema my_Name");

        assert_eq!(tokens[0], Token::new(TokenKind::Text, Loc::new(0, 0), "type"));
        assert_eq!(tokens[2].value, "input");
        assert_eq!(tokens[4].value, "schema");
        assert_eq!(tokens[6].value, "my_Name");
        assert!(tokens.iter().all(|t| matches!(
            t.kind,
            TokenKind::Text | TokenKind::Whitespace | TokenKind::Eof
        )));
    }

    #[test]
    fn test_whitespace_run_carries_length() {
        let tokens = lex("a \t\n  b");

        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
        assert_eq!(tokens[1].value, "5");
        assert_eq!(tokens[2].value, "b");
        assert_eq!(tokens[2].loc, Loc::new(1, 2));
    }

    #[test]
    fn test_text_stops_at_punctuation() {
        let tokens = lex("ping:String!");

        assert_eq!(tokens[0].value, "ping");
        assert_eq!(tokens[1].kind, TokenKind::Colon);
        assert_eq!(tokens[2].value, "String");
        assert_eq!(tokens[3].kind, TokenKind::Bang);
        assert_eq!(tokens[4].kind, TokenKind::Eof);
    }

    #[test]
    fn test_error_token_does_not_stop_lexing() {
        let tokens = lex("a%b");

        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].kind, TokenKind::Error);
        assert_eq!(tokens[1].value, "unknown character '%'");
        assert_eq!(tokens[2].value, "b");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_empty_input_is_only_eof() {
        let tokens = lex("");

        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, Loc::new(0, 0), "")]);
    }

    #[test]
    fn test_eof_located_after_last_char() {
        let tokens = lex("type\nQuery");
        let eof = tokens.last().unwrap();

        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.loc, Loc::new(1, 5));
    }

    #[test]
    fn test_lexer_stops_after_eof() {
        let mut lexer = Lexer::new("x");

        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Text));
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Text, Loc::new(0, 5), "Query");
        assert_eq!(token.to_string(), "text token = Query @(1,6)");

        let token = Token::new(TokenKind::LeftCurly, Loc::new(1, 0), "");
        assert_eq!(token.to_string(), "left curly token @(2,1)");
    }
}
