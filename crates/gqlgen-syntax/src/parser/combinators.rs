//! Parsing primitives the grammar is assembled from.
//!
//! Every rule either succeeds and leaves the cursor after what it matched, or
//! fails and leaves the cursor exactly where it found it. That is what lets
//! `maybe`, `repeat` and `choice` try a rule without committing to it.

use super::Parser;
use crate::ast::TokenNode;
use crate::error::{Loc, ParseError, ParseErrorKind};
use crate::lexer::TokenKind;

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Matches one token of `kind`.
pub(crate) fn token(kind: TokenKind) -> impl Fn(&mut Parser) -> ParseResult<TokenNode> {
    move |p: &mut Parser| {
        if p.peek().kind == kind {
            return Ok(TokenNode::from(p.advance()));
        }
        let err = ParseError::unexpected(kind.expected_name(), p.peek().clone());
        Err(p.fail(err))
    }
}

/// Matches a text token spelling `word`.
pub(crate) fn keyword(word: &'static str) -> impl Fn(&mut Parser) -> ParseResult<TokenNode> {
    move |p: &mut Parser| {
        let current = p.peek();
        if current.kind == TokenKind::Text && current.value == word {
            return Ok(TokenNode::from(p.advance()));
        }
        let err = ParseError::unexpected(format!("keyword '{}'", word), current.clone());
        Err(p.fail(err))
    }
}

/// Matches the closing half of a bracket pair; a miss is a bracket mismatch
/// rather than an ordinary unexpected token.
pub(crate) fn closing(kind: TokenKind) -> impl Fn(&mut Parser) -> ParseResult<TokenNode> {
    move |p: &mut Parser| {
        if p.peek().kind == kind {
            return Ok(TokenNode::from(p.advance()));
        }
        let err = match p.peek().kind {
            TokenKind::Error => ParseError::unexpected(kind.expected_name(), p.peek().clone()),
            _ => ParseError::new(ParseErrorKind::MismatchedBrackets, p.peek().clone()),
        };
        Err(p.fail(err))
    }
}

/// Fails with a bracket mismatch if the current token is a closing `kind`
/// nobody opened. Consumes nothing.
pub(crate) fn unopened(kind: TokenKind) -> impl Fn(&mut Parser) -> ParseResult<()> {
    move |p: &mut Parser| {
        if p.peek().kind != kind {
            return Ok(());
        }
        let err = ParseError::new(ParseErrorKind::MismatchedBrackets, p.peek().clone());
        Err(p.fail(err))
    }
}

/// Succeeds only on the EOF token that closes the stream. Anything else means the definitions
/// stopped matching early; the furthest failure seen so far is attached as
/// the cause.
pub(crate) fn end_of_input() -> impl Fn(&mut Parser) -> ParseResult<TokenNode> {
    move |p: &mut Parser| {
        if p.peek().kind == TokenKind::Eof && p.at_end() {
            return Ok(TokenNode::from(p.advance()));
        }
        let cause = p.take_furthest().map(Box::new);
        Err(ParseError::new(
            ParseErrorKind::Premature { cause },
            p.peek().clone(),
        ))
    }
}

/// Never fails: `None` when `part` does not match.
pub(crate) fn maybe<T, P>(part: P) -> impl Fn(&mut Parser) -> ParseResult<Option<T>>
where
    P: Fn(&mut Parser) -> ParseResult<T>,
{
    move |p: &mut Parser| Ok(part(p).ok())
}

/// Zero or more `part`s.
pub(crate) fn repeat<T, P>(part: P) -> impl Fn(&mut Parser) -> ParseResult<Vec<T>>
where
    P: Fn(&mut Parser) -> ParseResult<T>,
{
    move |p: &mut Parser| {
        let mut items = Vec::new();
        loop {
            let before = p.mark();
            match part(p) {
                Ok(item) => {
                    items.push(item);
                    // a match that consumed nothing would match forever
                    if p.mark() == before {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        Ok(items)
    }
}

/// Zero or more `part`s separated by `separator`. Once a separator has been
/// consumed the next `part` is required; if it is missing the whole
/// repetition fails.
pub(crate) fn repeat_separated<T, S, P, Q>(
    part: P,
    separator: Q,
) -> impl Fn(&mut Parser) -> ParseResult<Vec<T>>
where
    P: Fn(&mut Parser) -> ParseResult<T>,
    Q: Fn(&mut Parser) -> ParseResult<S>,
{
    move |p: &mut Parser| {
        let start = p.mark();
        let mut items = Vec::new();

        match part(p) {
            Ok(item) => items.push(item),
            Err(_) => return Ok(items),
        }

        while separator(p).is_ok() {
            match part(p) {
                Ok(item) => items.push(item),
                Err(err) => {
                    p.reset(start);
                    return Err(err);
                }
            }
        }

        Ok(items)
    }
}

/// A fixed run of rules applied in order. Implemented for tuples of rules.
pub(crate) trait Sequence<O> {
    fn parse_all(&self, p: &mut Parser) -> ParseResult<O>;
}

macro_rules! impl_sequence {
    ($($var:ident: $part:ident => $out:ident),+) => {
        impl<$($part, $out),+> Sequence<($($out,)+)> for ($($part,)+)
        where
            $($part: Fn(&mut Parser) -> ParseResult<$out>,)+
        {
            fn parse_all(&self, p: &mut Parser) -> ParseResult<($($out,)+)> {
                let ($($var,)+) = self;
                Ok(($($var(p)?,)+))
            }
        }
    };
}

impl_sequence!(a: A => RA);
impl_sequence!(a: A => RA, b: B => RB);
impl_sequence!(a: A => RA, b: B => RB, c: C => RC);
impl_sequence!(a: A => RA, b: B => RB, c: C => RC, d: D => RD);
impl_sequence!(a: A => RA, b: B => RB, c: C => RC, d: D => RD, e: E => RE);
impl_sequence!(a: A => RA, b: B => RB, c: C => RC, d: D => RD, e: E => RE, f: F => RF);

/// Applies every rule in `parts`, then folds their results with `transform`,
/// which also receives the location of the first token. All or nothing: on
/// any failure the cursor goes back to where the sequence started.
pub(crate) fn sequence<O, R, S, F>(transform: F, parts: S) -> impl Fn(&mut Parser) -> ParseResult<R>
where
    S: Sequence<O>,
    F: Fn(Loc, O) -> ParseResult<R>,
{
    move |p: &mut Parser| {
        let start = p.mark();
        let loc = p.loc();

        let result = match parts.parse_all(p) {
            Ok(out) => transform(loc, out).map_err(|err| p.fail(err)),
            Err(err) => Err(err),
        };

        if result.is_err() {
            p.reset(start);
        }
        result
    }
}

/// Ordered alternatives. Implemented for tuples of rules.
pub(crate) trait Alternatives<T> {
    fn first_match(&self, p: &mut Parser) -> Option<T>;
}

macro_rules! impl_alternatives {
    ($($var:ident: $part:ident),+) => {
        impl<T, $($part),+> Alternatives<T> for ($($part,)+)
        where
            $($part: Fn(&mut Parser) -> ParseResult<T>,)+
        {
            fn first_match(&self, p: &mut Parser) -> Option<T> {
                let ($($var,)+) = self;
                $(
                    if let Ok(value) = $var(p) {
                        return Some(value);
                    }
                )+
                None
            }
        }
    };
}

impl_alternatives!(a: A, b: B);
impl_alternatives!(a: A, b: B, c: C);
impl_alternatives!(a: A, b: B, c: C, d: D);

/// First alternative that matches wins; there is no longest-match search.
/// Fails, naming `expected`, only when every alternative fails.
pub(crate) fn choice<T, A>(expected: &'static str, alternatives: A) -> impl Fn(&mut Parser) -> ParseResult<T>
where
    A: Alternatives<T>,
{
    move |p: &mut Parser| match alternatives.first_match(p) {
        Some(value) => Ok(value),
        None => {
            let err = ParseError::unexpected(expected, p.peek().clone());
            Err(p.fail(err))
        }
    }
}
