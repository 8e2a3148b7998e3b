//! Apply-marker insertion and line-break canonicalization.
//!
//!     Fluorite resolves function application from token adjacency: `f(x)`
//!     is a call because nothing separates the identifier from the
//!     parenthesis, and `print a` is a call because two terms sit next to
//!     each other with no operator between them. This pass makes that
//!     explicit by inserting a synthetic apply-marker token after the
//!     identifier in both situations, so the grammar itself never inspects
//!     source offsets.
//!
//!     The pass consumes exactly one token of lookahead and emits zero, one,
//!     or two tokens per input token, preserving relative order. For each
//!     token `t` with lookahead `u`, the first matching rule applies:
//!
//!         1. `u` is end of stream: emit `t` unchanged.
//!         2. `t` is an identifier, `u` is `(`, and they are adjacent (the
//!            identifier ends exactly where the parenthesis starts): emit
//!            `t` then an apply marker.
//!         3. `t` is an identifier and `u` is an identifier, atom, label,
//!            number, `{`, or `[`: emit `t` then an apply marker. Sign
//!            tokens are deliberately not in this set — `a -1` must stay a
//!            subtraction, not become a call.
//!         4. `t` is a line break: if `u` is also a line break, emit
//!            nothing (separator runs collapse to one; a comment alone on
//!            its line leaves two line breaks back to back); otherwise emit
//!            one canonical empty line-break token in its place.
//!         5. Otherwise: emit `t` unchanged.
//!
//!     Scan errors pass through unchanged and end the useful stream.

use crate::fluorite::lexing::LexError;
use crate::fluorite::token::{Token, TokenKind};

/// Iterator adaptor inserting apply markers into a raw token stream.
pub struct ApplyMarkers<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    inner: I,
    lookahead: Option<Result<Token, LexError>>,
    pending_marker: Option<Token>,
    primed: bool,
}

impl<I> ApplyMarkers<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    pub fn new(inner: I) -> Self {
        ApplyMarkers {
            inner,
            lookahead: None,
            pending_marker: None,
            primed: false,
        }
    }

    /// Pop the current token, refilling the lookahead buffer.
    fn advance(&mut self) -> Option<Result<Token, LexError>> {
        if !self.primed {
            self.primed = true;
            self.lookahead = self.inner.next();
        }
        let current = self.lookahead.take();
        self.lookahead = self.inner.next();
        current
    }

    fn lookahead_token(&self) -> Option<&Token> {
        match &self.lookahead {
            Some(Ok(tok)) => Some(tok),
            _ => None,
        }
    }
}

/// Lookahead kinds that turn an adjacent identifier into a callee.
fn starts_argument(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Atom
            | TokenKind::Label
            | TokenKind::Num
            | TokenKind::LBrace
            | TokenKind::LBracket
    )
}

impl<I> Iterator for ApplyMarkers<I>
where
    I: Iterator<Item = Result<Token, LexError>>,
{
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(marker) = self.pending_marker.take() {
            return Some(Ok(marker));
        }

        loop {
            let current = match self.advance() {
                None => return None,
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok(tok)) => tok,
            };

            let ahead = self.lookahead_token();

            if self.lookahead.is_none() {
                return Some(Ok(current));
            }

            if current.kind == TokenKind::Ident {
                let adjacent_paren = ahead
                    .map(|u| u.kind == TokenKind::LParen && current.span.end == u.span.start)
                    .unwrap_or(false);
                let adjacent_term = ahead.map(|u| starts_argument(u.kind)).unwrap_or(false);
                if adjacent_paren || adjacent_term {
                    self.pending_marker =
                        Some(Token::synthetic(TokenKind::Apply, current.span.end));
                    return Some(Ok(current));
                }
            }

            if current.kind == TokenKind::Newline {
                if ahead.map(|u| u.kind == TokenKind::Newline).unwrap_or(false) {
                    continue;
                }
                return Some(Ok(Token::new(
                    TokenKind::Newline,
                    "",
                    current.span.start..current.span.start,
                )));
            }

            return Some(Ok(current));
        }
    }
}
