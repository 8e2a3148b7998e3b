//! Parser error types.
//!
//!     Two of these face users: a scan dead end surfaces as `Lex`, an
//!     unexpected token as `Syntax`. `Fault` is different in kind — it means
//!     the grammar tables and the precedence contract disagree (a
//!     precedence-only kind completed a reduction, a semantic action found
//!     the wrong shape on the value stack). That is a defect in this crate,
//!     not in the input, and it is reported as such rather than dressed up
//!     as a syntax error.

use std::fmt;

use crate::fluorite::lexing::LexError;
use crate::fluorite::token::TokenKind;

/// The next token fits no ACTION entry for the current parser state.
///
/// Fail-fast: the parse stops at the first error, with no recovery and no
/// attempt to collect further errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset of the offending token; one past the last token when the
    /// stream ended early.
    pub offset: usize,
    /// What was found; `TokenKind::Eof` for end of stream.
    pub found: TokenKind,
    /// Terminal kinds the current state could have consumed.
    pub expected: Vec<TokenKind>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.found == TokenKind::Eof {
            write!(f, "unexpected end of input at byte {}", self.offset)?;
        } else {
            write!(f, "unexpected {} at byte {}", self.found, self.offset)?;
        }
        if !self.expected.is_empty() {
            let names: Vec<&str> = self.expected.iter().map(|kind| kind.name()).collect();
            write!(f, " (expected one of: {})", names.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}

/// Any way a parse can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The scanner found no rule for the remaining input.
    Lex(LexError),
    /// The token stream does not match the grammar.
    Syntax(SyntaxError),
    /// Internal contradiction between the tables and the grammar contract.
    Fault(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => write!(f, "{}", err),
            ParseError::Syntax(err) => write!(f, "{}", err),
            ParseError::Fault(detail) => write!(f, "parser defect: {}", detail),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> ParseError {
        ParseError::Lex(err)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> ParseError {
        ParseError::Syntax(err)
    }
}
