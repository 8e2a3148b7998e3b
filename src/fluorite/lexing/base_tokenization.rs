//! Base tokenization for the fluorite scanner.
//!
//!     This is the entry point where source strings become token streams.
//!     The raw rule table is the logos enum below; everything else in the
//!     pipeline operates on the [`Token`] values produced here.

use logos::Logos;

use crate::fluorite::token::{Token, TokenKind};

/// Raised when no lexical rule matches the remaining input.
///
/// Unrecoverable for the parse at hand: the caller must treat the whole
/// source unit as unparseable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Byte offset of the first character no rule could match.
    pub offset: usize,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no lexical rule matches input at byte {}", self.offset)
    }
}

impl std::error::Error for LexError {}

/// The ordered lexical rule table.
///
/// Reserved words are declared above the identifier rule so that an
/// equal-length match resolves in their favor; longer matches always win, so
/// `done` still scans as one identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[regex(r"[0-9]+")]
    Num,

    #[token("do")]
    Do,
    #[token("end")]
    End,

    #[regex(r"[a-z][a-zA-Z0-9_]*:")]
    Label,
    #[regex(r"[a-z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r"(:[a-z]|[A-Z])[a-zA-Z0-9_]*")]
    Atom,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("=")]
    Equal,

    // A newline plus whatever blank lines and indentation follow it is one
    // statement separator.
    #[regex(r"\n[ \t\r\n]*")]
    Newline,
    #[token(";")]
    Semicolon,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> TokenKind {
        match raw {
            RawToken::Num => TokenKind::Num,
            RawToken::Do => TokenKind::Do,
            RawToken::End => TokenKind::End,
            RawToken::Label => TokenKind::Label,
            RawToken::Ident => TokenKind::Ident,
            RawToken::Atom => TokenKind::Atom,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Equal => TokenKind::Equal,
            RawToken::Newline => TokenKind::Newline,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
        }
    }
}

/// Lazy token stream over one source unit.
///
/// Finite, and not restartable: call [`scan`] again to re-tokenize.
pub struct Scanner<'src> {
    lexer: logos::Lexer<'src, RawToken>,
    source_len: usize,
    seen_content: bool,
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lexer.next()?;
            let span = self.lexer.span();
            match raw {
                Err(()) => return Some(Err(LexError { offset: span.start })),
                Ok(RawToken::Newline) => {
                    // Newline runs before the first token or at the very end
                    // of the source are leading/trailing whitespace.
                    if !self.seen_content || span.end == self.source_len {
                        continue;
                    }
                    return Some(Ok(Token::new(TokenKind::Newline, self.lexer.slice(), span)));
                }
                Ok(raw) => {
                    self.seen_content = true;
                    return Some(Ok(Token::new(raw.into(), self.lexer.slice(), span)));
                }
            }
        }
    }
}

/// Tokenize one source unit.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner {
        lexer: RawToken::lexer(source),
        source_len: source.len(),
        seen_content: false,
    }
}
