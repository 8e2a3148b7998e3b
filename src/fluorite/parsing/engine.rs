//! The shift/reduce driver.
//!
//!     `Parser` walks the shared ACTION/GOTO tables with two per-parse
//!     stacks: states and semantic values. It pulls the token stream
//!     exactly once, one token ahead of the stack, and runs one semantic
//!     action per reduction. The first token with no table entry aborts
//!     the parse; there is no recovery and no partial tree.
//!
//!     The tables are built once and shared, so parsers are cheap to
//!     create and independent parses can run concurrently on separate
//!     threads.

use crate::fluorite::ast::CompilationUnit;
use crate::fluorite::lexing::LexError;
use crate::fluorite::parsing::actions::SemValue;
use crate::fluorite::parsing::common::{ParseError, SyntaxError};
use crate::fluorite::parsing::grammar::PRODUCTIONS;
use crate::fluorite::parsing::tables::{Action, ParseTables};
use crate::fluorite::token::{Token, TokenKind};

/// A parser over the shared grammar tables.
pub struct Parser {
    tables: &'static ParseTables,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            tables: ParseTables::shared(),
        }
    }

    /// Parse one token stream into a compilation unit.
    ///
    /// The stream is consumed exactly once. Scan errors surface as
    /// [`ParseError::Lex`] the moment the driver reaches them.
    pub fn parse<I>(&self, tokens: I) -> Result<CompilationUnit, ParseError>
    where
        I: IntoIterator<Item = Result<Token, LexError>>,
    {
        let mut stream = tokens.into_iter();
        let mut state_stack: Vec<usize> = vec![0];
        let mut value_stack: Vec<SemValue> = Vec::new();
        let mut stream_end = 0usize;
        let mut lookahead = pull(&mut stream, &mut stream_end)?;

        loop {
            let state = *state_stack
                .last()
                .ok_or_else(|| ParseError::Fault("state stack underflow".to_string()))?;
            let kind = lookahead
                .as_ref()
                .map(|tok| tok.kind)
                .unwrap_or(TokenKind::Eof);

            match self.tables.action(state, kind) {
                Action::Shift(next) => {
                    let tok = lookahead
                        .take()
                        .ok_or_else(|| ParseError::Fault("shift past end of input".to_string()))?;
                    state_stack.push(next);
                    value_stack.push(SemValue::Token(tok));
                    lookahead = pull(&mut stream, &mut stream_end)?;
                }
                Action::Reduce(prod) => {
                    let production = PRODUCTIONS
                        .get(prod)
                        .ok_or_else(|| ParseError::Fault(format!("no production {}", prod)))?;
                    let arity = production.rhs.len();
                    if state_stack.len() <= arity || value_stack.len() < arity {
                        return Err(ParseError::Fault(
                            "reduction deeper than the parse stack".to_string(),
                        ));
                    }
                    let popped = value_stack.split_off(value_stack.len() - arity);
                    state_stack.truncate(state_stack.len() - arity);
                    let value = (production.action)(popped)?;
                    let top = *state_stack
                        .last()
                        .ok_or_else(|| ParseError::Fault("state stack underflow".to_string()))?;
                    let next = self.tables.goto(top, production.lhs).ok_or_else(|| {
                        ParseError::Fault(format!("missing goto for {:?}", production.lhs))
                    })?;
                    state_stack.push(next);
                    value_stack.push(value);
                }
                Action::Accept => {
                    return match value_stack.pop() {
                        Some(SemValue::Unit(unit)) => Ok(unit),
                        other => Err(ParseError::Fault(format!(
                            "accepted with {:?} on the value stack",
                            other
                        ))),
                    };
                }
                Action::Error => {
                    let (offset, found) = match &lookahead {
                        Some(tok) => (tok.span.start, tok.kind),
                        None => (stream_end, TokenKind::Eof),
                    };
                    return Err(ParseError::Syntax(SyntaxError {
                        offset,
                        found,
                        expected: self.tables.expected(state),
                    }));
                }
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}

fn pull(
    stream: &mut impl Iterator<Item = Result<Token, LexError>>,
    stream_end: &mut usize,
) -> Result<Option<Token>, ParseError> {
    match stream.next() {
        None => Ok(None),
        Some(Err(err)) => Err(ParseError::Lex(err)),
        Some(Ok(tok)) => {
            *stream_end = tok.span.end;
            Ok(Some(tok))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluorite::ast::Expr;
    use crate::fluorite::lexing::scan;
    use crate::fluorite::lexing::transformations::ApplyMarkers;

    fn parse(source: &str) -> Result<CompilationUnit, ParseError> {
        Parser::new().parse(ApplyMarkers::new(scan(source)))
    }

    #[test]
    fn parses_a_bare_literal() {
        let unit = parse("42").unwrap();
        assert_eq!(unit.stmts().len(), 1);
        assert!(matches!(unit.stmts()[0], Expr::Integer(_)));
    }

    #[test]
    fn empty_input_is_a_syntax_error_at_offset_zero() {
        match parse("") {
            Err(ParseError::Syntax(err)) => {
                assert_eq!(err.offset, 0);
                assert_eq!(err.found, TokenKind::Eof);
                assert!(!err.expected.is_empty());
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn scan_errors_surface_as_lex_errors() {
        match parse("a = %") {
            Err(ParseError::Lex(err)) => assert_eq!(err.offset, 4),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn the_parser_is_reusable_across_parses() {
        let parser = Parser::new();
        let first = parser
            .parse(ApplyMarkers::new(scan("1 + 2")))
            .unwrap();
        let second = parser
            .parse(ApplyMarkers::new(scan("1 + 2")))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parses_run_concurrently_over_the_shared_tables() {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                std::thread::spawn(move || {
                    let source = format!("x = {}", n);
                    Parser::new()
                        .parse(ApplyMarkers::new(scan(&source)))
                        .map(|unit| unit.stmts().len())
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 1);
        }
    }
}
