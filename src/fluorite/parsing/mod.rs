//! Parsing: grammar engine and AST builder.
//!
//!     The grammar lives in [grammar] as two static tables: productions
//!     with their semantic actions, and the precedence levels that resolve
//!     every ambiguity the grammar leaves open — whether `a b` after an
//!     expression continues a call argument list, opens a fresh statement,
//!     or binds as an operand is decided entirely by precedence, never by
//!     restructuring the grammar.
//!
//!     [tables] compiles those tables once into an LR automaton;
//!     [engine] drives it; [actions] builds the tree as reductions fire.
//!
//!     Four of the terminal kinds the precedence table names
//!     (`BinaryOp`, `NoParensApply`, `ParensApply`, `UnaryOp`) never occur
//!     in a token stream. They order reductions relative to real tokens,
//!     and guard productions make reducing through one of them a reported
//!     defect rather than silent misbehavior.

pub mod actions;
pub mod common;
pub mod engine;
pub mod grammar;
mod tables;

pub use common::{ParseError, SyntaxError};
pub use engine::Parser;

use crate::fluorite::ast::CompilationUnit;
use crate::fluorite::lexing::scan;
use crate::fluorite::lexing::transformations::ApplyMarkers;

/// Parse one source unit end to end: scan, insert apply markers, parse.
///
/// The pipeline is pull-based throughout; no stage materializes the token
/// stream.
pub fn parse_source(source: &str) -> Result<CompilationUnit, ParseError> {
    Parser::new().parse(ApplyMarkers::new(scan(source)))
}
