//! # fluorite-parser
//!
//! The front end of the Fluorite language: source text in, syntax tree out.
//!
//! Processing is staged, and each stage is usable on its own:
//!
//!     1. Scanning. A rule-table lexer turns source text into a lazy stream
//!        of tokens, dropping whitespace and comments. See
//!        [lexing](fluorite::lexing).
//!
//!     2. Apply-marker rewriting. Fluorite calls need no parentheses
//!        (`print a, b`) and calls with parentheses tolerate no space before
//!        them (`f(x)`). A rewriting pass with one token of lookahead turns
//!        that whitespace sensitivity into explicit apply-marker tokens so
//!        the grammar never has to look at source offsets. See
//!        [lexing::transformations](fluorite::lexing::transformations).
//!
//!     3. Parsing. A table-driven shift/reduce parser, with conflicts
//!        resolved by an explicit precedence table, pulls the token stream
//!        once and builds the tree through semantic actions. See
//!        [parsing](fluorite::parsing).
//!
//! The stages share one global contract: the same source text always
//! produces the same [`CompilationUnit`](fluorite::ast::CompilationUnit),
//! and a failed parse produces no partial tree.

pub mod fluorite;
