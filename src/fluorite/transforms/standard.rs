//! Standard transform definitions.
//!
//!     Pre-built transforms for common use cases, defined as static
//!     references using `once_cell::sync::Lazy`.

use once_cell::sync::Lazy;

use crate::fluorite::ast::CompilationUnit;
use crate::fluorite::parsing::parse_source;
use crate::fluorite::token::Token;
use crate::fluorite::transforms::stages::{InsertApplyMarkers, Tokenize};
use crate::fluorite::transforms::{Transform, TransformError};

/// Type alias for a buffered token stream.
pub type TokenStream = Vec<Token>;

/// Raw tokenization: String → token stream, no apply markers yet.
pub static TOKENIZE: Lazy<Transform<String, TokenStream>> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenize::new()));

/// Full lexical pipeline: String → token stream with apply markers and
/// canonical line breaks — the stream the parser consumes.
pub static NORMALIZE: Lazy<Transform<String, TokenStream>> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenize::new()).then(InsertApplyMarkers::new()));

/// Complete pipeline: String → compilation unit.
///
/// Unlike the buffered stages above, this wires the lazy iterator path, so
/// the token stream is never materialized.
pub static STRING_TO_UNIT: Lazy<Transform<String, CompilationUnit>> = Lazy::new(|| {
    Transform::from_fn(|source: String| {
        parse_source(&source).map_err(|err| TransformError::StageFailed {
            stage: "Parser".to_string(),
            message: err.to_string(),
        })
    })
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fluorite::token::TokenKind;

    #[test]
    fn tokenize_produces_raw_tokens() {
        let tokens = TOKENIZE.run("f(x)".to_string()).unwrap();
        assert!(tokens.iter().all(|tok| tok.kind != TokenKind::Apply));
    }

    #[test]
    fn normalize_inserts_apply_markers() {
        let tokens = NORMALIZE.run("f(x)".to_string()).unwrap();
        assert!(tokens.iter().any(|tok| tok.kind == TokenKind::Apply));
    }

    #[test]
    fn string_to_unit_parses() {
        let unit = STRING_TO_UNIT.run("x = 3".to_string()).unwrap();
        assert_eq!(unit.stmts().len(), 1);
    }

    #[test]
    fn transforms_are_reusable() {
        let first = NORMALIZE.run("a".to_string()).unwrap();
        let second = NORMALIZE.run("b".to_string()).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn stage_failures_name_their_stage() {
        let err = STRING_TO_UNIT.run("do a = 3".to_string()).unwrap_err();
        match err {
            TransformError::StageFailed { stage, .. } => assert_eq!(stage, "Parser"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
