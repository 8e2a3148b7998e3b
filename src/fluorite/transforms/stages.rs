//! Individual transformation stages.
//!
//!     Buffered counterparts of the iterator pipeline, for use where a
//!     whole token stream is wanted at once (debugging, token-level
//!     assertions). The parse stage runs the real pull-based driver.

use crate::fluorite::ast::CompilationUnit;
use crate::fluorite::lexing::scan;
use crate::fluorite::lexing::transformations::ApplyMarkers;
use crate::fluorite::parsing::Parser;
use crate::fluorite::token::Token;
use crate::fluorite::transforms::{Runnable, TransformError};

/// String → token stream, buffered.
pub struct Tokenize;

impl Tokenize {
    pub fn new() -> Tokenize {
        Tokenize
    }
}

impl Default for Tokenize {
    fn default() -> Self {
        Tokenize::new()
    }
}

impl Runnable<String, Vec<Token>> for Tokenize {
    fn run(&self, input: String) -> Result<Vec<Token>, TransformError> {
        scan(&input)
            .collect::<Result<Vec<Token>, _>>()
            .map_err(|err| TransformError::StageFailed {
                stage: "Scanner".to_string(),
                message: err.to_string(),
            })
    }
}

/// Raw token stream → stream with apply markers, buffered.
pub struct InsertApplyMarkers;

impl InsertApplyMarkers {
    pub fn new() -> InsertApplyMarkers {
        InsertApplyMarkers
    }
}

impl Default for InsertApplyMarkers {
    fn default() -> Self {
        InsertApplyMarkers::new()
    }
}

impl Runnable<Vec<Token>, Vec<Token>> for InsertApplyMarkers {
    fn run(&self, input: Vec<Token>) -> Result<Vec<Token>, TransformError> {
        ApplyMarkers::new(input.into_iter().map(Ok))
            .collect::<Result<Vec<Token>, _>>()
            .map_err(|err| TransformError::StageFailed {
                stage: "ApplyMarkers".to_string(),
                message: err.to_string(),
            })
    }
}

/// Final token stream → compilation unit.
pub struct Parse;

impl Parse {
    pub fn new() -> Parse {
        Parse
    }
}

impl Default for Parse {
    fn default() -> Self {
        Parse::new()
    }
}

impl Runnable<Vec<Token>, CompilationUnit> for Parse {
    fn run(&self, input: Vec<Token>) -> Result<CompilationUnit, TransformError> {
        Parser::new()
            .parse(input.into_iter().map(Ok))
            .map_err(|err| TransformError::StageFailed {
                stage: "Parser".to_string(),
                message: err.to_string(),
            })
    }
}
