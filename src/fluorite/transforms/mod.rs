//! Transform pipeline infrastructure.
//!
//!     A small composable transformation system: any stage implementing
//!     `Runnable<I, O>` can be chained onto a `Transform` whose output type
//!     matches its input type, and the compiler checks every seam. The
//!     pre-built pipelines in [standard] are `once_cell` statics, so the
//!     common paths cost nothing to assemble at use sites.
//!
//!     The parsing path proper is pull-based (iterators all the way down);
//!     the buffered stages in [stages] exist so tests and tooling can look
//!     at a whole token stream at once.

pub mod stages;
pub mod standard;

use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Generic error with message
    Error(String),
    /// Stage failed with specific error
    StageFailed { stage: String, message: String },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Error(msg) => write!(f, "{}", msg),
            TransformError::StageFailed { stage, message } => {
                write!(f, "Stage '{}' failed: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

/// Trait for anything that can transform an input to an output.
///
/// Implemented by individual transformation stages; the `Transform` struct
/// composes multiple `Runnable` implementations.
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain this transform's output into the next stage's input.
    ///
    /// The compiler ensures the stage's input type matches this
    /// transform's output type.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DoubleNumber;
    impl Runnable<i32, i32> for DoubleNumber {
        fn run(&self, input: i32) -> Result<i32, TransformError> {
            Ok(input * 2)
        }
    }

    struct IntToString;
    impl Runnable<i32, String> for IntToString {
        fn run(&self, input: i32) -> Result<String, TransformError> {
            Ok(input.to_string())
        }
    }

    struct FailingStage;
    impl Runnable<i32, i32> for FailingStage {
        fn run(&self, _input: i32) -> Result<i32, TransformError> {
            Err(TransformError::Error("intentional failure".to_string()))
        }
    }

    #[test]
    fn test_transform_from_fn() {
        let transform = Transform::from_fn(|x: i32| Ok(x * 2));
        assert_eq!(transform.run(5).unwrap(), 10);
    }

    #[test]
    fn test_type_changing_stage() {
        let transform = Transform::from_fn(|x: i32| Ok(x))
            .then(DoubleNumber)
            .then(IntToString);

        assert_eq!(transform.run(5).unwrap(), "10");
    }

    #[test]
    fn test_error_propagation() {
        let transform = Transform::from_fn(|x: i32| Ok(x))
            .then(DoubleNumber)
            .then(FailingStage)
            .then(DoubleNumber);

        let result = transform.run(5);
        assert_eq!(
            result.unwrap_err(),
            TransformError::Error("intentional failure".to_string())
        );
    }

    #[test]
    fn test_error_display() {
        let stage_err = TransformError::StageFailed {
            stage: "tokenization".to_string(),
            message: "invalid token".to_string(),
        };
        assert_eq!(
            format!("{}", stage_err),
            "Stage 'tokenization' failed: invalid token"
        );
    }
}
