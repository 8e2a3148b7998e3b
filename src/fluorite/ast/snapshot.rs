//! Structural dump of a parsed tree.
//!
//!     The snapshot is a read-only `serde_json::Value` projection of the
//!     tree, useful for golden tests and tooling that wants to diff node
//!     structure without walking it.

use serde_json::Value;

use super::{CompilationUnit, Expr};

impl CompilationUnit {
    pub fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Expr {
    pub fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
