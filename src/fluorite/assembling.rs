//! Top-level assembly.
//!
//!     The last reduction of a parse hands its statement list to `assemble`,
//!     which builds the compilation unit. Top-level sources are
//!     "declare-then-run" scripts: every function definition is hoisted
//!     ahead of all other statements, and a zero-argument call to it is
//!     inserted where the definition stood, so execution order follows the
//!     source while definitions are in scope from the start.
//!
//!     The grammar has no function-definition production yet (the reserved
//!     words were claimed, their rules never landed), so parsed units pass
//!     through unchanged today; programmatically built statement lists get
//!     the full treatment.

use crate::fluorite::ast::{CompilationUnit, Expr};

/// Assemble top-level statements into a compilation unit, hoisting
/// function definitions ahead of the code that runs.
pub fn assemble(stmts: Vec<Expr>) -> CompilationUnit {
    let mut prologue: Vec<Expr> = Vec::new();
    let mut code: Vec<Expr> = Vec::new();

    for stmt in stmts {
        match stmt {
            Expr::FnDef { name, params, body } => {
                let invocation = Expr::Call {
                    callee: Box::new(Expr::Symbol(name.clone())),
                    args: Vec::new(),
                    kwargs: Vec::new(),
                };
                prologue.push(Expr::FnDef { name, params, body });
                code.push(invocation);
            }
            other => code.push(other),
        }
    }

    prologue.extend(code);
    CompilationUnit::new(prologue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn int(n: i64) -> Expr {
        Expr::Integer(BigInt::from(n))
    }

    fn def(name: &str) -> Expr {
        Expr::FnDef {
            name: name.to_string(),
            params: Vec::new(),
            body: vec![int(0)],
        }
    }

    fn call(name: &str) -> Expr {
        Expr::Call {
            callee: Box::new(Expr::Symbol(name.to_string())),
            args: Vec::new(),
            kwargs: Vec::new(),
        }
    }

    #[test]
    fn plain_statements_pass_through_in_order() {
        let unit = assemble(vec![int(1), int(2)]);
        assert_eq!(unit.stmts(), &[int(1), int(2)]);
    }

    #[test]
    fn definitions_hoist_and_leave_an_invocation_behind() {
        let unit = assemble(vec![int(1), def("setup"), int(2)]);
        assert_eq!(
            unit.stmts(),
            &[def("setup"), int(1), call("setup"), int(2)]
        );
    }

    #[test]
    fn multiple_definitions_keep_their_relative_order() {
        let unit = assemble(vec![def("a"), def("b"), int(9)]);
        assert_eq!(
            unit.stmts(),
            &[def("a"), def("b"), call("a"), call("b"), int(9)]
        );
    }
}
