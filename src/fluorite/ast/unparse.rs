//! Source-like projection of a parsed tree.
//!
//!     `unparse` renders a tree back to text that scans and parses to a
//!     structurally equal tree. It is a debug view over the finished tree,
//!     not a formatter: arithmetic comes back fully parenthesized and calls
//!     come back in their parenthesized form, whatever the source looked
//!     like.

use super::{CompilationUnit, DoBlock, Expr};

impl CompilationUnit {
    /// Render the unit back to source-like text, one statement per line.
    pub fn unparse(&self) -> String {
        self.stmts()
            .iter()
            .map(Expr::unparse)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Expr {
    pub fn unparse(&self) -> String {
        match self {
            Expr::Integer(value) => value.to_string(),
            Expr::Atom { name } => name.clone(),
            Expr::Str(value) => format!("\"{}\"", value),
            Expr::Symbol(name) => name.clone(),
            Expr::QualSymbol { path, name } => format!("{}.{}", path.join("."), name),
            Expr::Tuple(items) => format!("{{{}}}", join(items)),
            Expr::List(items) => format!("[{}]", join(items)),
            Expr::Binary { left, op, right } => {
                format!("({} {} {})", left.unparse(), op.symbol(), right.unparse())
            }
            Expr::Unary { op, operand } => format!("({}{})", op.symbol(), operand.unparse()),
            Expr::Call {
                callee,
                args,
                kwargs,
            } => {
                let mut rendered: Vec<String> = args.iter().map(Expr::unparse).collect();
                for (name, value) in kwargs {
                    let label = name.strip_prefix(':').unwrap_or(name);
                    rendered.push(format!("{}: {}", label, value.unparse()));
                }
                format!("{}({})", callee.unparse(), rendered.join(", "))
            }
            Expr::Do(block) => unparse_block(block),
            Expr::Match(m) => format!("{} = {}", m.target.expr.unparse(), m.bound.expr.unparse()),
            Expr::FnDef { name, params, body } => {
                let lines: Vec<String> = body.iter().map(Expr::unparse).collect();
                format!("fn {}({}) do\n{}\nend", name, params.join(", "), lines.join("\n"))
            }
        }
    }
}

fn unparse_block(block: &DoBlock) -> String {
    let lines: Vec<String> = block.exprs().iter().map(Expr::unparse).collect();
    format!("do\n{}\nend", lines.join("\n"))
}

fn join(items: &[Expr]) -> String {
    items.iter().map(Expr::unparse).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn int(n: i64) -> Expr {
        Expr::Integer(BigInt::from(n))
    }

    #[test]
    fn renders_literals_and_collections() {
        assert_eq!(int(42).unparse(), "42");
        assert_eq!(
            Expr::Atom {
                name: ":ok".to_string()
            }
            .unparse(),
            ":ok"
        );
        assert_eq!(Expr::Tuple(vec![]).unparse(), "{}");
        assert_eq!(Expr::List(vec![int(1), int(2)]).unparse(), "[1, 2]");
    }

    #[test]
    fn renders_calls_with_keyword_arguments() {
        let call = Expr::Call {
            callee: Box::new(Expr::Symbol("f".to_string())),
            args: vec![int(1)],
            kwargs: vec![(":mode".to_string(), int(2))],
        };
        assert_eq!(call.unparse(), "f(1, mode: 2)");
    }

    #[test]
    fn renders_qualified_callees() {
        let call = Expr::Call {
            callee: Box::new(Expr::QualSymbol {
                path: vec!["Math".to_string()],
                name: "sqrt".to_string(),
            }),
            args: vec![int(2)],
            kwargs: vec![],
        };
        assert_eq!(call.unparse(), "Math.sqrt(2)");
    }

    #[test]
    fn arithmetic_comes_back_parenthesized() {
        let expr = Expr::Binary {
            left: Box::new(int(1)),
            op: super::super::BinOp::Add,
            right: Box::new(Expr::Binary {
                left: Box::new(int(2)),
                op: super::super::BinOp::Mul,
                right: Box::new(int(3)),
            }),
        };
        assert_eq!(expr.unparse(), "(1 + (2 * 3))");
    }
}
