//! Syntax tree node model.
//!
//!     One closed tagged union covers every expression form the grammar can
//!     produce, plus two forms the grammar cannot yet: string literals (the
//!     scanner has no string rule so far) and function definitions (reserved
//!     words for them exist, their productions do not). Both stay in the
//!     model so later stages and programmatic construction can use them.
//!
//!     Every node owns its children exclusively; the tree has no sharing and
//!     no cycles. Nodes are immutable once the parse returns, with one
//!     build-time exception: a do-block grows while its statements reduce,
//!     through [`DoBlock::append`].

pub mod snapshot;
pub mod unparse;

use num_bigint::BigInt;
use serde::Serialize;

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Unary sign operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Plus,
    Minus,
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnOp::Plus => "+",
            UnOp::Minus => "-",
        }
    }
}

/// An expression node.
///
/// Keyword lists have no variant of their own: `[this: 1]` is a `List` whose
/// elements are two-element `Tuple`s of an `Atom` and a value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Integer literal, arbitrary precision.
    Integer(BigInt),
    /// Atom literal; the name keeps its written sigil (`:ok`, `Math`).
    Atom { name: String },
    /// String literal. Reachable in the model; the scanner does not produce
    /// it yet.
    Str(String),
    /// A bare identifier reference, resolved later.
    Symbol(String),
    /// A dotted path of atom segments ending in an identifier.
    QualSymbol { path: Vec<String>, name: String },
    /// Fixed-arity ordered sequence, `{...}`.
    Tuple(Vec<Expr>),
    /// Variable-length ordered sequence, `[...]`.
    List(Vec<Expr>),
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        kwargs: Vec<(String, Expr)>,
    },
    Do(DoBlock),
    Match(MatchExpr),
    /// Function definition. No grammar rule produces this yet; top-level
    /// assembly still honors it (see [assembling](crate::fluorite::assembling)).
    FnDef {
        name: String,
        params: Vec<String>,
        body: Vec<Expr>,
    },
}

impl Expr {
    /// The canonical "no value" constant a tail-less block evaluates to.
    pub fn no_value() -> Expr {
        Expr::Atom {
            name: ":nil".to_string(),
        }
    }
}

/// One side of a match; wraps a single raw expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub expr: Box<Expr>,
}

impl Pattern {
    pub fn new(expr: Expr) -> Pattern {
        Pattern {
            expr: Box::new(expr),
        }
    }
}

/// A destructuring bind, `target = bound`. Not reassignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchExpr {
    pub target: Pattern,
    pub bound: Pattern,
}

/// A `do ... end` block: ordered statements and a distinguished tail.
///
/// Statements live in one ordered sequence; the tail is an index into it,
/// never a second copy of the node. `label` records the source offset of the
/// opening `do` keyword for later stages that need block identity (lifting a
/// block into a generated nested routine, say); the parser itself does not
/// interpret it, and structural equality ignores it.
#[derive(Debug, Clone, Serialize)]
pub struct DoBlock {
    label: usize,
    exprs: Vec<Expr>,
    tail: Option<usize>,
}

impl DoBlock {
    /// An empty block with no tail.
    pub fn new(label: usize) -> DoBlock {
        DoBlock {
            label,
            exprs: Vec::new(),
            tail: None,
        }
    }

    /// A block whose tail is the last of `exprs`, if any.
    pub fn from_statements(label: usize, exprs: Vec<Expr>) -> DoBlock {
        let tail = exprs.len().checked_sub(1);
        DoBlock { label, exprs, tail }
    }

    /// Append a new tail, demoting the previous tail into the body.
    pub fn append(&mut self, expr: Expr) {
        self.exprs.push(expr);
        self.tail = Some(self.exprs.len() - 1);
    }

    /// Source offset of the opening `do` keyword.
    pub fn label(&self) -> usize {
        self.label
    }

    /// Every statement of the block, tail included, in source order.
    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    /// The statements before the tail, in source order.
    pub fn body(&self) -> impl Iterator<Item = &Expr> + '_ {
        self.exprs
            .iter()
            .enumerate()
            .filter(move |(index, _)| Some(*index) != self.tail)
            .map(|(_, expr)| expr)
    }

    /// The tail expression; always defined. A block without an explicit
    /// tail evaluates to the canonical no-value constant.
    pub fn tail_expr(&self) -> Expr {
        self.tail
            .and_then(|index| self.exprs.get(index))
            .cloned()
            .unwrap_or_else(Expr::no_value)
    }

    pub fn has_tail(&self) -> bool {
        self.tail.is_some()
    }
}

// `label` carries a source position, not structure; two blocks parsed from
// different offsets still compare equal.
impl PartialEq for DoBlock {
    fn eq(&self, other: &DoBlock) -> bool {
        self.exprs == other.exprs && self.tail == other.tail
    }
}

/// The root of a parsed source unit: its top-level statements, in
/// execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilationUnit {
    stmts: Vec<Expr>,
}

impl CompilationUnit {
    pub fn new(stmts: Vec<Expr>) -> CompilationUnit {
        CompilationUnit { stmts }
    }

    pub fn stmts(&self) -> &[Expr] {
        &self.stmts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> Expr {
        Expr::Integer(BigInt::from(n))
    }

    #[test]
    fn do_block_tail_is_always_defined() {
        let block = DoBlock::new(0);
        assert!(!block.has_tail());
        assert_eq!(block.tail_expr(), Expr::no_value());

        let block = DoBlock::from_statements(0, vec![int(1)]);
        assert_eq!(block.tail_expr(), int(1));
        assert_eq!(block.body().count(), 0);
    }

    #[test]
    fn append_demotes_the_previous_tail() {
        let mut block = DoBlock::from_statements(0, vec![int(1)]);
        block.append(int(2));
        assert_eq!(block.tail_expr(), int(2));
        let body: Vec<&Expr> = block.body().collect();
        assert_eq!(body, vec![&int(1)]);
        // Source order is preserved across appends.
        assert_eq!(block.exprs(), &[int(1), int(2)]);
    }

    #[test]
    fn block_equality_ignores_the_source_label() {
        let a = DoBlock::from_statements(3, vec![int(1)]);
        let b = DoBlock::from_statements(40, vec![int(1)]);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_tuple_and_list_are_distinct() {
        assert_ne!(Expr::Tuple(Vec::new()), Expr::List(Vec::new()));
    }
}
