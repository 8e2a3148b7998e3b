//! Semantic actions: the AST builder.
//!
//!     Every production in the grammar table points at one of these
//!     functions. The engine pops the production's right-hand-side values
//!     off the value stack and hands them over in source order; the action
//!     folds them into one value that goes back on the stack.
//!
//!     Values travel as [`SemValue`], a small union of everything a
//!     reduction can produce: tokens, nodes, node lists, argument lists,
//!     label/value pairs, callee paths, block labels, and the finished
//!     unit. An action finding the wrong shape underneath itself is a
//!     defect in the tables, reported as [`ParseError::Fault`], never as a
//!     syntax error.

use num_bigint::BigInt;

use crate::fluorite::assembling;
use crate::fluorite::ast::{BinOp, CompilationUnit, DoBlock, Expr, MatchExpr, Pattern, UnOp};
use crate::fluorite::parsing::common::ParseError;
use crate::fluorite::token::{Token, TokenKind};

/// One parsed call argument, positional or keyword.
#[derive(Debug)]
pub enum Arg {
    Positional(Expr),
    Keyword(String, Expr),
}

/// A value on the parser's value stack.
#[derive(Debug)]
pub enum SemValue {
    Token(Token),
    Node(Expr),
    Nodes(Vec<Expr>),
    Args(Vec<Arg>),
    Argument(Arg),
    Pair(String, Expr),
    Path(Vec<String>),
    Offset(usize),
    Unit(CompilationUnit),
    Empty,
}

fn fault(expected: &str, found: &SemValue) -> ParseError {
    ParseError::Fault(format!(
        "malformed value stack: expected {}, found {:?}",
        expected, found
    ))
}

fn take(values: &mut Vec<SemValue>, index: usize) -> SemValue {
    match values.get_mut(index) {
        Some(slot) => std::mem::replace(slot, SemValue::Empty),
        None => SemValue::Empty,
    }
}

fn into_token(value: SemValue) -> Result<Token, ParseError> {
    match value {
        SemValue::Token(tok) => Ok(tok),
        other => Err(fault("token", &other)),
    }
}

fn into_node(value: SemValue) -> Result<Expr, ParseError> {
    match value {
        SemValue::Node(expr) => Ok(expr),
        other => Err(fault("node", &other)),
    }
}

fn into_nodes(value: SemValue) -> Result<Vec<Expr>, ParseError> {
    match value {
        SemValue::Nodes(exprs) => Ok(exprs),
        other => Err(fault("node list", &other)),
    }
}

fn into_args(value: SemValue) -> Result<Vec<Arg>, ParseError> {
    match value {
        SemValue::Args(args) => Ok(args),
        other => Err(fault("argument list", &other)),
    }
}

fn into_argument(value: SemValue) -> Result<Arg, ParseError> {
    match value {
        SemValue::Argument(arg) => Ok(arg),
        other => Err(fault("argument", &other)),
    }
}

fn into_pair(value: SemValue) -> Result<(String, Expr), ParseError> {
    match value {
        SemValue::Pair(name, expr) => Ok((name, expr)),
        other => Err(fault("label/value pair", &other)),
    }
}

fn into_path(value: SemValue) -> Result<Vec<String>, ParseError> {
    match value {
        SemValue::Path(path) => Ok(path),
        other => Err(fault("callee path", &other)),
    }
}

fn into_offset(value: SemValue) -> Result<usize, ParseError> {
    match value {
        SemValue::Offset(offset) => Ok(offset),
        other => Err(fault("block label", &other)),
    }
}

/// Unit productions: pass the only interesting value through.
pub fn forward(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    Ok(take(&mut v, 0))
}

pub fn unit(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let stmts = into_nodes(take(&mut v, 0))?;
    Ok(SemValue::Unit(assembling::assemble(stmts)))
}

pub fn stmts_push(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let last = v.len().saturating_sub(1);
    let stmt = into_node(take(&mut v, last))?;
    let mut stmts = into_nodes(take(&mut v, 0))?;
    stmts.push(stmt);
    Ok(SemValue::Nodes(stmts))
}

pub fn stmts_single(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let stmt = into_node(take(&mut v, 0))?;
    Ok(SemValue::Nodes(vec![stmt]))
}

/// `name: value` — strip the trailing delimiter and re-prefix the name as
/// an atom.
pub fn keyword(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let label = into_token(take(&mut v, 0))?;
    let value = into_node(take(&mut v, 1))?;
    let bare = label.text.strip_suffix(':').unwrap_or(&label.text);
    Ok(SemValue::Pair(format!(":{}", bare), value))
}

pub fn atom(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let tok = into_token(take(&mut v, 0))?;
    Ok(SemValue::Node(Expr::Atom { name: tok.text }))
}

pub fn ident(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let tok = into_token(take(&mut v, 0))?;
    Ok(SemValue::Node(Expr::Symbol(tok.text)))
}

pub fn number(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let tok = into_token(take(&mut v, 0))?;
    let value: BigInt = tok
        .text
        .parse()
        .map_err(|_| ParseError::Fault(format!("unparseable number token {:?}", tok.text)))?;
    Ok(SemValue::Node(Expr::Integer(value)))
}

pub fn tuple(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let items = into_nodes(take(&mut v, 1))?;
    Ok(SemValue::Node(Expr::Tuple(items)))
}

pub fn tuple_empty(_v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    Ok(SemValue::Node(Expr::Tuple(Vec::new())))
}

pub fn list(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let items = into_nodes(take(&mut v, 1))?;
    Ok(SemValue::Node(Expr::List(items)))
}

pub fn list_empty(_v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    Ok(SemValue::Node(Expr::List(Vec::new())))
}

/// Collection items: extend the running list with the rightmost value.
/// The separator shape between them varies by production, so the item is
/// addressed from the end.
pub fn items_push(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let last = v.len().saturating_sub(1);
    let item = into_node(take(&mut v, last))?;
    let mut items = into_nodes(take(&mut v, 0))?;
    items.push(item);
    Ok(SemValue::Nodes(items))
}

pub fn items_single(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let item = into_node(take(&mut v, 0))?;
    Ok(SemValue::Nodes(vec![item]))
}

pub fn discard(_v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    Ok(SemValue::Empty)
}

/// A keyword-list element is a two-element tuple of atom and value.
pub fn kw_item(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let (name, value) = into_pair(take(&mut v, 0))?;
    Ok(SemValue::Node(Expr::Tuple(vec![Expr::Atom { name }, value])))
}

fn build_call(callee: Expr, parsed: Vec<Arg>) -> Expr {
    let mut args = Vec::new();
    let mut kwargs = Vec::new();
    for arg in parsed {
        match arg {
            Arg::Positional(expr) => args.push(expr),
            Arg::Keyword(name, expr) => kwargs.push((name, expr)),
        }
    }
    Expr::Call {
        callee: Box::new(callee),
        args,
        kwargs,
    }
}

pub fn call_parens(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let callee = into_node(take(&mut v, 0))?;
    let args = into_args(take(&mut v, 3))?;
    Ok(SemValue::Node(build_call(callee, args)))
}

pub fn call_noparens(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let callee = into_node(take(&mut v, 0))?;
    let args = into_args(take(&mut v, 2))?;
    Ok(SemValue::Node(build_call(callee, args)))
}

pub fn call_zero(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let callee = into_node(take(&mut v, 0))?;
    Ok(SemValue::Node(build_call(callee, Vec::new())))
}

pub fn callee_qual(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let path = into_path(take(&mut v, 0))?;
    let tail = into_node(take(&mut v, 2))?;
    match tail {
        Expr::Symbol(name) => Ok(SemValue::Node(Expr::QualSymbol { path, name })),
        other => Err(fault("identifier at the end of a callee path", &SemValue::Node(other))),
    }
}

pub fn path_push(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let mut path = into_path(take(&mut v, 0))?;
    let segment = into_node(take(&mut v, 2))?;
    match segment {
        Expr::Atom { name } => {
            path.push(name);
            Ok(SemValue::Path(path))
        }
        other => Err(fault("atom path segment", &SemValue::Node(other))),
    }
}

pub fn path_single(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let segment = into_node(take(&mut v, 0))?;
    match segment {
        Expr::Atom { name } => Ok(SemValue::Path(vec![name])),
        other => Err(fault("atom path segment", &SemValue::Node(other))),
    }
}

pub fn args_push(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let arg = into_argument(take(&mut v, 2))?;
    let mut args = into_args(take(&mut v, 0))?;
    args.push(arg);
    Ok(SemValue::Args(args))
}

pub fn args_single(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let arg = into_argument(take(&mut v, 0))?;
    Ok(SemValue::Args(vec![arg]))
}

pub fn arg_positional(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let expr = into_node(take(&mut v, 0))?;
    Ok(SemValue::Argument(Arg::Positional(expr)))
}

pub fn arg_parenthesized(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let expr = into_node(take(&mut v, 1))?;
    Ok(SemValue::Argument(Arg::Positional(expr)))
}

pub fn arg_keyword(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let (name, value) = into_pair(take(&mut v, 0))?;
    Ok(SemValue::Argument(Arg::Keyword(name, value)))
}

pub fn do_block(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let label = into_offset(take(&mut v, 0))?;
    let stmts = into_nodes(take(&mut v, 1))?;
    Ok(SemValue::Node(Expr::Do(DoBlock::from_statements(
        label, stmts,
    ))))
}

pub fn do_open(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let tok = into_token(take(&mut v, 0))?;
    Ok(SemValue::Offset(tok.span.start))
}

pub fn paren(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    Ok(take(&mut v, 1))
}

pub fn binary(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let left = into_node(take(&mut v, 0))?;
    let op_tok = into_token(take(&mut v, 1))?;
    let right = into_node(take(&mut v, 2))?;
    let op = match op_tok.kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        other => return Err(ParseError::Fault(format!("{} is not a binary operator", other))),
    };
    Ok(SemValue::Node(Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }))
}

pub fn match_stmt(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let target = into_node(take(&mut v, 0))?;
    let bound = into_node(take(&mut v, 2))?;
    Ok(SemValue::Node(Expr::Match(MatchExpr {
        target: Pattern::new(target),
        bound: Pattern::new(bound),
    })))
}

pub fn unary(mut v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    let op_tok = into_token(take(&mut v, 0))?;
    let operand = into_node(take(&mut v, 1))?;
    let op = match op_tok.kind {
        TokenKind::Plus => UnOp::Plus,
        TokenKind::Minus => UnOp::Minus,
        other => return Err(ParseError::Fault(format!("{} is not a unary operator", other))),
    };
    Ok(SemValue::Node(Expr::Unary {
        op,
        operand: Box::new(operand),
    }))
}

/// Guard for the precedence-only kinds: reducing through one means the
/// tables contradict the precedence contract.
pub fn precedence_marker(_v: Vec<SemValue>) -> Result<SemValue, ParseError> {
    Err(ParseError::Fault(
        "precedence-only token kind reached a reduction; grammar tables are inconsistent"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_action_reprefixes_the_label() {
        let values = vec![
            SemValue::Token(Token::new(TokenKind::Label, "this:", 0..5)),
            SemValue::Node(Expr::Integer(BigInt::from(1))),
        ];
        match keyword(values).unwrap() {
            SemValue::Pair(name, Expr::Integer(n)) => {
                assert_eq!(name, ":this");
                assert_eq!(n, BigInt::from(1));
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn call_partitioning_preserves_argument_order() {
        let call = build_call(
            Expr::Symbol("f".to_string()),
            vec![
                Arg::Positional(Expr::Symbol("a".to_string())),
                Arg::Keyword(":k".to_string(), Expr::Integer(BigInt::from(1))),
                Arg::Positional(Expr::Symbol("b".to_string())),
                Arg::Keyword(":m".to_string(), Expr::Integer(BigInt::from(2))),
            ],
        );
        match call {
            Expr::Call { args, kwargs, .. } => {
                assert_eq!(
                    args,
                    vec![
                        Expr::Symbol("a".to_string()),
                        Expr::Symbol("b".to_string())
                    ]
                );
                assert_eq!(kwargs.len(), 2);
                assert_eq!(kwargs[0].0, ":k");
                assert_eq!(kwargs[1].0, ":m");
            }
            other => panic!("unexpected node: {:?}", other),
        }
    }

    #[test]
    fn wrong_stack_shape_is_a_fault() {
        let err = atom(vec![SemValue::Empty]).unwrap_err();
        assert!(matches!(err, ParseError::Fault(_)));
    }

    #[test]
    fn the_marker_guard_always_faults() {
        assert!(matches!(
            precedence_marker(Vec::new()),
            Err(ParseError::Fault(_))
        ));
    }
}
