//! The grammar as data.
//!
//!     One static table of productions and one static precedence table.
//!     Both are configuration for the table builder in
//!     [tables](super::tables); nothing registers rules at runtime and
//!     nothing mutates them after startup.
//!
//!     Each production carries the action that builds its value, and
//!     optionally an explicit precedence kind overriding the default (the
//!     rightmost terminal of its right-hand side). The override is how the
//!     precedence-only kinds steer conflict resolution: the call unit
//!     productions answer to `NoParensApply`/`ParensApply` and the unary
//!     forms to `UnaryOp`, without any of those kinds ever appearing in a
//!     token stream.
//!
//!     The guard productions at the bottom exist for the same reason the
//!     precedence-only kinds exist in the token alphabet at all: every
//!     terminal the precedence table names must be known to the grammar.
//!     Their action refuses to build anything — reducing one would mean
//!     the tables contradict the precedence contract.

use crate::fluorite::parsing::actions::{self, SemValue};
use crate::fluorite::parsing::common::ParseError;
use crate::fluorite::token::TokenKind;

/// Nonterminal symbols. Declaration order is the GOTO-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonTerm {
    Start,
    Unit,
    Stmts,
    Stmt,
    Keyword,
    AtomLit,
    IdLit,
    Number,
    Literal,
    Expr,
    Tuple,
    TupleItems,
    List,
    ListOpen,
    ListClose,
    ListItems,
    ListItem,
    KwList,
    KwListOpen,
    KwListClose,
    KwListItems,
    KwListItem,
    Call,
    CallNoParens,
    CallParens,
    CallZero,
    Callee,
    CalleePath,
    Args,
    Arg,
    DoBlock,
    DoOpen,
    DoClose,
    MatchExpr,
    PrecedenceMarkers,
}

impl NonTerm {
    pub const COUNT: usize = NonTerm::PrecedenceMarkers as usize + 1;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A grammar symbol: terminal or nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sym {
    T(TokenKind),
    N(NonTerm),
}

pub type ActionFn = fn(Vec<SemValue>) -> Result<SemValue, ParseError>;

pub struct Production {
    pub lhs: NonTerm,
    pub rhs: &'static [Sym],
    pub prec: Option<TokenKind>,
    pub action: ActionFn,
}

const fn rule(lhs: NonTerm, rhs: &'static [Sym], action: ActionFn) -> Production {
    Production {
        lhs,
        rhs,
        prec: None,
        action,
    }
}

const fn rule_prec(
    lhs: NonTerm,
    rhs: &'static [Sym],
    prec: TokenKind,
    action: ActionFn,
) -> Production {
    Production {
        lhs,
        rhs,
        prec: Some(prec),
        action,
    }
}

/// Operator associativity for one precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
    NonAssoc,
}

use self::NonTerm::*;
use self::Sym::{N, T};
use crate::fluorite::token::TokenKind as K;

/// The precedence table, lowest binding power first.
///
/// `NoParensApply`, `ParensApply`, `BinaryOp`, and `UnaryOp` are
/// precedence-only: they appear here and in the guard productions, never
/// in a token stream.
pub static PRECEDENCE: &[(Assoc, &[TokenKind])] = &[
    (Assoc::NonAssoc, &[K::NoParensApply]),
    (Assoc::NonAssoc, &[K::ParensApply]),
    (Assoc::Right, &[K::Apply]),
    (Assoc::Left, &[K::Comma]),
    (Assoc::Left, &[K::Plus, K::Minus]),
    (Assoc::Left, &[K::Star, K::Slash]),
    (Assoc::Left, &[K::BinaryOp]),
    (Assoc::NonAssoc, &[K::LParen, K::RParen]),
    (Assoc::NonAssoc, &[K::UnaryOp]),
    (Assoc::Left, &[K::Dot]),
];

/// The production table. Index 0 is the augmented start production; the
/// table builder accepts on it and never reduces it.
pub static PRODUCTIONS: &[Production] = &[
    rule(Start, &[N(Unit)], actions::forward),
    rule(Unit, &[N(Stmts)], actions::unit),
    rule(Unit, &[N(Stmts), T(K::Newline)], actions::unit),
    rule(Stmts, &[N(Stmts), T(K::Newline), N(Stmt)], actions::stmts_push),
    rule(Stmts, &[N(Stmts), T(K::Semicolon), N(Stmt)], actions::stmts_push),
    rule(Stmts, &[N(Stmt)], actions::stmts_single),
    rule(Stmt, &[N(Expr)], actions::forward),
    rule(Stmt, &[N(MatchExpr)], actions::forward),
    rule(Stmt, &[N(Call)], actions::forward),
    rule(Keyword, &[T(K::Label), N(Stmt)], actions::keyword),
    rule(AtomLit, &[T(K::Atom)], actions::atom),
    rule(IdLit, &[T(K::Ident)], actions::ident),
    rule(Number, &[T(K::Num)], actions::number),
    rule(Expr, &[N(Literal)], actions::forward),
    rule(Expr, &[N(IdLit)], actions::forward),
    rule(Literal, &[N(Number)], actions::forward),
    rule(Literal, &[N(AtomLit)], actions::forward),
    rule(Literal, &[N(Tuple)], actions::forward),
    rule(Literal, &[N(List)], actions::forward),
    rule(Literal, &[N(KwList)], actions::forward),
    rule(Tuple, &[T(K::LBrace), N(TupleItems), T(K::RBrace)], actions::tuple),
    rule(
        Tuple,
        &[T(K::LBrace), N(TupleItems), T(K::Comma), T(K::RBrace)],
        actions::tuple,
    ),
    rule(Tuple, &[T(K::LBrace), T(K::RBrace)], actions::tuple_empty),
    rule(
        Tuple,
        &[T(K::LBrace), T(K::Newline), T(K::RBrace)],
        actions::tuple_empty,
    ),
    rule(
        TupleItems,
        &[N(TupleItems), T(K::Comma), N(Stmt)],
        actions::items_push,
    ),
    rule(TupleItems, &[N(Stmt)], actions::items_single),
    rule(List, &[N(ListOpen), N(ListItems), N(ListClose)], actions::list),
    rule(List, &[T(K::LBracket), T(K::RBracket)], actions::list_empty),
    rule(ListOpen, &[T(K::LBracket)], actions::discard),
    rule(ListOpen, &[T(K::LBracket), T(K::Newline)], actions::discard),
    rule(ListClose, &[T(K::RBracket)], actions::discard),
    rule(ListClose, &[T(K::Newline), T(K::RBracket)], actions::discard),
    rule(ListClose, &[T(K::Comma), N(ListClose)], actions::discard),
    rule(
        ListItems,
        &[N(ListItems), T(K::Comma), N(ListItem)],
        actions::items_push,
    ),
    rule(
        ListItems,
        &[N(ListItems), T(K::Comma), T(K::Newline), N(ListItem)],
        actions::items_push,
    ),
    rule(
        ListItems,
        &[N(ListItems), T(K::Newline), N(ListItem)],
        actions::items_push,
    ),
    rule(ListItems, &[N(ListItem)], actions::items_single),
    rule(ListItem, &[N(Stmt)], actions::forward),
    rule(
        KwList,
        &[N(KwListOpen), N(KwListItems), N(KwListClose)],
        actions::list,
    ),
    rule(KwListOpen, &[T(K::LBracket)], actions::discard),
    rule(KwListOpen, &[T(K::LBracket), T(K::Newline)], actions::discard),
    rule(KwListClose, &[T(K::RBracket)], actions::discard),
    rule(KwListClose, &[T(K::Newline), T(K::RBracket)], actions::discard),
    rule(KwListClose, &[T(K::Comma), N(KwListClose)], actions::discard),
    rule(
        KwListItems,
        &[N(KwListItems), T(K::Comma), N(KwListItem)],
        actions::items_push,
    ),
    rule(
        KwListItems,
        &[N(KwListItems), T(K::Comma), T(K::Newline), N(KwListItem)],
        actions::items_push,
    ),
    rule(
        KwListItems,
        &[N(KwListItems), T(K::Newline), N(KwListItem)],
        actions::items_push,
    ),
    rule(KwListItems, &[N(KwListItem)], actions::items_single),
    rule(KwListItem, &[N(Keyword)], actions::kw_item),
    rule_prec(Call, &[N(CallNoParens)], K::NoParensApply, actions::forward),
    rule_prec(Call, &[N(CallParens)], K::ParensApply, actions::forward),
    rule(Call, &[N(CallZero)], actions::forward),
    rule(
        CallParens,
        &[N(Callee), T(K::Apply), T(K::LParen), N(Args), T(K::RParen)],
        actions::call_parens,
    ),
    rule(
        CallNoParens,
        &[N(Callee), T(K::Apply), N(Args)],
        actions::call_noparens,
    ),
    rule(
        CallZero,
        &[N(Callee), T(K::Apply), T(K::LParen), T(K::RParen)],
        actions::call_zero,
    ),
    rule(Callee, &[N(IdLit)], actions::forward),
    rule(
        Callee,
        &[N(CalleePath), T(K::Dot), N(IdLit)],
        actions::callee_qual,
    ),
    rule(
        CalleePath,
        &[N(CalleePath), T(K::Dot), N(AtomLit)],
        actions::path_push,
    ),
    rule(CalleePath, &[N(AtomLit)], actions::path_single),
    rule(Args, &[N(Args), T(K::Comma), N(Arg)], actions::args_push),
    rule(Args, &[N(Arg)], actions::args_single),
    rule(Arg, &[N(Stmt)], actions::arg_positional),
    rule(
        Arg,
        &[T(K::LParen), N(Call), T(K::RParen)],
        actions::arg_parenthesized,
    ),
    rule(Arg, &[N(Keyword)], actions::arg_keyword),
    rule(Expr, &[N(DoBlock)], actions::forward),
    rule(DoBlock, &[N(DoOpen), N(Stmts), N(DoClose)], actions::do_block),
    rule(DoOpen, &[T(K::Do), T(K::Newline)], actions::do_open),
    rule(DoOpen, &[T(K::Do)], actions::do_open),
    rule(DoClose, &[T(K::Newline), T(K::End)], actions::discard),
    rule(DoClose, &[T(K::End)], actions::discard),
    rule(Expr, &[T(K::LParen), N(Expr), T(K::RParen)], actions::paren),
    rule(Expr, &[N(Expr), T(K::Plus), N(Expr)], actions::binary),
    rule(Expr, &[N(Expr), T(K::Minus), N(Expr)], actions::binary),
    rule(Expr, &[N(Expr), T(K::Star), N(Expr)], actions::binary),
    rule(Expr, &[N(Expr), T(K::Slash), N(Expr)], actions::binary),
    rule(MatchExpr, &[N(Expr), T(K::Equal), N(Expr)], actions::match_stmt),
    rule_prec(Expr, &[T(K::Plus), N(Expr)], K::UnaryOp, actions::unary),
    rule_prec(Expr, &[T(K::Minus), N(Expr)], K::UnaryOp, actions::unary),
    rule(PrecedenceMarkers, &[T(K::BinaryOp)], actions::precedence_marker),
    rule(
        PrecedenceMarkers,
        &[T(K::NoParensApply)],
        actions::precedence_marker,
    ),
    rule(
        PrecedenceMarkers,
        &[T(K::ParensApply)],
        actions::precedence_marker,
    ),
    rule(PrecedenceMarkers, &[T(K::UnaryOp)], actions::precedence_marker),
    rule(Unit, &[N(PrecedenceMarkers)], actions::precedence_marker),
];

/// Precedence level and associativity of a terminal, if it has one.
pub fn terminal_precedence(kind: TokenKind) -> Option<(usize, Assoc)> {
    PRECEDENCE
        .iter()
        .enumerate()
        .find(|(_, (_, kinds))| kinds.contains(&kind))
        .map(|(level, (assoc, _))| (level, *assoc))
}

/// Precedence of a production: its explicit override, or the precedence of
/// the rightmost terminal of its right-hand side.
pub fn production_precedence(production: &Production) -> Option<(usize, Assoc)> {
    let kind = production.prec.or_else(|| {
        production.rhs.iter().rev().find_map(|sym| match sym {
            Sym::T(kind) => Some(*kind),
            Sym::N(_) => None,
        })
    })?;
    terminal_precedence(kind)
}
