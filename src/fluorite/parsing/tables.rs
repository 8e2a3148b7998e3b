//! Parse-table construction.
//!
//!     The grammar and precedence tables in [grammar](super::grammar) are
//!     data; this module compiles them, once, into the ACTION/GOTO tables
//!     the driver runs on. Construction is the textbook canonical LR(1)
//!     build: FIRST sets, item-set closure, goto, then table filling.
//!
//!     Conflicts are resolved the way the yacc family resolves them, which
//!     is what the precedence table exists for:
//!
//!         - shift/reduce with both sides carrying precedence: the higher
//!           level wins; at equal level, left associativity reduces, right
//!           associativity shifts, and nonassociativity turns the entry
//!           into an error.
//!         - shift/reduce without usable precedence: shift.
//!         - reduce/reduce: the production declared first wins.
//!
//!     The finished tables are immutable and shared; every parse walks the
//!     same tables with its own stacks.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;

use crate::fluorite::parsing::grammar::{
    production_precedence, terminal_precedence, Assoc, NonTerm, Sym, PRODUCTIONS,
};
use crate::fluorite::token::TokenKind;

const TERMS: usize = TokenKind::COUNT;

/// One ACTION-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Shift(usize),
    Reduce(usize),
    Accept,
    Error,
}

/// An LR(1) item: a production, a dot position, and one lookahead terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item {
    prod: usize,
    dot: usize,
    la: usize,
}

fn sym_id(sym: Sym) -> usize {
    match sym {
        Sym::T(kind) => kind.index(),
        Sym::N(nonterm) => TERMS + nonterm.index(),
    }
}

struct FirstSets {
    sets: Vec<BTreeSet<usize>>,
    nullable: Vec<bool>,
}

fn compute_first() -> FirstSets {
    let mut sets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); NonTerm::COUNT];
    let mut nullable = vec![false; NonTerm::COUNT];

    let mut changed = true;
    while changed {
        changed = false;
        for production in PRODUCTIONS {
            let lhs = production.lhs.index();
            let mut all_nullable = true;
            for sym in production.rhs {
                match *sym {
                    Sym::T(kind) => {
                        changed |= sets[lhs].insert(kind.index());
                        all_nullable = false;
                        break;
                    }
                    Sym::N(nonterm) => {
                        let from = nonterm.index();
                        let additions: Vec<usize> = sets[from].iter().copied().collect();
                        for term in additions {
                            changed |= sets[lhs].insert(term);
                        }
                        if !nullable[from] {
                            all_nullable = false;
                            break;
                        }
                    }
                }
            }
            if all_nullable && !nullable[lhs] {
                nullable[lhs] = true;
                changed = true;
            }
        }
    }

    FirstSets { sets, nullable }
}

/// FIRST of a symbol string followed by a lookahead terminal.
fn first_of_sequence(first: &FirstSets, syms: &[Sym], la: usize) -> BTreeSet<usize> {
    let mut out = BTreeSet::new();
    for sym in syms {
        match *sym {
            Sym::T(kind) => {
                out.insert(kind.index());
                return out;
            }
            Sym::N(nonterm) => {
                out.extend(first.sets[nonterm.index()].iter().copied());
                if !first.nullable[nonterm.index()] {
                    return out;
                }
            }
        }
    }
    out.insert(la);
    out
}

fn closure(first: &FirstSets, by_lhs: &[Vec<usize>], items: &mut BTreeSet<Item>) {
    let mut work: Vec<Item> = items.iter().copied().collect();
    while let Some(item) = work.pop() {
        let production = &PRODUCTIONS[item.prod];
        if item.dot >= production.rhs.len() {
            continue;
        }
        if let Sym::N(nonterm) = production.rhs[item.dot] {
            let lookaheads =
                first_of_sequence(first, &production.rhs[item.dot + 1..], item.la);
            for &prod in &by_lhs[nonterm.index()] {
                for &la in &lookaheads {
                    let candidate = Item { prod, dot: 0, la };
                    if items.insert(candidate) {
                        work.push(candidate);
                    }
                }
            }
        }
    }
}

fn goto_set(
    first: &FirstSets,
    by_lhs: &[Vec<usize>],
    items: &BTreeSet<Item>,
    over: usize,
) -> BTreeSet<Item> {
    let mut next = BTreeSet::new();
    for item in items {
        let production = &PRODUCTIONS[item.prod];
        if item.dot < production.rhs.len() && sym_id(production.rhs[item.dot]) == over {
            next.insert(Item {
                prod: item.prod,
                dot: item.dot + 1,
                la: item.la,
            });
        }
    }
    closure(first, by_lhs, &mut next);
    next
}

fn resolve_shift_reduce(terminal: usize, prod: usize, shift_target: usize) -> Action {
    let token_prec = terminal_precedence(TokenKind::ALL[terminal]);
    let rule_prec = production_precedence(&PRODUCTIONS[prod]);
    match (token_prec, rule_prec) {
        (Some((token_level, assoc)), Some((rule_level, _))) => {
            if token_level > rule_level {
                Action::Shift(shift_target)
            } else if token_level < rule_level {
                Action::Reduce(prod)
            } else {
                match assoc {
                    Assoc::Left => Action::Reduce(prod),
                    Assoc::Right => Action::Shift(shift_target),
                    Assoc::NonAssoc => Action::Error,
                }
            }
        }
        // No precedence to compare: shift, as the yacc family does.
        _ => Action::Shift(shift_target),
    }
}

/// The compiled ACTION/GOTO tables.
pub(crate) struct ParseTables {
    actions: Vec<[Action; TERMS]>,
    gotos: Vec<[Option<usize>; NonTerm::COUNT]>,
}

static TABLES: Lazy<ParseTables> = Lazy::new(build);

impl ParseTables {
    /// The shared tables, built on first use and reused by every parse.
    pub(crate) fn shared() -> &'static ParseTables {
        &TABLES
    }

    pub(crate) fn action(&self, state: usize, kind: TokenKind) -> Action {
        self.actions
            .get(state)
            .map(|row| row[kind.index()])
            .unwrap_or(Action::Error)
    }

    pub(crate) fn goto(&self, state: usize, nonterm: NonTerm) -> Option<usize> {
        self.gotos.get(state).and_then(|row| row[nonterm.index()])
    }

    /// Terminal kinds the state could consume, for error reporting. The
    /// precedence-only kinds are grammar-registered but can never arrive,
    /// so they are not reported.
    pub(crate) fn expected(&self, state: usize) -> Vec<TokenKind> {
        let Some(row) = self.actions.get(state) else {
            return Vec::new();
        };
        TokenKind::ALL
            .iter()
            .copied()
            .filter(|kind| !kind.is_precedence_only())
            .filter(|kind| row[kind.index()] != Action::Error)
            .collect()
    }

    pub(crate) fn state_count(&self) -> usize {
        self.actions.len()
    }
}

fn build() -> ParseTables {
    let first = compute_first();

    let mut by_lhs: Vec<Vec<usize>> = vec![Vec::new(); NonTerm::COUNT];
    for (index, production) in PRODUCTIONS.iter().enumerate() {
        by_lhs[production.lhs.index()].push(index);
    }

    // Canonical LR(1) state machine.
    let mut start = BTreeSet::new();
    start.insert(Item {
        prod: 0,
        dot: 0,
        la: TokenKind::Eof.index(),
    });
    closure(&first, &by_lhs, &mut start);

    let mut states: Vec<BTreeSet<Item>> = vec![start.clone()];
    let mut index: HashMap<Vec<Item>, usize> = HashMap::new();
    index.insert(start.iter().copied().collect(), 0);
    let mut transitions: Vec<BTreeMap<usize, usize>> = vec![BTreeMap::new()];

    let mut work = vec![0];
    while let Some(state) = work.pop() {
        let items = states[state].clone();
        let mut outgoing: BTreeSet<usize> = BTreeSet::new();
        for item in &items {
            let production = &PRODUCTIONS[item.prod];
            if item.dot < production.rhs.len() {
                outgoing.insert(sym_id(production.rhs[item.dot]));
            }
        }
        for over in outgoing {
            let target_items = goto_set(&first, &by_lhs, &items, over);
            let key: Vec<Item> = target_items.iter().copied().collect();
            let target = match index.get(&key) {
                Some(&existing) => existing,
                None => {
                    let fresh = states.len();
                    states.push(target_items);
                    transitions.push(BTreeMap::new());
                    index.insert(key, fresh);
                    work.push(fresh);
                    fresh
                }
            };
            transitions[state].insert(over, target);
        }
    }

    // Fill ACTION and GOTO.
    let mut actions = vec![[Action::Error; TERMS]; states.len()];
    let mut gotos = vec![[None; NonTerm::COUNT]; states.len()];

    for (state, moves) in transitions.iter().enumerate() {
        for (&over, &target) in moves {
            if over < TERMS {
                actions[state][over] = Action::Shift(target);
            } else {
                gotos[state][over - TERMS] = Some(target);
            }
        }
    }

    for (state, items) in states.iter().enumerate() {
        for item in items {
            let production = &PRODUCTIONS[item.prod];
            if item.dot != production.rhs.len() {
                continue;
            }
            if item.prod == 0 {
                actions[state][TokenKind::Eof.index()] = Action::Accept;
                continue;
            }
            let cell = &mut actions[state][item.la];
            *cell = match *cell {
                Action::Error => Action::Reduce(item.prod),
                Action::Shift(target) => resolve_shift_reduce(item.la, item.prod, target),
                // Earlier production wins, as in the yacc family.
                Action::Reduce(other) => Action::Reduce(other.min(item.prod)),
                Action::Accept => Action::Accept,
            };
        }
    }

    ParseTables { actions, gotos }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_build_and_are_shared() {
        let tables = ParseTables::shared();
        assert!(tables.state_count() > 1);
        assert!(std::ptr::eq(tables, ParseTables::shared()));
    }

    #[test]
    fn the_start_state_accepts_statement_openers() {
        let tables = ParseTables::shared();
        for kind in [
            TokenKind::Num,
            TokenKind::Ident,
            TokenKind::Atom,
            TokenKind::LParen,
            TokenKind::LBrace,
            TokenKind::LBracket,
            TokenKind::Do,
            TokenKind::Minus,
        ] {
            assert!(
                matches!(tables.action(0, kind), Action::Shift(_)),
                "state 0 should shift {}",
                kind
            );
        }
    }

    #[test]
    fn the_start_state_rejects_closers() {
        let tables = ParseTables::shared();
        for kind in [TokenKind::RParen, TokenKind::End, TokenKind::Eof] {
            assert_eq!(tables.action(0, kind), Action::Error);
        }
    }

    #[test]
    fn expected_kinds_never_mention_precedence_only_kinds() {
        let tables = ParseTables::shared();
        for state in 0..tables.state_count() {
            for kind in tables.expected(state) {
                assert!(!kind.is_precedence_only());
            }
        }
    }

    #[test]
    fn out_of_range_states_are_errors() {
        let tables = ParseTables::shared();
        assert_eq!(tables.action(usize::MAX, TokenKind::Num), Action::Error);
        assert_eq!(tables.goto(usize::MAX, NonTerm::Expr), None);
    }
}
