//! Integration tests for the parser: end-to-end behavior over source text.

use fluorite_parser::fluorite::ast::{BinOp, Expr, MatchExpr, Pattern};
use fluorite_parser::fluorite::parsing::{parse_source, ParseError};
use fluorite_parser::fluorite::token::TokenKind;
use num_bigint::BigInt;

fn int(n: i64) -> Expr {
    Expr::Integer(BigInt::from(n))
}

fn sym(name: &str) -> Expr {
    Expr::Symbol(name.to_string())
}

fn matched(target: Expr, bound: Expr) -> Expr {
    Expr::Match(MatchExpr {
        target: Pattern::new(target),
        bound: Pattern::new(bound),
    })
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

#[test]
fn parsing_is_deterministic() {
    let source = "c = a*a + b*b\nMath.sqrt c";
    let first = parse_source(source).unwrap();
    let second = parse_source(source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn a_match_is_a_bind_not_an_assignment() {
    let unit = parse_source("x = 3").unwrap();
    assert_eq!(unit.stmts(), &[matched(sym("x"), int(3))]);
}

#[test]
fn statements_split_on_newlines_and_semicolons() {
    let newline = parse_source("a = 1\nb = 2").unwrap();
    let semicolon = parse_source("a = 1; b = 2").unwrap();
    assert_eq!(newline, semicolon);
    assert_eq!(newline.stmts().len(), 2);
}

#[test]
fn arithmetic_precedence_and_associativity() {
    let unit = parse_source("a*a + b*b").unwrap();
    assert_eq!(
        unit.stmts(),
        &[binary(
            binary(sym("a"), BinOp::Mul, sym("a")),
            BinOp::Add,
            binary(sym("b"), BinOp::Mul, sym("b")),
        )]
    );

    let unit = parse_source("1 - 2 - 3").unwrap();
    assert_eq!(
        unit.stmts(),
        &[binary(binary(int(1), BinOp::Sub, int(2)), BinOp::Sub, int(3))]
    );
}

#[test]
fn parentheses_group_without_leaving_a_node() {
    let grouped = parse_source("(1 + 2) * 3").unwrap();
    assert_eq!(
        grouped.stmts(),
        &[binary(
            binary(int(1), BinOp::Add, int(2)),
            BinOp::Mul,
            int(3)
        )]
    );
}

#[test]
fn unary_minus_binds_tighter_than_multiplication() {
    let unit = parse_source("-a * b").unwrap();
    assert_eq!(
        unit.stmts(),
        &[binary(
            Expr::Unary {
                op: fluorite_parser::fluorite::ast::UnOp::Minus,
                operand: Box::new(sym("a")),
            },
            BinOp::Mul,
            sym("b"),
        )]
    );
}

#[test]
fn a_signed_operand_stays_a_subtraction() {
    // Application never triggers on sign tokens.
    let spaced = parse_source("a - 1").unwrap();
    let tight = parse_source("a -1").unwrap();
    assert_eq!(spaced, tight);
    assert_eq!(spaced.stmts(), &[binary(sym("a"), BinOp::Sub, int(1))]);
}

#[test]
fn integers_exceeding_machine_width_parse() {
    let unit = parse_source("123456789012345678901234567890").unwrap();
    let expected: BigInt = "123456789012345678901234567890".parse().unwrap();
    assert_eq!(unit.stmts(), &[Expr::Integer(expected)]);
}

#[test]
fn chained_matches_are_rejected() {
    assert!(matches!(
        parse_source("x = y = 3"),
        Err(ParseError::Syntax(_))
    ));
}

#[test]
fn syntax_errors_report_offset_found_and_expected() {
    match parse_source("a = ]") {
        Err(ParseError::Syntax(err)) => {
            assert_eq!(err.offset, 4);
            assert_eq!(err.found, TokenKind::RBracket);
            assert!(err.expected.contains(&TokenKind::Num));
            assert!(err.expected.iter().all(|k| !k.is_precedence_only()));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn failed_parses_produce_no_partial_tree() {
    // The result type makes this structural: an error carries no unit.
    let err = parse_source("a = ").unwrap_err();
    assert!(matches!(err, ParseError::Syntax(_)));
}

#[test]
fn comments_and_blank_lines_are_insignificant() {
    let plain = parse_source("a = 1\nb = 2").unwrap();
    let noisy = parse_source("a = 1   # bind a\n\n# a full comment line\nb = 2\n").unwrap();
    assert_eq!(plain, noisy);
}

#[test]
fn the_hypotenuse_program_parses() {
    let source = "do
    a = 3
    b = 4

    c = a*a + b*b

    Math.sqrt c         # the length of the hypot
    [
        a,
        b,
        c
    ]
end";
    let unit = parse_source(source).unwrap();
    assert_eq!(unit.stmts().len(), 1);
    let Expr::Do(block) = &unit.stmts()[0] else {
        panic!("expected a do-block");
    };
    assert_eq!(block.exprs().len(), 5);
    assert_eq!(
        block.tail_expr(),
        Expr::List(vec![sym("a"), sym("b"), sym("c")])
    );
    let Expr::Call { callee, args, .. } = &block.exprs()[3] else {
        panic!("expected the qualified call");
    };
    assert_eq!(
        **callee,
        Expr::QualSymbol {
            path: vec!["Math".to_string()],
            name: "sqrt".to_string(),
        }
    );
    assert_eq!(args, &[sym("c")]);
}

#[test]
fn unparse_round_trips_a_full_program() {
    let source = "do\na = 3\nb = 4\nc = a*a + b*b\nMath.sqrt c\n[a, b, c]\nend";
    let unit = parse_source(source).unwrap();
    let reparsed = parse_source(&unit.unparse()).unwrap();
    assert_eq!(unit, reparsed);
}

#[test]
fn snapshots_expose_structure() {
    let unit = parse_source("x = 3").unwrap();
    let snapshot = unit.snapshot();
    assert!(snapshot["stmts"][0]["Match"].is_object());
}
