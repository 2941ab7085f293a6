use algorithmique::{
    ast::{BinaryOperator, Expr, LiteralValue, Program, RoutineKind, Statement, UnaryOperator},
    error::ParseError,
    interpreter::{lexer::tokenize, parser::core::parse},
};
use pretty_assertions::assert_eq;

fn parse_source(src: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(src).unwrap();
    parse(&tokens)
}

fn assigned_value(src: &str) -> Expr {
    let program = parse_source(src).unwrap();
    match program.statements.into_iter().next() {
        Some(Statement::Assignment { value, .. }) => value,
        other => panic!("Expected an assignment, found {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let Expr::BinaryOp { left, op, right, .. } = assigned_value("x <- 1 + 2 * 3") else {
        panic!("Expected a binary operation");
    };

    assert_eq!(op, BinaryOperator::Add);
    assert!(matches!(*left, Expr::Literal { value: LiteralValue::Integer(1), .. }));
    assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::Mul, .. }));
}

#[test]
fn comparison_binds_tighter_than_logic() {
    let Expr::BinaryOp { left, op, right, .. } = assigned_value("b <- x < 1 OU y > 2 ET z") else {
        panic!("Expected a binary operation");
    };

    assert_eq!(op, BinaryOperator::Or);
    assert!(matches!(*left, Expr::BinaryOp { op: BinaryOperator::Less, .. }));
    assert!(matches!(*right, Expr::BinaryOp { op: BinaryOperator::And, .. }));
}

#[test]
fn negation_applies_to_its_operand_only() {
    let Expr::BinaryOp { left, op, .. } = assigned_value("b <- NON x = y") else {
        panic!("Expected a binary operation");
    };

    assert_eq!(op, BinaryOperator::Equal);
    assert!(matches!(*left, Expr::UnaryOp { op: UnaryOperator::Not, .. }));
}

#[test]
fn program_layout() {
    let src = "\
ALGORITHME Test
CONSTANTES
    N = 3
VARIABLES
    i, total : ENTIER
    REEL moyenne
PROCEDURE Avant()
DEBUT
    ECRIRE(\"avant\")
FIN
DEBUT
    Avant()
    total <- Apres(N)
FIN
FONCTION Apres(n : ENTIER) : ENTIER
DEBUT
    RETOURNER n + 1
FIN
";
    let program = parse_source(src).unwrap();

    assert_eq!(program.name.as_deref(), Some("Test"));
    assert_eq!(program.constants.len(), 1);
    assert_eq!(program.constants[0].name, "N");
    assert_eq!(program.declarations.len(), 2);
    assert_eq!(program.declarations[0].names, vec!["i".to_string(), "total".to_string()]);
    assert_eq!(program.declarations[1].names, vec!["moyenne".to_string()]);

    let routines = program.routines
                          .iter()
                          .map(|r| (r.name.as_str(), r.kind, r.params.len()))
                          .collect::<Vec<_>>();
    assert_eq!(routines,
               vec![("Avant", RoutineKind::Procedure, 0), ("Apres", RoutineKind::Function, 1)]);

    assert_eq!(program.statements.len(), 2);
    assert!(matches!(&program.statements[0], Statement::Call { name, .. } if name == "Avant"));
}

#[test]
fn reserved_names_are_rejected() {
    let error = parse_source("VARIABLES\n    RACINE : ENTIER\nDEBUT\nFIN").unwrap_err();
    assert_eq!(error,
               ParseError::IdentifierReserved { name: "RACINE".to_string(),
                                                line: 2, });

    let error = parse_source("FONCTION ABS(x : ENTIER) : ENTIER\nRETOURNER x\nFIN").unwrap_err();
    assert!(matches!(error, ParseError::IdentifierReserved { line: 1, .. }));
}

#[test]
fn return_must_match_its_routine() {
    let outside = parse_source("DEBUT\n    RETOURNER 1\nFIN").unwrap_err();
    assert!(matches!(outside, ParseError::InvalidReturn { line: 2, .. }));

    let procedure = parse_source("PROCEDURE P()\n    RETOURNER 1\nFIN").unwrap_err();
    assert!(matches!(procedure, ParseError::InvalidReturn { line: 2, .. }));

    let function = parse_source("FONCTION F() : ENTIER\n    RETOURNER\nFIN").unwrap_err();
    assert!(matches!(function, ParseError::InvalidReturn { line: 2, .. }));

    assert!(parse_source("PROCEDURE P()\n    RETOURNER\nFIN").is_ok());
}

#[test]
fn unclosed_program_reports_the_last_line() {
    let error = parse_source("DEBUT\n    x <- 1\n\n").unwrap_err();

    assert!(matches!(error, ParseError::UnexpectedEndOfInput { line: 2, .. }), "{error:?}");
}

#[test]
fn tokens_after_the_program_are_rejected() {
    let error = parse_source("DEBUT\nFIN\n\nx <- 1").unwrap_err();

    assert!(matches!(error, ParseError::UnexpectedTrailingTokens { line: 4, .. }));
}

#[test]
fn only_separators_is_an_empty_program() {
    assert_eq!(parse_source("\n ; \n").unwrap_err(), ParseError::EmptyProgram);
    assert_eq!(parse_source("// rien\n").unwrap_err(), ParseError::EmptyProgram);
}

#[test]
fn loops_and_conditionals() {
    let src = "\
POUR i DE 10 A 1 PAS -1 FAIRE
    SI i MOD 2 = 0 ALORS
        ECRIRE(i)
    SINON
        ECRIRE(\"-\")
    FIN SI
FIN POUR
TANT QUE VRAI
FINTANTQUE
REPETER
JUSQU'A VRAI
";
    let program = parse_source(src).unwrap();

    assert_eq!(program.statements.len(), 3);
    let Statement::For(for_loop) = &program.statements[0] else {
        panic!("Expected a POUR loop");
    };
    assert_eq!(for_loop.var, "i");
    assert!(for_loop.step.is_some());
    assert!(matches!(&for_loop.body[0],
                     Statement::If { else_branch: Some(branch), .. } if branch.len() == 1));
    assert!(matches!(program.statements[1], Statement::While { .. }));
    assert!(matches!(program.statements[2], Statement::Repeat { .. }));
}

#[test]
fn declarations_must_precede_script_statements() {
    let error = parse_source("x <- 5\nECRIRE(x)\nx : ENTIER").unwrap_err();
    assert_eq!(error, ParseError::LateDeclaration { line: 3 });

    let error = parse_source("ENTIER x\nx <- 1\nVARIABLES y : ENTIER").unwrap_err();
    assert_eq!(error, ParseError::LateDeclaration { line: 3 });

    let program = parse_source("x : ENTIER\nx <- 1\nPROCEDURE P()\nDEBUT\nFIN\nP()").unwrap();
    assert_eq!(program.routines.len(), 1);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn deep_nesting_is_rejected() {
    let parens = format!("ECRIRE({}1{})", "(".repeat(5_000), ")".repeat(5_000));
    assert!(matches!(parse_source(&parens),
                     Err(ParseError::NestingTooDeep { line: 1, .. })));

    let negations = format!("ECRIRE({}1)", "- ".repeat(5_000));
    assert!(matches!(parse_source(&negations), Err(ParseError::NestingTooDeep { .. })));

    let conditions = format!("{}ECRIRE(1)\n{}", "SI VRAI ALORS\n".repeat(5_000), "FINSI\n".repeat(5_000));
    assert!(matches!(parse_source(&conditions),
                     Err(ParseError::NestingTooDeep { line: 101, .. })));

    let operators = format!("ECRIRE(1{})", " + 1".repeat(5_000));
    assert!(matches!(parse_source(&operators), Err(ParseError::TooManyOperators { line: 1, .. })));
}

#[test]
fn moderate_nesting_is_accepted() {
    let parens = format!("ECRIRE({}1{})", "(".repeat(50), ")".repeat(50));
    assert!(parse_source(&parens).is_ok());

    let sequential = "SI VRAI ALORS\nFINSI\n".repeat(500);
    assert!(parse_source(&sequential).is_ok());

    let for_headers = format!("{}ECRIRE(i)\n{}",
                              "POUR i DE 1 JUSQU'A 2 FAIRE\n".repeat(60),
                              "FINPOUR\n".repeat(60));
    assert!(parse_source(&for_headers).is_ok());
}
