use std::fs;

use algorithmique::{
    error::ExecutionError,
    execute,
    execution::ExecutionResult,
    interpreter::value::core::Value,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, (code, inputs)) in extract_algo_blocks(&content).into_iter().enumerate() {
            count += 1;
            let result = execute(&code, &inputs);
            if let Some(e) = result.error {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

/// Collects the ```` ```algo ```` blocks of a page, with the inputs listed in
/// the info string as `inputs=a,b,c`.
fn extract_algo_blocks(content: &str) -> Vec<(String, Vec<String>)> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();
    let mut inputs = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if let Some(info) = trimmed.strip_prefix("```algo") {
            inside = true;
            buf.clear();
            inputs = info.split_whitespace()
                         .find_map(|word| word.strip_prefix("inputs="))
                         .map(|list| list.split(',').map(ToString::to_string).collect())
                         .unwrap_or_default();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push((buf.clone(), inputs.clone()));
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn run(src: &str, inputs: &[&str]) -> ExecutionResult {
    let inputs = inputs.iter().map(ToString::to_string).collect::<Vec<_>>();
    execute(src, &inputs)
}

fn assert_output(src: &str, inputs: &[&str], expected: &str) {
    let result = run(src, inputs);
    if let Some(e) = &result.error {
        panic!("Program failed: {e}\n{src}");
    }
    assert_eq!(result.output, expected);
}

fn assert_failure(src: &str, inputs: &[&str], kind: &str) -> ExecutionError {
    let Some(error) = run(src, inputs).error else {
        panic!("Program succeeded but was expected to fail with {kind}:\n{src}");
    };
    assert_eq!(error.kind(), kind, "{error}");
    error
}

#[test]
fn sum_of_two_inputs() {
    let src = "\
ALGORITHME Somme
VARIABLES
    a, b, s : ENTIER
DEBUT
    LIRE(a)
    LIRE(b)
    s <- a + b
    ECRIRE(\"La somme est : \", s)
FIN
";
    let result = run(src, &["4", "5"]);

    assert_eq!(result.error, None);
    assert_eq!(result.output, "La somme est : 9\n");
    assert_eq!(result.variables.get("s"), Some(&Value::Integer(9)));
}

#[test]
fn factorial_with_a_for_loop() {
    let src = "\
ALGORITHME Factorielle
VARIABLES
    n, i, f : ENTIER
DEBUT
    LIRE(n)
    f <- 1
    POUR i DE 1 A n FAIRE
        f <- f * i
    FINPOUR
    ECRIRE(f)
FIN
";
    assert_output(src, &["5"], "120\n");
    assert_output(src, &["0"], "1\n");
}

#[test]
fn recursive_function() {
    let src = "\
ALGORITHME Recursion
FONCTION Fact(n : ENTIER) : ENTIER
DEBUT
    SI n <= 1 ALORS
        RETOURNER 1
    FINSI
    RETOURNER n * Fact(n - 1)
FIN
VARIABLES
    r : ENTIER
DEBUT
    r <- Fact(10)
    ECRIRE(r)
FIN
";
    assert_output(src, &[], "3628800\n");
}

#[test]
fn real_arithmetic_and_formatting() {
    assert_output("ECRIRE(10 / 4)", &[], "2.5\n");
    assert_output("ECRIRE(7 / 7)", &[], "1.0\n");
    assert_output("ECRIRE(0.1 + 0.2)", &[], "0.3\n");
    assert_output("ECRIRE(2 * 1.5)", &[], "3.0\n");
    assert_output("ECRIRE(1 / 3)", &[], "0.3333333333\n");
}

#[test]
fn real_input_round_trip() {
    let src = "VARIABLES x : REEL\nDEBUT\nLIRE(x)\nECRIRE(x)\nFIN";

    assert_output(src, &["3.50"], "3.5\n");
    assert_output(src, &["3,50"], "3.5\n");
    assert_output(src, &["4"], "4.0\n");
}

#[test]
fn integer_division_and_modulo_are_floored() {
    assert_output("ECRIRE(7 DIV 2, \" \", 7 MOD 2)", &[], "3 1\n");
    assert_output("ECRIRE(-7 DIV 2, \" \", -7 MOD 3)", &[], "-4 2\n");
    assert_output("ECRIRE(7 MOD -3)", &[], "-2\n");
}

#[test]
fn booleans_and_comparisons() {
    assert_output("ECRIRE(3 > 2, \" \", NON VRAI)", &[], "VRAI FAUX\n");
    assert_output("ECRIRE(NON (1 > 2))", &[], "VRAI\n");
    assert_output("ECRIRE(2 = 2.0, \" \", 2 <> 3)", &[], "VRAI VRAI\n");
    assert_output("ECRIRE(\"abc\" < \"abd\", \" \", 'a' = \"a\")", &[], "VRAI VRAI\n");
    assert_output("ECRIRE(FAUX < VRAI)", &[], "VRAI\n");
}

#[test]
fn logical_operators_short_circuit() {
    let src = "\
VARIABLES x : ENTIER
DEBUT
    x <- 0
    SI x <> 0 ET 10 / x > 1 ALORS
        ECRIRE(\"grand\")
    SINON
        ECRIRE(\"zero\")
    FINSI
    SI x = 0 OU 10 / x > 1 ALORS
        ECRIRE(\"ok\")
    FINSI
FIN
";
    assert_output(src, &[], "zero\nok\n");
}

#[test]
fn text_operations() {
    assert_output("ECRIRE(\"Bon\" + \"jour\")", &[], "Bonjour\n");
    assert_output("ECRIRE('a' + \"b\")", &[], "ab\n");
    assert_output("ECRIRE(LONGUEUR(\"été\"))", &[], "3\n");
    assert_failure("ECRIRE(\"a\" + 1)", &[], "TypeMismatch");
}

#[test]
fn builtin_functions() {
    assert_output("ECRIRE(ABS(-3), \" \", ABS(-2.5))", &[], "3 2.5\n");
    assert_output("ECRIRE(RACINE(16))", &[], "4.0\n");
    assert_output("ECRIRE(PUISSANCE(2, 10), \" \", PUISSANCE(2.0, -1))", &[], "1024 0.5\n");
    assert_output("ECRIRE(CARRE(7))", &[], "49\n");
    assert_output("ECRIRE(ENT(-3.7), \" \", ARRONDI(2.5))", &[], "-3 3\n");

    assert_failure("ECRIRE(RACINE(-1))", &[], "DomainError");
    assert_failure("ECRIRE(PUISSANCE(2, -1))", &[], "DomainError");
    assert_failure("ECRIRE(RACINE(1, 2))", &[], "ArityError");
    assert_failure("ECRIRE(RACINE(\"neuf\"))", &[], "TypeMismatch");
    assert_failure("ECRIRE(PUISSANCE(2, 1.5))", &[], "TypeMismatch");
    assert_failure("ECRIRE(Inconnue(1))", &[], "UnknownFunction");
}

#[test]
fn conditionals_nest() {
    let src = "\
VARIABLES n : ENTIER
DEBUT
    LIRE(n)
    SI n < 0 ALORS
        ECRIRE(\"negatif\")
    SINON
        SI n = 0 ALORS
            ECRIRE(\"nul\")
        SINON
            ECRIRE(\"positif\")
        FINSI
    FINSI
FIN
";
    assert_output(src, &["-4"], "negatif\n");
    assert_output(src, &["0"], "nul\n");
    assert_output(src, &["12"], "positif\n");
}

#[test]
fn for_loops() {
    let down = "\
VARIABLES i : ENTIER
DEBUT
    POUR i DE 10 A 1 PAS -3 FAIRE
        ECRIRE(i)
    FINPOUR
FIN
";
    assert_output(down, &[], "10\n7\n4\n1\n");

    let empty = "VARIABLES i : ENTIER\nDEBUT\nPOUR i DE 5 A 1 FAIRE\nECRIRE(i)\nFINPOUR\nFIN";
    assert_output(empty, &[], "");

    let reassigned = "\
VARIABLES i : ENTIER
DEBUT
    POUR i DE 1 A 3 FAIRE
        ECRIRE(i)
        i <- 10
    FINPOUR
FIN
";
    let result = run(reassigned, &[]);
    assert_eq!(result.output, "1\n2\n3\n");
    assert_eq!(result.variables.get("i"), Some(&Value::Integer(10)));

    let moving_bound = "\
VARIABLES i, n : ENTIER
DEBUT
    n <- 3
    POUR i DE 1 A n FAIRE
        n <- n + 1
        ECRIRE(i)
    FINPOUR
FIN
";
    let result = run(moving_bound, &[]);
    assert_eq!(result.error, None);
    assert_eq!(result.output, "1\n2\n3\n");
    assert_eq!(result.variables.get("n"), Some(&Value::Integer(6)));

    let zero_step = "VARIABLES i : ENTIER\nDEBUT\nPOUR i DE 1 A 3 PAS 0 FAIRE\nFINPOUR\nFIN";
    assert_failure(zero_step, &[], "InvalidLoopStep");

    let real_variable = "VARIABLES x : REEL\nDEBUT\nPOUR x DE 1 A 3 FAIRE\nFINPOUR\nFIN";
    assert_failure(real_variable, &[], "TypeMismatch");
}

#[test]
fn while_and_repeat_loops() {
    let while_loop = "\
VARIABLES n, c : ENTIER
DEBUT
    n <- 1000
    c <- 0
    TANT QUE n > 1 FAIRE
        n <- n DIV 2
        c <- c + 1
    FINTANTQUE
    ECRIRE(c)
FIN
";
    assert_output(while_loop, &[], "9\n");

    let repeat = "\
VARIABLES i : ENTIER
DEBUT
    i <- 0
    REPETER
        i <- i + 1
    JUSQU'A i >= 3
    ECRIRE(i)
FIN
";
    assert_output(repeat, &[], "3\n");

    let at_least_once = "VARIABLES i : ENTIER\nDEBUT\ni <- 10\nREPETER\ni <- i + 1\nJUSQU'A VRAI\nECRIRE(i)\nFIN";
    assert_output(at_least_once, &[], "11\n");
}

#[test]
fn procedures_and_functions() {
    let src = "\
ALGORITHME Routines
PROCEDURE Saluer(nom : CHAINE)
DEBUT
    ECRIRE(\"Bonjour \", nom)
FIN
FONCTION Moitie(x : REEL) : REEL
DEBUT
    RETOURNER x / 2
FIN
FONCTION PremierMultiple(n : ENTIER) : ENTIER
VARIABLES i : ENTIER
DEBUT
    POUR i DE 1 A 100 FAIRE
        SI i MOD n = 0 ALORS
            RETOURNER i
        FINSI
    FINPOUR
    RETOURNER -1
FIN
DEBUT
    Saluer(\"Ada\")
    ECRIRE(Moitie(3))
    ECRIRE(PremierMultiple(7))
FIN
";
    assert_output(src, &[], "Bonjour Ada\n1.5\n7\n");
}

#[test]
fn routines_see_constants_but_not_variables() {
    let constants = "\
ALGORITHME Portee
CONSTANTES
    TAUX = 2
VARIABLES
    x : ENTIER
FONCTION Double(n : ENTIER) : ENTIER
DEBUT
    RETOURNER n * TAUX
FIN
DEBUT
    x <- Double(4)
    ECRIRE(x)
FIN
";
    assert_output(constants, &[], "8\n");

    let variables = "\
ALGORITHME Portee
VARIABLES
    x : ENTIER
PROCEDURE Montrer()
DEBUT
    ECRIRE(x)
FIN
DEBUT
    x <- 1
    Montrer()
FIN
";
    assert_failure(variables, &[], "UndeclaredVariable");
}

#[test]
fn routine_errors() {
    let procedure_as_value = "\
PROCEDURE P()
DEBUT
    ECRIRE(1)
FIN
VARIABLES x : ENTIER
x <- P()
";
    assert_failure(procedure_as_value, &[], "NoReturnValue");

    let missing_return = "\
FONCTION F(n : ENTIER) : ENTIER
DEBUT
    SI n > 0 ALORS
        RETOURNER n
    FINSI
FIN
ECRIRE(F(1))
ECRIRE(F(0))
";
    let result = run(missing_return, &[]);
    assert_eq!(result.output, "1\n");
    assert_eq!(result.error.map(|e| e.kind()), Some("MissingReturn"));

    let arity = "FONCTION F(n : ENTIER) : ENTIER\nDEBUT\nRETOURNER n\nFIN\nECRIRE(F(1, 2))";
    assert_failure(arity, &[], "ArityError");

    let twice = "PROCEDURE P()\nFIN\nPROCEDURE P()\nFIN\nP()";
    assert_failure(twice, &[], "FunctionAlreadyDefined");
}

#[test]
fn unbounded_recursion_is_stopped() {
    let src = "\
FONCTION F(n : ENTIER) : ENTIER
DEBUT
    RETOURNER F(n + 1)
FIN
ECRIRE(F(0))
";
    assert_failure(src, &[], "UnboundedRecursion");
}

#[test]
fn variable_errors() {
    assert_failure("y <- 3", &[], "UndeclaredVariable");
    assert_failure("VARIABLES x : ENTIER\nDEBUT\nECRIRE(x)\nFIN", &[], "UninitializedVariable");
    assert_failure("VARIABLES x : ENTIER\nDEBUT\nx <- 2.5\nFIN", &[], "TypeMismatch");
    assert_failure("VARIABLES x : ENTIER\nx : REEL\nDEBUT\nFIN", &[], "AlreadyDeclared");
    assert_failure("CONSTANTES PI = 3.14\nDEBUT\nPI <- 3\nFIN", &[], "ConstantAssignment");
    assert_failure("VARIABLES x : ENTIER\nDEBUT\nx <- 9223372036854775807 + 1\nFIN",
                   &[],
                   "Overflow");
}

#[test]
fn reading_inputs() {
    let src = "VARIABLES b : BOOLEEN\nc : CARACTERE\nDEBUT\nLIRE(b, c)\nECRIRE(b, c)\nFIN";
    assert_output(src, &["oui", "z"], "VRAIz\n");

    assert_failure("VARIABLES n : ENTIER\nDEBUT\nLIRE(n)\nFIN", &["abc"], "TypeMismatch");
    assert_failure("VARIABLES n : ENTIER\nDEBUT\nLIRE(n)\nFIN", &[], "InputExhausted");
}

#[test]
fn bare_scripts() {
    assert_output("ENTIER x\nx <- 5\nECRIRE(x)", &[], "5\n");
    assert_output("x : ENTIER\nx = 2; ECRIRE \"x = \", x", &[], "x = 2\n");

    let result = run("x <- 5\nECRIRE(x)\nx : ENTIER", &[]);
    assert_eq!(result.output, "");
    assert_eq!(result.error.map(|e| (e.kind(), e.line())), Some(("ParseError", Some(3))));
}

#[test]
fn letter_case_is_ignored() {
    let src = "\
Algorithme VerificationAge
Variables: age : Entier
Debut
    Ecrire(\"Entrez votre age:\")
    Lire(age)
    Si age >= 18 Alors
        Ecrire(\"Vous etes majeur\")
    Sinon
        Ecrire(\"Vous etes mineur\")
    Fin Si
Fin
";
    assert_output(src, &["20"], "Entrez votre age:\nVous etes majeur\n");
    assert_output(src, &["12"], "Entrez votre age:\nVous etes mineur\n");

    let names = "\
VARIABLES Total, i : ENTIER
FONCTION Double(n : ENTIER) : ENTIER
DEBUT
    RETOURNER N * 2
FIN
DEBUT
    total <- 0
    pour i de 1 A 3 faire
        TOTAL <- total + double(i)
    fin pour
    ecrire(Total, \" \", racine(16))
FIN
";
    let result = run(names, &[]);
    assert_eq!(result.error, None);
    assert_eq!(result.output, "12 4.0\n");
    let declared = result.variables.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();
    assert_eq!(declared, vec!["Total", "i"]);
    assert_eq!(result.variables.get("total"), Some(&Value::Integer(12)));

    assert_failure("VARIABLES x, X : ENTIER\nDEBUT\nFIN", &[], "AlreadyDeclared");
    assert_failure("VARIABLES racine : ENTIER\nDEBUT\nFIN", &[], "ParseError");
}

#[test]
fn syntax_errors() {
    let unclosed = "DEBUT\n    SI VRAI ALORS\n        ECRIRE(1)\nFIN";
    let error = assert_failure(unclosed, &[], "ParseError");
    assert_eq!(error.line(), Some(4));

    assert_failure("VARIABLES RACINE : ENTIER\nDEBUT\nFIN", &[], "ParseError");
    assert_failure("DEBUT\nRETOURNER 1\nFIN", &[], "ParseError");
    assert_failure("DEBUT\nFIN\nECRIRE(1)", &[], "ParseError");

    let error = assert_failure("x <- 1 @", &[], "LexError");
    assert_eq!((error.line(), error.column()), (Some(1), Some(8)));
}

#[test]
fn empty_program_is_rejected() {
    let error = assert_failure("", &[], "ParseError");
    assert_eq!(error.to_string(), "ParseError: The program is empty.");

    assert_failure("  \n\n  ", &[], "ParseError");
}

#[test]
fn example_works() {
    let contents = fs::read_to_string("tests/example.algo").unwrap();
    let result = run(&contents, &["3", "12", "7", "20"]);

    assert_eq!(result.error, None);
    assert_eq!(result.output,
               "Moyenne : 13.0\nMaximum : 20\nPremier ? VRAI\nPGCD(12, 20) = 4\n");
}
