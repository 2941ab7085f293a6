use std::time::Duration;

use algorithmique::{
    execute, execute_with_limits,
    execution::{Limits, Request},
    interpreter::value::core::Value,
};
use pretty_assertions::assert_eq;

fn inputs(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

const INFINITE: &str = "\
VARIABLES x : ENTIER
DEBUT
    x <- 0
    TANT QUE VRAI FAIRE
        x <- x + 1
    FINTANTQUE
FIN
";

#[test]
fn output_before_a_runtime_error_is_kept() {
    let src = "\
DEBUT
    ECRIRE(\"avant\")
    ECRIRE(10 / 0)
    ECRIRE(\"apres\")
FIN
";
    let result = execute(src, &[]);

    assert_eq!(result.output, "avant\n");
    let error = result.error.unwrap();
    assert_eq!(error.kind(), "DivisionByZero");
    assert_eq!(error.line(), Some(3));
    assert_eq!(error.to_string(), "DivisionByZero: Error on line 3: Division by zero.");
}

#[test]
fn infinite_loop_is_reported() {
    let result = execute(INFINITE, &[]);

    assert_eq!(result.error.map(|e| e.kind()), Some("InfiniteLoopDetected"));
}

#[test]
fn step_budget_is_configurable() {
    let src = "\
VARIABLES i, s : ENTIER
DEBUT
    s <- 0
    POUR i DE 1 A 50 FAIRE
        s <- s + i
    FINPOUR
    ECRIRE(s)
FIN
";
    let tight = Limits { max_steps: 10,
                         ..Limits::default() };
    let result = execute_with_limits(src, &[], &tight);
    assert_eq!(result.error.map(|e| e.kind()), Some("InfiniteLoopDetected"));

    let result = execute_with_limits(src, &[], &Limits::default());
    assert_eq!(result.error, None);
    assert_eq!(result.output, "1275\n");
}

#[test]
fn call_depth_is_configurable() {
    let src = "\
FONCTION Somme(n : ENTIER) : ENTIER
DEBUT
    SI n = 0 ALORS
        RETOURNER 0
    FINSI
    RETOURNER n + Somme(n - 1)
FIN
ECRIRE(Somme(100))
";
    let result = execute(src, &[]);
    assert_eq!(result.output, "5050\n");

    let shallow = Limits { max_call_depth: 50,
                           ..Limits::default() };
    let result = execute_with_limits(src, &[], &shallow);
    assert_eq!(result.error.map(|e| e.kind()), Some("UnboundedRecursion"));
}

#[test]
fn timeout_stops_a_long_run() {
    let limits = Limits { max_steps: usize::MAX,
                          max_call_depth: 1_000,
                          timeout: Some(Duration::from_millis(50)) };
    let result = execute_with_limits(INFINITE, &[], &limits);

    assert_eq!(result.error.map(|e| e.kind()), Some("Timeout"));
}

#[test]
fn runs_are_deterministic() {
    let src = "\
VARIABLES a, b : ENTIER
r : REEL
DEBUT
    LIRE(a, b)
    r <- a / b
    ECRIRE(a DIV b, \" \", a MOD b, \" \", r)
FIN
";
    let first = execute(src, &inputs(&["22", "7"]));
    let second = execute(src, &inputs(&["22", "7"]));

    assert_eq!(first, second);
    assert_eq!(first.output, "3 1 3.1428571429\n");
}

#[test]
fn extra_inputs_are_ignored() {
    let src = "VARIABLES n : ENTIER\nDEBUT\nLIRE(n)\nECRIRE(n)\nFIN";
    let result = execute(src, &inputs(&["1", "2", "3"]));

    assert_eq!(result.error, None);
    assert_eq!(result.output, "1\n");
}

#[test]
fn missing_input_names_the_variable() {
    let src = "VARIABLES a, b : ENTIER\nDEBUT\nLIRE(a)\nLIRE(b)\nFIN";
    let result = execute(src, &inputs(&["1"]));

    let error = result.error.unwrap();
    assert_eq!(error.kind(), "InputExhausted");
    assert_eq!(error.line(), Some(4));
    assert!(error.to_string().contains("LIRE(b)"), "{error}");
    assert_eq!(result.variables.get("a"), Some(&Value::Integer(1)));
    assert_eq!(result.variables.get("b"), Some(&Value::Uninitialized));
}

#[test]
fn snapshot_lists_constants_then_variables() {
    let src = "\
CONSTANTES
    PI = 3.14
    NOM = \"Ada\"
VARIABLES
    a, b : ENTIER
DEBUT
    a <- 1
FIN
";
    let result = execute(src, &[]);
    let names = result.variables.iter().map(|v| v.name.as_str()).collect::<Vec<_>>();

    assert_eq!(names, vec!["PI", "NOM", "a", "b"]);
    assert_eq!(result.variables.get("PI"), Some(&Value::Real(3.14)));
    assert_eq!(result.variables.get("a"), Some(&Value::Integer(1)));
    assert_eq!(result.variables.get("zzz"), None);
}

#[test]
fn response_serializes_in_declaration_order() {
    let src = "VARIABLES z : REEL\na : ENTIER\nDEBUT\nz <- 1\nECRIRE(z)\nFIN";
    let response = execute(src, &[]).to_response();

    assert_eq!(serde_json::to_string(&response).unwrap(),
               r#"{"output":"1.0\n","error":null,"variables":{"z":{"type":"REEL","value":"1.0"},"a":{"type":"ENTIER","value":null}}}"#);
}

#[test]
fn failed_response_carries_the_message() {
    let response = execute("", &[]).to_response();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["error"], "ParseError: The program is empty.");
    assert_eq!(json["output"], "");
    assert_eq!(json["variables"], serde_json::json!({}));
}

#[test]
fn requests_default_to_no_inputs() {
    let request: Request = serde_json::from_str(r#"{"source": "ECRIRE(1)"}"#).unwrap();
    assert!(request.inputs.is_empty());

    let result = execute(&request.source, &request.inputs);
    assert_eq!(result.output, "1\n");
}
