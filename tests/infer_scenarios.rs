//! End-to-end inference scenarios: source text in, principal type out.

use skein::{infer_source, Interner, Options};

fn infer(source: &str) -> Result<Vec<String>, String> {
    let mut interner = Interner::new();
    infer_source(source, &mut interner, Options::default())
}

fn principal(source: &str) -> String {
    let mut types = infer(source)
        .unwrap_or_else(|err| panic!("expected {:?} to typecheck:\n{}", source, err));
    assert_eq!(types.len(), 1, "expected one top-level expression in {:?}", source);
    types.pop().unwrap()
}

fn rejected(source: &str) -> String {
    match infer(source) {
        Ok(types) => panic!("expected {:?} to be rejected, got {:?}", source, types),
        Err(rendered) => rendered,
    }
}

// ---------------------------------------------------------------------
// Positive scenarios
// ---------------------------------------------------------------------

#[test]
fn identity_function() {
    assert_eq!(principal("fun (x) {x}"), "'a -> 'a");
}

#[test]
fn condition_pins_parameter_to_bool() {
    assert_eq!(principal("fun (x) {if x then 3 else 4}"), "bool -> int");
}

#[test]
fn if_widens_int_to_float() {
    assert_eq!(principal("if true then 4 else 4.5"), "float");
}

#[test]
fn if_widens_to_complex() {
    assert_eq!(principal("if false then 4.5+3i else 4.5"), "complex");
}

#[test]
fn let_bound_identity_self_applies() {
    assert_eq!(principal("let id = fun(a){a}; let g = id(id); g"), "'a -> 'a");
}

#[test]
fn applied_lambda_with_int_operator() {
    assert_eq!(principal("fun(x){x+1}(3)"), "int");
}

#[test]
fn int_argument_widens_for_float_operator() {
    assert_eq!(principal("fun(x){x +. 1.5}(3)"), "float");
}

#[test]
fn recursive_fib_is_int_to_int() {
    assert_eq!(
        principal("let fib = fun(n){ if n < 2 then n else fib(n-1) + fib(n-2) }; fib"),
        "int -> int"
    );
}

#[test]
fn annotated_parameters_chain() {
    assert_eq!(
        principal("fun(x:int,y:int){if x = 2 then y else 0}"),
        "int -> int -> int"
    );
}

// ---------------------------------------------------------------------
// Negative scenarios
// ---------------------------------------------------------------------

#[test]
fn operator_rejects_string_operand() {
    let rendered = rejected("2 + \"ciao\"");
    assert!(rendered.contains("type error"), "got: {}", rendered);
}

#[test]
fn inferred_int_parameter_rejects_string_argument() {
    rejected("fun(x){x+1}(\"ciao\")");
}

#[test]
fn self_application_is_rejected() {
    rejected("fun(x){x(x,())}");
}

#[test]
fn numeric_subtyping_does_not_narrow() {
    rejected("fun(x){x+1}(3.5)");
}

// ---------------------------------------------------------------------
// Further coverage in the same style
// ---------------------------------------------------------------------

#[test]
fn literal_types() {
    assert_eq!(principal("()"), "unit");
    assert_eq!(principal("true"), "bool");
    assert_eq!(principal("4"), "int");
    assert_eq!(principal("4.5"), "float");
    assert_eq!(principal("4.5+3.2e-2i"), "complex");
    assert_eq!(principal("\"ciao\""), "string");
    assert_eq!(principal("'c'"), "rune");
}

#[test]
fn logical_and_prefix_operators() {
    assert_eq!(principal("true && false"), "bool");
    assert_eq!(principal("!true"), "bool");
    assert_eq!(principal("-3"), "int");
    assert_eq!(principal("-.3.5"), "float");
    assert_eq!(principal("fun(x){x || true}"), "bool -> bool");
}

#[test]
fn comparisons_return_bool() {
    assert_eq!(principal("1 < 2"), "bool");
    assert_eq!(principal("1 != 2"), "bool");
    assert_eq!(principal("fun(x){x = 2}"), "int -> bool");
}

#[test]
fn comparison_widens_operands() {
    // int and float have a common supertype, so mixed comparison is fine.
    assert_eq!(principal("2 < 3.5"), "bool");
}

#[test]
fn annotation_constrains_and_returns() {
    assert_eq!(principal("3 : float"), "float");
    assert_eq!(principal("fun(a){a} : int -> int"), "int -> int");
    rejected("3.5 : int");
}

#[test]
fn explicit_return_type_is_enforced() {
    assert_eq!(principal("fun(x) int {x}"), "int -> int");
    rejected("fun(x) int {x +. 1.0}");
}

#[test]
fn let_without_body_is_unit() {
    assert_eq!(principal("let x = 1;"), "unit");
}

#[test]
fn let_and_bindings_are_parallel() {
    assert_eq!(principal("let x = 1 and y = 2.5; x +. y"), "float");
}

#[test]
fn nested_lets_shadow() {
    assert_eq!(principal("let x = 1; let x = true; x"), "bool");
}

#[test]
fn let_polymorphism_allows_two_instantiations() {
    assert_eq!(
        principal("let id = fun(a){a}; if id(true) then id(3) else id(4)"),
        "int"
    );
}

#[test]
fn lambda_parameters_stay_monomorphic() {
    // The lambda-bound f is a flexible monotype, so it cannot be used at
    // two different types in one body.
    rejected("fun(f){ if f(true) then f(3) else f(4) }");
}

#[test]
fn multiple_statements_type_independently() {
    let types = infer("1; 4.5; true").unwrap();
    assert_eq!(types, vec!["int", "float", "bool"]);
}

#[test]
fn application_of_non_function_fails() {
    rejected("3(4)");
}

#[test]
fn branch_mismatch_reports_both_types() {
    let rendered = rejected("if true then \"a\" else 3");
    assert!(rendered.contains("then branch"), "got: {}", rendered);
}

#[test]
fn condition_must_be_bool() {
    rejected("if 1 then 2 else 3");
}

#[test]
fn cons_operator_has_no_typing_rule() {
    rejected("1 :: 2");
}

#[test]
fn unbound_identifier_in_unreached_branch_still_fails() {
    rejected("if true then 1 else ghost");
}

#[test]
fn nullary_function_takes_unit() {
    assert_eq!(principal("fun(){3}()"), "int");
}

#[test]
fn higher_order_composition() {
    assert_eq!(
        principal("fun(f, x){ f(f(x)) }"),
        "('a -> 'a) -> 'a -> 'a"
    );
}

#[test]
fn curried_application_one_argument_at_a_time() {
    assert_eq!(principal("fun(x, y){ x + y }(1)(2)"), "int");
    assert_eq!(principal("fun(x, y){ x + y }(1, 2)"), "int");
}
