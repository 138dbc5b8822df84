use minic_obfuscator::ast::{BinaryOp, Expression, Program, Statement};
use minic_obfuscator::pipeline::{self, StageConfig};
use pretty_assertions::assert_eq;

fn expr_only() -> StageConfig {
    StageConfig {
        expr: true,
        ..StageConfig::default()
    }
}

fn first_init(program: &Program, function: &str, index: usize) -> Expression {
    let function = program.function(function).expect("function missing");
    let Statement::VarDecl(decl) = &function.body[index] else {
        panic!("expected declaration at index {index}");
    };
    decl.init.clone().expect("declaration without initializer")
}

#[test]
fn folds_additive_identity_in_declarations() {
    let mut program =
        Program::parse("int main() { int x = 2 + 0; printf(\"%d\", x); return 0; }")
            .expect("parse failed");
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    assert_eq!(first_init(&program, "main", 0), Expression::int(2));
}

#[test]
fn removes_double_negation() {
    let mut program = Program::parse(
        "int main() { int a = 1; int b = 2; bool r = !!(a < b); printf(\"%d\", r); return 0; }",
    )
    .expect("parse failed");
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    let init = first_init(&program, "main", 2);
    let Expression::Binary(binary) = init else {
        panic!("expected comparison to survive");
    };
    assert_eq!(binary.op, BinaryOp::Lt);
}

#[test]
fn rewrites_subtraction_of_negation() {
    let mut program =
        Program::parse("int main() { int a = 1; int b = 2; int c = a - (-b); return 0; }")
            .expect("parse failed");
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    let init = first_init(&program, "main", 2);
    let Expression::Binary(binary) = init else {
        panic!("expected binary initializer");
    };
    assert_eq!(binary.op, BinaryOp::Add);
}

#[test]
fn folds_literal_arithmetic_bottom_up() {
    let mut program =
        Program::parse("int main() { int x = 2 * 3 + 4; return 0; }").expect("parse failed");
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    assert_eq!(first_init(&program, "main", 0), Expression::int(10));
}

#[test]
fn keeps_impure_multiplication_by_zero() {
    let mut program = Program::parse(
        "int f() { int r = 1; return r; } int main() { int c = f() * 0; return 0; }",
    )
    .expect("parse failed");
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    let init = first_init(&program, "main", 0);
    assert!(matches!(init, Expression::Binary(_)));
}

#[test]
fn eliminates_pure_multiplication_by_zero() {
    let mut program =
        Program::parse("int main() { int a = 3; int c = a * 0; return 0; }").expect("parse failed");
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    assert_eq!(first_init(&program, "main", 1), Expression::int(0));
}

#[test]
fn simplifier_is_idempotent() {
    let mut program = Program::parse(
        "int main() { int a = 1; int b = a + 0; int c = !!(a < b); int d = b - (-a) - a; printf(\"%d\", c + d * 1); return 0; }",
    )
    .expect("parse failed");

    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");
    let once = program.clone();
    pipeline::deobfuscate(&mut program, &expr_only()).expect("pipeline failed");

    assert_eq!(once, program);
}
