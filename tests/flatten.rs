use minic_obfuscator::ast::Program;
use minic_obfuscator::emitter::emit_program;
use minic_obfuscator::pipeline::{self, StageConfig};
use pretty_assertions::assert_eq;
use test_utils::{contains_ident, normalized};

fn control_only() -> StageConfig {
    StageConfig {
        control: true,
        ..StageConfig::default()
    }
}

const LINEAR: &str = r#"
int main() {
    int a = 1;
    int b = 2;
    printf("%d", a + b);
    return 0;
}
"#;

#[test]
fn flattening_builds_the_dispatcher_skeleton() {
    let mut program = Program::parse(LINEAR).expect("parse failed");
    pipeline::obfuscate(&mut program, &control_only()).expect("pipeline failed");

    let emitted = emit_program(&program);
    assert!(contains_ident(&emitted, "state"));
    assert!(emitted.contains("dispatcher:"));
    assert!(emitted.contains("switch (state)"));
    assert!(emitted.contains("goto dispatcher;"));
    assert!(emitted.contains("L_end"));

    // the dispatcher output is still a valid program
    Program::parse(&emitted).expect("flattened output failed to parse");
}

#[test]
fn unflattening_reconstructs_a_linear_body() {
    let mut program = Program::parse(LINEAR).expect("parse failed");
    pipeline::obfuscate(&mut program, &control_only()).expect("pipeline failed");
    pipeline::deobfuscate(&mut program, &control_only()).expect("pipeline failed");

    let emitted = emit_program(&program);
    assert!(!emitted.contains("switch"));
    assert!(!emitted.contains("goto"));
    assert!(!contains_ident(&emitted, "state"));

    // declarations are split from their initializers by the hoisting, but
    // the statement order is intact
    let expected = Program::parse(
        "int main() { int a; int b; a = 1; b = 2; printf(\"%d\", a + b); return 0; }",
    )
    .expect("parse failed");
    assert_eq!(expected, program);
}

#[test]
fn branching_dispatchers_are_left_flattened() {
    let src = r#"
int main() {
    int i = 0;
    while (i < 3) {
        i = i + 1;
    }
    printf("%d", i);
    return 0;
}
"#;
    let mut program = Program::parse(src).expect("parse failed");
    pipeline::obfuscate(&mut program, &control_only()).expect("pipeline failed");
    let flattened = emit_program(&program);

    // the chain is not linear, so reconstruction declines to touch it
    pipeline::deobfuscate(&mut program, &control_only()).expect("pipeline failed");
    assert_eq!(normalized(&flattened), normalized(&emit_program(&program)));
    assert!(emit_program(&program).contains("switch (state)"));
}

#[test]
fn functions_with_gotos_are_not_flattened() {
    let src = r#"
int main() {
    int a = 1;
top:
    printf("%d", a);
    goto done;
done:
    return 0;
}
"#;
    let original = Program::parse(src).expect("parse failed");
    let mut program = original.clone();
    pipeline::obfuscate(&mut program, &control_only()).expect("pipeline failed");

    assert_eq!(original, program);
}
