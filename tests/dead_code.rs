use minic_obfuscator::ast::{Program, Statement};
use minic_obfuscator::emitter::emit_program;
use minic_obfuscator::pipeline::{self, StageConfig};
use pretty_assertions::assert_eq;
use test_utils::contains_ident;

fn dead_only() -> StageConfig {
    StageConfig {
        dead: true,
        ..StageConfig::default()
    }
}

const OBFUSCATED: &str = r#"
int main() {
    unused_q = 5;
    if (0) {
        printf("Unreachable");
    }
    printf("ok");
    return 0;
}
"#;

#[test]
fn strips_inert_constructs() {
    let mut program = Program::parse(OBFUSCATED).expect("parse failed");
    pipeline::deobfuscate(&mut program, &dead_only()).expect("pipeline failed");

    let main = program.function("main").expect("no function 'main'");
    assert_eq!(main.body.len(), 2);
    assert!(matches!(&main.body[0], Statement::Print(print) if print.format == "ok"));
    assert!(matches!(&main.body[1], Statement::Return(_)));
}

#[test]
fn removal_is_idempotent() {
    let mut program = Program::parse(OBFUSCATED).expect("parse failed");

    pipeline::deobfuscate(&mut program, &dead_only()).expect("pipeline failed");
    let once = program.clone();
    pipeline::deobfuscate(&mut program, &dead_only()).expect("pipeline failed");

    assert_eq!(once, program);
}

#[test]
fn insertion_leaves_the_contract_markers() {
    let mut program =
        Program::parse("int main() { printf(\"ok\"); return 0; }").expect("parse failed");
    pipeline::obfuscate(&mut program, &dead_only()).expect("pipeline failed");

    let emitted = emit_program(&program);
    assert!(emitted.contains("unused_"));
    assert!(emitted.contains("if (0)"));
    assert!(emitted.contains("Unreachable"));
}

#[test]
fn insertion_then_removal_restores_the_program() {
    let original = Program::parse("int main() { printf(\"ok\"); return 0; }").expect("parse failed");

    let mut program = original.clone();
    pipeline::obfuscate(&mut program, &dead_only()).expect("pipeline failed");
    pipeline::deobfuscate(&mut program, &dead_only()).expect("pipeline failed");

    assert_eq!(original, program);
}

#[test]
fn inserted_code_never_collides_with_existing_names() {
    let mut program = Program::parse(
        "int main() { int unused_0 = 1; printf(\"%d\", unused_0); return 0; }",
    )
    .expect("parse failed");
    pipeline::obfuscate(&mut program, &dead_only()).expect("pipeline failed");

    let emitted = emit_program(&program);
    // the pre-existing unused_0 keeps its meaning; fresh names differ
    assert!(contains_ident(&emitted, "unused_0"));
    assert!(contains_ident(&emitted, "unused_1"));
}
