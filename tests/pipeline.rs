use minic_obfuscator::ast::Program;
use minic_obfuscator::emitter::emit_program;
use minic_obfuscator::pipeline::{self, StageConfig};
use pretty_assertions::assert_eq;
use test_utils::contains_ident;

const LINEAR: &str = r#"
int main() {
    int x = 4;
    int y = 7;
    printf("%d", x + y);
    return 0;
}
"#;

#[test]
fn empty_pipeline_is_the_identity() {
    let original = Program::parse(LINEAR).expect("parse failed");

    let mut program = original.clone();
    pipeline::obfuscate(&mut program, &StageConfig::default()).expect("pipeline failed");
    assert_eq!(original, program);

    pipeline::deobfuscate(&mut program, &StageConfig::default()).expect("pipeline failed");
    assert_eq!(original, program);
}

#[test]
fn full_obfuscation_leaves_a_parsable_program() {
    let mut program = Program::parse(LINEAR).expect("parse failed");
    pipeline::obfuscate(&mut program, &StageConfig::all()).expect("pipeline failed");

    let emitted = emit_program(&program);
    assert!(emitted.contains("unused_"));
    assert!(emitted.contains("switch (state)"));
    assert!(!contains_ident(&emitted, "x"));

    Program::parse(&emitted).expect("obfuscated output failed to parse");
}

#[test]
fn full_round_trip_sheds_every_artifact() {
    let mut program = Program::parse(LINEAR).expect("parse failed");
    pipeline::obfuscate(&mut program, &StageConfig::all()).expect("pipeline failed");
    pipeline::deobfuscate(&mut program, &StageConfig::all()).expect("pipeline failed");

    let emitted = emit_program(&program);
    assert!(!emitted.contains("unused"));
    assert!(!emitted.contains("Unreachable"));
    assert!(!emitted.contains("switch"));
    assert!(!emitted.contains("goto"));
    assert!(!emitted.contains("dispatcher"));
    assert!(emitted.contains("printf(\"%d\""));

    let cleaned = Program::parse(&emitted).expect("cleaned output failed to parse");
    assert_eq!(cleaned.functions.len(), 1);
}

#[test]
fn round_trip_preserves_the_call_structure() {
    let src = r#"
int add(int x, int y) {
    int r = x + y;
    return r;
}

int main() {
    int t = add(2, 3);
    printf("%d", t);
    return 0;
}
"#;
    let mut program = Program::parse(src).expect("parse failed");
    pipeline::obfuscate(&mut program, &StageConfig::all()).expect("pipeline failed");
    pipeline::deobfuscate(&mut program, &StageConfig::all()).expect("pipeline failed");

    let emitted = emit_program(&program);
    assert_eq!(program.functions.len(), 2);
    assert!(program.function("main").is_some());
    assert!(emitted.contains("printf(\"%d\""));
    Program::parse(&emitted).expect("cleaned output failed to parse");
}
