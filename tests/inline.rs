use minic_obfuscator::ast::{visit, Expression, Program, Statement};
use minic_obfuscator::emitter::emit_program;
use minic_obfuscator::pipeline::{self, StageConfig};
use pretty_assertions::assert_eq;

fn inline_only() -> StageConfig {
    StageConfig {
        inline: true,
        ..StageConfig::default()
    }
}

const ADD_SRC: &str = r#"
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

#[test]
fn inlining_removes_the_call_site() {
    let mut program = Program::parse(ADD_SRC).expect("parse failed");
    pipeline::obfuscate(&mut program, &inline_only()).expect("pipeline failed");

    let main = program.function("main").expect("no function 'main'");
    assert!(visit::called_names(&main.body).is_empty());

    // the callee body was materialized through parameter temporaries
    let emitted = emit_program(&program);
    assert!(emitted.contains("x_0"));
    assert!(emitted.contains("y_0"));
}

#[test]
fn reconstruction_restores_the_call() {
    let mut program = Program::parse(ADD_SRC).expect("parse failed");
    pipeline::obfuscate(&mut program, &inline_only()).expect("pipeline failed");
    pipeline::deobfuscate(&mut program, &inline_only()).expect("pipeline failed");

    let main = program.function("main").expect("no function 'main'");
    assert_eq!(visit::called_names(&main.body), vec!["add".to_owned()]);

    let call = main
        .body
        .iter()
        .find_map(|stmt| match stmt {
            Statement::Assignment(assign) => match &assign.value {
                Expression::Call(call) => Some(call),
                _ => None,
            },
            _ => None,
        })
        .expect("no reconstructed call");
    assert_eq!(call.name, "add");
    assert_eq!(call.args, vec![Expression::int(2), Expression::int(3)]);
}

#[test]
fn recursive_callees_are_never_inlined() {
    let src = r#"
int fac(int n) {
    int r = fac(n - 1);
    return r;
}

int main() {
    int t = fac(3);
    printf("%d", t);
    return 0;
}
"#;
    let original = Program::parse(src).expect("parse failed");
    let mut program = original.clone();
    pipeline::obfuscate(&mut program, &inline_only()).expect("pipeline failed");

    assert_eq!(original, program);
}

#[test]
fn side_effecting_arguments_are_evaluated_once() {
    let src = r#"
int add(int x, int y) {
    int r = x + y;
    return r;
}

int read_one() {
    int v = 1;
    return v;
}

int main() {
    int t = add(read_one(), 3);
    printf("%d", t);
    return 0;
}
"#;
    let mut program = Program::parse(src).expect("parse failed");
    pipeline::obfuscate(&mut program, &inline_only()).expect("pipeline failed");

    // the call argument lands in exactly one parameter temporary
    let main = program.function("main").expect("no function 'main'");
    let calls = visit::called_names(&main.body);
    assert_eq!(calls.iter().filter(|name| *name == "read_one").count(), 1);
}

#[test]
fn large_arity_callees_are_kept() {
    let src = r#"
int sum7(int a, int b, int c, int d, int e, int f, int g) {
    int r = a + b + c + d + e + f + g;
    return r;
}

int main() {
    int t = sum7(1, 2, 3, 4, 5, 6, 7);
    printf("%d", t);
    return 0;
}
"#;
    let original = Program::parse(src).expect("parse failed");
    let mut program = original.clone();
    pipeline::obfuscate(&mut program, &inline_only()).expect("pipeline failed");

    assert_eq!(original, program);
}
