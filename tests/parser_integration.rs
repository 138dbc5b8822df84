use minic_obfuscator::ast::{Program, Statement, TypeName};
use minic_obfuscator::emitter::emit_program;
use pretty_assertions::assert_eq;

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

const KITCHEN_SINK: &str = r#"
int main() {
    int i;
    int total = 0;
    bool flag = true;
    char c = 'x';
    scanf("%d", &i);
    for (i = 0; i < 10; i = i + 1) {
        total = total + i;
    }
    while (total > 100) {
        total = total - 1;
    }
    if (flag && (total != 3)) {
        printf("%d\n", total);
    } else {
        printf("none");
    }
    return 0;
}
"#;

const DISPATCHER: &str = r#"
int main() {
    int state = 0;
dispatcher:
    while (1) {
        switch (state) {
        case 0: goto L_0;
        case 1: goto L_end;
        }
    }
L_0:
    printf("hi");
    state = 1;
    goto dispatcher;
L_end:
    ;
    return 0;
}
"#;

#[test]
fn builds_the_expected_shape() {
    let program = Program::parse(ADD_SRC).expect("parse failed");
    assert_eq!(program.functions.len(), 2);

    let add = program.function("add").expect("no function 'add'");
    assert_eq!(add.return_type, TypeName::Int);
    assert_eq!(add.params.len(), 2);
    assert_eq!(add.params[0].name, "x");
    assert_eq!(add.params[1].name, "y");
    assert_eq!(add.body.len(), 2);

    let main = program.function("main").expect("no function 'main'");
    assert_eq!(main.body.len(), 3);
    assert!(matches!(&main.body[0], Statement::VarDecl(decl) if decl.name == "t"));
    assert!(matches!(&main.body[1], Statement::Print(print) if print.format == "%d"));
    assert!(matches!(&main.body[2], Statement::Return(_)));
}

#[test]
fn statement_level_assignments_are_normalized() {
    let program = Program::parse("int main() { int x; x = 5; return 0; }").expect("parse failed");
    let main = program.function("main").expect("no function 'main'");

    assert!(matches!(
        &main.body[1],
        Statement::Assignment(assign) if assign.target.name == "x"
    ));
}

#[test]
fn pretty_printed_output_reparses_to_the_same_tree() {
    for source in [ADD_SRC, KITCHEN_SINK, DISPATCHER] {
        let program = Program::parse(source).expect("parse failed");
        let emitted = emit_program(&program);
        let reparsed = Program::parse(&emitted)
            .unwrap_or_else(|error| panic!("emitted source failed to parse: {error}\n{emitted}"));
        assert_eq!(program, reparsed);
    }
}

#[test]
fn scan_targets_drop_the_address_sigil() {
    let program = Program::parse(KITCHEN_SINK).expect("parse failed");
    let main = program.function("main").expect("no function 'main'");

    let scan = main
        .body
        .iter()
        .find_map(|stmt| match stmt {
            Statement::Scan(scan) => Some(scan),
            _ => None,
        })
        .expect("no scanf statement");
    assert_eq!(scan.targets, vec!["i".to_owned()]);
}

#[test]
fn rejects_malformed_input() {
    assert!(Program::parse("int main() { int = 5; }").is_err());
    assert!(Program::parse("int main() {").is_err());
}
