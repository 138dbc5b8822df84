use crate::ast::{Block, Function, Statement, Switch};

use super::expression::escape_string;
use super::{Emit, EmitterContext};

impl Emit for Function {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        ctx.write_indent()?;
        ctx.write(&format!("{} {}(", self.return_type, self.name))?;

        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                ctx.write(", ")?;
            }
            ctx.write(&format!("{} {}", param.param_type, param.name))?;
        }

        ctx.write(") {")?;
        ctx.write_newline()?;

        ctx.indent();
        for statement in &self.body {
            statement.emit(ctx)?;
        }
        ctx.dedent();

        ctx.write_line("}")
    }
}

impl Emit for Statement {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        match self {
            Statement::VarDecl(decl) => {
                ctx.write_indent()?;
                ctx.write(&format!("{} {}", decl.var_type, decl.name))?;
                if let Some(init) = &decl.init {
                    ctx.write(" = ")?;
                    init.emit(ctx)?;
                }
                ctx.write(";")?;
                ctx.write_newline()
            }
            Statement::Assignment(assign) => {
                ctx.write_indent()?;
                ctx.write(&assign.target.name)?;
                ctx.write(" = ")?;
                assign.value.emit(ctx)?;
                ctx.write(";")?;
                ctx.write_newline()
            }
            Statement::Expression(stmt) => {
                ctx.write_indent()?;
                if let Some(expr) = &stmt.expr {
                    expr.emit(ctx)?;
                }
                ctx.write(";")?;
                ctx.write_newline()
            }
            Statement::Return(ret) => {
                ctx.write_indent()?;
                ctx.write("return")?;
                if let Some(value) = &ret.value {
                    ctx.write(" ")?;
                    value.emit(ctx)?;
                }
                ctx.write(";")?;
                ctx.write_newline()
            }
            Statement::If(stmt) => {
                ctx.write_indent()?;
                ctx.write("if (")?;
                stmt.condition.emit(ctx)?;
                ctx.write(")")?;
                ctx.write_newline()?;
                stmt.then_branch.emit(ctx)?;
                if let Some(else_branch) = &stmt.else_branch {
                    ctx.write_line("else")?;
                    else_branch.emit(ctx)?;
                }
                Ok(())
            }
            Statement::While(stmt) => {
                ctx.write_indent()?;
                ctx.write("while (")?;
                stmt.condition.emit(ctx)?;
                ctx.write(")")?;
                ctx.write_newline()?;
                stmt.body.emit(ctx)
            }
            Statement::For(stmt) => {
                ctx.write_indent()?;
                ctx.write("for (")?;
                if let Some(init) = &stmt.init {
                    init.emit(ctx)?;
                }
                ctx.write("; ")?;
                if let Some(cond) = &stmt.cond {
                    cond.emit(ctx)?;
                }
                ctx.write("; ")?;
                if let Some(update) = &stmt.update {
                    update.emit(ctx)?;
                }
                ctx.write(")")?;
                ctx.write_newline()?;
                stmt.body.emit(ctx)
            }
            Statement::Block(block) => block.emit(ctx),
            Statement::Print(print) => {
                ctx.write_indent()?;
                ctx.write(&format!("printf(\"{}\"", escape_string(&print.format)))?;
                for arg in &print.args {
                    ctx.write(", ")?;
                    arg.emit(ctx)?;
                }
                ctx.write(");")?;
                ctx.write_newline()
            }
            Statement::Scan(scan) => {
                ctx.write_indent()?;
                ctx.write(&format!("scanf(\"{}\"", escape_string(&scan.format)))?;
                for target in &scan.targets {
                    ctx.write(&format!(", &{target}"))?;
                }
                ctx.write(");")?;
                ctx.write_newline()
            }
            // labels sit one level shallower than the surrounding code
            Statement::Label(label) => {
                ctx.dedent();
                ctx.write_line(&format!("{}:", label.name))?;
                ctx.indent();
                Ok(())
            }
            Statement::Goto(goto) => ctx.write_line(&format!("goto {};", goto.label)),
            Statement::Switch(switch) => switch.emit(ctx),
        }
    }
}

impl Emit for Block {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        ctx.write_line("{")?;
        ctx.indent();
        for item in &self.items {
            item.emit(ctx)?;
        }
        ctx.dedent();
        ctx.write_line("}")
    }
}

impl Emit for Switch {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        ctx.write_indent()?;
        ctx.write("switch (")?;
        self.scrutinee.emit(ctx)?;
        ctx.write(") {")?;
        ctx.write_newline()?;

        ctx.indent();
        for case in &self.cases {
            ctx.write_indent()?;
            ctx.write("case ")?;
            case.value.emit(ctx)?;
            ctx.write(":")?;

            // the dispatcher shape is a single goto and stays on one line
            if let [Statement::Goto(goto)] = case.body.items.as_slice() {
                ctx.write(&format!(" goto {};", goto.label))?;
                ctx.write_newline()?;
            } else {
                ctx.write_newline()?;
                ctx.indent();
                for item in &case.body.items {
                    item.emit(ctx)?;
                }
                ctx.dedent();
            }
        }
        if let Some(default) = &self.default {
            ctx.write_line("default:")?;
            ctx.indent();
            for item in &default.items {
                item.emit(ctx)?;
            }
            ctx.dedent();
        }
        ctx.dedent();

        ctx.write_line("}")
    }
}
