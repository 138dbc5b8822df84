use crate::ast::{Expression, Literal};

use super::{Emit, EmitterContext};

impl Emit for Expression {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        match self {
            Expression::Literal(literal) => literal.emit(ctx),
            Expression::Variable(variable) => ctx.write(&variable.name),
            Expression::Binary(binary) => {
                ctx.write("(")?;
                binary.lhs.emit(ctx)?;
                ctx.write(&format!(" {} ", binary.op))?;
                binary.rhs.emit(ctx)?;
                ctx.write(")")
            }
            Expression::Unary(unary) => {
                ctx.write("(")?;
                ctx.write(&unary.op.to_string())?;
                unary.operand.emit(ctx)?;
                ctx.write(")")
            }
            Expression::Call(call) => {
                ctx.write(&call.name)?;
                ctx.write("(")?;
                for (i, arg) in call.args.iter().enumerate() {
                    if i > 0 {
                        ctx.write(", ")?;
                    }
                    arg.emit(ctx)?;
                }
                ctx.write(")")
            }
            Expression::Assign(assign) => {
                ctx.write("(")?;
                ctx.write(&assign.target.name)?;
                ctx.write(" = ")?;
                assign.value.emit(ctx)?;
                ctx.write(")")
            }
        }
    }
}

impl Emit for Literal {
    fn emit(&self, ctx: &mut EmitterContext) -> std::fmt::Result {
        match self {
            Literal::Int(value) => ctx.write(&value.to_string()),
            Literal::Bool(value) => ctx.write(if *value { "true" } else { "false" }),
            Literal::Char(value) => {
                ctx.write("'")?;
                ctx.write(&escape_char(*value))?;
                ctx.write("'")
            }
            Literal::Str(value) => {
                ctx.write("\"")?;
                ctx.write(&escape_string(value))?;
                ctx.write("\"")
            }
        }
    }
}

pub(crate) fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn escape_char(value: char) -> String {
    match value {
        '\\' => "\\\\".to_owned(),
        '\'' => "\\'".to_owned(),
        '\n' => "\\n".to_owned(),
        '\t' => "\\t".to_owned(),
        '\0' => "\\0".to_owned(),
        c => c.to_string(),
    }
}
