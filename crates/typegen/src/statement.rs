//! The small statement tree decode plans are expressed in, and its
//! renderer. The tree is language-shaped rather than language-specific:
//! error checks render to the `?` operator and the typed switch to `match`.

/// One node of a decode plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `let [mut] name[: ty] = init;`
    VarDecl {
        name: String,
        ty: String,
        init: String,
        mutable: bool,
    },
    /// `target = value;`
    Assign { target: String, value: String },
    /// The plan's result, rendered as a tail expression.
    Return { value: String },
    /// Verbatim code.
    Raw { code: String },
    /// `if condition { .. }`; the condition may be a `let` pattern.
    If {
        condition: String,
        body: Vec<Statement>,
    },
    /// `match expr { pattern => { .. } .. _ => {} }`
    Match {
        expr: String,
        arms: Vec<MatchArm>,
    },
    /// `expr?;`
    ErrorCheck { expr: String },
    /// Plain sequencing, rendered without braces.
    Block { body: Vec<Statement> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchArm {
    pub pattern: String,
    pub body: Vec<Statement>,
}

impl Statement {
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, indent);
        out
    }

    fn render_into(&self, out: &mut String, indent: usize) {
        let pad = "    ".repeat(indent);
        match self {
            Statement::VarDecl {
                name,
                ty,
                init,
                mutable,
            } => {
                out.push_str(&pad);
                out.push_str("let ");
                if *mutable {
                    out.push_str("mut ");
                }
                out.push_str(name);
                if !ty.is_empty() {
                    out.push_str(": ");
                    out.push_str(ty);
                }
                out.push_str(" = ");
                out.push_str(init);
                out.push_str(";\n");
            }
            Statement::Assign { target, value } => {
                out.push_str(&pad);
                out.push_str(target);
                out.push_str(" = ");
                out.push_str(value);
                out.push_str(";\n");
            }
            Statement::Return { value } => {
                out.push_str(&pad);
                out.push_str(value);
                out.push('\n');
            }
            Statement::Raw { code } => {
                out.push_str(&pad);
                out.push_str(code);
                out.push('\n');
            }
            Statement::If { condition, body } => {
                out.push_str(&pad);
                out.push_str("if ");
                out.push_str(condition);
                out.push_str(" {\n");
                for statement in body {
                    statement.render_into(out, indent + 1);
                }
                out.push_str(&pad);
                out.push_str("}\n");
            }
            Statement::Match { expr, arms } => {
                out.push_str(&pad);
                out.push_str("match ");
                out.push_str(expr);
                out.push_str(" {\n");
                for arm in arms {
                    let arm_pad = "    ".repeat(indent + 1);
                    if arm.body.is_empty() {
                        out.push_str(&arm_pad);
                        out.push_str(&arm.pattern);
                        out.push_str(" => {}\n");
                        continue;
                    }
                    out.push_str(&arm_pad);
                    out.push_str(&arm.pattern);
                    out.push_str(" => {\n");
                    for statement in &arm.body {
                        statement.render_into(out, indent + 2);
                    }
                    out.push_str(&arm_pad);
                    out.push_str("}\n");
                }
                out.push_str(&pad);
                out.push_str("}\n");
            }
            Statement::ErrorCheck { expr } => {
                out.push_str(&pad);
                out.push_str(expr);
                out.push_str("?;\n");
            }
            Statement::Block { body } => {
                for statement in body {
                    statement.render_into(out, indent);
                }
            }
        }
    }
}

/// Renders a statement sequence at the given indent level.
pub fn render(statements: &[Statement], indent: usize) -> String {
    let mut out = String::new();
    for statement in statements {
        statement.render_into(&mut out, indent);
    }
    out
}
