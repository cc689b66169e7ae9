//! Dialect-aware rendering of builder trees.

use jsonzod_core::{Dialect, is_identifier, js_string};
use serde_json::Value;

use crate::{
    Additional, Builder, BuilderKind, Check, Constraint, MethodChain, Modifier, ObjectType,
    StringFormat,
};

const INDENT: &str = "  ";

const XOR_MESSAGE: &str = "Invalid input: Should pass exactly one schema";

/// Renders [`Builder`] trees to Zod source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    dialect: Dialect,
    jsdocs: bool,
}

impl Renderer {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            jsdocs: false,
        }
    }

    /// Emit property descriptions as `/** ... */` comments.
    pub fn with_jsdocs(mut self, jsdocs: bool) -> Self {
        self.jsdocs = jsdocs;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Render a builder as a top-level expression.
    pub fn render(&self, builder: &Builder) -> String {
        self.render_at(builder, 0)
    }

    /// Render a custom error message argument.
    ///
    /// Zod 3 takes the message string, Zod 4 an `{ error }` parameter object.
    pub fn message(&self, message: &str) -> String {
        match self.dialect {
            Dialect::V3 => js_string(message),
            Dialect::V4 => format!("{{ error: {} }}", js_string(message)),
        }
    }

    fn render_at(&self, builder: &Builder, depth: usize) -> String {
        let mut chain = self.base(&builder.kind, depth);

        for modifier in builder.modifiers.iter().filter(|m| m.is_refinement()) {
            chain = self.modifier(chain, modifier, depth);
        }
        for modifier in self.ordered_modifiers(&builder.modifiers) {
            chain = self.modifier(chain, modifier, depth);
        }

        chain.build()
    }

    /// Non-refinement modifiers in the dialect's fixed order.
    fn ordered_modifiers<'a>(&self, modifiers: &'a [Modifier]) -> Vec<&'a Modifier> {
        let rank = |m: &Modifier| -> usize {
            match (self.dialect, m) {
                (Dialect::V3, Modifier::Nullable) => 0,
                (Dialect::V3, Modifier::Describe(_)) => 1,
                (Dialect::V3, Modifier::Brand(_)) => 2,
                (Dialect::V3, Modifier::Default(_)) => 3,
                (Dialect::V3, Modifier::Readonly) => 4,
                (Dialect::V3, Modifier::Optional) => 5,
                (Dialect::V4, Modifier::Nullable) => 0,
                (Dialect::V4, Modifier::Optional) => 1,
                (Dialect::V4, Modifier::Default(_)) => 2,
                (Dialect::V4, Modifier::Brand(_)) => 3,
                (Dialect::V4, Modifier::Readonly) => 4,
                (Dialect::V4, Modifier::Describe(_)) => 5,
                _ => 6,
            }
        };
        let mut ordered: Vec<&Modifier> = modifiers.iter().filter(|m| !m.is_refinement()).collect();
        ordered.sort_by_key(|m| rank(*m));
        ordered
    }

    fn modifier(&self, chain: MethodChain, modifier: &Modifier, depth: usize) -> MethodChain {
        match modifier {
            Modifier::Optional => chain.call_empty("optional"),
            Modifier::Nullable => chain.call_empty("nullable"),
            Modifier::Readonly => chain.call_empty("readonly"),
            Modifier::Default(value) => chain.call("default", literal(value)),
            Modifier::Describe(text) => chain.call("describe", js_string(text)),
            Modifier::Brand(name) => chain.call_empty(format!("brand<{}>", js_string(name))),
            Modifier::Refine { predicate, message } => {
                let mut args = vec![reindent(predicate, depth)];
                args.extend(message.as_deref().map(|m| self.message(m)));
                chain.call_args("refine", args)
            }
            Modifier::SuperRefine(body) => chain.call("superRefine", reindent(body, depth)),
            Modifier::Pipe(target) => chain.call("pipe", self.render_at(target, depth)),
        }
    }

    fn base(&self, kind: &BuilderKind, depth: usize) -> MethodChain {
        match kind {
            BuilderKind::Any => MethodChain::new("z.any"),
            BuilderKind::Unknown => MethodChain::new("z.unknown"),
            BuilderKind::Never => MethodChain::new("z.never"),
            BuilderKind::Boolean => MethodChain::new("z.boolean"),
            BuilderKind::Null => MethodChain::new("z.null"),
            BuilderKind::String {
                format,
                format_message,
                checks,
            } => {
                let chain = self.string_base(*format, format_message.as_deref());
                self.checks(chain, checks)
            }
            BuilderKind::Number {
                integer,
                integer_message,
                checks,
            } => {
                let message = integer_message.as_deref().map(|m| self.message(m));
                let chain = match (self.dialect, *integer) {
                    (Dialect::V4, true) => MethodChain::new("z.int").arg_opt(message),
                    (Dialect::V3, true) => match message {
                        Some(m) => MethodChain::new("z.number").call("int", m),
                        None => MethodChain::new("z.number").call_empty("int"),
                    },
                    (_, false) => MethodChain::new("z.number"),
                };
                self.checks(chain, checks)
            }
            BuilderKind::Literal(value) => MethodChain::new("z.literal").arg(literal(value)),
            BuilderKind::Enum(values) => {
                let members: Vec<String> = values.iter().map(|v| js_string(v)).collect();
                MethodChain::new("z.enum").arg(format!("[{}]", members.join(", ")))
            }
            BuilderKind::Object(obj) => self.object(obj, depth),
            BuilderKind::Array { items, checks } => {
                let chain = MethodChain::new("z.array").arg(self.render_at(items, depth));
                self.checks(chain, checks)
            }
            BuilderKind::Tuple { items, rest } => {
                let chain = MethodChain::new("z.tuple").arg(self.list(items, depth));
                chain.call_opt("rest", rest.as_deref().map(|r| self.render_at(r, depth)))
            }
            BuilderKind::Record(values) => MethodChain::new("z.record")
                .arg("z.string()")
                .arg(self.render_at(values, depth)),
            BuilderKind::Union(members) => MethodChain::new("z.union").arg(self.list(members, depth)),
            BuilderKind::Xor(members) => {
                let list = self.list(members, depth);
                let body = format!(
                    "(value, ctx) => {{ const matches = {}.filter((schema) => schema.safeParse(value).success).length; if (matches !== 1) {{ ctx.addIssue({{ code: \"custom\", message: {} }}); }} }}",
                    list,
                    js_string(XOR_MESSAGE)
                );
                MethodChain::new("z.union")
                    .arg(list)
                    .call("superRefine", body)
            }
            BuilderKind::Intersection(left, right) => MethodChain::new("z.intersection")
                .arg(self.render_at(left, depth))
                .arg(self.render_at(right, depth)),
            BuilderKind::Reference(target) if target.deferred => {
                MethodChain::new("z.lazy").arg(format!("() => {}", target.expr))
            }
            BuilderKind::Reference(target) => MethodChain::on(target.expr.clone()),
            BuilderKind::Custom(expr) => MethodChain::on(reindent(expr, depth)),
        }
    }

    fn string_base(&self, format: Option<StringFormat>, message: Option<&str>) -> MethodChain {
        let Some(format) = format else {
            return MethodChain::new("z.string");
        };
        match self.dialect {
            Dialect::V3 => {
                let string = MethodChain::new("z.string");
                let msg = message.map(js_string);
                let with_options = |options: &str| match &msg {
                    Some(m) => format!("{{ {}, message: {} }}", options, m),
                    None => format!("{{ {} }}", options),
                };
                match format {
                    StringFormat::DateTime => string.call("datetime", with_options("offset: true")),
                    StringFormat::Ipv4 => string.call("ip", with_options("version: \"v4\"")),
                    StringFormat::Ipv6 => string.call("ip", with_options("version: \"v6\"")),
                    other => {
                        let method = match other {
                            StringFormat::Email => "email",
                            StringFormat::Uuid => "uuid",
                            StringFormat::Url => "url",
                            StringFormat::Date => "date",
                            StringFormat::Time => "time",
                            StringFormat::Duration => "duration",
                            _ => "base64",
                        };
                        match &msg {
                            Some(m) => string.call(method, m.as_str()),
                            None => string.call_empty(method),
                        }
                    }
                }
            }
            Dialect::V4 => {
                if format == StringFormat::DateTime {
                    let options = match message {
                        Some(m) => format!("{{ offset: true, error: {} }}", js_string(m)),
                        None => "{ offset: true }".to_string(),
                    };
                    return MethodChain::new("z.iso.datetime").arg(options);
                }
                let base = match format {
                    StringFormat::Email => "z.email",
                    StringFormat::Uuid => "z.uuid",
                    StringFormat::Url => "z.url",
                    StringFormat::Date => "z.iso.date",
                    StringFormat::Time => "z.iso.time",
                    StringFormat::Ipv4 => "z.ipv4",
                    StringFormat::Ipv6 => "z.ipv6",
                    StringFormat::Duration => "z.iso.duration",
                    _ => "z.base64",
                };
                MethodChain::new(base).arg_opt(message.map(|m| self.message(m)))
            }
        }
    }

    fn checks(&self, mut chain: MethodChain, checks: &[Constraint]) -> MethodChain {
        for constraint in checks {
            let (method, arg) = match &constraint.check {
                Check::Min(n) => ("min", n.to_string()),
                Check::Max(n) => ("max", n.to_string()),
                Check::Regex(pattern) => ("regex", format!("new RegExp({})", js_string(pattern))),
                Check::MultipleOf(n) => ("multipleOf", n.to_string()),
                Check::Gte(n) => ("gte", n.to_string()),
                Check::Gt(n) => ("gt", n.to_string()),
                Check::Lte(n) => ("lte", n.to_string()),
                Check::Lt(n) => ("lt", n.to_string()),
            };
            let mut args = vec![arg];
            args.extend(constraint.message.as_deref().map(|m| self.message(m)));
            chain = chain.call_args(method, args);
        }
        chain
    }

    fn object(&self, obj: &ObjectType, depth: usize) -> MethodChain {
        let shape = if obj.properties.is_empty() {
            "{}".to_string()
        } else {
            let inner = INDENT.repeat(depth + 1);
            let mut lines = vec!["{".to_string()];
            let last = obj.properties.len() - 1;
            for (i, property) in obj.properties.iter().enumerate() {
                if let Some(description) = property.description.as_deref().filter(|_| self.jsdocs) {
                    lines.push(format!("{}/** {} */", inner, description.replace("*/", "*\\/")));
                }
                let key = if is_identifier(&property.key) {
                    property.key.clone()
                } else {
                    js_string(&property.key)
                };
                let separator = if i == last { "" } else { "," };
                lines.push(format!(
                    "{}{}: {}{}",
                    inner,
                    key,
                    self.render_at(&property.value, depth + 1),
                    separator
                ));
            }
            lines.push(format!("{}}}", INDENT.repeat(depth)));
            lines.join("\n")
        };

        let chain = MethodChain::new("z.object").arg(shape);
        match &obj.additional {
            Additional::Strip => chain,
            Additional::Strict => chain.call_empty("strict"),
            Additional::Passthrough => match self.dialect {
                Dialect::V3 => chain.call_empty("passthrough"),
                Dialect::V4 => chain.call_empty("loose"),
            },
            Additional::Catchall(values) => chain.call("catchall", self.render_at(values, depth)),
        }
    }

    fn list(&self, members: &[Builder], depth: usize) -> String {
        let rendered: Vec<String> = members.iter().map(|m| self.render_at(m, depth)).collect();
        format!("[{}]", rendered.join(", "))
    }
}

/// Render a JSON value as a JavaScript literal.
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => js_string(s),
        other => other.to_string(),
    }
}

/// Shift continuation lines of pre-rendered text to the current depth.
fn reindent(text: &str, depth: usize) -> String {
    if depth == 0 || !text.contains('\n') {
        return text.to_string();
    }
    let prefix = INDENT.repeat(depth);
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
