//! `array` schemas and tuples.

use jsonzod_ir::{Builder, BuilderKind, Check, Constraint, z};
use jsonzod_schema::{Items, SchemaNode, SchemaObject};

use super::{CompilationContext, Session};
use crate::Result;

pub(super) fn compile(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    if let Some(prefix) = &schema.prefix_items {
        let items = positional(session, prefix, "prefixItems", ctx)?;
        let rest = match &schema.items {
            Some(Items::Single(rest)) if **rest != SchemaNode::Bool(false) => {
                Some(Box::new(session.compile(rest, &ctx.child("items"))?))
            }
            _ => None,
        };
        return Ok(BuilderKind::Tuple { items, rest }.into());
    }

    let items = match &schema.items {
        Some(Items::Tuple(members)) => {
            return Ok(z::tuple(positional(session, members, "items", ctx)?));
        }
        Some(Items::Single(item)) => session.compile(item, &ctx.child("items"))?,
        None => z::any(),
    };

    let mut checks = Vec::new();
    if let Some(min) = schema.min_items {
        checks.push(Constraint::new(Check::Min(min)).with_message(schema.error_message("minItems")));
    }
    if let Some(max) = schema.max_items {
        checks.push(Constraint::new(Check::Max(max)).with_message(schema.error_message("maxItems")));
    }

    Ok(BuilderKind::Array {
        items: Box::new(items),
        checks,
    }
    .into())
}

fn positional(
    session: &mut Session<'_>,
    members: &[SchemaNode],
    keyword: &str,
    ctx: &CompilationContext,
) -> Result<Vec<Builder>> {
    members
        .iter()
        .enumerate()
        .map(|(i, member)| session.compile(member, &ctx.descend(keyword, i)))
        .collect()
}
