//! `allOf`, `anyOf`, `oneOf`, `not`, `if`/`then`/`else` and multi-type nodes.

use std::borrow::Cow;

use jsonzod_core::Dialect;
use jsonzod_ir::{Builder, z};
use jsonzod_schema::{SchemaNode, SchemaObject};

use super::{CompilationContext, Session};
use crate::{Error, Result};

const NOT_MESSAGE: &str = "Invalid input: Should NOT be valid against schema";

/// Intersection of every member, folded as a balanced tree.
pub(super) fn all_of(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let members: Vec<(usize, Cow<'_, SchemaNode>)> = schema
        .all_of
        .iter()
        .flatten()
        .enumerate()
        .map(|(i, member)| {
            let member = match member {
                SchemaNode::Bool(true) => Cow::Owned(SchemaNode::empty()),
                SchemaNode::Bool(false) => Cow::Owned(SchemaNode::nothing()),
                other => Cow::Borrowed(other),
            };
            (i, member)
        })
        .collect();
    intersect(session, &members, ctx)
}

fn intersect(
    session: &mut Session<'_>,
    members: &[(usize, Cow<'_, SchemaNode>)],
    ctx: &CompilationContext,
) -> Result<Builder> {
    match members {
        [] => Ok(z::never()),
        [(i, member)] => session.compile(member, &ctx.descend("allOf", *i)),
        _ => {
            let (left, right) = members.split_at(members.len() / 2);
            Ok(z::intersection(
                intersect(session, left, ctx)?,
                intersect(session, right, ctx)?,
            ))
        }
    }
}

pub(super) fn any_of(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let members = schema.any_of.as_deref().unwrap_or_default();
    match members {
        [] => Ok(z::any()),
        [single] => session.compile(single, &ctx.descend("anyOf", 0usize)),
        _ => Ok(z::union(alternatives(session, members, "anyOf", ctx)?)),
    }
}

pub(super) fn one_of(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let members = schema.one_of.as_deref().unwrap_or_default();
    match members {
        [] => Ok(z::any()),
        [single] => session.compile(single, &ctx.descend("oneOf", 0usize)),
        _ => Ok(z::xor(alternatives(session, members, "oneOf", ctx)?)),
    }
}

fn alternatives(
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

pub(super) fn not(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let Some(negated) = schema.not.as_deref() else {
        return Ok(z::any());
    };
    let negated = session.compile(negated, &ctx.child("not"))?;
    let message = schema.error_message("not").unwrap_or(NOT_MESSAGE);
    Ok(z::any().refine(
        format!("(value) => !{}.safeParse(value).success", session.render(&negated)),
        Some(message.to_string()),
    ))
}

/// `if`/`then`/`else`: validate against `then` or `else` depending on `if`.
pub(super) fn conditional(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let Some(condition) = schema.if_schema.as_deref() else {
        return Err(Error::malformed("if", "`then`/`else` without `if`", ctx.path()));
    };
    let condition = session.compile(condition, &ctx.child("if"))?;
    let then = branch(session, schema.then_schema.as_deref(), "then", ctx)?;
    let otherwise = branch(session, schema.else_schema.as_deref(), "else", ctx)?;

    let issues = match ctx.dialect() {
        Dialect::V3 => "errors",
        Dialect::V4 => "issues",
    };
    let body = format!(
        "(value, ctx) => {{ const result = {}.safeParse(value).success ? {}.safeParse(value) : {}.safeParse(value); if (!result.success) {{ result.error.{}.forEach((issue) => ctx.addIssue(issue)); }} }}",
        session.render(&condition),
        session.render(&then),
        session.render(&otherwise),
        issues
    );
    Ok(z::union(vec![then, otherwise]).super_refine(body))
}

fn branch(
    session: &mut Session<'_>,
    node: Option<&SchemaNode>,
    keyword: &str,
    ctx: &CompilationContext,
) -> Result<Builder> {
    match node {
        Some(node) => session.compile(node, &ctx.child(keyword)),
        None => Ok(z::any()),
    }
}

/// `type: [a, b, ...]`: a union of the schema narrowed to each type.
pub(super) fn multi_type(
    session: &mut Session<'_>,
    schema: &SchemaObject,
    ctx: &CompilationContext,
) -> Result<Builder> {
    let branch_ctx = ctx.with_suppressed_default();
    let mut members = Vec::new();
    for ty in schema.types() {
        let narrowed = SchemaObject {
            description: None,
            nullable: None,
            read_only: None,
            ..schema.with_type(ty)
        };
        members.push(session.compile_raw(&narrowed.into(), &branch_ctx)?);
    }
    Ok(match members.len() {
        1 => members.remove(0),
        _ => z::union(members),
    })
}
