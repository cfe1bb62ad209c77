//! The resolver boundary: raw configuration in, [`TargetSpec`] out.

use serde_json::Value;
use tracing::debug;

use crate::engine::{Engine, Version};
use crate::error::{Result, TargetError};
use crate::spec::{EngineConstraint, TargetSpec};

/// Validate and normalize a raw `target` value.
///
/// Accepted shapes:
/// - `false` → [`TargetSpec::Disabled`]
/// - `"chrome120"` → [`TargetSpec::Single`]
/// - `"chrome58,firefox57"` or `["chrome120", "safari16"]` → [`TargetSpec::List`]
///
/// Lists keep one constraint per engine: the lowest version wins, at the
/// position where the engine first appeared.
///
/// # Errors
///
/// - [`TargetError::InvalidTarget`] for any other shape, including `true`,
///   numbers, objects, `null`, empty strings/lists and non-string list items
/// - [`TargetError::UnknownEngine`] for an unrecognized engine prefix
/// - [`TargetError::InvalidVersion`] for an unparsable version suffix
pub fn resolve(raw: &Value) -> Result<TargetSpec> {
    let spec = match raw {
        Value::Bool(false) => TargetSpec::Disabled,
        Value::String(text) => resolve_string(text)?,
        Value::Array(items) => resolve_list(items)?,
        other => return Err(TargetError::invalid_target(other.to_string(), json_kind(other))),
    };

    debug!(resolved = %spec, "resolved build target");
    Ok(spec)
}

fn resolve_string(text: &str) -> Result<TargetSpec> {
    if !text.contains(',') {
        return parse_token(text).map(TargetSpec::Single);
    }

    let constraints = text
        .split(',')
        .map(|token| {
            if token.trim().is_empty() {
                // Name the whole string; `""` alone says nothing.
                return Err(TargetError::invalid_target(
                    Value::from(text).to_string(),
                    "empty entry in target string",
                ));
            }
            parse_token(token)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TargetSpec::List(normalize(constraints)))
}

fn resolve_list(items: &[Value]) -> Result<TargetSpec> {
    if items.is_empty() {
        return Err(TargetError::invalid_target("[]", "empty array"));
    }

    let constraints = items
        .iter()
        .map(|item| match item {
            Value::String(token) => parse_token(token),
            other => Err(TargetError::invalid_target(
                other.to_string(),
                format!("{} inside target array", json_kind(other)),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TargetSpec::List(normalize(constraints)))
}

/// Parse one `<engine><version>` token such as `safari18.4` or `es2015`.
pub fn parse_token(token: &str) -> Result<EngineConstraint> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TargetError::invalid_target("\"\"", "empty string"));
    }
    if token.eq_ignore_ascii_case("esnext") {
        return Ok(EngineConstraint::new(Engine::Es, Version::LATEST));
    }

    let split = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    let (prefix, suffix) = token.split_at(split);

    let engine =
        Engine::from_prefix(prefix).ok_or_else(|| TargetError::unknown_engine(token, prefix))?;

    if suffix.is_empty() {
        return Err(TargetError::invalid_version(token, "missing version"));
    }

    let version = match engine {
        Engine::Es => parse_es_generation(token, suffix)?,
        _ => suffix
            .parse::<Version>()
            .map_err(|reason| TargetError::invalid_version(token, reason))?,
    };

    Ok(EngineConstraint::new(engine, version))
}

/// `es5`, `es6` and edition years from 2015 on.
fn parse_es_generation(token: &str, suffix: &str) -> Result<Version> {
    let year = match suffix {
        "5" => 2009,
        "6" => 2015,
        _ => suffix
            .parse::<u32>()
            .ok()
            .filter(|year| (2015..=2099).contains(year))
            .ok_or_else(|| {
                TargetError::invalid_version(
                    token,
                    "expected es5, es6, es2015 or a later edition year, or esnext",
                )
            })?,
    };
    Ok(Version::major(year))
}

/// One entry per engine, lowest version, first-seen order.
fn normalize(constraints: Vec<EngineConstraint>) -> Vec<EngineConstraint> {
    let mut normalized: Vec<EngineConstraint> = Vec::with_capacity(constraints.len());
    for constraint in constraints {
        match normalized.iter_mut().find(|c| c.engine == constraint.engine) {
            Some(existing) => existing.version = existing.version.min(constraint.version),
            None => normalized.push(constraint),
        }
    }
    normalized
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
