//! Turning a selected action and a goal into a concrete call.

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::discovery::{ActionDescriptor, HttpMethod, ParamLocation, ParamSchema, ParamType};

use super::error::AgentError;
use super::params::GoalValues;
use super::transport::HttpRequest;

/// A fully built action call. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionInvocation {
    /// Name of the action being invoked.
    pub action: String,
    pub method: HttpMethod,
    /// URL with path parameters already substituted.
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ActionInvocation {
    pub fn to_request(&self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
        }
    }
}

/// What a successful action call returned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub status: u16,
    /// Parsed JSON, or the raw text wrapped in a string.
    pub body: Value,
}

/// Build the call for `action` from what the goal provides.
///
/// Required parameters that cannot be resolved fail with
/// [`AgentError::MissingParameter`]; optional ones are left out.
pub fn build_invocation(
    action: &ActionDescriptor,
    values: &GoalValues,
) -> Result<ActionInvocation, AgentError> {
    let mut url = action.href.clone();
    let mut query = Vec::new();
    let mut body = Map::new();
    let mut date_index = 0;

    for param in &action.params {
        let raw = resolve(param, values, &mut date_index);
        let value = raw.as_deref().and_then(|r| coerce(param, r));

        let Some(value) = value else {
            if param.required || param.location == ParamLocation::Path {
                return Err(AgentError::MissingParameter {
                    action: action.name.clone(),
                    param: param.name.clone(),
                });
            }
            if let Some(raw) = raw {
                log::warn!(
                    "Dropping optional parameter '{}': '{}' is not a valid {:?}",
                    param.name,
                    raw,
                    param.param_type
                );
            }
            continue;
        };

        match param.location {
            ParamLocation::Path => {
                url = url.replace(&format!("{{{}}}", param.name), &value_to_string(&value));
            }
            ParamLocation::Query => query.push((param.name.clone(), value_to_string(&value))),
            ParamLocation::Body => {
                body.insert(param.name.clone(), value);
            }
        }
    }

    if let Some(unfilled) = action
        .path_placeholders()
        .into_iter()
        .find(|name| url.contains(&format!("{{{}}}", name)))
    {
        return Err(AgentError::MissingParameter {
            action: action.name.clone(),
            param: unfilled.to_string(),
        });
    }

    let has_body_params = action
        .params
        .iter()
        .any(|p| p.location == ParamLocation::Body);

    Ok(ActionInvocation {
        action: action.name.clone(),
        method: action.method,
        url,
        query,
        body: if has_body_params { Some(Value::Object(body)) } else { None },
    })
}

fn resolve(param: &ParamSchema, values: &GoalValues, date_index: &mut usize) -> Option<String> {
    if let Some(explicit) = values.explicit(&param.name) {
        if param.is_date() {
            *date_index += 1;
        }
        return Some(explicit.to_string());
    }

    let name = param.name.to_ascii_lowercase();

    if param.is_date() {
        let index = *date_index;
        *date_index += 1;
        let stay = values.stay?;
        let date = match index {
            0 => stay.start,
            1 => stay.end,
            _ => return None,
        };
        return Some(date.format("%Y-%m-%d").to_string());
    }

    if name.contains("guest") && param.param_type == ParamType::Integer {
        return values.guests.map(|g| g.to_string());
    }

    if let Some(prefix) = name.strip_suffix("_id") {
        return values.prefixed_id(prefix).or_else(|| values.uuid.clone());
    }

    if name.contains("name") {
        return values.person_name.clone();
    }

    None
}

fn coerce(param: &ParamSchema, raw: &str) -> Option<Value> {
    let raw = raw.trim();
    match param.param_type {
        ParamType::String => Some(Value::String(raw.to_string())),
        ParamType::Integer => raw.parse::<i64>().ok().map(|n| Value::Number(n.into())),
        ParamType::Number => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        ParamType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Some(Value::Bool(true)),
            "false" | "no" | "n" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
