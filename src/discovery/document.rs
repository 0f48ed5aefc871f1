//! UAP document types shared by the publisher and the agent.
//!
//! Two documents make up the discovery surface:
//!
//! ```json
//! // GET /.well-known/uap
//! {
//!   "name": "Example Hotel",
//!   "modules": [
//!     { "id": "booking", "description": "Room availability and booking",
//!       "href": "http://localhost:8000/.well-known/booking.json" }
//!   ]
//! }
//!
//! // GET /.well-known/booking.json
//! {
//!   "name": "Booking",
//!   "openapi": "http://localhost:8000/openapi.json",
//!   "actions": [
//!     { "name": "search_rooms", "description": "Search available rooms",
//!       "method": "GET", "href": "http://localhost:8000/rooms/search",
//!       "params": [ { "name": "guests", "type": "integer", "required": false, "in": "query" } ] }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Root discovery document served at `/.well-known/uap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    /// Service name.
    pub name: String,
    /// Modules the service advertises.
    #[serde(default)]
    pub modules: Vec<ModuleRef>,
}

impl DiscoveryDocument {
    /// Look up a module reference by id.
    pub fn module(&self, id: &str) -> Option<&ModuleRef> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Ids of every advertised module, in document order.
    pub fn module_ids(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.id.as_str()).collect()
    }
}

/// Reference from the root document to one module document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRef {
    /// Module identifier (also the stem of its `.json` path).
    #[serde(alias = "name")]
    pub id: String,
    /// What the module is for.
    #[serde(default)]
    pub description: String,
    /// Absolute URL of the module document.
    #[serde(alias = "url")]
    pub href: String,
}

/// A module document: one capability group and its actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDocument {
    /// Display name of the module.
    pub name: String,
    /// Link to the OpenAPI document covering the module's endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,
    /// Invocable actions.
    #[serde(default)]
    pub actions: Vec<ActionDescriptor>,
}

impl ModuleDocument {
    /// Look up an action by name.
    pub fn action(&self, name: &str) -> Option<&ActionDescriptor> {
        self.actions.iter().find(|a| a.name == name)
    }
}

/// One invocable action advertised by a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Action name, unique within its module.
    #[serde(alias = "id")]
    pub name: String,
    /// Human-readable description; used for intent matching.
    #[serde(default)]
    pub description: String,
    /// HTTP method used to invoke the action.
    #[serde(default)]
    pub method: HttpMethod,
    /// Absolute URL; may contain `{param}` placeholders for path parameters.
    pub href: String,
    /// Confirmation required before invoking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmPolicy>,
    /// Parameter schema.
    #[serde(default)]
    pub params: Vec<ParamSchema>,
}

impl ActionDescriptor {
    /// Whether the action only reads state.
    pub fn is_read_only(&self) -> bool {
        self.method == HttpMethod::Get
    }

    /// Whether the caller must confirm before invoking.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self.confirm, Some(ConfirmPolicy::User))
    }

    /// Names of the `{placeholder}` segments in `href`.
    pub fn path_placeholders(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut rest = self.href.as_str();
        while let Some(start) = rest.find('{') {
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    names.push(&after[..end]);
                    rest = &after[end + 1..];
                }
                None => break,
            }
        }
        names
    }
}

/// HTTP methods an action may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who has to approve an action before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmPolicy {
    /// The end user must explicitly confirm.
    User,
}

/// Schema for one action parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSchema {
    /// Parameter name.
    pub name: String,
    /// Value type.
    #[serde(rename = "type", default)]
    pub param_type: ParamType,
    /// Whether the call is invalid without it.
    #[serde(default)]
    pub required: bool,
    /// Where the value travels.
    #[serde(rename = "in", default)]
    pub location: ParamLocation,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Format hint, e.g. `"date"` for `YYYY-MM-DD` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ParamSchema {
    pub fn new(name: impl Into<String>, param_type: ParamType, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            location,
            description: None,
            format: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Whether the parameter carries a calendar date.
    pub fn is_date(&self) -> bool {
        self.format.as_deref() == Some("date")
    }
}

/// Parameter value types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
}

/// Where a parameter is placed on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    #[default]
    Query,
    Path,
    Body,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_accepts_id_alias() {
        let json = serde_json::json!({
            "id": "rooms.search",
            "description": "Search available rooms",
            "method": "GET",
            "href": "http://localhost:8000/rooms/search",
        });
        let action: ActionDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(action.name, "rooms.search");
        assert!(action.params.is_empty());
        assert!(action.is_read_only());
        assert!(!action.requires_confirmation());
    }

    #[test]
    fn test_confirm_policy_round_trip() {
        let json = serde_json::json!({
            "name": "create_booking",
            "method": "POST",
            "href": "http://h/bookings",
            "confirm": "user",
        });
        let action: ActionDescriptor = serde_json::from_value(json).unwrap();
        assert!(action.requires_confirmation());
        assert_eq!(serde_json::to_value(&action).unwrap()["confirm"], "user");
    }

    #[test]
    fn test_path_placeholders() {
        let action = ActionDescriptor {
            name: "cancel_booking".into(),
            description: String::new(),
            method: HttpMethod::Post,
            href: "http://h/bookings/{booking_id}/cancel".into(),
            confirm: None,
            params: Vec::new(),
        };
        assert_eq!(action.path_placeholders(), vec!["booking_id"]);
    }

    #[test]
    fn test_param_schema_wire_names() {
        let param = ParamSchema::new("check_in", ParamType::String, ParamLocation::Query)
            .required()
            .format("date");
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["type"], "string");
        assert_eq!(value["in"], "query");
        assert_eq!(value["required"], true);
        assert_eq!(value["format"], "date");
        assert!(value.get("description").is_none());
        assert!(param.is_date());
    }

    #[test]
    fn test_discovery_lookup() {
        let doc = DiscoveryDocument {
            name: "Example Hotel".into(),
            modules: vec![ModuleRef {
                id: "booking".into(),
                description: "Room availability and booking".into(),
                href: "http://h/.well-known/booking.json".into(),
            }],
        };
        assert!(doc.module("booking").is_some());
        assert!(doc.module("spa").is_none());
        assert_eq!(doc.module_ids(), vec!["booking"]);
    }
}
