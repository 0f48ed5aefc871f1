//! OpenAPI 3.0 document generated from the catalog.
//!
//! Each action becomes `paths.<href>.<method>`: query/path params map to
//! `parameters`, body params to an `application/json` request body. This
//! is the inverse of what a consumer would scrape from an OpenAPI spec.

use serde_json::{json, Map, Value};

use crate::discovery::{ActionDescriptor, ParamLocation, ParamSchema, ParamType};

use super::catalog::Catalog;

/// Build the OpenAPI document for every module in `catalog`.
pub fn openapi_document(catalog: &Catalog, base_url: &str) -> Value {
    let mut paths = Map::new();

    for entry in catalog.modules() {
        for action in &entry.template.actions {
            let path_item = paths
                .entry(action.href.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(item) = path_item {
                item.insert(
                    action.method.as_str().to_ascii_lowercase(),
                    operation(&entry.id, action),
                );
            }
        }
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": catalog.service_name(),
            "version": crate::VERSION,
        },
        "servers": [{ "url": base_url.trim_end_matches('/') }],
        "paths": paths,
        "components": {
            "schemas": {
                "Room": {
                    "type": "object",
                    "required": ["id", "room_type", "price", "features"],
                    "properties": {
                        "id": { "type": "string" },
                        "room_type": { "type": "string" },
                        "price": { "type": "integer" },
                        "features": { "type": "array", "items": { "type": "string" } },
                    },
                },
                "Booking": {
                    "type": "object",
                    "required": ["id", "room_id", "check_in", "check_out", "guest_name", "status"],
                    "properties": {
                        "id": { "type": "string" },
                        "room_id": { "type": "string" },
                        "check_in": { "type": "string", "format": "date" },
                        "check_out": { "type": "string", "format": "date" },
                        "guest_name": { "type": "string" },
                        "status": { "type": "string", "enum": ["confirmed", "canceled"] },
                    },
                },
            },
        },
    })
}

fn operation(module_id: &str, action: &ActionDescriptor) -> Value {
    let parameters: Vec<Value> = action
        .params
        .iter()
        .filter(|p| p.location != ParamLocation::Body)
        .map(|p| {
            json!({
                "name": p.name,
                "in": if p.location == ParamLocation::Path { "path" } else { "query" },
                "required": p.required || p.location == ParamLocation::Path,
                "description": p.description,
                "schema": schema_for(p),
            })
        })
        .collect();

    let body_params: Vec<&ParamSchema> = action
        .params
        .iter()
        .filter(|p| p.location == ParamLocation::Body)
        .collect();

    let mut op = json!({
        "operationId": action.name,
        "summary": action.description,
        "tags": [module_id],
        "parameters": parameters,
        "responses": {
            "200": { "description": "Successful Response", "content": { "application/json": { "schema": response_schema(action) } } },
        },
    });

    if !body_params.is_empty() {
        let properties: Map<String, Value> = body_params
            .iter()
            .map(|p| (p.name.clone(), schema_for(p)))
            .collect();
        let required: Vec<&str> = body_params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();
        op["requestBody"] = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "type": "object", "properties": properties, "required": required },
                },
            },
        });
    }

    op
}

fn schema_for(param: &ParamSchema) -> Value {
    let type_name = match param.param_type {
        ParamType::String => "string",
        ParamType::Integer => "integer",
        ParamType::Number => "number",
        ParamType::Boolean => "boolean",
    };
    let mut schema = json!({ "type": type_name });
    if let Some(ref format) = param.format {
        schema["format"] = Value::String(format.clone());
    }
    if let Some(ref description) = param.description {
        schema["description"] = Value::String(description.clone());
    }
    schema
}

fn response_schema(action: &ActionDescriptor) -> Value {
    if action.href.starts_with("/rooms") {
        json!({ "type": "array", "items": { "$ref": "#/components/schemas/Room" } })
    } else {
        json!({ "$ref": "#/components/schemas/Booking" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_covers_every_action() {
        let catalog = Catalog::hotel("Example Hotel");
        let doc = openapi_document(&catalog, "http://hotel.test/");

        assert_eq!(doc["openapi"], "3.0.3");
        assert_eq!(doc["info"]["title"], "Example Hotel");
        assert_eq!(doc["servers"][0]["url"], "http://hotel.test");

        let paths = doc["paths"].as_object().unwrap();
        assert_eq!(paths["/rooms"]["get"]["operationId"], "list_rooms");
        assert_eq!(paths["/rooms/search"]["get"]["operationId"], "search_rooms");
        assert_eq!(paths["/bookings"]["post"]["operationId"], "create_booking");
        assert_eq!(
            paths["/bookings/{booking_id}/cancel"]["post"]["operationId"],
            "cancel_booking"
        );
    }

    #[test]
    fn test_openapi_parameters_and_body() {
        let catalog = Catalog::hotel("Example Hotel");
        let doc = openapi_document(&catalog, "http://hotel.test");

        let search = &doc["paths"]["/rooms/search"]["get"];
        let params = search["parameters"].as_array().unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[2]["name"], "guests");
        assert_eq!(params[2]["schema"]["type"], "integer");
        assert!(search.get("requestBody").is_none());

        let create = &doc["paths"]["/bookings"]["post"];
        let schema = &create["requestBody"]["content"]["application/json"]["schema"];
        assert_eq!(schema["required"].as_array().unwrap().len(), 4);
        assert_eq!(schema["properties"]["check_in"]["format"], "date");

        let cancel = &doc["paths"]["/bookings/{booking_id}/cancel"]["post"];
        assert_eq!(cancel["parameters"][0]["in"], "path");
        assert_eq!(cancel["parameters"][0]["required"], true);
    }
}
