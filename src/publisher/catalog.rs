//! The publisher's document catalog.
//!
//! Module documents are stored as templates with service-relative hrefs and
//! rendered against the public base URL on every request, so the same
//! catalog serves correct absolute links behind any host name.

use crate::discovery::{
    join_url, ActionDescriptor, ConfirmPolicy, DiscoveryDocument, HttpMethod, ModuleDocument,
    ModuleRef, ParamLocation, ParamSchema, ParamType,
};

/// Path of the OpenAPI document.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// A module registered with the catalog.
#[derive(Debug, Clone)]
pub struct ModuleEntry {
    /// Module id; served at `/.well-known/<id>.json`.
    pub id: String,
    /// Description shown in the root document.
    pub description: String,
    /// Document template with relative hrefs.
    pub template: ModuleDocument,
}

impl ModuleEntry {
    /// Service-relative path of the module document.
    pub fn path(&self) -> String {
        format!("/.well-known/{}.json", self.id)
    }
}

/// Every document the service publishes.
#[derive(Debug, Clone)]
pub struct Catalog {
    service_name: String,
    modules: Vec<ModuleEntry>,
}

impl Catalog {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            modules: Vec::new(),
        }
    }

    /// Catalog for the demo hotel: one `booking` module.
    pub fn hotel(service_name: impl Into<String>) -> Self {
        let mut catalog = Self::new(service_name);
        catalog.register(booking_module());
        catalog
    }

    pub fn register(&mut self, entry: ModuleEntry) {
        self.modules.retain(|m| m.id != entry.id);
        self.modules.push(entry);
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn modules(&self) -> &[ModuleEntry] {
        &self.modules
    }

    /// Render the root discovery document.
    pub fn discovery(&self, base_url: &str) -> DiscoveryDocument {
        DiscoveryDocument {
            name: self.service_name.clone(),
            modules: self
                .modules
                .iter()
                .map(|m| ModuleRef {
                    id: m.id.clone(),
                    description: m.description.clone(),
                    href: join_url(base_url, &m.path()),
                })
                .collect(),
        }
    }

    /// Render one module document, `None` for an unknown id.
    pub fn module(&self, id: &str, base_url: &str) -> Option<ModuleDocument> {
        let entry = self.modules.iter().find(|m| m.id == id)?;
        let mut doc = entry.template.clone();
        doc.openapi = doc.openapi.map(|path| join_url(base_url, &path));
        for action in &mut doc.actions {
            action.href = join_url(base_url, &action.href);
        }
        Some(doc)
    }
}

fn date_param(name: &str) -> ParamSchema {
    ParamSchema::new(name, ParamType::String, ParamLocation::Query)
        .describe("YYYY-MM-DD")
        .format("date")
}

/// The booking module advertised by the hotel.
pub fn booking_module() -> ModuleEntry {
    let actions = vec![
        ActionDescriptor {
            name: "list_rooms".into(),
            description: "List all rooms".into(),
            method: HttpMethod::Get,
            href: "/rooms".into(),
            confirm: None,
            params: Vec::new(),
        },
        ActionDescriptor {
            name: "search_rooms".into(),
            description: "Search available rooms".into(),
            method: HttpMethod::Get,
            href: "/rooms/search".into(),
            confirm: None,
            params: vec![
                date_param("check_in"),
                date_param("check_out"),
                ParamSchema::new("guests", ParamType::Integer, ParamLocation::Query)
                    .describe("Number of guests, at least 1"),
            ],
        },
        ActionDescriptor {
            name: "create_booking".into(),
            description: "Create a booking".into(),
            method: HttpMethod::Post,
            href: "/bookings".into(),
            confirm: Some(ConfirmPolicy::User),
            params: vec![
                ParamSchema::new("room_id", ParamType::String, ParamLocation::Body)
                    .required()
                    .describe("Room identifier"),
                date_param("check_in").required(),
                date_param("check_out").required(),
                ParamSchema::new("guest_name", ParamType::String, ParamLocation::Body)
                    .required()
                    .describe("Name the booking is held under"),
            ]
            .into_iter()
            .map(|mut p| {
                p.location = ParamLocation::Body;
                p
            })
            .collect(),
        },
        ActionDescriptor {
            name: "cancel_booking".into(),
            description: "Cancel a booking".into(),
            method: HttpMethod::Post,
            href: "/bookings/{booking_id}/cancel".into(),
            confirm: Some(ConfirmPolicy::User),
            params: vec![
                ParamSchema::new("booking_id", ParamType::String, ParamLocation::Path)
                    .required()
                    .describe("Booking identifier"),
            ],
        },
    ];

    ModuleEntry {
        id: "booking".into(),
        description: "Room availability and booking".into(),
        template: ModuleDocument {
            name: "Booking".into(),
            openapi: Some(OPENAPI_PATH.into()),
            actions,
        },
    }
}
