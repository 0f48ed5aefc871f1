//! # uap-hotel
//!
//! A small demonstration of UAP capability discovery.
//!
//! The **publisher** side ([`server`], [`publisher`]) serves a root
//! discovery document at `/.well-known/uap`, one module document per
//! capability group, and the hotel API those documents describe.
//!
//! The **consumer** side ([`agent`]) takes a free-text goal, walks the
//! discovery documents, selects the action whose schema best matches the
//! goal and invokes it with parameters read from the goal text.

pub mod agent;
pub mod config;
pub mod discovery;
pub mod publisher;
pub mod server;

pub use agent::{Agent, AgentError, RunReport, RunState};
pub use discovery::{ActionDescriptor, DiscoveryDocument, ModuleDocument, ModuleRef};
pub use server::{app_router, AppState};

/// Crate version, reported by `/health` and the OpenAPI document.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
