//! Capability consumer.
//!
//! Given a free-text goal the agent fetches `/.well-known/uap`, pulls the
//! module documents relevant to the goal, picks the best-matching action,
//! builds its parameters from the goal text and issues one call.
//!
//! Failures ([`AgentError`]) are reported as-is; there is no retry and no
//! local recovery.

pub mod client;
pub mod error;
pub mod invocation;
pub mod matcher;
pub mod params;
pub mod runner;
pub mod summary;
pub mod transport;

pub use client::UapClient;
pub use error::AgentError;
pub use invocation::{build_invocation, ActionInvocation, ActionResult};
pub use matcher::{rank_modules, select_action, Selection};
pub use params::GoalValues;
pub use runner::{Agent, RunReport, RunState};
pub use summary::summarize;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
