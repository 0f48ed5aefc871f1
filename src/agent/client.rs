//! UAP discovery client.
//!
//! Fetches the root document from `<base_url>/.well-known/uap`, module
//! documents from the hrefs it advertises, and carries action invocations.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::discovery::{join_url, DiscoveryDocument, ModuleDocument, ModuleRef, WELL_KNOWN_PATH};

use super::error::AgentError;
use super::invocation::{ActionInvocation, ActionResult};
use super::transport::{HttpRequest, Transport};

/// Client for one UAP service.
pub struct UapClient<T: Transport> {
    /// Base URL of the service.
    pub base_url: String,
    transport: T,
}

impl<T: Transport> std::fmt::Debug for UapClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UapClient")
            .field("base_url", &self.base_url)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl<T: Transport> UapClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the root discovery document.
    pub async fn discover(&self) -> Result<DiscoveryDocument, AgentError> {
        let url = join_url(&self.base_url, WELL_KNOWN_PATH);
        self.fetch_document(&url).await
    }

    /// Fetch the module document a root reference points at.
    pub async fn fetch_module(&self, module: &ModuleRef) -> Result<ModuleDocument, AgentError> {
        let doc: ModuleDocument = self.fetch_document(&module.href).await?;
        if let Some(bad) = doc.actions.iter().find(|a| a.name.trim().is_empty()) {
            return Err(AgentError::InvalidDocument {
                url: module.href.clone(),
                message: format!("action with empty name (href {})", bad.href),
            });
        }
        Ok(doc)
    }

    /// Issue an action call. Non-2xx answers become [`AgentError::RemoteAction`].
    pub async fn invoke(&self, invocation: &ActionInvocation) -> Result<ActionResult, AgentError> {
        log::debug!(
            "Invoking {} via {} {}",
            invocation.action,
            invocation.method,
            invocation.url
        );
        let resp = self
            .transport
            .send(invocation.to_request())
            .await
            .map_err(|message| AgentError::Network {
                url: invocation.url.clone(),
                message,
            })?;

        if !resp.is_success() {
            return Err(AgentError::RemoteAction {
                action: invocation.action.clone(),
                status: resp.status,
                body: resp.body,
            });
        }

        let body = if resp.is_json() {
            serde_json::from_str(&resp.body).unwrap_or(Value::String(resp.body))
        } else {
            Value::String(resp.body)
        };
        Ok(ActionResult {
            status: resp.status,
            body,
        })
    }

    async fn fetch_document<D: DeserializeOwned>(&self, url: &str) -> Result<D, AgentError> {
        log::debug!("Fetching UAP document from: {}", url);
        let resp = self
            .transport
            .send(HttpRequest::get(url))
            .await
            .map_err(|message| AgentError::Network {
                url: url.to_string(),
                message,
            })?;

        if !resp.is_success() {
            return Err(AgentError::Network {
                url: url.to_string(),
                message: format!("HTTP {}", resp.status),
            });
        }

        serde_json::from_str(&resp.body).map_err(|e| AgentError::InvalidDocument {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
