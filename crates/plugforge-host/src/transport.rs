//! HTTP transport for network-capable modules.

use async_trait::async_trait;
use plugforge_runtime::{Capability, CapabilitySet};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors from host services.
#[derive(Debug, Error)]
pub enum HostError {
    /// The module did not declare the capability it tried to use.
    #[error("missing capability: {0}")]
    MissingCapability(String),

    /// The request itself failed.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body was not what the caller asked for.
    #[error("bad response: {0}")]
    BadResponse(String),
}

/// Result type for host services.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// An HTTP response handed back to a module.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// The network facility a module may use internally.
///
/// Implementations check [`Capability::Network`] before touching the
/// network, so a module that never declared it cannot reach out.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET request.
    async fn get(&self, url: &str, headers: HashMap<String, String>) -> HostResult<HttpReply>;

    /// Perform a POST request with a string body.
    async fn post(
        &self,
        url: &str,
        headers: HashMap<String, String>,
        body: &str,
    ) -> HostResult<HttpReply>;

    /// GET and parse the body as JSON.
    async fn get_json(
        &self,
        url: &str,
        headers: HashMap<String, String>,
    ) -> HostResult<serde_json::Value> {
        let reply = self.get(url, headers).await?;
        serde_json::from_str(&reply.body).map_err(|e| HostError::BadResponse(e.to_string()))
    }
}

/// Default transport, one per loaded module, built from the module's
/// declared capability set.
pub struct HttpTransport {
    module: String,
    capabilities: CapabilitySet,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport for the named module with its declared
    /// capabilities.
    pub fn new(module: impl Into<String>, capabilities: CapabilitySet) -> Self {
        Self {
            module: module.into(),
            capabilities,
            client: reqwest::Client::new(),
        }
    }

    fn check_network(&self) -> HostResult<()> {
        if self.capabilities.has(&Capability::Network) {
            Ok(())
        } else {
            Err(HostError::MissingCapability(
                Capability::Network.as_str().to_string(),
            ))
        }
    }

    async fn collect(response: reqwest::Response) -> HostResult<HttpReply> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;

        Ok(HttpReply {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: HashMap<String, String>) -> HostResult<HttpReply> {
        self.check_network()?;
        debug!(module = %self.module, "GET {url}");

        let mut request = self.client.get(url);
        for (key, value) in headers {
            request = request.header(&key, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;
        Self::collect(response).await
    }

    async fn post(
        &self,
        url: &str,
        headers: HashMap<String, String>,
        body: &str,
    ) -> HostResult<HttpReply> {
        self.check_network()?;
        debug!(module = %self.module, "POST {url}");

        let mut request = self.client.post(url).body(body.to_string());
        for (key, value) in headers {
            request = request.header(&key, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| HostError::Request(e.to_string()))?;
        Self::collect(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_network_denied_without_capability() {
        let transport = HttpTransport::new("test-module", CapabilitySet::new());

        // Fails before any request is attempted, so no network is needed.
        let err = transport
            .get("http://localhost:1/unreachable", HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::MissingCapability(_)));

        let err = transport
            .post("http://localhost:1/unreachable", HashMap::new(), "{}")
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::MissingCapability(_)));
    }

    #[tokio::test]
    async fn test_get_json_propagates_capability_error() {
        let transport = HttpTransport::new("test-module", CapabilitySet::new());
        let err = transport
            .get_json("http://localhost:1/unreachable", HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::MissingCapability(_)));
    }

    #[test]
    fn test_declared_capability_passes_check() {
        let caps = CapabilitySet::from_strings(["network"]);
        let transport = HttpTransport::new("test-module", caps);
        assert!(transport.check_network().is_ok());
    }
}
