//! HTTP transport used for synchronous delivery and queued jobs.

use std::sync::Arc;

use ureq::{Agent, AgentBuilder};

use crate::config::HttpSettings;
use crate::error::DeliveryError;

/// The delivery strategy seam.
///
/// Production code uses [`UreqTransport`]; tests and embedders may substitute
/// a recording or failing implementation without touching the rest of the
/// pipeline.
pub trait Transport: Send + Sync {
    /// Issue one POST of `body` (JSON) to `endpoint` with bearer auth.
    ///
    /// Exactly one attempt; retry policy belongs to the caller.
    fn post(&self, endpoint: &str, api_key: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Real transport over a pooled [`ureq::Agent`].
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Build an agent honouring the configured timeouts and TLS policy.
    pub fn new(settings: &HttpSettings) -> Result<Self, DeliveryError> {
        let mut builder = AgentBuilder::new()
            .timeout_connect(settings.connect_timeout)
            .timeout(settings.timeout);

        if !settings.verify_tls {
            let connector = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(|e| DeliveryError::Tls(e.to_string()))?;
            builder = builder.tls_connector(Arc::new(connector));
        }

        Ok(Self {
            agent: builder.build(),
        })
    }
}

impl Transport for UreqTransport {
    fn post(&self, endpoint: &str, api_key: &str, body: &str) -> Result<(), DeliveryError> {
        let result = self
            .agent
            .post(endpoint)
            .set("Content-Type", "application/json")
            .set("Authorization", &format!("Bearer {api_key}"))
            .send_string(body);

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => Err(DeliveryError::Status(code)),
            Err(ureq::Error::Transport(transport)) => {
                Err(DeliveryError::Transport(transport.to_string()))
            }
        }
    }
}
