//! HTTP batch activity oracle
//!
//! Asks a block-explorer-style service whether each address in a batch has
//! ever appeared on-chain. One POST per batch; the answer must be a boolean
//! per address, in input order.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use shardscan_core::{ActivityOracle, AddressBytes, BoxError};

use crate::error::{ClientError, Result};

/// Request to the activity endpoint
#[derive(Serialize)]
struct ProbeRequest {
    addresses: Vec<String>,
}

/// Response from the activity endpoint
#[derive(Deserialize)]
struct ProbeResponse {
    active: Vec<bool>,
}

/// Activity oracle backed by an explorer HTTP API.
///
/// No retry or backoff here: a failed probe surfaces as an error and the
/// discovery session aborts, which is the engine's failure contract.
pub struct HttpOracle {
    http: Client,
    server_url: String,
}

impl HttpOracle {
    /// Create an oracle for the given explorer base URL
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Probe one batch of addresses, hex-encoded on the wire
    pub async fn probe_batch(&self, addresses: &[AddressBytes]) -> Result<Vec<bool>> {
        let url = format!("{}/addresses/active", self.server_url);
        let request = ProbeRequest {
            addresses: addresses.iter().map(hex::encode).collect(),
        };

        tracing::debug!(batch_len = addresses.len(), "probing explorer");

        let resp = self.http.post(&url).json(&request).send().await?;

        if !resp.status().is_success() {
            return Err(ClientError::Server {
                status: resp.status().as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }

        let probe_resp: ProbeResponse = resp.json().await?;
        if probe_resp.active.len() != addresses.len() {
            return Err(ClientError::InvalidResponse(format!(
                "expected {} flags, got {}",
                addresses.len(),
                probe_resp.active.len()
            )));
        }

        Ok(probe_resp.active)
    }
}

impl ActivityOracle for HttpOracle {
    async fn probe(
        &mut self,
        addresses: &[AddressBytes],
    ) -> std::result::Result<Vec<bool>, BoxError> {
        self.probe_batch(addresses).await.map_err(Into::into)
    }
}
