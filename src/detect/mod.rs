//! Image detection client
//!
//! Forwards an image payload to the external detection service and relays
//! its JSON answer.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Detection failures
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("detection service request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("detection service answered {status}")]
    Upstream { status: u16 },
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    img: &'a Value,
}

/// Client for the detection service
#[derive(Debug, Clone)]
pub struct DetectClient {
    client: Client,
    service_url: String,
}

impl DetectClient {
    pub fn new(service_url: &str) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.to_string(),
        }
    }

    /// Run detection on `img`
    pub async fn detect(&self, img: &Value) -> Result<Value, DetectError> {
        let response = self
            .client
            .post(&self.service_url)
            .json(&DetectRequest { img })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DetectError::Upstream {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
