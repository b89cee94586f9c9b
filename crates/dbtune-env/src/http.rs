//! HTTP client gateway for a live tuning target

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use dbtune_core::{KnobSpec, KnobValue, MetricSample, Result, TuneError};

use crate::gateway::EnvironmentGateway;

/// Gateway speaking JSON over HTTP to the target-side tuning service.
///
/// No retry and no timeout policy of its own; if either is needed it
/// belongs in the transport configuration of the caller.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Create a gateway against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Generic POST request with a JSON body and a JSON response.
    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| TuneError::Connectivity(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TuneError::Connectivity(format!(
                "{url} failed ({status}): {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| TuneError::Connectivity(format!("{url}: invalid response: {e}")))
    }
}

#[derive(Debug, Serialize)]
struct InstanceRequest<'a> {
    instance_name: &'a str,
}

#[derive(Debug, Serialize)]
struct ApplyKnobsRequest<'a> {
    instance_name: &'a str,
    knobs: &'a [KnobValue],
}

#[derive(Debug, Serialize)]
struct KnobDescriptorsRequest<'a> {
    instance_name: &'a str,
    knob_names: &'a [String],
}

#[derive(Debug, Deserialize)]
struct AckResponse {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
}

#[derive(Debug, Deserialize)]
struct StateResponse {
    metrics: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct KnobDescriptorsResponse {
    knobs: Vec<KnobSpec>,
}

#[async_trait]
impl EnvironmentGateway for HttpGateway {
    async fn initialize(&self, instance: &str) -> Result<()> {
        let _: AckResponse = self
            .post(
                "/api/v1/environment/init",
                &InstanceRequest {
                    instance_name: instance,
                },
            )
            .await?;
        Ok(())
    }

    async fn read_state(&self, instance: &str) -> Result<Vec<f64>> {
        let resp: StateResponse = self
            .post(
                "/api/v1/environment/state",
                &InstanceRequest {
                    instance_name: instance,
                },
            )
            .await?;
        Ok(resp.metrics)
    }

    async fn read_reward_metrics(&self, instance: &str) -> Result<MetricSample> {
        self.post(
            "/api/v1/environment/metrics",
            &InstanceRequest {
                instance_name: instance,
            },
        )
        .await
    }

    async fn apply_knobs(&self, instance: &str, knobs: &[KnobValue]) -> Result<()> {
        let _: AckResponse = self
            .post(
                "/api/v1/knobs/apply",
                &ApplyKnobsRequest {
                    instance_name: instance,
                    knobs,
                },
            )
            .await?;
        Ok(())
    }

    async fn read_knob_descriptors(
        &self,
        instance: &str,
        knob_names: &[String],
    ) -> Result<Vec<KnobSpec>> {
        let resp: KnobDescriptorsResponse = self
            .post(
                "/api/v1/knobs/describe",
                &KnobDescriptorsRequest {
                    instance_name: instance,
                    knob_names,
                },
            )
            .await?;
        Ok(resp.knobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpGateway::new("http://localhost:7003/");
        assert_eq!(gateway.base_url, "http://localhost:7003");
    }
}
