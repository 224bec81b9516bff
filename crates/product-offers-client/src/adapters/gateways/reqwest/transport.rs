use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::entities::{GraphQLRequest, GraphQLResponse};
use crate::error::{ConfigError, Fault};
use crate::use_cases::ports::GraphQLTransport;

/// GraphQL over HTTP `POST` with a JSON body
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    endpoint: Url,
}

impl ReqwestTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Client honouring the configured endpoint and timeout
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl GraphQLTransport for ReqwestTransport {
    async fn execute(&self, request: &GraphQLRequest) -> Result<Value, Fault> {
        debug!(
            endpoint = %self.endpoint,
            operation = request.operation_name.as_deref().unwrap_or("<anonymous>"),
            "sending GraphQL request"
        );

        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(CACHE_CONTROL, "no-cache")
            .json(request);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Fault::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "GraphQL request rejected");
            return Err(Fault::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Fault::Transport(e.to_string()))?;
        let response: GraphQLResponse =
            serde_json::from_slice(&body).map_err(|e| Fault::Decode(e.to_string()))?;

        response.into_data()
    }
}
