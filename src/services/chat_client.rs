// src/services/chat_client.rs
use std::future::Future;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::message::{ChatRequest, ChatResponse};

/// Something that can deliver one chat message and hand back the decoded body.
pub trait ChatTransport: Send + Sync {
    fn post_message(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatResponse, ClientError>> + Send;
}

/// POSTs to the configured chat endpoint. No timeout, no retry.
#[derive(Clone, Debug)]
pub struct HttpChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpChatClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self { client, endpoint: config.endpoint() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ChatTransport for HttpChatClient {
    async fn post_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        // Error bodies come with 5xx, so the status alone decides nothing.
        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "chat endpoint responded");

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { source, body })
    }
}
