// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body returned by the chat endpoint.
///
/// `reply` and `error` are exclusive by convention only; the server may send
/// `details` alongside `error` with the upstream body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self { reply: Some(text.into()), ..Default::default() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { error: Some(text.into()), ..Default::default() }
    }
}

/// What a decoded response means for the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerReply {
    Reply(String),
    Failure(String),
}

pub const MISSING_ERROR_TEXT: &str = "no reply received";

impl From<ChatResponse> for ServerReply {
    fn from(resp: ChatResponse) -> Self {
        // An empty reply counts as no reply.
        match resp.reply {
            Some(reply) if !reply.is_empty() => ServerReply::Reply(reply),
            _ => ServerReply::Failure(
                resp.error.unwrap_or_else(|| MISSING_ERROR_TEXT.to_string()),
            ),
        }
    }
}
