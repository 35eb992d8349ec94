// src/services/dispatcher.rs
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::message::{ChatRequest, ServerReply};
use crate::services::chat_client::ChatTransport;
use crate::services::input::InputField;
use crate::services::transcript::{Entry, Origin, Transcript};

/// How a single `send_message` call ended.
#[derive(Clone, Debug)]
pub enum SendOutcome {
    /// Input was blank; nothing happened.
    Skipped,
    Replied(Entry),
    ServerError(Entry),
    TransportError(Entry),
}

impl SendOutcome {
    /// The entry appended for the response, if any.
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            SendOutcome::Skipped => None,
            SendOutcome::Replied(e)
            | SendOutcome::ServerError(e)
            | SendOutcome::TransportError(e) => Some(e),
        }
    }
}

/// Sends what is typed into `input` and records both sides in `transcript`.
///
/// Cloning is cheap and clones act on the same input, transcript and
/// transport. Concurrent sends are not coordinated; their entries interleave
/// in whatever order the responses arrive.
pub struct Dispatcher<T> {
    transport: Arc<T>,
    input: InputField,
    transcript: Transcript,
    warning_prefix: Arc<str>,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            input: self.input.clone(),
            transcript: self.transcript.clone(),
            warning_prefix: Arc::clone(&self.warning_prefix),
        }
    }
}

impl<T: ChatTransport> Dispatcher<T> {
    pub fn new(transport: T, input: InputField, transcript: Transcript, config: &ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            input,
            transcript,
            warning_prefix: Arc::from(config.warning_prefix.as_str()),
        }
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub async fn send_message(&self) -> SendOutcome {
        match self.capture().await {
            Some(request) => self.deliver(request).await,
            None => SendOutcome::Skipped,
        }
    }

    /// Moves the typed text into the transcript and clears the field.
    /// Returns `None`, touching nothing, when the field is blank.
    ///
    /// The field stays locked from the read until it is cleared, so a `set`
    /// through another handle lands either before the read or after the clear.
    pub async fn capture(&self) -> Option<ChatRequest> {
        let mut field = self.input.edit().await;
        let message = field.trim().to_string();
        if message.is_empty() {
            return None;
        }
        self.transcript.append(Origin::User, message.as_str()).await;
        field.clear();
        Some(ChatRequest::new(message))
    }

    /// Posts a captured message and records the reply, or a warning when the
    /// server reports an error or the request itself fails.
    pub async fn deliver(&self, request: ChatRequest) -> SendOutcome {
        debug!(len = request.message.len(), "sending chat message");

        match self.transport.post_message(&request).await {
            Ok(response) => {
                if let Some(details) = response.details.as_deref() {
                    warn!(details, "chat endpoint reported details");
                }
                match ServerReply::from(response) {
                    ServerReply::Reply(reply) => {
                        SendOutcome::Replied(self.transcript.append(Origin::Bot, reply).await)
                    }
                    ServerReply::Failure(error) => {
                        warn!(%error, "chat endpoint returned an error");
                        SendOutcome::ServerError(self.append_warning(&error).await)
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "chat request failed");
                SendOutcome::TransportError(self.append_warning(&err.to_string()).await)
            }
        }
    }

    async fn append_warning(&self, text: &str) -> Entry {
        self.transcript
            .append(Origin::Error, format!("{}{}", self.warning_prefix, text))
            .await
    }
}
