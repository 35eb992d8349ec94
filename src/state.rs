// src/state.rs
use crate::config::ClientConfig;
use crate::services::chat_client::ChatTransport;
use crate::services::dispatcher::Dispatcher;
use crate::services::input::InputField;
use crate::services::transcript::Transcript;

/// The handles a host page owns: where the user types and where the chat is shown.
#[derive(Clone, Debug, Default)]
pub struct PageState {
    pub input: InputField,
    pub transcript: Transcript,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire a dispatcher to this page's input and transcript.
    pub fn dispatcher<T: ChatTransport>(&self, transport: T, config: &ClientConfig) -> Dispatcher<T> {
        Dispatcher::new(transport, self.input.clone(), self.transcript.clone(), config)
    }
}
