pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod state;

pub use config::ClientConfig;
pub use services::chat_client::{ChatTransport, HttpChatClient};
pub use services::dispatcher::{Dispatcher, SendOutcome};
pub use services::transcript::{Entry, Origin, Transcript};
pub use state::PageState;
