// src/services/mod.rs
pub mod chat_client;
pub mod dispatcher;
pub mod input;
pub mod render;
pub mod transcript;
