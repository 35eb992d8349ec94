// src/services/transcript.rs
use std::{
    fmt::Debug,
    sync::Arc,
    time::Instant,
};

use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

/// Buffered appends per subscriber before it starts lagging.
const SUBSCRIBER_CAPACITY: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    User,
    Bot,
    Error,
}

/// One rendered line of the chat. `text` is plain text, never markup.
#[derive(Clone, Debug)]
pub struct Entry {
    pub id: Uuid,
    pub origin: Origin,
    pub text: String,
    pub timestamp: Instant,
}

impl Entry {
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            text: text.into(),
            timestamp: Instant::now(),
        }
    }
}

/// Append-only chat transcript shared between the dispatcher and whoever
/// displays it. Cloning yields another handle to the same list.
#[derive(Clone)]
pub struct Transcript {
    inner: Arc<RwLock<Vec<Entry>>>,
    appended: broadcast::Sender<Entry>,
}

impl Debug for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcript")
            .field("subscribers", &self.appended.receiver_count())
            .finish()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    pub fn new() -> Self {
        let (appended, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Self {
            inner: Arc::new(RwLock::new(Vec::new())),
            appended,
        }
    }

    /// Append an entry and notify subscribers.
    pub async fn append(&self, origin: Origin, text: impl Into<String>) -> Entry {
        let entry = Entry::new(origin, text);
        let mut guard = self.inner.write().await;
        guard.push(entry.clone());
        // Sent under the lock so subscribers see append order. No subscribers is fine.
        let _ = self.appended.send(entry.clone());
        entry
    }

    /// Receive every entry appended after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Entry> {
        self.appended.subscribe()
    }

    /// Copy of all entries in append order.
    pub async fn entries(&self) -> Vec<Entry> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Most recent entry with the given origin.
    pub async fn latest(&self, origin: Origin) -> Option<Entry> {
        let guard = self.inner.read().await;
        guard.iter().rev().find(|e| e.origin == origin).cloned()
    }

    pub async fn count(&self, origin: Origin) -> usize {
        let guard = self.inner.read().await;
        guard.iter().filter(|e| e.origin == origin).count()
    }
}
