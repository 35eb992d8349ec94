// src/services/input.rs
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockWriteGuard};

/// Editable text field handle. Clones share the same value.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    inner: Arc<RwLock<String>>,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(value.into())) }
    }

    pub async fn set(&self, value: impl Into<String>) {
        *self.inner.write().await = value.into();
    }

    pub async fn value(&self) -> String {
        self.inner.read().await.clone()
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    /// Exclusive access to the field; other handles wait until the guard drops.
    pub async fn edit(&self) -> RwLockWriteGuard<'_, String> {
        self.inner.write().await
    }

    /// Trimmed value, or `None` when nothing but whitespace is typed.
    pub async fn trimmed(&self) -> Option<String> {
        let guard = self.inner.read().await;
        let trimmed = guard.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
