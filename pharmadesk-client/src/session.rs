use std::sync::Arc;

use tokio::sync::RwLock;

/// Credential shared by every client built from the same [`ApiClient`](crate::ApiClient).
///
/// Cloning yields a handle to the same slot.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
        tracing::info!("session token stored");
    }

    /// Drop the credential. Returns whether one was held.
    pub async fn clear(&self) -> bool {
        let had = self.token.write().await.take().is_some();
        if had {
            tracing::info!("session token cleared");
        }
        had
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}
