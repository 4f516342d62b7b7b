//! The signed-in session: bearer token, cached user, and where the token
//! is persisted between runs.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::User;

/// Persists the bearer token between runs.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, ClientError>;
    async fn save(&self, token: &str) -> Result<(), ClientError>;
    async fn clear(&self) -> Result<(), ClientError>;
}

/// Keeps the token in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Keeps the token in a plain text file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>, ClientError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

/// Explicit session context shared by the API client and every store.
pub struct Session {
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl Session {
    /// An empty session backed by `store`.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// A session picking up a token saved by an earlier run. The user is
    /// unknown until it is fetched again.
    pub async fn restore(store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let token = store.load().await?;
        let session = Self::new(store);
        session.write().token = token;
        Ok(session)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().user.as_ref().is_some_and(|u| u.is_admin)
    }

    /// Persist the token first, then switch the session over to it.
    pub async fn sign_in(&self, token: String, user: User) -> Result<(), ClientError> {
        self.store.save(&token).await?;
        let mut state = self.write();
        state.token = Some(token);
        state.user = Some(user);
        Ok(())
    }

    pub fn set_user(&self, user: User) {
        self.write().user = Some(user);
    }

    /// Forget the token and user. Local state is cleared even when the
    /// store fails.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        *self.write() = SessionState::default();
        self.store.clear().await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        f.debug_struct("Session")
            .field("authenticated", &state.token.is_some())
            .field("user", &state.user.as_ref().map(|u| &u.email))
            .finish()
    }
}
