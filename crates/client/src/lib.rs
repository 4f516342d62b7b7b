//! Typed client for the salon admin panel.
//!
//! Mirrors what an admin page does against the HTTP API: keep a session,
//! load a resource list, mutate it optimistically, roll back on failure and
//! surface short-lived notices.
//!
//! ```no_run
//! # async fn run() -> Result<(), salon_client::ClientError> {
//! use std::sync::Arc;
//! use salon_client::{ApiClient, Categories, MemoryTokenStore, ResourceStore, Session};
//!
//! let session = Arc::new(Session::new(Arc::new(MemoryTokenStore::default())));
//! let client = Arc::new(ApiClient::new("http://localhost:8000/api", session));
//! client.login("admin@salon.test", "secret-password").await?;
//!
//! let mut categories = ResourceStore::<Categories>::new(client);
//! categories.load().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod model;
pub mod notify;
pub mod resource;
pub mod selection;
pub mod session;
pub mod store;

pub use api::ApiClient;
pub use error::ClientError;
pub use notify::{Notice, NoticeKind, Notifier};
pub use resource::{Categories, Feedback, Portfolio, Resource, Services};
pub use selection::Selection;
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use store::{AlwaysConfirm, Confirm, RefreshPolicy, ResourceStore};
