//! Domain types and pure business rules for the salon backend.
//!
//! This crate has no I/O. It is shared by the repository layer, the HTTP
//! server, and the admin client so the same rules (slugs, prices, category
//! types, upload checks) apply everywhere.

pub mod category;
pub mod environment;
pub mod error;
pub mod prices;
pub mod slug;
pub mod types;
pub mod upload;
