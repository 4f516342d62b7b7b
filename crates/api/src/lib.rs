//! Salon API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! storage, CAPTCHA verification) so integration tests and the binaries can
//! both access them.

pub mod auth;
pub mod captcha;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
