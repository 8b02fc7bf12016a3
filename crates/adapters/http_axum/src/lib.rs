//! # homedash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON API** over the home store (`/api/home`, `/api/actions`, …)
//! - Stream notifications as **Server-Sent Events** (`/api/notifications/stream`)
//! - Proxy the remote status views (`/api/remote/...`) through the status service
//! - Map application results into HTTP responses
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for port traits and services) and `homedash-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
