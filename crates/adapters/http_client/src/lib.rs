//! # homedash-adapter-http-client
//!
//! Client of the remote status server built on [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the `StatusClient` port defined in `homedash-app::ports`
//! - Percent-encode path segments and query values
//! - Turn transport failures and non-2xx answers into a single displayable error
//!
//! No retry and no caching: callers decide what to do with a failure.
//!
//! ## Dependency rule
//! Depends on `homedash-app` (for port traits) and `homedash-domain` (for the
//! remote shapes). The `app` and `domain` crates must never reference this adapter.

pub mod client;
pub mod error;

pub use client::{ClientConfig, HttpStatusClient};
pub use error::ClientError;
