//! # homedash-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `StateStorage` — named durable entries holding the serialized home state
//!   - `NotificationPublisher` — outcome of every mutation attempt
//!   - `StatusClient` — read access to the remote status server
//! - Define **driving/inbound ports** as use-case structs:
//!   - `HomeStore` — load, dispatch actions, persist, notify
//!   - `StatusService` — remote views with stale-response protection
//! - Provide **in-process infrastructure** (notification bus) that doesn't need IO
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `homedash-domain` only, plus `tokio::sync` and `tokio-stream` for
//! channels, locks and notification streams.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod notification_bus;
pub mod ports;
pub mod services;
