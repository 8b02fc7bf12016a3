//! # homedash-domain
//!
//! Pure domain model for the homedash smart-home dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Devices** (lights, fans, TVs, thermostats, ovens) and their invariants
//! - Define **Rooms** and the **Home** state tree with its factory configuration
//! - Define **Actions** and the pure reducer that applies them
//! - Define **Notifications** describing the outcome of an action
//! - Define the **Remote** shapes served by the status API
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod action;
pub mod device;
pub mod home;
pub mod notification;
pub mod remote;
pub mod room;
