//! NUI Market Core - Shared types library.
//!
//! This crate provides common types used across all NUI Market components:
//! - `storefront` - In-game storefront overlay service
//! - `integration-tests` - Cross-module test scenarios
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no host
//! channel. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog entities, write-surface inputs, and
//!   cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
