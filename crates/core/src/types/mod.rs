//! Core types for NUI Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod id;

pub use cart::CartLine;
pub use catalog::*;
pub use id::*;
