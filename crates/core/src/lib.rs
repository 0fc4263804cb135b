//! Heritage Showcase Core - Shared types library.
//!
//! This crate provides the plain data types used across all Heritage
//! Showcase components:
//! - `showcase` - User-state container, catalog filtering, quiz flow
//! - `cli` - Command-line surface over the showcase library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no timers, no global state.
//! Catalog records are immutable once deserialized from fixtures.
//!
//! # Modules
//!
//! - [`types`] - Ids, variants, prices, emails, languages, catalog and quiz records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
