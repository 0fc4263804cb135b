//! Heritage Showcase library.
//!
//! The user-state container, catalog filtering and grouping, the quiz flow
//! and the simulated loading timers behind the cultural-heritage showcase.
//! All data comes from static fixtures; nothing is persisted.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod loading;
pub mod quiz;
pub mod state;
pub mod store;

pub use error::{Result, ShowcaseError};
pub use state::AppState;
