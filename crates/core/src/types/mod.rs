//! Core types for Heritage Showcase.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod catalog;
pub mod email;
pub mod id;
pub mod language;
pub mod price;
pub mod quiz;
pub mod variant;

pub use catalog::*;
pub use email::{Email, EmailError};
pub use id::*;
pub use language::Language;
pub use price::{Price, PriceRange, PriceRangeError};
pub use quiz::{Question, Quiz, QuizResult};
pub use variant::{ItemRef, Variant, VariantParseError};
