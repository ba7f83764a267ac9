//! `storefront-core`: shared building blocks for the storefront crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ProductId, SizeId};
pub use value_object::ValueObject;
