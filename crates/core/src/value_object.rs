//! Value object trait: equality by value, not identity.
//!
//! Catalog values such as slugs and prices have **no identity**; two of them
//! with the same contents are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "change" one,
/// construct a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Price(u64);
///
/// impl ValueObject for Price {}
///
/// assert_eq!(Price(4999), Price(4999));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
