//! `storefront-catalog`: the records a storefront lists and displays.
//!
//! Records are read-only from the web layer; they are created and edited by
//! whatever back office owns the catalog store.

pub mod category;
pub mod price;
pub mod product;
pub mod size;
pub mod slug;

pub use category::Category;
pub use price::Price;
pub use product::Product;
pub use size::Size;
pub use slug::Slug;
