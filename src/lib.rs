//! Partsbin - search and listings for a second-hand PC hardware marketplace.
//!
//! Partsbin keeps a typed catalog of hardware (CPUs, GPUs, motherboards,
//! power supplies, memory, storage and cases), lets sellers list catalog
//! entries, and searches both with attribute filters built from request
//! parameters followed by fuzzy ranking on a text field.

pub mod types;
pub mod error;
pub mod config;
pub mod catalog;
pub mod listing;
pub mod params;
pub mod filter;
pub mod builder;
pub mod searchers;
pub mod store;
pub mod engine;
pub mod import;

pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::types::*;
    pub use crate::error::*;
    pub use crate::config::*;
    pub use crate::catalog::{Product, ProductKind, Specs};
    pub use crate::listing::*;
    pub use crate::params::*;
    pub use crate::filter::*;
    pub use crate::builder::*;
    pub use crate::searchers::*;
    pub use crate::store::*;
    pub use crate::engine::*;
    pub use crate::import::*;
}
