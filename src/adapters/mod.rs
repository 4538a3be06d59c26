//! Backend adapters implementing the core repository traits.
//!
//! The in-memory adapter is always available; the SeaORM and HTTP adapters
//! are enabled by their features.

pub mod memory;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "sea-orm")]
pub mod sea_orm;
