//! Generic repository pattern for Rust applications.
//!
//! This crate decouples application logic from a specific persistence
//! technology: code depends on the core repository traits and one adapter is
//! substituted at composition time.
//!
//! # Modules
//!
//! - **repository**: core CRUD + query traits ([`ReadRepository`],
//!   [`WriteRepository`], [`DeleteRepository`], combined as [`Repository`])
//! - **adapters**: backend implementations (in-memory always; SeaORM and
//!   HTTP behind their features)
//! - **mapper**: fallible transformations between ids, payloads and items
//! - **composition**: [`MappedRepository`], a repository built from another
//!   repository plus a set of mappers
//! - **validation**: payload validation decorator (feature `validation`)
//! - **errors**: the backend-agnostic error type every adapter normalizes to
//! - **types**: pagination primitives
//!
//! # Features
//!
//! Adapters install like the optional extras of a distribution package:
//!
//! - `http`: REST-resource adapter backed by `reqwest`
//! - `sea-orm`: relational adapter over any SeaORM entity
//! - `validation`: `validator`-based payload checking at the write boundary
//!
//! The core traits, the in-memory adapter and the mapper layer are always
//! available.

pub mod adapters;
pub mod composition;
pub mod constants;
pub mod errors;
pub mod mapper;
pub mod repository;
pub mod types;

#[cfg(feature = "validation")]
pub mod validation;

// Re-export commonly used types at crate root
pub use adapters::memory::{MemoryEntity, MemoryRepository, Predicate};
pub use composition::MappedRepository;
pub use errors::{OptionExt, RepoError, RepoResult};
pub use mapper::{Chained, FnMapper, IntoMapper, JsonMapper, Mapper, ReverseMapper};
pub use repository::{
    DeleteRepository, DynRepository, ReadRepository, Repository, WriteRepository,
};
pub use types::{Paginated, Pagination, PaginationMeta};

#[cfg(feature = "http")]
pub use adapters::http::{HttpOptions, HttpRepository, QueryPairs};

#[cfg(feature = "sea-orm")]
pub use adapters::sea_orm::SeaOrmRepository;

#[cfg(feature = "validation")]
pub use validation::Validated;
