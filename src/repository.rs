//! Core repository traits following Interface Segregation Principle (ISP).
//!
//! The interface is split into read, write and delete capabilities that can
//! be composed as needed; [`Repository`] combines all three. Adapters pick
//! the identifier, payload, item and filter types through associated types,
//! so consumers stay fully statically checked.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{OptionExt, RepoResult};
use crate::types::{Paginated, Pagination};

/// Read operations (Query) - Single Responsibility
#[async_trait]
pub trait ReadRepository: Send + Sync {
    /// Identifier items are looked up by.
    type Id: Send + Sync;

    /// Item returned by queries.
    type Item: Send;

    /// Backend-specific filter applied by `count` and `list`.
    type Filter: Send + Sync;

    /// Look up an item by identifier, `None` when absent.
    async fn find(&self, id: Self::Id) -> RepoResult<Option<Self::Item>>;

    /// Count items matching the filter.
    async fn count(&self, filter: &Self::Filter) -> RepoResult<u64>;

    /// List items matching the filter within the pagination window.
    async fn list(
        &self,
        page: &Pagination,
        filter: &Self::Filter,
    ) -> RepoResult<Vec<Self::Item>>;

    /// Look up an item by identifier, failing with
    /// [`RepoError::NotFound`](crate::errors::RepoError::NotFound) when absent.
    async fn get(&self, id: Self::Id) -> RepoResult<Self::Item> {
        self.find(id).await?.ok_or_not_found()
    }

    /// Whether an item exists under this identifier.
    async fn exists(&self, id: Self::Id) -> RepoResult<bool> {
        Ok(self.find(id).await?.is_some())
    }

    /// List items together with the total count for the filter.
    async fn list_paginated(
        &self,
        page: &Pagination,
        filter: &Self::Filter,
    ) -> RepoResult<Paginated<Self::Item>> {
        let total = self.count(filter).await?;
        let data = self.list(page, filter).await?;
        Ok(Paginated::new(data, page, total))
    }
}

/// Write operations (Command) - Single Responsibility
#[async_trait]
pub trait WriteRepository: ReadRepository {
    /// Payload for creating a new item.
    type Create: Send;

    /// Payload for partially updating an existing item.
    type Update: Send;

    /// Payload for replacing an existing item wholesale.
    type Replace: Send;

    /// Add a new item, returning it as stored.
    ///
    /// Fails with `Conflict` when an item with the same identity exists and
    /// `InvalidPayload` when the backend rejects the payload.
    async fn add(&self, payload: Self::Create) -> RepoResult<Self::Item>;

    /// Apply a partial update to the item under `id`.
    ///
    /// Fails with `NotFound` when no such item exists.
    async fn update(&self, id: Self::Id, payload: Self::Update) -> RepoResult<Self::Item>;

    /// Replace the item under `id` wholesale, keeping its identity.
    ///
    /// Fails with `NotFound` when no such item exists.
    async fn replace(&self, id: Self::Id, payload: Self::Replace) -> RepoResult<Self::Item>;
}

/// Delete operations - Single Responsibility
#[async_trait]
pub trait DeleteRepository: ReadRepository {
    /// Remove the item under `id`.
    ///
    /// Fails with `NotFound` when no such item exists.
    async fn remove(&self, id: Self::Id) -> RepoResult<()>;
}

/// Full CRUD repository - Combines all operations
///
/// Extend by implementing the individual capability traits; this one is
/// implemented automatically.
pub trait Repository: WriteRepository + DeleteRepository {}

// Auto-implement Repository for types implementing all capabilities
impl<T> Repository for T where T: WriteRepository + DeleteRepository {}

/// Owned trait object over the full repository surface.
///
/// Type parameters follow the operation payload order: identifier, create,
/// update, replace, item, filter.
pub type DynRepository<Id, Create, Update, Replace, Item, Filter> = Arc<
    dyn Repository<
        Id = Id,
        Create = Create,
        Update = Update,
        Replace = Replace,
        Item = Item,
        Filter = Filter,
    >,
>;
