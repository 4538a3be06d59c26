//! Composite repository implementation.
//!
//! [`MappedRepository`] implements the repository traits by translating
//! identifiers, payloads and items through mappers for an underlying
//! repository implementation. The inner adapter keeps its native types while
//! the application sees its own.

use async_trait::async_trait;

use crate::errors::RepoResult;
use crate::mapper::Mapper;
use crate::repository::{DeleteRepository, ReadRepository, WriteRepository};
use crate::types::Pagination;

/// Repository adapter built from another repository plus mappers.
///
/// Mapper roles, by field:
/// - `id_mapper`: outer id -> inner id
/// - `create_mapper` / `update_mapper` / `replace_mapper`: outer payload ->
///   inner payload
/// - `item_mapper`: inner item -> outer item
///
/// Filters and pagination pass through unchanged.
pub struct MappedRepository<R, IdM, CreateM, UpdateM, ReplaceM, ItemM> {
    inner: R,
    id_mapper: IdM,
    create_mapper: CreateM,
    update_mapper: UpdateM,
    replace_mapper: ReplaceM,
    item_mapper: ItemM,
}

impl<R, IdM, CreateM, UpdateM, ReplaceM, ItemM>
    MappedRepository<R, IdM, CreateM, UpdateM, ReplaceM, ItemM>
{
    pub fn new(
        inner: R,
        id_mapper: IdM,
        create_mapper: CreateM,
        update_mapper: UpdateM,
        replace_mapper: ReplaceM,
        item_mapper: ItemM,
    ) -> Self {
        Self {
            inner,
            id_mapper,
            create_mapper,
            update_mapper,
            replace_mapper,
            item_mapper,
        }
    }

    /// The wrapped repository.
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R, IdM, CreateM, UpdateM, ReplaceM, ItemM> ReadRepository
    for MappedRepository<R, IdM, CreateM, UpdateM, ReplaceM, ItemM>
where
    R: ReadRepository,
    IdM: Mapper<Out = R::Id>,
    IdM::In: Send + Sync,
    ItemM: Mapper<In = R::Item>,
    ItemM::Out: Send,
    CreateM: Send + Sync,
    UpdateM: Send + Sync,
    ReplaceM: Send + Sync,
{
    type Id = IdM::In;
    type Item = ItemM::Out;
    type Filter = R::Filter;

    async fn find(&self, id: Self::Id) -> RepoResult<Option<Self::Item>> {
        match self.inner.find(self.id_mapper.map(id)?).await? {
            Some(item) => Ok(Some(self.item_mapper.map(item)?)),
            None => Ok(None),
        }
    }

    async fn count(&self, filter: &Self::Filter) -> RepoResult<u64> {
        self.inner.count(filter).await
    }

    async fn list(
        &self,
        page: &Pagination,
        filter: &Self::Filter,
    ) -> RepoResult<Vec<Self::Item>> {
        self.inner
            .list(page, filter)
            .await?
            .into_iter()
            .map(|item| self.item_mapper.map(item))
            .collect()
    }
}

#[async_trait]
impl<R, IdM, CreateM, UpdateM, ReplaceM, ItemM> WriteRepository
    for MappedRepository<R, IdM, CreateM, UpdateM, ReplaceM, ItemM>
where
    R: WriteRepository,
    IdM: Mapper<Out = R::Id>,
    IdM::In: Send + Sync,
    ItemM: Mapper<In = R::Item>,
    ItemM::Out: Send,
    CreateM: Mapper<Out = R::Create>,
    CreateM::In: Send,
    UpdateM: Mapper<Out = R::Update>,
    UpdateM::In: Send,
    ReplaceM: Mapper<Out = R::Replace>,
    ReplaceM::In: Send,
{
    type Create = CreateM::In;
    type Update = UpdateM::In;
    type Replace = ReplaceM::In;

    async fn add(&self, payload: Self::Create) -> RepoResult<Self::Item> {
        let created = self.inner.add(self.create_mapper.map(payload)?).await?;
        self.item_mapper.map(created)
    }

    async fn update(&self, id: Self::Id, payload: Self::Update) -> RepoResult<Self::Item> {
        let updated = self
            .inner
            .update(self.id_mapper.map(id)?, self.update_mapper.map(payload)?)
            .await?;
        self.item_mapper.map(updated)
    }

    async fn replace(&self, id: Self::Id, payload: Self::Replace) -> RepoResult<Self::Item> {
        let replaced = self
            .inner
            .replace(self.id_mapper.map(id)?, self.replace_mapper.map(payload)?)
            .await?;
        self.item_mapper.map(replaced)
    }
}

#[async_trait]
impl<R, IdM, CreateM, UpdateM, ReplaceM, ItemM> DeleteRepository
    for MappedRepository<R, IdM, CreateM, UpdateM, ReplaceM, ItemM>
where
    R: DeleteRepository,
    IdM: Mapper<Out = R::Id>,
    IdM::In: Send + Sync,
    ItemM: Mapper<In = R::Item>,
    ItemM::Out: Send,
    CreateM: Send + Sync,
    UpdateM: Send + Sync,
    ReplaceM: Send + Sync,
{
    async fn remove(&self, id: Self::Id) -> RepoResult<()> {
        self.inner.remove(self.id_mapper.map(id)?).await
    }
}
