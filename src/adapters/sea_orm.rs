//! SeaORM adapter.
//!
//! [`SeaOrmRepository`] implements the repository traits for any SeaORM
//! entity. Items are the entity's `Model`, write payloads are its
//! `ActiveModel`, and filters are [`Condition`] trees.

use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::IntoValueTuple;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, Database, DatabaseConnection, EntityTrait,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    QuerySelect,
};

use crate::errors::{OptionExt, RepoError, RepoResult};
use crate::repository::{DeleteRepository, ReadRepository, WriteRepository};
use crate::types::Pagination;

/// Connect to a database, normalizing the failure.
pub async fn connect(url: &str) -> RepoResult<DatabaseConnection> {
    let db = Database::connect(url).await.map_err(RepoError::from)?;
    tracing::info!("Database connected");
    Ok(db)
}

/// Repository over a SeaORM entity.
///
/// `E` is the entity, `A` its active model. The `Update` payload is expected
/// to set only the columns being changed; the `Replace` payload is expected
/// to set every column. The primary key is always stamped from the `id`
/// argument, so payloads cannot move an item to a different identity.
pub struct SeaOrmRepository<E, A> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> (E, A)>,
}

impl<E, A> SeaOrmRepository<E, A> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Get database connection reference
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl<E, A> SeaOrmRepository<E, A>
where
    E: EntityTrait,
    E::Model: Send + Sync + IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Sync,
{
    /// Shared write path for `update` and `replace`: surface missing rows as
    /// `NotFound`, stamp the primary key, then issue the UPDATE.
    async fn write_back(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
        mut payload: A,
    ) -> RepoResult<E::Model> {
        E::find_by_id(id.clone())
            .one(&self.db)
            .await
            .map_err(RepoError::from)?
            .ok_or_not_found()?;

        // Stamp the primary key; composite keys zip column-by-column.
        for (key, value) in E::PrimaryKey::iter().zip(id.into_value_tuple()) {
            payload.set(key.into_column(), value);
        }

        payload.update(&self.db).await.map_err(RepoError::from)
    }
}

#[async_trait]
impl<E, A> ReadRepository for SeaOrmRepository<E, A>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    A: Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Sync,
{
    type Id = <E::PrimaryKey as PrimaryKeyTrait>::ValueType;
    type Item = E::Model;
    type Filter = Condition;

    async fn find(&self, id: Self::Id) -> RepoResult<Option<E::Model>> {
        E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(RepoError::from)
    }

    async fn count(&self, filter: &Condition) -> RepoResult<u64> {
        E::find()
            .filter(filter.clone())
            .count(&self.db)
            .await
            .map_err(RepoError::from)
    }

    async fn list(&self, page: &Pagination, filter: &Condition) -> RepoResult<Vec<E::Model>> {
        E::find()
            .filter(filter.clone())
            .offset(page.offset)
            .limit(page.capped_limit())
            .all(&self.db)
            .await
            .map_err(RepoError::from)
    }
}

#[async_trait]
impl<E, A> WriteRepository for SeaOrmRepository<E, A>
where
    E: EntityTrait,
    E::Model: Send + Sync + IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Sync,
{
    type Create = A;
    type Update = A;
    type Replace = A;

    async fn add(&self, payload: A) -> RepoResult<E::Model> {
        payload.insert(&self.db).await.map_err(RepoError::from)
    }

    async fn update(&self, id: Self::Id, payload: A) -> RepoResult<E::Model> {
        self.write_back(id, payload).await
    }

    async fn replace(&self, id: Self::Id, payload: A) -> RepoResult<E::Model> {
        self.write_back(id, payload).await
    }
}

#[async_trait]
impl<E, A> DeleteRepository for SeaOrmRepository<E, A>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    A: Send + Sync + 'static,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Sync,
{
    async fn remove(&self, id: Self::Id) -> RepoResult<()> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(RepoError::from)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
