//! Payload validation at the repository boundary.
//!
//! [`Validated`] wraps a writable repository and runs `validator` checks on
//! create, update and replace payloads before they reach the backend.
//! Invalid payloads fail with
//! [`RepoError::InvalidPayload`](crate::errors::RepoError::InvalidPayload)
//! carrying a flattened, user-readable message.

use async_trait::async_trait;
use validator::{Validate, ValidationErrors};

use crate::errors::{RepoError, RepoResult};
use crate::repository::{DeleteRepository, ReadRepository, WriteRepository};
use crate::types::Pagination;

/// Repository decorator that validates write payloads before delegating.
pub struct Validated<R> {
    inner: R,
}

impl<R> Validated<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// The wrapped repository.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn reject(errors: ValidationErrors) -> RepoError {
    RepoError::invalid_payload(format_validation_errors(&errors))
}

#[async_trait]
impl<R: ReadRepository> ReadRepository for Validated<R> {
    type Id = R::Id;
    type Item = R::Item;
    type Filter = R::Filter;

    async fn find(&self, id: Self::Id) -> RepoResult<Option<Self::Item>> {
        self.inner.find(id).await
    }

    async fn count(&self, filter: &Self::Filter) -> RepoResult<u64> {
        self.inner.count(filter).await
    }

    async fn list(
        &self,
        page: &Pagination,
        filter: &Self::Filter,
    ) -> RepoResult<Vec<Self::Item>> {
        self.inner.list(page, filter).await
    }
}

#[async_trait]
impl<R> WriteRepository for Validated<R>
where
    R: WriteRepository,
    R::Create: Validate,
    R::Update: Validate,
    R::Replace: Validate,
{
    type Create = R::Create;
    type Update = R::Update;
    type Replace = R::Replace;

    async fn add(&self, payload: Self::Create) -> RepoResult<Self::Item> {
        payload.validate().map_err(reject)?;
        self.inner.add(payload).await
    }

    async fn update(&self, id: Self::Id, payload: Self::Update) -> RepoResult<Self::Item> {
        payload.validate().map_err(reject)?;
        self.inner.update(id, payload).await
    }

    async fn replace(&self, id: Self::Id, payload: Self::Replace) -> RepoResult<Self::Item> {
        payload.validate().map_err(reject)?;
        self.inner.replace(id, payload).await
    }
}

#[async_trait]
impl<R: DeleteRepository> DeleteRepository for Validated<R> {
    async fn remove(&self, id: Self::Id) -> RepoResult<()> {
        self.inner.remove(id).await
    }
}
