//! HTTP adapter.
//!
//! [`HttpRepository`] implements the repository traits over a REST-style
//! collection resource:
//!
//! - `GET  {collection}/{id}`: find
//! - `GET  {collection}?offset=&limit=&..`: list
//! - `GET  {collection}/count?..`: count (bare JSON integer body)
//! - `POST {collection}`: add
//! - `PATCH {collection}/{id}`: update
//! - `PUT  {collection}/{id}`: replace
//! - `DELETE {collection}/{id}`: remove
//!
//! Remote status codes are normalized into [`RepoError`] so callers never
//! see HTTP specifics.

use std::fmt::Display;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, HTTP_COUNT_SEGMENT, HTTP_LIMIT_PARAM, HTTP_OFFSET_PARAM,
};
use crate::errors::{RepoError, RepoResult};
use crate::repository::{DeleteRepository, ReadRepository, WriteRepository};
use crate::types::Pagination;

/// Query-string filter pairs passed through to the remote collection.
pub type QueryPairs = Vec<(String, String)>;

/// Options for building an [`HttpRepository`] client.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub timeout: Duration,
    /// Headers attached to every request (auth tokens, API keys).
    pub headers: HeaderMap,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            headers: HeaderMap::new(),
        }
    }
}

/// Repository over a remote REST collection.
///
/// Type parameters follow the operation payload order: identifier, create,
/// update and replace payloads, then the item.
pub struct HttpRepository<Id, C, U, R, I> {
    client: Client,
    collection: Url,
    _marker: PhantomData<fn(Id, C, U, R) -> I>,
}

impl<Id, C, U, R, I> HttpRepository<Id, C, U, R, I> {
    /// Repository with a default client configuration.
    pub fn new(collection: Url) -> RepoResult<Self> {
        Self::with_options(collection, HttpOptions::default())
    }

    /// Repository with explicit client options.
    pub fn with_options(collection: Url, options: HttpOptions) -> RepoResult<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .default_headers(options.headers)
            .build()
            .map_err(RepoError::from)?;
        Ok(Self::with_client(client, collection))
    }

    /// Repository reusing an existing client (connection pooling).
    pub fn with_client(client: Client, collection: Url) -> Self {
        Self {
            client,
            collection,
            _marker: PhantomData,
        }
    }

    fn sub_url(&self, segment: &str) -> RepoResult<Url> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| RepoError::internal("collection URL cannot be a base"))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }
}

impl<Id, C, U, R, I> HttpRepository<Id, C, U, R, I>
where
    Id: Display,
{
    fn item_url(&self, id: &Id) -> RepoResult<Url> {
        self.sub_url(&id.to_string())
    }
}

/// Normalize a remote status into the repository error taxonomy.
async fn check(response: Response) -> RepoResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => RepoError::NotFound,
        StatusCode::CONFLICT => RepoError::conflict(pick(detail, "remote item")),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            RepoError::invalid_payload(pick(detail, "rejected by remote collection"))
        }
        _ => {
            tracing::error!(status = %status, "Remote collection returned an error");
            RepoError::backend(format!("{}: {}", status, pick(detail, "no detail")))
        }
    })
}

fn pick(detail: String, fallback: &str) -> String {
    if detail.trim().is_empty() {
        fallback.to_string()
    } else {
        detail
    }
}

#[async_trait]
impl<Id, C, U, R, I> ReadRepository for HttpRepository<Id, C, U, R, I>
where
    Id: Display + Send + Sync,
    C: Send + Sync,
    U: Send + Sync,
    R: Send + Sync,
    I: DeserializeOwned + Send + Sync,
{
    type Id = Id;
    type Item = I;
    type Filter = QueryPairs;

    async fn find(&self, id: Id) -> RepoResult<Option<I>> {
        let response = self.client.get(self.item_url(&id)?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check(response).await?;
        Ok(Some(response.json().await?))
    }

    async fn count(&self, filter: &QueryPairs) -> RepoResult<u64> {
        let mut request = self.client.get(self.sub_url(HTTP_COUNT_SEGMENT)?);
        if !filter.is_empty() {
            request = request.query(filter);
        }

        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn list(&self, page: &Pagination, filter: &QueryPairs) -> RepoResult<Vec<I>> {
        let mut request = self.client.get(self.collection.clone());
        if let Some(offset) = page.offset {
            request = request.query(&[(HTTP_OFFSET_PARAM, offset)]);
        }
        if let Some(limit) = page.capped_limit() {
            request = request.query(&[(HTTP_LIMIT_PARAM, limit)]);
        }
        if !filter.is_empty() {
            request = request.query(filter);
        }

        let response = check(request.send().await?).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl<Id, C, U, R, I> WriteRepository for HttpRepository<Id, C, U, R, I>
where
    Id: Display + Send + Sync,
    C: Serialize + Send + Sync,
    U: Serialize + Send + Sync,
    R: Serialize + Send + Sync,
    I: DeserializeOwned + Send + Sync,
{
    type Create = C;
    type Update = U;
    type Replace = R;

    async fn add(&self, payload: C) -> RepoResult<I> {
        let response = self
            .client
            .post(self.collection.clone())
            .json(&payload)
            .send()
            .await?;

        let response = check(response).await?;
        Ok(response.json().await?)
    }

    async fn update(&self, id: Id, payload: U) -> RepoResult<I> {
        let response = self
            .client
            .patch(self.item_url(&id)?)
            .json(&payload)
            .send()
            .await?;

        let response = check(response).await?;
        Ok(response.json().await?)
    }

    async fn replace(&self, id: Id, payload: R) -> RepoResult<I> {
        let response = self
            .client
            .put(self.item_url(&id)?)
            .json(&payload)
            .send()
            .await?;

        let response = check(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl<Id, C, U, R, I> DeleteRepository for HttpRepository<Id, C, U, R, I>
where
    Id: Display + Send + Sync,
    C: Send + Sync,
    U: Send + Sync,
    R: Send + Sync,
    I: DeserializeOwned + Send + Sync,
{
    async fn remove(&self, id: Id) -> RepoResult<()> {
        let response = self.client.delete(self.item_url(&id)?).send().await?;
        check(response).await?;
        Ok(())
    }
}
