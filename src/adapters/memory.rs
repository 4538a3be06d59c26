//! In-memory adapter.
//!
//! Backs the repository traits with a process-local keyed collection. Useful
//! as a test double and for small collections that never leave the process.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{OptionExt, RepoError, RepoResult};
use crate::repository::{DeleteRepository, ReadRepository, WriteRepository};
use crate::types::Pagination;

/// Entity stored by [`MemoryRepository`].
///
/// The entity owns its identity policy: [`MemoryEntity::from_draft`] mints
/// the item (and its id) from a create payload, the store never generates
/// identifiers itself.
pub trait MemoryEntity: Clone + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Create payload.
    type Draft: Send + 'static;

    /// Partial-update payload.
    type Patch: Send + 'static;

    /// Wholesale-replacement payload.
    type Replacement: Send + 'static;

    /// Mint a new item from a create payload.
    fn from_draft(draft: Self::Draft) -> Self;

    /// The item's identifier.
    fn id(&self) -> Self::Id;

    /// Apply a partial update in place.
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Rebuild the item from a replacement payload, keeping the identity.
    fn from_replacement(id: Self::Id, payload: Self::Replacement) -> Self;
}

/// Filter over in-memory items; the default matches everything.
pub struct Predicate<T>(Arc<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Predicate<T> {
    pub fn new(check: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.0)(item)
    }
}

impl<T> Default for Predicate<T> {
    fn default() -> Self {
        Self(Arc::new(|_| true))
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

struct Slot<T> {
    seq: u64,
    item: T,
}

struct Shelf<T: MemoryEntity> {
    items: HashMap<T::Id, Slot<T>>,
    next_seq: u64,
}

/// Repository over a process-local keyed collection.
///
/// Listing order is insertion order, so pagination windows are stable.
pub struct MemoryRepository<T: MemoryEntity> {
    shelf: RwLock<Shelf<T>>,
}

impl<T: MemoryEntity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            shelf: RwLock::new(Shelf {
                items: HashMap::new(),
                next_seq: 0,
            }),
        }
    }

    /// Seed the store with existing items. A later duplicate id replaces the
    /// earlier item.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let mut shelf = Shelf {
            items: HashMap::new(),
            next_seq: 0,
        };
        for item in items {
            let seq = shelf.next_seq;
            shelf.next_seq += 1;
            shelf.items.insert(item.id(), Slot { seq, item });
        }
        Self {
            shelf: RwLock::new(shelf),
        }
    }

    /// Number of stored items, ignoring filters.
    pub async fn len(&self) -> usize {
        self.shelf.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shelf.read().await.items.is_empty()
    }
}

impl<T: MemoryEntity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: MemoryEntity> ReadRepository for MemoryRepository<T> {
    type Id = T::Id;
    type Item = T;
    type Filter = Predicate<T>;

    async fn find(&self, id: T::Id) -> RepoResult<Option<T>> {
        let shelf = self.shelf.read().await;
        Ok(shelf.items.get(&id).map(|slot| slot.item.clone()))
    }

    async fn count(&self, filter: &Predicate<T>) -> RepoResult<u64> {
        let shelf = self.shelf.read().await;
        let matching = shelf
            .items
            .values()
            .filter(|slot| filter.matches(&slot.item))
            .count();
        Ok(matching as u64)
    }

    async fn list(&self, page: &Pagination, filter: &Predicate<T>) -> RepoResult<Vec<T>> {
        let shelf = self.shelf.read().await;
        let mut slots: Vec<&Slot<T>> = shelf
            .items
            .values()
            .filter(|slot| filter.matches(&slot.item))
            .collect();
        slots.sort_by_key(|slot| slot.seq);

        let offset = page.offset.unwrap_or(0) as usize;
        let windowed = slots.into_iter().skip(offset).map(|slot| slot.item.clone());
        Ok(match page.capped_limit() {
            Some(limit) => windowed.take(limit as usize).collect(),
            None => windowed.collect(),
        })
    }
}

#[async_trait]
impl<T: MemoryEntity> WriteRepository for MemoryRepository<T> {
    type Create = T::Draft;
    type Update = T::Patch;
    type Replace = T::Replacement;

    async fn add(&self, payload: T::Draft) -> RepoResult<T> {
        let item = T::from_draft(payload);
        let id = item.id();

        let mut shelf = self.shelf.write().await;
        if shelf.items.contains_key(&id) {
            return Err(RepoError::conflict(format!("item {:?}", id)));
        }

        let seq = shelf.next_seq;
        shelf.next_seq += 1;
        shelf.items.insert(
            id,
            Slot {
                seq,
                item: item.clone(),
            },
        );
        Ok(item)
    }

    async fn update(&self, id: T::Id, payload: T::Patch) -> RepoResult<T> {
        let mut shelf = self.shelf.write().await;
        let slot = shelf.items.get_mut(&id).ok_or(RepoError::NotFound)?;
        slot.item.apply_patch(payload);
        Ok(slot.item.clone())
    }

    async fn replace(&self, id: T::Id, payload: T::Replacement) -> RepoResult<T> {
        let mut shelf = self.shelf.write().await;
        let slot = shelf.items.get_mut(&id).ok_or(RepoError::NotFound)?;
        slot.item = T::from_replacement(id, payload);
        Ok(slot.item.clone())
    }
}

#[async_trait]
impl<T: MemoryEntity> DeleteRepository for MemoryRepository<T> {
    async fn remove(&self, id: T::Id) -> RepoResult<()> {
        let mut shelf = self.shelf.write().await;
        shelf.items.remove(&id).ok_or_not_found()?;
        Ok(())
    }
}
