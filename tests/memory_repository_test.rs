//! In-memory adapter tests.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use generic_repository::{
    DeleteRepository, MemoryEntity, MemoryRepository, Pagination, Predicate, ReadRepository,
    RepoError, WriteRepository,
};

#[derive(Debug, Clone, PartialEq)]
struct Task {
    id: Uuid,
    title: String,
    done: bool,
    created_at: DateTime<Utc>,
}

struct TaskDraft {
    id: Uuid,
    title: String,
}

struct TaskPatch {
    title: Option<String>,
    done: Option<bool>,
}

struct TaskReplacement {
    title: String,
    done: bool,
}

impl MemoryEntity for Task {
    type Id = Uuid;
    type Draft = TaskDraft;
    type Patch = TaskPatch;
    type Replacement = TaskReplacement;

    fn from_draft(draft: TaskDraft) -> Self {
        Task {
            id: draft.id,
            title: draft.title,
            done: false,
            created_at: Utc::now(),
        }
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn apply_patch(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(done) = patch.done {
            self.done = done;
        }
    }

    fn from_replacement(id: Uuid, payload: TaskReplacement) -> Self {
        Task {
            id,
            title: payload.title,
            done: payload.done,
            created_at: Utc::now(),
        }
    }
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        id: Uuid::new_v4(),
        title: title.to_string(),
    }
}

#[tokio::test]
async fn add_then_get_round_trips() {
    let repo = MemoryRepository::<Task>::new();

    let added = repo.add(draft("write tests")).await.unwrap();
    let fetched = repo.get(added.id).await.unwrap();

    assert_eq!(fetched, added);
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let repo = MemoryRepository::<Task>::new();

    let result = repo.get(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn find_missing_is_none() {
    let repo = MemoryRepository::<Task>::new();

    assert!(repo.find(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn exists_reflects_membership() {
    let repo = MemoryRepository::<Task>::new();
    let added = repo.add(draft("a")).await.unwrap();

    assert!(repo.exists(added.id).await.unwrap());
    assert!(!repo.exists(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn duplicate_add_is_conflict() {
    let repo = MemoryRepository::<Task>::new();
    let id = Uuid::new_v4();

    repo.add(TaskDraft {
        id,
        title: "first".into(),
    })
    .await
    .unwrap();

    let result = repo
        .add(TaskDraft {
            id,
            title: "second".into(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), RepoError::Conflict(_)));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn update_then_get_reflects_patch() {
    let repo = MemoryRepository::<Task>::new();
    let added = repo.add(draft("initial")).await.unwrap();

    let updated = repo
        .update(
            added.id,
            TaskPatch {
                title: Some("renamed".into()),
                done: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "renamed");
    assert!(updated.done);

    let fetched = repo.get(added.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn partial_patch_leaves_other_fields() {
    let repo = MemoryRepository::<Task>::new();
    let added = repo.add(draft("keep me")).await.unwrap();

    let updated = repo
        .update(
            added.id,
            TaskPatch {
                title: None,
                done: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "keep me");
    assert!(updated.done);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let repo = MemoryRepository::<Task>::new();

    let result = repo
        .update(
            Uuid::new_v4(),
            TaskPatch {
                title: None,
                done: None,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn replace_rebuilds_item_keeping_identity() {
    let repo = MemoryRepository::<Task>::new();
    let added = repo.add(draft("old")).await.unwrap();

    let replaced = repo
        .replace(
            added.id,
            TaskReplacement {
                title: "new".into(),
                done: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(replaced.id, added.id);
    assert_eq!(replaced.title, "new");
    assert!(replaced.done);
}

#[tokio::test]
async fn replace_missing_is_not_found() {
    let repo = MemoryRepository::<Task>::new();

    let result = repo
        .replace(
            Uuid::new_v4(),
            TaskReplacement {
                title: "x".into(),
                done: false,
            },
        )
        .await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn remove_then_get_is_not_found() {
    let repo = MemoryRepository::<Task>::new();
    let added = repo.add(draft("ephemeral")).await.unwrap();

    repo.remove(added.id).await.unwrap();

    assert!(matches!(
        repo.get(added.id).await.unwrap_err(),
        RepoError::NotFound
    ));
}

#[tokio::test]
async fn remove_missing_is_not_found() {
    let repo = MemoryRepository::<Task>::new();

    let result = repo.remove(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}

#[tokio::test]
async fn list_is_insertion_ordered_and_windowed() {
    let repo = MemoryRepository::<Task>::new();
    let mut titles = Vec::new();
    for title in ["a", "b", "c", "d"] {
        titles.push(repo.add(draft(title)).await.unwrap().title);
    }

    let window = repo
        .list(&Pagination::new(1, 2), &Predicate::default())
        .await
        .unwrap();

    let windowed: Vec<&str> = window.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(windowed, vec!["b", "c"]);

    let everything = repo
        .list(&Pagination::all(), &Predicate::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 4);
}

#[tokio::test]
async fn count_agrees_with_filtered_list() {
    let repo = MemoryRepository::<Task>::new();
    for title in ["one", "two", "three"] {
        let added = repo.add(draft(title)).await.unwrap();
        if title != "two" {
            repo.update(
                added.id,
                TaskPatch {
                    title: None,
                    done: Some(true),
                },
            )
            .await
            .unwrap();
        }
    }

    let done_only = Predicate::new(|task: &Task| task.done);
    let count = repo.count(&done_only).await.unwrap();
    let listed = repo.list(&Pagination::all(), &done_only).await.unwrap();

    assert_eq!(count, 2);
    assert_eq!(listed.len() as u64, count);
    assert!(listed.iter().all(|task| task.done));
}

#[tokio::test]
async fn list_paginated_reports_total_beyond_window() {
    let repo = MemoryRepository::<Task>::new();
    for title in ["a", "b", "c", "d", "e"] {
        repo.add(draft(title)).await.unwrap();
    }

    let page = repo
        .list_paginated(&Pagination::new(0, 2), &Predicate::default())
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.meta.total, 5);
    assert_eq!(page.meta.offset, 0);
    assert_eq!(page.meta.limit, Some(2));
}

#[tokio::test]
async fn with_items_seeds_the_store() {
    let seeded = Task {
        id: Uuid::new_v4(),
        title: "seeded".into(),
        done: false,
        created_at: Utc::now(),
    };
    let repo = MemoryRepository::with_items([seeded.clone()]);

    assert_eq!(repo.get(seeded.id).await.unwrap(), seeded);
}
