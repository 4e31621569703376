use std::sync::Arc;

use roadmap_core::model::NodeId;
use roadmap_core::progress::DoneSet;
use roadmap_core::roadmap::Roadmap;
use roadmap_core::unlock::check_completion;
use storage::repository::ProgressRepository;

use crate::error::ProgressError;

/// Owns the done-set lifecycle: load, gated toggle, clear, replace.
///
/// Every mutating operation returns a fresh `DoneSet` snapshot and persists
/// it immediately; callers install the snapshot and surface `persisted ==
/// false` as a user-visible warning. The in-memory mutation is never rolled
/// back on save failure, so state and storage may diverge until the next
/// successful save.
#[derive(Clone)]
pub struct ProgressService {
    roadmap: Arc<Roadmap>,
    progress: Arc<dyn ProgressRepository>,
}

/// A mutation result: the new snapshot plus whether it reached storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub done: DoneSet,
    pub persisted: bool,
}

/// Which direction a toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Marked,
    Unmarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleUpdate {
    pub update: ProgressUpdate,
    pub outcome: ToggleOutcome,
}

/// Result of an import-driven replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportApplied {
    pub update: ProgressUpdate,
    /// Identifiers accepted into the new done-set.
    pub imported: usize,
    /// Identifiers dropped because the roadmap does not know them.
    pub dropped: usize,
}

impl ProgressService {
    #[must_use]
    pub fn new(roadmap: Arc<Roadmap>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { roadmap, progress }
    }

    /// Restore the done-set from storage, keeping only known identifiers.
    ///
    /// Storage trouble degrades to an empty set with a warning; startup is
    /// never blocked on a broken store.
    pub async fn load(&self) -> DoneSet {
        let raw = match self.progress.load().await {
            Ok(ids) => ids,
            Err(err) => {
                tracing::warn!(error = %err, "could not read saved progress, starting empty");
                return DoneSet::new();
            }
        };
        let total = raw.len();
        let done = DoneSet::from_known(raw.into_iter().map(NodeId::from), &self.roadmap);
        if done.len() < total {
            tracing::debug!(
                dropped = total - done.len(),
                "dropped stale identifiers from saved progress"
            );
        }
        done
    }

    /// Flip a node's membership in the done-set.
    ///
    /// Marking is gated: a locked node is rejected with the titles of its
    /// pending prerequisites and the set is left unchanged. Un-marking always
    /// succeeds and never cascades to dependents.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownNode` for identifiers outside the
    /// roadmap and `ProgressError::Locked` when the completion gate rejects.
    pub async fn toggle(
        &self,
        done: &DoneSet,
        id: &NodeId,
    ) -> Result<ToggleUpdate, ProgressError> {
        let node = self
            .roadmap
            .node(id)
            .ok_or_else(|| ProgressError::UnknownNode(id.as_str().to_owned()))?;

        let mut next = done.clone();
        let outcome = if next.contains(id) {
            next.remove(id);
            ToggleOutcome::Unmarked
        } else {
            check_completion(node, done).map_err(|blocked| ProgressError::Locked {
                pending: blocked
                    .pending
                    .iter()
                    .map(|pid| self.display_title(pid))
                    .collect(),
            })?;
            next.insert(id.clone());
            ToggleOutcome::Marked
        };

        let persisted = self.persist(&next).await;
        Ok(ToggleUpdate {
            update: ProgressUpdate {
                done: next,
                persisted,
            },
            outcome,
        })
    }

    /// Empty the done-set unconditionally. Confirmation is the caller's job.
    pub async fn clear(&self) -> ProgressUpdate {
        let next = DoneSet::new();
        let persisted = self.persist(&next).await;
        ProgressUpdate {
            done: next,
            persisted,
        }
    }

    /// Atomically replace the done-set with a validated identifier list.
    ///
    /// Unknown identifiers are dropped, not errored; the previous set is
    /// discarded wholesale (import replaces, never merges).
    pub async fn replace(&self, ids: Vec<String>) -> ImportApplied {
        let total = ids.len();
        let next = DoneSet::from_known(ids.into_iter().map(NodeId::from), &self.roadmap);
        let imported = next.len();
        let persisted = self.persist(&next).await;
        ImportApplied {
            update: ProgressUpdate {
                done: next,
                persisted,
            },
            imported,
            dropped: total - imported,
        }
    }

    fn display_title(&self, id: &NodeId) -> String {
        self.roadmap
            .node(id)
            .map_or_else(|| id.as_str().to_owned(), |node| node.title.clone())
    }

    async fn persist(&self, done: &DoneSet) -> bool {
        match self.progress.save(&done.to_strings()).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "could not save progress");
                false
            }
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use roadmap_core::model::{Level, LevelId, Node};
    use storage::repository::{InMemoryRepository, StorageError};

    fn node(id: &str, requires: &[&str]) -> Node {
        Node {
            id: NodeId::new(id),
            title: format!("Topic {id}"),
            subject: "Math".to_string(),
            description: String::new(),
            icon: "•".to_string(),
            topics: Vec::new(),
            requires: requires.iter().map(|r| NodeId::new(*r)).collect(),
            estimated_hours: None,
            resources: None,
            questions: None,
        }
    }

    fn roadmap() -> Arc<Roadmap> {
        Arc::new(
            Roadmap::new(vec![Level {
                id: LevelId::new("l1"),
                label: "L1".to_string(),
                badge: "badge".to_string(),
                nodes: vec![node("a", &[]), node("b", &["a"])],
            }])
            .unwrap(),
        )
    }

    fn service() -> (ProgressService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let svc = ProgressService::new(roadmap(), repo.clone());
        (svc, repo)
    }

    struct FailingRepo;

    #[async_trait]
    impl storage::repository::ProgressRepository for FailingRepo {
        async fn load(&self) -> Result<Vec<String>, StorageError> {
            Err(StorageError::Connection("down".to_string()))
        }

        async fn save(&self, _ids: &[String]) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".to_string()))
        }

        async fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Connection("down".to_string()))
        }
    }

    #[tokio::test]
    async fn load_filters_unknown_ids() {
        let (svc, repo) = service();
        repo.save(&["a".to_string(), "ghost".to_string()])
            .await
            .unwrap();
        let done = svc.load().await;
        assert!(done.contains(&NodeId::new("a")));
        assert_eq!(done.len(), 1);
    }

    #[tokio::test]
    async fn toggle_marks_persists_and_unmarks() {
        let (svc, repo) = service();
        let done = DoneSet::new();

        let marked = svc.toggle(&done, &NodeId::new("a")).await.unwrap();
        assert_eq!(marked.outcome, ToggleOutcome::Marked);
        assert!(marked.update.persisted);
        assert!(marked.update.done.contains(&NodeId::new("a")));
        assert_eq!(repo.load().await.unwrap(), vec!["a".to_string()]);

        let unmarked = svc
            .toggle(&marked.update.done, &NodeId::new("a"))
            .await
            .unwrap();
        assert_eq!(unmarked.outcome, ToggleOutcome::Unmarked);
        assert_eq!(unmarked.update.done, done);
        assert_eq!(repo.load().await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn locked_node_is_rejected_with_pending_titles() {
        let (svc, repo) = service();
        let done = DoneSet::new();

        let err = svc.toggle(&done, &NodeId::new("b")).await.unwrap_err();
        assert_eq!(
            err,
            ProgressError::Locked {
                pending: vec!["Topic a".to_string()]
            }
        );
        // State and storage are untouched by the rejection.
        assert_eq!(repo.load().await.unwrap(), Vec::<String>::new());

        // After the prerequisite is done, the same toggle succeeds.
        let with_a = svc.toggle(&done, &NodeId::new("a")).await.unwrap();
        let with_b = svc
            .toggle(&with_a.update.done, &NodeId::new("b"))
            .await
            .unwrap();
        assert!(with_b.update.done.contains(&NodeId::new("b")));
    }

    #[tokio::test]
    async fn unmarking_prerequisite_keeps_dependent_done() {
        let (svc, _repo) = service();
        let done = DoneSet::new();
        let done = svc.toggle(&done, &NodeId::new("a")).await.unwrap().update.done;
        let done = svc.toggle(&done, &NodeId::new("b")).await.unwrap().update.done;

        // Un-doing "a" must not cascade: "b" stays done.
        let done = svc.toggle(&done, &NodeId::new("a")).await.unwrap().update.done;
        assert!(!done.contains(&NodeId::new("a")));
        assert!(done.contains(&NodeId::new("b")));
    }

    #[tokio::test]
    async fn unknown_node_is_rejected() {
        let (svc, _repo) = service();
        let err = svc
            .toggle(&DoneSet::new(), &NodeId::new("ghost"))
            .await
            .unwrap_err();
        assert_eq!(err, ProgressError::UnknownNode("ghost".to_string()));
    }

    #[tokio::test]
    async fn replace_drops_unknown_and_reports_counts() {
        let (svc, repo) = service();
        let applied = svc
            .replace(vec!["a".to_string(), "ghost-id".to_string()])
            .await;
        assert_eq!(applied.imported, 1);
        assert_eq!(applied.dropped, 1);
        assert!(applied.update.done.contains(&NodeId::new("a")));
        assert_eq!(repo.load().await.unwrap(), vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn clear_empties_set() {
        let (svc, repo) = service();
        svc.replace(vec!["a".to_string()]).await;
        let update = svc.clear().await;
        assert!(update.done.is_empty());
        assert!(update.persisted);
        assert_eq!(repo.load().await.unwrap(), Vec::<String>::new());
    }

    #[tokio::test]
    async fn save_failure_keeps_in_memory_mutation() {
        let svc = ProgressService::new(roadmap(), Arc::new(FailingRepo));

        let marked = svc
            .toggle(&DoneSet::new(), &NodeId::new("a"))
            .await
            .unwrap();
        // The mutation survives; only the persisted flag reports the failure.
        assert!(marked.update.done.contains(&NodeId::new("a")));
        assert!(!marked.update.persisted);
    }

    #[tokio::test]
    async fn load_failure_degrades_to_empty() {
        let svc = ProgressService::new(roadmap(), Arc::new(FailingRepo));
        assert!(svc.load().await.is_empty());
    }
}
