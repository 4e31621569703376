use std::sync::Arc;

use roadmap_core::roadmap::Roadmap;
use storage::repository::Storage;

use crate::Clock;
use crate::dataset::roadmap_from_json;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::transfer_service::TransferService;

/// Assembles the app-facing services around one roadmap and one store.
#[derive(Clone)]
pub struct AppServices {
    roadmap: Arc<Roadmap>,
    progress: Arc<ProgressService>,
    transfer: Arc<TransferService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or dataset
    /// parsing fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        dataset_json: &str,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let roadmap = Arc::new(roadmap_from_json(dataset_json)?);
        Ok(Self::with_storage(storage, clock, roadmap))
    }

    /// Build services over an already-constructed store and roadmap.
    ///
    /// This is the composition point shared by the desktop binary, the
    /// headless transfer commands, and the test harnesses.
    #[must_use]
    pub fn with_storage(storage: Storage, clock: Clock, roadmap: Arc<Roadmap>) -> Self {
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&roadmap),
            Arc::clone(&storage.progress),
        ));
        let transfer = Arc::new(TransferService::new(clock));
        Self {
            roadmap,
            progress,
            transfer,
        }
    }

    #[must_use]
    pub fn roadmap(&self) -> Arc<Roadmap> {
        Arc::clone(&self.roadmap)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn transfer(&self) -> Arc<TransferService> {
        Arc::clone(&self.transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::time::fixed_clock;

    const DATASET: &str = r#"[
        {"id": "l1", "label": "L1", "badge": "b", "nodes": [
            {"id": "a", "title": "A", "sub": "s", "desc": "", "icon": "i"}
        ]}
    ]"#;

    #[tokio::test]
    async fn builds_over_in_memory_storage() {
        let roadmap = Arc::new(roadmap_from_json(DATASET).unwrap());
        let services = AppServices::with_storage(Storage::in_memory(), fixed_clock(), roadmap);
        assert_eq!(services.roadmap().node_count(), 1);
        assert!(services.progress().load().await.is_empty());
    }
}
