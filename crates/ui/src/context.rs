use std::sync::Arc;

use roadmap_core::roadmap::Roadmap;
use roadmap_core::search::SearchIndex;
use services::{ProgressService, TransferService};

/// What the UI needs from the application composition root.
pub trait UiApp: Send + Sync {
    fn roadmap(&self) -> Arc<Roadmap>;
    fn progress(&self) -> Arc<ProgressService>;
    fn transfer(&self) -> Arc<TransferService>;
}

/// Immutable handles shared by every view for the process lifetime.
///
/// The search index is derived from the roadmap once, here, so views never
/// rebuild per-node search text.
#[derive(Clone)]
pub struct AppContext {
    roadmap: Arc<Roadmap>,
    progress: Arc<ProgressService>,
    transfer: Arc<TransferService>,
    search: Arc<SearchIndex>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let roadmap = app.roadmap();
        let search = Arc::new(SearchIndex::new(&roadmap));
        Self {
            roadmap,
            progress: app.progress(),
            transfer: app.transfer(),
            search,
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

    #[must_use]
    pub fn search(&self) -> Arc<SearchIndex> {
        Arc::clone(&self.search)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
