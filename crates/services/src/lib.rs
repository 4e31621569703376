#![forbid(unsafe_code)]

pub mod app_services;
pub mod dataset;
pub mod error;
pub mod progress_service;
pub mod transfer_service;

pub use roadmap_core::Clock;

pub use app_services::AppServices;
pub use dataset::roadmap_from_json;
pub use error::{AppServicesError, DatasetError, ProgressError, TransferError};
pub use progress_service::{
    ImportApplied, ProgressService, ProgressUpdate, ToggleOutcome, ToggleUpdate,
};
pub use transfer_service::TransferService;
