use thiserror::Error;

use crate::model::NodeError;
use crate::roadmap::RoadmapError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Roadmap(#[from] RoadmapError),
    #[error(transparent)]
    Node(#[from] NodeError),
}
