mod ids;
mod level;
mod node;

pub use ids::{LevelId, NodeId};
pub use level::Level;
pub use node::{Node, NodeError, Question, Resource};
