mod actions;
mod components;
pub(crate) mod scripts;
pub(crate) mod state;
mod view;

pub use state::use_roadmap_state;
pub use view::RoadmapView;
