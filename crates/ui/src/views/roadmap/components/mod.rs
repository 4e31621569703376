mod detail;
mod level;
mod modals;
mod toolbar;

pub use detail::DetailModal;
pub use level::LevelSection;
pub use modals::RoadmapOverlays;
pub use toolbar::Toolbar;
