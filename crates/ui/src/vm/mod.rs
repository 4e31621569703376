mod detail_vm;
mod focus;
mod markdown_vm;
mod node_vm;
mod progress_vm;

pub use detail_vm::{
    DetailVm, MarkAction, PrereqBanner, QuestionVm, ResourceListVm, ResourceVm, build_detail_vm,
    default_resources,
};
pub use focus::{
    CLOSE_BUTTON_ID, DetailTab, MARK_BUTTON_ID, focusable_targets, next_focus, question_toggle_id,
    resource_link_id,
};
pub use markdown_vm::markdown_to_html;
pub use node_vm::{
    LevelVm, NodeCardVm, NodeVisual, RoadmapVm, build_roadmap_vm, format_hours, node_dom_id,
};
pub use progress_vm::{ProgressVm, build_progress_vm};
