use roadmap_core::progress::{DoneSet, ProgressStats};
use roadmap_core::roadmap::Roadmap;

use super::node_vm::format_hours;

/// Progress header values: count label, bar width, hours line, ARIA numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressVm {
    pub done: usize,
    pub total: usize,
    pub percent: f64,
    pub count_label: String,
    pub hours_label: String,
    pub bar_style: String,
}

#[must_use]
pub fn build_progress_vm(roadmap: &Roadmap, done: &DoneSet) -> ProgressVm {
    let stats = ProgressStats::compute(roadmap, done);
    let hours_label = if stats.is_complete() {
        "Roadmap complete!".to_string()
    } else {
        format!("{} of study remaining", format_hours(stats.remaining_hours))
    };

    ProgressVm {
        done: stats.done,
        total: stats.total,
        percent: stats.percent,
        count_label: format!("{} of {} topics complete", stats.done, stats.total),
        hours_label,
        bar_style: format!("width: {:.1}%", stats.percent),
    }
}
