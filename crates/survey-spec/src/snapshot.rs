use serde::{Deserialize, Serialize};

/// Navigation and display state for the current position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSnapshot {
    pub position: usize,
    pub total_count: usize,
    pub show_previous: bool,
    pub show_done: bool,
    pub current_question: String,
}

impl ScreenSnapshot {
    pub(crate) fn at(position: usize, total_count: usize, current_question: &str) -> Self {
        Self {
            position,
            total_count,
            show_previous: position > 0,
            show_done: position + 1 == total_count,
            current_question: current_question.to_string(),
        }
    }

    /// One-based counter for display, e.g. `2 of 6`.
    pub fn display_index(&self) -> usize {
        self.position + 1
    }
}
