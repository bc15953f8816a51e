//! Application state definitions

use super::forms::{FormField, FormValues};
use crate::registration;

/// Which input has keyboard focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// A scalar field, by name
    Field(String),
    HobbyValue(usize),
    HobbyLevel(usize),
    AddHobby,
    Submit,
}

impl Focus {
    /// Field name to mark as touched when focus leaves
    pub fn touched_name(&self) -> &str {
        match self {
            Focus::Field(name) => name,
            Focus::HobbyValue(_) | Focus::HobbyLevel(_) => registration::HOBBIES,
            Focus::AddHobby | Focus::Submit => "",
        }
    }

    pub fn hobby_index(&self) -> Option<usize> {
        match self {
            Focus::HobbyValue(i) | Focus::HobbyLevel(i) => Some(*i),
            _ => None,
        }
    }
}

/// Focusable inputs in tab order, skipping fields that are hidden
pub fn focus_order(fields: &[FormField], values: &FormValues) -> Vec<Focus> {
    let mut order: Vec<Focus> = fields
        .iter()
        .filter(|f| registration::is_visible(&f.name, values))
        .map(|f| Focus::Field(f.name.clone()))
        .collect();
    for index in 0..values.list(registration::HOBBIES).len() {
        order.push(Focus::HobbyValue(index));
        order.push(Focus::HobbyLevel(index));
    }
    order.push(Focus::AddHobby);
    order.push(Focus::Submit);
    order
}

/// UI state that is not part of the form itself
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Position in the current focus order
    pub focus_index: usize,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Currently focused input, clamped to the order's length
    pub fn focus(&self, order: &[Focus]) -> Focus {
        let index = self.focus_index.min(order.len().saturating_sub(1));
        order.get(index).cloned().unwrap_or(Focus::Submit)
    }

    pub fn next_focus(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        self.focus_index = (self.focus_index.min(count - 1) + 1) % count;
    }

    pub fn prev_focus(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let current = self.focus_index.min(count - 1);
        self.focus_index = if current == 0 { count - 1 } else { current - 1 };
    }

    /// Move focus onto `target` if it is in `order`
    pub fn set_focus(&mut self, order: &[Focus], target: &Focus) {
        if let Some(index) = order.iter().position(|f| f == target) {
            self.focus_index = index;
        }
    }
}
