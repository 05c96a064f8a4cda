//! Page dots: one indicator per cell

use serde::Serialize;

/// Page dot state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageDots {
    count: usize,
    selected: Option<usize>,
}

impl PageDots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Index of the highlighted dot
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    /// Match the dot count to the cell count
    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
        if count == 0 {
            self.selected = None;
        } else if let Some(selected) = self.selected {
            self.selected = Some(selected.min(count - 1));
        }
    }

    pub(crate) fn update_selected(&mut self, index: usize) {
        self.selected = (index < self.count).then_some(index);
    }
}
