//! Previous / next buttons

use serde::{Deserialize, Serialize};

/// Which way a button navigates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Index step for this direction
    pub fn step(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    /// Check if the button sits on the left edge of the viewport
    pub fn is_left(self, right_to_left: bool) -> bool {
        (self == Direction::Previous) != right_to_left
    }
}

/// A navigation button and whether it can be pressed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrevNextButton {
    direction: Direction,
    enabled: bool,
    /// Drawn at the left edge of the viewport
    on_left: bool,
}

impl PrevNextButton {
    pub fn new(direction: Direction, right_to_left: bool) -> Self {
        Self {
            direction,
            enabled: false,
            on_left: direction.is_left(right_to_left),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_on_left(&self) -> bool {
        self.on_left
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disable at the matching extremity unless wrapping applies
    pub(crate) fn update(&mut self, cell_count: usize, selected: usize, wrap_around: bool) {
        if cell_count == 0 {
            self.enabled = false;
            return;
        }
        if wrap_around && cell_count > 1 {
            self.enabled = true;
            return;
        }
        let boundary = match self.direction {
            Direction::Previous => 0,
            Direction::Next => cell_count - 1,
        };
        self.enabled = selected != boundary;
    }
}
