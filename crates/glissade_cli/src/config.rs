//! Scenario file handling
//!
//! A scenario is a TOML file that describes a viewport, the cells to lay
//! out, slider options, and a script of host interactions:
//!
//! ```toml
//! [scenario]
//! name = "wrap drag"
//! viewport = 400
//!
//! [cells]
//! count = 6
//! width = 150
//!
//! [slider]
//! wrapAround = true
//!
//! [[steps]]
//! action = "drag"
//! dx = -220
//!
//! [[steps]]
//! action = "settle"
//! ```

use anyhow::{Context, Result};
use glissade_core::ElementId;
use glissade_platform::{Key, PointerKind};
use glissade_slider::{Cell, CellSize, Direction, SliderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// =============================================================================
// Scenario
// =============================================================================

/// A scripted slider session
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub scenario: ScenarioMetadata,
    #[serde(default)]
    pub cells: CellsConfig,
    /// Slider options, camelCase keys as on a host page
    #[serde(default)]
    pub slider: SliderOptions,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Scenario metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct ScenarioMetadata {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Viewport width in pixels
    #[serde(default = "default_viewport")]
    pub viewport: f32,
}

impl Default for ScenarioMetadata {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            viewport: default_viewport(),
        }
    }
}

fn default_name() -> String {
    "scenario".to_string()
}

fn default_viewport() -> f32 {
    400.0
}

// =============================================================================
// Cells
// =============================================================================

/// Cells laid out when the scenario starts
///
/// Either `count` uniform cells, or one cell per entry of `sizes`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CellsConfig {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    /// Margin on both sides of every uniform cell
    pub margin: f32,
    pub sizes: Vec<CellSizeConfig>,
}

impl Default for CellsConfig {
    fn default() -> Self {
        Self {
            count: 5,
            width: 200.0,
            height: 150.0,
            margin: 0.0,
            sizes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSizeConfig {
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub margin_left: f32,
    #[serde(default)]
    pub margin_right: f32,
}

impl CellsConfig {
    /// Size of cells added by `insert` steps
    pub fn uniform_size(&self) -> Result<CellSize> {
        let size = CellSize::new(self.width, self.height)?.with_margins(self.margin, self.margin)?;
        Ok(size)
    }

    /// Build the initial cells, numbering elements from zero
    pub fn build(&self) -> Result<Vec<Cell>> {
        if self.sizes.is_empty() {
            let size = self.uniform_size().context("Invalid [cells] size")?;
            return Ok((0..self.count as u64)
                .map(|i| Cell::new(ElementId(i), size))
                .collect());
        }

        self.sizes
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let size = CellSize::new(entry.width, entry.height)
                    .and_then(|size| size.with_margins(entry.margin_left, entry.margin_right))
                    .with_context(|| format!("Invalid size for cell {}", i))?;
                Ok(Cell::new(ElementId(i as u64), size))
            })
            .collect()
    }
}

// =============================================================================
// Steps
// =============================================================================

/// One scripted interaction
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Select {
        index: isize,
        #[serde(default)]
        wrap: bool,
        #[serde(default)]
        instant: bool,
    },
    Next {
        #[serde(default)]
        wrap: bool,
    },
    Previous {
        #[serde(default)]
        wrap: bool,
    },
    /// Press, move in even steps, release
    Drag(DragStep),
    /// Let time pass, running frames and timers
    Wait { ms: u64 },
    /// Run frames until the slider stops animating
    Settle {
        #[serde(default = "default_max_frames")]
        max_frames: usize,
    },
    /// Insert uniform cells before `at`, or append
    Insert {
        #[serde(default)]
        at: Option<usize>,
        #[serde(default = "default_insert_count")]
        count: usize,
    },
    /// Remove the cells currently at these indices
    Remove { indices: Vec<usize> },
    /// Host viewport resize (debounced by the slider)
    Resize { width: f32 },
    /// Tap a cell without dragging
    Click { index: usize },
    Key { key: ArrowKey },
    Hover { inside: bool },
    Visibility { hidden: bool },
    /// Tap a page dot
    Dot { index: usize },
    /// Tap a previous/next button
    Button { direction: Direction },
}

impl Step {
    /// Action name as written in scenario files
    pub fn action(&self) -> &'static str {
        match self {
            Step::Select { .. } => "select",
            Step::Next { .. } => "next",
            Step::Previous { .. } => "previous",
            Step::Drag(_) => "drag",
            Step::Wait { .. } => "wait",
            Step::Settle { .. } => "settle",
            Step::Insert { .. } => "insert",
            Step::Remove { .. } => "remove",
            Step::Resize { .. } => "resize",
            Step::Click { .. } => "click",
            Step::Key { .. } => "key",
            Step::Hover { .. } => "hover",
            Step::Visibility { .. } => "visibility",
            Step::Dot { .. } => "dot",
            Step::Button { .. } => "button",
        }
    }
}

pub const DEFAULT_MAX_FRAMES: usize = 5_000;

fn default_max_frames() -> usize {
    DEFAULT_MAX_FRAMES
}

fn default_insert_count() -> usize {
    1
}

/// A scripted pointer drag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DragStep {
    /// Horizontal travel in pixels
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    #[serde(default = "default_drag_duration")]
    pub duration_ms: u64,
    /// Number of move samples between press and release
    #[serde(default = "default_drag_moves")]
    pub moves: u32,
    #[serde(default)]
    pub kind: PointerKind,
    /// Press position, defaults to the viewport center
    #[serde(default)]
    pub start_x: Option<f32>,
    /// End with a pointer cancel instead of a release
    #[serde(default)]
    pub cancel: bool,
}

fn default_drag_duration() -> u64 {
    150
}

fn default_drag_moves() -> u32 {
    5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowKey {
    Left,
    Right,
}

impl From<ArrowKey> for Key {
    fn from(key: ArrowKey) -> Self {
        match key {
            ArrowKey::Left => Key::ArrowLeft,
            ArrowKey::Right => Key::ArrowRight,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl ScenarioConfig {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ScenarioConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Check everything that can be checked before running
    pub fn validate(&self) -> Result<()> {
        let viewport = self.scenario.viewport;
        if !viewport.is_finite() || viewport <= 0.0 {
            anyhow::bail!("Viewport width must be positive, got {}", viewport);
        }

        self.slider.validate().context("Invalid [slider] options")?;
        self.cells.build()?;
        if self.steps.iter().any(|step| matches!(step, Step::Insert { .. })) {
            self.cells
                .uniform_size()
                .context("Invalid [cells] size for inserted cells")?;
        }

        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Drag(drag) if drag.moves == 0 => {
                    anyhow::bail!("Step {} (drag): moves must be at least 1", i + 1);
                }
                Step::Resize { width } if !width.is_finite() || *width <= 0.0 => {
                    anyhow::bail!("Step {} (resize): width must be positive", i + 1);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glissade_slider::AutoPlay;

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let config = ScenarioConfig::from_toml("").unwrap();
        assert_eq!(config.scenario.name, "scenario");
        assert_eq!(config.scenario.viewport, 400.0);
        assert_eq!(config.cells.count, 5);
        assert_eq!(config.slider, SliderOptions::default());
        assert!(config.steps.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_scenario() {
        let config = ScenarioConfig::from_toml(
            r#"
            [scenario]
            name = "demo"
            viewport = 320

            [cells]
            sizes = [{ width = 100, height = 80 }, { width = 140, marginLeft = 10 }]

            [slider]
            wrapAround = true
            autoPlay = 1500
            cellAlign = "left"

            [[steps]]
            action = "drag"
            dx = -120
            kind = "touch"

            [[steps]]
            action = "button"
            direction = "next"

            [[steps]]
            action = "key"
            key = "left"
            "#,
        )
        .unwrap();

        assert_eq!(config.scenario.viewport, 320.0);
        assert!(config.slider.wrap_around);
        assert_eq!(config.slider.auto_play, AutoPlay::Millis(1500));

        let cells = config.cells.build().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].size().outer_width(), 150.0);

        match &config.steps[0] {
            Step::Drag(drag) => {
                assert_eq!(drag.dx, -120.0);
                assert_eq!(drag.kind, PointerKind::Touch);
                assert_eq!(drag.moves, 5);
                assert!(!drag.cancel);
            }
            other => panic!("expected drag, got {:?}", other),
        }
        assert!(matches!(
            config.steps[1],
            Step::Button {
                direction: Direction::Next
            }
        ));
        assert_eq!(config.steps[2].action(), "key");
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = ScenarioConfig::from_toml(
            r#"
            [[steps]]
            action = "teleport"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ScenarioConfig::from_toml("[slider]\nfriction = 1.5").unwrap();
        assert!(config.validate().is_err());

        let config = ScenarioConfig::from_toml("[cells]\nwidth = -10").unwrap();
        assert!(config.validate().is_err());

        let config = ScenarioConfig::from_toml(
            r#"
            [[steps]]
            action = "drag"
            dx = 50
            moves = 0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
