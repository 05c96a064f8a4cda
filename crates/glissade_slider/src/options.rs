//! Slider options
//!
//! Options deserialize from the camelCase object form used by host pages
//! (`{"wrapAround": true, "cellAlign": "left"}`) and from TOML tables in the
//! CLI. Missing keys take their defaults and unknown keys are ignored.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SliderError};

/// Autoplay interval used by `autoPlay: true`
pub const DEFAULT_AUTOPLAY_INTERVAL: Duration = Duration::from_millis(3000);

/// Slider configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderOptions {
    /// Arrow keys navigate while focused
    pub accessibility: bool,
    /// Advance automatically
    pub auto_play: AutoPlay,
    /// Where the selected cell sits in the viewport
    pub cell_align: CellAlign,
    /// Keep cells from scrolling past the content edges
    pub contain: bool,
    pub draggable: bool,
    /// Glide freely after release instead of snapping to a cell
    pub free_scroll: bool,
    pub free_scroll_friction: f32,
    pub friction: f32,
    /// Cell selected on activation, clamped into the cell range
    pub initial_index: isize,
    pub page_dots: bool,
    pub pause_auto_play_on_hover: bool,
    /// Render positions as a percentage of the viewport width
    pub percent_position: bool,
    pub prev_next_buttons: bool,
    /// Honour host resize events
    pub resize: bool,
    pub right_to_left: bool,
    pub selected_attraction: f32,
    /// Report the tallest cell as the gallery height
    pub set_gallery_size: bool,
    pub touch_vertical_scroll: TouchVerticalScroll,
    /// Let a host breakpoint decide whether the slider is active
    #[serde(rename = "watchCSS")]
    pub watch_css: WatchCss,
    pub wrap_around: bool,
}

impl Default for SliderOptions {
    fn default() -> Self {
        Self {
            accessibility: true,
            auto_play: AutoPlay::default(),
            cell_align: CellAlign::CENTER,
            contain: false,
            draggable: true,
            free_scroll: false,
            free_scroll_friction: 0.075,
            friction: 0.28,
            initial_index: 0,
            page_dots: true,
            pause_auto_play_on_hover: true,
            percent_position: true,
            prev_next_buttons: true,
            resize: true,
            right_to_left: false,
            selected_attraction: 0.025,
            set_gallery_size: true,
            touch_vertical_scroll: TouchVerticalScroll::Enabled,
            watch_css: WatchCss::Off,
            wrap_around: false,
        }
    }
}

impl SliderOptions {
    /// Parse options from a JSON object and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Return a copy with the keys of `overrides` applied on top
    ///
    /// `overrides` must be a JSON object; other values leave the options
    /// unchanged.
    pub fn merged(&self, overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(self)?;
        if let (Value::Object(base), Value::Object(overrides)) = (&mut base, overrides) {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }
        let options: Self = serde_json::from_value(base)?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("friction", self.friction)?;
        check_unit_interval("freeScrollFriction", self.free_scroll_friction)?;
        check_unit_interval("selectedAttraction", self.selected_attraction)?;

        if let CellAlign::Fraction(fraction) = self.cell_align {
            if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                return Err(SliderError::InvalidOption {
                    name: "cellAlign",
                    reason: format!("fraction {} is outside [0, 1]", fraction),
                });
            }
        }

        if self.auto_play == AutoPlay::Millis(0) {
            return Err(SliderError::InvalidOption {
                name: "autoPlay",
                reason: "interval must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// `initialIndex` clamped to a cell of a slider with `cell_count` cells
    pub fn initial_cell(&self, cell_count: usize) -> usize {
        usize::try_from(self.initial_index)
            .unwrap_or(0)
            .min(cell_count.saturating_sub(1))
    }

    /// Alignment fraction resolved against the origin side
    pub fn align_fraction(&self) -> f32 {
        self.cell_align.fraction(self.right_to_left)
    }
}

fn check_unit_interval(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(SliderError::InvalidOption {
            name,
            reason: format!("{} is outside (0, 1)", value),
        })
    }
}

// ============================================================================
// Option value types
// ============================================================================

/// `autoPlay`: a flag or an interval in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AutoPlay {
    Toggle(bool),
    Millis(u64),
}

impl Default for AutoPlay {
    fn default() -> Self {
        AutoPlay::Toggle(false)
    }
}

impl AutoPlay {
    /// Interval between advances, None when autoplay is off
    pub fn interval(self) -> Option<Duration> {
        match self {
            AutoPlay::Toggle(false) => None,
            AutoPlay::Toggle(true) => Some(DEFAULT_AUTOPLAY_INTERVAL),
            AutoPlay::Millis(ms) => Some(Duration::from_millis(ms)),
        }
    }
}

/// Named cell alignment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedAlign {
    Left,
    Center,
    Right,
}

/// `cellAlign`: a named alignment or a fraction of the cell width
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellAlign {
    Named(NamedAlign),
    Fraction(f32),
}

impl CellAlign {
    pub const LEFT: Self = CellAlign::Named(NamedAlign::Left);
    pub const CENTER: Self = CellAlign::Named(NamedAlign::Center);
    pub const RIGHT: Self = CellAlign::Named(NamedAlign::Right);

    /// Fraction measured from the origin side (left, or right when RTL)
    pub fn fraction(self, right_to_left: bool) -> f32 {
        match (self, right_to_left) {
            (CellAlign::Fraction(fraction), _) => fraction,
            (CellAlign::Named(NamedAlign::Center), _) => 0.5,
            (CellAlign::Named(NamedAlign::Left), false) => 0.0,
            (CellAlign::Named(NamedAlign::Left), true) => 1.0,
            (CellAlign::Named(NamedAlign::Right), false) => 1.0,
            (CellAlign::Named(NamedAlign::Right), true) => 0.0,
        }
    }
}

/// `touchVerticalScroll`: whether vertical touch moves scroll the page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TouchVerticalScrollRepr", into = "TouchVerticalScrollRepr")]
pub enum TouchVerticalScroll {
    /// Vertical touch moves never scroll the page
    Disabled,
    /// Vertical touch moves scroll the page unless a drag already started
    #[default]
    Enabled,
    /// Vertical touch moves scroll the page even mid-drag
    WithDrag,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum TouchVerticalScrollRepr {
    Flag(bool),
    Mode(TouchScrollMode),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
enum TouchScrollMode {
    #[serde(rename = "withDrag")]
    WithDrag,
}

impl From<TouchVerticalScrollRepr> for TouchVerticalScroll {
    fn from(repr: TouchVerticalScrollRepr) -> Self {
        match repr {
            TouchVerticalScrollRepr::Flag(false) => TouchVerticalScroll::Disabled,
            TouchVerticalScrollRepr::Flag(true) => TouchVerticalScroll::Enabled,
            TouchVerticalScrollRepr::Mode(TouchScrollMode::WithDrag) => {
                TouchVerticalScroll::WithDrag
            }
        }
    }
}

impl From<TouchVerticalScroll> for TouchVerticalScrollRepr {
    fn from(mode: TouchVerticalScroll) -> Self {
        match mode {
            TouchVerticalScroll::Disabled => TouchVerticalScrollRepr::Flag(false),
            TouchVerticalScroll::Enabled => TouchVerticalScrollRepr::Flag(true),
            TouchVerticalScroll::WithDrag => TouchVerticalScrollRepr::Mode(TouchScrollMode::WithDrag),
        }
    }
}

/// `watchCSS`: activation follows a host breakpoint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WatchCssRepr", into = "WatchCssRepr")]
pub enum WatchCss {
    /// The host activates the slider directly
    #[default]
    Off,
    /// Active while the breakpoint matches, inactive where it can't be read
    On,
    /// Active while the breakpoint matches, active where it can't be read
    FallbackOn,
}

impl WatchCss {
    /// Whether the slider should be active for a breakpoint reading
    ///
    /// None when the option is off and breakpoints are ignored.
    pub fn wants_active(self, matches: Option<bool>) -> Option<bool> {
        match self {
            WatchCss::Off => None,
            WatchCss::On => Some(matches.unwrap_or(false)),
            WatchCss::FallbackOn => Some(matches.unwrap_or(true)),
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
enum WatchCssRepr {
    Flag(bool),
    Mode(WatchCssMode),
}

#[derive(Clone, Copy, Serialize, Deserialize)]
enum WatchCssMode {
    #[serde(rename = "fallbackOn")]
    FallbackOn,
}

impl From<WatchCssRepr> for WatchCss {
    fn from(repr: WatchCssRepr) -> Self {
        match repr {
            WatchCssRepr::Flag(false) => WatchCss::Off,
            WatchCssRepr::Flag(true) => WatchCss::On,
            WatchCssRepr::Mode(WatchCssMode::FallbackOn) => WatchCss::FallbackOn,
        }
    }
}

impl From<WatchCss> for WatchCssRepr {
    fn from(watch: WatchCss) -> Self {
        match watch {
            WatchCss::Off => WatchCssRepr::Flag(false),
            WatchCss::On => WatchCssRepr::Flag(true),
            WatchCss::FallbackOn => WatchCssRepr::Mode(WatchCssMode::FallbackOn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_negative_initial_index_clamps_to_first_cell() {
        let options = SliderOptions::from_json(r#"{"initialIndex": -1}"#).unwrap();
        assert_eq!(options.initial_index, -1);
        assert_eq!(options.initial_cell(4), 0);

        let options = SliderOptions::from_json(r#"{"initialIndex": 12}"#).unwrap();
        assert_eq!(options.initial_cell(4), 3);
        assert_eq!(options.initial_cell(0), 0);
    }

    #[test]
    fn test_watch_css_forms() {
        let options = SliderOptions::from_json(r#"{"watchCSS": "fallbackOn"}"#).unwrap();
        assert_eq!(options.watch_css, WatchCss::FallbackOn);
        assert_eq!(options.watch_css.wants_active(None), Some(true));

        let options = SliderOptions::from_json(r#"{"watchCSS": true}"#).unwrap();
        assert_eq!(options.watch_css.wants_active(None), Some(false));
        assert_eq!(options.watch_css.wants_active(Some(true)), Some(true));

        assert_eq!(WatchCss::Off.wants_active(Some(true)), None);
        assert!(SliderOptions::from_json(r#"{"watchCSS": "sometimes"}"#).is_err());
    }

    #[test]
    fn test_defaults_from_empty_object() {
        let options = SliderOptions::from_json("{}").unwrap();
        assert_eq!(options, SliderOptions::default());
        assert_eq!(options.friction, 0.28);
        assert_eq!(options.selected_attraction, 0.025);
        assert_eq!(options.align_fraction(), 0.5);
        assert_eq!(options.auto_play.interval(), None);
    }

    #[test]
    fn test_camel_case_keys_and_unknown_keys() {
        let options = SliderOptions::from_json(
            r#"{"wrapAround": true, "cellAlign": "left", "autoPlay": 5000,
                "touchVerticalScroll": "withDrag", "lazyLoad": 2}"#,
        )
        .unwrap();

        assert!(options.wrap_around);
        assert_eq!(options.cell_align, CellAlign::LEFT);
        assert_eq!(options.auto_play.interval(), Some(Duration::from_millis(5000)));
        assert_eq!(options.touch_vertical_scroll, TouchVerticalScroll::WithDrag);
    }

    #[test]
    fn test_autoplay_true_uses_default_interval() {
        let options = SliderOptions::from_json(r#"{"autoPlay": true}"#).unwrap();
        assert_eq!(options.auto_play.interval(), Some(DEFAULT_AUTOPLAY_INTERVAL));
    }

    #[test]
    fn test_named_alignment_follows_origin_side() {
        assert_eq!(CellAlign::LEFT.fraction(false), 0.0);
        assert_eq!(CellAlign::LEFT.fraction(true), 1.0);
        assert_eq!(CellAlign::RIGHT.fraction(false), 1.0);
        assert_eq!(CellAlign::RIGHT.fraction(true), 0.0);
        assert_eq!(CellAlign::Fraction(0.25).fraction(true), 0.25);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = SliderOptions::from_json(r#"{"friction": 1.5}"#).unwrap_err();
        assert!(matches!(err, SliderError::InvalidOption { name: "friction", .. }));

        let err = SliderOptions::from_json(r#"{"selectedAttraction": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            SliderError::InvalidOption {
                name: "selectedAttraction",
                ..
            }
        ));

        let err = SliderOptions::from_json(r#"{"cellAlign": 2.0}"#).unwrap_err();
        assert!(matches!(err, SliderError::InvalidOption { name: "cellAlign", .. }));

        let err = SliderOptions::from_json(r#"{"autoPlay": 0}"#).unwrap_err();
        assert!(matches!(err, SliderError::InvalidOption { name: "autoPlay", .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SliderOptions::from_json(r#"{"friction": "fast"}"#).unwrap_err();
        assert!(matches!(err, SliderError::Parse(_)));
    }

    #[test]
    fn test_merged_overrides_keys() {
        let base = SliderOptions {
            contain: true,
            ..Default::default()
        };
        let merged = base
            .merged(&json!({ "wrapAround": true, "touchVerticalScroll": false }))
            .unwrap();

        assert!(merged.contain);
        assert!(merged.wrap_around);
        assert_eq!(merged.touch_vertical_scroll, TouchVerticalScroll::Disabled);
    }

    #[test]
    fn test_serialize_round_trips_through_json() {
        let options = SliderOptions {
            auto_play: AutoPlay::Toggle(true),
            touch_vertical_scroll: TouchVerticalScroll::WithDrag,
            cell_align: CellAlign::Fraction(0.3),
            ..Default::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["autoPlay"], json!(true));
        assert_eq!(value["touchVerticalScroll"], json!("withDrag"));

        let back: SliderOptions = serde_json::from_value(value).unwrap();
        assert_eq!(back, options);
    }
}
