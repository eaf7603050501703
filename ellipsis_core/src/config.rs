// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// The label of the toggle control while the text is collapsed.
pub const DEFAULT_SHOW_MORE_TEXT: &str = "Show more";
/// The label of the toggle control while the text is expanded.
pub const DEFAULT_SHOW_LESS_TEXT: &str = "Show less";
/// How long resize and content input must be quiet before overflow is re-evaluated.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(500);
/// A width change must be strictly larger than this to trigger an overflow check.
pub const DEFAULT_WIDTH_THRESHOLD: f64 = 1.0;
/// The expanded text counts as a single line when its height is within this distance
/// of the toggle control's height plus [`DEFAULT_TOGGLE_MARGIN`].
pub const DEFAULT_SINGLE_LINE_TOLERANCE: f64 = 10.0;
/// The top margin of the toggle control while the text is expanded.
pub const DEFAULT_TOGGLE_MARGIN: f64 = 4.0;

/// Tunables of a single ellipsis widget.
///
/// All distances are in the units the host reports sizes in (CSS pixels on the web).
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsisConfig {
    /// Label shown while collapsed.
    pub show_more_text: String,
    /// Label shown while expanded.
    pub show_less_text: String,
    /// Quiescence window for overflow checks.
    pub resize_debounce: Duration,
    /// Minimum width delta (exclusive) which counts as a significant resize.
    pub width_threshold: f64,
    /// Maximum height distance (exclusive) at which expanded content counts as one line.
    pub single_line_tolerance: f64,
    /// Vertical margin occupied by the toggle control while expanded.
    pub toggle_margin: f64,
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self {
            show_more_text: DEFAULT_SHOW_MORE_TEXT.into(),
            show_less_text: DEFAULT_SHOW_LESS_TEXT.into(),
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            width_threshold: DEFAULT_WIDTH_THRESHOLD,
            single_line_tolerance: DEFAULT_SINGLE_LINE_TOLERANCE,
            toggle_margin: DEFAULT_TOGGLE_MARGIN,
        }
    }
}

// --- MARK: BUILDERS
impl EllipsisConfig {
    /// Builder-style method to set both toggle labels.
    pub fn with_button_texts(
        mut self,
        show_more: impl Into<String>,
        show_less: impl Into<String>,
    ) -> Self {
        self.show_more_text = show_more.into();
        self.show_less_text = show_less.into();
        self
    }

    /// Builder-style method to set the resize debounce window.
    pub fn with_resize_debounce(mut self, debounce: Duration) -> Self {
        self.resize_debounce = debounce;
        self
    }

    /// Builder-style method to set the significant width change threshold.
    pub fn with_width_threshold(mut self, threshold: f64) -> Self {
        self.width_threshold = threshold;
        self
    }

    /// Builder-style method to set the single line tolerance and toggle margin.
    pub fn with_single_line_detection(mut self, tolerance: f64, toggle_margin: f64) -> Self {
        self.single_line_tolerance = tolerance;
        self.toggle_margin = toggle_margin;
        self
    }

    /// The label for the given expansion state.
    pub fn label(&self, is_showing_more: bool) -> &str {
        if is_showing_more {
            &self.show_less_text
        } else {
            &self.show_more_text
        }
    }
}
