// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! The state machine deciding whether the toggle control is shown.

use std::fmt;
use std::time::Duration;

use tracing::{debug, trace};

use crate::{ContentElement, EllipsisConfig, Observed, ResizeSample, ToggleElement};

/// Derives the visibility and label of an ellipsis widget's toggle control.
///
/// Three independent inputs drive it:
///
/// - the text content and the element rendering it,
/// - resize notifications of the widget's host element,
/// - user activations of the toggle control.
///
/// # Collapsed
///
/// A width change larger than [`width_threshold`](EllipsisConfig::width_threshold),
/// a new content or a new content element schedule an overflow check.
/// The check only runs once [`resize_debounce`](EllipsisConfig::resize_debounce) has passed
/// without further scheduling; it then measures the content element as it is at that moment.
/// While collapsed, the control is shown exactly when the content overflows.
///
/// The very first width sample is compared against zero, so any non-zero initial width counts.
/// The content starts out empty. No check is scheduled until a content element and a
/// significant width are known.
///
/// # Expanded
///
/// Expanding always shows the control, whatever the overflow state.
/// While expanded, overflow checks no longer affect the control. Instead, whenever the host
/// height or the toggle control's height changes, the host height is compared against
/// `toggle height + toggle_margin`. If they are within
/// [`single_line_tolerance`](EllipsisConfig::single_line_tolerance), the expanded text fits on
/// one line again and the control is hidden; otherwise it is shown.
///
/// Collapsing schedules a fresh overflow check.
///
/// # Timing
///
/// Every handler takes the current time. The owner drives the debounce timer by calling
/// [`poll`](Self::poll) once [`next_deadline`](Self::next_deadline) has passed, or by
/// following [`deadline_stream`](Self::deadline_stream).
pub struct Truncation<C, B> {
    config: EllipsisConfig,

    content: Observed<String>,
    content_element: Option<C>,
    toggle_element: Option<B>,

    is_showing_more: Observed<bool>,
    is_overflowing: Observed<bool>,
    show_button: Observed<bool>,
    button_label: Observed<String>,

    previous_width: f64,
    significant_width: Option<f64>,
    host_height: Option<f64>,
    toggle_height: Option<f64>,
    fits_single_line: Option<bool>,

    pending_check: Observed<Option<Duration>>,
    shut_down: bool,
}

// --- MARK: BUILDERS
impl<C, B> Truncation<C, B>
where
    C: ContentElement,
    B: ToggleElement,
{
    /// Create a collapsed state machine with empty content and no elements.
    pub fn new(config: EllipsisConfig) -> Self {
        let button_label = Observed::with_value(config.label(false).to_owned());
        Self {
            config,
            content: Observed::with_value(String::new()),
            content_element: None,
            toggle_element: None,
            is_showing_more: Observed::with_value(false),
            is_overflowing: Observed::new(),
            show_button: Observed::new(),
            button_label,
            previous_width: 0.0,
            significant_width: None,
            host_height: None,
            toggle_height: None,
            fits_single_line: None,
            pending_check: Observed::with_value(None),
            shut_down: false,
        }
    }
}

// --- MARK: INPUTS
impl<C, B> Truncation<C, B>
where
    C: ContentElement,
    B: ToggleElement,
{
    /// Replace the text content.
    pub fn set_content(&mut self, content: String, now: Duration) {
        if self.shut_down {
            return;
        }
        self.content.set(content);
        self.schedule_overflow_check(now);
    }

    /// Provide, replace or withdraw the element rendering the text.
    ///
    /// While there is no content element, overflow checks are withheld.
    pub fn set_content_element(&mut self, element: Option<C>, now: Duration) {
        if self.shut_down {
            return;
        }
        let available = element.is_some();
        self.content_element = element;
        if available {
            self.schedule_overflow_check(now);
        }
    }

    /// Provide, replace or withdraw the toggle control.
    ///
    /// The control is measured immediately when provided.
    pub fn set_toggle_element(&mut self, element: Option<B>) {
        if self.shut_down {
            return;
        }
        self.toggle_element = element;
        self.refresh_toggle_height();
    }

    /// Measure the current toggle control again, for hosts which restyle it in place.
    pub fn refresh_toggle_height(&mut self) {
        if self.shut_down {
            return;
        }
        let Some(height) = self.toggle_element.as_ref().map(ToggleElement::offset_height) else {
            return;
        };
        if self.toggle_height == Some(height) {
            return;
        }
        trace!(height, "toggle control height changed");
        self.toggle_height = Some(height);
        self.check_single_line();
    }

    /// Handle a resize of the host element.
    pub fn resize(&mut self, sample: ResizeSample, now: Duration) {
        if self.shut_down {
            return;
        }
        let ResizeSample { width, height } = sample;

        let delta = (width - self.previous_width).abs();
        self.previous_width = width;
        if delta > self.config.width_threshold {
            self.significant_width = Some(width);
            self.schedule_overflow_check(now);
        } else {
            trace!(width, delta, "ignoring insignificant width change");
        }

        if self.host_height != Some(height) {
            self.host_height = Some(height);
            self.check_single_line();
        }
    }

    /// Flip between collapsed and expanded.
    ///
    /// This is always honored, whether or not the content overflows.
    pub fn toggle(&mut self, now: Duration) {
        if self.shut_down {
            return;
        }
        let is_showing_more = !self.is_showing_more();
        debug!(is_showing_more, "toggling ellipsis");
        self.is_showing_more.set(is_showing_more);
        self.button_label
            .set(self.config.label(is_showing_more).to_owned());
        if is_showing_more {
            self.fits_single_line = None;
            self.show_button.set(true);
        } else {
            self.schedule_overflow_check(now);
        }
    }

    /// Replace both toggle labels, updating the current label.
    pub fn set_button_texts(&mut self, show_more: impl Into<String>, show_less: impl Into<String>) {
        if self.shut_down {
            return;
        }
        self.config.show_more_text = show_more.into();
        self.config.show_less_text = show_less.into();
        let label = self.config.label(self.is_showing_more()).to_owned();
        self.button_label.set(label);
    }
}

// --- MARK: TIMER
impl<C, B> Truncation<C, B>
where
    C: ContentElement,
    B: ToggleElement,
{
    /// When the pending overflow check is due, if one is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending_check.get().copied().flatten()
    }

    /// Run the pending overflow check if it is due at `now`.
    ///
    /// Returns whether a check ran. Polling before the deadline publishes the pending
    /// deadline again, so a host timer which fired early gets re-armed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.next_deadline() {
            Some(deadline) if deadline <= now => {
                self.pending_check.set(None);
                self.check_overflow();
                true
            }
            Some(deadline) => {
                trace!(?deadline, ?now, "overflow check polled before its deadline");
                self.pending_check.set(Some(deadline));
                false
            }
            None => false,
        }
    }

    /// Cancel the pending check and drop every listener.
    ///
    /// Inputs received afterwards are ignored.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
        self.pending_check.clear_listeners();
        self.pending_check.set(None);
        self.content.clear_listeners();
        self.is_showing_more.clear_listeners();
        self.is_overflowing.clear_listeners();
        self.show_button.clear_listeners();
        self.button_label.clear_listeners();
    }

    fn schedule_overflow_check(&mut self, now: Duration) {
        if self.content_element.is_none()
            || !self.content.is_set()
            || self.significant_width.is_none()
        {
            return;
        }
        let deadline = now + self.config.resize_debounce;
        if self.next_deadline().is_some() {
            trace!(?deadline, "restarting overflow check debounce");
        }
        self.pending_check.set(Some(deadline));
    }

    fn check_overflow(&mut self) {
        let Some(element) = &self.content_element else {
            trace!("content element went away before the overflow check");
            return;
        };
        let is_empty = self.content.get().is_none_or(String::is_empty);
        let overflowing = !is_empty && element.is_overflowing();
        debug!(
            overflowing,
            width = self.significant_width,
            "evaluated content overflow"
        );
        self.is_overflowing.set(overflowing);
        if !self.is_showing_more() {
            self.show_button.set(overflowing);
        }
    }

    fn check_single_line(&mut self) {
        if !self.is_showing_more() {
            return;
        }
        let (Some(toggle_height), Some(host_height)) = (self.toggle_height, self.host_height)
        else {
            return;
        };
        let distance = (host_height - toggle_height - self.config.toggle_margin).abs();
        let fits = distance < self.config.single_line_tolerance;
        if self.fits_single_line == Some(fits) {
            return;
        }
        debug!(fits, host_height, toggle_height, "expanded content line check");
        self.fits_single_line = Some(fits);
        self.show_button.set(!fits);
    }
}

// --- MARK: OUTPUTS
impl<C, B> Truncation<C, B> {
    /// Whether the text is expanded.
    pub fn is_showing_more(&self) -> bool {
        self.is_showing_more.get().copied().unwrap_or(false)
    }

    /// Whether the toggle control should be rendered.
    ///
    /// `false` until the first decision has been made.
    pub fn show_button(&self) -> bool {
        self.show_button.get().copied().unwrap_or(false)
    }

    /// The current toggle label.
    pub fn button_label(&self) -> &str {
        self.button_label.get().map_or("", String::as_str)
    }

    /// The current content, empty until set.
    pub fn content(&self) -> Option<&str> {
        self.content.get().map(String::as_str)
    }

    /// The result of the latest overflow check, if one ran.
    pub fn is_overflowing(&self) -> Option<bool> {
        self.is_overflowing.get().copied()
    }

    /// The configuration in effect.
    pub fn config(&self) -> &EllipsisConfig {
        &self.config
    }

    /// Whether [`shutdown`](Self::shutdown) was called.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// The control visibility stream. Decisions are published as they are made.
    pub fn show_button_stream(&mut self) -> &mut Observed<bool> {
        &mut self.show_button
    }

    /// The toggle label stream.
    pub fn button_label_stream(&mut self) -> &mut Observed<String> {
        &mut self.button_label
    }

    /// The expansion state stream, which starts at `false`.
    pub fn showing_more_stream(&mut self) -> &mut Observed<bool> {
        &mut self.is_showing_more
    }

    /// The overflow check result stream.
    pub fn overflowing_stream(&mut self) -> &mut Observed<bool> {
        &mut self.is_overflowing
    }

    /// The content stream.
    pub fn content_stream(&mut self) -> &mut Observed<String> {
        &mut self.content
    }

    /// The debounce deadline stream: `Some` whenever a check is (re)scheduled, `None` once
    /// it ran or was cancelled. Hosts arm their platform timer from it.
    pub fn deadline_stream(&mut self) -> &mut Observed<Option<Duration>> {
        &mut self.pending_check
    }
}

impl<C, B> fmt::Debug for Truncation<C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Truncation")
            .field("content", &self.content.get())
            .field("is_showing_more", &self.is_showing_more())
            .field("show_button", &self.show_button.get())
            .field("significant_width", &self.significant_width)
            .field("host_height", &self.host_height)
            .field("toggle_height", &self.toggle_height)
            .field("pending_check", &self.pending_check.get())
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}
