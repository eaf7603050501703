// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! Ellipsis Core is the platform independent part of a single-line "show more" text widget.
//!
//! The widget renders text on one line, cuts it off with an ellipsis when it overflows its
//! container, and offers a toggle control to expand and collapse the full text.
//! It follows its container's size live, without the host having to re-trigger anything.
//!
//! This crate provides:
//!
//! - [`Truncation`], the state machine deciding whether the toggle control is shown and which
//!   label it carries, from content changes, container resizes and toggle activations.
//! - [`Ellipsis`], which wires a [`Truncation`] to a [`ResizeHub`] and a [`Clock`] and
//!   exposes the widget's lifecycle hooks.
//! - [`ResizeHub`], which shares one platform [`ResizeBackend`] between many widgets.
//! - [`Observed`], a field which publishes every write to its listeners.
//!
//! Measuring text is left to the platform: hosts implement [`ContentElement`] and
//! [`ToggleElement`] for their element handles. `ellipsis_web` does so for the DOM.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use ellipsis_core::{
//!     ContentElement, Ellipsis, EllipsisConfig, ManualClock, ObserveOptions, ResizeBackend,
//!     ResizeHub, ResizeSample, ToggleElement,
//! };
//!
//! struct Span(Rc<Cell<f64>>);
//! impl ContentElement for Span {
//!     fn client_width(&self) -> f64 { self.0.get() }
//!     fn scroll_width(&self) -> f64 { 500.0 }
//! }
//!
//! struct Button;
//! impl ToggleElement for Button {
//!     fn offset_height(&self) -> f64 { 17.0 }
//! }
//!
//! struct NoopBackend;
//! impl ResizeBackend<u32> for NoopBackend {
//!     fn observe(&mut self, _: &u32, _: ObserveOptions) {}
//!     fn unobserve(&mut self, _: &u32) {}
//! }
//!
//! let clock = ManualClock::new();
//! let mut hub = ResizeHub::new(|| NoopBackend);
//! let mut widget = Ellipsis::<u32, Span, Button>::new(
//!     1,
//!     EllipsisConfig::default(),
//!     Rc::new(clock.clone()),
//! );
//! widget.init(&mut hub).unwrap();
//!
//! let client_width = Rc::new(Cell::new(200.0));
//! widget.set_content_element(Some(Span(client_width.clone())));
//! widget.set_content("A sentence which does not fit into 200 pixels");
//! hub.dispatch([(1, ResizeSample::new(200.0, 17.0))]);
//!
//! clock.advance(Duration::from_millis(500));
//! widget.poll();
//! assert!(widget.show_button());
//! assert_eq!(widget.button_label(), "Show more");
//!
//! widget.teardown(&mut hub);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod clock;
mod config;
mod element;
mod error;
mod observed;
mod resize_hub;
mod truncation;
mod widget;

pub mod tracing_backend;

pub use clock::{Clock, InstantClock, ManualClock};
pub use config::{
    DEFAULT_RESIZE_DEBOUNCE, DEFAULT_SHOW_LESS_TEXT, DEFAULT_SHOW_MORE_TEXT,
    DEFAULT_SINGLE_LINE_TOLERANCE, DEFAULT_TOGGLE_MARGIN, DEFAULT_WIDTH_THRESHOLD, EllipsisConfig,
};
pub use element::{ContentElement, ResizeSample, ToggleElement};
pub use error::LifecycleError;
pub use observed::{ListenerId, Observed};
pub use resize_hub::{ObserveOptions, ResizeBackend, ResizeBox, ResizeHub};
pub use truncation::Truncation;
pub use widget::Ellipsis;
