// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! HTML DOM frontend for [`ellipsis_core`].
//!
//! Every [`EllipsisElement`] renders a text in a single truncated line, followed by a
//! "Show more" button once the text does not fit. Activating the button expands the text,
//! activating it again collapses it.
//!
//! All widgets of a page share one browser `ResizeObserver` through a [`SharedResizeHub`]:
//!
//! ```no_run
//! use ellipsis_web::{EllipsisConfig, EllipsisElement, SharedResizeHub, document_body};
//!
//! let hub = SharedResizeHub::new();
//! let widget = EllipsisElement::new(&hub, EllipsisConfig::default());
//! widget.set_content("A rather long text which may need to be truncated");
//! document_body().append_child(widget.element()).unwrap();
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

use wasm_bindgen::UnwrapThrowExt;

mod dom;
mod ellipsis;
mod resize_observer;
mod timer;

pub use dom::{ContentSpan, ToggleButton, install_styles};
pub use ellipsis::EllipsisElement;
pub use resize_observer::{DomResizeBackend, DomTarget, SharedResizeHub};
pub use timer::Timeout;

pub use ellipsis_core::{self as core, EllipsisConfig};

/// The class of every widget's host element.
pub const HOST_CLASS: &str = "lx-ellipsis";
/// The class of the element rendering the text.
pub const CONTENT_CLASS: &str = "content";
/// The class toggled on the text element while it is expanded.
pub const SHOW_MORE_CLASS: &str = "showMore";
/// The class of the toggle button.
pub const BUTTON_CLASS: &str = "lx-ellipsis-toggle";

/// Helper to get the HTML document body
pub fn document_body() -> web_sys::HtmlElement {
    document().body().expect_throw("HTML document missing body")
}

/// Helper to get the HTML document
pub fn document() -> web_sys::Document {
    let window = web_sys::window().expect_throw("no global `window` exists");
    window
        .document()
        .expect_throw("should have a document on window")
}
