// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use ellipsis_core::{ContentElement, ToggleElement};
use wasm_bindgen::{JsCast, UnwrapThrowExt};

use crate::{BUTTON_CLASS, CONTENT_CLASS, HOST_CLASS, SHOW_MORE_CLASS};

const STYLE_ELEMENT_ID: &str = "lx-ellipsis-styles";

/// The element rendering the text, measured for overflow.
#[derive(Debug, Clone)]
pub struct ContentSpan(pub web_sys::HtmlElement);

impl ContentElement for ContentSpan {
    fn client_width(&self) -> f64 {
        self.0.client_width().into()
    }

    fn scroll_width(&self) -> f64 {
        self.0.scroll_width().into()
    }
}

/// The toggle button, measured for the expanded single line check.
#[derive(Debug, Clone)]
pub struct ToggleButton(pub web_sys::HtmlElement);

impl ToggleElement for ToggleButton {
    fn offset_height(&self) -> f64 {
        self.0.offset_height().into()
    }
}

/// Add the widget stylesheet to `document`, unless it is already there.
///
/// Collapsed text is kept on one line and cut with an ellipsis; the [`SHOW_MORE_CLASS`]
/// lets it wrap. The toggle button gets a 4px top margin while expanded, which is what
/// [`toggle_margin`](ellipsis_core::EllipsisConfig::toggle_margin) accounts for.
pub fn install_styles(document: &web_sys::Document) {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return;
    }
    let style = document.create_element("style").unwrap_throw();
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(&stylesheet()));
    let head: web_sys::Node = match document.head() {
        Some(head) => head.into(),
        None => document
            .document_element()
            .expect_throw("document has no root element")
            .unchecked_into(),
    };
    head.append_child(&style).unwrap_throw();
}

fn stylesheet() -> String {
    format!(
        ".{HOST_CLASS} {{ display: flex; align-items: flex-start; min-width: 0; }}
.{HOST_CLASS} > .{CONTENT_CLASS} {{ flex: 1 1 auto; min-width: 0; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }}
.{HOST_CLASS} > .{CONTENT_CLASS}.{SHOW_MORE_CLASS} {{ white-space: normal; overflow-wrap: anywhere; }}
.{BUTTON_CLASS} {{ flex: none; margin-left: 4px; padding: 0; border: none; background: none; color: inherit; text-decoration: underline; cursor: pointer; }}
.{CONTENT_CLASS}.{SHOW_MORE_CLASS} + .{BUTTON_CLASS} {{ margin-top: 4px; }}
"
    )
}
