// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! Several ellipsis widgets in a container which can be resized by dragging its corner.

use std::cell::Cell;
use std::time::Duration;

use ellipsis_core::tracing_backend::try_init_tracing;
use ellipsis_web::{EllipsisConfig, EllipsisElement, SharedResizeHub, document, document_body};
use tracing::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};

const TEXTS: [&str; 3] = [
    "Short text.",
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. \
     Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.",
];

struct Demo {
    widgets: Vec<EllipsisElement>,
    text_index: Cell<usize>,
}

fn container() -> web_sys::HtmlElement {
    let container: web_sys::HtmlElement = document()
        .create_element("div")
        .unwrap_throw()
        .unchecked_into();
    let style = container.style();
    for (property, value) in [
        ("width", "320px"),
        ("min-width", "80px"),
        ("max-width", "100%"),
        ("padding", "8px"),
        ("border", "1px solid #888"),
        ("resize", "horizontal"),
        ("overflow", "auto"),
    ] {
        style.set_property(property, value).unwrap_throw();
    }
    container
}

pub fn main() {
    _ = try_init_tracing();

    let body = document_body();
    let hub = SharedResizeHub::new();
    let container = container();
    body.append_child(&container).unwrap_throw();

    let configs = [
        EllipsisConfig::default(),
        EllipsisConfig::default(),
        EllipsisConfig::default()
            .with_button_texts("Mehr anzeigen", "Weniger anzeigen")
            .with_resize_debounce(Duration::from_millis(250)),
    ];
    let widgets: Vec<_> = configs
        .into_iter()
        .zip(TEXTS)
        .map(|(config, text)| {
            let widget = EllipsisElement::new(&hub, config);
            widget.set_content(text);
            container.append_child(widget.element()).unwrap_throw();
            widget
        })
        .collect();

    let cycle: web_sys::HtmlElement = document()
        .create_element("button")
        .unwrap_throw()
        .unchecked_into();
    cycle.set_text_content(Some("Rotate texts"));
    body.append_child(&cycle).unwrap_throw();

    // The page keeps the demo alive for as long as the module is loaded.
    let demo: &'static Demo = Box::leak(Box::new(Demo {
        widgets,
        text_index: Cell::new(0),
    }));
    let on_cycle = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        let offset = demo.text_index.get() + 1;
        demo.text_index.set(offset);
        for (index, widget) in demo.widgets.iter().enumerate() {
            widget.set_content(TEXTS[(index + offset) % TEXTS.len()]);
        }
        info!(offset, "rotated demo texts");
    });
    cycle
        .add_event_listener_with_callback("click", on_cycle.as_ref().unchecked_ref())
        .unwrap_throw();
    on_cycle.forget();

    info!(widgets = demo.widgets.len(), "ellipsis demo mounted");
}
