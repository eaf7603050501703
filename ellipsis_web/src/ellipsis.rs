// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use ellipsis_core::{Ellipsis, EllipsisConfig, InstantClock};
use tracing::{debug, trace};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use wasm_bindgen_futures::spawn_local;

use crate::{
    BUTTON_CLASS, CONTENT_CLASS, ContentSpan, DomTarget, HOST_CLASS, SHOW_MORE_CLASS,
    SharedResizeHub, Timeout, ToggleButton, install_styles,
};

type Widget = Ellipsis<DomTarget, ContentSpan, ToggleButton>;

/// An ellipsis widget mounted in the DOM.
///
/// The widget owns a host `div` holding the text `span` and, when needed, the toggle
/// `button`. Insert [`element`](Self::element) wherever the widget should appear; its width
/// is followed through the [`SharedResizeHub`] it was created with.
///
/// State changes are rendered in a microtask, so several changes made in one turn of the
/// event loop are rendered once. Dropping the widget tears it down.
pub struct EllipsisElement {
    inner: Rc<Inner>,
}

struct Inner {
    widget: RefCell<Widget>,
    hub: SharedResizeHub,
    host: web_sys::HtmlElement,
    content: web_sys::HtmlElement,
    button: web_sys::HtmlElement,
    timer: RefCell<Timeout>,
    render_queued: Cell<bool>,
    // Closures are retained so they can be called by environment
    on_click: Closure<dyn FnMut(web_sys::Event)>,
}

fn create_html(document: &web_sys::Document, tag: &str, class: &str) -> web_sys::HtmlElement {
    let element: web_sys::HtmlElement = document.create_element(tag).unwrap_throw().unchecked_into();
    element.set_class_name(class);
    element
}

impl EllipsisElement {
    /// Build the widget's elements and start following the host's size.
    pub fn new(hub: &SharedResizeHub, config: EllipsisConfig) -> Self {
        let document = crate::document();
        install_styles(&document);

        let host = create_html(&document, "div", HOST_CLASS);
        let content = create_html(&document, "span", CONTENT_CLASS);
        host.append_child(&content).unwrap_throw();
        let button = create_html(&document, "button", BUTTON_CLASS);
        button.set_attribute("type", "button").unwrap_throw();

        let target = hub.target(&host);
        let key = target.key();
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let on_click = {
                let weak = weak.clone();
                Closure::new(move |_: web_sys::Event| {
                    if let Some(inner) = weak.upgrade() {
                        inner.widget.borrow().toggle();
                    }
                })
            };
            button
                .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                .unwrap_throw();

            let timer = {
                let weak = weak.clone();
                Timeout::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.timer.borrow_mut().fired();
                        // Polling early publishes the deadline again, which re-arms the timer.
                        inner.widget.borrow().poll();
                    }
                })
            };

            Inner {
                widget: RefCell::new(Ellipsis::new(target, config, Rc::new(InstantClock::new()))),
                hub: hub.clone(),
                host,
                content,
                button,
                timer: RefCell::new(timer),
                render_queued: Cell::new(false),
                on_click,
            }
        });
        inner.subscribe();
        inner
            .widget
            .borrow_mut()
            .init(&mut *inner.hub.borrow_mut())
            .expect_throw("a freshly built widget initializes");
        debug!(key, "mounted ellipsis element");
        Self { inner }
    }

    /// The widget's host element, to be inserted into the page.
    pub fn element(&self) -> &web_sys::HtmlElement {
        &self.inner.host
    }

    /// Replace the text.
    pub fn set_content(&self, content: &str) {
        self.inner.content.set_text_content(Some(content));
        self.inner.widget.borrow().set_content(content);
    }

    /// Replace both button labels.
    pub fn set_button_texts(&self, show_more: &str, show_less: &str) {
        self.inner
            .widget
            .borrow()
            .set_button_texts(show_more, show_less);
    }

    /// Expand or collapse, as if the button was clicked.
    pub fn toggle(&self) {
        self.inner.widget.borrow().toggle();
    }

    /// Measure the button again, e.g. after web fonts finished loading.
    pub fn refresh_button_height(&self) {
        self.inner
            .widget
            .borrow()
            .with_machine(|machine| machine.refresh_toggle_height());
    }

    /// Whether the button should be shown.
    pub fn show_button(&self) -> bool {
        self.inner.widget.borrow().show_button()
    }

    /// The current button label.
    pub fn button_label(&self) -> String {
        self.inner.widget.borrow().button_label()
    }

    /// Whether the text is expanded.
    pub fn is_showing_more(&self) -> bool {
        self.inner.widget.borrow().is_showing_more()
    }

    /// Stop following the host's size and detach the click handler.
    ///
    /// The elements stay where they are. Calling this again has no effect.
    pub fn destroy(&self) {
        self.inner.destroy();
    }
}

impl Inner {
    fn subscribe(self: &Rc<Self>) {
        let widget = self.widget.borrow();

        let weak = Rc::downgrade(self);
        widget.on_deadline(move |delay| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let mut timer = inner.timer.borrow_mut();
            match delay {
                Some(delay) => timer.arm(delay),
                None => timer.clear(),
            }
        });

        widget.on_show_button(self.render_on_change());
        widget.on_button_label(self.render_on_change());
        widget.on_showing_more(self.render_on_change());

        widget.set_content_element(Some(ContentSpan(self.content.clone())));
    }

    /// A listener which queues a render. It must not touch the widget, which is still
    /// borrowed while listeners run.
    fn render_on_change<T: 'static>(self: &Rc<Self>) -> impl FnMut(&T) + 'static {
        let weak = Rc::downgrade(self);
        move |_: &T| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_render();
            }
        }
    }

    fn schedule_render(self: &Rc<Self>) {
        if self.render_queued.replace(true) {
            return;
        }
        let weak = Rc::downgrade(self);
        spawn_local(async move {
            if let Some(inner) = weak.upgrade() {
                inner.render_queued.set(false);
                inner.render();
            }
        });
    }

    fn render(&self) {
        let widget = self.widget.borrow();
        if !widget.is_running() {
            trace!("skipping render of a torn down ellipsis element");
            return;
        }

        self.content
            .class_list()
            .toggle_with_force(SHOW_MORE_CLASS, widget.is_showing_more())
            .unwrap_throw();
        self.button
            .set_text_content(Some(&widget.button_label()));

        let attached = self.button.parent_node().is_some();
        match (widget.show_button(), attached) {
            (true, false) => {
                self.host.append_child(&self.button).unwrap_throw();
                widget.set_toggle_element(Some(ToggleButton(self.button.clone())));
            }
            (false, true) => {
                self.host.remove_child(&self.button).unwrap_throw();
                widget.set_toggle_element(None);
            }
            (true, true) => {
                // The label may have changed the button's height.
                widget.with_machine(|machine| machine.refresh_toggle_height());
            }
            (false, false) => {}
        }
    }

    fn destroy(&self) {
        self.widget
            .borrow_mut()
            .teardown(&mut *self.hub.borrow_mut());
        self.timer.borrow_mut().clear();
        // Removing an unknown listener is a no-op, so repeated calls are fine.
        self.button
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref())
            .unwrap_throw();
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for EllipsisElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EllipsisElement")
            .field("widget", &self.inner.widget)
            .field("timer", &self.inner.timer)
            .field("render_queued", &self.inner.render_queued.get())
            .finish_non_exhaustive()
    }
}
