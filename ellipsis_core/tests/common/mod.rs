// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code, reason = "Not every test binary uses every helper")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use ellipsis_core::{
    ContentElement, EllipsisConfig, ObserveOptions, ResizeBackend, ToggleElement, Truncation,
};

pub(crate) const DEBOUNCE: Duration = Duration::from_millis(500);
pub(crate) const BUTTON_HEIGHT: f64 = 17.0;

pub(crate) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// A text element whose measurements the test controls.
#[derive(Clone, Default)]
pub(crate) struct TestSpan {
    client_width: Rc<Cell<f64>>,
    scroll_width: Rc<Cell<f64>>,
    pub measurements: Rc<Cell<u32>>,
}

impl TestSpan {
    pub(crate) fn new(client_width: f64, scroll_width: f64) -> Self {
        let span = Self::default();
        span.set_widths(client_width, scroll_width);
        span
    }

    pub(crate) fn set_widths(&self, client_width: f64, scroll_width: f64) {
        self.client_width.set(client_width);
        self.scroll_width.set(scroll_width);
    }
}

impl ContentElement for TestSpan {
    fn client_width(&self) -> f64 {
        self.measurements.set(self.measurements.get() + 1);
        self.client_width.get()
    }

    fn scroll_width(&self) -> f64 {
        self.scroll_width.get()
    }
}

/// A toggle control whose height the test controls.
#[derive(Clone)]
pub(crate) struct TestButton {
    height: Rc<Cell<f64>>,
}

impl TestButton {
    pub(crate) fn new(height: f64) -> Self {
        Self {
            height: Rc::new(Cell::new(height)),
        }
    }

    pub(crate) fn set_height(&self, height: f64) {
        self.height.set(height);
    }
}

impl ToggleElement for TestButton {
    fn offset_height(&self) -> f64 {
        self.height.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BackendCall {
    Connect,
    Observe(u32, ObserveOptions),
    Unobserve(u32),
    Disconnect,
}

/// A resize backend which records every call into a shared log.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    log: Rc<RefCell<Vec<BackendCall>>>,
}

impl RecordingBackend {
    pub(crate) fn connector(
        log: &Rc<RefCell<Vec<BackendCall>>>,
    ) -> impl FnMut() -> Self + 'static {
        let log = log.clone();
        move || {
            log.borrow_mut().push(BackendCall::Connect);
            Self { log: log.clone() }
        }
    }
}

impl ResizeBackend<u32> for RecordingBackend {
    fn observe(&mut self, key: &u32, options: ObserveOptions) {
        self.log
            .borrow_mut()
            .push(BackendCall::Observe(*key, options));
    }

    fn unobserve(&mut self, key: &u32) {
        self.log.borrow_mut().push(BackendCall::Unobserve(*key));
    }

    fn disconnect(&mut self) {
        self.log.borrow_mut().push(BackendCall::Disconnect);
    }
}

/// Collects every value published to a listener.
pub(crate) fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
}

/// A collapsed machine with content, a content element and a toggle control,
/// recording every `show_button` decision.
pub(crate) struct Fixture {
    pub machine: Truncation<TestSpan, TestButton>,
    pub span: TestSpan,
    pub button: TestButton,
    pub show_button: Rc<RefCell<Vec<bool>>>,
}

impl Fixture {
    pub(crate) fn new(content: &str, client_width: f64, scroll_width: f64) -> Self {
        Self::with_config(
            EllipsisConfig::default(),
            content,
            client_width,
            scroll_width,
        )
    }

    pub(crate) fn with_config(
        config: EllipsisConfig,
        content: &str,
        client_width: f64,
        scroll_width: f64,
    ) -> Self {
        let span = TestSpan::new(client_width, scroll_width);
        let button = TestButton::new(BUTTON_HEIGHT);
        let mut machine = Truncation::new(config);
        let (show_button, listener) = recorder::<bool>();
        machine.show_button_stream().subscribe(listener);
        machine.set_content_element(Some(span.clone()), Duration::ZERO);
        machine.set_toggle_element(Some(button.clone()));
        machine.set_content(content.into(), Duration::ZERO);
        Self {
            machine,
            span,
            button,
            show_button,
        }
    }

    pub(crate) fn decisions(&self) -> Vec<bool> {
        self.show_button.borrow().clone()
    }
}
