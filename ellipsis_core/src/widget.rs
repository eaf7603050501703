// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::{
    Clock, ContentElement, EllipsisConfig, LifecycleError, ListenerId, ResizeBackend, ResizeHub,
    ToggleElement, Truncation,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Created,
    Running,
    TornDown,
}

/// One ellipsis widget instance: a [`Truncation`] wired to a [`ResizeHub`] and a [`Clock`].
///
/// `K` identifies the widget's host element in the hub, `C` is the element rendering the
/// text and `B` the toggle control.
///
/// The host framework calls [`init`](Self::init) once after creating the widget and
/// [`teardown`](Self::teardown) once when disposing of it. Inputs may be set before `init`;
/// they are held and take part in the first overflow check.
pub struct Ellipsis<K, C, B> {
    host: K,
    machine: Rc<RefCell<Truncation<C, B>>>,
    clock: Rc<dyn Clock>,
    phase: Phase,
}

impl<K, C, B> Ellipsis<K, C, B>
where
    K: Eq + Hash + Clone,
    C: ContentElement + 'static,
    B: ToggleElement + 'static,
{
    /// Create a collapsed widget for the host element `host`.
    pub fn new(host: K, config: EllipsisConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            host,
            machine: Rc::new(RefCell::new(Truncation::new(config))),
            clock,
            phase: Phase::Created,
        }
    }

    // --- MARK: LIFECYCLE

    /// Start listening to resizes of the host element.
    pub fn init<R: ResizeBackend<K>>(
        &mut self,
        hub: &mut ResizeHub<K, R>,
    ) -> Result<(), LifecycleError> {
        match self.phase {
            Phase::Created => {}
            Phase::Running => return Err(LifecycleError::AlreadyInitialized),
            Phase::TornDown => return Err(LifecycleError::TornDown),
        }
        let machine = Rc::downgrade(&self.machine);
        let clock = self.clock.clone();
        hub.observe(self.host.clone(), move |sample| {
            if let Some(machine) = machine.upgrade() {
                machine.borrow_mut().resize(sample, clock.now());
            }
        });
        self.phase = Phase::Running;
        debug!("ellipsis widget initialized");
        Ok(())
    }

    /// Stop listening to resizes, cancel the pending check and drop every listener.
    ///
    /// Only the first call has an effect. Tearing down a widget which was never initialized
    /// still releases the host element from the hub.
    pub fn teardown<R: ResizeBackend<K>>(&mut self, hub: &mut ResizeHub<K, R>) {
        if self.phase == Phase::TornDown {
            debug!("ignoring repeated ellipsis teardown");
            return;
        }
        hub.unobserve(&self.host);
        debug!(initialized = self.is_running(), "ellipsis widget torn down");
        self.phase = Phase::TornDown;
        self.machine.borrow_mut().shutdown();
    }

    /// Whether [`init`](Self::init) succeeded and [`teardown`](Self::teardown) was not called.
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    // --- MARK: INPUTS

    /// Replace the text content.
    pub fn set_content(&self, content: impl Into<String>) {
        let now = self.clock.now();
        self.machine.borrow_mut().set_content(content.into(), now);
    }

    /// Provide, replace or withdraw the element rendering the text.
    pub fn set_content_element(&self, element: Option<C>) {
        let now = self.clock.now();
        self.machine.borrow_mut().set_content_element(element, now);
    }

    /// Provide, replace or withdraw the toggle control.
    pub fn set_toggle_element(&self, element: Option<B>) {
        self.machine.borrow_mut().set_toggle_element(element);
    }

    /// Handle an activation of the toggle control.
    pub fn toggle(&self) {
        let now = self.clock.now();
        self.machine.borrow_mut().toggle(now);
    }

    /// Replace both toggle labels.
    pub fn set_button_texts(&self, show_more: impl Into<String>, show_less: impl Into<String>) {
        self.machine
            .borrow_mut()
            .set_button_texts(show_more, show_less);
    }

    // --- MARK: TIMER

    /// Run the pending overflow check if it is due. Returns whether one ran.
    pub fn poll(&self) -> bool {
        let now = self.clock.now();
        self.machine.borrow_mut().poll(now)
    }

    /// How long until the pending overflow check is due, if one is pending.
    pub fn time_until_deadline(&self) -> Option<Duration> {
        let deadline = self.machine.borrow().next_deadline()?;
        Some(deadline.saturating_sub(self.clock.now()))
    }

    /// Subscribe to debounce timer changes.
    ///
    /// The listener receives how long to wait before calling [`poll`](Self::poll) whenever
    /// a check is (re)scheduled, and `None` once nothing is pending. Hosts with a platform
    /// timer use this instead of polling continuously.
    pub fn on_deadline(&self, mut listener: impl FnMut(Option<Duration>) + 'static) -> ListenerId {
        let clock = self.clock.clone();
        self.machine
            .borrow_mut()
            .deadline_stream()
            .subscribe(move |deadline| {
                listener(deadline.map(|deadline| deadline.saturating_sub(clock.now())));
            })
    }

    // --- MARK: OUTPUTS

    /// Whether the toggle control should be rendered.
    pub fn show_button(&self) -> bool {
        self.machine.borrow().show_button()
    }

    /// The current toggle label.
    pub fn button_label(&self) -> String {
        self.machine.borrow().button_label().to_owned()
    }

    /// Whether the text is expanded, which hosts reflect as the `showMore` class.
    pub fn is_showing_more(&self) -> bool {
        self.machine.borrow().is_showing_more()
    }

    /// Subscribe to control visibility decisions.
    pub fn on_show_button(&self, listener: impl FnMut(&bool) + 'static) -> ListenerId {
        self.machine
            .borrow_mut()
            .show_button_stream()
            .subscribe(listener)
    }

    /// Subscribe to label changes. The current label is replayed immediately.
    pub fn on_button_label(&self, listener: impl FnMut(&String) + 'static) -> ListenerId {
        self.machine
            .borrow_mut()
            .button_label_stream()
            .subscribe(listener)
    }

    /// Subscribe to expand/collapse. The current state is replayed immediately.
    pub fn on_showing_more(&self, listener: impl FnMut(&bool) + 'static) -> ListenerId {
        self.machine
            .borrow_mut()
            .showing_more_stream()
            .subscribe(listener)
    }

    /// Subscribe to content changes. The current content, initially empty, is replayed immediately.
    pub fn on_content(&self, listener: impl FnMut(&String) + 'static) -> ListenerId {
        self.machine.borrow_mut().content_stream().subscribe(listener)
    }

    /// Read access to the state machine.
    pub fn machine(&self) -> Ref<'_, Truncation<C, B>> {
        self.machine.borrow()
    }

    /// Run `f` with mutable access to the state machine.
    pub fn with_machine<R>(&self, f: impl FnOnce(&mut Truncation<C, B>) -> R) -> R {
        f(&mut self.machine.borrow_mut())
    }

    /// The host element key.
    pub fn host(&self) -> &K {
        &self.host
    }
}

impl<K: fmt::Debug, C, B> fmt::Debug for Ellipsis<K, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ellipsis")
            .field("host", &self.host)
            .field("machine", &self.machine)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
