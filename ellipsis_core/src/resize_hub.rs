// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! One resize detection context shared by every observed element.

use std::fmt;
use std::hash::Hash;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::ResizeSample;

/// Which box of an element a [`ResizeBackend`] reports changes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeBox {
    /// The content area, excluding padding and borders.
    #[default]
    ContentBox,
    /// The border area, including padding and borders.
    BorderBox,
    /// The content area in device pixels.
    DevicePixelContentBox,
}

/// Options passed through to [`ResizeBackend::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObserveOptions {
    /// The box whose size changes are reported.
    pub box_model: ResizeBox,
}

/// The platform's resize detection primitive.
///
/// A single backend watches every element registered with a [`ResizeHub`].
/// Whenever watched elements change size, the platform is expected to feed a batch of
/// `(key, sample)` pairs to [`ResizeHub::dispatch`].
pub trait ResizeBackend<K> {
    /// Start watching `key`.
    fn observe(&mut self, key: &K, options: ObserveOptions);

    /// Stop watching `key`. Must tolerate keys which are not watched.
    fn unobserve(&mut self, key: &K);

    /// Stop watching everything. Called once, before the backend is dropped.
    fn disconnect(&mut self) {}
}

type ResizeCallback = Box<dyn FnMut(ResizeSample)>;

/// Multiplexes a single [`ResizeBackend`] across many observed elements.
///
/// Creating a native resize observer per widget is expensive, so every widget registers with
/// one hub instead. The backend is created lazily, on the first [`observe`](Self::observe),
/// and lives until [`shutdown`](Self::shutdown).
///
/// Each element has at most one callback; observing it again replaces the callback.
pub struct ResizeHub<K, B> {
    backend: Option<B>,
    connect: Box<dyn FnMut() -> B>,
    callbacks: HashMap<K, ResizeCallback>,
}

impl<K, B> ResizeHub<K, B>
where
    K: Eq + Hash,
    B: ResizeBackend<K>,
{
    /// Create a hub which calls `connect` to create its backend when first needed.
    pub fn new(connect: impl FnMut() -> B + 'static) -> Self {
        Self {
            backend: None,
            connect: Box::new(connect),
            callbacks: HashMap::new(),
        }
    }

    /// Watch `key` with default options, calling `callback` with every new size.
    pub fn observe(&mut self, key: K, callback: impl FnMut(ResizeSample) + 'static) {
        self.observe_with(key, ObserveOptions::default(), callback);
    }

    /// Watch `key`, calling `callback` with every new size.
    pub fn observe_with(
        &mut self,
        key: K,
        options: ObserveOptions,
        callback: impl FnMut(ResizeSample) + 'static,
    ) {
        let backend = self.backend.get_or_insert_with(|| {
            debug!("connecting shared resize backend");
            (self.connect)()
        });
        backend.observe(&key, options);
        if self.callbacks.insert(key, Box::new(callback)).is_some() {
            trace!("replaced resize callback of an already observed element");
        }
    }

    /// Stop watching `key`.
    ///
    /// Returns whether `key` was being watched. Unknown keys, and calls before the backend
    /// exists, are ignored.
    pub fn unobserve(&mut self, key: &K) -> bool {
        let Some(backend) = &mut self.backend else {
            return false;
        };
        backend.unobserve(key);
        self.callbacks.remove(key).is_some()
    }

    /// Deliver a batch of resize notifications to the registered callbacks.
    ///
    /// Entries for keys without a callback are skipped.
    pub fn dispatch(&mut self, entries: impl IntoIterator<Item = (K, ResizeSample)>) {
        for (key, sample) in entries {
            match self.callbacks.get_mut(&key) {
                Some(callback) => callback(sample),
                None => trace!(?sample, "dropping resize notification for unobserved element"),
            }
        }
    }

    /// Disconnect and drop the backend, along with every callback.
    ///
    /// A later [`observe`](Self::observe) creates a fresh backend.
    pub fn shutdown(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            debug!(observed = self.callbacks.len(), "shutting down shared resize backend");
            backend.disconnect();
        }
        self.callbacks.clear();
    }

    /// Whether the backend has been created.
    pub fn is_connected(&self) -> bool {
        self.backend.is_some()
    }

    /// The number of elements with a callback.
    pub fn observed_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether `key` has a callback.
    pub fn is_observing(&self, key: &K) -> bool {
        self.callbacks.contains_key(key)
    }

    /// The backend, if it has been created.
    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }
}

impl<K, B: fmt::Debug> fmt::Debug for ResizeHub<K, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResizeHub")
            .field("backend", &self.backend)
            .field("observed", &self.callbacks.len())
            .finish_non_exhaustive()
    }
}
