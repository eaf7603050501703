// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, UnwrapThrowExt};

/// A re-armable `setTimeout`, which invokes its callback once per arming.
///
/// Arming it again before it fired restarts the wait. The pending timeout is cleared on drop.
pub struct Timeout {
    // Closures are retained so they can be called by environment
    callback: Closure<dyn FnMut()>,
    handle: Option<i32>,
}

impl Timeout {
    /// Create a disarmed timeout which calls `callback` when it fires.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        Self {
            callback: Closure::new(callback),
            handle: None,
        }
    }

    /// Fire after `delay`, rounded up to whole milliseconds, replacing any pending wait.
    ///
    /// # Panics
    ///
    /// `setTimeout` requires the delay in milliseconds as an `i32`, so delays above
    /// `2147483647` milliseconds lead to a panic.
    pub fn arm(&mut self, delay: Duration) {
        self.clear();
        // Rounded up, so the callback never runs before `delay` has passed.
        let ms: i32 = delay.as_micros().div_ceil(1000).try_into().expect_throw(
            "`setTimeout` requires this to be an `i32`,\
             which is why values above `2147483647` are not possible,\
             see https://developer.mozilla.org/en-US/docs/Web/API/setTimeout#delay \
             for more details",
        );
        let handle = web_sys::window()
            .unwrap_throw()
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                ms,
            )
            .unwrap_throw();
        self.handle = Some(handle);
    }

    /// Cancel the pending wait, if any.
    pub fn clear(&mut self) {
        if let Some(handle) = self.handle.take() {
            web_sys::window()
                .unwrap_throw()
                .clear_timeout_with_handle(handle);
        }
    }

    /// Forget the pending wait after the callback ran.
    pub(crate) fn fired(&mut self) {
        self.handle = None;
    }

    /// Whether a wait is pending.
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.clear();
    }
}

impl fmt::Debug for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeout")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
