// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! Measurement capabilities the host platform provides.

/// The new content box of an observed element, as reported by a [`ResizeBackend`](crate::ResizeBackend).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeSample {
    /// Width of the content box.
    pub width: f64,
    /// Height of the content box.
    pub height: f64,
}

impl ResizeSample {
    /// Create a sample.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The element holding the (possibly truncated) text.
pub trait ContentElement {
    /// The visible, clipped width of the element.
    fn client_width(&self) -> f64;

    /// The width the element's content would need to be fully visible.
    fn scroll_width(&self) -> f64;

    /// Whether the content is clipped horizontally.
    fn is_overflowing(&self) -> bool {
        self.client_width() < self.scroll_width()
    }
}

/// The "show more"/"show less" control, present only while rendered.
pub trait ToggleElement {
    /// The rendered height of the control, including borders.
    fn offset_height(&self) -> f64;
}

impl<T: ContentElement + ?Sized> ContentElement for &T {
    fn client_width(&self) -> f64 {
        (**self).client_width()
    }

    fn scroll_width(&self) -> f64 {
        (**self).scroll_width()
    }
}

impl<T: ToggleElement + ?Sized> ToggleElement for &T {
    fn offset_height(&self) -> f64 {
        (**self).offset_height()
    }
}
