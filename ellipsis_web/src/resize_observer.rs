// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::{Cell, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use ellipsis_core::{ObserveOptions, ResizeBackend, ResizeBox, ResizeHub, ResizeSample};
use tracing::{debug, trace};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt};

/// The property under which a [`DomTarget`]'s key is stored on its element.
const KEY_PROPERTY: &str = "__lxEllipsisResizeKey";

type Hub = ResizeHub<DomTarget, DomResizeBackend>;

/// An element registered with a [`SharedResizeHub`].
///
/// Targets compare by their key only, which is also stored on the element itself so that
/// observer entries can be routed back to it.
#[derive(Clone)]
pub struct DomTarget {
    key: u32,
    element: web_sys::Element,
}

impl DomTarget {
    /// The key assigned by the hub.
    pub fn key(&self) -> u32 {
        self.key
    }

    /// The observed element.
    pub fn element(&self) -> &web_sys::Element {
        &self.element
    }

    fn stored_key(element: &web_sys::Element) -> Option<u32> {
        let key = js_sys::Reflect::get(element, &JsValue::from_str(KEY_PROPERTY))
            .ok()?
            .as_f64()?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "The property is only ever written from a u32"
        )]
        let key = key as u32;
        Some(key)
    }

    fn from_entry(entry: &web_sys::ResizeObserverEntry) -> Option<Self> {
        let element = entry.target();
        let key = Self::stored_key(&element)?;
        Some(Self { key, element })
    }
}

impl PartialEq for DomTarget {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for DomTarget {}

impl Hash for DomTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for DomTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomTarget")
            .field("key", &self.key)
            .field("tag", &self.element.tag_name())
            .finish()
    }
}

/// A [`ResizeBackend`] backed by one browser `ResizeObserver`.
///
/// Samples carry the entry's content rect; the box model only decides which changes
/// the browser reports.
pub struct DomResizeBackend {
    observer: web_sys::ResizeObserver,
    #[expect(dead_code, reason = "Closures are retained so they can be called by environment")]
    callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl DomResizeBackend {
    fn connect(hub: Weak<RefCell<Hub>>) -> Self {
        let callback = Closure::new(move |entries: js_sys::Array| {
            let Some(hub) = hub.upgrade() else {
                trace!("resize entries arrived after the hub was dropped");
                return;
            };
            let samples: Vec<_> = entries
                .iter()
                .filter_map(|entry| {
                    let entry: web_sys::ResizeObserverEntry = entry.unchecked_into();
                    let target = DomTarget::from_entry(&entry)?;
                    let rect = entry.content_rect();
                    Some((target, ResizeSample::new(rect.width(), rect.height())))
                })
                .collect();
            hub.borrow_mut().dispatch(samples);
        });
        let observer =
            web_sys::ResizeObserver::new(callback.as_ref().unchecked_ref()).unwrap_throw();
        Self { observer, callback }
    }
}

impl ResizeBackend<DomTarget> for DomResizeBackend {
    fn observe(&mut self, target: &DomTarget, options: ObserveOptions) {
        let dom_options = web_sys::ResizeObserverOptions::new();
        dom_options.set_box(match options.box_model {
            ResizeBox::ContentBox => web_sys::ResizeObserverBoxOptions::ContentBox,
            ResizeBox::BorderBox => web_sys::ResizeObserverBoxOptions::BorderBox,
            ResizeBox::DevicePixelContentBox => {
                web_sys::ResizeObserverBoxOptions::DevicePixelContentBox
            }
        });
        self.observer
            .observe_with_options(target.element(), &dom_options);
    }

    fn unobserve(&mut self, target: &DomTarget) {
        self.observer.unobserve(target.element());
    }

    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

impl fmt::Debug for DomResizeBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomResizeBackend").finish_non_exhaustive()
    }
}

/// The page wide resize service, shared by every widget.
///
/// The browser observer is created when the first element is observed. Cloning the hub is
/// cheap and yields another handle to the same service.
#[derive(Clone)]
pub struct SharedResizeHub {
    hub: Rc<RefCell<Hub>>,
    next_key: Rc<Cell<u32>>,
}

impl SharedResizeHub {
    /// Create a hub which has not yet connected to the browser.
    pub fn new() -> Self {
        let hub = Rc::new_cyclic(|weak: &Weak<RefCell<Hub>>| {
            let weak = weak.clone();
            RefCell::new(ResizeHub::new(move || {
                debug!("creating browser ResizeObserver");
                DomResizeBackend::connect(weak.clone())
            }))
        });
        Self {
            hub,
            next_key: Rc::new(Cell::new(0)),
        }
    }

    /// The target for `element`, assigning it a key on first use.
    pub fn target(&self, element: &web_sys::Element) -> DomTarget {
        let key = DomTarget::stored_key(element).unwrap_or_else(|| {
            let key = self.next_key.get();
            self.next_key.set(key.wrapping_add(1));
            js_sys::Reflect::set(
                element,
                &JsValue::from_str(KEY_PROPERTY),
                &JsValue::from(key),
            )
            .unwrap_throw();
            key
        });
        DomTarget {
            key,
            element: element.clone(),
        }
    }

    /// Mutable access to the hub, for widget lifecycle hooks.
    ///
    /// # Panics
    ///
    /// When called from within a resize callback.
    pub fn borrow_mut(&self) -> RefMut<'_, Hub> {
        self.hub.borrow_mut()
    }

    /// Disconnect from the browser and forget every registration.
    pub fn shutdown(&self) {
        self.hub.borrow_mut().shutdown();
    }

    /// Whether the browser observer exists.
    pub fn is_connected(&self) -> bool {
        self.hub.borrow().is_connected()
    }

    /// How many elements are observed.
    pub fn observed_count(&self) -> usize {
        self.hub.borrow().observed_count()
    }
}

impl Default for SharedResizeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedResizeHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResizeHub")
            .field("hub", &self.hub)
            .field("next_key", &self.next_key.get())
            .finish()
    }
}
