// Copyright 2025 the Ellipsis Authors
// SPDX-License-Identifier: Apache-2.0

//! A field which publishes every write to its listeners.

use std::fmt;

/// Identifies a listener registered with [`Observed::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// A mutable value which behaves like a plain field for code that only reads and writes it,
/// and like a replay-latest event stream for code that subscribes to it.
///
/// The cell starts out unset. Nothing is ever published before the first [`set`](Self::set),
/// so subscribers never observe the unset state.
/// A new subscriber immediately receives the latest value, if there is one.
///
/// Each cell is owned by the object it belongs to, so two instances never share a stream.
///
/// Listeners are invoked synchronously, in subscription order, while the owner of the cell
/// is being mutated. They must not call back into that owner; a listener which needs to
/// read other state should schedule that work instead.
pub struct Observed<T> {
    value: Option<T>,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

impl<T> Observed<T> {
    /// Create an unset cell.
    pub fn new() -> Self {
        Self {
            value: None,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Create a cell which already holds `value`.
    ///
    /// Subscribers will receive `value` as soon as they subscribe.
    pub fn with_value(value: T) -> Self {
        Self {
            value: Some(value),
            ..Self::new()
        }
    }

    /// The latest value, or `None` if nothing was assigned yet.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether a value has been assigned.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Store `value` and publish it to every listener.
    ///
    /// Every write is published, even if it is equal to the previous value.
    pub fn set(&mut self, value: T) {
        let value = &*self.value.insert(value);
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    /// Modify the current value in place and publish the result.
    ///
    /// Does nothing if the cell is unset.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let Some(value) = self.value.as_mut() else {
            return;
        };
        f(value);
        let value = &*value;
        for (_, listener) in &mut self.listeners {
            listener(value);
        }
    }

    /// Register `listener`, replaying the latest value to it first if there is one.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        if let Some(value) = &self.value {
            listener(value);
        }
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(it, _)| *it != id);
        self.listeners.len() != before
    }

    /// Remove every listener. The value is kept.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// The number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T> Default for Observed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Observed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observed")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

// --- MARK: TESTS
#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value: &T| sink.borrow_mut().push(value.clone()))
    }

    #[test]
    fn unset_cell_publishes_nothing_on_subscribe() {
        let mut cell = Observed::<u32>::new();
        let (seen, listener) = recorder::<u32>();
        cell.subscribe(listener);

        assert!(cell.get().is_none());
        assert!(seen.borrow().is_empty());

        cell.set(3);
        assert_eq!(*seen.borrow(), [3]);
        assert_eq!(cell.get(), Some(&3));
    }

    #[test]
    fn late_subscriber_receives_latest_value() {
        let mut cell = Observed::new();
        cell.set("first");
        cell.set("second");

        let (seen, listener) = recorder::<&str>();
        cell.subscribe(listener);
        assert_eq!(*seen.borrow(), ["second"]);
    }

    #[test]
    fn repeated_writes_are_all_published() {
        let mut cell = Observed::with_value(false);
        let (seen, listener) = recorder::<bool>();
        cell.subscribe(listener);
        cell.set(false);
        cell.set(true);
        assert_eq!(*seen.borrow(), [false, false, true]);
    }

    #[test]
    fn update_modifies_in_place() {
        let mut cell = Observed::<String>::new();
        cell.update(|it| it.push('x'));
        assert!(!cell.is_set());

        cell.set("a".into());
        let (seen, listener) = recorder::<String>();
        cell.subscribe(listener);
        cell.update(|it| it.push('b'));
        assert_eq!(*seen.borrow(), ["a", "ab"]);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let mut cell = Observed::new();
        let (first, first_listener) = recorder::<i32>();
        let (second, second_listener) = recorder::<i32>();
        let first_id = cell.subscribe(first_listener);
        cell.subscribe(second_listener);

        cell.set(1);
        assert!(cell.unsubscribe(first_id));
        assert!(!cell.unsubscribe(first_id));
        cell.set(2);

        assert_eq!(*first.borrow(), [1]);
        assert_eq!(*second.borrow(), [1, 2]);

        cell.clear_listeners();
        assert_eq!(cell.listener_count(), 0);
        assert_eq!(cell.get(), Some(&2));
    }

    #[test]
    fn cells_are_independent() {
        let mut a = Observed::new();
        let mut b = Observed::new();
        let (seen_a, listener_a) = recorder::<i32>();
        a.subscribe(listener_a);
        b.set(10);
        a.set(1);
        assert_eq!(*seen_a.borrow(), [1]);
        assert_eq!(b.get(), Some(&10));
    }
}
