//! # Observable values
//!
//! [`Observable`] is the small publish/subscribe cell shared state is kept in:
//! [`get`](Observable::get) reads the current value,
//! [`subscribe`](Observable::subscribe) registers a callback that runs after
//! every change. It knows nothing about any UI runtime; the `ui` crate bridges
//! it into Dioxus signals.
//!
//! Callbacks run after the internal borrow is released, so a subscriber may
//! read the observable (or even update it) from inside its callback.
//! Dropping the returned [`Subscription`] unsubscribes.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(u64, Callback<T>)>,
}

/// Shared, observable value. Clones share the same cell.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                next_id: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.borrow_mut().value);
        self.notify();
    }

    /// Register `callback` to run after every change.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.subscribers.push((id, Rc::new(callback)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self) {
        let (value, callbacks) = {
            let inner = self.inner.borrow();
            let callbacks: Vec<Callback<T>> =
                inner.subscribers.iter().map(|(_, cb)| Rc::clone(cb)).collect();
            (inner.value.clone(), callbacks)
        };
        for callback in callbacks {
            callback(&value);
        }
    }
}

/// Handle returned by [`Observable::subscribe`]; unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback registered for the lifetime of the observable.
    pub fn detach(mut self) {
        self.unsubscribe.take();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscribers_see_every_change() {
        let count = Observable::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let _sub = count.subscribe(move |v| sink.borrow_mut().push(*v));

        count.set(1);
        count.update(|v| *v += 10);
        assert_eq!(*seen.borrow(), vec![1, 11]);
        assert_eq!(count.get(), 11);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let flag = Observable::new(false);
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let sub = flag.subscribe(move |_| counter.set(counter.get() + 1));
        flag.set(true);
        drop(sub);
        flag.set(false);

        assert_eq!(calls.get(), 1);
        assert_eq!(flag.subscriber_count(), 0);
    }

    #[test]
    fn test_detached_subscription_stays() {
        let value = Observable::new(String::new());
        let last = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&last);
        value.subscribe(move |v| *sink.borrow_mut() = v.clone()).detach();

        value.set("ok".to_string());
        assert_eq!(*last.borrow(), "ok");
        assert_eq!(value.subscriber_count(), 1);
    }

    #[test]
    fn test_callback_can_read_back() {
        let value = Observable::new(1);
        let reader = value.clone();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        let _sub = value.subscribe(move |_| sink.set(reader.get()));

        value.set(42);
        assert_eq!(seen.get(), 42);
    }
}
