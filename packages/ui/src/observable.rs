//! Bridge from [`store::Observable`] into Dioxus signals.

use std::rc::Rc;

use dioxus::prelude::*;
use store::Observable;

/// Mirror `observable` into a signal for the lifetime of the component.
///
/// The subscription is held in a hook, so it is dropped (and unsubscribed)
/// when the component unmounts.
pub fn use_observable<T: Clone + PartialEq + 'static>(observable: &Observable<T>) -> Signal<T> {
    let signal = use_signal(|| observable.get());
    let source = observable.clone();
    use_hook(move || {
        Rc::new(source.subscribe(move |value: &T| {
            let mut signal = signal;
            if *signal.peek() != *value {
                signal.set(value.clone());
            }
        }))
    });
    signal
}
