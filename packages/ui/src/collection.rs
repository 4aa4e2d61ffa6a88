//! Hooks that wire a [`store::CollectionView`] into a component.

use std::rc::Rc;

use api::HttpClient;
use dioxus::prelude::*;
use store::{CollectionState, CollectionView, Confirm, Resource, SaveOutcome};

use crate::{use_api, use_observable};

/// A deferred change to an open form's draft.
pub type DraftEdit<D> = Box<dyn FnOnce(&mut D)>;

/// Asks through `window.confirm`.
pub struct BrowserConfirm;

impl Confirm for BrowserConfirm {
    fn confirm(&self, message: &str) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.confirm_with_message(message).ok())
                .unwrap_or(false)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("No confirmation dialog available, declining: {}", message);
            false
        }
    }
}

/// Event callbacks for a list page. All of them are `Copy`.
pub struct CollectionActions<R: Resource> {
    pub open_new: Callback<()>,
    pub open_edit: Callback<i64>,
    pub edit: Callback<DraftEdit<R::Draft>>,
    pub close: Callback<()>,
    pub save: Callback<()>,
    pub delete: Callback<i64>,
    pub dismiss: Callback<()>,
}

impl<R: Resource> Clone for CollectionActions<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Resource> Copy for CollectionActions<R> {}

/// Create the view model for `R`, start the first load, and expose its
/// state as a signal.
pub fn use_collection<R: Resource>() -> (Signal<CollectionState<R>>, CollectionActions<R>) {
    let client = use_api();
    let view = use_hook(|| Rc::new(CollectionView::<R, HttpClient>::new(client)));
    let state = use_observable(view.observable());

    use_hook({
        let view = view.clone();
        move || {
            spawn(async move {
                let _ = view.load().await;
            });
        }
    });

    let actions = CollectionActions {
        open_new: use_callback({
            let view = view.clone();
            move |()| view.open_new()
        }),
        open_edit: use_callback({
            let view = view.clone();
            move |id: i64| {
                if !view.open_edit(id) {
                    tracing::warn!("{} {} is no longer listed", R::NOUN, id);
                }
            }
        }),
        edit: use_callback({
            let view = view.clone();
            move |edit: DraftEdit<R::Draft>| view.edit_draft(edit)
        }),
        close: use_callback({
            let view = view.clone();
            move |()| view.close_form()
        }),
        save: use_callback({
            let view = view.clone();
            move |()| {
                let view = view.clone();
                spawn(async move {
                    match view.save().await {
                        Ok(SaveOutcome::InFlight) => {
                            tracing::debug!("{} save already in flight", R::NOUN)
                        }
                        Ok(SaveOutcome::Saved) => {}
                        Err(e) => tracing::debug!("Saving {} failed: {}", R::NOUN, e),
                    }
                });
            }
        }),
        delete: use_callback({
            let view = view.clone();
            move |id: i64| {
                let view = view.clone();
                spawn(async move {
                    if let Err(e) = view.delete(id, &BrowserConfirm).await {
                        tracing::error!("Deleting {} {} failed: {}", R::NOUN, id, e);
                    }
                });
            }
        }),
        dismiss: use_callback({
            let view = view.clone();
            move |()| view.dismiss_notice()
        }),
    };

    (state, actions)
}

/// `oninput` handler that writes the input's value into one draft field.
pub fn bind<D: 'static>(
    edit: Callback<DraftEdit<D>>,
    apply: fn(&mut D, String),
) -> impl FnMut(FormEvent) + 'static {
    move |evt: FormEvent| {
        let value = evt.value();
        edit.call(Box::new(move |draft: &mut D| apply(draft, value)));
    }
}
