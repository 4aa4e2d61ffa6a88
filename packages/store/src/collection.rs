//! # CRUD list views
//!
//! [`CollectionView`] is the list-plus-form pattern shared by the projects
//! and materials pages, written once over a [`Resource`]:
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`load`](CollectionView::load) | Fetch the whole collection; `loading` stays true until the first answer. |
//! | [`open_new`](CollectionView::open_new) | Blank form in [`FormMode::Creating`]. |
//! | [`open_edit`](CollectionView::open_edit) | Same form pre-filled from the record, in [`FormMode::Editing`]. |
//! | [`save`](CollectionView::save) | Validate, then `PUT /{path}/{id}` or `POST /{path}`. Success closes the form and reloads; failure keeps the form open with its error. |
//! | [`delete`](CollectionView::delete) | Ask [`Confirm`], `DELETE /{path}/{id}`, check the reported `success` flag, reload. |
//!
//! The list is never patched locally: after any mutation the collection is
//! fetched again, so it always shows what the backend holds.

use api::{ApiError, Material, MutationResponse, Operation, Project, Transport};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::forms::{Draft, FormMode, MaterialDraft, ProjectDraft, ValidationError};
use crate::notice::Notice;
use crate::observable::{Observable, Subscription};

/// A record type with its own collection endpoint.
pub trait Resource: std::fmt::Debug + Clone + PartialEq + DeserializeOwned + 'static {
    type Draft: Draft + for<'a> From<&'a Self>;

    /// Collection path, e.g. `/projetos`.
    const PATH: &'static str;
    /// Singular noun for messages, e.g. `Projeto`.
    const NOUN: &'static str;

    fn id(&self) -> i64;
    fn name(&self) -> &str;

    fn item_path(id: i64) -> String {
        format!("{}/{}", Self::PATH, id)
    }

    fn delete_prompt(&self) -> String {
        format!("Excluir o {} \"{}\"?", Self::NOUN.to_lowercase(), self.name())
    }
}

impl Resource for Project {
    type Draft = ProjectDraft;
    const PATH: &'static str = "/projetos";
    const NOUN: &'static str = "Projeto";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Material {
    type Draft = MaterialDraft;
    const PATH: &'static str = "/materiais";
    const NOUN: &'static str = "Material";

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Interactive yes/no confirmation, e.g. `window.confirm`.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// The open create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D> {
    pub mode: FormMode,
    pub draft: D,
    pub saving: bool,
    pub error: Option<String>,
}

impl<D> FormState<D> {
    fn new(mode: FormMode, draft: D) -> Self {
        Self {
            mode,
            draft,
            saving: false,
            error: None,
        }
    }
}

/// Everything a list page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<R: Resource> {
    pub items: Vec<R>,
    pub loading: bool,
    /// Last load failure, cleared by the next successful load.
    pub error: Option<String>,
    pub form: Option<FormState<R::Draft>>,
    pub notice: Option<Notice>,
}

impl<R: Resource> Default for CollectionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: true,
            error: None,
            form: None,
            notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The backend answered `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Nenhum formulário aberto")]
    NoForm,
    #[error("Registro {0} não encontrado")]
    NotFound(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// A save for this form was already in flight; nothing was sent.
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    Deleted,
    /// The backend answered `success: false`.
    Rejected(String),
}

pub struct CollectionView<R: Resource, T> {
    transport: T,
    state: Observable<CollectionState<R>>,
}

impl<R: Resource, T: Transport> CollectionView<R, T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Observable::new(CollectionState::default()),
        }
    }

    pub fn state(&self) -> CollectionState<R> {
        self.state.get()
    }

    pub fn observable(&self) -> &Observable<CollectionState<R>> {
        &self.state
    }

    pub fn subscribe(&self, callback: impl Fn(&CollectionState<R>) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    pub fn items(&self) -> Vec<R> {
        self.state.with(|s| s.items.clone())
    }

    /// Replace the list with a fresh copy from the backend.
    pub async fn load(&self) -> Result<(), ApiError> {
        self.state.update(|s| s.loading = true);
        let result: Result<Vec<R>, ApiError> = self.transport.fetch(R::PATH).await;
        match result {
            Ok(items) => {
                tracing::debug!("Loaded {} from {}", items.len(), R::PATH);
                self.state.update(|s| {
                    s.items = items;
                    s.loading = false;
                    s.error = None;
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!("Loading {} failed: {}", R::PATH, e);
                let message = e.to_string();
                self.state.update(|s| {
                    s.loading = false;
                    s.error = Some(message.clone());
                    s.notice = Some(Notice::error(message));
                });
                Err(e)
            }
        }
    }

    pub fn open_new(&self) {
        self.state.update(|s| {
            s.form = Some(FormState::new(FormMode::Creating, R::Draft::default()));
        });
    }

    /// Open the form pre-filled with record `id`. Returns false when the
    /// record is not in the current list.
    pub fn open_edit(&self, id: i64) -> bool {
        let Some(item) = self.find(id) else {
            return false;
        };
        let draft = R::Draft::from(&item);
        self.state.update(|s| {
            s.form = Some(FormState::new(FormMode::Editing(id), draft));
        });
        true
    }

    /// Change the open form's fields. No-op when no form is open.
    pub fn edit_draft(&self, edit: impl FnOnce(&mut R::Draft)) {
        self.state.update(|s| {
            if let Some(form) = s.form.as_mut() {
                edit(&mut form.draft);
            }
        });
    }

    pub fn close_form(&self) {
        self.state.update(|s| s.form = None);
    }

    pub fn dismiss_notice(&self) {
        self.state.update(|s| s.notice = None);
    }

    /// Submit the open form.
    ///
    /// Only the form that was submitted is closed on success; a different
    /// form opened while the request was in flight stays open.
    pub async fn save(&self) -> Result<SaveOutcome, ViewError> {
        let Some(form) = self.state.with(|s| s.form.clone()) else {
            return Err(ViewError::NoForm);
        };
        if form.saving {
            return Ok(SaveOutcome::InFlight);
        }

        let payload = match form.draft.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.set_form_error(e.to_string());
                return Err(e.into());
            }
        };

        self.state.update(|s| {
            if let Some(form) = s.form.as_mut() {
                form.saving = true;
                form.error = None;
            }
        });

        let (op, result): (Operation, Result<MutationResponse, ApiError>) = match form.mode {
            FormMode::Editing(id) => (
                Operation::Replace,
                self.transport.replace(&R::item_path(id), &payload).await,
            ),
            FormMode::Creating => (
                Operation::Create,
                self.transport.create(R::PATH, &payload).await,
            ),
        };

        match result {
            Ok(response) if response.success => {
                let verb = match op {
                    Operation::Replace => "atualizado",
                    _ => "criado",
                };
                tracing::info!("{} {} ({:?})", R::NOUN, verb, response.id);
                self.state.update(|s| {
                    if s.form.as_ref().is_some_and(|f| f.mode == form.mode && f.saving) {
                        s.form = None;
                    }
                    s.notice = Some(Notice::success(format!("{} {} com sucesso!", R::NOUN, verb)));
                });
                // A failed reload is recorded in the view state by `load`.
                let _ = self.load().await;
                Ok(SaveOutcome::Saved)
            }
            Ok(response) => {
                let message = response.error.unwrap_or_else(|| op.to_string());
                tracing::warn!("{} {} rejected: {}", op.method(), R::PATH, message);
                self.set_form_error(message.clone());
                Err(ViewError::Rejected(message))
            }
            Err(e) => {
                let message = e.server_message().map(str::to_owned).unwrap_or_else(|| e.to_string());
                self.set_form_error(message);
                Err(e.into())
            }
        }
    }

    /// Delete record `id` after confirmation, then reload.
    ///
    /// The reload happens whatever the backend answered; a `success: false`
    /// answer is surfaced as an error notice instead of being swallowed.
    pub async fn delete(&self, id: i64, confirm: &impl Confirm) -> Result<DeleteOutcome, ViewError> {
        let Some(item) = self.find(id) else {
            return Err(ViewError::NotFound(id));
        };
        if !confirm.confirm(&item.delete_prompt()) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let result: Result<MutationResponse, ApiError> =
            self.transport.remove(&R::item_path(id)).await;
        let outcome = match result {
            Ok(response) if response.success => {
                tracing::info!("{} {} deleted", R::NOUN, id);
                self.notify(Notice::success(format!("{} deletado com sucesso!", R::NOUN)));
                Ok(DeleteOutcome::Deleted)
            }
            Ok(response) => {
                let message = response
                    .error
                    .unwrap_or_else(|| Operation::Remove.to_string());
                tracing::warn!("Delete of {} {} reported failure: {}", R::NOUN, id, message);
                self.notify(Notice::error(message.clone()));
                Ok(DeleteOutcome::Rejected(message))
            }
            Err(e) => {
                let message = e.server_message().map(str::to_owned).unwrap_or_else(|| e.to_string());
                tracing::warn!("Delete of {} {} failed: {}", R::NOUN, id, e);
                self.notify(Notice::error(message));
                Err(ViewError::Api(e))
            }
        };

        let _ = self.load().await;
        outcome
    }

    pub fn find(&self, id: i64) -> Option<R> {
        self.state
            .with(|s| s.items.iter().find(|item| item.id() == id).cloned())
    }

    fn set_form_error(&self, message: String) {
        self.state.update(|s| {
            if let Some(form) = s.form.as_mut() {
                form.saving = false;
                form.error = Some(message);
            }
        });
    }

    fn notify(&self, notice: Notice) {
        self.state.update(|s| s.notice = Some(notice));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MaterialPayload, MemoryBackend, ProjectPayload, ProjectStatus};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::sync::Notify;

    fn signed_in_backend() -> MemoryBackend {
        let backend = MemoryBackend::new();
        let user = backend.add_user("Ana", "ana@allupro.com", "senha123");
        backend.sign_in(&user);
        backend
    }

    fn material(name: &str, stock: i64) -> MaterialPayload {
        MaterialPayload {
            name: name.to_string(),
            kind: "obra".to_string(),
            specification: None,
            unit_price: None,
            stock,
            unit: "un".to_string(),
            supplier: None,
        }
    }

    fn project(name: &str) -> ProjectPayload {
        ProjectPayload {
            name: name.to_string(),
            description: None,
            kind: "obra".to_string(),
            status: ProjectStatus::Ativo,
            start_date: None,
            target_date: None,
            estimated_value: None,
            notes: None,
        }
    }

    const YES: fn(&str) -> bool = |_| true;
    const NO: fn(&str) -> bool = |_| false;

    #[tokio::test]
    async fn test_loading_until_first_response() {
        let backend = signed_in_backend();
        backend.seed_project(project("Casa"));
        let view: CollectionView<Project, _> = CollectionView::new(backend);

        assert!(view.state().loading);
        view.load().await.unwrap();

        let state = view.state();
        assert!(!state.loading);
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn test_create_project_reloads_full_list() {
        let backend = signed_in_backend();
        backend.seed_project(project("Casa"));
        let view: CollectionView<Project, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        let before = view.items().len();
        let fetches = backend.count(Operation::Fetch, "/projetos");

        view.open_new();
        view.edit_draft(|d| d.name = "Galpão".to_string());
        view.save().await.unwrap();

        let state = view.state();
        assert_eq!(state.items.len(), before + 1);
        assert_eq!(backend.count(Operation::Fetch, "/projetos"), fetches + 1);
        assert!(state.form.is_none());
        assert_eq!(
            state.notice,
            Some(Notice::success("Projeto criado com sucesso!"))
        );
    }

    #[tokio::test]
    async fn test_create_material_example() {
        let backend = signed_in_backend();
        let view: CollectionView<Material, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();

        view.open_new();
        view.edit_draft(|d| {
            d.name = "Cabo 10mm".to_string();
            d.kind = "elétrico".to_string();
            d.stock = "5".to_string();
            d.unit = "m".to_string();
        });
        view.save().await.unwrap();

        let state = view.state();
        assert!(state.form.is_none());
        assert_eq!(backend.count(Operation::Fetch, "/materiais"), 2);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].stock, 5);
        assert_eq!(state.items[0].unit, "m");
    }

    #[tokio::test]
    async fn test_edit_replaces_by_id() {
        let backend = signed_in_backend();
        let id = backend.seed_material(material("Areia", 3));
        let view: CollectionView<Material, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();

        assert!(view.open_edit(id));
        let form = view.state().form.unwrap();
        assert_eq!(form.mode, FormMode::Editing(id));
        assert_eq!(form.draft.name, "Areia");

        view.edit_draft(|d| d.stock = "30".to_string());
        view.save().await.unwrap();

        assert_eq!(backend.count(Operation::Replace, &format!("/materiais/{id}")), 1);
        assert_eq!(backend.count(Operation::Create, "/materiais"), 0);
        assert_eq!(view.items()[0].stock, 30);
    }

    #[tokio::test]
    async fn test_open_edit_unknown_id() {
        let view: CollectionView<Material, _> = CollectionView::new(signed_in_backend());
        view.load().await.unwrap();
        assert!(!view.open_edit(99));
        assert!(view.state().form.is_none());
    }

    #[tokio::test]
    async fn test_invalid_draft_keeps_form_open_without_request() {
        let backend = signed_in_backend();
        let view: CollectionView<Material, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        view.open_new();

        let err = view.save().await.unwrap_err();
        assert_eq!(err, ViewError::Invalid(ValidationError::Required("Nome")));
        let form = view.state().form.unwrap();
        assert_eq!(form.error.as_deref(), Some("O campo \"Nome\" é obrigatório"));
        assert!(!form.saving);
        assert_eq!(backend.count(Operation::Create, "/materiais"), 0);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_form_and_list() {
        let backend = signed_in_backend();
        backend.seed_project(project("Casa"));
        let view: CollectionView<Project, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        let items = view.items();

        backend.fail_next(Operation::Create, "/projetos", 400, Some("NOT NULL constraint failed"));
        view.open_new();
        view.edit_draft(|d| d.name = "Nova".to_string());
        let err = view.save().await.unwrap_err();

        assert!(matches!(err, ViewError::Api(_)));
        let state = view.state();
        let form = state.form.unwrap();
        assert_eq!(form.error.as_deref(), Some("NOT NULL constraint failed"));
        assert_eq!(form.draft.name, "Nova");
        assert_eq!(state.items, items);

        // Retry from the same form succeeds.
        view.save().await.unwrap();
        assert_eq!(view.items().len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_save_reports_backend_error() {
        let backend = signed_in_backend();
        let view: CollectionView<Project, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        backend.reject_next(Operation::Create, "/projetos", "tipo_projeto inválido");

        view.open_new();
        view.edit_draft(|d| d.name = "X".to_string());
        let err = view.save().await.unwrap_err();

        assert_eq!(err, ViewError::Rejected("tipo_projeto inválido".into()));
        assert!(view.state().form.is_some());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let backend = signed_in_backend();
        let id = backend.seed_material(material("Tijolo", 100));
        let view: CollectionView<Material, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        let before = view.items();

        let outcome = view.delete(id, &NO).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(view.items(), before);
        assert_eq!(backend.count(Operation::Remove, &format!("/materiais/{id}")), 0);
    }

    #[tokio::test]
    async fn test_accepted_delete_removes_only_target() {
        let backend = signed_in_backend();
        let keep = backend.seed_material(material("Areia", 1));
        let target = backend.seed_material(material("Tijolo", 100));
        let view: CollectionView<Material, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();

        let prompts = RefCell::new(Vec::new());
        let confirm = |message: &str| {
            prompts.borrow_mut().push(message.to_string());
            true
        };
        let outcome = view.delete(target, &confirm).await.unwrap();

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(*prompts.borrow(), vec!["Excluir o material \"Tijolo\"?".to_string()]);
        let ids: Vec<i64> = view.items().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[tokio::test]
    async fn test_rejected_delete_is_flagged_and_still_reloads() {
        let backend = signed_in_backend();
        let id = backend.seed_project(project("Casa"));
        let view: CollectionView<Project, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        let path = format!("/projetos/{id}");
        backend.reject_next(Operation::Remove, &path, "FOREIGN KEY constraint failed");

        let outcome = view.delete(id, &YES).await.unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Rejected("FOREIGN KEY constraint failed".into())
        );
        let state = view.state();
        assert!(state.notice.as_ref().is_some_and(Notice::is_error));
        assert_eq!(state.items.len(), 1);
        assert_eq!(backend.count(Operation::Fetch, "/projetos"), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_shows_backend_message_and_reloads() {
        let backend = signed_in_backend();
        let id = backend.seed_material(material("Tijolo", 100));
        let view: CollectionView<Material, _> = CollectionView::new(backend.clone());
        view.load().await.unwrap();
        let path = format!("/materiais/{id}");
        backend.fail_next(Operation::Remove, &path, 400, Some("FOREIGN KEY constraint failed"));

        let err = view.delete(id, &YES).await.unwrap_err();

        assert!(matches!(err, ViewError::Api(_)));
        let state = view.state();
        assert_eq!(
            state.notice,
            Some(Notice::error("FOREIGN KEY constraint failed"))
        );
        assert_eq!(state.items.len(), 1);
        assert_eq!(backend.count(Operation::Fetch, "/materiais"), 2);
    }

    /// Holds every create until the gate is opened.
    struct GatedBackend {
        inner: MemoryBackend,
        gate: Rc<Notify>,
    }

    impl Transport for GatedBackend {
        async fn fetch<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
            self.inner.fetch(path).await
        }

        async fn create<B: serde::Serialize + ?Sized, R: DeserializeOwned>(
            &self,
            path: &str,
            body: &B,
        ) -> Result<R, ApiError> {
            self.gate.notified().await;
            self.inner.create(path, body).await
        }

        async fn replace<B: serde::Serialize + ?Sized, R: DeserializeOwned>(
            &self,
            path: &str,
            body: &B,
        ) -> Result<R, ApiError> {
            self.inner.replace(path, body).await
        }

        async fn remove<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
            self.inner.remove(path).await
        }
    }

    fn gated_view() -> (CollectionView<Project, GatedBackend>, MemoryBackend, Rc<Notify>) {
        let backend = signed_in_backend();
        let gate = Rc::new(Notify::new());
        let view = CollectionView::new(GatedBackend {
            inner: backend.clone(),
            gate: Rc::clone(&gate),
        });
        (view, backend, gate)
    }

    #[tokio::test]
    async fn test_second_save_while_in_flight_is_skipped() {
        let (view, backend, gate) = gated_view();
        view.load().await.unwrap();
        view.open_new();
        view.edit_draft(|d| d.name = "Galpão".to_string());

        let (first, second) = tokio::join!(view.save(), async {
            let second = view.save().await;
            gate.notify_one();
            second
        });

        assert_eq!(first.unwrap(), SaveOutcome::Saved);
        assert_eq!(second.unwrap(), SaveOutcome::InFlight);
        assert_eq!(backend.count(Operation::Create, "/projetos"), 1);
        assert_eq!(view.items().len(), 1);
    }

    #[tokio::test]
    async fn test_save_does_not_close_a_form_opened_meanwhile() {
        let (view, _backend, gate) = gated_view();
        view.load().await.unwrap();
        view.open_new();
        view.edit_draft(|d| d.name = "Galpão".to_string());

        let (saved, ()) = tokio::join!(view.save(), async {
            view.close_form();
            view.open_new();
            view.edit_draft(|d| d.name = "Depósito".to_string());
            gate.notify_one();
        });

        assert_eq!(saved.unwrap(), SaveOutcome::Saved);
        let state = view.state();
        let form = state.form.expect("the newer form stays open");
        assert_eq!(form.draft.name, "Depósito");
        assert!(!form.saving);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].name, "Galpão");
    }

    #[tokio::test]
    async fn test_load_failure_keeps_view_usable() {
        let backend = signed_in_backend();
        backend.seed_project(project("Casa"));
        backend.fail_next(Operation::Fetch, "/projetos", 500, None);
        let view: CollectionView<Project, _> = CollectionView::new(backend);

        assert!(view.load().await.is_err());
        let state = view.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Erro ao carregar dados (HTTP 500)"));

        view.load().await.unwrap();
        let state = view.state();
        assert!(state.error.is_none());
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_follow_the_list() {
        let backend = signed_in_backend();
        backend.seed_material(material("Areia", 1));
        let view: CollectionView<Material, _> = CollectionView::new(backend);
        let lengths = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lengths);
        let _sub = view.subscribe(move |s| sink.borrow_mut().push((s.loading, s.items.len())));

        view.load().await.unwrap();
        assert_eq!(*lengths.borrow(), vec![(true, 0), (false, 1)]);
    }
}
