pub mod collection;
pub mod dashboard;
pub mod format;
pub mod forms;
pub mod notice;
pub mod observable;
pub mod routes;
pub mod session;

pub use collection::{
    CollectionState, CollectionView, Confirm, DeleteOutcome, FormState, Resource, SaveOutcome, ViewError,
};
pub use dashboard::{DashboardState, DashboardView};
pub use format::{format_currency, format_date, format_optional_currency, StockLevel};
pub use forms::{
    Draft, FormMode, LoginForm, MaterialDraft, ProjectDraft, RegisterForm, ValidationError,
};
pub use notice::{Notice, NoticeKind};
pub use observable::{Observable, Subscription};
pub use routes::{entry_redirect, guard, navigate, GuardDecision, Navigate, Page};
pub use session::{AuthError, AuthState, SessionStore, CONNECTION_ERROR};
