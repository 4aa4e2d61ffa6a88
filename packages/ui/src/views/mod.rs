mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod dashboard;
pub use dashboard::DashboardView;

mod projects;
pub use projects::ProjectsView;

mod materials;
pub use materials::MaterialsView;
