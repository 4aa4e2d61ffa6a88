mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod protected;
pub use protected::Protected;

mod dashboard;
pub use dashboard::Dashboard;

mod projetos;
pub use projetos::Projetos;

mod materiais;
pub use materiais::Materiais;

mod not_found;
pub use not_found::NotFound;
