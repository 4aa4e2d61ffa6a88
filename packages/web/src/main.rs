use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use store::Page;
use ui::{AuthProvider, MAIN_CSS};
use views::{Dashboard, Home, Login, Materiais, NotFound, Projetos, Protected, Register};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(Protected)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/projetos")]
        Projetos {},
        #[route("/materiais")]
        Materiais {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// The page this route renders, for the guard.
    fn page(&self) -> Page {
        match self {
            Route::Home {} => Page::Home,
            Route::Login {} => Page::Login,
            Route::Register {} => Page::Register,
            Route::Dashboard {} => Page::Dashboard,
            Route::Projetos {} => Page::Projects,
            Route::Materiais {} => Page::Materials,
            Route::NotFound { segments } => Page::from_path(&format!("/{}", segments.join("/"))),
        }
    }
}

fn main() {
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Title { "Portal ALLUPRO" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
