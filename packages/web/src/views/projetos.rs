use dioxus::prelude::*;
use ui::views::ProjectsView;

#[component]
pub fn Projetos() -> Element {
    rsx! {
        ProjectsView {}
    }
}
