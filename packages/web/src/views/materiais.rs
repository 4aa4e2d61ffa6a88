use dioxus::prelude::*;
use ui::views::MaterialsView;

#[component]
pub fn Materiais() -> Element {
    rsx! {
        MaterialsView {}
    }
}
