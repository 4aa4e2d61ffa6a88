use dioxus::prelude::*;
use store::Page;

/// Unknown paths (and the legacy `/home`) land on the page `Page::from_path`
/// resolves them to.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    let page = Page::from_path(&format!("/{}", segments.join("/")));
    tracing::debug!("No route for /{}, going to {}", segments.join("/"), page.path());
    nav.replace(page.path());
    rsx! {}
}
