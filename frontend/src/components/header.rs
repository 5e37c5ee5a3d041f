use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-eye"></i> {" Image Analysis with OCI Vision"}</h1>
            <p class="subtitle">{"Upload a JPG or PNG image and pick an analysis"}</p>
        </header>
    }
}
