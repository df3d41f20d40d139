use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-paw"></i> {" Cat vs Dog Classifier"}</h1>
            <p class="subtitle">{"Upload an image and I'll tell you if it's a cat or a dog!"}</p>
        </header>
    }
}
