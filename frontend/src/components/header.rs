use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-leaf"></i> {" Your Personal Plant Pathologist"}</h1>
            <p class="subtitle">{"Upload a photo of your plant to identify it, diagnose diseases, and get treatment advice."}</p>
        </header>
    }
}
