use super::super::{Model, Msg};
use yew::html::Scope;
use yew::prelude::*;

pub fn render_theme_toggle(theme: &str, link: &Scope<Model>) -> Html {
    let (icon, title) = if theme == "light" {
        ("fa-moon", "Switch to Dark Mode")
    } else {
        ("fa-sun", "Switch to Light Mode")
    };

    html! {
        <div class="top-right">
            <button
                id="theme-toggle"
                class="theme-toggle"
                onclick={link.callback(|_| Msg::ToggleTheme)}
                title={title}
            >
                <i class={classes!("fa-solid", icon)}></i>
            </button>
        </div>
    }
}
