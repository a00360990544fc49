use crate::api;
use gloo_console::error;
use shared::{HealthStatus, HistoryEntry};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[function_component(HistoryView)]
pub fn history_view() -> Html {
    let entries = use_state(|| None::<Vec<HistoryEntry>>);
    let failed = use_state(|| false);

    {
        let entries = entries.clone();
        let failed = failed.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match api::fetch_history().await {
                    Ok(list) => entries.set(Some(list)),
                    Err(e) => {
                        error!(format!("Failed to load history: {e}"));
                        failed.set(true);
                    }
                }
            });
            || ()
        });
    }

    let body = if *failed {
        html! { <p class="no-results-message">{"Could not load the diagnosis history."}</p> }
    } else {
        match &*entries {
            None => html! { <p>{"Loading history..."}</p> },
            Some(list) if list.is_empty() => html! {
                <div class="history-empty">
                    <h3>{"No History Found"}</h3>
                    <p>{"Start diagnosing your plants to build your history log."}</p>
                </div>
            },
            Some(list) => html! {
                <div class="history-grid">
                    { for list.iter().map(render_history_card) }
                </div>
            },
        }
    };

    html! {
        <div class="history-section">
            <h2>{"Diagnosis History"}</h2>
            <p class="subtitle">{"Review your past plant health analyses."}</p>
            { body }
        </div>
    }
}

fn render_history_card(entry: &HistoryEntry) -> Html {
    let badge_class = match entry.status {
        HealthStatus::Healthy => "badge badge-healthy",
        HealthStatus::Diseased => "badge badge-diseased",
    };
    let disease_line = match entry.status {
        HealthStatus::Healthy => "No disease detected".to_string(),
        HealthStatus::Diseased => entry.disease.clone(),
    };

    html! {
        <div class="history-card" key={entry.id.to_string()}>
            <img src={entry.image_url.clone()} alt={entry.plant_name.clone()} />
            <div class="history-card-body">
                <div class="history-card-title">
                    <h3>{ &entry.plant_name }</h3>
                    <span class={badge_class}>{ entry.status.to_string() }</span>
                </div>
                <p class="history-disease">{ disease_line }</p>
                <p class="history-date">{ entry.date.format("%B %-d, %Y").to_string() }</p>
            </div>
        </div>
    }
}
