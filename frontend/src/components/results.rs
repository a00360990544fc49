use super::super::Model;
use shared::{DiseaseResponse, SpeciesResponse, TreatmentResponse};
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(outcome) = &model.outcome else {
        return html! {};
    };

    html! {
        <div class="results-section">
            <h2>{"Analysis Results"}</h2>
            <div class="results-grid">
                { species_card(&outcome.species) }
                { disease_card(&outcome.disease) }
                {
                    if let Some(treatment) = &outcome.treatment {
                        treatment_card(treatment)
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

fn result_card(icon: &'static str, title: &'static str, body: Html) -> Html {
    html! {
        <div class="result-card">
            <div class="result-card-header">
                <h3>{ title }</h3>
                <i class={classes!("fa-solid", icon)}></i>
            </div>
            <div class="result-card-body">{ body }</div>
        </div>
    }
}

fn species_card(species: &SpeciesResponse) -> Html {
    result_card(
        "fa-seedling",
        "Plant Species",
        html! {
            <>
                <h4>{ &species.species }</h4>
                <p class="confidence">{ format!("Confidence: {:.0}%", species.confidence * 100.0) }</p>
                <p>{ &species.description }</p>
            </>
        },
    )
}

fn disease_card(disease: &DiseaseResponse) -> Html {
    let body = if disease.disease_detected {
        html! {
            <>
                <h4 class="status-diseased">{ &disease.disease_name }</h4>
                <p class="label">{"Symptoms:"}</p>
                <p>{ &disease.symptoms_description }</p>
            </>
        }
    } else {
        html! {
            <>
                <h4 class="status-healthy">{"Healthy"}</h4>
                <p>{"No disease detected. Your plant appears to be in good health!"}</p>
            </>
        }
    };
    result_card("fa-heart-pulse", "Health Status", body)
}

fn treatment_card(treatment: &TreatmentResponse) -> Html {
    result_card(
        "fa-vial",
        "Recommended Treatment",
        html! {
            <>
                <h4>{ &treatment.treatment }</h4>
                <p class="label">{"Dosage:"}</p>
                <p>{ &treatment.dosage }</p>
            </>
        },
    )
}
