use super::super::{AcquisitionMode, Model, Msg, View};
use super::upload::first_image_file;
use crate::api::HttpApi;
use gloo_file::File as GlooFile;
use gloo_file::callbacks::read_as_data_url;
use shared::{AnalysisError, AnalysisOutcome, check_upload_size, run_analysis};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_image_selected(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    // Capacity gate before any read is attempted.
    if check_upload_size(file.size()).is_err() {
        model.error = Some("Image too large. Please upload an image smaller than 4MB.".to_string());
        return true;
    }

    model.error = None;
    model.outcome = None;

    let link = ctx.link().clone();
    // The reader handle must stay alive until its callback fires.
    model.pending_read = Some(read_as_data_url(&file, move |result| match result {
        Ok(data_uri) => link.send_message(Msg::ImageLoaded(data_uri)),
        Err(e) => link.send_message(Msg::SetError(Some(format!("Failed to read image: {e}")))),
    }));
    true
}

pub fn handle_image_loaded(model: &mut Model, data_uri: String) -> bool {
    model.pending_read = None;
    model.image = Some(data_uri);
    model.outcome = None;
    model.error = None;
    true
}

pub fn handle_image_cleared(model: &mut Model) -> bool {
    model.image = None;
    model.outcome = None;
    true
}

pub fn handle_set_acquisition(model: &mut Model, mode: AcquisitionMode) -> bool {
    if model.acquisition == mode {
        return false;
    }
    // The modes are alternatives: the candidate does not survive a switch.
    model.acquisition = mode;
    model.image = None;
    model.pending_read = None;
    model.outcome = None;
    model.error = None;
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file_list) = event.data_transfer().and_then(|dt| dt.files()) {
        match first_image_file(Some(file_list)) {
            Some(file) => ctx.link().send_message(Msg::ImageSelected(file)),
            None => {
                log::warn!("Dropped content contained no image file");
                ctx.link().send_message(Msg::SetError(Some(
                    "No valid image file dropped.".to_string(),
                )));
            }
        }
    }

    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(photo) = model.image.clone() else {
        model.error =
            Some("No image selected. Please provide a photo of a plant to analyze.".to_string());
        return true;
    };

    model.loading = true;
    model.error = None;
    model.outcome = None;

    let link = ctx.link().clone();
    spawn_local(async move {
        let result = run_analysis(&HttpApi, &photo).await;
        link.send_message(Msg::AnalysisComplete(result));
    });
    true
}

pub fn handle_analysis_complete(
    model: &mut Model,
    result: Result<AnalysisOutcome, AnalysisError>,
) -> bool {
    model.loading = false;
    match result {
        Ok(outcome) => model.outcome = Some(outcome),
        Err(e) => {
            log::error!("Analysis failed: {}", e);
            model.error =
                Some("There was a problem analyzing your image. Please try again.".to_string());
        }
    }
    true
}

pub fn handle_switch_view(model: &mut Model, view: View) -> bool {
    if model.view == view {
        return false;
    }
    model.view = view;
    true
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    let body = web_sys::window().unwrap().document().unwrap().body().unwrap();

    if model.theme == "light" {
        model.theme = "dark".to_string();
        body.class_list().add_1("dark-mode").unwrap();
    } else {
        model.theme = "light".to_string();
        body.class_list().remove_1("dark-mode").unwrap();
    }

    true
}
