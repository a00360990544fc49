use super::super::{Model, Msg};
use super::utils::debounce;
use gloo_file::File as GlooFile;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, FileList, HtmlInputElement};
use yew::prelude::*;

/// First image file out of a selection or drop. Non-image entries are skipped.
pub fn first_image_file(files: Option<FileList>) -> Option<GlooFile> {
    let files = files?;
    (0..files.length())
        .filter_map(|i| files.item(i))
        .find(|file| file.type_().starts_with("image/"))
        .map(GlooFile::from)
}

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = first_image_file(input.files());

        input.set_value("");

        match file {
            Some(file) => Msg::ImageSelected(file),
            None => Msg::SetError(Some("No valid image file selected.".into())),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::Dropped);
    let trigger_file_input = Callback::from(|_| {
        if let Some(input) = web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .get_element_by_id("file-input")
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    });

    html! {
        <div class="upload-section">
            <input
                type="file"
                id="file-input"
                accept="image/*"
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                {
                    if let Some(data_uri) = &model.image {
                        html! { <img class="image-preview" src={data_uri.clone()} alt="Plant preview" /> }
                    } else {
                        html! {
                            <div class="upload-placeholder">
                                <i class="fa-solid fa-cloud-arrow-up"></i>
                                <p>{"Click to upload or drag and drop"}</p>
                                <p class="file-types">{"PNG, JPG, GIF up to 4MB"}</p>
                            </div>
                        }
                    }
                }
            </div>
        </div>
    }
}
