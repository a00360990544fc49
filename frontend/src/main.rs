use gloo_file::File as GlooFile;
use gloo_file::callbacks::FileReader;
use shared::{AnalysisError, AnalysisOutcome};
use web_sys::DragEvent;
use yew::prelude::*;

mod api;
mod components;

use components::camera::CameraCapture;
use components::handlers;
use components::header::render_header;
use components::history::HistoryView;
use components::results::render_results;
use components::theme_toggle::render_theme_toggle;
use components::upload::render_upload_section;
use components::utils::{debounce, render_error_message};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum View {
    Analyzer,
    History,
}

/// How the candidate image is obtained. The two modes are alternatives, not
/// stages: switching modes discards the current candidate.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    Upload,
    Camera,
}

pub struct Model {
    /// Candidate image as a data URI; doubles as the preview source.
    pub image: Option<String>,
    /// Keeps the in-flight file read alive until its callback fires.
    pub pending_read: Option<FileReader>,
    pub acquisition: AcquisitionMode,
    pub loading: bool,
    pub error: Option<String>,
    pub outcome: Option<AnalysisOutcome>,
    pub is_dragging: bool,
    pub view: View,
    pub theme: String,
}

pub enum Msg {
    // Image acquisition
    ImageSelected(GlooFile),
    ImageLoaded(String),
    ImageCleared,
    SetAcquisition(AcquisitionMode),
    SetDragging(bool),
    Dropped(DragEvent),

    // Analysis
    Analyze,
    AnalysisComplete(Result<AnalysisOutcome, AnalysisError>),

    // UI states
    SetError(Option<String>),
    SwitchView(View),
    ToggleTheme,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            image: None,
            pending_read: None,
            acquisition: AcquisitionMode::Upload,
            loading: false,
            error: None,
            outcome: None,
            is_dragging: false,
            view: View::Analyzer,
            theme: "light".to_string(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Image acquisition
            Msg::ImageSelected(file) => handlers::handle_image_selected(self, ctx, file),
            Msg::ImageLoaded(data_uri) => handlers::handle_image_loaded(self, data_uri),
            Msg::ImageCleared => handlers::handle_image_cleared(self),
            Msg::SetAcquisition(mode) => handlers::handle_set_acquisition(self, mode),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::Dropped(event) => handlers::handle_drop(self, ctx, event),

            // Analysis
            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::AnalysisComplete(result) => handlers::handle_analysis_complete(self, result),

            // UI states
            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }
            Msg::SwitchView(view) => handlers::handle_switch_view(self, view),
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                { render_theme_toggle(&self.theme, ctx.link()) }
                { self.render_nav(ctx) }

                <main class="main-content">
                {
                    match self.view {
                        View::Analyzer => self.render_analyzer(ctx),
                        View::History => html! { <HistoryView /> },
                    }
                }
                </main>

                <footer class="app-footer">
                    <p>{"Plant identification & disease diagnosis | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

impl Model {
    fn render_nav(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tab = |view: View, icon: &'static str, label: &'static str| {
            html! {
                <button
                    class={classes!("nav-tab", (self.view == view).then_some("active"))}
                    onclick={link.callback(move |_| Msg::SwitchView(view))}
                >
                    <i class={classes!("fa-solid", icon)}></i>{ format!(" {label}") }
                </button>
            }
        };

        html! {
            <nav class="nav-tabs">
                { tab(View::Analyzer, "fa-magnifying-glass", "Analyze") }
                { tab(View::History, "fa-clock-rotate-left", "History") }
            </nav>
        }
    }

    fn render_analyzer(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <>
                { self.render_acquisition_toggle(ctx) }
                {
                    match self.acquisition {
                        AcquisitionMode::Upload => render_upload_section(self, ctx),
                        AcquisitionMode::Camera => html! {
                            <CameraCapture
                                on_capture={link.callback(Msg::ImageLoaded)}
                                on_retake={link.callback(|_| Msg::ImageCleared)}
                            />
                        },
                    }
                }
                <div class="button-container">
                    <button
                        class="analyze-btn"
                        onclick={debounce(300, {
                            let link = link.clone();
                            move || link.send_message(Msg::Analyze)
                        })}
                        disabled={self.loading || self.image.is_none()}
                    >
                        { self.render_analyze_button_content() }
                    </button>
                </div>
                { render_error_message(self) }
                { render_results(self) }
            </>
        }
    }

    fn render_acquisition_toggle(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let mode_button = |mode: AcquisitionMode, icon: &'static str, label: &'static str| {
            html! {
                <button
                    class={classes!("mode-btn", (self.acquisition == mode).then_some("active"))}
                    onclick={link.callback(move |_| Msg::SetAcquisition(mode))}
                >
                    <i class={classes!("fa-solid", icon)}></i>{ format!(" {label}") }
                </button>
            }
        };

        html! {
            <div class="acquisition-toggle">
                { mode_button(AcquisitionMode::Upload, "fa-upload", "File upload") }
                { mode_button(AcquisitionMode::Camera, "fa-camera", "Camera") }
            </div>
        }
    }

    fn render_analyze_button_content(&self) -> Html {
        if self.loading {
            html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
        } else {
            html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Plant"}</> }
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
