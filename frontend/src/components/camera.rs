//! Live camera acquisition. The component owns the media stream exclusively:
//! tracks are stopped before a replacement stream is requested and on
//! teardown.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, MediaTrackConstraints,
};
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FacingMode {
    Environment,
    User,
}

impl FacingMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Environment => "environment",
            Self::User => "user",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Environment => Self::User,
            Self::User => Self::Environment,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Environment => "Rear camera",
            Self::User => "Front camera",
        }
    }
}

pub enum CameraMsg {
    StreamReady(MediaStream, FacingMode),
    StreamUnavailable,
    SwitchFacing,
    Capture,
    Retake,
}

#[derive(Properties, PartialEq)]
pub struct CameraProps {
    /// Fired with the JPEG data URI of the captured frame.
    pub on_capture: Callback<String>,
    /// Fired when the user discards the captured frame.
    pub on_retake: Callback<()>,
}

pub struct CameraCapture {
    video_ref: NodeRef,
    stream: Option<MediaStream>,
    facing: FacingMode,
    permission_denied: bool,
    captured: Option<String>,
}

impl Component for CameraCapture {
    type Message = CameraMsg;
    type Properties = CameraProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            video_ref: NodeRef::default(),
            stream: None,
            facing: FacingMode::Environment,
            permission_denied: false,
            captured: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            request_stream(ctx, FacingMode::Environment);
        }

        // Attach the stream once the video element and the stream both exist.
        if let (Some(stream), Some(video)) =
            (&self.stream, self.video_ref.cast::<HtmlVideoElement>())
        {
            if video.src_object().is_none() {
                video.set_src_object(Some(stream));
                let _ = video.play();
            }
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CameraMsg::StreamReady(stream, facing) => {
                self.stream = Some(stream);
                self.facing = facing;
                self.permission_denied = false;
                true
            }
            CameraMsg::StreamUnavailable => {
                self.permission_denied = true;
                true
            }
            CameraMsg::SwitchFacing => {
                self.stop_stream();
                request_stream(ctx, self.facing.other());
                true
            }
            CameraMsg::Capture => {
                match self.capture_frame() {
                    Some(data_uri) => {
                        self.captured = Some(data_uri.clone());
                        ctx.props().on_capture.emit(data_uri);
                    }
                    None => log::warn!("Frame capture failed"),
                }
                true
            }
            CameraMsg::Retake => {
                self.captured = None;
                ctx.props().on_retake.emit(());
                true
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.stop_stream();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.permission_denied {
            return html! {
                <div class="camera-denied">
                    <i class="fa-solid fa-video-slash"></i>
                    <p>{"Camera access is unavailable. Grant camera permission or use the file upload instead."}</p>
                </div>
            };
        }

        let link = ctx.link();
        let preview_style = if self.captured.is_some() {
            "display: none;"
        } else {
            ""
        };

        html! {
            <div class="camera-capture">
                <video
                    ref={self.video_ref.clone()}
                    class="camera-preview"
                    style={preview_style}
                ></video>
                {
                    if let Some(data_uri) = &self.captured {
                        html! { <img class="camera-still" src={data_uri.clone()} alt="Captured frame" /> }
                    } else {
                        html! {}
                    }
                }
                <div class="button-container">
                {
                    if self.captured.is_some() {
                        html! {
                            <button class="analyze-btn" onclick={link.callback(|_| CameraMsg::Retake)}>
                                <i class="fa-solid fa-rotate-left"></i>{" Retake"}
                            </button>
                        }
                    } else {
                        html! {
                            <>
                                <button
                                    class="analyze-btn"
                                    onclick={link.callback(|_| CameraMsg::Capture)}
                                    disabled={self.stream.is_none()}
                                >
                                    <i class="fa-solid fa-camera"></i>{" Capture"}
                                </button>
                                <button
                                    class="analyze-btn"
                                    onclick={link.callback(|_| CameraMsg::SwitchFacing)}
                                    disabled={self.stream.is_none()}
                                >
                                    <i class="fa-solid fa-camera-rotate"></i>
                                    { format!(" {}", self.facing.other().label()) }
                                </button>
                            </>
                        }
                    }
                }
                </div>
            </div>
        }
    }
}

impl CameraCapture {
    fn stop_stream(&mut self) {
        if let Some(stream) = self.stream.take() {
            for track in stream.get_tracks().iter() {
                if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                    track.stop();
                }
            }
        }
        if let Some(video) = self.video_ref.cast::<HtmlVideoElement>() {
            video.set_src_object(None);
        }
    }

    /// Draw the current video frame into an off-screen canvas at native
    /// resolution and export it as a JPEG data URI.
    fn capture_frame(&self) -> Option<String> {
        let video = self.video_ref.cast::<HtmlVideoElement>()?;
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
        canvas.set_width(video.video_width());
        canvas.set_height(video.video_height());

        let context: CanvasRenderingContext2d =
            canvas.get_context("2d").ok()??.dyn_into().ok()?;
        context
            .draw_image_with_html_video_element(&video, 0.0, 0.0)
            .ok()?;
        canvas.to_data_url_with_type("image/jpeg").ok()
    }
}

fn request_stream(ctx: &Context<CameraCapture>, preferred: FacingMode) {
    let link = ctx.link().clone();
    spawn_local(async move {
        match acquire_stream(preferred).await {
            Ok((stream, facing)) => link.send_message(CameraMsg::StreamReady(stream, facing)),
            Err(e) => {
                log::warn!("Camera unavailable: {:?}", e);
                link.send_message(CameraMsg::StreamUnavailable);
            }
        }
    });
}

/// Prefer the exact requested facing mode; fall back to the opposite camera
/// before giving up entirely.
async fn acquire_stream(preferred: FacingMode) -> Result<(MediaStream, FacingMode), JsValue> {
    match open_stream(preferred, true).await {
        Ok(stream) => Ok((stream, preferred)),
        Err(e) => {
            log::warn!(
                "Exact {} camera unavailable, falling back: {:?}",
                preferred.as_str(),
                e
            );
            let fallback = preferred.other();
            let stream = open_stream(fallback, false).await?;
            Ok((stream, fallback))
        }
    }
}

async fn open_stream(mode: FacingMode, exact: bool) -> Result<MediaStream, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let devices = window.navigator().media_devices()?;

    let facing: JsValue = if exact {
        let constraint = js_sys::Object::new();
        js_sys::Reflect::set(
            &constraint,
            &JsValue::from_str("exact"),
            &JsValue::from_str(mode.as_str()),
        )?;
        constraint.into()
    } else {
        JsValue::from_str(mode.as_str())
    };

    let video = MediaTrackConstraints::new();
    video.set_facing_mode(&facing);

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(video.as_ref());

    let promise = devices.get_user_media_with_constraints(&constraints)?;
    JsFuture::from(promise)
        .await?
        .dyn_into::<MediaStream>()
        .map_err(|_| JsValue::from_str("getUserMedia did not return a MediaStream"))
}
