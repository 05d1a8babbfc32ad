//! Bridge to the page's hand-landmark model and the webcam.
//!
//! The page glue exposes `window.createHandRecognizer()`, a promise for an
//! object with `recognizeForVideo(video, timestampMs)`. Results are
//! serialized to JSON on the JS side of the call and decoded into a
//! [`HandSample`], so the rest of the crate only ever sees plain Rust data.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, MediaStream, MediaStreamConstraints};

use crate::error::{GameError, Result};
use crate::input::HandSample;
use crate::util::describe_js;

const FACTORY: &str = "createHandRecognizer";
const DETECT: &str = "recognizeForVideo";

fn unavailable(e: JsValue) -> GameError {
    GameError::RecognizerUnavailable(describe_js(&e))
}

pub struct HandRecognizer {
    handle: JsValue,
    detect: Function,
}

impl HandRecognizer {
    pub async fn create() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| GameError::RecognizerUnavailable("no window".into()))?;
        let factory = Reflect::get(&window, &JsValue::from_str(FACTORY))
            .map_err(unavailable)?
            .dyn_into::<Function>()
            .map_err(|_| GameError::RecognizerUnavailable(format!("window.{FACTORY} is not a function")))?;
        let promise = factory
            .call0(&window)
            .map_err(unavailable)?
            .dyn_into::<Promise>()
            .map_err(|_| GameError::RecognizerUnavailable(format!("{FACTORY} did not return a promise")))?;
        let handle = JsFuture::from(promise).await.map_err(unavailable)?;
        let detect = Reflect::get(&handle, &JsValue::from_str(DETECT))
            .map_err(unavailable)?
            .dyn_into::<Function>()
            .map_err(|_| GameError::RecognizerUnavailable(format!("recognizer has no {DETECT}")))?;
        log::info!("hand recognizer ready");
        Ok(Self { handle, detect })
    }

    pub fn recognize(&self, video: &HtmlVideoElement, timestamp_ms: f64) -> Result<HandSample> {
        let result = self
            .detect
            .call2(&self.handle, video, &JsValue::from_f64(timestamp_ms))
            .map_err(|e| GameError::MalformedResult(describe_js(&e)))?;
        let json = js_sys::JSON::stringify(&result).map_err(|e| GameError::MalformedResult(describe_js(&e)))?;
        HandSample::from_json(&String::from(json))
    }
}

/// Ask for the webcam and play it into `video`.
pub async fn start_camera(video: &HtmlVideoElement) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| GameError::RecognizerUnavailable("no window".into()))?;
    let devices = window.navigator().media_devices().map_err(unavailable)?;
    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&JsValue::TRUE);
    constraints.set_audio(&JsValue::FALSE);
    let promise = devices.get_user_media_with_constraints(&constraints).map_err(unavailable)?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(unavailable)?
        .dyn_into::<MediaStream>()
        .map_err(|_| GameError::RecognizerUnavailable("getUserMedia returned no stream".into()))?;
    video.set_muted(true);
    video.set_src_object(Some(&stream));
    JsFuture::from(video.play().map_err(unavailable)?).await.map_err(unavailable)?;
    log::info!("camera started");
    Ok(())
}
