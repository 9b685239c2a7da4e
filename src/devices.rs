//! Browser camera and speech recognition behind the core capability traits.

use async_trait::async_trait;
use futures_channel::oneshot;
use js_sys::{Function, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use storefront_core::gateway::{CameraCapability, CapabilityError, SpeechCapability};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

/// Map a DOMException-like error to a capability error by its `name`.
fn classify_error(err: &JsValue) -> CapabilityError {
    let name = js_get(err, "name").and_then(|v| v.as_string()).unwrap_or_default();
    match name.as_str() {
        "NotAllowedError" | "SecurityError" | "not-allowed" | "service-not-allowed" => {
            CapabilityError::Denied
        }
        "NotFoundError" | "OverconstrainedError" | "NotSupportedError" => {
            CapabilityError::Unsupported
        }
        _ => CapabilityError::Failed(format!("{err:?}")),
    }
}

pub struct BrowserCamera;

#[async_trait(?Send)]
impl CameraCapability for BrowserCamera {
    type Stream = web::MediaStream;

    async fn request_camera(&self) -> Result<web::MediaStream, CapabilityError> {
        let window = web::window().ok_or(CapabilityError::Unsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| CapabilityError::Unsupported)?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        constraints.set_audio(&JsValue::FALSE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|e| classify_error(&e))?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(|e| classify_error(&e))?;
        stream
            .dyn_into::<web::MediaStream>()
            .map_err(|_| CapabilityError::Failed("getUserMedia returned no stream".into()))
    }
}

pub fn stop_stream(stream: &web::MediaStream) {
    let tracks = stream.get_tracks();
    for t in tracks.iter() {
        if let Ok(track) = t.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// One-shot transcription through `SpeechRecognition` or its webkit-prefixed twin.
pub struct BrowserSpeech {
    pub lang: String,
}

impl BrowserSpeech {
    fn constructor() -> Option<Function> {
        let window: JsValue = web::window()?.into();
        js_get(&window, "SpeechRecognition")
            .or_else(|| js_get(&window, "webkitSpeechRecognition"))
            .and_then(|c| c.dyn_into::<Function>().ok())
    }

    pub fn is_supported() -> bool {
        Self::constructor().is_some()
    }
}

#[async_trait(?Send)]
impl SpeechCapability for BrowserSpeech {
    async fn transcribe_speech(&self) -> Result<String, CapabilityError> {
        let ctor = Self::constructor().ok_or(CapabilityError::Unsupported)?;
        let recognizer = Reflect::construct(&ctor, &js_sys::Array::new())
            .map_err(|e| CapabilityError::Failed(format!("{e:?}")))?;
        let _ = Reflect::set(&recognizer, &"lang".into(), &self.lang.as_str().into());
        let _ = Reflect::set(&recognizer, &"interimResults".into(), &JsValue::FALSE);
        let _ = Reflect::set(&recognizer, &"maxAlternatives".into(), &JsValue::from(1));

        let (tx, rx) = oneshot::channel::<Result<String, CapabilityError>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let tx_result = tx.clone();
        let on_result = Closure::wrap(Box::new(move |ev: JsValue| {
            let transcript = js_get(&ev, "results")
                .and_then(|r| Reflect::get_u32(&r, 0).ok())
                .and_then(|alt| Reflect::get_u32(&alt, 0).ok())
                .and_then(|best| js_get(&best, "transcript"))
                .and_then(|t| t.as_string())
                .unwrap_or_default();
            if let Some(tx) = tx_result.borrow_mut().take() {
                let _ = tx.send(Ok(transcript));
            }
        }) as Box<dyn FnMut(JsValue)>);

        let tx_error = tx.clone();
        let on_error = Closure::wrap(Box::new(move |ev: JsValue| {
            let code = js_get(&ev, "error").and_then(|v| v.as_string()).unwrap_or_default();
            let err = match code.as_str() {
                "not-allowed" | "service-not-allowed" => CapabilityError::Denied,
                "audio-capture" => CapabilityError::Unsupported,
                other => CapabilityError::Failed(format!("speech error: {other}")),
            };
            if let Some(tx) = tx_error.borrow_mut().take() {
                let _ = tx.send(Err(err));
            }
        }) as Box<dyn FnMut(JsValue)>);

        let tx_end = tx.clone();
        let on_end = Closure::wrap(Box::new(move |_ev: JsValue| {
            if let Some(tx) = tx_end.borrow_mut().take() {
                let _ = tx.send(Ok(String::new()));
            }
        }) as Box<dyn FnMut(JsValue)>);

        let _ = Reflect::set(&recognizer, &"onresult".into(), on_result.as_ref());
        let _ = Reflect::set(&recognizer, &"onerror".into(), on_error.as_ref());
        let _ = Reflect::set(&recognizer, &"onend".into(), on_end.as_ref());

        let start = js_get(&recognizer, "start")
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(CapabilityError::Unsupported)?;
        start.call0(&recognizer).map_err(|e| classify_error(&e))?;

        let outcome = rx
            .await
            .unwrap_or_else(|_| Err(CapabilityError::Failed("recognizer dropped".into())));

        // detach handlers before the closures are dropped
        for key in ["onresult", "onerror", "onend"] {
            let _ = Reflect::set(&recognizer, &key.into(), &JsValue::NULL);
        }
        drop((on_result, on_error, on_end));

        let text = outcome?;
        if text.trim().is_empty() {
            return Err(CapabilityError::Failed("no speech detected".into()));
        }
        Ok(text)
    }
}
