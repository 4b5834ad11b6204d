//! Browser transport for the analysis service.
//!
//! Uploads go through `XMLHttpRequest` because `fetch` cannot report upload
//! progress. The small JSON calls use `fetch`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, ProgressEvent, RequestInit, XmlHttpRequest};

use music_ai_core::api::{self, ProgressObserver};
use music_ai_core::config::{ServiceConfig, UPLOAD_TIMEOUT_MS};
use music_ai_core::error::{AnalysisError, CleanupFailure};
use music_ai_core::types::{AnalysisResult, ComputeDevice, HealthStatus};

use crate::js_bridge::FirstEvent;

const SETTLE_EVENTS: &[&str] = &["load", "error", "timeout", "abort"];

fn transport(e: JsValue) -> AnalysisError {
    AnalysisError::Transport(format!("{e:?}"))
}

/// Upload `file` for analysis and wait for the result.
///
/// Progress is reported to `observer` as bytes leave the browser; once the
/// upload reaches 100 % the request keeps waiting while the server runs
/// inference, for up to [`UPLOAD_TIMEOUT_MS`].
pub async fn submit_for_analysis(
    config: &ServiceConfig,
    file: &File,
    device: ComputeDevice,
    observer: impl ProgressObserver + 'static,
) -> Result<AnalysisResult, AnalysisError> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(transport)?;

    let xhr = XmlHttpRequest::new().map_err(transport)?;
    xhr.open("POST", &config.upload_url(device)).map_err(transport)?;
    xhr.set_timeout(UPLOAD_TIMEOUT_MS);

    let upload = xhr.upload().map_err(transport)?;
    let on_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
        if observer.is_cancelled() || !ev.length_computable() {
            return;
        }
        if let Some(percent) = api::progress_percent(ev.loaded(), ev.total()) {
            observer.on_progress(percent);
        }
    });
    upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));

    let settled = FirstEvent::listen(&xhr, SETTLE_EVENTS).map_err(AnalysisError::Transport)?;
    xhr.send_with_opt_form_data(Some(&form)).map_err(transport)?;
    let outcome = settled.wait().await.map_err(AnalysisError::Transport);

    upload.set_onprogress(None);
    drop(on_progress);

    match outcome?.as_str() {
        "load" => {
            let status = xhr.status().map_err(transport)?;
            let body = xhr.response_text().map_err(transport)?.unwrap_or_default();
            if api::is_success(status) {
                api::parse_analysis(&body)
            } else {
                Err(api::error_from_response(status, &body))
            }
        }
        "timeout" => Err(AnalysisError::Transport(format!(
            "timeout of {UPLOAD_TIMEOUT_MS}ms exceeded"
        ))),
        "abort" => Err(AnalysisError::Transport("Request aborted".into())),
        _ => Err(AnalysisError::Transport("Network Error".into())),
    }
}

/// Ask the service to drop a session's temporary files.
///
/// Never fails from the caller's point of view; problems are logged.
pub async fn release_session(config: &ServiceConfig, session_id: &str) {
    match try_release(config, session_id).await {
        Ok(()) => log::debug!("Session {session_id} released"),
        Err(reason) => {
            let failure = CleanupFailure {
                session_id: session_id.to_string(),
                reason,
            };
            log::warn!("{failure}");
        }
    }
}

async fn try_release(config: &ServiceConfig, session_id: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let opts = RequestInit::new();
    opts.set_method("DELETE");
    // Survives page unload, which is when the last session is usually released.
    // web-sys has no binding for `keepalive`; set the JS property directly.
    let _ = js_sys::Reflect::set(&opts, &"keepalive".into(), &true.into());
    let encoded_id = String::from(js_sys::encode_uri_component(session_id));
    let resp = fetch(&window, &config.session_url(&encoded_id), &opts).await?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    Ok(())
}

/// Single liveness check, no retries.
pub async fn probe_health(config: &ServiceConfig) -> Result<HealthStatus, AnalysisError> {
    let window = web_sys::window().ok_or_else(|| AnalysisError::Transport("No window".into()))?;
    let opts = RequestInit::new();
    opts.set_method("GET");
    let resp = fetch(&window, &config.health_url(), &opts)
        .await
        .map_err(AnalysisError::Transport)?;
    let body = response_text(&resp).await.map_err(AnalysisError::Transport)?;
    if !resp.ok() {
        return Err(api::error_from_response(resp.status(), &body));
    }
    api::parse_health(&body)
}

async fn fetch(window: &web_sys::Window, url: &str, opts: &RequestInit) -> Result<web_sys::Response, String> {
    let resp_value = JsFuture::from(window.fetch_with_str_and_init(url, opts))
        .await
        .map_err(|e| format!("fetch error: {e:?}"))?;
    resp_value
        .dyn_into()
        .map_err(|_| "Response cast failed".to_string())
}

async fn response_text(resp: &web_sys::Response) -> Result<String, String> {
    let text = JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("text: {e:?}"))?;
    text.as_string().ok_or("Not a string".to_string())
}
