use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, File, HtmlInputElement};
use music_ai_core::api::ProgressObserver;
use music_ai_core::config::COMPUTE_DEVICE;
use music_ai_core::i18n::Message;
use music_ai_core::upload::{
    accept_attribute, progress_message_key, validate_file, SelectedFile, UploadPhase, MAX_FILE_SIZE_MB,
};

use crate::api_client;
use crate::i18n::use_i18n;
use crate::media::probe_duration;
use crate::state::AppState;

const FILE_INPUT_ID: &str = "audio-file-input";

/// Feeds upload progress into the widget's phase. Stops once the widget is gone.
struct PhaseProgress(RwSignal<UploadPhase>);

impl ProgressObserver for PhaseProgress {
    fn on_progress(&self, percent: u8) {
        self.0.try_update(|p| p.set_progress(percent));
    }

    fn is_cancelled(&self) -> bool {
        self.0.is_disposed()
    }
}

#[component]
pub fn AudioUpload() -> impl IntoView {
    let state = expect_context::<AppState>();
    let i18n = use_i18n();
    let phase = RwSignal::new(UploadPhase::Idle);
    let chosen_file: StoredValue<Option<File>, LocalStorage> = StoredValue::new_local(None);
    let drag_over = RwSignal::new(false);
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let clear_input = move || {
        if let Some(input) = file_input_ref.get_untracked() {
            let el: &HtmlInputElement = input.as_ref();
            el.set_value("");
        }
    };

    // Validation runs before the duration probe and before any request.
    let accept_file = move |file: File| {
        let name = file.name();
        let size_bytes = file.size().max(0.0) as u64;
        if let Err(err) = validate_file(&name, size_bytes) {
            log::warn!("Rejected {name}: {err}");
            state.fail(&err);
            clear_input();
            return;
        }
        spawn_local(async move {
            let duration = probe_duration(&file).await;
            log::info!("Selected {name} ({size_bytes} bytes, {duration:?})");
            let selected = SelectedFile { name, size_bytes, duration };
            if phase.try_update(|p| p.choose(selected)) == Some(true) {
                chosen_file.try_update_value(|f| *f = Some(file));
            }
        });
    };

    let on_file_change = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|list| list.get(0)) else { return };
        accept_file(file);
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        drag_over.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        if phase.with_untracked(UploadPhase::is_uploading) {
            return;
        }
        let Some(file_list) = ev.data_transfer().and_then(|dt| dt.files()) else { return };
        let Some(file) = file_list.get(0) else { return };
        accept_file(file);
    };

    let on_analyze = move |_: web_sys::MouseEvent| {
        let Some(file) = chosen_file.get_value() else { return };
        if !phase.try_update(|p| p.begin()).unwrap_or(false) {
            return;
        }
        state.processing_started();

        let config = state.config();
        spawn_local(async move {
            let started = js_sys::Date::now();
            let outcome =
                api_client::submit_for_analysis(&config, &file, COMPUTE_DEVICE, PhaseProgress(phase)).await;
            let elapsed = (js_sys::Date::now() - started) / 1000.0;
            match outcome {
                Ok(result) => {
                    log::info!("Analysis of {} finished in {elapsed:.1}s", result.metadata.filename);
                    phase.try_update(|p| p.succeed());
                    chosen_file.try_update_value(|f| *f = None);
                    if let Some(orphan) = state.complete(result) {
                        log::warn!("App closed before session {} arrived", orphan.session_id);
                        if !orphan.session_id.is_empty() {
                            api_client::release_session(&config, &orphan.session_id).await;
                        }
                    }
                }
                Err(err) => {
                    match err.status() {
                        Some(status) => log::error!("Analysis failed after {elapsed:.1}s (HTTP {status}): {err}"),
                        None => log::error!("Analysis failed after {elapsed:.1}s: {err}"),
                    }
                    phase.try_update(|p| p.fail());
                    let message = err.to_string();
                    if message.trim().is_empty() {
                        state.fail(Message::localized("error.uploadFailed"));
                    } else {
                        state.fail(message);
                    }
                }
            }
        });
    };

    let on_cancel = move |_: web_sys::MouseEvent| {
        if phase.try_update(|p| p.reset()).unwrap_or(false) {
            chosen_file.set_value(None);
            clear_input();
        }
    };

    let is_uploading = move || phase.with(UploadPhase::is_uploading);
    // Progress events only touch `progress`; the file details stay mounted.
    let selected = Memo::new(move |_| phase.with(|p| p.selected().cloned()));
    let progress = Memo::new(move |_| phase.with(UploadPhase::progress));
    let max_size = MAX_FILE_SIZE_MB.to_string();

    view! {
        <div class="audio-upload">
            <div class="upload-card">
                <input
                    node_ref=file_input_ref
                    id=FILE_INPUT_ID
                    type="file"
                    accept=accept_attribute()
                    style="display:none"
                    prop:disabled=is_uploading
                    on:change=on_file_change
                />
                {move || match selected.get() {
                    None => {
                        let max_size = max_size.clone();
                        view! {
                            <div class="file-picker">
                                <label
                                    for=FILE_INPUT_ID
                                    class=move || if drag_over.get() { "file-picker-label drag-over" } else { "file-picker-label" }
                                    on:dragover=on_dragover
                                    on:dragleave=on_dragleave
                                    on:drop=on_drop
                                >
                                    <div class="file-picker-icon">"\u{1F3B5}"</div>
                                    <p class="file-picker-text">{move || i18n.t("upload.click")}</p>
                                    <p class="file-picker-hint">{move || i18n.t("upload.drop")}</p>
                                    <p class="file-picker-hint">
                                        {move || i18n.t_with("upload.hint", &[("size", max_size.as_str())])}
                                    </p>
                                </label>
                            </div>
                        }.into_any()
                    }
                    Some(file) => view! {
                        <FileInfo file=file progress=progress on_analyze=on_analyze on_cancel=on_cancel />
                    }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn FileInfo(
    file: SelectedFile,
    progress: Memo<Option<u8>>,
    on_analyze: impl Fn(web_sys::MouseEvent) + Send + 'static,
    on_cancel: impl Fn(web_sys::MouseEvent) + Send + 'static,
) -> impl IntoView {
    let i18n = use_i18n();
    let uploading = move || progress.with(Option::is_some);
    let duration = file.duration.display();
    let size = file.size_label();

    view! {
        <div class="file-info">
            <h3>{move || i18n.t("upload.selected")}</h3>
            <div class="metadata-grid">
                <div class="metadata-item">
                    <span class="label">{move || i18n.t("upload.name")}</span>
                    <span class="value">{file.name.clone()}</span>
                </div>
                <div class="metadata-item">
                    <span class="label">{move || i18n.t("upload.size")}</span>
                    <span class="value">{size}</span>
                </div>
                <div class="metadata-item">
                    <span class="label">{move || i18n.t("upload.duration")}</span>
                    <span class="value">
                        {move || duration.clone().unwrap_or_else(|| i18n.t("upload.unknown"))}
                    </span>
                </div>
            </div>

            <Show when=uploading>
                <div class="progress-section">
                    <div class="progress-bar">
                        <div class="progress-fill" style:width=move || format!("{}%", progress.get().unwrap_or(0))></div>
                    </div>
                    <p class="progress-text">
                        {move || {
                            let pct = progress.get().unwrap_or(0);
                            i18n.t_with(progress_message_key(pct), &[("percent", pct.to_string().as_str())])
                        }}
                    </p>
                </div>
            </Show>

            <div class="action-buttons">
                <button class="btn-primary" on:click=on_analyze disabled=uploading>
                    {move || if uploading() { i18n.t("upload.processing") } else { i18n.t("upload.analyze") }}
                </button>
                <button class="btn-secondary" on:click=on_cancel disabled=uploading>
                    {move || i18n.t("upload.cancel")}
                </button>
            </div>
        </div>
    }
}
