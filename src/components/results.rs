use std::sync::Arc;

use leptos::prelude::*;
use music_ai_core::summary::{raw_json, ResultSummary};
use music_ai_core::types::AnalysisResult;

use crate::components::chord_timeline::ChordTimeline;
use crate::components::stem_player::StemPlayer;
use crate::components::waveform::WaveformCanvas;
use crate::i18n::use_i18n;
use crate::state::AppState;

#[component]
pub fn Results(result: Arc<AnalysisResult>) -> impl IntoView {
    let state = expect_context::<AppState>();
    let i18n = use_i18n();
    let summary = ResultSummary::new(&result);
    let raw = raw_json(&result);

    let rows = [
        ("summary.file", summary.filename),
        ("summary.duration", summary.duration),
        ("summary.key", summary.key),
        ("summary.tempo", summary.tempo),
        ("summary.processing", summary.processing_time),
    ];

    view! {
        <div class="results-section">
            <div class="results-header">
                <h2>{move || i18n.t("results.title")}</h2>
                <button class="btn-new-analysis" on:click=move |_| state.reset()>
                    {move || i18n.t("results.new")}
                </button>
            </div>

            <div class="results-summary">
                {rows.into_iter().map(|(label_key, value)| view! {
                    <div class="summary-item">
                        <span class="summary-label">{move || i18n.t(label_key)}</span>
                        <span class="summary-value">{value}</span>
                    </div>
                }).collect_view()}
            </div>

            <section class="result-block">
                <h3>{move || i18n.t("section.waveform")}</h3>
                <WaveformCanvas result=result.clone() />
            </section>
            <section class="result-block">
                <h3>{move || i18n.t("section.chords")}</h3>
                <ChordTimeline result=result.clone() />
            </section>
            <section class="result-block">
                <h3>{move || i18n.t("section.stems")}</h3>
                <StemPlayer result=result.clone() />
            </section>

            <details class="raw-data">
                <summary>{move || i18n.t("json.viewRaw")}</summary>
                <pre>{raw}</pre>
            </details>
        </div>
    }
}
