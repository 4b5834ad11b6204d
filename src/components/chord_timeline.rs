use std::sync::Arc;

use leptos::prelude::*;
use music_ai_core::chords::{layout, timeline_duration};
use music_ai_core::summary::format_seconds;
use music_ai_core::types::AnalysisResult;

use crate::i18n::use_i18n;

/// Chords as adjacent blocks sized by how long each one sounds.
#[component]
pub fn ChordTimeline(result: Arc<AnalysisResult>) -> impl IntoView {
    let i18n = use_i18n();
    let duration = result.metadata.duration_seconds;
    let end_label = format_seconds(timeline_duration(duration));

    let blocks = move || {
        layout(&result.chords, duration, i18n.lang().note_naming())
            .into_iter()
            .map(|block| {
                let tooltip = block.tooltip();
                view! {
                    <div class="chord-block" title=tooltip style:width=format!("{}%", block.width_pct)>
                        {block.label}
                        <span class="chord-confidence">{format!("{}%", block.confidence_pct)}</span>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="chord-timeline">
            <div class="chord-track">{blocks}</div>
            <div class="chord-axis">
                <span>"0s"</span>
                <span>{end_label}</span>
            </div>
        </div>
    }
}
