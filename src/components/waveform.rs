use std::sync::Arc;

use leptos::ev;
use leptos::prelude::*;
use music_ai_core::summary::waveform_info_vars;
use music_ai_core::types::AnalysisResult;
use web_sys::HtmlCanvasElement;

use crate::canvas::waveform_renderer;
use crate::i18n::use_i18n;

#[component]
pub fn WaveformCanvas(
    result: Arc<AnalysisResult>,
    #[prop(default = 160.0)] height: f64,
) -> impl IntoView {
    let i18n = use_i18n();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

    // Bumped on window resize so the backing store follows the layout width.
    let layout_tick = RwSignal::new(0u32);
    let resize = window_event_listener(ev::resize, move |_| {
        layout_tick.update(|t| *t = t.wrapping_add(1));
    });
    on_cleanup(move || resize.remove());

    let data = result.clone();
    Effect::new(move || {
        layout_tick.track();
        let Some(canvas_el) = canvas_ref.get() else { return };
        let canvas: &HtmlCanvasElement = canvas_el.as_ref();
        waveform_renderer::render(canvas, &data.waveform, height);
    });

    let info_vars = waveform_info_vars(&result.waveform);
    let info = move || {
        let vars: Vec<(&str, &str)> = info_vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
        i18n.t_with("waveform.info", &vars)
    };

    view! {
        <div class="waveform-container">
            <canvas node_ref=canvas_ref style:width="100%" style:height=format!("{height}px") />
            <div class="waveform-info">{info}</div>
        </div>
    }
}
