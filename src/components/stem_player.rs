use std::sync::Arc;

use leptos::prelude::*;
use music_ai_core::stems::{resolve_all, PageUrlResolver};
use music_ai_core::types::AnalysisResult;

use crate::i18n::use_i18n;
use crate::state::AppState;

/// Resolves relative references against `window.location.origin`.
struct PageOrigin;

impl PageUrlResolver for PageOrigin {
    fn resolve(&self, reference: &str) -> Option<String> {
        let origin = web_sys::window()?.location().origin().ok()?;
        web_sys::Url::new_with_base(reference, &origin)
            .ok()
            .map(|url| url.href())
    }
}

/// One player per stem. Stems are independent; nothing keeps them in sync.
#[component]
pub fn StemPlayer(result: Arc<AnalysisResult>) -> impl IntoView {
    let i18n = use_i18n();
    let state = expect_context::<AppState>();
    let config = state.config();
    let stems = resolve_all(&result.stems, config.base_url(), &PageOrigin);

    view! {
        <div class="stem-player">
            {stems.into_iter().map(|(kind, source)| {
                let (control, hint) = match source.url() {
                    Some(url) => (
                        view! {
                            <audio class="stem-audio" controls=true preload="metadata" src=url.to_string()></audio>
                        }.into_any(),
                        None,
                    ),
                    None => (
                        view! {
                            <span class="stem-unavailable">{move || i18n.t("stems.unavailable")}</span>
                        }.into_any(),
                        Some(view! {
                            <div class="stem-hint">{move || i18n.t("stems.unavailableHint")}</div>
                        }),
                    ),
                };
                view! {
                    <div class="stem-row" data-stem=kind.as_str()>
                        <div class="stem-row-header">
                            <strong>{move || i18n.t(kind.label_key())}</strong>
                            {control}
                        </div>
                        {hint}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
