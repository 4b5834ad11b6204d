use leptos::prelude::*;
use wasm_bindgen::JsCast;
use music_ai_core::i18n::Lang;

use crate::i18n::use_i18n;

#[component]
pub fn LanguageSwitcher() -> impl IntoView {
    let i18n = use_i18n();

    let on_change = move |ev: web_sys::Event| {
        let Some(select) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok()) else {
            return;
        };
        match Lang::from_tag(&select.value()) {
            Some(lang) => i18n.set_lang(lang),
            None => log::warn!("Unknown language tag {:?}", select.value()),
        }
    };

    view! {
        <select
            class="language-switcher"
            aria-label=move || i18n.t("app.language")
            prop:value=move || i18n.lang().tag()
            on:change=on_change
        >
            {Lang::ALL.into_iter().map(|lang| view! {
                <option value=lang.tag() selected=move || i18n.lang() == lang>{lang.native_name()}</option>
            }).collect_view()}
        </select>
    }
}
