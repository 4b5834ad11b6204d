use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use music_ai_core::config::ServiceConfig;
use music_ai_core::session::RootState;

use crate::api_client;
use crate::components::audio_upload::AudioUpload;
use crate::components::language_switcher::LanguageSwitcher;
use crate::components::results::Results;
use crate::i18n::{use_i18n, I18n};
use crate::state::{AppState, ServiceHealth};

#[component]
pub fn App() -> impl IntoView {
    let config = ServiceConfig::from_env();
    log::info!("Analysis service: {}", config.base_url());

    provide_context(I18n::new());
    let state = AppState::new(config);
    provide_context(state);

    on_cleanup(move || state.unmount());
    release_on_pagehide(state);
    check_health(state);

    view! {
        <div class="app">
            <Header />
            <MainArea />
        </div>
    }
}

/// Closing or navigating away never runs component cleanup, so release the
/// held session when the page is hidden for good.
fn release_on_pagehide(state: AppState) {
    let Some(window) = web_sys::window() else { return };
    let on_pagehide = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        state.unmount();
    });
    let _ = window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref());
    on_pagehide.forget();
}

fn check_health(state: AppState) {
    let config = state.config();
    spawn_local(async move {
        let health = match api_client::probe_health(&config).await {
            Ok(status) => {
                log::info!("Service health: {}", status.status);
                ServiceHealth::Online
            }
            Err(e) => {
                log::warn!("Health probe failed: {e}");
                ServiceHealth::Unreachable
            }
        };
        state.health.try_set(health);
    });
}

#[component]
fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();
    let i18n = use_i18n();

    let badge_class = move || match state.health.get() {
        ServiceHealth::Checking => "health-badge checking",
        ServiceHealth::Online => "health-badge online",
        ServiceHealth::Unreachable => "health-badge down",
    };
    let badge_text = move || match state.health.get() {
        ServiceHealth::Checking => i18n.t("health.checking"),
        ServiceHealth::Online => i18n.t("health.ok"),
        ServiceHealth::Unreachable => i18n.t("health.down"),
    };

    view! {
        <header class="app-header">
            <div class="app-header-row">
                <div>
                    <h1>{move || i18n.t("app.title")}</h1>
                    <p>{move || i18n.t("app.subtitle")}</p>
                </div>
                <div class="app-header-controls">
                    <span class=badge_class>{badge_text}</span>
                    <LanguageSwitcher />
                </div>
            </div>
        </header>
    }
}

#[component]
fn MainArea() -> impl IntoView {
    let state = expect_context::<AppState>();
    let i18n = use_i18n();

    let error = move || state.root.with(|r| r.error().cloned());
    let is_busy = move || state.root.with(RootState::is_busy);
    let shows_upload = move || state.root.with(RootState::shows_upload);

    view! {
        <main class="app-main">
            {move || error().map(|msg| view! {
                <div class="error-section">
                    <p><strong>{move || i18n.t("error.title")}":"</strong>" "{move || i18n.t_message(&msg)}</p>
                    <button class="btn-dismiss" on:click=move |_| state.dismiss_error()>
                        {move || i18n.t("error.dismiss")}
                    </button>
                </div>
            })}

            <Show when=shows_upload>
                <div class="upload-section">
                    <AudioUpload />
                </div>
            </Show>

            <Show when=is_busy>
                <div class="processing-section">
                    <div class="spinner"></div>
                    <p>{move || i18n.t("processing.title")}</p>
                    <p class="processing-hint">{move || i18n.t("processing.hint")}</p>
                </div>
            </Show>

            {move || state.root.with(|r| r.result().cloned()).map(|result| view! {
                <Results result=result />
            })}
        </main>
    }
}
