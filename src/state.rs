use leptos::prelude::*;
use leptos::task::spawn_local;
use music_ai_core::config::ServiceConfig;
use music_ai_core::i18n::Message;
use music_ai_core::session::{Coordinator, RootState, SessionReleaser};
use music_ai_core::types::AnalysisResult;

use crate::api_client;

/// Releases sessions with a background DELETE; nobody waits for it.
#[derive(Clone, Debug)]
pub struct ServiceReleaser {
    config: ServiceConfig,
}

impl SessionReleaser for ServiceReleaser {
    fn release(&self, session_id: &str) {
        let config = self.config.clone();
        let session_id = session_id.to_string();
        spawn_local(async move {
            api_client::release_session(&config, &session_id).await;
        });
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceHealth {
    Checking,
    Online,
    Unreachable,
}

#[derive(Clone, Copy)]
pub struct AppState {
    config: StoredValue<ServiceConfig>,
    coordinator: RwSignal<Coordinator<ServiceReleaser>>,
    pub root: Memo<RootState>,
    pub health: RwSignal<ServiceHealth>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        let coordinator = RwSignal::new(Coordinator::new(ServiceReleaser {
            config: config.clone(),
        }));
        Self {
            config: StoredValue::new(config),
            coordinator,
            root: Memo::new(move |_| coordinator.with(|c| c.state().clone())),
            health: RwSignal::new(ServiceHealth::Checking),
        }
    }

    pub fn config(&self) -> ServiceConfig {
        self.config.get_value()
    }

    // Transitions use try_update so a late callback after teardown is a no-op.

    pub fn processing_started(&self) {
        self.coordinator.try_update(|c| c.processing_started());
    }

    /// Hands the result back when the app is already gone, so the caller can
    /// still release its session.
    pub fn complete(&self, result: AnalysisResult) -> Option<AnalysisResult> {
        let mut pending = Some(result);
        self.coordinator.try_update(|c| {
            if let Some(result) = pending.take() {
                c.completed(result);
            }
        });
        pending
    }

    pub fn fail(&self, message: impl Into<Message>) {
        let message = message.into();
        self.coordinator.try_update(|c| c.failed(message));
    }

    pub fn reset(&self) {
        self.coordinator.try_update(|c| c.reset());
    }

    pub fn dismiss_error(&self) {
        self.coordinator.try_update(|c| c.dismiss_error());
    }

    pub fn unmount(&self) {
        self.coordinator.try_update(|c| c.unmount());
    }
}
