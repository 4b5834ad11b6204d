use leptos::prelude::*;
use music_ai_core::i18n::{self as tables, Lang, Message, PreferenceStore};

/// `window.localStorage`. Unavailable storage (private mode, sandboxed
/// iframes) degrades to "nothing stored".
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn!("localStorage unavailable: {e:?}");
                None
            }
        }
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else { return };
        if let Err(e) = storage.set_item(key, value) {
            log::warn!("Failed to persist {key}: {e:?}");
        }
    }
}

/// Active language plus lookup, shared through context.
#[derive(Clone, Copy)]
pub struct I18n {
    lang: RwSignal<Lang>,
}

impl I18n {
    pub fn new() -> Self {
        let lang = tables::load_lang(&LocalStorageStore);
        log::debug!("Language: {}", lang.tag());
        Self { lang: RwSignal::new(lang) }
    }

    pub fn lang(&self) -> Lang {
        self.lang.get()
    }

    pub fn set_lang(&self, lang: Lang) {
        if self.lang.get_untracked() == lang {
            return;
        }
        tables::save_lang(&LocalStorageStore, lang);
        log::info!("Language switched to {}", lang.tag());
        self.lang.set(lang);
    }

    /// Reactive lookup: re-runs when the language changes.
    pub fn t(&self, key: &str) -> String {
        tables::translate(self.lang.get(), key)
    }

    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        tables::translate_with(self.lang.get(), key, vars)
    }

    /// Reactive rendering of a stored message.
    pub fn t_message(&self, message: &Message) -> String {
        message.render(self.lang.get())
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_i18n() -> I18n {
    expect_context::<I18n>()
}
