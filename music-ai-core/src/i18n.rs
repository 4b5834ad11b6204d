//! Message tables and language preference.
//!
//! Lookup never fails: a key missing from the active table comes back
//! unchanged, so a forgotten entry shows up as its key instead of a blank.

use crate::error::ValidationError;

/// Storage key under which the chosen language tag is kept.
pub const LANG_STORAGE_KEY: &str = "lang";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Lang {
    #[default]
    En,
    Fr,
}

/// How note names are written in chord labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteNaming {
    /// C D E F G A B
    Letters,
    /// Do Ré Mi Fa Sol La Si
    Solfege,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Fr];

    pub fn tag(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fr => "fr",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Lang> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Lang::En),
            "fr" => Some(Lang::Fr),
            _ => None,
        }
    }

    /// Name of the language in itself, for the selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Lang::En => "English",
            Lang::Fr => "Français",
        }
    }

    pub fn note_naming(self) -> NoteNaming {
        match self {
            Lang::En => NoteNaming::Letters,
            Lang::Fr => NoteNaming::Solfege,
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Lang::En => EN,
            Lang::Fr => FR,
        }
    }
}

/// Durable key/value storage for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Stored language, or English when nothing usable is stored.
pub fn load_lang(store: &impl PreferenceStore) -> Lang {
    store
        .get(LANG_STORAGE_KEY)
        .and_then(|tag| Lang::from_tag(&tag))
        .unwrap_or_default()
}

pub fn save_lang(store: &impl PreferenceStore, lang: Lang) {
    store.set(LANG_STORAGE_KEY, lang.tag());
}

pub fn translate(lang: Lang, key: &str) -> String {
    lookup(lang, key).unwrap_or(key).to_string()
}

/// Translate and substitute each `{name}` placeholder with its value.
pub fn translate_with(lang: Lang, key: &str, vars: &[(&str, &str)]) -> String {
    let mut text = translate(lang, key);
    for (name, value) in vars {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    lang.table().iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

const EN: &[(&str, &str)] = &[
    ("app.title", "Music AI Analysis"),
    ("app.subtitle", "Upload audio to extract stems, chords, key, and tempo"),
    ("app.language", "Language"),
    ("health.ok", "Service online"),
    ("health.down", "Service unreachable"),
    ("health.checking", "Checking service..."),
    ("error.title", "Error"),
    ("error.dismiss", "Dismiss"),
    ("error.invalidFormat", "Invalid format \".{ext}\". Allowed: {allowed}"),
    ("error.tooLarge", "File too large. Max {size}MB."),
    ("error.uploadFailed", "Upload failed"),
    ("processing.title", "Processing audio with ML models..."),
    ("processing.hint", "This may take a minute depending on hardware"),
    ("results.title", "Analysis Complete"),
    ("results.new", "New Analysis"),
    ("summary.file", "File:"),
    ("summary.duration", "Duration:"),
    ("summary.key", "Key:"),
    ("summary.tempo", "Tempo:"),
    ("summary.processing", "Processing Time:"),
    ("section.waveform", "Waveform"),
    ("section.chords", "Chords"),
    ("section.stems", "Stems"),
    ("waveform.info", "{channels} ch • {rate} Hz • {points} pts"),
    ("stems.vocals", "Vocals"),
    ("stems.drums", "Drums"),
    ("stems.bass", "Bass"),
    ("stems.other", "Other"),
    ("stems.unavailable", "Not available"),
    ("stems.unavailableHint", "Stem URL unavailable"),
    ("json.viewRaw", "View Raw JSON"),
    ("upload.click", "Click to select audio file"),
    ("upload.drop", "or drop it here"),
    ("upload.hint", "Supported: MP3, WAV, M4A (max {size}MB)"),
    ("upload.selected", "Selected File"),
    ("upload.name", "Name:"),
    ("upload.size", "Size:"),
    ("upload.duration", "Duration:"),
    ("upload.unknown", "Unknown"),
    ("upload.analyze", "Analyze Audio"),
    ("upload.cancel", "Cancel"),
    ("upload.uploading", "Uploading... {percent}%"),
    ("upload.processing", "Processing audio..."),
];

const FR: &[(&str, &str)] = &[
    ("app.title", "Analyse IA de Musique"),
    ("app.subtitle", "Téléversez un audio pour extraire les stems, accords, tonalité et tempo"),
    ("app.language", "Langue"),
    ("health.ok", "Service en ligne"),
    ("health.down", "Service injoignable"),
    ("health.checking", "Vérification du service..."),
    ("error.title", "Erreur"),
    ("error.dismiss", "Fermer"),
    ("error.invalidFormat", "Format « .{ext} » invalide. Autorisés : {allowed}"),
    ("error.tooLarge", "Fichier trop volumineux. Max {size}Mo."),
    ("error.uploadFailed", "Échec du téléversement"),
    ("processing.title", "Traitement de l'audio avec des modèles ML..."),
    ("processing.hint", "Cela peut prendre une minute selon le matériel"),
    ("results.title", "Analyse terminée"),
    ("results.new", "Nouvelle analyse"),
    ("summary.file", "Fichier :"),
    ("summary.duration", "Durée :"),
    ("summary.key", "Tonalité :"),
    ("summary.tempo", "Tempo :"),
    ("summary.processing", "Temps de traitement :"),
    ("section.waveform", "Forme d’onde"),
    ("section.chords", "Accords"),
    ("section.stems", "Stems"),
    ("waveform.info", "{channels} canaux • {rate} Hz • {points} points"),
    ("stems.vocals", "Voix"),
    ("stems.drums", "Batterie"),
    ("stems.bass", "Basse"),
    ("stems.other", "Autres"),
    ("stems.unavailable", "Non disponible"),
    ("stems.unavailableHint", "URL du stem indisponible"),
    ("json.viewRaw", "Voir JSON brut"),
    ("upload.click", "Cliquez pour sélectionner un fichier audio"),
    ("upload.drop", "ou déposez-le ici"),
    ("upload.hint", "Pris en charge : MP3, WAV, M4A (max {size}Mo)"),
    ("upload.selected", "Fichier sélectionné"),
    ("upload.name", "Nom :"),
    ("upload.size", "Taille :"),
    ("upload.duration", "Durée :"),
    ("upload.unknown", "Inconnue"),
    ("upload.analyze", "Analyser"),
    ("upload.cancel", "Annuler"),
    ("upload.uploading", "Téléversement... {percent}%"),
    ("upload.processing", "Traitement de l’audio..."),
];

/// Text shown to the user. Local messages keep their key and are rendered in
/// whatever language is active when shown; server and transport text is
/// shown as received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Text(String),
    Localized {
        key: &'static str,
        vars: Vec<(&'static str, String)>,
    },
}

impl Message {
    pub fn localized(key: &'static str) -> Self {
        Self::Localized { key, vars: Vec::new() }
    }

    pub fn render(&self, lang: Lang) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Localized { key, vars } => {
                let vars: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
                translate_with(lang, key, &vars)
            }
        }
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<&ValidationError> for Message {
    fn from(err: &ValidationError) -> Self {
        let (key, vars) = err.message_key();
        Self::Localized { key, vars }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl PreferenceStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    #[test]
    fn test_validation_message_follows_language() {
        let err = ValidationError::UnsupportedFormat { extension: "flac".into() };
        let msg = Message::from(&err);
        assert_eq!(msg.render(Lang::En), "Invalid format \".flac\". Allowed: .mp3, .wav, .m4a");
        assert_eq!(msg.render(Lang::Fr), "Format « .flac » invalide. Autorisés : .mp3, .wav, .m4a");
    }

    #[test]
    fn test_server_text_is_not_translated() {
        let msg = Message::from("Unsupported codec");
        assert_eq!(msg.render(Lang::En), "Unsupported codec");
        assert_eq!(msg.render(Lang::Fr), "Unsupported codec");
        assert_eq!(Message::localized("error.uploadFailed").render(Lang::Fr), "Échec du téléversement");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        assert_eq!(translate(Lang::En, "no.such.key"), "no.such.key");
        assert_eq!(translate(Lang::Fr, "no.such.key"), "no.such.key");
        assert_eq!(translate_with(Lang::En, "no.such.key", &[("x", "1")]), "no.such.key");
    }

    #[test]
    fn test_placeholder_substitution() {
        assert_eq!(
            translate_with(Lang::En, "upload.uploading", &[("percent", "42")]),
            "Uploading... 42%"
        );
        assert_eq!(
            translate_with(Lang::Fr, "upload.hint", &[("size", "100")]),
            "Pris en charge : MP3, WAV, M4A (max 100Mo)"
        );
    }

    #[test]
    fn test_missing_var_leaves_placeholder() {
        assert_eq!(translate(Lang::En, "upload.uploading"), "Uploading... {percent}%");
    }

    #[test]
    fn test_tables_have_same_keys() {
        for (key, _) in EN {
            assert!(lookup(Lang::Fr, key).is_some(), "missing French entry for {key}");
        }
        for (key, _) in FR {
            assert!(lookup(Lang::En, key).is_some(), "missing English entry for {key}");
        }
    }

    #[test]
    fn test_lang_tags_round_trip() {
        for lang in Lang::ALL {
            assert_eq!(Lang::from_tag(lang.tag()), Some(lang));
        }
        assert_eq!(Lang::from_tag("FR"), Some(Lang::Fr));
        assert_eq!(Lang::from_tag("de"), None);
    }

    #[test]
    fn test_preference_store_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(load_lang(&store), Lang::En);
        save_lang(&store, Lang::Fr);
        assert_eq!(store.get(LANG_STORAGE_KEY).as_deref(), Some("fr"));
        assert_eq!(load_lang(&store), Lang::Fr);
    }

    #[test]
    fn test_garbage_preference_falls_back_to_english() {
        let store = MemoryStore::default();
        store.set(LANG_STORAGE_KEY, "klingon");
        assert_eq!(load_lang(&store), Lang::En);
    }
}
