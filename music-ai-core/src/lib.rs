pub mod types;
pub mod error;
pub mod config;
pub mod i18n;
pub mod api;
pub mod upload;
pub mod chords;
pub mod stems;
pub mod waveform;
pub mod session;
pub mod summary;
