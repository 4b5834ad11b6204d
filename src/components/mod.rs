pub mod app;
pub mod audio_upload;
pub mod chord_timeline;
pub mod language_switcher;
pub mod results;
pub mod stem_player;
pub mod waveform;
