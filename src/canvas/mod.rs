pub mod colors;
pub mod waveform_renderer;
