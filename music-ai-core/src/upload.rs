//! Local file checks and the upload widget's state machine.

use crate::error::ValidationError;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["mp3", "wav", "m4a"];
pub const MAX_FILE_SIZE_MB: u64 = 100;
pub const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

/// Value for the file input's `accept` attribute.
pub fn accept_attribute() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Allowed extensions for messages, e.g. `".mp3, .wav, .m4a"`.
pub fn allowed_list() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lowercased text after the last dot, or empty when there is none.
pub fn file_extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Extension first, then size. A file exactly at the ceiling is accepted.
pub fn validate_file(name: &str, size_bytes: u64) -> Result<(), ValidationError> {
    let extension = file_extension(name);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedFormat { extension });
    }
    if size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::TooLarge {
            size_bytes,
            limit_bytes: MAX_FILE_SIZE_BYTES,
        });
    }
    Ok(())
}

/// Size in MiB with two decimals, e.g. `"3.52 MB"`.
pub fn format_size_mb(size_bytes: u64) -> String {
    format!("{:.2} MB", size_bytes as f64 / (1024.0 * 1024.0))
}

/// Duration as read by the platform media decoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProbedDuration {
    Seconds(f64),
    Unknown,
}

impl ProbedDuration {
    pub fn from_seconds(secs: f64) -> Self {
        if secs.is_finite() && secs >= 0.0 {
            Self::Seconds(secs)
        } else {
            Self::Unknown
        }
    }

    /// `m:ss`, or `None` when the decoder could not tell.
    pub fn display(&self) -> Option<String> {
        match *self {
            Self::Seconds(secs) => {
                let total = secs.floor() as u64;
                Some(format!("{}:{:02}", total / 60, total % 60))
            }
            Self::Unknown => None,
        }
    }
}

/// A validated file plus the metadata shown before upload.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub duration: ProbedDuration,
}

impl SelectedFile {
    pub fn size_label(&self) -> String {
        format_size_mb(self.size_bytes)
    }
}

/// `Idle → FileChosen → Uploading → Idle | FileChosen`.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    FileChosen(SelectedFile),
    Uploading { file: SelectedFile, progress: u8 },
}

impl UploadPhase {
    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading { .. })
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        match self {
            Self::Idle => None,
            Self::FileChosen(file) | Self::Uploading { file, .. } => Some(file),
        }
    }

    pub fn progress(&self) -> Option<u8> {
        match self {
            Self::Uploading { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    /// Select a file. Refused while an upload is running.
    pub fn choose(&mut self, file: SelectedFile) -> bool {
        if self.is_uploading() {
            return false;
        }
        *self = Self::FileChosen(file);
        true
    }

    /// Start uploading the chosen file. Returns `false` unless a file is
    /// chosen and idle, so a second click cannot start a second upload.
    pub fn begin(&mut self) -> bool {
        match std::mem::take(self) {
            Self::FileChosen(file) => {
                *self = Self::Uploading { file, progress: 0 };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    pub fn set_progress(&mut self, percent: u8) {
        if let Self::Uploading { progress, .. } = self {
            *progress = percent.min(100);
        }
    }

    /// Hand-off done: back to an empty picker.
    pub fn succeed(&mut self) {
        if self.is_uploading() {
            *self = Self::Idle;
        }
    }

    /// Keep the file so the user can retry.
    pub fn fail(&mut self) {
        if let Self::Uploading { file, .. } = std::mem::take(self) {
            *self = Self::FileChosen(file);
        }
    }

    /// Clear the selection. Refused while uploading.
    pub fn reset(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        *self = Self::Idle;
        true
    }
}

/// Message key for the progress line: byte progress until everything is
/// sent, then a processing notice while the server works.
pub fn progress_message_key(percent: u8) -> &'static str {
    if percent < 100 {
        "upload.uploading"
    } else {
        "upload.processing"
    }
}
