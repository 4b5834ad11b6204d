use serde::{Deserialize, Serialize};

/// One analysis returned by the service for a single upload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub session_id: String,
    pub metadata: AudioMetadata,
    pub waveform: WaveformData,
    pub key: String,
    pub key_confidence: f64,
    pub tempo_bpm: f64,
    #[serde(default)]
    pub beat_times: Vec<f64>,
    #[serde(default)]
    pub chords: Vec<ChordSegment>,
    #[serde(default)]
    pub stems: StemReferences,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadata {
    pub filename: String,
    pub duration_seconds: f64,
    pub processing_time_seconds: f64,
}

/// Downsampled per-channel amplitudes, normalized to [-1, 1].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveformData {
    pub sample_rate: u32,
    pub channels: u32,
    pub points: u32,
    pub waveform: Vec<Vec<f32>>,
}

/// A chord asserted from `time` until the next segment starts
/// (or until the end of the file for the last one).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChordSegment {
    pub time: f64,
    pub chord: String,
    pub confidence: f64,
}

/// Stem references as they appear on the wire. Renderers should go through
/// [`crate::stems::resolve_stem`] rather than reading the raw options.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StemReferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocals: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drums: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bass: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl StemReferences {
    pub fn raw(&self, kind: StemKind) -> Option<&str> {
        let value = match kind {
            StemKind::Vocals => &self.vocals,
            StemKind::Drums => &self.drums,
            StemKind::Bass => &self.bass,
            StemKind::Other => &self.other,
        };
        value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StemKind {
    Vocals,
    Drums,
    Bass,
    Other,
}

impl StemKind {
    pub const ALL: [StemKind; 4] = [Self::Vocals, Self::Drums, Self::Bass, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vocals => "vocals",
            Self::Drums => "drums",
            Self::Bass => "bass",
            Self::Other => "other",
        }
    }

    /// Localization key for the stem's display label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Vocals => "stems.vocals",
            Self::Drums => "stems.drums",
            Self::Bass => "stems.bass",
            Self::Other => "stems.other",
        }
    }
}

/// A stem reference after resolution: either a playable URL or nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StemSource {
    Present(String),
    Absent,
}

impl StemSource {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Present(url) => Some(url),
            Self::Absent => None,
        }
    }
}

/// Hardware backend the service should run inference on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ComputeDevice {
    #[default]
    Cpu,
    Cuda,
}

impl ComputeDevice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Cuda => "cuda",
        }
    }
}

/// Body of a non-2xx response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Canned service response shared by unit tests across the crate.
#[cfg(test)]
pub(crate) const SAMPLE_RESPONSE: &str = r#"{
    "session_id": "abc123",
    "metadata": {"filename": "song.mp3", "duration_seconds": 180.0, "processing_time_seconds": 12.34},
    "waveform": {"sample_rate": 44100, "channels": 2, "points": 4,
                 "waveform": [[0.0, 0.5, -0.5, 0.0], [0.1, -0.1, 0.2, -0.2]]},
    "key": "C",
    "key_confidence": 0.87,
    "tempo_bpm": 120.0,
    "beat_times": [0.5, 1.0, 1.5],
    "chords": [
        {"time": 0.0, "chord": "C", "confidence": 0.9},
        {"time": 40.0, "chord": "Am", "confidence": 0.8},
        {"time": 80.0, "chord": "F", "confidence": 0.75},
        {"time": 120.0, "chord": "G7", "confidence": 0.6},
        {"time": 150.0, "chord": "C#m7/G#", "confidence": 0.55}
    ],
    "stems": {"vocals": "/v1/audio/session/abc123/vocals.wav", "drums": null}
}"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert_eq!(result.session_id, "abc123");
        assert_eq!(result.waveform.channels, 2);
        assert_eq!(result.waveform.waveform.len(), 2);
        assert_eq!(result.chords.len(), 5);
        assert_eq!(result.beat_times.len(), 3);
        assert_eq!(result.key, "C");
    }

    #[test]
    fn test_missing_and_null_stems_are_absent() {
        let result: AnalysisResult = serde_json::from_str(SAMPLE_RESPONSE).unwrap();
        assert_eq!(
            result.stems.raw(StemKind::Vocals),
            Some("/v1/audio/session/abc123/vocals.wav")
        );
        assert_eq!(result.stems.raw(StemKind::Drums), None);
        assert_eq!(result.stems.raw(StemKind::Bass), None);
        assert_eq!(result.stems.raw(StemKind::Other), None);
    }

    #[test]
    fn test_blank_stem_reference_is_absent() {
        let stems = StemReferences {
            other: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(stems.raw(StemKind::Other), None);
    }

    #[test]
    fn test_optional_sequences_default_to_empty() {
        let json = r#"{
            "session_id": "s",
            "metadata": {"filename": "a.wav", "duration_seconds": 1.0, "processing_time_seconds": 0.1},
            "waveform": {"sample_rate": 8000, "channels": 1, "points": 0, "waveform": [[]]},
            "key": "A", "key_confidence": 0.5, "tempo_bpm": 90.0
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert!(result.chords.is_empty());
        assert!(result.beat_times.is_empty());
        assert_eq!(result.stems, StemReferences::default());
    }
}
