use crate::types::{AnalysisResult, WaveformData};

/// Display strings for the results header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultSummary {
    pub filename: String,
    pub duration: String,
    pub key: String,
    pub tempo: String,
    pub processing_time: String,
}

impl ResultSummary {
    pub fn new(result: &AnalysisResult) -> Self {
        Self {
            filename: result.metadata.filename.clone(),
            duration: format_seconds(result.metadata.duration_seconds),
            key: result.key.clone(),
            tempo: format_tempo(result.tempo_bpm),
            processing_time: format_seconds(result.metadata.processing_time_seconds),
        }
    }
}

pub fn format_seconds(secs: f64) -> String {
    format!("{secs:.1}s")
}

pub fn format_tempo(bpm: f64) -> String {
    format!("{bpm:.1} BPM")
}

/// Values for the `waveform.info` message.
pub fn waveform_info_vars(data: &WaveformData) -> [(&'static str, String); 3] {
    [
        ("channels", data.channels.to_string()),
        ("rate", data.sample_rate.to_string()),
        ("points", data.points.to_string()),
    ]
}

/// Pretty-printed JSON for the raw data panel.
pub fn raw_json(result: &AnalysisResult) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chords::layout;
    use crate::i18n::{translate_with, Lang};
    use crate::types::SAMPLE_RESPONSE;

    fn sample() -> AnalysisResult {
        serde_json::from_str(SAMPLE_RESPONSE).unwrap()
    }

    #[test]
    fn test_summary_formatting() {
        let summary = ResultSummary::new(&sample());
        assert_eq!(summary.filename, "song.mp3");
        assert_eq!(summary.duration, "180.0s");
        assert_eq!(summary.key, "C");
        assert_eq!(summary.tempo, "120.0 BPM");
        assert_eq!(summary.processing_time, "12.3s");
    }

    #[test]
    fn test_three_minute_stereo_scenario() {
        let result = sample();
        assert_eq!(result.waveform.channels, 2);
        assert_eq!(result.chords.len(), 5);

        let summary = ResultSummary::new(&result);
        assert_eq!(summary.tempo, "120.0 BPM");
        assert_eq!(summary.duration, "180.0s");

        let duration = result.metadata.duration_seconds;
        let en = layout(&result.chords, duration, Lang::En.note_naming());
        let fr = layout(&result.chords, duration, Lang::Fr.note_naming());
        let en_labels: Vec<_> = en.iter().map(|b| b.label.as_str()).collect();
        let fr_labels: Vec<_> = fr.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(en_labels, vec!["C", "Am", "F", "G7", "C#m7/G#"]);
        assert_eq!(fr_labels, vec!["Do", "Lam", "Fa", "Sol7", "Do♯m7/Sol♯"]);
        for (a, b) in en.iter().zip(&fr) {
            assert_eq!(a.confidence_pct, b.confidence_pct);
            assert_eq!((a.start, a.end, a.width_pct), (b.start, b.end, b.width_pct));
        }
    }

    #[test]
    fn test_waveform_info_line() {
        let result = sample();
        let vars = waveform_info_vars(&result.waveform);
        let refs: Vec<(&str, &str)> = vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
        assert_eq!(
            translate_with(Lang::En, "waveform.info", &refs),
            "2 ch \u{2022} 44100 Hz \u{2022} 4 pts"
        );
    }

    #[test]
    fn test_raw_json_round_trips() {
        let result = sample();
        let back: AnalysisResult = serde_json::from_str(&raw_json(&result)).unwrap();
        assert_eq!(back, result);
    }
}
