use crate::i18n::NoteNaming;
use crate::types::ChordSegment;

/// Narrowest block, in percent of the timeline, so very short chords stay visible.
pub const MIN_WIDTH_PCT: f64 = 0.5;

/// One block of the chord timeline, ready to render.
#[derive(Clone, Debug, PartialEq)]
pub struct ChordBlock {
    pub label: String,
    pub confidence_pct: u32,
    pub start: f64,
    pub end: f64,
    pub width_pct: f64,
}

impl ChordBlock {
    /// Hover text: label with exact start and end.
    pub fn tooltip(&self) -> String {
        format!("{} \u{2022} {:.1}s \u{2192} {:.1}s", self.label, self.start, self.end)
    }
}

/// Total duration used for proportions; never zero.
pub fn timeline_duration(duration_seconds: f64) -> f64 {
    duration_seconds.max(0.001)
}

/// Lay out segments as adjacent blocks across `duration_seconds`.
///
/// Segments are taken in the order given. Each ends where the next begins,
/// the last one at the total duration.
pub fn layout(segments: &[ChordSegment], duration_seconds: f64, naming: NoteNaming) -> Vec<ChordBlock> {
    let duration = timeline_duration(duration_seconds);
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            let start = seg.time;
            let end = segments.get(i + 1).map_or(duration, |next| next.time);
            let width_pct = ((end - start) / duration * 100.0).max(MIN_WIDTH_PCT);
            ChordBlock {
                label: chord_label(&seg.chord, naming),
                confidence_pct: (seg.confidence * 100.0).round().max(0.0) as u32,
                start,
                end,
                width_pct,
            }
        })
        .collect()
}

pub fn chord_label(label: &str, naming: NoteNaming) -> String {
    match naming {
        NoteNaming::Letters => label.to_string(),
        NoteNaming::Solfege => to_solfege(label),
    }
}

/// `C#m7` → `Do♯m7`, `Bbmaj7/C` → `Si♭maj7/Do`. Anything that does not start
/// with a note letter (`N`, `X`, ...) is left alone.
pub fn to_solfege(label: &str) -> String {
    match label.split_once('/') {
        Some((head, bass)) => format!("{}/{}", convert_note(head), convert_note(bass)),
        None => convert_note(label),
    }
}

fn convert_note(text: &str) -> String {
    let mut chars = text.chars();
    let Some(root) = chars.next().and_then(solfege_root) else {
        return text.to_string();
    };
    let rest = chars.as_str();
    let (accidental, suffix) = match rest.chars().next() {
        Some('#') => ("\u{266F}", &rest[1..]),
        Some('b') => ("\u{266D}", &rest[1..]),
        _ => ("", rest),
    };
    format!("{root}{accidental}{suffix}")
}

fn solfege_root(letter: char) -> Option<&'static str> {
    Some(match letter {
        'C' => "Do",
        'D' => "Ré",
        'E' => "Mi",
        'F' => "Fa",
        'G' => "Sol",
        'A' => "La",
        'B' => "Si",
        _ => return None,
    })
}
