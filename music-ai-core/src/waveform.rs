use crate::types::WaveformData;

/// Gap between and around lanes, in CSS pixels.
const LANE_MARGIN_CSS: f64 = 8.0;

/// One channel's lane: a baseline and a polyline, in device pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    pub channel: usize,
    pub top: f64,
    pub height: f64,
    pub baseline_y: f64,
    pub points: Vec<(f64, f64)>,
}

/// Lane geometry for a plot `width` by `height` device pixels.
///
/// The amplitude domain is fixed at [-1, 1] and maps linearly onto each
/// lane. Samples are spread across the full width whatever their count.
/// Channels with no samples get no lane.
pub fn plot_lanes(data: &WaveformData, width: f64, height: f64, dpr: f64) -> Vec<Lane> {
    let channels = data.channels.max(1) as usize;
    let margin = LANE_MARGIN_CSS * dpr;
    let lane_height = ((height - margin * (channels as f64 + 1.0)) / channels as f64).max(0.0);

    (0..channels)
        .filter_map(|ch| {
            let samples = data.waveform.get(ch).filter(|s| !s.is_empty())?;
            let top = margin + ch as f64 * (lane_height + margin);
            let last = (samples.len() - 1).max(1) as f64;
            let points = samples
                .iter()
                .enumerate()
                .map(|(i, &amp)| {
                    let x = i as f64 / last * width;
                    let y = top + (1.0 - (amp as f64 + 1.0) / 2.0) * lane_height;
                    (x, y)
                })
                .collect();
            Some(Lane {
                channel: ch,
                top,
                height: lane_height,
                baseline_y: top + lane_height / 2.0,
                points,
            })
        })
        .collect()
}
