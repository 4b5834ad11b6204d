/// Lane baseline colour.
pub const BASELINE: &str = "#e5e7eb";

const CHANNEL_COLORS: [&str; 3] = ["#4f46e5", "#22c55e", "#f59e0b"];

/// Stroke colour for a channel's polyline; cycles past the third channel.
pub fn channel_color(channel: usize) -> &'static str {
    CHANNEL_COLORS[channel % CHANNEL_COLORS.len()]
}
