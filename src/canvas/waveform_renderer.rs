use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use music_ai_core::types::WaveformData;
use music_ai_core::waveform::{plot_lanes, Lane};

use super::colors;

pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| *dpr > 0.0)
        .unwrap_or(1.0)
}

/// Size the backing store to the element's CSS width times the pixel ratio
/// and draw every channel lane.
pub fn render(canvas: &HtmlCanvasElement, data: &WaveformData, css_height: f64) {
    let dpr = device_pixel_ratio();
    let width = (canvas.client_width() as f64 * dpr).round();
    let height = (css_height * dpr).round();
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    if canvas.width() != width as u32 || canvas.height() != height as u32 {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
    }

    let Some(ctx) = context_2d(canvas) else {
        log::warn!("2d canvas context unavailable");
        return;
    };

    ctx.clear_rect(0.0, 0.0, width, height);
    for lane in plot_lanes(data, width, height, dpr) {
        draw_baseline(&ctx, &lane, width, dpr);
        draw_polyline(&ctx, &lane, dpr);
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_baseline(ctx: &CanvasRenderingContext2d, lane: &Lane, width: f64, dpr: f64) {
    ctx.set_stroke_style_str(colors::BASELINE);
    ctx.set_line_width(dpr);
    ctx.begin_path();
    ctx.move_to(0.0, lane.baseline_y);
    ctx.line_to(width, lane.baseline_y);
    ctx.stroke();
}

fn draw_polyline(ctx: &CanvasRenderingContext2d, lane: &Lane, dpr: f64) {
    ctx.set_stroke_style_str(colors::channel_color(lane.channel));
    ctx.set_line_width(1.5 * dpr);
    ctx.begin_path();
    let mut first = true;
    for &(x, y) in &lane.points {
        if first {
            ctx.move_to(x, y);
            first = false;
        } else {
            ctx.line_to(x, y);
        }
    }
    ctx.stroke();
}
