// UTELÄMNANDE: a poster redrawn every tick.
// • The layout, text and gradient are fixed.
// • Cloud puffs and the grain drift slowly with the frame counter.
// • Move the pointer down to brighten, thicken and lower the golden halo.
// • ESC quits.

use anyhow::Context;
use std::time::{Duration, Instant};
use utelamnande_poster::config::{init_logging, AppConfig};
use utelamnande_poster::draw::Drawer;
use utelamnande_poster::noise::{NoiseField, DEFAULT_FALLOFF, DEFAULT_OCTAVES};
use utelamnande_poster::poster::PosterConfig;
use utelamnande_poster::render::FrameRenderer;
use utelamnande_poster::types::{FrameBuffer, FrameState};

const TITLE: &str = "UTELÄMNANDE";

fn main() -> anyhow::Result<()> {
    let app = AppConfig::from_env().context("reading POSTER_* environment")?;
    init_logging(app.log_filter.as_deref());
    log::info!(
        "starting: seed=0x{:08X} fps={} log={}",
        app.noise_seed,
        app.target_fps,
        app.log_filter.as_deref().unwrap_or("info")
    );

    let noise = NoiseField::new(app.noise_seed, DEFAULT_OCTAVES, DEFAULT_FALLOFF);
    let renderer = FrameRenderer::new(PosterConfig::default(), noise);
    let (w, h) = renderer.canvas_size();

    let mut drawer = Drawer::new(TITLE, w, h, app.target_fps).context("opening the poster window")?;
    let mut screen = FrameBuffer::new(w, h);
    let mut state = FrameState::default();

    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        // 1) Advance the tick and sample the pointer; keep the last Y if none is reported.
        state.frame_count += 1;
        if let Some(y) = drawer.pointer_y() {
            state.pointer_y = y;
        }

        // 2) Redraw everything, then show it.
        renderer.render(&mut screen, &state);
        drawer.present(&screen).context("presenting frame")?;

        // 3) FPS once per second.
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            log::debug!("FPS: {:.1} (frame {})", frames_this_second as f32 / secs, state.frame_count);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    log::info!("window closed after {} frames", state.frame_count);
    Ok(())
}
