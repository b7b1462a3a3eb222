//! Whole-frame checks through the public API: the two pointer extremes,
//! the gradient midpoint and replayability.

use utelamnande_poster::noise::NoiseField;
use utelamnande_poster::poster::{Palette, PosterConfig};
use utelamnande_poster::render::FrameRenderer;
use utelamnande_poster::types::{FrameBuffer, FrameState, Rgb};

fn render(r: &FrameRenderer, frame_count: u64, pointer_y: f32) -> FrameBuffer {
    let (w, h) = r.canvas_size();
    let mut fb = FrameBuffer::new(w, h);
    r.render(&mut fb, &FrameState { frame_count, pointer_y });
    fb
}

fn renderer(seed: u32) -> FrameRenderer {
    FrameRenderer::new(PosterConfig::default(), NoiseField::new(seed, 8, 0.6))
}

#[test]
fn pointer_at_top_gives_a_faint_thin_raised_halo() {
    let r = renderer(1);
    let e = r.halo_ellipse(&FrameState { frame_count: 0, pointer_y: 0.0 });
    assert_eq!((e.cx, e.cy, e.alpha, e.weight), (415.0, 790.0, 50, 1.0));
}

#[test]
fn pointer_at_bottom_gives_a_bright_thick_lowered_halo() {
    let r = renderer(1);
    let e = r.halo_ellipse(&FrameState { frame_count: 0, pointer_y: 900.0 });
    assert_eq!((e.cx, e.cy, e.alpha, e.weight), (415.0, 830.0, 255, 8.0));

    let fb = render(&r, 0, 900.0);
    assert_eq!(fb.pixel(415, 805), Some(Palette::POSTER.halo));
}

#[test]
fn gradient_column_125_is_the_exact_midpoint() {
    let r = renderer(1);
    for frame_count in [0u64, 1, 999] {
        let fb = render(&r, frame_count, 123.0);
        assert_eq!(fb.pixel(50 + 125, 205), Some(Rgb::new(70, 80, 60)));
    }
}

#[test]
fn same_inputs_replay_pixel_for_pixel() {
    let a = renderer(0xABCD);
    let b = renderer(0xABCD);
    for (f, y) in [(0u64, 0.0f32), (250, 450.0), (10_000, -40.0)] {
        assert_eq!(render(&a, f, y), render(&b, f, y));
    }
}

#[test]
fn textures_move_with_the_frame_counter_but_the_frame_stays_on_palette() {
    let r = renderer(0xABCD);
    let early = render(&r, 1, 450.0);
    let late = render(&r, 5_000, 450.0);
    assert_ne!(early, late);

    // clouds only lighten the dark block toward the paper, never past it
    let pal = Palette::POSTER;
    for y in 70..120 {
        for x in 300..380 {
            let px = late.pixel(x, y).unwrap();
            assert!(px.r >= pal.dark.r && px.r <= pal.background.r, "({x},{y}) = {px:?}");
        }
    }
}
