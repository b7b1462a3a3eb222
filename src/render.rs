// The per-frame pipeline. Each call redraws the whole poster from scratch;
// the output depends only on the config, the noise field and the FrameState.

use std::f32::consts::PI;

use crate::font::{draw_text, draw_text_box, HAlign, TextStyle, VAlign};
use crate::noise::NoiseField;
use crate::poster::{copy, CloudLayout, GrainLayout, HaloLayout, Layout, PosterConfig, TextSlot};
use crate::raster::{fill_arc_chord, fill_ellipse, fill_rect, fill_rounded_rect, stroke_ellipse, stroke_line};
use crate::types::{FrameBuffer, FrameState, Rect, Rgb};

/// Halo values derived from the pointer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HaloGlow {
    pub alpha: f32,    // 50..=255
    pub weight: f32,   // 1..=8
    pub offset_y: f32, // -20..=20
}

/// The ring the renderer strokes for a given frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HaloEllipse {
    pub cx: f32,
    pub cy: f32,
    pub w: f32,
    pub h: f32,
    pub weight: f32,
    pub alpha: u8,
}

/// One cloud puff: center and diameter in canvas units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Puff {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Map `pointer_y` in [0, height] linearly onto the default halo ranges.
/// Values outside the canvas saturate at the range ends.
pub fn halo_glow(pointer_y: f32, height: f32) -> HaloGlow {
    halo_glow_in(pointer_y, height, &Layout::POSTER.halo)
}

fn halo_glow_in(pointer_y: f32, height: f32, halo: &HaloLayout) -> HaloGlow {
    let t = if height > 0.0 && pointer_y.is_finite() {
        (pointer_y / height).clamp(0.0, 1.0)
    } else {
        0.0
    };
    HaloGlow {
        alpha: lerp(halo.min_alpha, halo.max_alpha, t),
        weight: lerp(halo.min_weight, halo.max_weight, t),
        offset_y: lerp(-halo.max_offset, halo.max_offset, t),
    }
}

/// Color of gradient column `i` out of `width`: t = i / width.
pub fn gradient_color(start: Rgb, end: Rgb, i: usize, width: usize) -> Rgb {
    if width == 0 {
        return start;
    }
    start.lerp(end, i as f32 / width as f32)
}

fn slot_style(slot: &TextSlot) -> TextStyle {
    TextStyle::new(slot.size).leading(slot.leading)
}

pub struct FrameRenderer {
    config: PosterConfig,
    noise: NoiseField,
}

impl FrameRenderer {
    pub fn new(config: PosterConfig, noise: NoiseField) -> Self {
        Self { config, noise }
    }

    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    /// Canvas size the layout was drawn for.
    pub fn canvas_size(&self) -> (usize, usize) {
        (self.config.layout.width, self.config.layout.height)
    }

    /// Puff positions for `frame_count`, inside the cloud block.
    pub fn cloud_puffs(&self, frame_count: u64) -> Vec<Puff> {
        let c: &CloudLayout = &self.config.layout.clouds;
        let t = frame_count as f32 * c.time_scale;
        (0..c.puffs)
            .map(|i| {
                let i = i as f32;
                Puff {
                    x: c.block.x + self.noise.sample1(t + i * c.x_offset) * c.block.w,
                    y: c.block.y + self.noise.sample1(t + i * c.y_offset) * c.block.h,
                    size: self.noise.sample1(t + i * c.size_offset) * c.size_range + c.min_size,
                }
            })
            .collect()
    }

    /// Grain alpha for the cell whose offset inside the grain rect is (i, j).
    pub fn grain_alpha(&self, i: usize, j: usize, frame_count: u64) -> f32 {
        let g: &GrainLayout = &self.config.layout.grain;
        let drift = frame_count as f32 * g.time_scale;
        let n = self.noise.sample2(i as f32 * g.space_scale + drift, j as f32 * g.space_scale + drift);
        n * g.max_alpha
    }

    /// Geometry and paint of the halo ring for this frame.
    pub fn halo_ellipse(&self, state: &FrameState) -> HaloEllipse {
        let layout = &self.config.layout;
        let halo = &layout.halo;
        let glow = halo_glow_in(state.pointer_y, layout.height as f32, halo);
        HaloEllipse {
            cx: halo.center_x(),
            cy: halo.base_y() + glow.offset_y,
            w: halo.ring_w,
            h: halo.ring_h,
            weight: glow.weight,
            alpha: glow.alpha.round().clamp(0.0, 255.0) as u8,
        }
    }

    /// Redraw the whole poster into `fb`.
    pub fn render(&self, fb: &mut FrameBuffer, state: &FrameState) {
        fb.clear(self.config.palette.background);
        self.draw_header(fb);
        self.draw_faces(fb);
        self.draw_clouds(fb, state.frame_count);
        self.draw_desks(fb);
        self.draw_gradient(fb);
        self.draw_boxed_text(fb);
        self.draw_grain(fb, state.frame_count);
        self.draw_main_text(fb);
        self.draw_wire(fb);
        self.draw_title(fb);
        self.draw_small_text(fb);
        self.draw_computer(fb);
        self.draw_halo_figure(fb);
        self.draw_halo(fb, state);
        self.draw_footer(fb);
    }

    /* ---------- top section ---------- */

    fn draw_header(&self, fb: &mut FrameBuffer) {
        let l = &self.config.layout;
        let ink = self.config.palette.dark.into();
        let left = slot_style(&l.header_left);
        let center = slot_style(&l.header_center).align(HAlign::Center, VAlign::Top);
        let right = slot_style(&l.header_right).align(HAlign::Right, VAlign::Top);
        draw_text(fb, copy::HEADER_LEFT, l.header_left.x, l.header_left.y, &left, ink);
        draw_text(fb, copy::HEADER_CENTER, l.header_center.x, l.header_center.y, &center, ink);
        draw_text(fb, copy::HEADER_RIGHT, l.header_right.x, l.header_right.y, &right, ink);
    }

    // Two heads over a shared half-ellipse body.
    fn draw_faces(&self, fb: &mut FrameBuffer) {
        let b = self.config.layout.faces;
        let pal = &self.config.palette;
        let paper = pal.background.into();
        fill_rect(fb, b, pal.dark.into());
        fill_ellipse(fb, b.x + 15.0, b.y + 25.0, 10.0, 15.0, paper);
        fill_ellipse(fb, b.x + 45.0, b.y + 25.0, 10.0, 15.0, paper);
        fill_arc_chord(fb, b.x + 30.0, b.y + 35.0, 30.0, 20.0, 0.0, PI, paper);
    }

    fn draw_clouds(&self, fb: &mut FrameBuffer, frame_count: u64) {
        let c = &self.config.layout.clouds;
        let pal = &self.config.palette;
        fill_rect(fb, c.block, pal.dark.into());
        let mist = pal.background.with_alpha(c.alpha);
        for p in self.cloud_puffs(frame_count) {
            fill_ellipse(fb, p.x, p.y, p.size, p.size, mist);
        }
    }

    // Three desks, two with a head behind them.
    fn draw_desks(&self, fb: &mut FrameBuffer) {
        let b = self.config.layout.desks;
        let pal = &self.config.palette;
        let paper = pal.background.into();
        fill_rect(fb, b, pal.dark.into());
        fill_rect(fb, Rect::new(b.x + 10.0, b.y + 30.0, 25.0, 15.0), paper);
        fill_ellipse(fb, b.x + 20.0, b.y + 25.0, 10.0, 10.0, paper);
        fill_rect(fb, Rect::new(b.x + 40.0, b.y + 25.0, 25.0, 15.0), paper);
        fill_ellipse(fb, b.x + 50.0, b.y + 20.0, 10.0, 10.0, paper);
        fill_rect(fb, Rect::new(b.x + 70.0, b.y + 30.0, 25.0, 15.0), paper);
    }

    /* ---------- middle section ---------- */

    fn draw_gradient(&self, fb: &mut FrameBuffer) {
        let g = self.config.layout.gradient;
        let pal = &self.config.palette;
        let w = g.w.max(0.0) as usize;
        for i in 0..w {
            let c = gradient_color(pal.gradient_start, pal.gradient_end, i, w);
            let x = g.x + i as f32;
            stroke_line(fb, x, g.y, x, g.bottom(), 1.0, c.into());
        }
    }

    fn draw_boxed_text(&self, fb: &mut FrameBuffer) {
        let b = &self.config.layout.boxed_text;
        let style = TextStyle::new(b.size).leading(b.leading);
        draw_text_box(fb, copy::BOXED, b.rect, &style, self.config.palette.dark.into());
    }

    fn draw_grain(&self, fb: &mut FrameBuffer, frame_count: u64) {
        let g = &self.config.layout.grain;
        let pal = &self.config.palette;
        fill_rect(fb, g.rect, pal.dark.into());

        let cell = g.cell.max(1);
        let (w, h) = (g.rect.w.max(0.0) as usize, g.rect.h.max(0.0) as usize);
        for i in (0..w).step_by(cell) {
            for j in (0..h).step_by(cell) {
                let alpha = self.grain_alpha(i, j, frame_count).round() as u8;
                let r = Rect::new(g.rect.x + i as f32, g.rect.y + j as f32, cell as f32, cell as f32);
                fill_rect(fb, r, pal.background.with_alpha(alpha));
            }
        }
    }

    fn draw_main_text(&self, fb: &mut FrameBuffer) {
        let b = &self.config.layout.main_text;
        let style = TextStyle::new(b.size).leading(b.leading);
        draw_text_box(fb, copy::MAIN, b.rect, &style, self.config.palette.dark.into());
    }

    // One long strand with an X of two short diagonals at every barb.
    fn draw_wire(&self, fb: &mut FrameBuffer) {
        let w = &self.config.layout.wire;
        let ink = self.config.palette.dark.into();
        stroke_line(fb, w.x_start, w.y, w.x_end, w.y, 1.0, ink);
        for x in w.barb_positions() {
            stroke_line(fb, x, w.y - w.barb, x + w.barb, w.y + w.barb, 1.0, ink);
            stroke_line(fb, x, w.y + w.barb, x + w.barb, w.y - w.barb, 1.0, ink);
        }
    }

    fn draw_title(&self, fb: &mut FrameBuffer) {
        let t = &self.config.layout.title;
        let style = slot_style(t).bold();
        draw_text(fb, copy::TITLE, t.x, t.y, &style, self.config.palette.dark.into());
    }

    /* ---------- bottom section ---------- */

    fn draw_small_text(&self, fb: &mut FrameBuffer) {
        let t = &self.config.layout.small_text;
        draw_text(fb, copy::SMALL, t.x, t.y, &slot_style(t), self.config.palette.dark.into());
    }

    // Monitor, keyboard and mouse.
    fn draw_computer(&self, fb: &mut FrameBuffer) {
        let b = self.config.layout.computer;
        let pal = &self.config.palette;
        let paper = pal.background.into();
        fill_rect(fb, b, pal.dark.into());
        fill_rect(fb, Rect::new(b.x + 10.0, b.y + 20.0, 50.0, 40.0), paper);
        fill_rect(fb, Rect::new(b.x + 70.0, b.y + 50.0, 80.0, 15.0), paper);
        fill_ellipse(fb, b.x + 75.0, b.y + 45.0, 10.0, 8.0, paper);
    }

    fn draw_halo_figure(&self, fb: &mut FrameBuffer) {
        let h = &self.config.layout.halo;
        let pal = &self.config.palette;
        fill_rect(fb, h.figure, pal.dark.into());

        let dots = pal.background.with_alpha(h.grid_alpha);
        let x0 = h.figure.right() - h.grid_inset_right;
        let y0 = h.figure.y + h.grid_inset_top;
        for i in 0..h.grid_count {
            for j in 0..h.grid_count {
                let r = Rect::new(x0 + i as f32 * h.grid_pitch, y0 + j as f32 * h.grid_pitch, h.grid_cell, h.grid_cell);
                fill_rect(fb, r, dots);
            }
        }
    }

    fn draw_halo(&self, fb: &mut FrameBuffer, state: &FrameState) {
        let e = self.halo_ellipse(state);
        let color = self.config.palette.halo.with_alpha(e.alpha);
        stroke_ellipse(fb, e.cx, e.cy, e.w, e.h, e.weight, color);
    }

    fn draw_footer(&self, fb: &mut FrameBuffer) {
        let l = &self.config.layout;
        let pal = &self.config.palette;
        let f = &l.footer;
        draw_text(fb, copy::FOOTER, f.x, f.y, &slot_style(f), pal.dark.into());

        let b = &l.button;
        fill_rounded_rect(fb, b.rect, b.radius, pal.dark.into());
        let (cx, cy) = b.rect.center();
        let label = TextStyle::new(b.text_size).align(HAlign::Center, VAlign::Center);
        draw_text(fb, copy::BUTTON, cx, cy, &label, pal.background.into());
    }
}
