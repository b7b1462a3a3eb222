// Software rasterizer: the handful of shapes the poster is built from.
// Coverage rule everywhere: a pixel is painted when its center (x+0.5, y+0.5)
// lies inside the shape. Painting is source-over in 8-bit sRGB.

use std::f32::consts::TAU;

use crate::types::{FrameBuffer, Rect, Rgb, Rgba};

/// Blend one color into (x,y) if it is inside bounds.
/// Alpha 255 overwrites; alpha 0 leaves the pixel alone.
#[inline]
pub fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 || color.a == 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    if color.a == 255 {
        fb.pixels[idx] = color.rgb().to_u32();
        return;
    }

    let old = Rgb::from_u32(fb.pixels[idx]);
    let a = color.a as u32;
    let ia = 255 - a;
    let mix = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * ia + 127) / 255) as u8;
    fb.pixels[idx] = Rgb::new(mix(color.r, old.r), mix(color.g, old.g), mix(color.b, old.b)).to_u32();
}

/// Pixel indices whose centers fall in [lo, hi), clipped to [0, limit).
#[inline]
fn covered_span(lo: f32, hi: f32, limit: usize) -> (i32, i32) {
    let start = ((lo - 0.5).ceil() as i32).max(0);
    let end = ((hi - 0.5).ceil() as i32).min(limit as i32);
    (start, end)
}

/// Loose pixel bounds around [lo, hi]; shape tests decide the exact coverage.
#[inline]
fn bbox_span(lo: f32, hi: f32, limit: usize) -> (i32, i32) {
    let start = ((lo - 1.0).floor() as i32).max(0);
    let end = ((hi + 1.0).ceil() as i32).min(limit as i32);
    (start, end)
}

#[inline]
fn ellipse_metric(px: f32, py: f32, cx: f32, cy: f32, rx: f32, ry: f32) -> f32 {
    let dx = (px - cx) / rx;
    let dy = (py - cy) / ry;
    dx * dx + dy * dy
}

/// Filled axis-aligned rectangle.
pub fn fill_rect(fb: &mut FrameBuffer, r: Rect, color: Rgba) {
    let (x0, x1) = covered_span(r.x, r.right(), fb.width);
    let (y0, y1) = covered_span(r.y, r.bottom(), fb.height);
    for y in y0..y1 {
        for x in x0..x1 {
            blend_pixel(fb, x, y, color);
        }
    }
}

/// Filled rectangle with all four corners rounded by `radius`.
/// The radius is limited to half the shorter side.
pub fn fill_rounded_rect(fb: &mut FrameBuffer, r: Rect, radius: f32, color: Rgba) {
    let rad = radius.clamp(0.0, r.w.min(r.h) / 2.0);
    if rad <= 0.0 {
        fill_rect(fb, r, color);
        return;
    }
    let (x0, x1) = covered_span(r.x, r.right(), fb.width);
    let (y0, y1) = covered_span(r.y, r.bottom(), fb.height);
    let rad2 = rad * rad;
    for y in y0..y1 {
        let py = y as f32 + 0.5;
        let ny = py.clamp(r.y + rad, r.bottom() - rad);
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            let nx = px.clamp(r.x + rad, r.right() - rad);
            let (dx, dy) = (px - nx, py - ny);
            if dx * dx + dy * dy <= rad2 {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/// Filled ellipse centered at (cx,cy) with full width `w` and height `h`.
pub fn fill_ellipse(fb: &mut FrameBuffer, cx: f32, cy: f32, w: f32, h: f32, color: Rgba) {
    let (rx, ry) = (w / 2.0, h / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let (x0, x1) = bbox_span(cx - rx, cx + rx, fb.width);
    let (y0, y1) = bbox_span(cy - ry, cy + ry, fb.height);
    for y in y0..y1 {
        for x in x0..x1 {
            if ellipse_metric(x as f32 + 0.5, y as f32 + 0.5, cx, cy, rx, ry) <= 1.0 {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/// Unfilled ellipse outline, `weight` units thick, centered on the nominal edge.
/// Ring = inside the ellipse grown by weight/2, and not strictly inside the one
/// shrunk by weight/2. Each pixel is painted at most once.
pub fn stroke_ellipse(fb: &mut FrameBuffer, cx: f32, cy: f32, w: f32, h: f32, weight: f32, color: Rgba) {
    if weight <= 0.0 {
        return;
    }
    let half = weight / 2.0;
    let (rx, ry) = (w / 2.0, h / 2.0);
    let (ox, oy) = (rx + half, ry + half);
    let (ix, iy) = (rx - half, ry - half);
    if ox <= 0.0 || oy <= 0.0 {
        return;
    }
    let has_hole = ix > 0.0 && iy > 0.0;

    let (x0, x1) = bbox_span(cx - ox, cx + ox, fb.width);
    let (y0, y1) = bbox_span(cy - oy, cy + oy, fb.height);
    for y in y0..y1 {
        let py = y as f32 + 0.5;
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            if ellipse_metric(px, py, cx, cy, ox, oy) > 1.0 {
                continue;
            }
            if has_hole && ellipse_metric(px, py, cx, cy, ix, iy) < 1.0 {
                continue;
            }
            blend_pixel(fb, x, y, color);
        }
    }
}

/// Filled elliptical arc closed by a straight chord.
/// Angles are radians, clockwise from +x because y grows downward.
pub fn fill_arc_chord(
    fb: &mut FrameBuffer,
    cx: f32, cy: f32,
    w: f32, h: f32,
    start: f32, stop: f32,
    color: Rgba,
) {
    let span = stop - start;
    if span <= 0.0 {
        return;
    }
    if span >= TAU {
        fill_ellipse(fb, cx, cy, w, h, color);
        return;
    }
    let (rx, ry) = (w / 2.0, h / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }

    let on_edge = |a: f32| (cx + rx * a.cos(), cy + ry * a.sin());
    let p0 = on_edge(start);
    let p1 = on_edge(stop);
    let pm = on_edge(start + span / 2.0);
    let (ex, ey) = (p1.0 - p0.0, p1.1 - p0.1);
    let side = |qx: f32, qy: f32| ex * (qy - p0.1) - ey * (qx - p0.0);
    let arc_side = side(pm.0, pm.1);

    let (x0, x1) = bbox_span(cx - rx, cx + rx, fb.width);
    let (y0, y1) = bbox_span(cy - ry, cy + ry, fb.height);
    for y in y0..y1 {
        let py = y as f32 + 0.5;
        for x in x0..x1 {
            let px = x as f32 + 0.5;
            if ellipse_metric(px, py, cx, cy, rx, ry) > 1.0 {
                continue;
            }
            if side(px, py) * arc_side >= 0.0 {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

/// Thin line between (x0,y0) and (x1,y1) using Bresenham on integer pixels.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        blend_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Line segment with a stroke weight.
/// Weight <= 1 is a 1-pixel Bresenham line on rounded endpoints; anything wider
/// is a round-capped capsule.
pub fn stroke_line(fb: &mut FrameBuffer, x0: f32, y0: f32, x1: f32, y1: f32, weight: f32, color: Rgba) {
    if weight <= 0.0 {
        return;
    }
    if weight <= 1.0 {
        draw_line(fb, x0.round() as i32, y0.round() as i32, x1.round() as i32, y1.round() as i32, color);
        return;
    }

    let half = weight / 2.0;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len2 = dx * dx + dy * dy;
    let (bx0, bx1) = bbox_span(x0.min(x1) - half, x0.max(x1) + half, fb.width);
    let (by0, by1) = bbox_span(y0.min(y1) - half, y0.max(y1) + half, fb.height);
    for y in by0..by1 {
        let py = y as f32 + 0.5;
        for x in bx0..bx1 {
            let px = x as f32 + 0.5;
            let t = if len2 > 0.0 {
                (((px - x0) * dx + (py - y0) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (qx, qy) = (x0 + dx * t - px, y0 + dy * t - py);
            if qx * qx + qy * qy <= half * half {
                blend_pixel(fb, x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb::new(240, 230, 210);
    const INK: Rgb = Rgb::new(20, 20, 20);

    fn canvas(w: usize, h: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        fb.clear(BG);
        fb
    }

    fn painted(fb: &FrameBuffer) -> usize {
        fb.pixels.iter().filter(|&&p| p != BG.to_u32()).count()
    }

    #[test]
    fn opaque_blend_overwrites_and_zero_alpha_is_noop() {
        let mut fb = canvas(2, 1);
        blend_pixel(&mut fb, 0, 0, INK.into());
        blend_pixel(&mut fb, 1, 0, INK.with_alpha(0));
        assert_eq!(fb.pixel(0, 0), Some(INK));
        assert_eq!(fb.pixel(1, 0), Some(BG));
    }

    #[test]
    fn partial_alpha_blends_source_over() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.clear(Rgb::new(0, 0, 0));
        blend_pixel(&mut fb, 0, 0, Rgb::new(255, 255, 255).with_alpha(128));
        // (255*128 + 0 + 127) / 255 = 128
        assert_eq!(fb.pixel(0, 0), Some(Rgb::new(128, 128, 128)));
    }

    #[test]
    fn out_of_bounds_pixels_are_skipped() {
        let mut fb = canvas(4, 4);
        blend_pixel(&mut fb, -1, 0, INK.into());
        blend_pixel(&mut fb, 4, 0, INK.into());
        fill_rect(&mut fb, Rect::new(-10.0, -10.0, 5.0, 5.0), INK.into());
        fill_ellipse(&mut fb, 100.0, 100.0, 10.0, 10.0, INK.into());
        assert_eq!(painted(&fb), 0);
    }

    #[test]
    fn integer_rect_covers_exactly_its_pixels() {
        let mut fb = canvas(10, 10);
        fill_rect(&mut fb, Rect::new(2.0, 3.0, 4.0, 2.0), INK.into());
        assert_eq!(painted(&fb), 8);
        assert_eq!(fb.pixel(2, 3), Some(INK));
        assert_eq!(fb.pixel(5, 4), Some(INK));
        assert_eq!(fb.pixel(6, 4), Some(BG));
        assert_eq!(fb.pixel(2, 5), Some(BG));
    }

    #[test]
    fn rounded_rect_cuts_corners_only() {
        let mut fb = canvas(20, 20);
        fill_rounded_rect(&mut fb, Rect::new(0.0, 0.0, 20.0, 20.0), 5.0, INK.into());
        assert_eq!(fb.pixel(0, 0), Some(BG));
        assert_eq!(fb.pixel(19, 19), Some(BG));
        assert_eq!(fb.pixel(10, 0), Some(INK));
        assert_eq!(fb.pixel(0, 10), Some(INK));
        assert_eq!(fb.pixel(10, 10), Some(INK));
    }

    #[test]
    fn ellipse_is_symmetric_about_its_center() {
        let mut fb = canvas(40, 40);
        fill_ellipse(&mut fb, 20.0, 20.0, 20.0, 10.0, INK.into());
        for y in 0..40 {
            for x in 0..40 {
                assert_eq!(fb.pixel(x, y), fb.pixel(39 - x, y), "mirror x at {x},{y}");
                assert_eq!(fb.pixel(x, y), fb.pixel(x, 39 - y), "mirror y at {x},{y}");
            }
        }
        assert_eq!(fb.pixel(20, 20), Some(INK));
        assert_eq!(fb.pixel(20, 14), Some(BG));
    }

    #[test]
    fn stroked_ellipse_leaves_the_middle_untouched() {
        let mut fb = canvas(100, 100);
        stroke_ellipse(&mut fb, 50.0, 50.0, 80.0, 48.0, 8.0, INK.into());
        assert_eq!(fb.pixel(50, 50), Some(BG));
        // top edge of the ring spans y in [22, 30]
        assert_eq!(fb.pixel(50, 25), Some(INK));
        assert_eq!(fb.pixel(50, 18), Some(BG));
        // right edge spans x in [86, 94]
        assert_eq!(fb.pixel(89, 50), Some(INK));
    }

    #[test]
    fn lower_half_chord_fills_below_the_center_only() {
        let mut fb = canvas(40, 40);
        fill_arc_chord(&mut fb, 20.0, 20.0, 30.0, 20.0, 0.0, std::f32::consts::PI, INK.into());
        assert_eq!(fb.pixel(20, 24), Some(INK));
        assert_eq!(fb.pixel(20, 16), Some(BG));
        assert!(painted(&fb) > 0);
    }

    #[test]
    fn thin_line_hits_both_endpoints() {
        let mut fb = canvas(20, 20);
        stroke_line(&mut fb, 2.0, 3.0, 12.0, 13.0, 1.0, INK.into());
        assert_eq!(fb.pixel(2, 3), Some(INK));
        assert_eq!(fb.pixel(12, 13), Some(INK));
        assert_eq!(fb.pixel(7, 8), Some(INK));
        assert_eq!(painted(&fb), 11);
    }

    #[test]
    fn thick_line_is_wider_than_thin_line() {
        let mut thin = canvas(30, 30);
        let mut thick = canvas(30, 30);
        stroke_line(&mut thin, 5.0, 15.0, 25.0, 15.0, 1.0, INK.into());
        stroke_line(&mut thick, 5.0, 15.0, 25.0, 15.0, 6.0, INK.into());
        assert!(painted(&thick) > 3 * painted(&thin));
        assert_eq!(thick.pixel(15, 12), Some(INK));
        assert_eq!(thick.pixel(15, 19), Some(BG));
    }
}
