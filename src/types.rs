// Core types shared by the rasterizer, the text layer and the poster renderer.

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Black buffer of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Fill every pixel with one opaque color.
    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color.to_u32());
    }

    /// Color at (x,y), or None outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgb::from_u32(self.pixels[y * self.width + x]))
    }
}

/// Straight 8-bit sRGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_u32(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }

    /// Same color with the given opacity (0 = invisible, 255 = opaque).
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }

    /// Per-channel linear interpolation, rounded to nearest.
    /// `t` is clamped to [0,1] so the result never leaves the two endpoints.
    pub fn lerp(self, to: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }
}

/// Straight-alpha color used for painting; `a` is 0..=255.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    #[inline]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        c.with_alpha(255)
    }
}

/// Axis-aligned rectangle in canvas units (top-left origin).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Everything that changes between ticks. Written by the host, read by the renderer.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FrameState {
    pub frame_count: u64,
    pub pointer_y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_packs_as_minifb_expects() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x0012_3456);
        assert_eq!(Rgb::from_u32(0xFF12_3456), c);
    }

    #[test]
    fn lerp_hits_endpoints_and_midpoint() {
        let a = Rgb::new(100, 70, 40);
        let b = Rgb::new(40, 90, 80);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(70, 80, 60));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn rect_edges_and_center() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert_eq!((r.right(), r.bottom()), (15.0, 15.0));
        assert_eq!(r.center(), (12.5, 12.5));
    }

    #[test]
    fn framebuffer_pixel_reads_are_bounds_checked() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.clear(Rgb::new(1, 2, 3));
        assert_eq!(fb.pixel(3, 2), Some(Rgb::new(1, 2, 3)));
        assert_eq!(fb.pixel(4, 0), None);
        assert_eq!(fb.pixel(0, 3), None);
    }
}
