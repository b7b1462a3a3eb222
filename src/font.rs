// Bitmap text for the poster: a 5x7 font with two rows of headroom for diacritics,
// scaled to any text size, with alignment, leading, bold and boxed (wrapped) layout.
//
// Metrics at scale s = size / 10:
// - glyph cell is 6s wide (5 columns of ink + 1 of spacing)
// - rows 0..2 hold accents, rows 2..9 hold the capital, all s tall
// - the line top is the top of the accent rows

use crate::raster::fill_rect;
use crate::types::{FrameBuffer, Rect, Rgba};

const GLYPH_COLS: u32 = 5;
const ADVANCE_COLS: f32 = 6.0;
const ACCENT_ROWS: usize = 2;
const BOLD_WIDEN: f32 = 0.4;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Center,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

/// How a block of text is sized and placed around its anchor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub leading: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub weight: Weight,
}

impl TextStyle {
    /// Left/top aligned, normal weight, leading 1.25 × size.
    pub const fn new(size: f32) -> Self {
        Self {
            size,
            leading: size * 1.25,
            h_align: HAlign::Left,
            v_align: VAlign::Top,
            weight: Weight::Normal,
        }
    }

    pub const fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub const fn align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    #[inline]
    fn scale(&self) -> f32 {
        self.size / 10.0
    }
}

/* ---------- glyph table ---------- */

/// Nine rows per glyph: two accent rows, then seven cap rows.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph(ch: char) -> Option<[u8; 9]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([0, 0, $a, $b, $c, $d, $e, $f, $g])
    }; }
    macro_rules! accented { ($acc0:expr, $acc1:expr, $base:expr) => {
        glyph($base).map(|mut rows| { rows[..ACCENT_ROWS].copy_from_slice(&[$acc0, $acc1]); rows })
    }; }

    match ch {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Swedish capitals: base letter plus marks in the accent rows
        'Ä' => accented!(0b01010, 0b00000, 'A'),
        'Ö' => accented!(0b01010, 0b00000, 'O'),
        'Å' => accented!(0b00100, 0b01010, 'A'),

        // Greek capital gamma and box-drawing corners
        'Γ' => g!(0b11111,0b10000,0b10000,0b10000,0b10000,0b10000,0b10000),
        '┌' => g!(0b00000,0b00000,0b00000,0b00111,0b00100,0b00100,0b00100),
        '┐' => g!(0b00000,0b00000,0b00000,0b11100,0b00100,0b00100,0b00100),
        '└' => g!(0b00100,0b00100,0b00100,0b00111,0b00000,0b00000,0b00000),
        '┘' => g!(0b00100,0b00100,0b00100,0b11100,0b00000,0b00000,0b00000),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b01000),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),

        _ => None,
    }
}

/* ---------- measuring ---------- */

/// Ink width of one line: every glyph advances 6s, minus the trailing spacing column.
pub fn text_width(line: &str, size: f32) -> f32 {
    let n = line.chars().count();
    if n == 0 {
        return 0.0;
    }
    let s = size / 10.0;
    (n as f32 * ADVANCE_COLS - 1.0) * s
}

/// Greedy word wrap of one paragraph to `max_width`.
/// Runs of spaces are kept inside lines; a single word wider than the box stays on its own line.
fn wrap_paragraph(paragraph: &str, size: f32, max_width: f32, out: &mut Vec<String>) {
    let mut line = String::new();
    let mut started = false;
    for word in paragraph.split(' ') {
        if !started {
            line.push_str(word);
            started = true;
            continue;
        }
        let candidate_len = line.chars().count() + 1 + word.chars().count();
        let candidate_width = (candidate_len as f32 * ADVANCE_COLS - 1.0) * size / 10.0;
        if candidate_width <= max_width || word.is_empty() {
            line.push(' ');
            line.push_str(word);
        } else {
            out.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    out.push(line);
}

fn wrap_lines(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, size, max_width, &mut lines);
    }
    lines
}

/* ---------- drawing ---------- */

fn draw_glyph(fb: &mut FrameBuffer, x: f32, y: f32, rows: &[u8; 9], style: &TextStyle, color: Rgba) {
    let s = style.scale();
    let ink_w = match style.weight {
        Weight::Normal => s,
        Weight::Bold => s * (1.0 + BOLD_WIDEN),
    };
    for (ry, bits) in rows.iter().enumerate() {
        for rx in 0..GLYPH_COLS {
            if bits & (1 << (GLYPH_COLS - 1 - rx)) != 0 {
                let cell = Rect::new(x + rx as f32 * s, y + ry as f32 * s, ink_w, s);
                fill_rect(fb, cell, color);
            }
        }
    }
}

/// Draw one line with its left edge at `x` and line top at `y`.
fn draw_line_at(fb: &mut FrameBuffer, x: f32, y: f32, line: &str, style: &TextStyle, color: Rgba) {
    let advance = ADVANCE_COLS * style.scale();
    let mut pen = x;
    for ch in line.chars() {
        match glyph(ch) {
            Some(rows) => draw_glyph(fb, pen, y, &rows, style, color),
            None => log::trace!("no glyph for {ch:?}, leaving a blank cell"),
        }
        pen += advance;
    }
}

fn aligned_x(x: f32, line: &str, style: &TextStyle) -> f32 {
    let w = text_width(line, style.size);
    match style.h_align {
        HAlign::Left => x,
        HAlign::Center => x - w / 2.0,
        HAlign::Right => x - w,
    }
}

/// Top of the first line for a block of `lines` lines anchored at `y`.
fn block_top(y: f32, lines: usize, style: &TextStyle) -> f32 {
    match style.v_align {
        VAlign::Top => y,
        VAlign::Center => {
            let h = lines.saturating_sub(1) as f32 * style.leading + style.size;
            y - h / 2.0
        }
    }
}

/// Draw `text` anchored at (x,y). Lines split on '\n' and are aligned one by one.
pub fn draw_text(fb: &mut FrameBuffer, text: &str, x: f32, y: f32, style: &TextStyle, color: Rgba) {
    let count = text.split('\n').count();
    let top = block_top(y, count, style);
    for (i, line) in text.split('\n').enumerate() {
        let ly = top + i as f32 * style.leading;
        draw_line_at(fb, aligned_x(x, line, style), ly, line, style, color);
    }
}

/// Draw `text` inside `bounds`: wrapped to its width, laid out from its top,
/// horizontally aligned within it. Lines that would cross the bottom edge are dropped.
pub fn draw_text_box(fb: &mut FrameBuffer, text: &str, bounds: Rect, style: &TextStyle, color: Rgba) {
    let anchor_x = match style.h_align {
        HAlign::Left => bounds.x,
        HAlign::Center => bounds.x + bounds.w / 2.0,
        HAlign::Right => bounds.right(),
    };
    for (i, line) in wrap_lines(text, style.size, bounds.w).iter().enumerate() {
        let ly = bounds.y + i as f32 * style.leading;
        if ly + style.size > bounds.bottom() {
            break;
        }
        draw_line_at(fb, aligned_x(anchor_x, line, style), ly, line, style, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;

    const BG: Rgb = Rgb::new(240, 230, 210);
    const INK: Rgb = Rgb::new(20, 20, 20);

    fn canvas(w: usize, h: usize) -> FrameBuffer {
        let mut fb = FrameBuffer::new(w, h);
        fb.clear(BG);
        fb
    }

    /// (min_x, max_x, min_y, max_y) of painted pixels.
    fn ink_bounds(fb: &FrameBuffer) -> Option<(usize, usize, usize, usize)> {
        let mut b: Option<(usize, usize, usize, usize)> = None;
        for y in 0..fb.height {
            for x in 0..fb.width {
                if fb.pixel(x, y) != Some(BG) {
                    b = Some(match b {
                        None => (x, x, y, y),
                        Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
                    });
                }
            }
        }
        b
    }

    #[test]
    fn every_poster_character_has_a_glyph() {
        let used = "MATERIAL NUMMER ... 409624 YA02 Γ ┐ └ ┘ ÄÖÅ SANT. DU FANNS A O V X VARNING";
        for ch in used.chars() {
            assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
        for ch in 'A'..='Z' {
            assert!(glyph(ch).is_some(), "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn accented_capitals_only_differ_in_the_accent_rows() {
        let a = glyph('A').unwrap();
        let ae = glyph('Ä').unwrap();
        assert_eq!(a[ACCENT_ROWS..], ae[ACCENT_ROWS..]);
        assert_ne!(ae[0], 0);
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        assert_eq!(text_width("", 10.0), 0.0);
        assert_eq!(text_width("AB", 10.0), 11.0);
        assert_eq!(text_width("ÄÖ", 10.0), 11.0);
        assert_eq!(text_width("ABC", 20.0), 34.0);
    }

    #[test]
    fn size_ten_draws_the_native_five_by_seven() {
        let mut fb = canvas(20, 20);
        draw_text(&mut fb, "H", 2.0, 2.0, &TextStyle::new(10.0), INK.into());
        // cap rows start two rows below the line top
        assert_eq!(ink_bounds(&fb), Some((2, 6, 4, 10)));
    }

    #[test]
    fn right_aligned_text_ends_at_the_anchor() {
        let mut fb = canvas(100, 20);
        let style = TextStyle::new(10.0).align(HAlign::Right, VAlign::Top);
        draw_text(&mut fb, "409624", 90.0, 0.0, &style, INK.into());
        let (_, max_x, _, _) = ink_bounds(&fb).unwrap();
        assert_eq!(max_x, 89);
    }

    #[test]
    fn centered_text_is_balanced_around_the_anchor() {
        let mut fb = canvas(100, 40);
        let style = TextStyle::new(20.0).align(HAlign::Center, VAlign::Center);
        draw_text(&mut fb, "HH", 50.0, 20.0, &style, INK.into());
        let (x0, x1, y0, _) = ink_bounds(&fb).unwrap();
        assert_eq!(50 - x0, x1 + 1 - 50);
        // block is 20 tall centered on 20 -> line top 10, cap top 14
        assert_eq!(y0, 14);
    }

    #[test]
    fn bold_lays_down_more_ink() {
        let mut normal = canvas(200, 60);
        let mut bold = canvas(200, 60);
        draw_text(&mut normal, "UTE", 0.0, 0.0, &TextStyle::new(50.0), INK.into());
        draw_text(&mut bold, "UTE", 0.0, 0.0, &TextStyle::new(50.0).bold(), INK.into());
        let ink = |fb: &FrameBuffer| fb.pixels.iter().filter(|&&p| p != BG.to_u32()).count();
        assert!(ink(&bold) > ink(&normal));
    }

    #[test]
    fn wrapping_respects_box_width() {
        let lines = wrap_lines("ALLT SOM OM DET VAR", 10.0, 60.0);
        assert!(lines.len() > 1);
        for l in &lines {
            assert!(text_width(l, 10.0) <= 60.0 || !l.contains(' '), "{l:?} overflows");
        }
        assert_eq!(lines.join(" "), "ALLT SOM OM DET VAR");
    }

    #[test]
    fn explicit_newlines_and_inner_spaces_survive() {
        let lines = wrap_lines("  OM DET V A R   \nX", 10.0, 200.0);
        assert_eq!(lines, vec!["  OM DET V A R   ".to_string(), "X".to_string()]);
    }

    #[test]
    fn box_text_drops_lines_past_the_bottom() {
        let mut fb = canvas(100, 100);
        let style = TextStyle::new(10.0).leading(12.0);
        draw_text_box(&mut fb, "A\nB\nC\nD", Rect::new(0.0, 0.0, 100.0, 25.0), &style, INK.into());
        // lines at 0 and 12 fit (bottom 10, 22); line at 24 would end at 34 > 25
        let (_, _, _, y1) = ink_bounds(&fb).unwrap();
        assert!(y1 < 24);
    }

    #[test]
    fn unknown_characters_still_advance() {
        let mut fb = canvas(40, 20);
        draw_text(&mut fb, "~H", 0.0, 0.0, &TextStyle::new(10.0), INK.into());
        let (x0, _, _, _) = ink_bounds(&fb).unwrap();
        assert_eq!(x0, 6);
    }
}
