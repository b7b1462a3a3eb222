// The poster's fixed data: palette, layout table and text content.
// Built once at startup and handed to the renderer by reference.

use crate::types::{Rect, Rgb};

/// Poster colors; immutable for the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,     // light beige paper
    pub dark: Rgb,           // near-black ink and blocks
    pub gradient_start: Rgb, // brown-orange
    pub gradient_end: Rgb,   // desaturated teal-green
    pub halo: Rgb,           // golden yellow
}

impl Palette {
    pub const POSTER: Palette = Palette {
        background: Rgb::new(240, 230, 210),
        dark: Rgb::new(20, 20, 20),
        gradient_start: Rgb::new(100, 70, 40),
        gradient_end: Rgb::new(40, 90, 80),
        halo: Rgb::new(255, 200, 0),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::POSTER
    }
}

/// Where a piece of text goes and how big it is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextSlot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub leading: f32,
}

impl TextSlot {
    const fn at(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size, leading: size * 1.25 }
    }

    const fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }
}

/// Wrapped text confined to a box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextBox {
    pub rect: Rect,
    pub size: f32,
    pub leading: f32,
}

/// Cloud puffs inside their block; values come from noise sampled at
/// `frame_count * time_scale + index * {x,y,size}_offset`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CloudLayout {
    pub block: Rect,
    pub puffs: usize,
    pub time_scale: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    pub size_offset: f32,
    pub min_size: f32,
    pub size_range: f32,
    pub alpha: u8,
}

/// Grain cells tiling `rect`; alpha in [0, max_alpha].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GrainLayout {
    pub rect: Rect,
    pub cell: usize,
    pub space_scale: f32,
    pub time_scale: f32,
    pub max_alpha: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WireLayout {
    pub y: f32,
    pub x_start: f32,
    pub x_end: f32,
    pub first_barb: f32,
    pub barb_end: f32, // barbs start strictly before this x
    pub spacing: f32,
    pub barb: f32,     // horizontal span and half height of each barb
}

impl WireLayout {
    /// Left x of every barb, in order.
    pub fn barb_positions(&self) -> impl Iterator<Item = f32> + '_ {
        let spacing = self.spacing.max(1.0);
        (0..)
            .map(move |k| self.first_barb + k as f32 * spacing)
            .take_while(move |&x| x < self.barb_end)
    }
}

/// The halo's figure block, its dot grid and the ring's rest geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HaloLayout {
    pub figure: Rect,
    pub grid_inset_right: f32,
    pub grid_inset_top: f32,
    pub grid_count: usize,
    pub grid_pitch: f32,
    pub grid_cell: f32,
    pub grid_alpha: u8,
    pub ring_w: f32,        // full width of the ring at rest
    pub ring_h: f32,        // full height; 0.6 of the width
    pub base_lift: f32,     // ring rests this far above the figure's center
    pub max_offset: f32,    // pointer moves the ring by ±max_offset
    pub min_alpha: f32,
    pub max_alpha: f32,
    pub min_weight: f32,
    pub max_weight: f32,
}

impl HaloLayout {
    pub fn center_x(&self) -> f32 {
        self.figure.x + self.figure.w / 2.0
    }

    pub fn base_y(&self) -> f32 {
        self.figure.y + self.figure.h / 2.0 - self.base_lift
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ButtonLayout {
    pub rect: Rect,
    pub radius: f32,
    pub text_size: f32,
}

/// Every fixed position on the poster.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: usize,
    pub height: usize,

    pub header_left: TextSlot,
    pub header_center: TextSlot,
    pub header_right: TextSlot,

    pub faces: Rect,
    pub clouds: CloudLayout,
    pub desks: Rect,

    pub gradient: Rect,
    pub boxed_text: TextBox,
    pub grain: GrainLayout,
    pub main_text: TextBox,
    pub wire: WireLayout,
    pub title: TextSlot,
    pub small_text: TextSlot,
    pub computer: Rect,
    pub halo: HaloLayout,
    pub footer: TextSlot,
    pub button: ButtonLayout,
}

const WIDTH: f32 = 600.0;
const HEIGHT: f32 = 900.0;
const MARGIN: f32 = 50.0;

impl Layout {
    pub const POSTER: Layout = Layout {
        width: WIDTH as usize,
        height: HEIGHT as usize,

        header_left: TextSlot::at(MARGIN, 40.0, 10.0),
        header_center: TextSlot::at(WIDTH / 2.0, 40.0, 10.0),
        header_right: TextSlot::at(WIDTH - MARGIN, 40.0, 10.0),

        faces: Rect::new(50.0, 70.0, 70.0, 50.0),
        clouds: CloudLayout {
            block: Rect::new(300.0, 70.0, 80.0, 50.0),
            puffs: 5,
            time_scale: 0.01,
            x_offset: 10.0,
            y_offset: 20.0,
            size_offset: 30.0,
            min_size: 5.0,
            size_range: 15.0,
            alpha: 70,
        },
        desks: Rect::new(400.0, 70.0, 150.0, 50.0),

        gradient: Rect::new(50.0, 190.0, 250.0, 30.0),
        boxed_text: TextBox { rect: Rect::new(350.0, 195.0, 200.0, 100.0), size: 10.0, leading: 12.0 },
        grain: GrainLayout {
            rect: Rect::new(50.0, 270.0, 500.0, 120.0),
            cell: 3,
            space_scale: 0.005,
            time_scale: 0.001,
            max_alpha: 50.0,
        },
        main_text: TextBox { rect: Rect::new(100.0, 440.0, 400.0, 150.0), size: 16.0, leading: 20.0 },
        wire: WireLayout {
            y: 600.0,
            x_start: MARGIN,
            x_end: WIDTH - MARGIN,
            first_barb: 70.0,
            barb_end: WIDTH - 70.0,
            spacing: 30.0,
            barb: 5.0,
        },
        title: TextSlot::at(MARGIN, 660.0, 50.0),
        small_text: TextSlot::at(MARGIN, 750.0, 14.0).with_leading(18.0),
        computer: Rect::new(50.0, 830.0, 200.0, 100.0),
        halo: HaloLayout {
            figure: Rect::new(280.0, 740.0, 270.0, 200.0),
            grid_inset_right: 60.0,
            grid_inset_top: 10.0,
            grid_count: 5,
            grid_pitch: 10.0,
            grid_cell: 8.0,
            grid_alpha: 50,
            ring_w: 80.0,
            ring_h: 48.0,
            base_lift: 30.0,
            max_offset: 20.0,
            min_alpha: 50.0,
            max_alpha: 255.0,
            min_weight: 1.0,
            max_weight: 8.0,
        },
        footer: TextSlot::at(MARGIN, HEIGHT - 30.0, 10.0),
        button: ButtonLayout {
            rect: Rect::new(WIDTH - 120.0, HEIGHT - 45.0, 70.0, 25.0),
            radius: 5.0,
            text_size: 10.0,
        },
    };
}

impl Default for Layout {
    fn default() -> Self {
        Self::POSTER
    }
}

/// Text printed on the poster, verbatim.
pub mod copy {
    pub const HEADER_LEFT: &str = "MATERIAL NUMMER";
    pub const HEADER_CENTER: &str = "...";
    pub const HEADER_RIGHT: &str = "409624 YA02";
    pub const BOXED: &str = "Γ ALLT SO M DE ┐\n  OM DET V A R   \n└ SKUL L E AN N  ┘";
    pub const MAIN: &str = "ALLT SOM OM DET VAR\nSKULLE LÄMNA SJÖNG DET\nDET BERODDE PÅ SANNIN\nOM DET VAR EN LÖGN\nDEM";
    pub const TITLE: &str = "UTELÄMNANDE";
    pub const SMALL: &str = "SANT.\nDU FANNS\nTROTS ATT\nDET SAKNAR\nDET.";
    pub const FOOTER: &str = "A O V X";
    pub const BUTTON: &str = "VARNING";
}

/// Palette + layout, the renderer's whole configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PosterConfig {
    pub palette: Palette,
    pub layout: Layout,
}
