//! UTELÄMNANDE poster: a 600 × 900 composition rasterized in software.
//!
//! [`render::FrameRenderer`] redraws the whole poster into a [`types::FrameBuffer`]
//! from a [`types::FrameState`] (tick counter + pointer Y). Everything else is fixed
//! data in [`poster`], drawn with the shapes in [`raster`] and the bitmap text in [`font`].
//! Animated textures come from the deterministic value noise in [`noise`].
//!
//! The binary adds a minifb window ([`draw`]) and environment config ([`config`]).

pub mod config;
pub mod draw;
pub mod error;
pub mod font;
pub mod noise;
pub mod poster;
pub mod raster;
pub mod render;
pub mod types;
