//! A wind animation for the glyphs of rich-text labels.
//!
//! Glyph offsets are driven by a seeded 1D noise field sampled at a position that moves over time
//! and along the text, which makes glyphs billow like a flag.

pub mod config;
pub mod effects;
pub mod noise;
pub mod sample;

pub use effects::{Effect, Glyph, GlyphContext, GlyphOffset, WindEffect, WindParams};
pub use noise::{NoiseKind, noise1d};
