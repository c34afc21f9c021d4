mod common;
mod params;
mod wind;

pub use common::{Effect, EffectClock, Glyph, GlyphContext, GlyphOffset};
pub use params::{ParamsError, WindParams};
pub use wind::WindEffect;
