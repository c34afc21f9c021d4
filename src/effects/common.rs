use std::ops::AddAssign;

/// Fraction of an effect's duration after which it starts fading out
const FADEOUT_SPLIT: f32 = 0.25;

/// A single rendered character and the offsets every active effect contributes to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    /// The character being rendered
    pub ch: char,
    /// Horizontal offset in pixels
    pub x_offset: f32,
    /// Vertical offset in pixels
    pub y_offset: f32,
}

impl Glyph {
    pub fn new(ch: char) -> Self {
        Self { ch, x_offset: 0.0, y_offset: 0.0 }
    }
}

/// Context passed to effects for every glyph they're applied to
#[derive(Debug, Clone)]
pub struct GlyphContext {
    /// Glyph index within the run of glyphs the effect applies to
    pub local_index: usize,
    /// Seconds since the previous frame
    pub delta: f32,
    /// Height of the glyph's line in pixels
    pub line_height: f32,
}

/// An offset an effect contributes to a glyph
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphOffset {
    pub dx: f32,
    pub dy: f32,
}

impl GlyphOffset {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

impl AddAssign<GlyphOffset> for Glyph {
    fn add_assign(&mut self, offset: GlyphOffset) {
        self.x_offset += offset.dx;
        self.y_offset += offset.dy;
    }
}

/// Trait for per-glyph effects
pub trait Effect {
    /// Advance the effect by `delta` seconds. Called once per frame, before any glyph is applied.
    fn update(&mut self, delta: f32);

    /// Add this effect's contribution to a glyph's offsets
    fn apply(&self, glyph: &mut Glyph, ctx: &GlyphContext);

    /// Whether the effect ran past its duration
    fn is_finished(&self) -> bool;
}

/// Keeps track of how long an effect has been running.
///
/// Effects own one of these and use it to ramp glyphs in and to fade themselves out near the end
/// of their duration.
#[derive(Debug, Clone, Default)]
pub struct EffectClock {
    total_time: f32,
    duration: Option<f32>,
}

impl EffectClock {
    /// Create a clock for an effect lasting `duration` seconds, or forever if `None`
    pub fn new(duration: Option<f32>) -> Self {
        Self { total_time: 0.0, duration }
    }

    pub fn advance(&mut self, delta: f32) {
        self.total_time += delta;
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// A 0 to 1 ramp over elapsed time.
    ///
    /// `modifier` stretches the ramp: it takes `modifier` seconds to go from 0 to 1. `offset`
    /// delays it, in units of the ramp's length.
    pub fn progress(&self, modifier: f32, offset: f32) -> f32 {
        (self.total_time / modifier - offset).clamp(0.0, 1.0)
    }

    /// A 1 to 0 envelope over the last 75% of the effect's duration
    pub fn fadeout(&self) -> f32 {
        let Some(duration) = self.duration else {
            return 1.0;
        };
        let progress = (self.total_time / duration).clamp(0.0, 1.0);
        if progress < FADEOUT_SPLIT {
            return 1.0;
        }
        let alpha = (progress - FADEOUT_SPLIT) / (1.0 - FADEOUT_SPLIT);
        1.0 - smoothstep(alpha)
    }

    pub fn is_finished(&self) -> bool {
        self.duration.is_some_and(|duration| self.total_time > duration)
    }
}

#[inline]
fn smoothstep(alpha: f32) -> f32 {
    alpha * alpha * (3.0 - 2.0 * alpha)
}
