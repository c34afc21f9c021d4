use super::common::{Effect, EffectClock, Glyph, GlyphContext, GlyphOffset};
use super::params::{ParamsError, WindParams};

const DEFAULT_SPACING: f32 = 10.0;
const DEFAULT_DISTANCE: f32 = 0.33;
const DEFAULT_INTENSITY: f32 = 0.375;
const DISTANCE_X_RATIO: f32 = 1.5;
const DISTANCE_Y_RATIO: f32 = 1.0;
const CURSOR_SPEED: f32 = 0.2;
const IDEAL_FRAME_TIME: f32 = 1.0 / 60.0;
const INDEX_SPREAD: f32 = 0.025;
const NOISE_SEED_X: i32 = -1234;
const NOISE_SEED_Y: i32 = 54321;

/// Wind effect - Moves glyphs around like a flag blowing in the wind
#[derive(Debug, Clone)]
pub struct WindEffect {
    params: WindParams,
    clock: EffectClock,
    cursor_x: f32,
    cursor_y: f32,
}

impl WindEffect {
    pub fn new(params: WindParams) -> Result<Self, ParamsError> {
        params.validate()?;
        log::debug!("creating wind effect with {params:?}");
        let clock = EffectClock::new(params.duration);
        Ok(Self { params, clock, cursor_x: 0.0, cursor_y: 0.0 })
    }

    /// Create the effect out of the tokens of a markup tag
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ParamsError> {
        Self::new(WindParams::from_tokens(tokens))
    }

    pub fn params(&self) -> &WindParams {
        &self.params
    }

    /// The current positions of the horizontal and vertical noise cursors
    pub fn cursors(&self) -> (f32, f32) {
        (self.cursor_x, self.cursor_y)
    }

    /// Move the noise cursors forward by `delta` seconds
    pub fn tick(&mut self, delta: f32) {
        let change = CURSOR_SPEED * self.params.intensity * DEFAULT_INTENSITY * delta * IDEAL_FRAME_TIME;
        self.cursor_x += change;
        self.cursor_y += change;
    }

    /// Compute the offset for the glyph at `local_index`.
    ///
    /// `progress` receives the ramp modifier and offset for this glyph and returns how far it has
    /// ramped in, `fadeout` returns the effect's current fade multiplier.
    pub fn compute_offset<P, F>(&self, local_index: usize, line_height: f32, progress: P, fadeout: F) -> GlyphOffset
    where
        P: FnOnce(f32, f32) -> f32,
        F: FnOnce() -> f32,
    {
        let WindParams { distance_x, distance_y, spacing, intensity, noise, .. } = self.params;
        let index = local_index as f32;

        let progress_modifier = (1.0 / intensity) * DEFAULT_INTENSITY;
        let normal_spacing = (1.0 / spacing) * DEFAULT_SPACING;
        let progress_offset = index / normal_spacing;
        let progress = progress(progress_modifier, progress_offset);

        let index_offset = index * INDEX_SPREAD * spacing;
        let noise_x = noise.sample(NOISE_SEED_X, self.cursor_x + index_offset);
        let noise_y = noise.sample(NOISE_SEED_Y, self.cursor_y + index_offset);

        let x = line_height * noise_x * progress * distance_x * DISTANCE_X_RATIO * DEFAULT_DISTANCE;
        let y = line_height * noise_y * progress * distance_y * DISTANCE_Y_RATIO * DEFAULT_DISTANCE;

        let fadeout = fadeout();
        let (x, y) = (x * fadeout, y * fadeout);

        // Glyphs always blow away from the anchor, like cloth, rather than jittering both ways
        let x = x.abs() * -sign(distance_x);
        GlyphOffset::new(x, y)
    }
}

impl Effect for WindEffect {
    fn update(&mut self, delta: f32) {
        self.clock.advance(delta);
        self.tick(delta);
    }

    fn apply(&self, glyph: &mut Glyph, ctx: &GlyphContext) {
        if self.clock.is_finished() {
            return;
        }
        let offset = self.compute_offset(
            ctx.local_index,
            ctx.line_height,
            |modifier, offset| self.clock.progress(modifier, offset),
            || self.clock.fadeout(),
        );
        *glyph += offset;
    }

    fn is_finished(&self) -> bool {
        self.clock.is_finished()
    }
}

/// Like `f32::signum` but zero for zero
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
