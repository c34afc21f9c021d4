use crate::effects::{Effect, Glyph, GlyphContext};
use serde::Serialize;

/// How to drive an effect while sampling it
#[derive(Debug, Clone)]
pub struct SampleSettings {
    /// The text whose glyphs are animated
    pub text: String,
    /// Line height in pixels
    pub line_height: f32,
    /// Frames per second
    pub fps: f32,
    /// Number of frames to sample
    pub frames: usize,
}

/// The offsets of every glyph in a single frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSample {
    pub frame: usize,
    /// Seconds elapsed at the end of this frame
    pub time: f32,
    pub glyphs: Vec<GlyphSample>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlyphSample {
    pub index: usize,
    pub ch: char,
    pub dx: f32,
    pub dy: f32,
}

/// Run an effect over the glyphs of a text, recording the offsets it produces every frame.
///
/// Whitespace isn't animated and doesn't count towards glyph indexes. Sampling stops early if the
/// effect finishes.
pub fn sample_frames(effect: &mut dyn Effect, settings: &SampleSettings) -> Result<Vec<FrameSample>, SampleError> {
    if !settings.fps.is_finite() || settings.fps <= 0.0 {
        return Err(SampleError::InvalidFps(settings.fps));
    }
    if !settings.line_height.is_finite() {
        return Err(SampleError::InvalidLineHeight(settings.line_height));
    }
    let delta = 1.0 / settings.fps;
    let glyphs: Vec<char> = settings.text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut frames = Vec::with_capacity(settings.frames);
    let mut time = 0.0;
    for frame in 0..settings.frames {
        effect.update(delta);
        time += delta;
        if effect.is_finished() {
            log::debug!("effect finished after {frame} frame(s)");
            break;
        }

        let glyphs = glyphs
            .iter()
            .enumerate()
            .map(|(index, ch)| {
                let mut glyph = Glyph::new(*ch);
                let ctx = GlyphContext { local_index: index, delta, line_height: settings.line_height };
                effect.apply(&mut glyph, &ctx);
                GlyphSample { index, ch: *ch, dx: glyph.x_offset, dy: glyph.y_offset }
            })
            .collect();
        frames.push(FrameSample { frame, time, glyphs });
    }
    Ok(frames)
}

/// Errors that can occur when sampling an effect
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SampleError {
    #[error("frames per second must be positive, got {0}")]
    InvalidFps(f32),

    #[error("line height must be finite, got {0}")]
    InvalidLineHeight(f32),
}
