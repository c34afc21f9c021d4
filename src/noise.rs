use serde::{Deserialize, Serialize};

/// Mask applied to the seed of the second octave
const SECOND_OCTAVE_MASK: i32 = 0x5BD1_E995;

/// Domain warp for the second octave: the input is shifted and rescaled by the golden ratio
const SECOND_OCTAVE_SHIFT: f64 = 1.5;
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

const FIRST_OCTAVE_WEIGHT: f64 = 0.675;
const SECOND_OCTAVE_WEIGHT: f64 = 0.325;

/// 2^-22, maps a 23 bit integer onto [0, 2)
const UNIT_SCALE: f64 = 1.0 / (1u32 << 22) as f64;

/// 2^-24, the per-seed shift applied by the quartic noise
const QUARTIC_SEED_SHIFT: f32 = 1.0 / (1u32 << 24) as f32;

/// The noise function used to move glyphs around
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoiseKind {
    /// Two octaves of quintic-interpolated value noise, the second one domain warped.
    #[default]
    Quintic,

    /// Two calls of a quartic-curve noise at different frequencies.
    Quartic,
}

impl NoiseKind {
    /// Sample this noise for the given seed and position
    pub fn sample(self, seed: i32, value: f32) -> f32 {
        match self {
            Self::Quintic => noise1d(seed, value),
            Self::Quartic => quartic_octave_noise1d(seed, value),
        }
    }
}

/// Two-octave, quintic-interpolated 1D value noise.
///
/// Produces a smoothly changing value as `value` moves up or down while `seed` stays the same. The
/// result always lies strictly within (-1, 1) and its first derivative is continuous, including
/// across integer boundaries.
pub fn noise1d(seed: i32, value: f32) -> f32 {
    let x = f64::from(value);
    let first = value_noise(seed, x);
    let second = value_noise(seed ^ SECOND_OCTAVE_MASK, (x + SECOND_OCTAVE_SHIFT) * GOLDEN_RATIO);
    // Blending happens in f64 and is rounded once, so the result never lands on +/-1.
    (FIRST_OCTAVE_WEIGHT * first + SECOND_OCTAVE_WEIGHT * second) as f32
}

/// A single octave: interpolates the hashes of the lattice points around `x`.
fn value_noise(seed: i32, x: f64) -> f64 {
    let floor = x.floor();
    let cell = seed.wrapping_add(floor as i32);
    let start = hash_to_unit(cell);
    let end = hash_to_unit(cell.wrapping_add(1));
    lerp(start, end, quintic(x - floor))
}

/// Maps any integer onto a reproducible value strictly inside (-1, 1).
fn hash_to_unit(n: i32) -> f64 {
    let mut h = (n as u32) ^ 0x27D4_EB2F;
    h = h.wrapping_mul(0x9E37_79B9);
    h ^= h.rotate_right(15);
    h = h.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    (f64::from(h >> 9) + 0.5) * UNIT_SCALE - 1.0
}

#[inline]
fn quintic(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quilez-style 1D noise using a quartic curve.
///
/// Every unit interval holds a single bump whose height is derived from the seed and whose sign
/// alternates every unit. Returns a value in [-1, 1].
pub fn quartic_noise1d(seed: i32, value: f32) -> f32 {
    let x = value + seed as f32 * QUARTIC_SEED_SHIFT;
    let x_floor = x.floor() as i32;
    let rise = 1 - ((x + x).floor() as i32 & 2);
    let t = x - x_floor as f32;

    let mixed = (i64::from(seed.wrapping_add(x_floor)) as u64 ^ 0x9E37_79B9_7F4A_7C15)
        .wrapping_mul(0xD1B5_4A32_D192_ED03)
        >> 41;
    // Exponent bits fix the float in [32, 64), so the height ends up in [-16, 16)
    let height = f32::from_bits(mixed as u32 | 0x4200_0000) - 48.0;

    let bump = t * (t - 1.0);
    rise as f32 * bump * bump * height
}

/// Two calls of [quartic_noise1d] at different frequencies, still within [-1, 1].
pub fn quartic_octave_noise1d(seed: i32, value: f32) -> f32 {
    (quartic_noise1d(seed, value) * 2.0 + quartic_noise1d(!seed, value * 1.9)) * (1.0 / 3.0)
}
