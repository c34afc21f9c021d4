use crate::noise::NoiseKind;
use serde::{Deserialize, Deserializer, Serialize};

const DEFAULT_FACTOR: f32 = 1.0;
const UNLIMITED_DURATION: f32 = -1.0;

/// Largest magnitude a factor can have before offsets risk overflowing
const MAX_FACTOR: f32 = 1e6;

/// The order in which markup tokens are read
const TOKEN_NAMES: [&str; 5] = ["distance_x", "distance_y", "spacing", "intensity", "duration"];

/// Parameters for the wind effect
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindParams {
    /// How much of their line height glyphs move horizontally
    pub distance_x: f32,

    /// How much of their line height glyphs move vertically
    pub distance_y: f32,

    /// How much space there is between waves
    pub spacing: f32,

    /// How strong the wind is
    pub intensity: f32,

    /// How long the effect lasts in seconds, `None` meaning forever
    #[serde(deserialize_with = "deserialize_duration")]
    pub duration: Option<f32>,

    /// The noise used to move glyphs around
    pub noise: NoiseKind,
}

impl Default for WindParams {
    fn default() -> Self {
        Self {
            distance_x: DEFAULT_FACTOR,
            distance_y: DEFAULT_FACTOR,
            spacing: DEFAULT_FACTOR,
            intensity: DEFAULT_FACTOR,
            duration: None,
            noise: NoiseKind::default(),
        }
    }
}

impl WindParams {
    /// Build parameters out of markup tokens.
    ///
    /// Tokens are read in order as distance x, distance y, spacing, intensity and duration. Any
    /// missing or malformed token falls back to its default.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        if tokens.len() > TOKEN_NAMES.len() {
            log::debug!("ignoring {} extra wind parameter(s)", tokens.len() - TOKEN_NAMES.len());
        }
        let mut values = [DEFAULT_FACTOR, DEFAULT_FACTOR, DEFAULT_FACTOR, DEFAULT_FACTOR, UNLIMITED_DURATION];
        for ((value, name), token) in values.iter_mut().zip(TOKEN_NAMES).zip(tokens) {
            *value = token_as_float(name, token.as_ref(), *value);
        }
        let [distance_x, distance_y, spacing, intensity, duration] = values;
        Self {
            distance_x,
            distance_y,
            spacing,
            intensity,
            duration: limited_duration(duration),
            noise: NoiseKind::default(),
        }
    }

    /// Parse the `;` separated form used in markup tags, e.g. `1;0.5;2`
    pub fn from_markup(markup: &str) -> Self {
        let tokens: Vec<&str> = if markup.trim().is_empty() { Vec::new() } else { markup.split(';').collect() };
        Self::from_tokens(&tokens)
    }

    /// Make sure these parameters can't produce infinite or NaN offsets
    pub fn validate(&self) -> Result<(), ParamsError> {
        for (name, value) in [
            ("distance_x", self.distance_x),
            ("distance_y", self.distance_y),
            ("spacing", self.spacing),
            ("intensity", self.intensity),
        ] {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite(name, value));
            }
            if value.abs() > MAX_FACTOR {
                return Err(ParamsError::OutOfRange(name, value));
            }
        }
        if let Some(duration) = self.duration {
            if !duration.is_finite() {
                return Err(ParamsError::NotFinite("duration", duration));
            }
        }
        if self.intensity == 0.0 {
            return Err(ParamsError::Zero("intensity"));
        }
        // The noise cursors only ever move forward
        if self.intensity < 0.0 {
            return Err(ParamsError::NotPositive("intensity", self.intensity));
        }
        if self.spacing == 0.0 {
            return Err(ParamsError::Zero("spacing"));
        }
        Ok(())
    }
}

fn token_as_float(name: &str, token: &str, default: f32) -> f32 {
    let token = token.trim();
    if token.is_empty() {
        log::debug!("empty wind {name}, using {default}");
        return default;
    }
    match token.parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            log::warn!("invalid wind {name} '{token}', using {default}");
            default
        }
    }
}

/// Any non positive duration means the effect never ends
fn limited_duration(duration: f32) -> Option<f32> {
    (duration > 0.0).then_some(duration)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let duration = Option::<f32>::deserialize(deserializer)?;
    Ok(duration.and_then(limited_duration))
}

/// Errors caused by wind parameters that can't be animated
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParamsError {
    #[error("wind {0} can't be zero")]
    Zero(&'static str),

    #[error("wind {0} must be finite, got {1}")]
    NotFinite(&'static str, f32),

    #[error("wind {0} must be positive, got {1}")]
    NotPositive(&'static str, f32),

    #[error("wind {0} must be within [-1e6, 1e6], got {1}")]
    OutOfRange(&'static str, f32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_without_tokens() {
        let params = WindParams::from_tokens::<&str>(&[]);
        assert_eq!(params, WindParams::default());
        assert_eq!(params.duration, None);
    }

    #[test]
    fn all_tokens() {
        let params = WindParams::from_tokens(&["2", "0.5", "3", "1.5", "4"]);
        assert_eq!(params.distance_x, 2.0);
        assert_eq!(params.distance_y, 0.5);
        assert_eq!(params.spacing, 3.0);
        assert_eq!(params.intensity, 1.5);
        assert_eq!(params.duration, Some(4.0));
    }

    #[rstest]
    #[case::garbage("wind")]
    #[case::empty("")]
    #[case::nan("NaN")]
    #[case::infinite("inf")]
    fn malformed_tokens_use_defaults(#[case] token: &str) {
        let params = WindParams::from_tokens(&[token, "2", token, token, token]);
        assert_eq!(params.distance_x, 1.0);
        assert_eq!(params.distance_y, 2.0);
        assert_eq!(params.spacing, 1.0);
        assert_eq!(params.intensity, 1.0);
        assert_eq!(params.duration, None);
    }

    #[test]
    fn extra_tokens_ignored() {
        let params = WindParams::from_tokens(&["1", "1", "1", "1", "-1", "9"]);
        assert_eq!(params, WindParams::default());
    }

    #[rstest]
    #[case::unlimited("-1", None)]
    #[case::zero("0", None)]
    #[case::limited("2.5", Some(2.5))]
    fn durations(#[case] token: &str, #[case] expected: Option<f32>) {
        let params = WindParams::from_tokens(&["1", "1", "1", "1", token]);
        assert_eq!(params.duration, expected);
    }

    #[test]
    fn markup() {
        let params = WindParams::from_markup(" -1 ;2;;0.5");
        assert_eq!(params.distance_x, -1.0);
        assert_eq!(params.distance_y, 2.0);
        assert_eq!(params.spacing, 1.0);
        assert_eq!(params.intensity, 0.5);
        assert_eq!(WindParams::from_markup(""), WindParams::default());
    }

    #[rstest]
    #[case::zero_intensity(WindParams { intensity: 0.0, ..Default::default() }, ParamsError::Zero("intensity"))]
    #[case::zero_spacing(WindParams { spacing: 0.0, ..Default::default() }, ParamsError::Zero("spacing"))]
    #[case::infinite_distance(
        WindParams { distance_y: f32::INFINITY, ..Default::default() },
        ParamsError::NotFinite("distance_y", f32::INFINITY)
    )]
    #[case::negative_intensity(
        WindParams { intensity: -1.0, ..Default::default() },
        ParamsError::NotPositive("intensity", -1.0)
    )]
    #[case::huge_spacing(
        WindParams { spacing: 1e38, ..Default::default() },
        ParamsError::OutOfRange("spacing", 1e38)
    )]
    #[case::huge_distance(
        WindParams { distance_x: -3e38, ..Default::default() },
        ParamsError::OutOfRange("distance_x", -3e38)
    )]
    fn degenerate(#[case] params: WindParams, #[case] expected: ParamsError) {
        assert_eq!(params.validate(), Err(expected));
    }

    #[test]
    fn largest_factors_accepted() {
        let params =
            WindParams { distance_x: -1e6, distance_y: 1e6, spacing: 1e6, intensity: 1e6, ..Default::default() };
        assert_eq!(params.validate(), Ok(()));
    }

    #[test]
    fn nan_rejected() {
        let params = WindParams { intensity: f32::NAN, ..Default::default() };
        assert!(matches!(params.validate(), Err(ParamsError::NotFinite("intensity", _))));
    }

    #[test]
    fn deserialize() {
        let params: WindParams =
            serde_yaml::from_str("distance_x: -2\nduration: -1\nnoise: quartic").expect("invalid yaml");
        assert_eq!(params.distance_x, -2.0);
        assert_eq!(params.distance_y, 1.0);
        assert_eq!(params.duration, None);
        assert_eq!(params.noise, NoiseKind::Quartic);

        let params: WindParams = serde_yaml::from_str("duration: 3").expect("invalid yaml");
        assert_eq!(params.duration, Some(3.0));
    }
}
