use crate::{effects::WindParams, sample::SampleSettings};
use serde::Deserialize;
use std::{fs, path::Path};

const DEFAULT_TEXT: &str = "Windswept";
const DEFAULT_LINE_HEIGHT: f32 = 20.0;
const DEFAULT_FPS: f32 = 60.0;
const DEFAULT_FRAMES: usize = 120;

/// Configuration for sampling the wind effect
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SampleConfig {
    /// The text to animate
    pub text: String,

    /// Line height in pixels
    pub line_height: f32,

    /// Frames per second
    pub fps: f32,

    /// Number of frames to sample
    pub frames: usize,

    /// The wind effect parameters
    pub wind: WindParams,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.into(),
            line_height: DEFAULT_LINE_HEIGHT,
            fps: DEFAULT_FPS,
            frames: DEFAULT_FRAMES,
            wind: WindParams::default(),
        }
    }
}

impl SampleConfig {
    /// Load a config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, default, config
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn sample_settings(&self) -> SampleSettings {
        SampleSettings { text: self.text.clone(), line_height: self.line_height, fps: self.fps, frames: self.frames }
    }
}

/// An error when loading configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseKind;
    use std::io::Write;

    #[test]
    fn empty_is_default() {
        let config = SampleConfig::parse("").expect("parse failed");
        assert_eq!(config.text, "Windswept");
        assert_eq!(config.frames, 120);
        assert_eq!(config.wind, WindParams::default());
    }

    #[test]
    fn full() {
        let contents = r#"
text: "Flag"
line_height: 32
fps: 30
frames: 4
wind:
  distance_x: -1.5
  spacing: 2
  noise: quartic
  duration: 5
"#;
        let config = SampleConfig::parse(contents).expect("parse failed");
        assert_eq!(config.text, "Flag");
        assert_eq!(config.line_height, 32.0);
        assert_eq!(config.fps, 30.0);
        assert_eq!(config.frames, 4);
        assert_eq!(config.wind.distance_x, -1.5);
        assert_eq!(config.wind.distance_y, 1.0);
        assert_eq!(config.wind.spacing, 2.0);
        assert_eq!(config.wind.noise, NoiseKind::Quartic);
        assert_eq!(config.wind.duration, Some(5.0));

        let settings = config.sample_settings();
        assert_eq!(settings.text, "Flag");
        assert_eq!(settings.frames, 4);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result = SampleConfig::parse("wind:\n  gusts: 3");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "text: hello\nframes: 2").expect("write failed");
        let config = SampleConfig::load(file.path()).expect("load failed");
        assert_eq!(config.text, "hello");
        assert_eq!(config.frames, 2);
    }

    #[test]
    fn missing_file() {
        let result = SampleConfig::load(Path::new("/this/path/does/not/exist.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
