use anyhow::Context;
use clap::{Parser, ValueEnum};
use glyph_wind::{
    NoiseKind, WindEffect, WindParams,
    config::SampleConfig,
    sample::{FrameSample, sample_frames},
};
use itertools::Itertools;
use std::{io, path::PathBuf};

/// Samples the offsets the wind effect applies to the glyphs of a text
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A YAML file to load the configuration from
    #[arg(short, long, env = "GLYPH_WIND_CONFIG")]
    config: Option<PathBuf>,

    /// The text to animate
    #[arg(short, long)]
    text: Option<String>,

    /// Wind parameters in markup form: distance x;distance y;spacing;intensity;duration
    #[arg(short, long)]
    params: Option<String>,

    /// The noise used to move glyphs
    #[arg(long, value_enum)]
    noise: Option<NoiseKind>,

    /// Line height in pixels
    #[arg(long)]
    line_height: Option<f32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<f32>,

    /// Number of frames to sample
    #[arg(short, long)]
    frames: Option<usize>,

    /// How to print the samples
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn load_config(cli: &Cli) -> anyhow::Result<SampleConfig> {
    let mut config = match &cli.config {
        Some(path) => SampleConfig::load(path).with_context(|| format!("loading config from {}", path.display()))?,
        None => SampleConfig::default(),
    };
    if let Some(text) = &cli.text {
        config.text = text.clone();
    }
    if let Some(params) = &cli.params {
        let noise = config.wind.noise;
        config.wind = WindParams { noise, ..WindParams::from_markup(params) };
    }
    if let Some(noise) = cli.noise {
        config.wind.noise = noise;
    }
    if let Some(line_height) = cli.line_height {
        config.line_height = line_height;
    }
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    if let Some(frames) = cli.frames {
        config.frames = frames;
    }
    Ok(config)
}

fn print_table(frames: &[FrameSample]) {
    for frame in frames {
        let glyphs = frame.glyphs.iter().map(|g| format!("{}({:+.2},{:+.2})", g.ch, g.dx, g.dy)).join(" ");
        println!("{:>4} {:>7.3}s  {glyphs}", frame.frame, frame.time);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    log::info!("sampling {} frame(s) of '{}' at {} fps", config.frames, config.text, config.fps);

    let mut effect = WindEffect::new(config.wind.clone()).context("invalid wind parameters")?;
    let frames = sample_frames(&mut effect, &config.sample_settings())?;
    match cli.format {
        OutputFormat::Table => print_table(&frames),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(io::stdout().lock(), &frames).context("writing samples")?;
            println!();
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("[glyph-wind] error: {e:#}");
        std::process::exit(1);
    }
}
