//! contourwave - animated contour-banded noise for LED matrices
//!
//! Renders the pattern headlessly to numbered PNG frames, optionally driven
//! by the bass of a WAV file.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contourwave::audio::SpectrumTrack;
use contourwave::cli::Args;
use contourwave::params::{ExcitationConfig, FFTConfig};
use contourwave::pattern::NoisePattern;
use contourwave::rendering::record;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let layout = args.layout().context("invalid matrix layout")?;
    let mut config = args.render_config();
    let recording = args.recording_config();

    let track = args
        .audio
        .as_deref()
        .map(|path| {
            SpectrumTrack::from_wav(path, &FFTConfig::default(), recording.fps)
                .with_context(|| format!("failed to analyze {}", path.display()))
        })
        .transpose()?;

    let mut pattern = NoisePattern::new(layout, &config, ExcitationConfig::default());
    let frames = record(&mut pattern, &mut config, &recording, track.as_ref())
        .context("recording failed")?;

    info!(frames, dir = %recording.frames_dir().display(), "done");
    Ok(())
}
