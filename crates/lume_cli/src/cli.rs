use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lume_core::SceneDescription;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lume")]
#[command(about = "Render a scene with the Lume ray tracer")]
pub struct Args {
    /// Scene description (JSON); renders the built-in sample scene if omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Override the image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Override the image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Override the maximum reflection depth
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Override the number of shadow rays per light
    #[arg(long)]
    pub shadow_rays: Option<u32>,

    /// Override the jitter seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply the command-line overrides to a loaded description.
    pub fn apply_overrides(&self, desc: &mut SceneDescription) {
        if let Some(width) = self.width {
            desc.camera.width = width;
        }
        if let Some(height) = self.height {
            desc.camera.height = height;
        }
        if self.max_depth.is_some() {
            desc.render.max_depth = self.max_depth;
        }
        if self.shadow_rays.is_some() {
            desc.render.num_shadow_rays = self.shadow_rays;
        }
        if self.seed.is_some() {
            desc.render.seed = self.seed;
        }
    }
}
