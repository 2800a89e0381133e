//! Lume - command-line ray tracer.
//!
//! Loads a JSON scene (or the built-in sample), renders it and writes a PNG.

mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lume_core::{load_scene, sample_scene};
use lume_renderer::Raytracer;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker thread pool")?;
    }

    let mut desc = match &args.scene {
        Some(path) => {
            log::info!("Loading scene {}", path.display());
            load_scene(path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => {
            log::info!("No scene given, rendering the sample scene");
            sample_scene()
        }
    };
    args.apply_overrides(&mut desc);

    let loaded = desc.build().context("Invalid scene")?;
    let tracer = Raytracer::new(&loaded.camera, loaded.config).context("Invalid render setup")?;
    log::info!(
        "Using {} threads, seed {}",
        rayon::current_num_threads(),
        tracer.config().seed
    );

    let start = Instant::now();
    let raster = tracer.draw(&loaded.scene);
    log::info!("Done in {:.2?}", start.elapsed());

    raster
        .to_rgb_image()
        .save_with_format(&args.output, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
