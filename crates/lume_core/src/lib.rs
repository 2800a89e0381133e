//! Lume core - scene description for the Lume ray tracer.
//!
//! This crate provides:
//!
//! - **Scene files**: a JSON description of camera, render settings,
//!   named materials, shapes and lights
//! - **Validation**: building a description into renderer types, with
//!   errors that name the failing shape or light
//! - **Sample scene**: the built-in demo used when no file is given
//!
//! # Example
//!
//! ```ignore
//! use lume_core::load_scene;
//! use lume_renderer::Raytracer;
//!
//! let loaded = load_scene("scene.json")?.build()?;
//! let image = Raytracer::new(&loaded.camera, loaded.config)?.draw(&loaded.scene);
//! ```

pub mod description;
pub mod error;
pub mod loader;
pub mod sample;

// Re-export commonly used types
pub use description::{
    CameraDescription, LightDescription, MaterialDescription, RenderSettings, RotationDescription,
    SceneDescription, ShapeDescription,
};
pub use error::{SceneError, SceneResult};
pub use loader::{load_scene, load_scene_from_str, LoadedScene};
pub use sample::sample_scene;
