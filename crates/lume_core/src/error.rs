//! Scene loading errors.

use lume_math::MathError;
use lume_renderer::{LightError, MaterialError, RenderError, ShapeError};
use thiserror::Error;

/// Errors that can occur while loading or building a scene.
///
/// Entity failures carry the position of the shape or light in the file
/// and its optional name, so the message points at the offending entry.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("material '{name}': {source}")]
    Material {
        name: String,
        #[source]
        source: MaterialError,
    },

    #[error("shape {}: unknown material '{material}'", label(.index, .name))]
    UnknownMaterial {
        index: usize,
        name: Option<String>,
        material: String,
    },

    #[error("shape {}: invalid rotation: {source}", label(.index, .name))]
    Rotation {
        index: usize,
        name: Option<String>,
        #[source]
        source: MathError,
    },

    #[error("shape {}: {source}", label(.index, .name))]
    Shape {
        index: usize,
        name: Option<String>,
        #[source]
        source: ShapeError,
    },

    #[error("light {}: {source}", label(.index, .name))]
    Light {
        index: usize,
        name: Option<String>,
        #[source]
        source: LightError,
    },

    #[error("render settings: {0}")]
    Render(#[from] RenderError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// `#3` or `#3 ("floor")`.
fn label(index: &usize, name: &Option<String>) -> String {
    match name {
        Some(name) => format!("#{index} (\"{name}\")"),
        None => format!("#{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entity() {
        let named = SceneError::Shape {
            index: 3,
            name: Some("floor".into()),
            source: ShapeError::NonConvexQuad,
        };
        assert!(named.to_string().starts_with("shape #3 (\"floor\"): "));

        let anonymous = SceneError::Light {
            index: 0,
            name: None,
            source: LightError::ZeroDirection,
        };
        assert_eq!(
            anonymous.to_string(),
            "light #0: directional light has a zero-length direction"
        );
    }
}
