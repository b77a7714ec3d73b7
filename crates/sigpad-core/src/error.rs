//! Error type shared by the core and editor crates.

use thiserror::Error;

/// Everything that can go wrong while configuring or encoding the surface.
///
/// Input errors (`InvalidColor`, `InvalidStrokeWidth`, `UnknownBrush`) leave
/// the configuration untouched. Codec errors are reported to the user as an
/// error notice by the editor.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid stroke width `{0}`")]
    InvalidStrokeWidth(String),

    #[error("unknown brush `{0}`")]
    UnknownBrush(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration is not valid JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("failed to decode PNG: {0}")]
    Decode(#[source] image::ImageError),
}

pub type Result<T, E = SurfaceError> = std::result::Result<T, E>;
