//! Error types for materialization, export and configuration.
//!
//! Rejected gestures (too-small selections, a second drag, drops outside any
//! zone) are not errors and never show up here; those operations report
//! `false`/`None` instead.

use thiserror::Error;

/// Errors produced by a rasterizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RasterError {
    /// The rasterizer completed without producing pixels
    #[error("rasterization produced no data")]
    NoData,

    /// The rasterizer failed outright
    #[error("rasterization failed: {0}")]
    Failed(String),
}

/// Errors that can occur while materializing a cutout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// The rasterized frame does not cover the selected region
    #[error("selection {x},{y} {width}x{height} lies outside the rasterized frame")]
    OutOfFrame {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    /// The cutout was deleted before its pixels arrived
    #[error("cutout {0} no longer exists")]
    CutoutGone(String),
}

/// Errors that can occur while flattening or writing an export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// The composition region does not overlap the rasterized frame
    #[error("composition region lies outside the rasterized frame")]
    OutOfFrame,

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not persist export: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Errors that can occur while loading or saving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// No platform config directory is available
    #[error("no config directory available")]
    NoConfigDir,
}

/// Errors returned by a collection source.
#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("collection {0} not found")]
    NotFound(String),

    /// Transport-level failure reported by the source implementation
    #[error("{0}")]
    Source(String),
}

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

impl From<String> for RasterError {
    fn from(s: String) -> Self {
        RasterError::Failed(s)
    }
}

impl From<&str> for RasterError {
    fn from(s: &str) -> Self {
        RasterError::Failed(s.to_string())
    }
}
