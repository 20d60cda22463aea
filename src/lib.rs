//! # quadmap
//!
//! Slippy-map tile selection for maps drawn inside a 3D scene.
//!
//! The crate converts geographic coordinates into the Bing Maps quadkey tile
//! scheme, works out which tiles cover a viewport, and keeps a host scene in
//! step with that set by issuing add/remove calls through the [`TileScene`]
//! trait. Rendering, windowing and imagery loading stay with the host.

pub mod core;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod tiles;
pub mod traits;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{GeoPoint, PixelCoord, QuadKey, TileIndex},
    map::Map,
    viewport::Viewport,
};

pub use crate::layers::tile::{SyncReport, SyncState, TileLayer};

pub use crate::input::events::InputEvent;

pub use crate::tiles::{
    resolver::{resolve_visible_tiles, TileRange},
    source::{BingTileSource, TileSource},
};

pub use crate::traits::{DrawableHandle, TileScene};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid quadkey: {0}")]
    InvalidQuadKey(String),

    #[error("Scene error: {0}")]
    Scene(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
