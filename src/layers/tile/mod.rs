//! Tile layer: keeps the tiles attached to a scene in step with the viewport
//!
//! This module provides:
//! - Tile set diffing between passes
//! - Removal/addition through the scene collaborator
//! - Per-tile failure reporting

pub mod layer;
pub mod types;

pub use layer::TileLayer;
pub use types::{diff_tile_sets, SyncReport, SyncState, TileAction, TileDiff, TileFailure};
