//! Boundary between the tile engine and the host renderer.

use crate::{core::geo::QuadKey, Result};
use serde::{Deserialize, Serialize};

/// Opaque identifier the host hands back for a drawable it created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableHandle(pub u64);

/// Scene collaborator driven by [`TileLayer`](crate::layers::tile::TileLayer).
///
/// The layer guarantees that `add_tile` is never called twice for the same
/// key without a `remove_tile` in between, and that `remove_tile` is only
/// called for keys whose `add_tile` succeeded.
pub trait TileScene {
    /// Current size of the rendered view in pixels, `(width, height)`
    fn viewport_pixel_extent(&self) -> (u32, u32);

    /// Build and attach the drawable for a tile (geometry plus imagery or a
    /// placeholder).
    fn add_tile(&mut self, key: &QuadKey) -> Result<DrawableHandle>;

    /// Detach and destroy the drawable previously added for `key`.
    fn remove_tile(&mut self, key: &QuadKey) -> Result<()>;
}
