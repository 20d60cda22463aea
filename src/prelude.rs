//! Prelude module for common quadmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quadmap::prelude::*;`

pub use crate::core::{
    config::MapConfig,
    geo::{GeoPoint, PixelCoord, QuadKey, TileIndex},
    map::Map,
    projection::{
        clip, ground_resolution, lat_long_to_pixel_xy, map_scale, map_size, pixel_xy_to_lat_long,
        pixel_xy_to_tile_xy, quadkey_to_tile_xy, tile_xy_to_pixel_xy, tile_xy_to_quadkey,
    },
    viewport::Viewport,
};

pub use crate::input::events::{EventHandled, InputEvent};

pub use crate::layers::tile::{
    diff_tile_sets, SyncReport, SyncState, TileAction, TileDiff, TileFailure, TileLayer,
};

pub use crate::tiles::{
    resolver::{resolve_visible_tiles, visible_tile_range, TileRange},
    source::{BingImagery, BingTileSource, TileSource},
};

pub use crate::traits::{DrawableHandle, TileScene};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet, FxHasher};
