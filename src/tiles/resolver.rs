//! Works out which tiles cover a viewport.
//!
//! The pixel box around the view center is clipped to the map before it is
//! turned into tile indices, so a viewport larger than the whole map at a low
//! zoom never asks for a tile outside `0..2^zoom`.

use crate::{
    core::{
        geo::{PixelCoord, QuadKey, TileIndex},
        projection::{map_size, pixel_xy_to_tile_xy, tile_count, tile_xy_to_quadkey},
        viewport::Viewport,
    },
    Result,
};
use std::collections::BTreeSet;

/// Inclusive rectangle of tiles at one zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min: TileIndex,
    pub max: TileIndex,
    pub zoom: u8,
}

impl TileRange {
    /// Number of tiles in the range
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let columns = (self.max.x - self.min.x) as usize + 1;
        let rows = (self.max.y - self.min.y) as usize + 1;
        columns * rows
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn contains(&self, tile: TileIndex) -> bool {
        (self.min.x..=self.max.x).contains(&tile.x) && (self.min.y..=self.max.y).contains(&tile.y)
    }

    /// Tiles of the range in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = TileIndex> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| TileIndex::new(x, y)))
    }
}

/// Tile rectangle covering a `width`×`height` pixel view centred on the
/// viewport's center.
pub fn visible_tile_range(viewport: &Viewport, width: u32, height: u32) -> Result<TileRange> {
    let zoom = viewport.zoom();
    let size = map_size(zoom)? as i64;
    let last_tile = tile_count(zoom)? - 1;
    let center = viewport.center_pixel()?;

    let half_width = (width / 2) as i64;
    let half_height = (height / 2) as i64;

    let clip_pixel = |x: i64, y: i64| {
        PixelCoord::new(x.clamp(0, size - 1) as u32, y.clamp(0, size - 1) as u32)
    };

    let top_left = clip_pixel(center.x as i64 - half_width, center.y as i64 - half_height);
    let bottom_right = clip_pixel(center.x as i64 + half_width, center.y as i64 + half_height);

    let min = pixel_xy_to_tile_xy(top_left);
    let max = pixel_xy_to_tile_xy(bottom_right);

    Ok(TileRange {
        min: TileIndex::new(min.x.min(last_tile), min.y.min(last_tile)),
        max: TileIndex::new(max.x.min(last_tile), max.y.min(last_tile)),
        zoom,
    })
}

/// Quadkeys of every tile that must be displayed for the given view.
pub fn resolve_visible_tiles(
    viewport: &Viewport,
    viewport_pixel_width: u32,
    viewport_pixel_height: u32,
) -> Result<BTreeSet<QuadKey>> {
    let range = visible_tile_range(viewport, viewport_pixel_width, viewport_pixel_height)?;
    range
        .tiles()
        .map(|tile| tile_xy_to_quadkey(tile.x, tile.y, range.zoom))
        .collect()
}
