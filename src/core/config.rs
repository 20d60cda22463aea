//! Configuration for a map instance
//!
//! `MapConfig` gathers the initial view, the zoom ceiling and the tile
//! source settings. Every field has a default, so a config file only needs
//! the values it changes.

use crate::{
    core::{
        constants::{DEFAULT_VIEWPORT_SIZE, DEFAULT_ZOOM, MAX_LEVEL_OF_DETAIL, MIN_LEVEL_OF_DETAIL},
        geo::GeoPoint,
        map::Map,
        viewport::Viewport,
    },
    tiles::source::BingTileSource,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: GeoPoint,
    pub zoom: u8,
    pub max_zoom: u8,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub tile_source: BingTileSource,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: GeoPoint::default(),
            zoom: DEFAULT_ZOOM,
            max_zoom: MAX_LEVEL_OF_DETAIL,
            viewport_width: DEFAULT_VIEWPORT_SIZE.0,
            viewport_height: DEFAULT_VIEWPORT_SIZE.1,
            tile_source: BingTileSource::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded map config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Rejects zoom settings outside `1..=23`. The initial zoom may exceed
    /// `max_zoom`; it is clamped when the viewport is built.
    pub fn validate(&self) -> Result<()> {
        let levels = MIN_LEVEL_OF_DETAIL..=MAX_LEVEL_OF_DETAIL;
        if !levels.contains(&self.max_zoom) {
            return Err(MapError::Config(format!(
                "max_zoom {} is outside {}..={}",
                self.max_zoom, MIN_LEVEL_OF_DETAIL, MAX_LEVEL_OF_DETAIL
            )));
        }
        if !levels.contains(&self.zoom) {
            return Err(MapError::Config(format!(
                "zoom {} is outside {}..={}",
                self.zoom, MIN_LEVEL_OF_DETAIL, MAX_LEVEL_OF_DETAIL
            )));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.center, self.zoom as i32).with_max_zoom(self.max_zoom)
    }

    pub fn build_map(&self) -> Result<Map> {
        self.validate()?;
        Ok(Map::new(self.viewport()))
    }
}
