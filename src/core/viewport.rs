use crate::{
    core::{
        constants::{DEFAULT_ZOOM, DEFAULT_ZOOM_DELTA, MAX_LEVEL_OF_DETAIL, MIN_LEVEL_OF_DETAIL},
        geo::{GeoPoint, PixelCoord},
        projection::{
            clip, lat_long_to_pixel_xy, lat_long_to_unit_xy, map_size, unit_xy_to_lat_long,
        },
    },
    Result,
};
use serde::Serialize;

/// Manages the current view of the map: center and zoom level.
///
/// Both values are kept inside their valid ranges by every setter, so the
/// tile resolver can read them without re-checking. The pixel size of the
/// view belongs to the scene and is not stored here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    center: GeoPoint,
    /// The current level of detail
    zoom: u8,
    /// The maximum allowed level of detail
    max_zoom: u8,
}

impl Viewport {
    /// Creates a new viewport, clamping the zoom to `1..=23`
    pub fn new(center: GeoPoint, zoom: i32) -> Self {
        let mut viewport = Self {
            center,
            zoom: MIN_LEVEL_OF_DETAIL,
            max_zoom: MAX_LEVEL_OF_DETAIL,
        };
        viewport.set_zoom(zoom);
        viewport
    }

    /// Lowers the zoom ceiling (e.g. to a tile provider's deepest level)
    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom.clamp(MIN_LEVEL_OF_DETAIL, MAX_LEVEL_OF_DETAIL);
        self.zoom = self.zoom.min(self.max_zoom);
        self
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }

    /// Sets the center of the viewport, clipping it to the projectable range
    pub fn set_center(&mut self, lat: f64, lng: f64) {
        self.center = GeoPoint::new(lat, lng);
    }

    pub fn pan_to(&mut self, center: GeoPoint) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to `1..=max_zoom`
    pub fn set_zoom(&mut self, zoom: i32) {
        self.zoom = zoom.clamp(MIN_LEVEL_OF_DETAIL as i32, self.max_zoom as i32) as u8;
    }

    /// Steps one level in; returns whether the zoom changed
    pub fn zoom_in(&mut self) -> bool {
        let previous = self.zoom;
        self.set_zoom(previous as i32 + DEFAULT_ZOOM_DELTA as i32);
        self.zoom != previous
    }

    /// Steps one level out; returns whether the zoom changed
    pub fn zoom_out(&mut self) -> bool {
        let previous = self.zoom;
        self.set_zoom(previous as i32 - DEFAULT_ZOOM_DELTA as i32);
        self.zoom != previous
    }

    /// Center of the view in map pixels at the current zoom
    pub fn center_pixel(&self) -> Result<PixelCoord> {
        lat_long_to_pixel_xy(self.center.lat(), self.center.lng(), self.zoom)
    }

    /// Moves the center by a screen offset in pixels (positive `dx` pans east,
    /// positive `dy` pans south). The result stays on the map.
    ///
    /// The offset is applied to the unrounded position of the center, so a
    /// pan and its reverse land back where they started.
    pub fn pan_by_pixels(&mut self, dx: i64, dy: i64) -> Result<()> {
        if dx == 0 && dy == 0 {
            return Ok(());
        }

        let size = map_size(self.zoom)? as f64;
        let (x, y) = lat_long_to_unit_xy(self.center.lat(), self.center.lng());

        let x = clip(x * size + dx as f64, 0.0, size) / size;
        let y = clip(y * size + dy as f64, 0.0, size) / size;

        self.center = unit_xy_to_lat_long(x, y);
        Ok(())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(GeoPoint::default(), DEFAULT_ZOOM as i32)
    }
}
