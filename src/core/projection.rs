//! Spherical Mercator math of the Bing Maps tile system.
//!
//! Every function here is pure: geographic input is clipped instead of
//! rejected, and only an unusable level of detail produces an error.

use crate::{
    core::{
        constants::{
            EARTH_RADIUS, MAX_LATITUDE, MAX_LEVEL_OF_DETAIL, MAX_LONGITUDE, METERS_PER_INCH,
            MIN_LATITUDE, MIN_LEVEL_OF_DETAIL, MIN_LONGITUDE, TILE_SIZE,
        },
        geo::{GeoPoint, PixelCoord, QuadKey, TileIndex},
    },
    MapError, Result,
};
use std::f64::consts::PI;

/// Clips a number to the specified minimum and maximum values.
#[inline]
pub fn clip(n: f64, min_value: f64, max_value: f64) -> f64 {
    n.max(min_value).min(max_value)
}

fn check_level_of_detail(level_of_detail: u8) -> Result<()> {
    if !(MIN_LEVEL_OF_DETAIL..=MAX_LEVEL_OF_DETAIL).contains(&level_of_detail) {
        return Err(MapError::InvalidArgument(format!(
            "level of detail {} is outside {}..={}",
            level_of_detail, MIN_LEVEL_OF_DETAIL, MAX_LEVEL_OF_DETAIL
        )));
    }
    Ok(())
}

/// Width and height of the whole map in pixels: `256 * 2^level`.
pub fn map_size(level_of_detail: u8) -> Result<u32> {
    check_level_of_detail(level_of_detail)?;
    Ok(TILE_SIZE << level_of_detail)
}

/// Number of tiles along one axis: `2^level`.
pub fn tile_count(level_of_detail: u8) -> Result<u32> {
    check_level_of_detail(level_of_detail)?;
    Ok(1u32 << level_of_detail)
}

/// Position of a point on the unit map square, `(0, 0)` being the north-west
/// corner and `(1, 1)` the south-east one. Input is clipped first.
pub(crate) fn lat_long_to_unit_xy(latitude: f64, longitude: f64) -> (f64, f64) {
    let latitude = clip(latitude, MIN_LATITUDE, MAX_LATITUDE);
    let longitude = clip(longitude, MIN_LONGITUDE, MAX_LONGITUDE);

    let x = (longitude + 180.0) / 360.0;
    let sin_latitude = (latitude * PI / 180.0).sin();
    let y = 0.5 - ((1.0 + sin_latitude) / (1.0 - sin_latitude)).ln() / (4.0 * PI);

    (x, y)
}

/// Inverse of [`lat_long_to_unit_xy`]
pub(crate) fn unit_xy_to_lat_long(x: f64, y: f64) -> GeoPoint {
    let x = clip(x, 0.0, 1.0) - 0.5;
    let y = 0.5 - clip(y, 0.0, 1.0);

    let latitude = 90.0 - 360.0 * (-y * 2.0 * PI).exp().atan() / PI;
    let longitude = 360.0 * x;

    GeoPoint::new(latitude, longitude)
}

/// Converts a point from latitude/longitude into pixel XY coordinates at a
/// specified level of detail.
///
/// The fractional pixel is offset by half a pixel and truncated, so the
/// result is the pixel whose centre is nearest to the projected point.
pub fn lat_long_to_pixel_xy(
    latitude: f64,
    longitude: f64,
    level_of_detail: u8,
) -> Result<PixelCoord> {
    let size = map_size(level_of_detail)? as f64;
    let (x, y) = lat_long_to_unit_xy(latitude, longitude);

    let pixel_x = clip(x * size + 0.5, 0.0, size - 1.0);
    let pixel_y = clip(y * size + 0.5, 0.0, size - 1.0);

    Ok(PixelCoord::new(pixel_x as u32, pixel_y as u32))
}

/// Converts a pixel back into the latitude/longitude of that pixel.
pub fn pixel_xy_to_lat_long(pixel: PixelCoord, level_of_detail: u8) -> Result<GeoPoint> {
    let size = map_size(level_of_detail)? as f64;

    let x = clip(pixel.x as f64, 0.0, size - 1.0) / size;
    let y = clip(pixel.y as f64, 0.0, size - 1.0) / size;

    Ok(unit_xy_to_lat_long(x, y))
}

/// Converts pixel XY coordinates into the XY coordinates of the tile
/// containing that pixel.
#[inline]
pub fn pixel_xy_to_tile_xy(pixel: PixelCoord) -> TileIndex {
    TileIndex::new(pixel.x / TILE_SIZE, pixel.y / TILE_SIZE)
}

/// Pixel of the upper-left corner of a tile.
#[inline]
pub fn tile_xy_to_pixel_xy(tile: TileIndex) -> PixelCoord {
    PixelCoord::new(
        tile.x.saturating_mul(TILE_SIZE),
        tile.y.saturating_mul(TILE_SIZE),
    )
}

/// Converts tile XY coordinates into a quadkey at a specified level of detail.
///
/// Bits of `tile_x`/`tile_y` above `level_of_detail` do not take part in the key.
pub fn tile_xy_to_quadkey(tile_x: u32, tile_y: u32, level_of_detail: u8) -> Result<QuadKey> {
    check_level_of_detail(level_of_detail)?;

    let mut digits = String::with_capacity(level_of_detail as usize);
    for i in (1..=level_of_detail).rev() {
        let mask = 1u32 << (i - 1);
        let mut digit = b'0';
        if tile_x & mask != 0 {
            digit += 1;
        }
        if tile_y & mask != 0 {
            digit += 2;
        }
        digits.push(digit as char);
    }

    Ok(QuadKey::from_digits(digits))
}

/// Converts a quadkey string into tile XY coordinates and its level of detail.
pub fn quadkey_to_tile_xy(quadkey: &str) -> Result<(TileIndex, u8)> {
    let key: QuadKey = quadkey.parse()?;
    Ok((key.tile_index(), key.level()))
}

/// Ground distance in metres covered by one pixel at the given latitude.
pub fn ground_resolution(latitude: f64, level_of_detail: u8) -> Result<f64> {
    let size = map_size(level_of_detail)? as f64;
    let latitude = clip(latitude, MIN_LATITUDE, MAX_LATITUDE);
    Ok((latitude * PI / 180.0).cos() * 2.0 * PI * EARTH_RADIUS / size)
}

/// Map scale denominator (1 : N) at the given latitude and screen resolution.
pub fn map_scale(latitude: f64, level_of_detail: u8, screen_dpi: u32) -> Result<f64> {
    Ok(ground_resolution(latitude, level_of_detail)? * screen_dpi as f64 / METERS_PER_INCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip() {
        assert_eq!(clip(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clip(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clip(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_map_size() {
        assert_eq!(map_size(1).unwrap(), 512);
        assert_eq!(map_size(5).unwrap(), 8192);
        assert_eq!(map_size(23).unwrap(), 1 << 31);
    }

    #[test]
    fn test_zoom_zero_is_rejected() {
        assert!(matches!(map_size(0), Err(MapError::InvalidArgument(_))));
        assert!(matches!(
            tile_xy_to_quadkey(0, 0, 0),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            lat_long_to_pixel_xy(0.0, 0.0, 0),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(map_size(24), Err(MapError::InvalidArgument(_))));
    }

    #[test]
    fn test_equator_at_zoom_one() {
        let pixel = lat_long_to_pixel_xy(0.0, 0.0, 1).unwrap();
        assert_eq!(pixel, PixelCoord::new(256, 256));

        let tile = pixel_xy_to_tile_xy(pixel);
        assert_eq!(tile, TileIndex::new(1, 1));

        let key = tile_xy_to_quadkey(tile.x, tile.y, 1).unwrap();
        assert_eq!(key.as_str(), "3");
    }

    #[test]
    fn test_quadkey_known_value() {
        let key = tile_xy_to_quadkey(3, 5, 3).unwrap();
        assert_eq!(key.as_str(), "213");
        assert_eq!(quadkey_to_tile_xy("213").unwrap(), (TileIndex::new(3, 5), 3));
    }

    #[test]
    fn test_quadkey_ignores_bits_above_level() {
        let key = tile_xy_to_quadkey(0b101, 0b110, 2).unwrap();
        assert_eq!(key.as_str(), "21");
    }

    #[test]
    fn test_out_of_range_coordinates_are_clipped() {
        let corner = lat_long_to_pixel_xy(90.0, -540.0, 3).unwrap();
        assert_eq!(corner, PixelCoord::new(0, 0));

        let far_corner = lat_long_to_pixel_xy(-90.0, 540.0, 3).unwrap();
        assert_eq!(far_corner, PixelCoord::new(2047, 2047));
    }

    #[test]
    fn test_pixel_to_lat_long_roundtrip() {
        let level = 12;
        let original = GeoPoint::new(47.6097, -122.3331);
        let pixel = lat_long_to_pixel_xy(original.lat(), original.lng(), level).unwrap();
        let back = pixel_xy_to_lat_long(pixel, level).unwrap();

        let tolerance = 360.0 / map_size(level).unwrap() as f64;
        assert!((back.lat() - original.lat()).abs() < tolerance);
        assert!((back.lng() - original.lng()).abs() < tolerance);
    }

    #[test]
    fn test_tile_to_pixel() {
        assert_eq!(
            tile_xy_to_pixel_xy(TileIndex::new(3, 5)),
            PixelCoord::new(768, 1280)
        );
        assert_eq!(
            pixel_xy_to_tile_xy(tile_xy_to_pixel_xy(TileIndex::new(7, 2))),
            TileIndex::new(7, 2)
        );
    }

    #[test]
    fn test_ground_resolution_and_scale() {
        // 78271.5170 m/px at the equator, level 1
        let resolution = ground_resolution(0.0, 1).unwrap();
        assert!((resolution - 78_271.517).abs() < 0.001);

        let polar = ground_resolution(80.0, 1).unwrap();
        assert!(polar < resolution);

        let scale = map_scale(0.0, 1, 96).unwrap();
        assert!((scale - resolution * 96.0 / 0.0254).abs() < 1e-6);
    }
}
