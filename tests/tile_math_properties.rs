//! Property tests for the tile system math

use proptest::prelude::*;
use quadmap::core::projection::{
    clip, lat_long_to_pixel_xy, map_size, pixel_xy_to_tile_xy, quadkey_to_tile_xy,
    tile_xy_to_quadkey,
};
use quadmap::{MapError, TileIndex};

fn level_and_tile() -> impl Strategy<Value = (u8, u32, u32)> {
    (1u8..=23).prop_flat_map(|level| {
        let max = 1u32 << level;
        (Just(level), 0..max, 0..max)
    })
}

proptest! {
    #[test]
    fn clip_stays_in_range(n in -1e9f64..1e9, a in -1e6f64..1e6, b in -1e6f64..1e6) {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let clipped = clip(n, min, max);
        prop_assert!(clipped >= min && clipped <= max);
        if n >= min && n <= max {
            prop_assert_eq!(clipped, n);
        }
    }

    #[test]
    fn quadkey_roundtrip((level, x, y) in level_and_tile()) {
        let key = tile_xy_to_quadkey(x, y, level).unwrap();
        prop_assert_eq!(key.level(), level);
        prop_assert_eq!(key.as_str().len(), level as usize);
        prop_assert_eq!(quadkey_to_tile_xy(key.as_str()).unwrap(), (TileIndex::new(x, y), level));
    }

    #[test]
    fn pixel_x_is_monotonic_in_longitude(
        lat in -85.0f64..85.0,
        lon1 in -180.0f64..180.0,
        lon2 in -180.0f64..180.0,
        level in 1u8..=23,
    ) {
        let (west, east) = if lon1 <= lon2 { (lon1, lon2) } else { (lon2, lon1) };
        let a = lat_long_to_pixel_xy(lat, west, level).unwrap();
        let b = lat_long_to_pixel_xy(lat, east, level).unwrap();
        prop_assert!(a.x <= b.x);
    }

    #[test]
    fn pixels_and_tiles_stay_on_map(
        lat in -1000.0f64..1000.0,
        lon in -1000.0f64..1000.0,
        level in 1u8..=23,
    ) {
        let pixel = lat_long_to_pixel_xy(lat, lon, level).unwrap();
        let size = map_size(level).unwrap();
        prop_assert!(pixel.x < size && pixel.y < size);

        let tile = pixel_xy_to_tile_xy(pixel);
        prop_assert!(tile.x < (1 << level) && tile.y < (1 << level));
    }
}

#[test]
fn zoom_three_tile_three_five() {
    let key = tile_xy_to_quadkey(3, 5, 3).unwrap();
    assert_eq!(key.as_str().len(), 3);
    assert_eq!(quadkey_to_tile_xy(key.as_str()).unwrap(), (TileIndex::new(3, 5), 3));
}

#[test]
fn zoom_zero_is_invalid_argument() {
    assert!(matches!(map_size(0), Err(MapError::InvalidArgument(_))));
    assert!(matches!(
        tile_xy_to_quadkey(1, 1, 0),
        Err(MapError::InvalidArgument(_))
    ));
}
