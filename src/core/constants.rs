//! Core constants of the Bing Maps tile system.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Earth radius in metres used by the spherical Mercator projection.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limits of the square Mercator map.
pub const MIN_LATITUDE: f64 = -85.051_128_78;
pub const MAX_LATITUDE: f64 = 85.051_128_78;

pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Lowest level of detail that produces a quadkey.
pub const MIN_LEVEL_OF_DETAIL: u8 = 1;

/// Deepest level of detail served by Bing-style tile providers.
pub const MAX_LEVEL_OF_DETAIL: u8 = 23;

/// Programmatic +/- zoom step for `zoom_in/zoom_out`.
pub const DEFAULT_ZOOM_DELTA: u8 = 1;

/// Initial view used when nothing else is configured.
pub const DEFAULT_ZOOM: u8 = 5;
pub const DEFAULT_VIEWPORT_SIZE: (u32, u32) = (700, 700);

/// Metres per inch, used by `map_scale`.
pub const METERS_PER_INCH: f64 = 0.0254;
