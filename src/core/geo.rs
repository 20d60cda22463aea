use crate::{
    core::{
        constants::{
            MAX_LATITUDE, MAX_LEVEL_OF_DETAIL, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE,
        },
        projection::clip,
    },
    MapError,
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A geographical coordinate kept inside the square Mercator map.
///
/// Latitude is clipped to ±85.05112878° and longitude to ±180° whenever a
/// point is built, so every `GeoPoint` can be projected without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl From<RawGeoPoint> for GeoPoint {
    fn from(raw: RawGeoPoint) -> Self {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    /// Creates a point, clipping both components into the projectable range
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: clip(lat, MIN_LATITUDE, MAX_LATITUDE),
            lng: clip(lng, MIN_LONGITUDE, MAX_LONGITUDE),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

#[cfg(feature = "geo-interop")]
impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo_types::Point::new(point.lng, point.lat)
    }
}

#[cfg(feature = "geo-interop")]
impl From<geo_types::Point<f64>> for GeoPoint {
    fn from(point: geo_types::Point<f64>) -> Self {
        GeoPoint::new(point.y(), point.x())
    }
}

/// A pixel position on the full map at some level of detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

impl PixelCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Column/row of a 256×256 tile at some level of detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
}

impl TileIndex {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Bing Maps quadkey: one base-4 digit per level of detail, coarsest first.
///
/// A `QuadKey` is always non-empty, at most [`MAX_LEVEL_OF_DETAIL`] long and
/// made only of the digits `0`–`3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuadKey(String);

impl QuadKey {
    /// Wraps digits already known to be valid
    pub(crate) fn from_digits(digits: String) -> Self {
        debug_assert!(Self::validate(&digits).is_ok());
        Self(digits)
    }

    fn validate(digits: &str) -> Result<(), MapError> {
        if digits.is_empty() {
            return Err(MapError::InvalidQuadKey("empty quadkey".to_string()));
        }
        if digits.len() > MAX_LEVEL_OF_DETAIL as usize {
            return Err(MapError::InvalidQuadKey(format!(
                "'{}' is longer than {} digits",
                digits, MAX_LEVEL_OF_DETAIL
            )));
        }
        if let Some(bad) = digits.chars().find(|c| !matches!(c, '0'..='3')) {
            return Err(MapError::InvalidQuadKey(format!(
                "'{}' contains invalid digit '{}'",
                digits, bad
            )));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Level of detail this key addresses (its length)
    pub fn level(&self) -> u8 {
        self.0.len() as u8
    }

    /// Decodes the key back into its tile column/row
    pub fn tile_index(&self) -> TileIndex {
        let mut tile = TileIndex::new(0, 0);
        for digit in self.0.bytes() {
            tile.x <<= 1;
            tile.y <<= 1;
            let quadrant = digit - b'0';
            if quadrant & 1 != 0 {
                tile.x |= 1;
            }
            if quadrant & 2 != 0 {
                tile.y |= 1;
            }
        }
        tile
    }

    /// The key of the enclosing tile one level up, if any
    pub fn parent(&self) -> Option<QuadKey> {
        if self.0.len() <= 1 {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_string()))
        }
    }

    /// The four tiles one level down, in digit order
    pub fn children(&self) -> Option<[QuadKey; 4]> {
        if self.level() >= MAX_LEVEL_OF_DETAIL {
            return None;
        }
        Some(['0', '1', '2', '3'].map(|digit| {
            let mut child = self.0.clone();
            child.push(digit);
            Self(child)
        }))
    }
}

impl fmt::Display for QuadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for QuadKey {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for QuadKey {
    type Error = MapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<QuadKey> for String {
    fn from(key: QuadKey) -> Self {
        key.0
    }
}

impl AsRef<str> for QuadKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
