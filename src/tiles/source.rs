use crate::core::geo::QuadKey;
use serde::{Deserialize, Serialize};

/// Trait representing anything that can produce tile URLs for a given quadkey.
///
/// The core never fetches imagery; scenes that do can use a source to find
/// out where a tile lives.
pub trait TileSource {
    /// Build a URL for the requested `key`.
    fn url(&self, key: &QuadKey) -> String;
}

/// Imagery style served by the Bing Maps tile servers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BingImagery {
    #[default]
    Aerial,
    AerialWithLabels,
    Road,
}

impl BingImagery {
    fn prefix(self) -> char {
        match self {
            Self::Aerial => 'a',
            Self::AerialWithLabels => 'h',
            Self::Road => 'r',
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Road => "png",
            _ => "jpeg",
        }
    }
}

/// Quadkey URL template for the Bing Maps tile servers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BingTileSource {
    pub imagery: BingImagery,
    pub subdomains: Vec<String>,
    pub generation: u32,
}

impl BingTileSource {
    pub fn new(imagery: BingImagery) -> Self {
        Self {
            imagery,
            ..Self::default()
        }
    }
}

impl Default for BingTileSource {
    fn default() -> Self {
        Self {
            imagery: BingImagery::Aerial,
            subdomains: (0..4).map(|n| n.to_string()).collect(),
            generation: 1,
        }
    }
}

impl TileSource for BingTileSource {
    fn url(&self, key: &QuadKey) -> String {
        let prefix = self.imagery.prefix();
        let extension = self.imagery.extension();

        if self.subdomains.is_empty() {
            return format!(
                "https://ecn.tiles.virtualearth.net/tiles/{}{}.{}?g={}",
                prefix, key, extension, self.generation
            );
        }

        // Spread requests over the servers by the key's last digit
        let last_digit = key.as_str().bytes().last().map_or(0, |b| (b - b'0') as usize);
        let sub = &self.subdomains[last_digit % self.subdomains.len()];
        format!(
            "https://ecn.t{}.tiles.virtualearth.net/tiles/{}{}.{}?g={}",
            sub, prefix, key, extension, self.generation
        )
    }
}
