pub mod resolver;
pub mod source;

// Re-exports for convenience
pub use resolver::{resolve_visible_tiles, visible_tile_range, TileRange};
pub use source::{BingImagery, BingTileSource, TileSource};
