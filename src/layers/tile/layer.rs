//! Core TileLayer implementation

use super::types::{diff_tile_sets, SyncReport, SyncState, TileAction, TileFailure};
use crate::{
    core::{geo::QuadKey, viewport::Viewport},
    tiles::resolver::resolve_visible_tiles,
    traits::{DrawableHandle, TileScene},
    Result,
};
use std::collections::BTreeMap;

/// Keeps a scene's attached tiles equal to the tiles covering the viewport.
///
/// The layer owns the set of tiles currently attached to the scene. Each
/// [`update`](Self::update) resolves the tiles the viewport needs, removes
/// the ones that dropped out and adds the new ones. A tile the scene fails
/// to add is left out of the set so the next pass tries it again; a tile
/// the scene fails to remove stays in the set for the same reason.
#[derive(Debug, Default)]
pub struct TileLayer {
    state: SyncState,
    visible: BTreeMap<QuadKey, DrawableHandle>,
}

impl TileLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Attached tiles in key order
    pub fn visible_tiles(&self) -> Vec<QuadKey> {
        self.visible.keys().cloned().collect()
    }

    pub fn is_visible(&self, key: &QuadKey) -> bool {
        self.visible.contains_key(key)
    }

    /// Handle the scene returned when `key` was added
    pub fn handle(&self, key: &QuadKey) -> Option<DrawableHandle> {
        self.visible.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Main update method: resolves the tiles for the viewport and applies
    /// the difference to the scene.
    ///
    /// Removals run before additions. Per-tile scene failures are reported
    /// in the returned [`SyncReport`] and never abort the pass; only an
    /// unusable zoom level makes the whole call fail.
    pub fn update<S>(&mut self, viewport: &Viewport, scene: &mut S) -> Result<SyncReport>
    where
        S: TileScene + ?Sized,
    {
        let (width, height) = scene.viewport_pixel_extent();
        let next = resolve_visible_tiles(viewport, width, height)?;
        let diff = diff_tile_sets(self.visible.keys(), &next);

        let mut report = SyncReport::default();

        for key in diff.to_remove {
            match scene.remove_tile(&key) {
                Ok(()) => {
                    self.visible.remove(&key);
                    log::debug!("Removed tile {}", key);
                    report.removed.push(key);
                }
                Err(error) => {
                    log::warn!("Failed to remove tile {}: {}", key, error);
                    report.failures.push(TileFailure {
                        key,
                        action: TileAction::Remove,
                        error,
                    });
                }
            }
        }

        for key in diff.to_add {
            match scene.add_tile(&key) {
                Ok(handle) => {
                    log::debug!("Added tile {} as {:?}", key, handle);
                    self.visible.insert(key.clone(), handle);
                    report.added.push(key);
                }
                Err(error) => {
                    log::warn!("Failed to add tile {}: {}", key, error);
                    report.failures.push(TileFailure {
                        key,
                        action: TileAction::Add,
                        error,
                    });
                }
            }
        }

        self.state = SyncState::Synced;

        log::debug!(
            "Tile pass at zoom {} ({}x{} px): +{} -{} !{} = {} visible",
            viewport.zoom(),
            width,
            height,
            report.added.len(),
            report.removed.len(),
            report.failures.len(),
            self.visible.len()
        );

        Ok(report)
    }

    /// Same pass as [`update`](Self::update); named after the host's redraw hook.
    pub fn draw<S>(&mut self, viewport: &Viewport, scene: &mut S) -> Result<SyncReport>
    where
        S: TileScene + ?Sized,
    {
        self.update(viewport, scene)
    }

    /// Detaches every visible tile. The layer goes back to `Uninitialized`
    /// once nothing is left attached.
    pub fn clear<S>(&mut self, scene: &mut S) -> SyncReport
    where
        S: TileScene + ?Sized,
    {
        let mut report = SyncReport::default();

        for key in self.visible_tiles() {
            match scene.remove_tile(&key) {
                Ok(()) => {
                    self.visible.remove(&key);
                    report.removed.push(key);
                }
                Err(error) => {
                    log::warn!("Failed to remove tile {} while clearing: {}", key, error);
                    report.failures.push(TileFailure {
                        key,
                        action: TileAction::Remove,
                        error,
                    });
                }
            }
        }

        if self.visible.is_empty() {
            self.state = SyncState::Uninitialized;
        }

        report
    }
}
