use quadmap::{
    core::geo::{GeoPoint, QuadKey},
    layers::tile::{diff_tile_sets, SyncState, TileAction},
    prelude::HashSet,
    resolve_visible_tiles, DrawableHandle, InputEvent, Map, MapConfig, MapError, TileScene,
    Viewport,
};
use std::collections::BTreeSet;

/// Scene double that records every call and checks the add/remove contract
#[derive(Default)]
struct RecordingScene {
    extent: (u32, u32),
    attached: HashSet<QuadKey>,
    calls: Vec<String>,
    broken: HashSet<QuadKey>,
    next_handle: u64,
}

impl RecordingScene {
    fn new(width: u32, height: u32) -> Self {
        Self {
            extent: (width, height),
            ..Self::default()
        }
    }

    fn attached_sorted(&self) -> BTreeSet<QuadKey> {
        self.attached.iter().cloned().collect()
    }
}

impl TileScene for RecordingScene {
    fn viewport_pixel_extent(&self) -> (u32, u32) {
        self.extent
    }

    fn add_tile(&mut self, key: &QuadKey) -> quadmap::Result<DrawableHandle> {
        self.calls.push(format!("+{}", key));
        if self.broken.contains(key) {
            return Err(MapError::Scene(format!("mesh build failed for {}", key)));
        }
        assert!(self.attached.insert(key.clone()), "{} attached twice", key);
        self.next_handle += 1;
        Ok(DrawableHandle(self.next_handle))
    }

    fn remove_tile(&mut self, key: &QuadKey) -> quadmap::Result<()> {
        self.calls.push(format!("-{}", key));
        assert!(self.attached.remove(key), "{} detached while not attached", key);
        Ok(())
    }
}

/// Test that a pan produces disjoint add/remove sets that rebuild the new view exactly
#[test]
fn test_pan_diff_rebuilds_new_tile_set() {
    let mut before = Viewport::new(GeoPoint::new(0.0, 0.0), 5);
    let old_tiles = resolve_visible_tiles(&before, 700, 700).unwrap();

    before.set_center(10.0, 10.0);
    let new_tiles = resolve_visible_tiles(&before, 700, 700).unwrap();

    let diff = diff_tile_sets(&old_tiles, &new_tiles);
    assert!(!diff.to_add.is_empty());
    assert!(!diff.to_remove.is_empty());

    let to_add: BTreeSet<_> = diff.to_add.iter().cloned().collect();
    let to_remove: BTreeSet<_> = diff.to_remove.iter().cloned().collect();
    assert!(to_add.is_disjoint(&to_remove));

    let unchanged: BTreeSet<_> = old_tiles.intersection(&new_tiles).cloned().collect();
    let rebuilt: BTreeSet<_> = unchanged.union(&to_add).cloned().collect();
    assert_eq!(rebuilt, new_tiles);
}

/// Test the same pan through the map and a scene
#[test]
fn test_pan_through_map_keeps_scene_in_sync() {
    let mut map = Map::new(Viewport::new(GeoPoint::new(0.0, 0.0), 5));
    let mut scene = RecordingScene::new(700, 700);

    map.draw(&mut scene).unwrap();
    assert_eq!(map.tile_layer().state(), SyncState::Synced);
    assert_eq!(scene.attached.len(), 16);

    map.handle_input(&InputEvent::PanTo {
        center: GeoPoint::new(10.0, 10.0),
    })
    .unwrap();
    scene.calls.clear();
    let report = map.draw(&mut scene).unwrap();

    assert!(!report.added.is_empty());
    assert!(!report.removed.is_empty());

    // every removal happens before the first addition
    let first_add = scene.calls.iter().position(|c| c.starts_with('+')).unwrap();
    assert!(scene.calls[first_add..].iter().all(|c| c.starts_with('+')));

    let expected = resolve_visible_tiles(map.viewport(), 700, 700).unwrap();
    assert_eq!(scene.attached_sorted(), expected);
    assert_eq!(
        map.tile_layer().visible_tiles(),
        expected.into_iter().collect::<Vec<_>>()
    );
}

/// Test that redrawing an unchanged view makes no scene calls
#[test]
fn test_redraw_without_change_is_idempotent() {
    let mut map = Map::new(Viewport::new(GeoPoint::new(48.85, 2.35), 11));
    let mut scene = RecordingScene::new(1280, 720);

    map.draw(&mut scene).unwrap();
    scene.calls.clear();

    let report = map.draw(&mut scene).unwrap();
    assert!(report.is_noop());
    assert!(scene.calls.is_empty());
}

/// Test wheel-driven zooming, as a host would wire mouse events
#[test]
fn test_wheel_zoom_session() {
    let mut map = MapConfig::default().build_map().unwrap();
    let mut scene = RecordingScene::new(700, 700);
    map.draw(&mut scene).unwrap();

    for forward in [true, true, false] {
        if map
            .handle_input(&InputEvent::wheel(forward))
            .unwrap()
            .needs_redraw()
        {
            map.draw(&mut scene).unwrap();
        }
        let zoom = map.viewport().zoom();
        assert!(scene.attached.iter().all(|key| key.level() == zoom));
    }

    assert_eq!(map.viewport().zoom(), 6);
}

/// Test that a broken tile does not stop the rest of the batch
#[test]
fn test_scene_failure_is_isolated_to_one_tile() {
    let mut map = Map::new(Viewport::new(GeoPoint::new(0.0, 0.0), 2));
    let mut scene = RecordingScene::new(1024, 1024);
    let broken: QuadKey = "03".parse().unwrap();
    scene.broken.insert(broken.clone());

    let report = map.draw(&mut scene).unwrap();
    assert_eq!(report.added.len(), 15);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].key, broken);
    assert_eq!(report.failures[0].action, TileAction::Add);
    assert!(!map.tile_layer().is_visible(&broken));

    scene.broken.clear();
    let report = map.draw(&mut scene).unwrap();
    assert_eq!(report.added, vec![broken.clone()]);
    assert!(map.tile_layer().is_visible(&broken));
}

/// Test that clearing the map detaches everything from the scene
#[test]
fn test_clear_before_drop() {
    let mut map = Map::new(Viewport::new(GeoPoint::new(-33.86, 151.21), 8));
    let mut scene = RecordingScene::new(640, 480);
    map.draw(&mut scene).unwrap();
    assert!(!scene.attached.is_empty());

    let report = map.clear(&mut scene);
    assert!(!report.has_failures());
    assert!(scene.attached.is_empty());
    assert_eq!(map.tile_layer().state(), SyncState::Uninitialized);
}
