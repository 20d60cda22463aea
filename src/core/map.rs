use crate::{
    core::viewport::Viewport,
    input::{EventHandled, InputEvent},
    layers::tile::{SyncReport, TileLayer},
    traits::TileScene,
    Result,
};

/// A map instance: one viewport plus the tiles attached for it.
///
/// Input handlers mutate the view through [`handle_input`](Self::handle_input)
/// or the setters, then call [`draw`](Self::draw) with the host scene. No
/// redraw happens implicitly.
#[derive(Debug, Default)]
pub struct Map {
    viewport: Viewport,
    tile_layer: TileLayer,
}

impl Map {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            tile_layer: TileLayer::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn tile_layer(&self) -> &TileLayer {
        &self.tile_layer
    }

    pub fn set_center(&mut self, lat: f64, lng: f64) {
        self.viewport.set_center(lat, lng);
    }

    pub fn set_zoom(&mut self, zoom: i32) {
        self.viewport.set_zoom(zoom);
    }

    /// Applies an input event to the viewport
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<EventHandled> {
        let before = self.viewport.clone();

        match event {
            InputEvent::ZoomIn => {
                self.viewport.zoom_in();
            }
            InputEvent::ZoomOut => {
                self.viewport.zoom_out();
            }
            InputEvent::PanTo { center } => self.viewport.pan_to(*center),
            InputEvent::PanBy { dx, dy } => self.viewport.pan_by_pixels(*dx, *dy)?,
            InputEvent::Scroll { delta } => {
                if *delta > 0.0 {
                    self.viewport.zoom_in();
                } else if *delta < 0.0 {
                    self.viewport.zoom_out();
                }
            }
        }

        if self.viewport == before {
            log::trace!("Input {:?} left the view unchanged", event);
            Ok(EventHandled::NotHandled)
        } else {
            log::debug!(
                "Input {:?} moved view to {} at zoom {}",
                event,
                self.viewport.center(),
                self.viewport.zoom()
            );
            Ok(EventHandled::Handled)
        }
    }

    /// Brings the scene's tiles in line with the current view
    pub fn draw<S>(&mut self, scene: &mut S) -> Result<SyncReport>
    where
        S: TileScene + ?Sized,
    {
        self.tile_layer.draw(&self.viewport, scene)
    }

    pub fn update<S>(&mut self, scene: &mut S) -> Result<SyncReport>
    where
        S: TileScene + ?Sized,
    {
        self.tile_layer.update(&self.viewport, scene)
    }

    /// Detaches every tile from the scene, e.g. before the map is dropped
    pub fn clear<S>(&mut self, scene: &mut S) -> SyncReport
    where
        S: TileScene + ?Sized,
    {
        self.tile_layer.clear(scene)
    }
}
