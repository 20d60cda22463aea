//! Headless quadmap driver.
//!
//! Builds a map from a config file and command-line overrides, draws it into
//! a scene that only logs what it is asked to attach, then replays a list of
//! input events, redrawing after each one that moved the view.

use anyhow::{Context, Result};
use clap::Parser;
use fxhash::FxHashMap;
use quadmap::{
    core::geo::{GeoPoint, QuadKey},
    layers::tile::SyncReport,
    tiles::source::{BingTileSource, TileSource},
    DrawableHandle, InputEvent, MapConfig, MapError, TileScene,
};
use std::path::PathBuf;

/// Replays a pan/zoom session and prints the tiles added and removed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON map configuration; built-in defaults apply when omitted.
    #[arg(long, env = "QUADMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Initial center latitude.
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Initial center longitude.
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,

    /// Initial level of detail (1-23).
    #[arg(long)]
    zoom: Option<u8>,

    /// Scene width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Scene height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// JSON array of input events to replay after the first draw,
    /// e.g. `[{"type": "zoom_in"}, {"type": "pan_by", "dx": 120, "dy": 0}]`.
    #[arg(long)]
    events: Option<PathBuf>,
}

/// Scene that keeps a handle per tile and logs where its imagery would come from
struct ConsoleScene {
    extent: (u32, u32),
    source: BingTileSource,
    drawables: FxHashMap<QuadKey, DrawableHandle>,
    next_handle: u64,
}

impl ConsoleScene {
    fn new(extent: (u32, u32), source: BingTileSource) -> Self {
        Self {
            extent,
            source,
            drawables: FxHashMap::default(),
            next_handle: 0,
        }
    }
}

impl TileScene for ConsoleScene {
    fn viewport_pixel_extent(&self) -> (u32, u32) {
        self.extent
    }

    fn add_tile(&mut self, key: &QuadKey) -> quadmap::Result<DrawableHandle> {
        self.next_handle += 1;
        let handle = DrawableHandle(self.next_handle);
        log::info!("attach {:<8} {}", key, self.source.url(key));
        self.drawables.insert(key.clone(), handle);
        Ok(handle)
    }

    fn remove_tile(&mut self, key: &QuadKey) -> quadmap::Result<()> {
        self.drawables
            .remove(key)
            .map(|handle| log::info!("detach {:<8} {:?}", key, handle))
            .ok_or_else(|| MapError::Scene(format!("no drawable for tile {}", key)))
    }
}

fn load_config(args: &Args) -> Result<MapConfig> {
    let mut config = match &args.config {
        Some(path) => MapConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MapConfig::default(),
    };

    if args.lat.is_some() || args.lng.is_some() {
        config.center = GeoPoint::new(
            args.lat.unwrap_or(config.center.lat()),
            args.lng.unwrap_or(config.center.lng()),
        );
    }
    if let Some(zoom) = args.zoom {
        config.zoom = zoom;
    }
    if let Some(width) = args.width {
        config.viewport_width = width;
    }
    if let Some(height) = args.height {
        config.viewport_height = height;
    }

    config.validate()?;
    Ok(config)
}

fn load_events(args: &Args) -> Result<Vec<InputEvent>> {
    match &args.events {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read events {}", path.display()))?;
            Ok(serde_json::from_str(&text)
                .with_context(|| format!("failed to parse events {}", path.display()))?)
        }
        // Wheel forward, wheel back, then a pan like a mouse drag
        None => Ok(vec![
            InputEvent::wheel(true),
            InputEvent::wheel(false),
            InputEvent::PanTo {
                center: GeoPoint::new(10.0, 10.0),
            },
            InputEvent::PanBy { dx: -200, dy: 0 },
        ]),
    }
}

fn print_report(label: &str, report: &SyncReport, visible: usize) {
    println!(
        "{:<28} +{:<3} -{:<3} failed {:<3} visible {}",
        label,
        report.added.len(),
        report.removed.len(),
        report.failures.len(),
        visible
    );
    for failure in &report.failures {
        println!("    {:?} {} failed: {}", failure.action, failure.key, failure.error);
    }
}

fn main() -> Result<()> {
    // Initialize logging; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let events = load_events(&args)?;

    let mut map = config.build_map()?;
    let mut scene = ConsoleScene::new(
        (config.viewport_width, config.viewport_height),
        config.tile_source.clone(),
    );

    println!(
        "Map at {} zoom {} in a {}x{} scene",
        map.viewport().center(),
        map.viewport().zoom(),
        config.viewport_width,
        config.viewport_height
    );

    let report = map.draw(&mut scene)?;
    print_report("initial draw", &report, map.tile_layer().len());

    for event in &events {
        if !map.handle_input(event)?.needs_redraw() {
            println!("{:<28} view unchanged", format!("{:?}", event));
            continue;
        }
        let report = map.draw(&mut scene)?;
        print_report(&format!("{:?}", event), &report, map.tile_layer().len());
    }

    let report = map.clear(&mut scene);
    print_report("clear", &report, map.tile_layer().len());

    Ok(())
}
