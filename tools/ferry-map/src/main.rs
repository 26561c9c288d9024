use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod script;
mod terminal;

use ferry_routes::config::{MapConfig, DEFAULT_PLANE_SCALE};
use ferry_routes::{FerryMap, MapBounds, PlaneSize, SelectionEvent, SourceFetcher};
use script::{parse_script, Command};
use terminal::{OutputFormat, TerminalPanel, TerminalSurface};

#[derive(Parser, Debug)]
#[command(
    name = "ferry-map",
    author,
    version,
    about = "Explore ferry routes and timetables from fleet and schedule tables",
    long_about = "Loads a fleet table (origin, destination, origin coordinates, vessel id) \
                  and a timetable, places every port on the map plane, then replays a click \
                  script against it.\n\n\
                  Clicking a port selects it as origin and draws its routes. Clicking one of \
                  those destinations prints the vessels and departures serving the route. \
                  Clicking empty space clears the selection."
)]
struct Args {
    /// Fleet table, as a path or http(s) URL
    #[arg(short, long)]
    fleet: String,

    /// Timetable table, as a path or http(s) URL
    #[arg(short, long)]
    schedule: String,

    /// Click script (reads stdin when omitted)
    #[arg(short = 'c', long)]
    script: Option<PathBuf>,

    /// Field delimiter of both tables
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// Width of the map texture in pixels
    #[arg(long, default_value_t = 1)]
    texture_width: u32,

    /// Height of the map texture in pixels
    #[arg(long, default_value_t = 1)]
    texture_height: u32,

    /// Height of the map plane in display units
    #[arg(long, default_value_t = DEFAULT_PLANE_SCALE)]
    scale: f64,

    /// Western edge of the map texture (degrees)
    #[arg(long, allow_hyphen_values = true)]
    min_lon: Option<f64>,

    /// Eastern edge of the map texture (degrees)
    #[arg(long, allow_hyphen_values = true)]
    max_lon: Option<f64>,

    /// Southern edge of the map texture (degrees)
    #[arg(long, allow_hyphen_values = true)]
    min_lat: Option<f64>,

    /// Northern edge of the map texture (degrees)
    #[arg(long, allow_hyphen_values = true)]
    max_lat: Option<f64>,

    /// Print one JSON object per event instead of text
    #[arg(long)]
    json: bool,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn map_config(&self) -> Result<MapConfig> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got {:?}", self.delimiter);
        }
        if self.texture_width == 0 || self.texture_height == 0 {
            bail!("Texture dimensions must be non-zero");
        }

        let defaults = MapBounds::default();
        let bounds = MapBounds {
            min_lon: self.min_lon.unwrap_or(defaults.min_lon),
            max_lon: self.max_lon.unwrap_or(defaults.max_lon),
            min_lat: self.min_lat.unwrap_or(defaults.min_lat),
            max_lat: self.max_lat.unwrap_or(defaults.max_lat),
        };
        if bounds.min_lon == bounds.max_lon || bounds.min_lat == bounds.max_lat {
            tracing::warn!("Map bounds are degenerate; port positions will not be finite");
        }

        Ok(MapConfig {
            bounds,
            plane: PlaneSize::from_texture(self.scale, self.texture_width, self.texture_height),
            delimiter: self.delimiter as u8,
            ..MapConfig::default()
        })
    }
}

fn read_script(path: Option<&PathBuf>) -> Result<Vec<Command>> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read click script {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read click script from stdin")?;
            text
        }
    };

    parse_script(&text)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    tracing::info!("=== Ferry Route Map ===");
    tracing::info!("Fleet: {}", args.fleet);
    tracing::info!("Schedule: {}", args.schedule);

    let config = args.map_config()?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    // Phase 1: Load tables and build the route index
    let fetcher = SourceFetcher::new();
    let mut map = FerryMap::load(&fetcher, &args.fleet, &args.schedule, &config)
        .await
        .context("Failed to load ferry data")?;

    let report = map.report();
    tracing::info!(
        "Indexed {} of {} fleet rows: {} ports, {} routes",
        report.rows_indexed,
        report.rows_read,
        map.index().port_count(),
        map.index().route_count()
    );
    if !report.skipped.is_empty() {
        tracing::warn!("{} fleet rows skipped", report.skipped.len());
    }

    // Phase 2: Place ports
    let mut surface = TerminalSurface::new(std::io::stdout(), format);
    let mut panel = TerminalPanel::new(std::io::stdout(), format);
    map.place_ports(&mut surface);

    // Phase 3: Replay clicks
    let commands = read_script(args.script.as_ref())?;
    tracing::info!("Replaying {} clicks", commands.len());

    for command in commands {
        match command.pointer_event() {
            Some(event) => map.handle_pointer(&event, &mut surface, &mut panel),
            None => map.dispatch(SelectionEvent::EmptySpaceClicked, &mut surface, &mut panel),
        }
    }

    tracing::info!("Final selection: {:?}", map.selection());

    Ok(())
}
