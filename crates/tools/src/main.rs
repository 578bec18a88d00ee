use anyhow::{Context, Result};
use clap::Parser;
use mapgen::{
    DungeonGenerator, DungeonLayout, GeneratedLevel, GeneratorConfig, MapRng, ObstacleKind,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(author, version, about = "Generate a dungeon level and print it", long_about = None)]
struct Args {
    #[arg(long, default_value_t = 80)]
    width: usize,
    #[arg(long, default_value_t = 60)]
    height: usize,
    /// Number of special rooms: one entrance plus exits
    #[arg(long, default_value_t = 2)]
    specials: usize,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML file overriding generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Level number used for teleporter labels
    #[arg(long, default_value_t = 0)]
    level: u32,
    /// Print the generated level as JSON instead of a map
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let Some(path) = path else {
        return Ok(GeneratorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: GeneratorConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

fn summary(layout: &DungeonLayout, level: &GeneratedLevel) -> String {
    let portals = level.count_obstacles(|kind| {
        matches!(kind, ObstacleKind::Entrance(_) | ObstacleKind::Exit(_))
    });
    format!(
        "rooms: {}\ndoors: {}\nentrance: {:?}\nexits: {:?}\nmiddle room: {:?}\n\
         obstacles: {} ({} portals)\nwaypoints: {}\nfingerprint: {:016x}",
        layout.rooms.len(),
        layout.door_count(),
        layout.entrance(),
        layout.exits(),
        layout.middle_room,
        level.obstacles.len(),
        portals,
        level.waypoints.len(),
        level.fingerprint(),
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(LOG_FILTER)),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let (width, height, seed) = (args.width, args.height, args.seed);
    let mut level = GeneratedLevel::new(args.level, width, height);
    let layout = DungeonGenerator::new(config)
        .generate(width, height, args.specials, &mut MapRng::new(seed), &mut level)
        .with_context(|| format!("Failed to generate a {width}x{height} dungeon with seed {seed}"))?;
    info!(rooms = layout.rooms.len(), "generated dungeon with seed {seed}");

    if args.json {
        let json = serde_json::to_string_pretty(&level).context("Failed to serialize level")?;
        println!("{json}");
    } else {
        print!("{}", layout.render());
        println!("{}", summary(&layout, &level));
    }

    Ok(())
}
