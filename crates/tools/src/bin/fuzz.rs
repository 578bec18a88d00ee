use anyhow::{Result, bail};
use clap::Parser;
use mapgen::mapgen::validate_layout;
use mapgen::{DungeonGenerator, GeneratedLevel, GeneratorConfig, MapRng, MapgenError};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use std::io;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const MIN_SIDE: usize = 12;
const MAX_SIDE: usize = 160;

#[derive(Parser)]
#[command(author, version, about = "Sweep seeds and sizes checking layout invariants")]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of dungeons to generate
    #[arg(long, default_value_t = 500)]
    seeds: u32,
}

fn pick_side(rng: &mut ChaCha8Rng) -> usize {
    MIN_SIDE + rng.next_u64() as usize % (MAX_SIDE - MIN_SIDE)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    println!("Starting fuzz sweep of {} dungeons from seed {}...", args.seeds, args.seed);

    let config = GeneratorConfig::default();
    let generator = DungeonGenerator::new(config.clone());
    let mut sizes = ChaCha8Rng::seed_from_u64(args.seed);
    let mut capacity_hits = 0;

    for run in 0..args.seeds {
        let (width, height) = (pick_side(&mut sizes), pick_side(&mut sizes));
        let seed = sizes.next_u64();
        let specials = 1 + sizes.next_u64() as usize % 3;

        let mut level = GeneratedLevel::new(run, width, height);
        let mut rng = MapRng::new(seed);
        let layout = match generator.generate(width, height, specials, &mut rng, &mut level) {
            Ok(layout) => layout,
            Err(MapgenError::TooManySpecialRooms { .. }) => {
                debug!(width, height, seed, specials, "too few rooms for the requested specials");
                continue;
            }
            Err(MapgenError::ObstacleCapacityExceeded { capacity }) => {
                warn!(width, height, seed, capacity, "level ran out of obstacle slots");
                capacity_hits += 1;
                continue;
            }
            Err(error) => bail!("{width}x{height} seed {seed} failed: {error}"),
        };

        let violations = validate_layout(&layout, &config);
        if let Some(first) = violations.first() {
            bail!("{width}x{height} seed {seed}: {first} ({} violations)", violations.len());
        }
    }

    println!("Fuzzing completed successfully ({capacity_hits} capacity overflows).");
    Ok(())
}
