use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lakeshore_core::config::SimConfig;
use lakeshore_core::metrics::TurnReport;
use lakeshore_core::world::World;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lakeshore")]
#[command(about = "Lakeside ecosystem simulation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate a world and advance it turn by turn
    Run {
        /// Path to config file (JSON); defaults are used when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of turns to run (default: the config's max_turns)
        #[arg(long)]
        turns: Option<u64>,

        /// Override the config seed
        #[arg(long)]
        seed: Option<u64>,

        /// Record population counts every N turns
        #[arg(long, default_value_t = 100)]
        sample_every: u64,

        /// Pause between turns, in milliseconds
        #[arg(long, default_value_t = 0)]
        cadence_ms: u64,

        /// Output directory for summary.json and entities.json (optional)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let file = File::open(path).with_context(|| format!("failed to open config file {path:?}"))?;
    let config: SimConfig =
        serde_json::from_reader(BufReader::new(file)).context("failed to parse config")?;
    Ok(config)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {path:?}"))?;
    serde_json::to_writer_pretty(file, value).with_context(|| format!("failed to write {path:?}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = SimConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Run {
            config,
            turns,
            seed,
            sample_every,
            cadence_ms,
            out,
        } => {
            let mut sim_config = load_config(config.as_deref())?;
            if let Some(seed) = seed {
                sim_config.seed = seed;
            }
            sim_config.validate().context("config validation error")?;
            let mut world = World::new(sim_config).context("failed to initialize world")?;
            world.populate();
            log::info!(
                "running {} turns (seed {}, {} entities)",
                turns.unwrap_or(world.config().max_turns),
                world.config().seed,
                world.population_counts().total()
            );

            let cadence = Duration::from_millis(cadence_ms);
            let on_turn = |report: &TurnReport| {
                if sample_every > 0 && report.turn % sample_every == 0 {
                    log::info!("turn {}: {:?}", report.turn, report.counts);
                }
                if !cadence.is_zero() {
                    std::thread::sleep(cadence);
                }
            };
            let summary = match turns {
                Some(turns) => world.run_with(turns, sample_every, on_turn),
                None => world.run_to_completion(sample_every, on_turn),
            }
            .context("run failed")?;

            if let Some(out_dir) = out {
                std::fs::create_dir_all(&out_dir).context("failed to create output directory")?;
                write_json(&out_dir.join("summary.json"), &summary)?;
                write_json(&out_dir.join("entities.json"), &world.live_entities())?;
                println!("Run complete. Results saved to {out_dir:?}");
            } else {
                println!(
                    "Run complete after {} turns. Final counts: {:?}",
                    summary.turns, summary.final_counts
                );
            }
        }
    }
    Ok(())
}
