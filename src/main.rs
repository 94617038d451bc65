use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use roadsim::description;
use roadsim::simulation::{fatal, DEFAULT_SEED};

#[derive(Parser)]
#[command(name = "roadsim")]
#[command(about = "Discrete-event simulation of traffic on a road network")]
struct Cli {
    /// File holding the road network description
    file: PathBuf,

    /// Seed for the random choice of outgoing roads
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Stop before the first event later than this virtual time
    #[arg(long)]
    until: Option<f32>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        fatal(format!("{:#}", e));
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut world = description::read_network_file(&cli.file, cli.seed)?;

    let errors = world.diagnostics().count();
    if errors > 0 {
        info!("{} errors in the network description, not simulating", errors);
        print!("{}", world.road_network);
        std::process::exit(1);
    }

    let summary = match cli.until {
        Some(horizon) => world.run_until(horizon)?,
        None => world.run()?,
    };
    info!(
        "{} events triggered, last at {}",
        summary.events_triggered, summary.final_time
    );
    Ok(())
}
