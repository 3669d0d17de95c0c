use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rentals_gen::config::Config;
use rentals_gen::store;

use crate::error::Result;

#[derive(Parser, Clone)]
pub struct Plan {
    #[arg(long)]
    pub config: PathBuf,
    /// fixed RNG seed, random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

/// Prints the week-by-week volume plan without synthesizing any rentals.
pub fn start(args: &Plan, cfg: Config) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut gen = store::create_generator(&cfg)?;

    println!(
        "{:>5}  {:>10}  {:>12}  {:>8}  {:>8}  {:>8}",
        "week", "start", "phase", "volume", "seasonal", "rentals"
    );
    while let Some(plan) = gen.next_week(&mut rng) {
        println!(
            "{:>5}  {:>10}  {:>12}  {:>8.3}  {:>8.3}  {:>8}",
            plan.week,
            plan.start,
            plan.phase,
            plan.volume_modifier,
            plan.seasonal_multiplier,
            plan.expected_transactions
        );
    }

    Ok(())
}
