use std::io;

use rand::rngs::StdRng;

use crate::config::Config;
use crate::error::RentalsGenError;
use crate::error::Result;
use crate::generator;
use crate::generator::Generator;
use crate::store::customers::CustomerProvider;
use crate::store::films::FilmProvider;
use crate::store::inventory::InventorySampler;
use crate::store::lifecycle::Lifecycle;
use crate::store::lifecycle::SeasonalTable;
use crate::store::output::Output;
use crate::store::rentals::CheckoutSynth;
use crate::store::scenario::Scenario;
use crate::store::schedule::WeekSchedule;

pub mod customers;
pub mod films;
pub mod inventory;
pub mod lifecycle;
pub mod output;
pub mod rentals;
pub mod scenario;
pub mod schedule;

/// Builds the week planner alone, without any of the output plumbing.
pub fn create_generator(cfg: &Config) -> Result<Generator> {
    let lifecycle = Lifecycle::try_new(cfg.phase_weeks, cfg.volume_modifiers)?;
    let seasonal = SeasonalTable::try_new(cfg.seasonal_multipliers, cfg.seasonal_volatility)?;
    let schedule = WeekSchedule::try_new(cfg.schedule.clone())?;

    Ok(Generator::new(generator::Config {
        start_date: cfg.start_date,
        total_weeks: cfg.total_weeks,
        base_weekly_transactions: cfg.base_weekly_transactions,
        lifecycle,
        seasonal,
        schedule,
    }))
}

/// Wires a validated runtime config into a ready-to-run [`Scenario`]. Every
/// component constructor checks its own slice of the config, so a bad value
/// surfaces here instead of mid-simulation.
pub fn create_scenario<W: io::Write>(
    cfg: Config,
    rng: StdRng,
    out: Output<W>,
) -> Result<Scenario<W>> {
    if cfg.films == 0 {
        return Err(RentalsGenError::Config(
            "at least one film is required".to_string(),
        ));
    }

    let gen = create_generator(&cfg)?;
    let customers = CustomerProvider::try_new(cfg.churn, cfg.schedule.week_shift_threshold)?;
    let sampler = InventorySampler::try_new(cfg.rental_distribution.alpha, cfg.new_movie_boost)?;
    let synth = CheckoutSynth::try_new(cfg.rental)?;

    let run_cfg = scenario::Config {
        rng,
        gen,
        films: FilmProvider::new(),
        customers,
        sampler,
        synth,
        distribution: cfg.rental_distribution,
        initial_films: cfg.films,
        weekly_new_customers: cfg.weekly_new_customers,
        out,
    };

    Ok(Scenario::new(run_cfg))
}
