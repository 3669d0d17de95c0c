use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rentals_gen::config::Config;
use rentals_gen::store;
use rentals_gen::store::output::Output;
use tracing::debug;
use tracing::info;

use crate::error::Error;
use crate::error::Result;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum Format {
    Csv,
    Tsv,
}

#[derive(Parser, Clone)]
pub struct Gen {
    #[arg(long)]
    pub config: PathBuf,
    #[arg(long, default_value = "data")]
    out_path: PathBuf,
    /// fixed RNG seed, random when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

pub fn start(args: &Gen, cfg: Config) -> Result<()> {
    if !args.out_path.try_exists()? {
        return Err(Error::BadRequest(format!(
            "out path {:?} doesn't exist",
            args.out_path
        )));
    }

    debug!("out path: {:?} ({:?})", args.out_path, args.format);
    debug!("start date: {}", cfg.start_date);
    debug!("total weeks: {}", cfg.total_weeks);
    debug!("base weekly rentals: {}", cfg.base_weekly_transactions);
    let total_customers = cfg.weekly_new_customers as u64 * cfg.total_weeks as u64;
    info!("expecting total customers: {total_customers}");

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (ext, delimiter) = match args.format {
        Format::Csv => ("csv", b','),
        Format::Tsv => ("tsv", b'\t'),
    };
    let out = Output {
        films: writer(&args.out_path, "films", ext, delimiter)?,
        inventory: writer(&args.out_path, "inventory", ext, delimiter)?,
        customers: writer(&args.out_path, "customers", ext, delimiter)?,
        rentals: writer(&args.out_path, "rentals", ext, delimiter)?,
        payments: writer(&args.out_path, "payments", ext, delimiter)?,
    };

    info!("starting data generation...");
    let started = Instant::now();

    let mut scenario = store::create_scenario(cfg, rng, out)?;
    scenario.run()?;

    info!("done in {}", humantime::format_duration(started.elapsed()));

    Ok(())
}

fn writer(dir: &Path, name: &str, ext: &str, delimiter: u8) -> Result<csv::Writer<File>> {
    let path = dir.join(format!("{name}.{ext}"));

    Ok(csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?)
}
