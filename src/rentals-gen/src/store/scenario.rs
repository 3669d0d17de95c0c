use std::collections::HashMap;
use std::collections::HashSet;
use std::io;

use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::DistributionKind;
use crate::config::RentalDistribution;
use crate::error::RentalsGenError;
use crate::error::Result;
use crate::generator::Generator;
use crate::generator::WeekPlan;
use crate::store::customers::CustomerProvider;
use crate::store::films::FilmProvider;
use crate::store::films::CATEGORIES;
use crate::store::inventory::InventorySampler;
use crate::store::output::Output;
use crate::store::rentals::CheckoutSynth;
use crate::store::schedule::DayLoad;

const RELEASE_CADENCE_WEEKS: u32 = 13;
const FILMS_PER_RELEASE: usize = 20;

pub struct Config<W: io::Write> {
    pub rng: StdRng,
    pub gen: Generator,
    pub films: FilmProvider,
    pub customers: CustomerProvider,
    pub sampler: InventorySampler,
    pub synth: CheckoutSynth,
    pub distribution: RentalDistribution,
    pub initial_films: usize,
    pub weekly_new_customers: u32,
    pub out: Output<W>,
}

pub struct Scenario<W: io::Write> {
    rng: StdRng,
    gen: Generator,
    films: FilmProvider,
    customers: CustomerProvider,
    sampler: InventorySampler,
    synth: CheckoutSynth,
    weighted: bool,
    initial_films: usize,
    weekly_new_customers: u32,
    out: Output<W>,
    // inventory_id -> timestamp the copy comes back to the shelf
    out_until: HashMap<u32, NaiveDateTime>,
}

impl<W: io::Write> Scenario<W> {
    pub fn new(cfg: Config<W>) -> Self {
        let weighted =
            cfg.distribution.enabled && cfg.distribution.kind == DistributionKind::PowerLaw;

        Self {
            rng: cfg.rng,
            gen: cfg.gen,
            films: cfg.films,
            customers: cfg.customers,
            sampler: cfg.sampler,
            synth: cfg.synth,
            weighted,
            initial_films: cfg.initial_films,
            weekly_new_customers: cfg.weekly_new_customers,
            out: cfg.out,
            out_until: HashMap::new(),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut overall_rentals = 0usize;
        let mut first_week = true;

        while let Some(plan) = self.gen.next_week(&mut self.rng) {
            if first_week {
                self.seed_catalog(plan.start)?;
                first_week = false;
            }
            overall_rentals += self.run_week(&plan)?;
        }

        info!("total films: {}", self.films.films().len());
        info!("total inventory copies: {}", self.films.copies().len());
        info!(
            "total customers: {} ({} churned)",
            self.customers.customers().len(),
            self.customers.churned_count()
        );
        info!("total rentals: {overall_rentals}");

        self.out.flush()?;

        Ok(())
    }

    fn seed_catalog(&mut self, start: NaiveDate) -> Result<()> {
        let films = self
            .films
            .add_initial_catalog(self.initial_films, start, &mut self.rng);
        for film in films {
            self.out.films.serialize(film)?;
        }
        let ids = films.iter().map(|f| f.film_id).collect::<Vec<_>>();

        let copies = self.films.stock_films(&ids, &mut self.rng);
        for copy in copies {
            self.out.inventory.serialize(copy)?;
        }

        debug!(
            "initial catalog: {} films, {} copies",
            self.films.films().len(),
            self.films.copies().len()
        );

        Ok(())
    }

    fn run_week(&mut self, plan: &WeekPlan) -> Result<usize> {
        debug!(
            "week {} ({}, {} phase): {} rentals expected",
            plan.week, plan.start, plan.phase, plan.expected_transactions
        );

        let newcomers = self.customers.add_weekly(
            self.weekly_new_customers,
            plan.week,
            plan.start,
            &mut self.rng,
        );
        for customer in newcomers {
            self.out.customers.serialize(customer)?;
        }

        if plan.week % RELEASE_CADENCE_WEEKS == 0 {
            self.release_films(plan)?;
        }

        if let Some(copies) = FilmProvider::restock_for_week(plan.week, plan.phase) {
            let restocked = self.films.restock(copies, &mut self.rng);
            for copy in restocked {
                self.out.inventory.serialize(copy)?;
            }
        }

        let active = self.customers.active_for_week(plan.week, &mut self.rng);
        if active.is_empty() {
            warn!("week {}: every customer churned, no rentals", plan.week);
            return Ok(0);
        }

        let mut rentals = 0;
        for (day_idx, load) in plan.days.iter().enumerate() {
            let day = plan.start + Duration::days(day_idx as i64);
            rentals += self.run_day(day, *load, &active)?;
        }

        Ok(rentals)
    }

    fn release_films(&mut self, plan: &WeekPlan) -> Result<()> {
        let quarter = plan.week / RELEASE_CADENCE_WEEKS;
        let category = CATEGORIES[quarter as usize % CATEGORIES.len()];

        let films =
            self.films
                .add_release_batch(FILMS_PER_RELEASE, category, plan.start, &mut self.rng);
        for film in films {
            self.out.films.serialize(film)?;
        }
        let ids = films.iter().map(|f| f.film_id).collect::<Vec<_>>();

        let copies = self.films.stock_films(&ids, &mut self.rng);
        for copy in copies {
            self.out.inventory.serialize(copy)?;
        }

        debug!("week {}: released {} {category} films", plan.week, ids.len());

        Ok(())
    }

    fn run_day(&mut self, day: NaiveDate, load: DayLoad, active: &[u32]) -> Result<usize> {
        let day_start = day.and_hms_opt(0, 0, 0).unwrap();
        self.out_until.retain(|_, due| *due > day_start);
        let mut out_now = self.out_until.keys().copied().collect::<HashSet<_>>();

        if load.spike {
            debug!("{day}: demand spike, {} rentals", load.transactions);
        }

        let mut rentals = 0;
        for _ in 0..load.transactions {
            let customer_id = match self.customers.sample(active, &mut self.rng) {
                Some(id) => id,
                None => break,
            };

            let candidates = self.films.candidates(&out_now);
            let picked = if self.weighted {
                self.sampler.sample(&candidates, day, &mut self.rng)?
            } else {
                candidates
                    .choose(&mut self.rng)
                    .ok_or(RentalsGenError::NoCandidates)?
            };
            let inventory_id = picked.inventory_id;
            let film_id = picked.film_id;

            let checkout = self
                .synth
                .checkout(day, inventory_id, customer_id, &mut self.rng);
            self.films.record_rental(film_id)?;
            self.out.rentals.serialize(&checkout.rental)?;
            self.out.payments.serialize(&checkout.payment)?;

            self.out_until.insert(inventory_id, checkout.rental.return_date);
            out_now.insert(inventory_id);
            rentals += 1;
        }

        Ok(rentals)
    }
}
