use chrono::NaiveDate;
use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::config::NewMovieBoost;
use crate::error::RentalsGenError;
use crate::error::Result;
use crate::probability;

/// One rentable copy at the moment of a draw. `rental_count` is the film's
/// completed rentals across all copies, so copies of the same film share it.
#[derive(Debug, Clone)]
pub struct RentalCandidate {
    pub inventory_id: u32,
    pub film_id: u32,
    pub rental_count: u64,
    pub release_date: Option<NaiveDate>,
}

/// Draws inventory with probability skewed towards frequently rented films
/// (dense rank over rental counts, weight 1/(rank+1)^alpha) and towards
/// fresh releases while their boost window is open.
#[derive(Debug, Clone)]
pub struct InventorySampler {
    alpha: f64,
    boost: NewMovieBoost,
}

impl InventorySampler {
    pub fn try_new(alpha: f64, boost: NewMovieBoost) -> Result<Self> {
        if !(alpha > 0.0) {
            return Err(RentalsGenError::Config(format!(
                "distribution alpha must be positive, got {alpha}"
            )));
        }
        if boost.boost_factor < 1.0 {
            return Err(RentalsGenError::Config(format!(
                "boost factor must be at least 1.0, got {}",
                boost.boost_factor
            )));
        }
        if boost.boost_percentage > 100 {
            return Err(RentalsGenError::Config(format!(
                "boost percentage must be within 0..=100, got {}",
                boost.boost_percentage
            )));
        }
        if boost.days_to_boost == 0 {
            return Err(RentalsGenError::Config(
                "boost window must be at least one day".to_string(),
            ));
        }

        Ok(InventorySampler { alpha, boost })
    }

    /// Linear decay from `boost_factor` at release day down to 1.0 at the end
    /// of the window. Eligibility is deterministic per film.
    fn boost_multiplier(&self, candidate: &RentalCandidate, as_of: NaiveDate) -> f64 {
        if !self.boost.enabled {
            return 1.0;
        }
        let release = match candidate.release_date {
            Some(date) => date,
            None => return 1.0,
        };
        let days = (as_of - release).num_days();
        if days < 0 || days > self.boost.days_to_boost as i64 {
            return 1.0;
        }
        if candidate.film_id % 100 >= self.boost.boost_percentage {
            return 1.0;
        }

        let progress = days as f64 / self.boost.days_to_boost as f64;
        self.boost.boost_factor - progress * (self.boost.boost_factor - 1.0)
    }

    /// Normalized selection probabilities in candidate order.
    pub fn weights(&self, candidates: &[RentalCandidate], as_of: NaiveDate) -> Result<Vec<f64>> {
        if candidates.is_empty() {
            return Err(RentalsGenError::NoCandidates);
        }

        let counts = candidates
            .iter()
            .map(|c| c.rental_count)
            .collect::<Vec<_>>();
        let ranks = probability::dense_ranks(&counts);
        let mut weights = candidates
            .iter()
            .zip(ranks)
            .map(|(c, rank)| {
                probability::zipfian_weight(rank, self.alpha) * self.boost_multiplier(c, as_of)
            })
            .collect::<Vec<_>>();
        probability::normalize(&mut weights);

        Ok(weights)
    }

    pub fn sample<'a, R: Rng>(
        &self,
        candidates: &'a [RentalCandidate],
        as_of: NaiveDate,
        rng: &mut R,
    ) -> Result<&'a RentalCandidate> {
        let weights = self.weights(candidates, as_of)?;
        let idx = WeightedIndex::new(&weights)?;

        Ok(&candidates[idx.sample(rng)])
    }
}
