use std::collections::HashSet;

use chrono::Datelike;
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::RentalsGenError;
use crate::error::Result;
use crate::store::inventory::RentalCandidate;
use crate::store::lifecycle::Phase;

pub const CATEGORIES: [&str; 9] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Romance",
    "Sci-Fi",
    "Animation",
    "Family",
    "Thriller",
];

const TITLE_ADJECTIVES: [&str; 8] = [
    "The", "A", "Silent", "Crazy", "Dark", "Bright", "Lost", "Found",
];
const TITLE_NOUNS: [&str; 8] = [
    "Matrix",
    "Dream",
    "Knight",
    "Voyage",
    "Dynasty",
    "Heist",
    "Forest",
    "Redemption",
];
const TITLE_MODIFIERS: [&str; 6] = [
    "",
    " Returns",
    " Reloaded",
    " Revolutions",
    " Awakens",
    " Strikes Back",
];
const RATINGS: [&str; 3] = ["PG", "PG-13", "R"];

const COPIES_PER_FILM_MIN: u32 = 2;
const COPIES_PER_FILM_MAX: u32 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Film {
    pub film_id: u32,
    pub title: String,
    pub category: String,
    pub rating: String,
    pub release_date: NaiveDate,
    pub rental_rate: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct InventoryCopy {
    pub inventory_id: u32,
    pub film_id: u32,
}

/// Owns the film catalog, the physical copies, and the per-film rental
/// counts that drive popularity ranking. Film ids are sequential from 1 and
/// double as catalog indices.
pub struct FilmProvider {
    films: Vec<Film>,
    copies: Vec<InventoryCopy>,
    rental_counts: Vec<u64>,
    used_titles: HashSet<String>,
}

impl FilmProvider {
    pub fn new() -> Self {
        FilmProvider {
            films: Vec::new(),
            copies: Vec::new(),
            rental_counts: Vec::new(),
            used_titles: HashSet::new(),
        }
    }

    /// Seeds the catalog that exists before the simulation starts: release
    /// dates land one to ten years back, so the boost window never covers
    /// them.
    pub fn add_initial_catalog<R: Rng>(
        &mut self,
        count: usize,
        start_date: NaiveDate,
        rng: &mut R,
    ) -> &[Film] {
        let first = self.films.len();
        for _ in 0..count {
            let year = rng.gen_range(start_date.year() - 10..=start_date.year() - 1);
            let month = rng.gen_range(1..=12);
            let day = rng.gen_range(1..=28);
            // in-range by construction
            let release_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let category = CATEGORIES.choose(rng).unwrap().to_string();
            self.add_film(category, release_date, rng);
        }

        &self.films[first..]
    }

    /// A batch of same-category films released on the given date, eligible
    /// for the new-release boost while the window lasts.
    pub fn add_release_batch<R: Rng>(
        &mut self,
        count: usize,
        category: &str,
        release_date: NaiveDate,
        rng: &mut R,
    ) -> &[Film] {
        let first = self.films.len();
        for _ in 0..count {
            self.add_film(category.to_string(), release_date, rng);
        }

        &self.films[first..]
    }

    fn add_film<R: Rng>(&mut self, category: String, release_date: NaiveDate, rng: &mut R) {
        let film_id = self.films.len() as u32 + 1;
        let title = self.unique_title(rng);
        let rating = RATINGS.choose(rng).unwrap().to_string();
        let rate_cents = rng.gen_range(299..=999);
        self.films.push(Film {
            film_id,
            title,
            category,
            rating,
            release_date,
            rental_rate: Decimal::new(rate_cents, 2),
        });
        self.rental_counts.push(0);
    }

    fn unique_title<R: Rng>(&mut self, rng: &mut R) -> String {
        let adj = TITLE_ADJECTIVES.choose(rng).unwrap();
        let noun = TITLE_NOUNS.choose(rng).unwrap();
        let modifier = TITLE_MODIFIERS.choose(rng).unwrap();
        let base = format!("{adj} {noun}{modifier}");

        let mut title = base.clone();
        let mut counter = 1;
        while self.used_titles.contains(&title) {
            title = format!("{base} ({counter})");
            counter += 1;
        }
        self.used_titles.insert(title.clone());

        title
    }

    /// 2..=5 copies for each listed film, in film order.
    pub fn stock_films<R: Rng>(&mut self, film_ids: &[u32], rng: &mut R) -> &[InventoryCopy] {
        let first = self.copies.len();
        for film_id in film_ids {
            let count = rng.gen_range(COPIES_PER_FILM_MIN..=COPIES_PER_FILM_MAX);
            for _ in 0..count {
                self.add_copy(*film_id);
            }
        }

        &self.copies[first..]
    }

    /// Spreads extra copies over random existing films. The amount per phase
    /// follows the purchasing cadence of the business plan.
    pub fn restock<R: Rng>(&mut self, copies: u32, rng: &mut R) -> &[InventoryCopy] {
        let first = self.copies.len();
        for _ in 0..copies {
            if let Some(film) = self.films.choose(rng) {
                let film_id = film.film_id;
                self.add_copy(film_id);
            }
        }

        &self.copies[first..]
    }

    fn add_copy(&mut self, film_id: u32) {
        let inventory_id = self.copies.len() as u32 + 1;
        self.copies.push(InventoryCopy {
            inventory_id,
            film_id,
        });
    }

    /// Weekly copy purchases per phase: cadence in weeks and batch size.
    pub fn restock_for_week(week: u32, phase: Phase) -> Option<u32> {
        let (cadence, amount) = match phase {
            Phase::Growth => (13, 50),
            Phase::Plateau => (16, 30),
            Phase::Decline => (20, 15),
            Phase::Reactivation => (12, 25),
        };
        if week > 0 && week % cadence == 0 {
            Some(amount)
        } else {
            None
        }
    }

    pub fn record_rental(&mut self, film_id: u32) -> Result<()> {
        let idx = film_id as usize - 1;
        match self.rental_counts.get_mut(idx) {
            Some(count) => {
                *count += 1;
                Ok(())
            }
            None => Err(RentalsGenError::Internal(format!(
                "rental recorded for unknown film {film_id}"
            ))),
        }
    }

    pub fn rental_count(&self, film_id: u32) -> u64 {
        self.rental_counts
            .get(film_id as usize - 1)
            .copied()
            .unwrap_or(0)
    }

    /// Copies open for rent today. When every copy is out the whole catalog
    /// is offered instead, matching a store that never turns a customer away.
    pub fn candidates(&self, unavailable: &HashSet<u32>) -> Vec<RentalCandidate> {
        let available = self
            .copies
            .iter()
            .filter(|c| !unavailable.contains(&c.inventory_id))
            .map(|c| self.candidate(c))
            .collect::<Vec<_>>();
        if !available.is_empty() {
            return available;
        }

        self.copies.iter().map(|c| self.candidate(c)).collect()
    }

    fn candidate(&self, copy: &InventoryCopy) -> RentalCandidate {
        RentalCandidate {
            inventory_id: copy.inventory_id,
            film_id: copy.film_id,
            rental_count: self.rental_count(copy.film_id),
            release_date: self
                .films
                .get(copy.film_id as usize - 1)
                .map(|f| f.release_date),
        }
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn copies(&self) -> &[InventoryCopy] {
        &self.copies
    }
}

impl Default for FilmProvider {
    fn default() -> Self {
        Self::new()
    }
}
