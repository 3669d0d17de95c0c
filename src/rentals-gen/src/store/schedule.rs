use rand::Rng;

use crate::config::Schedule;
use crate::error::RentalsGenError;
use crate::error::Result;

// Mon..Sun shares while the store is new and weekend browsing dominates.
const EARLY_WEEK_DISTRIBUTION: [f64; 7] = [0.1, 0.1, 0.1, 0.1, 0.15, 0.2, 0.15];

#[derive(Debug, Clone, Copy, Default)]
pub struct DayLoad {
    pub transactions: u32,
    pub spike: bool,
}

/// Splits a weekly transaction target across the seven days. The split
/// drifts from weekend-heavy to weekday-heavy once the shift threshold
/// passes, and any day can spike to several times its usual volume.
#[derive(Debug, Clone)]
pub struct WeekSchedule {
    cfg: Schedule,
}

impl WeekSchedule {
    pub fn try_new(cfg: Schedule) -> Result<Self> {
        if cfg.week_shift_duration == 0 {
            return Err(RentalsGenError::Config(
                "week shift duration must be at least one week".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&cfg.spike_day_probability) {
            return Err(RentalsGenError::Config(format!(
                "spike day probability must be within 0..=1, got {}",
                cfg.spike_day_probability
            )));
        }
        if cfg.spike_day_multiplier == 0 {
            return Err(RentalsGenError::Config(
                "spike day multiplier must be positive".to_string(),
            ));
        }

        Ok(WeekSchedule { cfg })
    }

    /// Mon..Sun shares for a week. The tables are not normalized, so the
    /// realized weekly volume floats a few percent around the target.
    pub fn day_distribution(&self, weeks_elapsed: u32) -> [f64; 7] {
        if weeks_elapsed < self.cfg.week_shift_threshold {
            return EARLY_WEEK_DISTRIBUTION;
        }

        let progress = ((weeks_elapsed - self.cfg.week_shift_threshold) as f64
            / self.cfg.week_shift_duration as f64)
            .min(1.0);
        let base_weekday = 0.12 + 0.08 * progress;
        let base_weekend = 0.15 - 0.05 * progress;

        [
            base_weekday,
            base_weekday,
            base_weekday,
            // Thursday runs a bit hotter, Sunday a bit cooler
            base_weekday + 0.01,
            base_weekend,
            base_weekend,
            base_weekend - 0.01,
        ]
    }

    pub fn day_loads<R: Rng>(&self, expected: u32, weeks_elapsed: u32, rng: &mut R) -> [DayLoad; 7] {
        let dist = self.day_distribution(weeks_elapsed);
        let mut loads = [DayLoad::default(); 7];
        for (load, share) in loads.iter_mut().zip(dist) {
            load.transactions = (expected as f64 * share) as u32;
            load.spike = rng.gen::<f64>() < self.cfg.spike_day_probability;
            if load.spike {
                load.transactions *= self.cfg.spike_day_multiplier;
            }
        }

        loads
    }
}
