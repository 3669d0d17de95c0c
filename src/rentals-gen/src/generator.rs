use std::fmt::Write;

use chrono::Datelike;
use chrono::Duration;
use chrono::NaiveDate;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use rand::Rng;

use crate::store::lifecycle::Lifecycle;
use crate::store::lifecycle::Phase;
use crate::store::lifecycle::SeasonalTable;
use crate::store::schedule::DayLoad;
use crate::store::schedule::WeekSchedule;

pub struct Generator {
    lifecycle: Lifecycle,
    seasonal: SeasonalTable,
    schedule: WeekSchedule,
    base_weekly_transactions: u32,
    start_monday: NaiveDate,
    cur_week: u32,
    total_weeks: u32,
    pb: ProgressBar,
}

/// Volume plan for one simulated week.
#[derive(Debug, Clone)]
pub struct WeekPlan {
    /// 1-based week number
    pub week: u32,
    /// Monday of the week
    pub start: NaiveDate,
    pub phase: Phase,
    pub volume_modifier: f64,
    pub seasonal_multiplier: f64,
    pub expected_transactions: u32,
    pub days: [DayLoad; 7],
}

pub struct Config {
    pub start_date: NaiveDate,
    pub total_weeks: u32,
    pub base_weekly_transactions: u32,
    pub lifecycle: Lifecycle,
    pub seasonal: SeasonalTable,
    pub schedule: WeekSchedule,
}

impl Generator {
    pub fn new(cfg: Config) -> Self {
        let pb = ProgressBar::new(cfg.total_weeks as u64);
        pb.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} weeks ({eta})")
            .unwrap()
            .with_key("eta", |state: &ProgressState, w: &mut dyn Write| write!(w, "{:.1}s", state.eta().as_secs_f64()).unwrap())
            .progress_chars("#>-"));

        // align on Monday so week offsets line up with the day tables
        let start_monday = cfg.start_date
            - Duration::days(cfg.start_date.weekday().num_days_from_monday() as i64);

        Self {
            lifecycle: cfg.lifecycle,
            seasonal: cfg.seasonal,
            schedule: cfg.schedule,
            base_weekly_transactions: cfg.base_weekly_transactions,
            start_monday,
            cur_week: 0,
            total_weeks: cfg.total_weeks,
            pb,
        }
    }

    pub fn next_week<R: Rng>(&mut self, rng: &mut R) -> Option<WeekPlan> {
        if self.cur_week >= self.total_weeks {
            self.pb.finish_with_message("done");

            return None;
        }

        self.cur_week += 1;
        let week = self.cur_week;
        let start = self.start_monday + Duration::weeks((week - 1) as i64);
        let phase = self.lifecycle.phase_for_week(week);
        let volume_modifier = self.lifecycle.volume_modifier(week);
        let seasonal_multiplier = self.seasonal.multiplier(start, phase == Phase::Plateau, rng);
        let expected_transactions = (self.base_weekly_transactions as f64
            * (1.0 + volume_modifier)
            * seasonal_multiplier)
            .round()
            .max(0.0) as u32;
        let days = self.schedule.day_loads(expected_transactions, week - 1, rng);

        self.pb.inc(1);

        Some(WeekPlan {
            week,
            start,
            phase,
            volume_modifier,
            seasonal_multiplier,
            expected_transactions,
            days,
        })
    }
}
