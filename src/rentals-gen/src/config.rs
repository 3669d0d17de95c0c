use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    PowerLaw,
    Uniform,
}

#[derive(Debug, Clone)]
pub struct RentalDistribution {
    pub enabled: bool,
    pub kind: DistributionKind,
    pub alpha: f64,
}

impl Default for RentalDistribution {
    fn default() -> Self {
        RentalDistribution {
            enabled: true,
            kind: DistributionKind::PowerLaw,
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMovieBoost {
    pub enabled: bool,
    pub days_to_boost: u32,
    pub boost_factor: f64,
    pub boost_percentage: u32,
}

impl Default for NewMovieBoost {
    fn default() -> Self {
        NewMovieBoost {
            enabled: true,
            days_to_boost: 90,
            boost_factor: 2.0,
            boost_percentage: 100,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PhaseWeeks {
    pub growth: u32,
    pub plateau: u32,
    pub decline: u32,
    pub reactivation: u32,
}

impl Default for PhaseWeeks {
    fn default() -> Self {
        PhaseWeeks {
            growth: 104,
            plateau: 208,
            decline: 104,
            reactivation: 104,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VolumeModifiers {
    pub growth_factor: f64,
    pub plateau_factor: f64,
    pub decline_factor: f64,
    pub reactivation_factor: f64,
}

impl Default for VolumeModifiers {
    fn default() -> Self {
        VolumeModifiers {
            growth_factor: 0.025,
            plateau_factor: 0.0,
            decline_factor: -0.005,
            reactivation_factor: 0.015,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Churn {
    pub customer_churn_after_weeks: u32,
    pub churn_rate: f64,
    pub loyal_customer_rate: f64,
}

impl Default for Churn {
    fn default() -> Self {
        Churn {
            customer_churn_after_weeks: 5,
            churn_rate: 0.4,
            loyal_customer_rate: 0.15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RentalTerms {
    pub duration_min_days: u32,
    pub duration_max_days: u32,
    pub late_return_probability: f64,
    pub late_days_max: u32,
    pub payment_min: f64,
    pub payment_max: f64,
}

impl Default for RentalTerms {
    fn default() -> Self {
        RentalTerms {
            duration_min_days: 3,
            duration_max_days: 7,
            late_return_probability: 0.3,
            late_days_max: 14,
            payment_min: 2.99,
            payment_max: 15.99,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub week_shift_threshold: u32,
    pub week_shift_duration: u32,
    pub spike_day_probability: f64,
    pub spike_day_multiplier: u32,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            week_shift_threshold: 8,
            week_shift_duration: 16,
            spike_day_probability: 0.05,
            spike_day_multiplier: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub start_date: NaiveDate,
    pub total_weeks: u32,
    pub films: usize,
    pub base_weekly_transactions: u32,
    pub weekly_new_customers: u32,
    pub rental_distribution: RentalDistribution,
    pub new_movie_boost: NewMovieBoost,
    pub phase_weeks: PhaseWeeks,
    pub volume_modifiers: VolumeModifiers,
    pub seasonal_volatility: f64,
    // month 1..=12 -> signed percentage
    pub seasonal_multipliers: [f64; 12],
    pub churn: Churn,
    pub rental: RentalTerms,
    pub schedule: Schedule,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            start_date: NaiveDate::from_ymd_opt(2001, 10, 1).unwrap(),
            total_weeks: 520,
            films: 100,
            base_weekly_transactions: 500,
            weekly_new_customers: 10,
            rental_distribution: Default::default(),
            new_movie_boost: Default::default(),
            phase_weeks: Default::default(),
            volume_modifiers: Default::default(),
            seasonal_volatility: 0.1,
            seasonal_multipliers: [
                20.0, -10.0, 10.0, 15.0, 20.0, 80.0, 100.0, 90.0, 30.0, 25.0, 40.0, 60.0,
            ],
            churn: Default::default(),
            rental: Default::default(),
            schedule: Default::default(),
        }
    }
}
