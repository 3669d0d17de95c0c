use chrono::NaiveDate;
use clap::ValueEnum;
use serde_derive::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing::Level;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Simulation {
    pub start_date: Option<String>,
    pub total_weeks: Option<u32>,
    pub films: Option<usize>,
    pub base_weekly_transactions: Option<u32>,
    pub weekly_new_customers: Option<u32>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RentalDistribution {
    pub enabled: Option<bool>,
    pub kind: Option<String>,
    pub alpha: Option<f64>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NewMovieBoost {
    pub enabled: Option<bool>,
    pub days_to_boost: Option<u32>,
    pub boost_factor: Option<f64>,
    pub boost_percentage: Option<u32>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PhaseWeeks {
    pub growth: Option<u32>,
    pub plateau: Option<u32>,
    pub decline: Option<u32>,
    pub reactivation: Option<u32>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct VolumeModifiers {
    pub growth_factor: Option<f64>,
    pub plateau_factor: Option<f64>,
    pub decline_factor: Option<f64>,
    pub reactivation_factor: Option<f64>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Seasonal {
    pub volatility: Option<f64>,
    pub multipliers: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Churn {
    pub customer_churn_after_weeks: Option<u32>,
    pub churn_rate: Option<f64>,
    pub loyal_customer_rate: Option<f64>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Rental {
    pub duration_min_days: Option<u32>,
    pub duration_max_days: Option<u32>,
    pub late_return_probability: Option<f64>,
    pub late_days_max: Option<u32>,
    pub payment_min: Option<f64>,
    pub payment_max: Option<f64>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Schedule {
    pub week_shift_threshold: Option<u32>,
    pub week_shift_duration: Option<u32>,
    pub spike_day_probability: Option<f64>,
    pub spike_day_multiplier: Option<u32>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Log {
    pub level: LogLevel,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: LogLevel::Info,
        }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub simulation: Simulation,
    pub rental_distribution: RentalDistribution,
    pub new_movie_boost: NewMovieBoost,
    pub phase_weeks: PhaseWeeks,
    pub volume_modifiers: VolumeModifiers,
    pub seasonal: Seasonal,
    pub churn: Churn,
    pub rental: Rental,
    pub schedule: Schedule,
    pub log: Log,
}

fn parse_date(s: &str) -> crate::error::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

fn parse_kind(s: &str) -> crate::error::Result<rentals_gen::config::DistributionKind> {
    match s {
        "power_law" => Ok(rentals_gen::config::DistributionKind::PowerLaw),
        "uniform" => Ok(rentals_gen::config::DistributionKind::Uniform),
        other => Err(crate::error::Error::BadRequest(format!(
            "unknown rental distribution kind: {other:?}"
        ))),
    }
}

impl TryInto<rentals_gen::config::Config> for Config {
    type Error = crate::error::Error;

    fn try_into(self) -> Result<rentals_gen::config::Config, Self::Error> {
        let defaults = rentals_gen::config::Config::default();

        let start_date = match &self.simulation.start_date {
            Some(s) => parse_date(s)?,
            None => defaults.start_date,
        };
        let kind = match &self.rental_distribution.kind {
            Some(s) => parse_kind(s)?,
            None => defaults.rental_distribution.kind,
        };
        let seasonal_multipliers = match &self.seasonal.multipliers {
            Some(m) => {
                if m.len() != 12 {
                    return Err(crate::error::Error::BadRequest(format!(
                        "seasonal.multipliers needs 12 monthly values, got {}",
                        m.len()
                    )));
                }
                let mut arr = [0.0; 12];
                arr.copy_from_slice(m);
                arr
            }
            None => defaults.seasonal_multipliers,
        };

        Ok(rentals_gen::config::Config {
            start_date,
            total_weeks: self.simulation.total_weeks.unwrap_or(defaults.total_weeks),
            films: self.simulation.films.unwrap_or(defaults.films),
            base_weekly_transactions: self
                .simulation
                .base_weekly_transactions
                .unwrap_or(defaults.base_weekly_transactions),
            weekly_new_customers: self
                .simulation
                .weekly_new_customers
                .unwrap_or(defaults.weekly_new_customers),
            rental_distribution: rentals_gen::config::RentalDistribution {
                enabled: self
                    .rental_distribution
                    .enabled
                    .unwrap_or(defaults.rental_distribution.enabled),
                kind,
                alpha: self
                    .rental_distribution
                    .alpha
                    .unwrap_or(defaults.rental_distribution.alpha),
            },
            new_movie_boost: rentals_gen::config::NewMovieBoost {
                enabled: self
                    .new_movie_boost
                    .enabled
                    .unwrap_or(defaults.new_movie_boost.enabled),
                days_to_boost: self
                    .new_movie_boost
                    .days_to_boost
                    .unwrap_or(defaults.new_movie_boost.days_to_boost),
                boost_factor: self
                    .new_movie_boost
                    .boost_factor
                    .unwrap_or(defaults.new_movie_boost.boost_factor),
                boost_percentage: self
                    .new_movie_boost
                    .boost_percentage
                    .unwrap_or(defaults.new_movie_boost.boost_percentage),
            },
            phase_weeks: rentals_gen::config::PhaseWeeks {
                growth: self.phase_weeks.growth.unwrap_or(defaults.phase_weeks.growth),
                plateau: self
                    .phase_weeks
                    .plateau
                    .unwrap_or(defaults.phase_weeks.plateau),
                decline: self
                    .phase_weeks
                    .decline
                    .unwrap_or(defaults.phase_weeks.decline),
                reactivation: self
                    .phase_weeks
                    .reactivation
                    .unwrap_or(defaults.phase_weeks.reactivation),
            },
            volume_modifiers: rentals_gen::config::VolumeModifiers {
                growth_factor: self
                    .volume_modifiers
                    .growth_factor
                    .unwrap_or(defaults.volume_modifiers.growth_factor),
                plateau_factor: self
                    .volume_modifiers
                    .plateau_factor
                    .unwrap_or(defaults.volume_modifiers.plateau_factor),
                decline_factor: self
                    .volume_modifiers
                    .decline_factor
                    .unwrap_or(defaults.volume_modifiers.decline_factor),
                reactivation_factor: self
                    .volume_modifiers
                    .reactivation_factor
                    .unwrap_or(defaults.volume_modifiers.reactivation_factor),
            },
            seasonal_volatility: self
                .seasonal
                .volatility
                .unwrap_or(defaults.seasonal_volatility),
            seasonal_multipliers,
            churn: rentals_gen::config::Churn {
                customer_churn_after_weeks: self
                    .churn
                    .customer_churn_after_weeks
                    .unwrap_or(defaults.churn.customer_churn_after_weeks),
                churn_rate: self.churn.churn_rate.unwrap_or(defaults.churn.churn_rate),
                loyal_customer_rate: self
                    .churn
                    .loyal_customer_rate
                    .unwrap_or(defaults.churn.loyal_customer_rate),
            },
            rental: rentals_gen::config::RentalTerms {
                duration_min_days: self
                    .rental
                    .duration_min_days
                    .unwrap_or(defaults.rental.duration_min_days),
                duration_max_days: self
                    .rental
                    .duration_max_days
                    .unwrap_or(defaults.rental.duration_max_days),
                late_return_probability: self
                    .rental
                    .late_return_probability
                    .unwrap_or(defaults.rental.late_return_probability),
                late_days_max: self
                    .rental
                    .late_days_max
                    .unwrap_or(defaults.rental.late_days_max),
                payment_min: self.rental.payment_min.unwrap_or(defaults.rental.payment_min),
                payment_max: self.rental.payment_max.unwrap_or(defaults.rental.payment_max),
            },
            schedule: rentals_gen::config::Schedule {
                week_shift_threshold: self
                    .schedule
                    .week_shift_threshold
                    .unwrap_or(defaults.schedule.week_shift_threshold),
                week_shift_duration: self
                    .schedule
                    .week_shift_duration
                    .unwrap_or(defaults.schedule.week_shift_duration),
                spike_day_probability: self
                    .schedule
                    .spike_day_probability
                    .unwrap_or(defaults.schedule.spike_day_probability),
                spike_day_multiplier: self
                    .schedule
                    .spike_day_multiplier
                    .unwrap_or(defaults.schedule.spike_day_multiplier),
            },
        })
    }
}

#[derive(Deserialize, Copy, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
        .into()
    }
}
