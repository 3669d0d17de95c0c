use chrono::Datelike;
use chrono::NaiveDate;
use enum_iterator::Sequence;
use rand::Rng;
use strum_macros::Display;

use crate::config::PhaseWeeks;
use crate::config::VolumeModifiers;
use crate::error::RentalsGenError;
use crate::error::Result;

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, Display, Sequence)]
pub enum Phase {
    #[strum(serialize = "growth")]
    Growth,
    #[strum(serialize = "plateau")]
    Plateau,
    #[strum(serialize = "decline")]
    Decline,
    #[strum(serialize = "reactivation")]
    Reactivation,
}

/// Maps a 1-based simulation week onto the business lifecycle. Phases are
/// consumed cumulatively and boundaries are inclusive of the end week.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phases: PhaseWeeks,
    modifiers: VolumeModifiers,
}

impl Lifecycle {
    pub fn try_new(phases: PhaseWeeks, modifiers: VolumeModifiers) -> Result<Self> {
        if phases.growth + phases.plateau + phases.decline + phases.reactivation == 0 {
            return Err(RentalsGenError::Config(
                "all lifecycle phase lengths are zero".to_string(),
            ));
        }

        Ok(Lifecycle { phases, modifiers })
    }

    pub fn growth_end(&self) -> u32 {
        self.phases.growth
    }

    pub fn plateau_end(&self) -> u32 {
        self.phases.growth + self.phases.plateau
    }

    pub fn decline_end(&self) -> u32 {
        self.plateau_end() + self.phases.decline
    }

    pub fn reactivation_end(&self) -> u32 {
        self.decline_end() + self.phases.reactivation
    }

    pub fn phase_for_week(&self, week: u32) -> Phase {
        if week <= self.growth_end() {
            Phase::Growth
        } else if week <= self.plateau_end() {
            Phase::Plateau
        } else if week <= self.decline_end() {
            Phase::Decline
        } else {
            Phase::Reactivation
        }
    }

    /// Signed fractional adjustment to the base weekly volume. Growth scales
    /// with the absolute week number, decline and reactivation with the weeks
    /// elapsed since their phase began.
    pub fn volume_modifier(&self, week: u32) -> f64 {
        match self.phase_for_week(week) {
            Phase::Growth => self.modifiers.growth_factor * week as f64,
            Phase::Plateau => self.modifiers.plateau_factor,
            Phase::Decline => self.modifiers.decline_factor * (week - self.plateau_end()) as f64,
            Phase::Reactivation => {
                self.modifiers.reactivation_factor * (week - self.decline_end()) as f64
            }
        }
    }
}

/// Month-indexed percentage adjustments, e.g. +100 doubles July volume.
/// Jitter is only requested by the caller during the plateau phase.
#[derive(Debug, Clone)]
pub struct SeasonalTable {
    by_month: [f64; 12],
    volatility: f64,
}

impl SeasonalTable {
    pub fn try_new(by_month: [f64; 12], volatility: f64) -> Result<Self> {
        if volatility < 0.0 {
            return Err(RentalsGenError::Config(format!(
                "seasonal volatility must be non-negative, got {volatility}"
            )));
        }

        Ok(SeasonalTable {
            by_month,
            volatility,
        })
    }

    pub fn multiplier<R: Rng>(&self, date: NaiveDate, add_jitter: bool, rng: &mut R) -> f64 {
        let mut pct = self.by_month[date.month0() as usize];
        if add_jitter {
            pct += rng.gen_range(-self.volatility * 100.0..=self.volatility * 100.0);
        }
        1.0 + pct / 100.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use enum_iterator::all;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn lifecycle() -> Lifecycle {
        Lifecycle::try_new(PhaseWeeks::default(), VolumeModifiers::default()).unwrap()
    }

    #[test]
    fn test_default_horizon_passes_through_every_phase() {
        let lc = lifecycle();
        let seen = (1..=520).map(|w| lc.phase_for_week(w)).collect::<HashSet<_>>();
        for phase in all::<Phase>() {
            assert!(seen.contains(&phase), "{phase} never reached");
        }
    }

    #[test]
    fn test_phase_boundaries_inclusive() {
        let lc = lifecycle();
        assert_eq!(lc.phase_for_week(1), Phase::Growth);
        assert_eq!(lc.phase_for_week(104), Phase::Growth);
        assert_eq!(lc.phase_for_week(105), Phase::Plateau);
        assert_eq!(lc.phase_for_week(312), Phase::Plateau);
        assert_eq!(lc.phase_for_week(313), Phase::Decline);
        assert_eq!(lc.phase_for_week(416), Phase::Decline);
        assert_eq!(lc.phase_for_week(417), Phase::Reactivation);
        assert_eq!(lc.phase_for_week(2000), Phase::Reactivation);
    }

    #[test]
    fn test_growth_modifier_scales_with_week() {
        let lc = lifecycle();
        assert!((lc.volume_modifier(10) - 0.25).abs() < 1e-12);
        assert!((lc.volume_modifier(100) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_decline_and_reactivation_offsets() {
        let lc = lifecycle();
        assert!((lc.volume_modifier(200) - 0.0).abs() < 1e-12);
        assert!((lc.volume_modifier(313) - -0.005).abs() < 1e-12);
        assert!((lc.volume_modifier(322) - -0.05).abs() < 1e-12);
        assert!((lc.volume_modifier(417) - 0.015).abs() < 1e-12);
    }

    #[test]
    fn test_zero_phases_rejected() {
        let phases = PhaseWeeks {
            growth: 0,
            plateau: 0,
            decline: 0,
            reactivation: 0,
        };
        let res = Lifecycle::try_new(phases, VolumeModifiers::default());
        assert!(matches!(res, Err(RentalsGenError::Config(_))));
    }

    #[test]
    fn test_seasonal_multiplier_no_jitter() {
        let table = SeasonalTable::try_new(
            [
                20.0, -10.0, 10.0, 15.0, 20.0, 80.0, 100.0, 90.0, 30.0, 25.0, 40.0, 60.0,
            ],
            0.1,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let july = NaiveDate::from_ymd_opt(2003, 7, 14).unwrap();
        assert!((table.multiplier(july, false, &mut rng) - 2.0).abs() < 1e-12);

        let feb = NaiveDate::from_ymd_opt(2003, 2, 3).unwrap();
        assert!((table.multiplier(feb, false, &mut rng) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_seasonal_jitter_bounded() {
        let table = SeasonalTable::try_new([0.0; 12], 0.1).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let date = NaiveDate::from_ymd_opt(2004, 5, 10).unwrap();
        for _ in 0..1000 {
            let m = table.multiplier(date, true, &mut rng);
            assert!((0.9..=1.1).contains(&m));
        }
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let res = SeasonalTable::try_new([0.0; 12], -0.5);
        assert!(matches!(res, Err(RentalsGenError::Config(_))));
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Growth.to_string(), "growth");
        assert_eq!(Phase::Reactivation.to_string(), "reactivation");
    }
}
