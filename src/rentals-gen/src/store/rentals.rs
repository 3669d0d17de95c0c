use chrono::Duration;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::RentalTerms;
use crate::error::RentalsGenError;
use crate::error::Result;

// bias towards shorter rentals, truncated to the configured duration span
const DURATION_WEIGHTS: [f64; 5] = [0.3, 0.3, 0.2, 0.1, 0.1];

// walk-in traffic by hour, doors open 10:00 to 22:00, evenings busiest
const HOURLY_WEIGHTS: [f64; 24] = [
    0., 0., 0., 0., 0., 0., 0., 0., 0., 0., // closed overnight
    2., 3., 4., 4., 3., 3., 4., 6., 8., 9., 7., 4., // 10:00 - 21:59
    1., 0., // last returns before closing
];

#[derive(Debug, Clone, Serialize)]
pub struct RentalRecord {
    pub rental_id: u32,
    pub rental_date: NaiveDateTime,
    pub inventory_id: u32,
    pub customer_id: u32,
    pub return_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRecord {
    pub payment_id: u32,
    pub customer_id: u32,
    pub rental_id: u32,
    pub amount: Decimal,
    pub payment_date: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct Checkout {
    pub rental: RentalRecord,
    pub payment: PaymentRecord,
}

/// Turns a picked copy and customer into a dated rental with its payment:
/// checkout clock time from the walk-in traffic table, weighted duration,
/// an occasional late return, and an amount with two fractional digits.
pub struct CheckoutSynth {
    terms: RentalTerms,
    duration_idx: WeightedIndex<f64>,
    hourly_idx: WeightedIndex<f64>,
    next_rental_id: u32,
    next_payment_id: u32,
}

impl CheckoutSynth {
    pub fn try_new(terms: RentalTerms) -> Result<Self> {
        if terms.duration_min_days == 0 || terms.duration_min_days > terms.duration_max_days {
            return Err(RentalsGenError::Config(format!(
                "rental duration range {}..={} is invalid",
                terms.duration_min_days, terms.duration_max_days
            )));
        }
        let span = (terms.duration_max_days - terms.duration_min_days + 1) as usize;
        if span > DURATION_WEIGHTS.len() {
            return Err(RentalsGenError::Config(format!(
                "rental duration span {span} exceeds the {} weighted choices",
                DURATION_WEIGHTS.len()
            )));
        }
        if !(0.0..=1.0).contains(&terms.late_return_probability) {
            return Err(RentalsGenError::Config(format!(
                "late return probability must be within 0..=1, got {}",
                terms.late_return_probability
            )));
        }
        if terms.late_days_max == 0 && terms.late_return_probability > 0.0 {
            return Err(RentalsGenError::Config(
                "late returns enabled but late days max is zero".to_string(),
            ));
        }
        if terms.payment_min < 0.0 || terms.payment_min > terms.payment_max {
            return Err(RentalsGenError::Config(format!(
                "payment range {}..={} is invalid",
                terms.payment_min, terms.payment_max
            )));
        }

        let duration_idx = WeightedIndex::new(&DURATION_WEIGHTS[..span])?;
        let hourly_idx = WeightedIndex::new(HOURLY_WEIGHTS)?;

        Ok(CheckoutSynth {
            terms,
            duration_idx,
            hourly_idx,
            next_rental_id: 0,
            next_payment_id: 0,
        })
    }

    pub fn checkout<R: Rng>(
        &mut self,
        day: NaiveDate,
        inventory_id: u32,
        customer_id: u32,
        rng: &mut R,
    ) -> Checkout {
        let hour = self.hourly_idx.sample(rng) as u32;
        let minute = rng.gen_range(0..=59);
        let rental_date = day.and_hms_opt(hour, minute, 0).unwrap();

        let days = self.terms.duration_min_days + self.duration_idx.sample(rng) as u32;
        let late_days = if rng.gen::<f64>() < self.terms.late_return_probability {
            rng.gen_range(1..=self.terms.late_days_max)
        } else {
            0
        };
        let return_date = rental_date + Duration::days((days + late_days) as i64);

        let amount_cents = (rng.gen_range(self.terms.payment_min..=self.terms.payment_max)
            * 100.0)
            .round() as i64;
        let payment_date = rental_date + Duration::hours(rng.gen_range(0..=23));

        self.next_rental_id += 1;
        self.next_payment_id += 1;

        Checkout {
            rental: RentalRecord {
                rental_id: self.next_rental_id,
                rental_date,
                inventory_id,
                customer_id,
                return_date,
            },
            payment: PaymentRecord {
                payment_id: self.next_payment_id,
                customer_id,
                rental_id: self.next_rental_id,
                amount: Decimal::new(amount_cents, 2),
                payment_date,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2002, 3, 11).unwrap()
    }

    #[test]
    fn test_on_time_returns_within_duration_bounds() {
        let terms = RentalTerms {
            late_return_probability: 0.0,
            ..Default::default()
        };
        let mut synth = CheckoutSynth::try_new(terms).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let checkout = synth.checkout(day(), 1, 1, &mut rng);
            let kept = checkout.rental.return_date - checkout.rental.rental_date;
            assert!((3..=7).contains(&kept.num_days()));
        }
    }

    #[test]
    fn test_late_returns_extend_past_duration() {
        let terms = RentalTerms {
            late_return_probability: 1.0,
            ..Default::default()
        };
        let mut synth = CheckoutSynth::try_new(terms).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let checkout = synth.checkout(day(), 1, 1, &mut rng);
            let kept = checkout.rental.return_date - checkout.rental.rental_date;
            assert!((4..=21).contains(&kept.num_days()));
        }
    }

    #[test]
    fn test_checkout_happens_during_store_hours() {
        use chrono::Timelike;

        let mut synth = CheckoutSynth::try_new(RentalTerms::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let checkout = synth.checkout(day(), 1, 1, &mut rng);
            let hour = checkout.rental.rental_date.hour();
            assert!((10..=22).contains(&hour));
        }
    }

    #[test]
    fn test_payment_amount_in_range_with_cents() {
        let mut synth = CheckoutSynth::try_new(RentalTerms::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let min = Decimal::new(299, 2);
        let max = Decimal::new(1599, 2);
        for _ in 0..500 {
            let checkout = synth.checkout(day(), 1, 1, &mut rng);
            assert!(checkout.payment.amount >= min);
            assert!(checkout.payment.amount <= max);
            assert_eq!(checkout.payment.amount.scale(), 2);
        }
    }

    #[test]
    fn test_ids_and_links() {
        let mut synth = CheckoutSynth::try_new(RentalTerms::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let first = synth.checkout(day(), 11, 7, &mut rng);
        let second = synth.checkout(day(), 12, 8, &mut rng);
        assert_eq!(first.rental.rental_id, 1);
        assert_eq!(second.rental.rental_id, 2);
        assert_eq!(second.payment.rental_id, 2);
        assert_eq!(second.payment.customer_id, 8);
        assert!(second.payment.payment_date >= second.rental.rental_date);
    }

    #[test]
    fn test_bad_terms_rejected() {
        let terms = RentalTerms {
            duration_min_days: 7,
            duration_max_days: 3,
            ..Default::default()
        };
        assert!(matches!(
            CheckoutSynth::try_new(terms),
            Err(RentalsGenError::Config(_))
        ));

        let terms = RentalTerms {
            duration_min_days: 1,
            duration_max_days: 10,
            ..Default::default()
        };
        assert!(matches!(
            CheckoutSynth::try_new(terms),
            Err(RentalsGenError::Config(_))
        ));

        let terms = RentalTerms {
            late_return_probability: 1.2,
            ..Default::default()
        };
        assert!(matches!(
            CheckoutSynth::try_new(terms),
            Err(RentalsGenError::Config(_))
        ));

        let terms = RentalTerms {
            payment_min: 20.0,
            payment_max: 10.0,
            ..Default::default()
        };
        assert!(matches!(
            CheckoutSynth::try_new(terms),
            Err(RentalsGenError::Config(_))
        ));
    }
}
