use std::collections::HashSet;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::Churn;
use crate::error::RentalsGenError;
use crate::error::Result;

const FIRST_NAMES: [&str; 16] = [
    "James",
    "Mary",
    "Robert",
    "Patricia",
    "Michael",
    "Linda",
    "William",
    "Barbara",
    "David",
    "Elizabeth",
    "Richard",
    "Susan",
    "Joseph",
    "Jessica",
    "Thomas",
    "Sarah",
];
const LAST_NAMES: [&str; 16] = [
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
    "Hernandez",
    "Lopez",
    "Gonzalez",
    "Wilson",
    "Anderson",
    "Thomas",
];

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub customer_id: u32,
    pub first_name: String,
    pub last_name: String,
    pub create_date: NaiveDate,
}

/// Customer population with weekly acquisition and permanent churn. During
/// the ramp weeks everyone rents; afterwards customers older than the churn
/// threshold risk leaving for good, softened by a weekly loyalty roll.
pub struct CustomerProvider {
    customers: Vec<Customer>,
    created_week: Vec<u32>,
    churned: HashSet<u32>,
    churn: Churn,
    ramp_weeks: u32,
}

impl CustomerProvider {
    pub fn try_new(churn: Churn, ramp_weeks: u32) -> Result<Self> {
        if !(0.0..=1.0).contains(&churn.churn_rate) {
            return Err(RentalsGenError::Config(format!(
                "churn rate must be within 0..=1, got {}",
                churn.churn_rate
            )));
        }
        if !(0.0..=1.0).contains(&churn.loyal_customer_rate) {
            return Err(RentalsGenError::Config(format!(
                "loyal customer rate must be within 0..=1, got {}",
                churn.loyal_customer_rate
            )));
        }

        Ok(CustomerProvider {
            customers: Vec::new(),
            created_week: Vec::new(),
            churned: HashSet::new(),
            churn,
            ramp_weeks,
        })
    }

    pub fn add_weekly<R: Rng>(
        &mut self,
        count: u32,
        week: u32,
        date: NaiveDate,
        rng: &mut R,
    ) -> &[Customer] {
        let first = self.customers.len();
        for _ in 0..count {
            let customer_id = self.customers.len() as u32 + 1;
            self.customers.push(Customer {
                customer_id,
                first_name: FIRST_NAMES.choose(rng).unwrap().to_string(),
                last_name: LAST_NAMES.choose(rng).unwrap().to_string(),
                create_date: date,
            });
            self.created_week.push(week);
        }

        &self.customers[first..]
    }

    /// The ids renting this week. Churn decisions made here are permanent,
    /// so the active set shrinks for good as customers age out.
    pub fn active_for_week<R: Rng>(&mut self, week: u32, rng: &mut R) -> Vec<u32> {
        let mut active = Vec::with_capacity(self.customers.len());
        for (idx, customer) in self.customers.iter().enumerate() {
            let id = customer.customer_id;
            if self.churned.contains(&id) {
                continue;
            }
            if week <= self.ramp_weeks {
                active.push(id);
                continue;
            }
            // fresh loyalty roll each week, not a persistent attribute
            if rng.gen::<f64>() < self.churn.loyal_customer_rate {
                active.push(id);
                continue;
            }
            let weeks_since_creation = week.saturating_sub(self.created_week[idx]);
            if weeks_since_creation < self.churn.customer_churn_after_weeks {
                active.push(id);
            } else if rng.gen::<f64>() > self.churn.churn_rate {
                active.push(id);
            } else {
                self.churned.insert(id);
            }
        }

        active
    }

    pub fn sample<R: Rng>(&self, active: &[u32], rng: &mut R) -> Option<u32> {
        active.choose(rng).copied()
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn churned_count(&self) -> usize {
        self.churned.len()
    }
}
