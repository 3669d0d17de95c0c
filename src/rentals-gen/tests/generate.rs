use std::collections::HashSet;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rentals_gen::config::Config;
use rentals_gen::store;
use rentals_gen::store::output::Output;

fn test_config() -> Config {
    Config {
        // a Monday
        start_date: NaiveDate::from_ymd_opt(2015, 3, 2).unwrap(),
        total_weeks: 16,
        films: 20,
        base_weekly_transactions: 40,
        weekly_new_customers: 5,
        ..Default::default()
    }
}

fn run(seed: u64, cfg: Config) -> [Vec<u8>; 5] {
    let mut bufs: [Vec<u8>; 5] = Default::default();
    {
        let [films, inventory, customers, rentals, payments] = &mut bufs;
        let out = Output {
            films: csv::Writer::from_writer(films),
            inventory: csv::Writer::from_writer(inventory),
            customers: csv::Writer::from_writer(customers),
            rentals: csv::Writer::from_writer(rentals),
            payments: csv::Writer::from_writer(payments),
        };
        let mut scenario = store::create_scenario(cfg, StdRng::seed_from_u64(seed), out).unwrap();
        scenario.run().unwrap();
    }

    bufs
}

fn rows(data: &[u8]) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_reader(data);
    rdr.records().collect::<Result<Vec<_>, _>>().unwrap()
}

fn header(data: &[u8]) -> csv::StringRecord {
    csv::Reader::from_reader(data).headers().unwrap().clone()
}

#[test]
fn test_generated_tables_are_consistent() {
    let [films, inventory, customers, rentals, payments] = run(7, test_config());

    assert_eq!(
        header(&films),
        vec!["film_id", "title", "category", "rating", "release_date", "rental_rate"]
    );
    assert_eq!(
        header(&rentals),
        vec!["rental_id", "rental_date", "inventory_id", "customer_id", "return_date"]
    );
    assert_eq!(
        header(&payments),
        vec!["payment_id", "customer_id", "rental_id", "amount", "payment_date"]
    );

    // 20 initial films plus the one quarterly release that fits in 16 weeks
    let film_rows = rows(&films);
    assert_eq!(film_rows.len(), 40);

    let customer_rows = rows(&customers);
    assert_eq!(customer_rows.len(), 5 * 16);

    // 2..=5 copies per film plus the week-13 growth restock of 50
    let inventory_rows = rows(&inventory);
    assert!(
        (130..=250).contains(&inventory_rows.len()),
        "got {} copies",
        inventory_rows.len()
    );

    let rental_rows = rows(&rentals);
    let payment_rows = rows(&payments);
    assert_eq!(rental_rows.len(), payment_rows.len());
    assert!(rental_rows.len() > 300, "got {} rentals", rental_rows.len());

    let film_ids = film_rows
        .iter()
        .map(|r| r[0].to_string())
        .collect::<HashSet<_>>();
    assert_eq!(film_ids.len(), film_rows.len());

    let inventory_ids = inventory_rows
        .iter()
        .map(|r| r[0].to_string())
        .collect::<HashSet<_>>();
    assert_eq!(inventory_ids.len(), inventory_rows.len());
    for row in &inventory_rows {
        assert!(film_ids.contains(&row[1]));
    }

    let customer_ids = customer_rows
        .iter()
        .map(|r| r[0].to_string())
        .collect::<HashSet<_>>();
    let rental_ids = rental_rows
        .iter()
        .map(|r| r[0].to_string())
        .collect::<HashSet<_>>();
    assert_eq!(rental_ids.len(), rental_rows.len());

    for row in &rental_rows {
        assert!(inventory_ids.contains(&row[2]));
        assert!(customer_ids.contains(&row[3]));
        let rented: NaiveDateTime = row[1].parse().unwrap();
        let returned: NaiveDateTime = row[4].parse().unwrap();
        assert!(returned > rented);
    }

    for row in &payment_rows {
        assert!(rental_ids.contains(&row[2]));
        let amount: f64 = row[3].parse().unwrap();
        assert!((2.99..=15.99).contains(&amount), "amount {amount}");
    }
}

#[test]
fn test_same_seed_reproduces_identical_output() {
    let first = run(21, test_config());
    let second = run(21, test_config());

    assert_eq!(first, second);
}

#[test]
fn test_zero_films_is_rejected() {
    let cfg = Config {
        films: 0,
        ..Default::default()
    };
    let out = Output {
        films: csv::Writer::from_writer(Vec::new()),
        inventory: csv::Writer::from_writer(Vec::new()),
        customers: csv::Writer::from_writer(Vec::new()),
        rentals: csv::Writer::from_writer(Vec::new()),
        payments: csv::Writer::from_writer(Vec::new()),
    };

    assert!(store::create_scenario(cfg, StdRng::seed_from_u64(1), out).is_err());
}
