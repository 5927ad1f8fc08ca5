//! # Seed Data Generator
//!
//! Fills a memory store with a few weeks of fabric sales and prints the
//! resulting reports.
//!
//! ## Usage
//! ```bash
//! # 14 days of memos ending today, text reports
//! cargo run -p memobook-store --bin seed
//!
//! # Longer history, JSON sales report
//! cargo run -p memobook-store --bin seed -- --days 30 --json
//!
//! # Custom config file, statement for one customer
//! cargo run -p memobook-store --bin seed -- --config ./memobook.toml --mobile 01711223344
//!
//! # Write the effective settings (file + environment) back to the config file
//! MEMOBOOK_SHOP_NAME="New Market Fabrics" cargo run -p memobook-store --bin seed -- --save-config
//! ```
//!
//! ## Generated Memos
//! - Customers: a fixed list of regulars, each with a Bangladeshi mobile
//! - Items: common fabrics sold in yards or meters
//! - 1-4 memos per day, 1-3 lines per memo, quantities in half units

use chrono::{Duration, NaiveTime, TimeZone, Utc};
use memobook_core::{MemoDraft, Money, PlainTextRenderer, Quantity, ReportRenderer, Unit};
use memobook_store::{DateRange, MemoryStore, StoreConfig};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Regular customers: (mobile, name, address)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("01711223344", "Rahim Uddin", "Islampur, Dhaka"),
    ("01811556677", "Karim Traders", "Chawkbazar, Dhaka"),
    ("01911889900", "Nasima Begum", "Mirpur 10, Dhaka"),
    ("01611442211", "Sumon Tailors", "New Market, Dhaka"),
    ("01511336699", "Jamal Hossain", "Narayanganj"),
];

/// Fabrics: (name, unit, rate in taka)
const FABRICS: &[(&str, Unit, i64)] = &[
    ("Silk", Unit::Yards, 450),
    ("Cotton", Unit::Yards, 120),
    ("Georgette", Unit::Meters, 380),
    ("Linen", Unit::Meters, 520),
    ("Katan", Unit::Yards, 900),
    ("Voile", Unit::Yards, 160),
    ("Denim", Unit::Meters, 300),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut days: i64 = 14;
    let mut config_path: Option<PathBuf> = None;
    let mut mobile = CUSTOMERS[0].0.to_string();
    let mut json = false;
    let mut save_config = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1].parse().unwrap_or(14).clamp(1, 365);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--mobile" | "-m" => {
                if i + 1 < args.len() {
                    mobile = args[i + 1].clone();
                    i += 1;
                }
            }
            "--json" => json = true,
            "--save-config" => save_config = true,
            "--help" | "-h" => {
                println!("Memobook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>        Days of history to generate (default: 14)");
                println!("  -c, --config <PATH>   Config file (default: platform config dir)");
                println!("  -m, --mobile <NUM>    Customer for the statement (default: first regular)");
                println!("      --json            Print the sales report as JSON");
                println!("      --save-config     Write the effective config to the config file");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = StoreConfig::load(config_path.clone())?;
    if save_config {
        config.save(config_path)?;
    }
    let offset = config.utc_offset();
    let store = MemoryStore::new(config)?;
    let service = store.memo_service();

    let today = Utc::now().with_timezone(&offset).date_naive();
    let first_day = today - Duration::days(days - 1);

    let mut generated = 0usize;
    for day_index in 0..days {
        let day = first_day + Duration::days(day_index);
        let memos_today = 1 + (day_index as usize * 7) % 4;

        for memo_index in 0..memos_today {
            let seed = day_index as usize * 10 + memo_index;
            let (mobile, name, address) = CUSTOMERS[seed % CUSTOMERS.len()];

            // shop hours, 10:00 onwards
            let local = day.and_time(NaiveTime::MIN)
                + Duration::hours(10 + memo_index as i64 * 2)
                + Duration::minutes((seed * 13 % 60) as i64);
            let Some(date) = offset.from_local_datetime(&local).single() else {
                continue;
            };

            let mut draft = MemoDraft::new(mobile, name, address, date.with_timezone(&Utc));
            for line in 0..1 + seed % 3 {
                let (fabric, unit, rate) = FABRICS[(seed + line * 3) % FABRICS.len()];
                let half_units = 2 + ((seed + line) * 5 % 19) as i64;
                draft = draft.with_line(
                    fabric,
                    Quantity::from_milli(half_units * 500),
                    unit,
                    Money::from_taka(rate),
                );
            }

            match service.save_memo(draft).await {
                Ok(_) => generated += 1,
                Err(e) => eprintln!("Failed to save memo: {}", e),
            }
        }
    }

    let stats = store.stats().await;
    tracing::info!(
        memos = generated,
        customers = stats.customers,
        catalog_items = stats.catalog_items,
        "Seed complete"
    );

    let range = DateRange::new(first_day, today)?;
    let summary = store.reports().sales_summary(range).await?;

    if json {
        println!("{}", summary.report.to_json()?);
        return Ok(());
    }

    let renderer = PlainTextRenderer;
    println!("{}", renderer.render_sales_report(&summary.report));
    println!("(save as {}.pdf)", summary.file_stem);
    println!();

    match store.reports().customer_statement(&mobile, None).await {
        Ok(statement) => {
            println!("{}", renderer.render_sales_report(&statement.report));

            if let Some(history) = store.memo_service().customer_history(&mobile).await? {
                if let Some(latest) = history.memos.first() {
                    let receipt = store.reports().memo_receipt(&latest.id).await?;
                    println!("{}", renderer.render_memo_receipt(&receipt));
                }
            }
        }
        Err(e) => eprintln!("{}", e),
    }

    let suggestions = store.items().search_by_prefix("S", None).await?;
    let names: Vec<&str> = suggestions.iter().map(|i| i.item_name.as_str()).collect();
    println!("Item suggestions for 'S': {}", names.join(", "));

    Ok(())
}

/// Installs the log subscriber. `RUST_LOG` overrides the default filter.
/// Logs go to stderr so `--json` output stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,memobook_store=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
