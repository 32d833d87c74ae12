//! panel-runner: headless generator for the synthetic inventory panel.
//!
//! Usage:
//!   panel-runner --seed 12345 --stores 2 --products 100 --weeks 156
//!   panel-runner --config panel.json --output data/panel.csv
//!   panel-runner --print-config

use anyhow::{Context, Result};
use chrono::NaiveDate;
use panelgen_core::{config::GeneratorConfig, engine::PanelEngine, summary::RunSummary};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = build_config(&args)?;

    if args.iter().any(|a| a == "--print-config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("Synthetic inventory panel: panel-runner");
    println!("  seed:       {}", config.seed);
    println!("  stores:     {}", config.store_count);
    println!("  products:   {}", config.product_count);
    println!("  weeks:      {}", config.weeks);
    println!("  start:      {}", config.start_date);
    println!("  presence:   {}", config.presence_probability);
    println!("  output:     {}", config.output_path.display());
    println!();

    let mut engine = PanelEngine::build(config)?;
    let summary = engine.run()?;
    print_summary(&summary);
    Ok(())
}

/// Defaults, then the --config file, then individual flags.
fn build_config(args: &[String]) -> Result<GeneratorConfig> {
    let mut config = match flag_value(args, "--config") {
        Some(path) => {
            log::debug!("reading config file {path}");
            GeneratorConfig::load(path)
                .with_context(|| format!("loading config file {path}"))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(seed) = parse_flag::<u64>(args, "--seed")? {
        config.seed = seed;
    }
    if let Some(stores) = parse_flag::<u32>(args, "--stores")? {
        config.store_count = stores;
    }
    if let Some(products) = parse_flag::<u32>(args, "--products")? {
        config.product_count = products;
    }
    if let Some(weeks) = parse_flag::<u32>(args, "--weeks")? {
        config.weeks = weeks;
    }
    if let Some(start) = parse_flag::<NaiveDate>(args, "--start")? {
        config.start_date = start;
    }
    if let Some(presence) = parse_flag::<f64>(args, "--presence")? {
        config.presence_probability = presence;
    }
    if let Some(output) = flag_value(args, "--output") {
        config.output_path = PathBuf::from(output);
    }
    Ok(config)
}

fn print_summary(summary: &RunSummary) {
    let path = summary
        .output_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    println!("File created: {path}");
    println!("Total rows: {}", summary.rows);

    println!();
    println!("=== RUN SUMMARY ===");
    println!("  catalog pairs:  {}", summary.pairs);
    println!("  stores:         {}", summary.stores);
    println!("  products:       {}", summary.products);
    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => println!("  dates:          {first} .. {last}"),
        _ => println!("  dates:          (empty panel)"),
    }
    println!("  promotion rows: {}", summary.promotion_rows);
    println!("  restock rows:   {}", summary.restock_rows);
    println!("  stock-out rows: {}", summary.stockout_rows);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// A flag that is present but does not parse is an error, not a default.
fn parse_flag<T>(args: &[String], flag: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    flag_value(args, flag)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow::anyhow!("invalid value {raw:?} for {flag}: {e}"))
        })
        .transpose()
}
