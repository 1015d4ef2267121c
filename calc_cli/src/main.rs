//! # Ceiling Takeoff CLI
//!
//! Terminal front end for the takeoff engine. Prompts for room dimensions,
//! prints per-room quantities, project totals and a cost breakdown, then
//! dumps the same data as JSON.
//!
//! ## Configuration
//!
//! - First argument: optional path to a JSON price table, e.g.
//!   `{"I": 30.0, "E": 12.5}`. Missing materials price at 0.
//! - `CEILING_CURRENCY`: currency label for printed costs (default `$`).
//! - `RUST_LOG`: log filter (default `warn`); logs go to stderr.

use std::io::{self, BufRead, Write};
use std::path::Path;

use calc_core::errors::{CalcError, CalcResult};
use calc_core::{Material, PriceTable, Project, RoomDimensions};
use serde::Serialize;
use tracing::{info, warn};

const DEFAULT_CURRENCY: &str = "$";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

/// Blank input takes the default; anything else must parse as a number.
fn parse_f64_or_default(input: &str, default: f64) -> Option<f64> {
    if input.is_empty() {
        return Some(default);
    }
    input.parse().ok()
}

/// Prompt until the answer is blank or a number. End of input takes the default.
fn prompt_f64(prompt: &str, default: f64) -> f64 {
    loop {
        let Some(input) = prompt_line(prompt) else {
            return default;
        };
        match parse_f64_or_default(&input, default) {
            Some(value) => return value,
            None => eprintln!("  '{}' is not a number, try again (blank for {})", input, default),
        }
    }
}

/// Parse a JSON price table and lay it over the all-zero defaults.
fn parse_prices(json: &str) -> CalcResult<PriceTable> {
    let saved: PriceTable = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid price table: {}", e),
    })?;
    let mut prices = PriceTable::with_defaults();
    prices.merge(&saved);
    Ok(prices)
}

fn load_prices(path: &Path) -> CalcResult<PriceTable> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let prices = parse_prices(&contents)?;
    info!(path = %path.display(), count = prices.len(), "loaded price table");
    Ok(prices)
}

#[derive(Serialize)]
struct Report<'a> {
    project: &'a Project,
    totals: calc_core::ProjectTotals,
    costs: calc_core::CostBreakdown,
}

fn print_error(e: &CalcError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn main() {
    init_tracing();

    let currency =
        std::env::var("CEILING_CURRENCY").unwrap_or_else(|_| DEFAULT_CURRENCY.to_string());

    let mut project = Project::new("CLI Session", "");
    if let Some(path) = std::env::args().nth(1) {
        match load_prices(Path::new(&path)) {
            Ok(prices) => {
                if prices.has_negative_prices() {
                    warn!("price table contains negative prices");
                }
                project.settings.prices = prices;
            }
            Err(e) => {
                print_error(&e);
                std::process::exit(1);
            }
        }
    }

    println!("Suspended Ceiling Takeoff");
    println!("=========================");
    println!();

    loop {
        let n = project.room_count() + 1;
        let length_cm = prompt_f64(&format!("Room {} length (cm) [400]: ", n), 400.0);
        let width_cm = prompt_f64(&format!("Room {} width (cm) [500]: ", n), 500.0);
        let drop_cm = prompt_f64(&format!("Room {} drop (cm) [50]: ", n), 50.0);

        let dims = RoomDimensions::new(length_cm, width_cm, drop_cm);
        match project.add_room(format!("Room {}", n), dims) {
            Ok(_) => println!("  Added Room {} ({})", n, dims.area()),
            Err(e) => print_error(&e),
        }

        match prompt_line("Add another room? [y/N]: ") {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ROOM QUANTITIES");
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  {:<8} {:>7} {:>7} {:>5} {:>6} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6}",
        "Room", "B", "C", "D", "H", "G", "E", "F", "I", "J", "K"
    );
    for room in project.rooms() {
        let q = &room.quantities;
        println!(
            "  {:<8} {:>7} {:>7} {:>5} {:>6} {:>5} {:>5} {:>5} {:>6} {:>6} {:>6}   L={}",
            room.label,
            room.dimensions.length_cm,
            room.dimensions.width_cm,
            room.dimensions.drop_cm,
            q.perimeter,
            q.hanger,
            q.main_channel,
            q.furring_channel,
            q.board,
            q.concrete_screw,
            q.gypsum_screw,
            q.clip,
        );
    }

    let totals = project.totals();
    let costs = project.cost_breakdown();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  MATERIALS AND COST");
    println!("═══════════════════════════════════════════════════════════════");
    for line in &costs.lines {
        println!(
            "  {:<18} ({}) {:>8}  x {:>8.2} {} = {:>10.2} {}",
            line.material.display_name(),
            line.material.code(),
            line.quantity,
            line.unit_price,
            currency,
            line.line_cost,
            currency,
        );
    }
    println!("  {:-<61}", "");
    println!("  {:<52} {:>10.2} {}", "TOTAL", costs.grand_total, currency);
    println!(
        "  (not priced: {} = {}, {} = {})",
        Material::Hanger.display_name(),
        totals.hanger,
        Material::Perimeter.display_name(),
        totals.perimeter,
    );

    let negative: Vec<String> = totals
        .negative_materials()
        .iter()
        .map(|m| m.code().to_string())
        .collect();
    if !negative.is_empty() {
        println!();
        println!(
            "  Note: negative totals for {} (undersized rooms or small drops)",
            negative.join(", ")
        );
    }

    println!();
    println!("JSON Output (for API use):");
    let report = Report {
        project: &project,
        totals,
        costs,
    };
    if let Ok(json) = serde_json::to_string_pretty(&report) {
        println!("{}", json);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_f64_or_default() {
        assert_eq!(parse_f64_or_default("", 400.0), Some(400.0));
        assert_eq!(parse_f64_or_default("325.5", 400.0), Some(325.5));
        assert_eq!(parse_f64_or_default("-10", 400.0), Some(-10.0));
        assert_eq!(parse_f64_or_default("abc", 400.0), None);
        assert_eq!(parse_f64_or_default("4m", 400.0), None);
    }

    #[test]
    fn test_parse_prices_overlays_defaults() {
        let prices = parse_prices(r#"{"I": 30.0, "E": 12.5}"#).unwrap();
        assert_eq!(prices.len(), 6);
        assert_eq!(prices.price(Material::Board), 30.0);
        assert_eq!(prices.price(Material::MainChannel), 12.5);
        assert_eq!(prices.price(Material::Clip), 0.0);
    }

    #[test]
    fn test_parse_prices_rejects_bad_json() {
        let err = parse_prices("{not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(parse_prices(r#"{"H": 2.0}"#).is_err());
    }

    #[test]
    fn test_load_prices_missing_file() {
        let err = load_prices(Path::new("/nonexistent/prices.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
