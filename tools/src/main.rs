//! valuator: prices one account against the rule catalog.
//!
//! Usage:
//!   valuator --data-dir ./data --account data/accounts/demo.json
//!   valuator --account my_account.json --format text
//!   valuator --account my_account.json --format json

use anyhow::Result;
use std::env;
use valuation_core::{
    account::Account,
    engine::ValuationEngine,
    render::{BreakdownRenderer, HtmlRenderer, TextRenderer},
    report::ValuationReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Text,
    Json,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    final_total: f64,
    report: &'a ValuationReport,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let default_account = format!("{data_dir}/accounts/demo.json");
    let account_path = string_arg(&args, "--account").unwrap_or(&default_account);
    let format = match string_arg(&args, "--format").unwrap_or("html") {
        "html" => OutputFormat::Html,
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => {
            log::warn!("Unknown format '{other}', falling back to html");
            OutputFormat::Html
        }
    };

    let engine = ValuationEngine::load(data_dir)?;
    let account = Account::from_json_file(account_path)?;
    log::info!(
        "valuing {account_path}: {} characters, {} weapons",
        account.characters.len(),
        account.weapons.len()
    );

    let report = engine.evaluate(&account)?;

    match format {
        OutputFormat::Json => {
            let output = JsonOutput { final_total: report.final_total, report: &report };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Html => print_rendered(&HtmlRenderer, &report),
        OutputFormat::Text => print_rendered(&TextRenderer, &report),
    }

    Ok(())
}

fn print_rendered(renderer: &dyn BreakdownRenderer, report: &ValuationReport) {
    println!("=== ACCOUNT VALUATION ===");
    println!("{}", renderer.render(report));
    println!();
    println!("=== FINAL VALUATION: {:.2} ===", report.final_total);
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
