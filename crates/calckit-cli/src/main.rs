//! calckit - Everyday calculators on the command line
//!
//! Usage:
//!   calckit percent-of 20 150                # Single calculation
//!   calckit --json loan 100000 10.5 5        # Structured output
//!   echo '{"calculator": "bmi", ...}' | calckit   # Pipe mode (JSON requests)
//!   calckit --server                         # JSON-RPC over stdin/stdout

mod server;

use std::io::{self, BufRead, IsTerminal};

use anyhow::{bail, Context, Result};
use calckit_core::{Calculation, Engine, RawInput, Request, Unit, UnitCategory};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "calckit")]
#[command(about = "Percentage, finance, health, unit and date calculators", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print results as JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Run as a JSON-RPC 2.0 server on stdin/stdout
    #[arg(short, long)]
    server: bool,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// PERCENT% of VALUE
    #[command(allow_negative_numbers = true)]
    PercentOf { percent: String, value: String },
    /// What percent PART is of WHOLE
    #[command(allow_negative_numbers = true)]
    WhatPercent { part: String, whole: String },
    /// Percent change from FROM to TO
    #[command(allow_negative_numbers = true)]
    PercentChange { from: String, to: String },
    /// Profit or loss of a sale
    ProfitLoss { cost_price: String, selling_price: String },
    /// Discounted price with optional tax
    Discount {
        price: String,
        discount: String,
        /// Tax percentage applied after the discount
        #[arg(long)]
        tax: Option<String>,
    },
    /// Add or remove GST
    Gst {
        #[arg(value_enum)]
        mode: GstMode,
        amount: String,
        /// GST rate in percent
        #[arg(long, default_value = "18")]
        rate: String,
    },
    /// Monthly installment of a loan
    Loan {
        principal: String,
        /// Annual interest rate in percent
        rate: String,
        tenure: String,
        /// Tenure is given in months instead of years
        #[arg(long)]
        months: bool,
    },
    /// Maturity value of a monthly investment plan
    Sip {
        monthly_investment: String,
        /// Expected annual return in percent
        rate: String,
        years: String,
    },
    /// Body Mass Index (kg and cm, or lbs and inches with --imperial)
    Bmi {
        weight: String,
        height: String,
        #[arg(long)]
        imperial: bool,
    },
    /// Convert VALUE between two units of the same category
    #[command(allow_negative_numbers = true)]
    Convert { value: String, from: String, to: String },
    /// Years, months and days between two YYYY-MM-DD dates
    DateDiff { start: String, end: String },
    /// Age today for a YYYY-MM-DD birth date
    Age {
        birth_date: String,
        /// Name to show in the description
        #[arg(long)]
        name: Option<String>,
    },
    /// List units, optionally of one category
    Units { category: Option<String> },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GstMode {
    Add,
    Remove,
}

impl Command {
    /// Calculator request for this command, `None` for listing commands
    fn to_request(&self) -> Option<Request> {
        let raw = |s: &String| RawInput::from(s.as_str());
        let request = match self {
            Command::PercentOf { percent, value } => Request::PercentOf {
                percent: raw(percent),
                value: raw(value),
            },
            Command::WhatPercent { part, whole } => Request::WhatPercent {
                part: raw(part),
                whole: raw(whole),
            },
            Command::PercentChange { from, to } => Request::PercentChange {
                from: raw(from),
                to: raw(to),
            },
            Command::ProfitLoss {
                cost_price,
                selling_price,
            } => Request::ProfitLoss {
                cost_price: raw(cost_price),
                selling_price: raw(selling_price),
            },
            Command::Discount {
                price,
                discount,
                tax,
            } => Request::Discount {
                original_price: raw(price),
                discount_percent: raw(discount),
                tax_percent: tax.as_deref().map(RawInput::from).unwrap_or_default(),
            },
            Command::Gst { mode, amount, rate } => match mode {
                GstMode::Add => Request::AddGst {
                    amount: raw(amount),
                    rate: raw(rate),
                },
                GstMode::Remove => Request::RemoveGst {
                    amount: raw(amount),
                    rate: raw(rate),
                },
            },
            Command::Loan {
                principal,
                rate,
                tenure,
                months,
            } => Request::Loan {
                principal: raw(principal),
                annual_rate: raw(rate),
                tenure: raw(tenure),
                tenure_unit: RawInput::from(if *months { "months" } else { "years" }),
            },
            Command::Sip {
                monthly_investment,
                rate,
                years,
            } => Request::Sip {
                monthly_investment: raw(monthly_investment),
                annual_rate: raw(rate),
                years: raw(years),
            },
            Command::Bmi {
                weight,
                height,
                imperial,
            } => Request::Bmi {
                weight: raw(weight),
                height: raw(height),
                unit_system: RawInput::from(if *imperial { "imperial" } else { "metric" }),
            },
            Command::Convert { value, from, to } => Request::Convert {
                value: raw(value),
                from: raw(from),
                to: raw(to),
            },
            Command::DateDiff { start, end } => Request::DateDifference {
                start: raw(start),
                end: raw(end),
            },
            Command::Age { birth_date, name } => Request::Age {
                birth_date: raw(birth_date),
                name: name.clone(),
            },
            Command::Units { .. } => return None,
        };
        Some(request)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let engine = Engine::new();

    if args.server {
        tracing::debug!("starting JSON-RPC server");
        return server::run_server(&engine).context("server I/O failed");
    }

    match &args.command {
        Some(Command::Units { category }) => print_units(category.as_deref(), args.json),
        Some(command) => {
            let Some(request) = command.to_request() else {
                bail!("nothing to calculate");
            };
            tracing::debug!(calculator = request.name(), "evaluating");
            let outcome = engine.evaluate(&request);
            print_outcome(&outcome, args.json)?;
            if let Calculation::Failed(err) = outcome {
                tracing::debug!(kind = err.kind(), "calculation rejected");
                std::process::exit(1);
            }
            Ok(())
        }
        None if !io::stdin().is_terminal() => run_pipe(&engine, args.json),
        None => {
            eprintln!("Usage: calckit <calculator> [inputs...]");
            eprintln!("       calckit --server");
            eprintln!("       echo '{{\"calculator\": \"percent_of\", \"percent\": \"20\", \"value\": \"150\"}}' | calckit");
            eprintln!("Run `calckit --help` for the list of calculators.");
            std::process::exit(1);
        }
    }
}

fn print_outcome(outcome: &Calculation<calckit_core::Response>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(outcome)?);
        return Ok(());
    }
    match outcome {
        Calculation::Unset => {}
        Calculation::Ready(response) => println!("{response}"),
        Calculation::Failed(_) => eprintln!("{outcome}"),
    }
    Ok(())
}

/// Evaluate one JSON request per stdin line
fn run_pipe(engine: &Engine, json: bool) -> Result<()> {
    let stdin = io::stdin();
    for (number, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Request>(&line) {
            Ok(request) => print_outcome(&engine.evaluate(&request), json)?,
            Err(e) => {
                tracing::warn!(line = number + 1, error = %e, "skipping malformed request");
                eprintln!("line {}: invalid request: {e}", number + 1);
            }
        }
    }
    Ok(())
}

fn print_units(category: Option<&str>, json: bool) -> Result<()> {
    let categories = match category {
        Some(name) => match UnitCategory::parse(name) {
            Some(category) => vec![category],
            None => bail!("unknown unit category: {name}"),
        },
        None => UnitCategory::all().to_vec(),
    };

    if json {
        let listing: Vec<_> = categories
            .iter()
            .map(|category| {
                serde_json::json!({
                    "category": category,
                    "units": category.units().map(unit_json).collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string(&listing)?);
        return Ok(());
    }

    for category in categories {
        println!("{category}:");
        for unit in category.units() {
            println!("  {:<20} {}", unit.label(), unit.def().aliases.join(", "));
        }
    }
    Ok(())
}

pub(crate) fn unit_json(unit: Unit) -> serde_json::Value {
    serde_json::json!({
        "id": unit,
        "label": unit.label(),
        "short_name": unit.short_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loan_in_months() {
        let args = Args::parse_from(["calckit", "loan", "100000", "10.5", "60", "--months"]);
        let request = args.command.unwrap().to_request().unwrap();
        assert_eq!(
            request,
            Request::Loan {
                principal: RawInput::from("100000"),
                annual_rate: RawInput::from("10.5"),
                tenure: RawInput::from("60"),
                tenure_unit: RawInput::from("months"),
            }
        );
    }

    #[test]
    fn test_gst_rate_defaults_to_eighteen() {
        let args = Args::parse_from(["calckit", "gst", "remove", "118"]);
        match args.command.unwrap().to_request().unwrap() {
            Request::RemoveGst { rate, .. } => assert_eq!(rate.as_str(), "18"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_units_is_not_a_calculation() {
        let args = Args::parse_from(["calckit", "--json", "units", "length"]);
        assert!(args.json);
        assert!(args.command.unwrap().to_request().is_none());
    }
}
