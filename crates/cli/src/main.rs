//! Command Line Interface for the Uniswap v3 impermanent loss model.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uniswap_il_domain::{PositionInputs, PositionValuation, PriceRange, evaluate};
use uniswap_il_simulation::curve::{CurveSeries, sample};
use uniswap_il_simulation::scenario::{Scenario, ScenarioReport};

#[derive(Parser)]
#[command(name = "il-cli")]
#[command(about = "Uniswap v3 impermanent loss calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a position at one price
    Evaluate {
        /// Price at which liquidity was deposited
        #[arg(long)]
        deposit_price: f64,

        /// Price at which to value the position
        #[arg(long)]
        eval_price: f64,

        /// Lower price bound
        #[arg(long)]
        lower: f64,

        /// Upper price bound
        #[arg(long)]
        upper: f64,

        /// Deposit value in quote currency
        #[arg(long, env = "IL_DEPOSIT_VALUE", default_value_t = 1000.0)]
        deposit_value: f64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Sample the impermanent loss curve across prices
    Curve {
        /// Price at which liquidity was deposited
        #[arg(long)]
        deposit_price: f64,

        /// Lower price bound
        #[arg(long)]
        lower: f64,

        /// Upper price bound
        #[arg(long)]
        upper: f64,

        /// Deposit value in quote currency
        #[arg(long, env = "IL_DEPOSIT_VALUE", default_value_t = 1000.0)]
        deposit_value: f64,

        /// Number of log steps across the sweep
        #[arg(long, env = "IL_CURVE_POINTS", default_value_t = 1000)]
        points: usize,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Summarise a calculator scenario and print its shareable link
    Scenario {
        /// Query string of a shared scenario link
        #[arg(short, long)]
        query: Option<String>,

        /// Override the scenario price
        #[arg(long)]
        current: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            deposit_price,
            eval_price,
            lower,
            upper,
            deposit_value,
            json,
        } => {
            match PriceRange::new(lower, upper) {
                Ok(range) => {
                    let inputs = PositionInputs::new(deposit_price, eval_price, range)
                        .with_deposit_value(deposit_value);
                    if let Err(e) = inputs.validate() {
                        warn!(error = %e, "inputs fall back to a zero valuation");
                    }
                }
                Err(e) => warn!(error = %e, "inputs fall back to a zero valuation"),
            }

            let valuation = evaluate(deposit_price, eval_price, lower, upper, deposit_value);
            if json {
                println!("{}", serde_json::to_string_pretty(&valuation)?);
            } else {
                print_valuation(&valuation);
            }
        }
        Commands::Curve {
            deposit_price,
            lower,
            upper,
            deposit_value,
            points,
            json,
        } => {
            info!(points, "sampling curve for range [{}, {}]", lower, upper);
            let series = sample(deposit_price, lower, upper, deposit_value, points);
            if series.is_empty() {
                warn!("no curve for these inputs");
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else {
                print_curve(&series);
            }
        }
        Commands::Scenario {
            query,
            current,
            json,
        } => {
            let mut scenario = match query.as_deref() {
                Some(q) => Scenario::from_query(q).context("failed to parse scenario link")?,
                None => Scenario::default(),
            };
            if let Some(price) = current {
                scenario.current_price = price;
            }

            let report = scenario.report();
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            println!("Share: ?{}", scenario.to_query());
        }
    }

    Ok(())
}

fn print_valuation(v: &PositionValuation) {
    let mut table = Table::new();
    table.set_titles(row!["Field", "Value"]);
    table.add_row(row!["Price", format!("{:.8}", v.price)]);
    table.add_row(row!["Impermanent loss %", format!("{:.4}", v.il_percent)]);
    table.add_row(row!["Hold value", format!("{:.2}", v.hold_value)]);
    table.add_row(row!["Pool value", format!("{:.2}", v.pool_value)]);
    table.add_row(row!["Deposit token0", format!("{:.8}", v.amount0)]);
    table.add_row(row!["Deposit token1", format!("{:.8}", v.amount1)]);
    table.add_row(row!["LP token0", format!("{:.8}", v.lp_amount0)]);
    table.add_row(row!["LP token1", format!("{:.8}", v.lp_amount1)]);
    table.add_row(row!["Value A", format!("{:.2}", v.value_a)]);
    table.add_row(row!["Value B", format!("{:.2}", v.value_b)]);
    table.add_row(row![
        "Split",
        format!("{:.2}% / {:.2}%", v.percent_a, v.percent_b)
    ]);
    table.add_row(row!["Liquidity (L)", format!("{:.8}", v.liquidity)]);
    table.printstd();
}

fn print_curve(series: &CurveSeries) {
    let mut table = Table::new();
    table.set_titles(row![
        "Price",
        "IL %",
        "Pool value",
        "Hold value",
        "50/50 hold",
        "A %",
        "B %",
        "P&L initial",
        "P&L hold"
    ]);
    for p in series {
        table.add_row(row![
            format!("{:.6}", p.price),
            format!("{:.4}", p.il_percent),
            format!("{:.2}", p.pool_value),
            format!("{:.2}", p.hold_value),
            format!("{:.2}", p.linear_hold_value),
            format!("{:.2}", p.percent_a),
            format!("{:.2}", p.percent_b),
            format!("{:+.2}", p.pnl_from_initial),
            format!("{:+.2}", p.pnl_from_hold)
        ]);
    }
    table.printstd();
}

fn print_report(report: &ScenarioReport) {
    let v = &report.valuation;
    let mut table = Table::new();
    table.add_row(row!["Scenario price", format!("{:.8}", report.current_price)]);
    table.add_row(row!["Impermanent loss", format!("{:.2}%", v.il_percent.abs())]);
    table.add_row(row!["Hold value", format!("{:.2}", v.hold_value)]);
    table.add_row(row!["Deposit value", format!("{:.2}", report.deposit_value)]);
    table.add_row(row!["Initial LP value", format!("{:.2}", report.initial_pool_value)]);
    table.add_row(row!["Current LP value", format!("{:.2}", v.pool_value)]);
    table.add_row(row!["Difference", format!("{:.2}", report.difference)]);
    table.add_row(row!["P&L vs initial", format!("{:+.2}", report.pnl_vs_initial)]);
    table.add_row(row!["P&L vs holding", format!("{:+.2}", report.pnl_vs_hold)]);
    table.add_row(row![
        format!("{} (value)", report.token_a),
        format!("{:.2}", v.value_a)
    ]);
    table.add_row(row![
        format!("{} (value)", report.token_b),
        format!("{:.2}", v.value_b)
    ]);
    table.add_row(row!["Pool split", report.split_label()]);
    table.printstd();
}
