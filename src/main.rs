//! fincalc CLI
//!
//! Command-line front end for the calculation engine. Rates are entered as
//! percentages (5 for 5%) and converted before reaching the library.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fincalc::cashflow::{load_cash_flows_csv, DEFAULT_CASH_FLOWS};
use fincalc::tvm::percent_to_rate;
use fincalc::{
    calculate_npv, compute_irr_with, cumulative_series, evaluate, growth_series, npv_curve,
    solve_compound_with, CashFlow, CashFlowSummary, CompoundParameters, EngineConfig,
    PaymentTiming, Sample, UnknownField,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fincalc", version, about = "Arithmetic and time-value-of-money calculator")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON file with solver and NPV curve settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate arithmetic expressions
    Eval {
        #[arg(allow_hyphen_values = true)]
        expressions: Vec<String>,

        /// Evaluate every non-empty line of a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Solve a compound interest / annuity problem for one field
    Compound {
        /// rate, periods, pv, pmt or fv
        #[arg(long)]
        solve_for: UnknownField,

        /// Periodic rate in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rate: f64,

        #[arg(long, default_value_t = 0.0)]
        periods: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pv: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pmt: f64,

        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        fv: f64,

        #[arg(long, value_enum, default_value_t = Timing::End)]
        timing: Timing,

        /// Also print the value after each period
        #[arg(long)]
        series: bool,
    },

    /// Internal rate of return of a cash-flow sequence
    Irr {
        #[command(flatten)]
        flows: FlowArgs,

        /// Also print the NPV curve and cumulative cash flow
        #[arg(long)]
        series: bool,
    },

    /// Net present value at one discount rate
    Npv {
        /// Discount rate in percent
        #[arg(long, allow_hyphen_values = true)]
        rate: f64,

        #[command(flatten)]
        flows: FlowArgs,
    },
}

#[derive(clap::Args)]
struct FlowArgs {
    /// Cash flow as PERIOD:AMOUNT, repeatable
    #[arg(long = "flow")]
    flows: Vec<CashFlow>,

    /// CSV file with period,amount columns
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Timing {
    Begin,
    End,
}

impl From<Timing> for PaymentTiming {
    fn from(timing: Timing) -> Self {
        match timing {
            Timing::Begin => PaymentTiming::Begin,
            Timing::End => PaymentTiming::End,
        }
    }
}

#[derive(Serialize)]
struct EvalOutput {
    expression: String,
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct CompoundOutput {
    solve_for: UnknownField,
    value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    growth: Option<Vec<Sample>>,
}

#[derive(Serialize)]
struct IrrOutput {
    irr_pct: f64,
    summary: CashFlowSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    npv_curve: Option<Vec<Sample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cumulative: Option<Vec<Sample>>,
}

#[derive(Serialize)]
struct NpvOutput {
    rate_pct: f64,
    npv: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Eval { expressions, file } => run_eval(expressions, file.as_deref(), cli.json),
        Command::Compound {
            solve_for,
            rate,
            periods,
            pv,
            pmt,
            fv,
            timing,
            series,
        } => {
            let params = CompoundParameters::new(
                percent_to_rate(rate),
                periods,
                pv,
                pmt,
                fv,
                timing.into(),
            );
            run_compound(solve_for, &params, series, &config, cli.json)
        }
        Command::Irr { flows, series } => run_irr(&flows.resolve()?, series, &config, cli.json),
        Command::Npv { rate, flows } => {
            let flows = flows.resolve()?;
            let output = NpvOutput {
                rate_pct: rate,
                npv: calculate_npv(&flows, percent_to_rate(rate)),
            };
            if cli.json {
                print_json(&output)?;
            } else {
                println!("NPV @ {}% = {:.2}", output.rate_pct, output.npv);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let base = match path {
        Some(path) => EngineConfig::from_json_path(path)
            .map_err(|e| anyhow!("failed to load config {}: {}", path.display(), e))?,
        None => EngineConfig::default(),
    };
    Ok(base.with_env_overrides())
}

impl FlowArgs {
    /// CSV file first, then --flow values, then the sample project
    fn resolve(self) -> Result<Vec<CashFlow>> {
        if let Some(path) = &self.csv {
            return load_cash_flows_csv(path)
                .map_err(|e| anyhow!("failed to load cash flows from {}: {}", path.display(), e));
        }
        if self.flows.is_empty() {
            log::info!("no cash flows given, using the sample project");
            return Ok(DEFAULT_CASH_FLOWS.to_vec());
        }
        Ok(self.flows)
    }
}

fn run_eval(mut expressions: Vec<String>, file: Option<&Path>, json: bool) -> Result<()> {
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        expressions.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    if expressions.is_empty() {
        bail!("nothing to evaluate: pass expressions or --file");
    }

    // Each evaluation owns its parser state, so lines are independent
    let outputs: Vec<EvalOutput> = expressions
        .par_iter()
        .map(|expression| match evaluate(expression) {
            Ok(value) if value.is_finite() => EvalOutput {
                expression: expression.clone(),
                value: Some(value),
                error: None,
            },
            Ok(_) => EvalOutput {
                expression: expression.clone(),
                value: None,
                error: Some("result out of range".into()),
            },
            Err(e) => EvalOutput {
                expression: expression.clone(),
                value: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    if json {
        return print_json(&outputs);
    }
    for output in &outputs {
        match output.value {
            Some(value) => println!("{} = {}", output.expression, value),
            None => println!(
                "{} : error: {}",
                output.expression,
                output.error.as_deref().unwrap_or("unknown")
            ),
        }
    }
    Ok(())
}

fn run_compound(
    solve_for: UnknownField,
    params: &CompoundParameters,
    series: bool,
    config: &EngineConfig,
    json: bool,
) -> Result<()> {
    let value = solve_compound_with(solve_for, params, &config.solver)
        .with_context(|| format!("cannot solve for {}", solve_for))?;

    let growth = if series {
        // Chart the solved problem: fill the unknown back in before sampling
        let mut solved = *params;
        match solve_for {
            UnknownField::Rate => solved.rate = percent_to_rate(value),
            UnknownField::Periods => solved.periods = value,
            UnknownField::PresentValue => solved.present_value = value,
            UnknownField::Payment => solved.payment = value,
            UnknownField::FutureValue => {}
        }
        Some(growth_series(&solved).context("cannot build growth series")?)
    } else {
        None
    };

    let output = CompoundOutput { solve_for, value, growth };
    if json {
        return print_json(&output);
    }

    match solve_for {
        UnknownField::Rate => println!("{} = {:.4}%", solve_for, output.value),
        _ => println!("{} = {:.2}", solve_for, output.value),
    }
    if let Some(growth) = &output.growth {
        println!("{:>8} {:>16}", "Period", "Value");
        for sample in growth {
            println!("{:>8} {:>16.2}", sample.x, sample.y);
        }
    }
    Ok(())
}

fn run_irr(flows: &[CashFlow], series: bool, config: &EngineConfig, json: bool) -> Result<()> {
    let irr = compute_irr_with(flows, &config.solver).context("cannot compute IRR")?;
    let summary = CashFlowSummary::from_flows(flows);

    let (curve, cumulative) = if series {
        let curve = npv_curve(flows, &config.npv_range).context("cannot build NPV curve")?;
        (Some(curve), Some(cumulative_series(flows)))
    } else {
        (None, None)
    };

    let output = IrrOutput {
        irr_pct: irr,
        summary,
        npv_curve: curve,
        cumulative,
    };
    if json {
        return print_json(&output);
    }

    println!("IRR = {:.2}%", output.irr_pct);
    println!(
        "Invested {:.2}, returned {:.2} over {} cash flows (net {:.2})",
        output.summary.total_investment.abs(),
        output.summary.total_return,
        output.summary.count,
        output.summary.net,
    );
    println!(
        "NPV at IRR: {:.6}",
        calculate_npv(flows, percent_to_rate(output.irr_pct))
    );

    if let Some(curve) = &output.npv_curve {
        println!("\n{:>8} {:>16}", "Rate %", "NPV");
        for sample in curve {
            println!("{:>8.1} {:>16.2}", sample.x, sample.y);
        }
    }
    if let Some(cumulative) = &output.cumulative {
        println!("\n{:>8} {:>16}", "Period", "Cumulative");
        for sample in cumulative {
            println!("{:>8} {:>16.2}", sample.x, sample.y);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
