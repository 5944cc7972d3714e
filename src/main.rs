//! Credit Collection CLI
//!
//! Compares the three collection proposals for a credit and prints the
//! recommendation, optionally as JSON or with per-option CSV schedules.

use anyhow::Context;
use clap::Parser;
use credit_collection::{evaluate, report, ComparisonReport, ScenarioInputs, TextReport};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "credit_collection", version, about = "Compare credit collection options by NPV")]
struct Cli {
    /// Load inputs from a JSON scenario file; flags below override it
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Nominal credit amount (AR$)
    #[arg(long)]
    principal: Option<f64>,

    /// Number of monthly installments
    #[arg(long)]
    periods: Option<u32>,

    /// Option 1: discount for cash payment (%)
    #[arg(long)]
    contado_discount: Option<f64>,

    /// Option 3: initial exchange rate (AR$/USD)
    #[arg(long)]
    initial_fx_rate: Option<f64>,

    /// Annual discount rate, the opportunity cost of money (%)
    #[arg(long)]
    annual_discount_rate: Option<f64>,

    /// Option 2: projected average monthly inflation (%)
    #[arg(long)]
    monthly_inflation: Option<f64>,

    /// Option 3: projected average monthly devaluation (%)
    #[arg(long)]
    monthly_devaluation: Option<f64>,

    /// Print the comparison as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write lump_sum.csv, inflation_indexed.csv and fx_indexed.csv here
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

impl Cli {
    fn inputs(&self) -> anyhow::Result<ScenarioInputs> {
        let mut inputs = match &self.scenario {
            Some(path) => ScenarioInputs::from_json_path(path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?,
            None => ScenarioInputs::default(),
        };

        if let Some(v) = self.principal {
            inputs.principal = v;
        }
        if let Some(v) = self.periods {
            inputs.periods = v;
        }
        if let Some(v) = self.contado_discount {
            inputs.contado_discount_pct = v;
        }
        if let Some(v) = self.initial_fx_rate {
            inputs.initial_fx_rate = v;
        }
        if let Some(v) = self.annual_discount_rate {
            inputs.annual_discount_rate_pct = v;
        }
        if let Some(v) = self.monthly_inflation {
            inputs.monthly_inflation_pct = v;
        }
        if let Some(v) = self.monthly_devaluation {
            inputs.monthly_devaluation_pct = v;
        }

        Ok(inputs)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = cli.inputs()?;
    log::debug!("Scenario inputs: {:?}", inputs);

    let comparison = evaluate(&inputs).context("Invalid scenario")?;

    if cli.json {
        let report = ComparisonReport::new(&comparison);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Credit Collection Options Evaluator");
        println!("===================================\n");
        print!("{}", TextReport(&comparison));
    }

    if let Some(dir) = &cli.csv_dir {
        let written = report::write_csv_dir(dir, &comparison)?;
        for path in written {
            log::info!("Schedule written to: {}", path.display());
        }
    }

    Ok(())
}
