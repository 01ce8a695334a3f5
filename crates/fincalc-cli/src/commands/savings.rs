use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::savings::{self, InterestRegime, SavingsDefinition};
use fincalc_core::FincalcError;

use crate::input;

/// Arguments for the savings and savings-schedule commands
#[derive(Args)]
pub struct SavingsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Target amount to reach by the end of the term
    #[arg(long, alias = "target")]
    pub target_amount: Option<Decimal>,

    /// Starting balance
    #[arg(long, alias = "initial")]
    pub initial_amount: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Fixed monthly contribution; omit to derive it from the target
    #[arg(long, alias = "contribution")]
    pub monthly_contribution: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Interest regime
    #[arg(long, value_enum)]
    pub regime: Option<RegimeArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegimeArg {
    None,
    Simple,
    Compound,
}

impl From<RegimeArg> for InterestRegime {
    fn from(regime: RegimeArg) -> Self {
        match regime {
            RegimeArg::None => InterestRegime::None,
            RegimeArg::Simple => InterestRegime::Simple,
            RegimeArg::Compound => InterestRegime::Compound,
        }
    }
}

/// Assemble a savings plan from a JSON file, piped stdin, or individual
/// flags, in that priority order, then run it through the validator.
fn build_plan(args: SavingsArgs) -> Result<SavingsDefinition, Box<dyn std::error::Error>> {
    let plan: SavingsDefinition = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let regime = args
            .regime
            .ok_or("--regime is required (or provide --input)")?;
        SavingsDefinition {
            target_amount: args.target_amount,
            initial_amount: args.initial_amount.unwrap_or(Decimal::ZERO),
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            monthly_contribution: args.monthly_contribution,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            regime: regime.into(),
        }
    };

    let errors = savings::validate_savings(&plan);
    if !errors.is_empty() {
        return Err(FincalcError::InvalidRequest(errors).into());
    }
    Ok(plan)
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = build_plan(args)?;
    let result = savings::compute_savings(&plan);
    Ok(serde_json::to_value(result)?)
}

pub fn run_savings_schedule(args: SavingsArgs) -> Result<String, Box<dyn std::error::Error>> {
    let plan = build_plan(args)?;
    let result = savings::compute_savings(&plan);
    Ok(savings::schedule_to_csv(&result.schedule))
}
