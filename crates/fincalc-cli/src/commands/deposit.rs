use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::deposit::{self, CapitalizationPeriod, DepositDefinition, DepositKind};
use fincalc_core::FincalcError;

use crate::input;

/// Arguments for the deposit and deposit-schedule commands
#[derive(Args)]
pub struct DepositArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Initial deposit amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Annual interest rate in percent (e.g. 5 for 5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Interest accrual kind
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Capitalization interval for the capitalized kind
    #[arg(long, value_enum, default_value = "monthly")]
    pub capitalization: CapitalizationArg,

    /// Amount added to the deposit every month
    #[arg(long)]
    pub monthly_addition: Option<Decimal>,

    /// Amount withdrawn from the deposit every month
    #[arg(long)]
    pub monthly_withdrawal: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Simple,
    Capitalized,
    Compound,
}

impl From<KindArg> for DepositKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Simple => DepositKind::Simple,
            KindArg::Capitalized => DepositKind::Capitalized,
            KindArg::Compound => DepositKind::Compound,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CapitalizationArg {
    Monthly,
    Quarterly,
    Yearly,
}

impl From<CapitalizationArg> for CapitalizationPeriod {
    fn from(period: CapitalizationArg) -> Self {
        match period {
            CapitalizationArg::Monthly => CapitalizationPeriod::Monthly,
            CapitalizationArg::Quarterly => CapitalizationPeriod::Quarterly,
            CapitalizationArg::Yearly => CapitalizationPeriod::Yearly,
        }
    }
}

/// Assemble a deposit from a JSON file, piped stdin, or individual flags,
/// in that priority order, then run it through the validator.
fn build_deposit(args: DepositArgs) -> Result<DepositDefinition, Box<dyn std::error::Error>> {
    let definition: DepositDefinition = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DepositDefinition {
            amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            kind: args
                .kind
                .ok_or("--kind is required (or provide --input)")?
                .into(),
            capitalization: args.capitalization.into(),
            monthly_addition: args.monthly_addition,
            monthly_withdrawal: args.monthly_withdrawal,
        }
    };

    let errors = deposit::validate_deposit(&definition);
    if !errors.is_empty() {
        return Err(FincalcError::InvalidRequest(errors).into());
    }
    Ok(definition)
}

pub fn run_deposit(args: DepositArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let definition = build_deposit(args)?;
    let result = deposit::compute_deposit(&definition);
    Ok(serde_json::to_value(result)?)
}

pub fn run_deposit_schedule(args: DepositArgs) -> Result<String, Box<dyn std::error::Error>> {
    let definition = build_deposit(args)?;
    let result = deposit::compute_deposit(&definition);
    Ok(deposit::schedule_to_csv(&result.schedule))
}
