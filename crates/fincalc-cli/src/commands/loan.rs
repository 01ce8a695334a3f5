use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::loan::{self, LoanRequest, PaymentMethod};
use fincalc_core::FincalcError;

use crate::input;

/// Arguments shared by the loan, overpayment and loan-schedule commands
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Term years, added to --term-months
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Term months, added to --term-years
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Annual interest rate in percent (e.g. 12 for 12%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Up-front payment deducted from the financed amount
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Fixed extra payment applied every month
    #[arg(long)]
    pub extra_payment: Option<Decimal>,

    /// Repayment method
    #[arg(long, value_enum, default_value = "annuity")]
    pub method: MethodArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    Annuity,
    Differentiated,
}

impl From<MethodArg> for PaymentMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Annuity => PaymentMethod::Annuity,
            MethodArg::Differentiated => PaymentMethod::Differentiated,
        }
    }
}

/// Assemble a loan request from a JSON file, piped stdin, or individual
/// flags, in that priority order, then run it through the validator.
pub fn build_request(args: LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let request: LoanRequest = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanRequest {
            amount: args
                .amount
                .ok_or("--amount is required (or provide --input)")?,
            term_years: args.term_years.unwrap_or(0),
            term_months: args.term_months.unwrap_or(0),
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            down_payment: args.down_payment,
            extra_payment: args.extra_payment,
            method: args.method.into(),
        }
    };

    let errors = loan::validate_loan(&request);
    if !errors.is_empty() {
        return Err(FincalcError::InvalidRequest(errors).into());
    }
    Ok(request)
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = loan::compute_schedule(&request.resolve());
    Ok(serde_json::to_value(result)?)
}

pub fn run_loan_schedule(args: LoanArgs) -> Result<String, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = loan::compute_schedule(&request.resolve());
    Ok(loan::schedule_to_csv(&result.schedule))
}
