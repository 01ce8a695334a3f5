mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use fincalc_core::FincalcError;

use commands::deposit::DepositArgs;
use commands::loan::LoanArgs;
use commands::savings::SavingsArgs;

/// Loan amortization and savings projection calculations
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Loan amortization and savings projection calculations",
    long_about = "A CLI for loan, overpayment, savings and deposit calculations with \
                  decimal precision. Produces month-by-month schedules using annuity or \
                  differentiated repayment, three savings interest regimes with \
                  target-amount solving, and deposit capitalization."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a loan payment schedule (annuity or differentiated)
    Loan(LoanArgs),
    /// Derive overpayment and total cost of credit for a loan
    Overpayment(LoanArgs),
    /// Project savings growth, optionally solving for the contribution
    Savings(SavingsArgs),
    /// Project deposit growth with interest capitalization
    Deposit(DepositArgs),
    /// Print a loan payment schedule in the export CSV format
    LoanSchedule(LoanArgs),
    /// Print a savings schedule in the export CSV format
    SavingsSchedule(SavingsArgs),
    /// Print a deposit schedule in the export CSV format
    DepositSchedule(DepositArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Overpayment(args) => commands::overpayment::run_overpayment(args),
        Commands::Savings(args) => commands::savings::run_savings(args),
        Commands::Deposit(args) => commands::deposit::run_deposit(args),
        // Schedule exports print their exact CSV contract, bypassing --output
        Commands::LoanSchedule(args) => finish_text(commands::loan::run_loan_schedule(args)),
        Commands::SavingsSchedule(args) => {
            finish_text(commands::savings::run_savings_schedule(args))
        }
        Commands::DepositSchedule(args) => {
            finish_text(commands::deposit::run_deposit_schedule(args))
        }
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}

fn finish_text(result: Result<String, Box<dyn std::error::Error>>) -> ! {
    match result {
        Ok(text) => {
            println!("{}", text);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    // Validation failures list every message the validator produced
    if let Some(FincalcError::InvalidRequest(messages)) = e.downcast_ref::<FincalcError>() {
        eprintln!("{}: invalid request", "error".red().bold());
        for message in messages {
            eprintln!("  - {}", message);
        }
    } else {
        eprintln!("{}: {}", "error".red().bold(), e);
    }
    process::exit(1);
}
