use serde_json::Value;

use fincalc_core::overpayment;

use crate::commands::loan::{build_request, LoanArgs};

/// Overpayment takes the same request as the loan command; the derivation
/// happens on top of the computed schedule.
pub fn run_overpayment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    let result = overpayment::compute_overpayment(&request.resolve());
    Ok(serde_json::to_value(result)?)
}
