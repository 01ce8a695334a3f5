use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Reject a request whose validator produced errors.
fn validated(errors: Vec<String>) -> NapiResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(to_napi_error(fincalc_core::FincalcError::InvalidRequest(
            errors,
        )))
    }
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(input_json: String) -> NapiResult<String> {
    let request: fincalc_core::loan::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validated(fincalc_core::loan::validate_loan(&request))?;
    let output = fincalc_core::loan::compute_schedule(&request.resolve());
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_loan_input(input_json: String) -> NapiResult<String> {
    let request: fincalc_core::loan::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&fincalc_core::loan::validate_loan(&request)).map_err(to_napi_error)
}

/// Takes a full loan result (as returned by `calculate_loan`) and renders
/// its schedule in the download CSV format.
#[napi]
pub fn export_payment_schedule_csv(result_json: String) -> NapiResult<String> {
    #[derive(serde::Deserialize)]
    struct Envelope {
        schedule: Vec<fincalc_core::loan::PaymentScheduleEntry>,
    }
    let envelope: Envelope = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    Ok(fincalc_core::loan::schedule_to_csv(&envelope.schedule))
}

// ---------------------------------------------------------------------------
// Overpayment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan_overpayment(input_json: String) -> NapiResult<String> {
    let request: fincalc_core::loan::LoanRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validated(fincalc_core::loan::validate_loan(&request))?;
    let output = fincalc_core::overpayment::compute_overpayment(&request.resolve());
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_savings(input_json: String) -> NapiResult<String> {
    let plan: fincalc_core::savings::SavingsDefinition =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validated(fincalc_core::savings::validate_savings(&plan))?;
    let output = fincalc_core::savings::compute_savings(&plan);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_savings_input(input_json: String) -> NapiResult<String> {
    let plan: fincalc_core::savings::SavingsDefinition =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&fincalc_core::savings::validate_savings(&plan)).map_err(to_napi_error)
}

/// Takes a full savings result (as returned by `calculate_savings`) and
/// renders its schedule in the download CSV format.
#[napi]
pub fn export_savings_schedule_csv(result_json: String) -> NapiResult<String> {
    #[derive(serde::Deserialize)]
    struct Envelope {
        schedule: Vec<fincalc_core::savings::SavingsScheduleEntry>,
    }
    let envelope: Envelope = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    Ok(fincalc_core::savings::schedule_to_csv(&envelope.schedule))
}

// ---------------------------------------------------------------------------
// Deposit
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_deposit(input_json: String) -> NapiResult<String> {
    let definition: fincalc_core::deposit::DepositDefinition =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    validated(fincalc_core::deposit::validate_deposit(&definition))?;
    let output = fincalc_core::deposit::compute_deposit(&definition);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn validate_deposit_input(input_json: String) -> NapiResult<String> {
    let definition: fincalc_core::deposit::DepositDefinition =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&fincalc_core::deposit::validate_deposit(&definition))
        .map_err(to_napi_error)
}

/// Takes a full deposit result (as returned by `calculate_deposit`) and
/// renders its schedule in the download CSV format.
#[napi]
pub fn export_deposit_schedule_csv(result_json: String) -> NapiResult<String> {
    #[derive(serde::Deserialize)]
    struct Envelope {
        schedule: Vec<fincalc_core::deposit::DepositScheduleEntry>,
    }
    let envelope: Envelope = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    Ok(fincalc_core::deposit::schedule_to_csv(&envelope.schedule))
}
