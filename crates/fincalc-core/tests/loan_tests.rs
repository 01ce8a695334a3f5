use fincalc_core::loan::{self, LoanRequest, PaymentMethod, RESIDUAL_BALANCE_EPSILON};
use fincalc_core::overpayment;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

/// A typical 30-year mortgage with a down payment.
fn sample_mortgage() -> LoanRequest {
    LoanRequest {
        amount: dec!(9_000_000),
        term_years: 30,
        term_months: 0,
        interest_rate: dec!(10),
        down_payment: Some(dec!(1_000_000)),
        extra_payment: None,
        method: PaymentMethod::Annuity,
    }
}

/// A short consumer loan.
fn sample_consumer_loan() -> LoanRequest {
    LoanRequest {
        amount: dec!(300_000),
        term_years: 0,
        term_months: 18,
        interest_rate: dec!(16),
        down_payment: None,
        extra_payment: None,
        method: PaymentMethod::Annuity,
    }
}

// ===========================================================================
// Schedule tests
// ===========================================================================

#[test]
fn test_mortgage_runs_full_term() {
    let request = sample_mortgage();
    assert!(loan::validate_loan(&request).is_empty());

    let result = loan::compute_schedule(&request.resolve());

    assert_eq!(result.effective_term, 360);
    assert_eq!(result.schedule.len(), 360);
    assert!(result.schedule.last().unwrap().balance <= RESIDUAL_BALANCE_EPSILON);
    // 8M financed at 10% over 30 years costs roughly 70.2k per month
    assert!(result.monthly_payment > dec!(70_000));
    assert!(result.monthly_payment < dec!(70_500));
}

#[test]
fn test_total_payments_equals_payment_times_term() {
    let result = loan::compute_schedule(&sample_consumer_loan().resolve());

    // No extra payments, so the constant payment runs the full term
    let expected = result.monthly_payment * Decimal::from(result.effective_term);
    assert!((result.total_payments - expected).abs() < dec!(1.00));
}

#[test]
fn test_differentiated_costs_less_interest_than_annuity() {
    let annuity = loan::compute_schedule(&sample_mortgage().resolve());

    let mut request = sample_mortgage();
    request.method = PaymentMethod::Differentiated;
    let differentiated = loan::compute_schedule(&request.resolve());

    // Faster principal reduction means less interest overall
    assert!(differentiated.total_interest < annuity.total_interest);
    // At the price of a larger first payment
    assert!(differentiated.monthly_payment > annuity.monthly_payment);
}

#[test]
fn test_extra_payment_shortens_term_and_saves_interest() {
    let base = loan::compute_schedule(&sample_consumer_loan().resolve());

    let mut request = sample_consumer_loan();
    request.extra_payment = Some(dec!(5000));
    let accelerated = loan::compute_schedule(&request.resolve());

    assert!(accelerated.effective_term < base.effective_term);
    assert!(accelerated.total_interest < base.total_interest);
    assert_eq!(
        accelerated.schedule.len() as u32,
        accelerated.effective_term
    );
}

// ===========================================================================
// Overpayment tests
// ===========================================================================

#[test]
fn test_overpayment_consistent_with_schedule() {
    let definition = sample_mortgage().resolve();
    let schedule_result = loan::compute_schedule(&definition);
    let overpayment_result = overpayment::compute_overpayment(&definition);

    assert_eq!(overpayment_result.monthly_payment, schedule_result.monthly_payment);
    assert_eq!(overpayment_result.total_interest, schedule_result.total_interest);
    assert_eq!(overpayment_result.overpayment, schedule_result.total_interest);
    assert_eq!(overpayment_result.schedule, schedule_result.schedule);
}

#[test]
fn test_overpayment_percentage_identity() {
    let result = overpayment::compute_overpayment(&sample_mortgage().resolve());

    assert_eq!(result.effective_principal, dec!(8_000_000));
    let expected = (result.overpayment / dec!(8_000_000) * dec!(100)).round_dp(2);
    assert_eq!(result.overpayment_percentage, expected);
    assert_eq!(result.total_cost, dec!(9_000_000) + result.overpayment);
}

// ===========================================================================
// Boundary (serde) tests
// ===========================================================================

#[test]
fn test_request_deserializes_from_presentation_json() {
    let request: LoanRequest = serde_json::from_str(
        r#"{
            "amount": "250000",
            "term_years": 5,
            "interest_rate": "8.5",
            "down_payment": "50000",
            "method": "differentiated"
        }"#,
    )
    .unwrap();

    assert_eq!(request.method, PaymentMethod::Differentiated);
    assert_eq!(request.term_months, 0);
    assert_eq!(request.extra_payment, None);
    assert!(loan::validate_loan(&request).is_empty());

    let result = loan::compute_schedule(&request.resolve());
    assert_eq!(result.effective_term, 60);
}

#[test]
fn test_invalid_request_collects_messages() {
    let request: LoanRequest = serde_json::from_str(
        r#"{"amount": "0", "term_years": 40, "interest_rate": "8", "method": "annuity"}"#,
    )
    .unwrap();

    let errors = loan::validate_loan(&request);
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0], "Loan amount must be greater than 0");
    assert_eq!(errors[1], "Loan term must be between 1 month and 30 years");
}

// ===========================================================================
// Export tests
// ===========================================================================

#[test]
fn test_export_has_one_row_per_month() {
    let result = loan::compute_schedule(&sample_consumer_loan().resolve());
    let csv = loan::schedule_to_csv(&result.schedule);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), result.effective_term as usize + 1);
    assert_eq!(lines[0], "Month,Payment,Interest,Principal,Balance");
    assert!(lines[1].starts_with("1,"));
}
