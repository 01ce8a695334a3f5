use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for the headline figure of each calculator in priority
/// order, then fall back to the first scalar field.
pub fn print_minimal(value: &Value) {
    let priority_keys = [
        "overpayment",
        "monthly_payment",
        "final_amount",
        "monthly_contribution",
        "total_interest",
    ];

    if let Value::Object(map) = value {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        // Fall back to the first scalar field
        if let Some((key, val)) = map.iter().find(|(_, v)| !matches!(v, Value::Array(_))) {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(value));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
