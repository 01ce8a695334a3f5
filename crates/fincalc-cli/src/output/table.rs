use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables: scalar result fields first, then each nested
/// schedule as its own month-by-month table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            for (key, val) in map {
                if !matches!(val, Value::Array(_)) {
                    builder.push_record([key.as_str(), &format_value(val)]);
                }
            }
            println!("{}", Table::from(builder));

            for (key, val) in map {
                if let Value::Array(rows) = val {
                    if !rows.is_empty() {
                        println!("\n{}:", key);
                        print_rows(rows);
                    }
                }
            }
        }
        Value::Array(rows) => print_rows(rows),
        _ => println!("{}", value),
    }
}

fn print_rows(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty)");
        return;
    }

    // Headers come from the first object's keys
    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for row in rows {
            if let Value::Object(map) = row {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(record);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for row in rows {
            println!("{}", format_value(row));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
