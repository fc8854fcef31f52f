//! Deterministic number formatting

use deck_model::ColumnType;

/// `1234567` -> `1,234,567`
#[must_use]
pub fn format_integer(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let grouped = group_thousands(&digits);
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `10915.84` -> `10,915.8`
#[must_use]
pub fn format_float(value: f64) -> String {
    let fixed = format!("{:.1}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let sign = if value < 0.0 && fixed != "0.0" { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Format an aggregate of a column
///
/// Integral values of integer columns keep integer form.
#[must_use]
pub fn format_for(value: f64, column_type: ColumnType) -> String {
    if column_type == ColumnType::Integer && value.fract() == 0.0 && value.abs() < 9.0e15 {
        format_integer(value as i64)
    } else {
        format_float(value)
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
