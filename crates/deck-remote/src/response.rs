//! Response contract and row normalization
//!
//! Expected body:
//!
//! ```json
//! {"results": [{...}], "confidence": 0.9, "sql": "...", "explanation": "...",
//!  "request_id": "...", "error": null}
//! ```
//!
//! `results` and `confidence` are required. Rows are rebuilt against the
//! request's declared columns, so a remote result always has exactly the
//! column set a fallback result would have.

use crate::error::RemoteError;
use deck_model::{AnalysisResult, ColumnSpec, Confidence, Row, Scalar};
use serde_json::{Map, Value};

/// Validate a raw response and build a remote [`AnalysisResult`]
///
/// # Errors
/// - `SemanticError` if the body carries an `error` object
/// - `MalformedResponse` if a required field is missing or mistyped,
///   confidence is out of range, or a row does not fit the declared columns
pub fn parse_response(body: &Value, columns: &[ColumnSpec]) -> Result<AnalysisResult, RemoteError> {
    let object = body
        .as_object()
        .ok_or_else(|| RemoteError::MalformedResponse("response is not a JSON object".into()))?;

    if let Some(error) = object.get("error").filter(|e| !e.is_null()) {
        return Err(RemoteError::SemanticError(error_message(error)));
    }

    let results = object
        .get("results")
        .ok_or_else(|| RemoteError::MalformedResponse("missing `results`".into()))?
        .as_array()
        .ok_or_else(|| RemoteError::MalformedResponse("`results` is not an array".into()))?;

    let raw_confidence = object
        .get("confidence")
        .ok_or_else(|| RemoteError::MalformedResponse("missing `confidence`".into()))?
        .as_f64()
        .ok_or_else(|| RemoteError::MalformedResponse("`confidence` is not a number".into()))?;
    let confidence =
        Confidence::new(raw_confidence).map_err(|e| RemoteError::MalformedResponse(e.to_string()))?;

    let rows = results
        .iter()
        .enumerate()
        .map(|(idx, record)| normalize_row(idx, record, columns))
        .collect::<Result<Vec<_>, _>>()?;

    let sql = optional_str(object, "sql")?.unwrap_or_default();
    let mut result = AnalysisResult::remote(rows, sql, confidence);
    if let Some(explanation) = optional_str(object, "explanation")? {
        result = result.with_explanation(explanation);
    }
    if let Some(request_id) = optional_str(object, "request_id")? {
        result = result.with_request_id(request_id);
    }
    Ok(result)
}

/// Rebuild one record in declared column order
///
/// Keys are matched case-insensitively and undeclared keys are dropped.
fn normalize_row(idx: usize, record: &Value, columns: &[ColumnSpec]) -> Result<Row, RemoteError> {
    let record = record
        .as_object()
        .ok_or_else(|| RemoteError::MalformedResponse(format!("row {idx} is not an object")))?;

    let mut row = Row::with_capacity(columns.len());
    for column in columns {
        let raw = lookup_ci(record, &column.name).ok_or_else(|| {
            RemoteError::MalformedResponse(format!("row {idx} is missing column `{}`", column.name))
        })?;
        let value = Scalar::from_json(raw)
            .and_then(|scalar| scalar.coerce(column.column_type))
            .ok_or_else(|| {
                RemoteError::MalformedResponse(format!(
                    "row {idx} column `{}`: {raw} is not {:?}",
                    column.name, column.column_type
                ))
            })?;
        row.insert(column.name.clone(), value);
    }
    Ok(row)
}

fn lookup_ci<'a>(record: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    record
        .get(name)
        .or_else(|| record.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v))
}

fn optional_str(object: &Map<String, Value>, key: &str) -> Result<Option<String>, RemoteError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RemoteError::MalformedResponse(format!("`{key}` is not a string"))),
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(s) => s.clone(),
        Value::Object(o) => o
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_string),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{ColumnType, ResultSource, SampleDomain};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn peak_columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::dimension("hour", ColumnType::Integer, SampleDomain::sequence(0, 1)).time_like(),
            ColumnSpec::metric("count", ColumnType::Integer, SampleDomain::range(0.0, 1.0)),
            ColumnSpec::metric("avg_speed", ColumnType::Float, SampleDomain::range(0.0, 1.0)),
        ]
    }

    #[test]
    fn parses_and_normalizes_uppercase_columns() {
        let body = json!({
            "request_id": "req_124",
            "sql": "SELECT HOUR(timestamp) as hour, COUNT(*) as count, AVG(speed) as avg_speed FROM traffic_data GROUP BY 1",
            "results": [
                {"HOUR": 8, "COUNT": 12890, "AVG_SPEED": 28.5, "EXTRA": "dropped"},
                {"HOUR": "17", "COUNT": 12456.0, "AVG_SPEED": 31}
            ],
            "confidence": 0.9,
            "explanation": "Peak traffic occurs at 8 AM."
        });

        let result = parse_response(&body, &peak_columns()).unwrap();
        assert_eq!(result.source, ResultSource::Remote);
        assert_eq!(result.confidence.value(), 0.9);
        assert_eq!(result.request_id.as_deref(), Some("req_124"));
        assert_eq!(result.column_names(), vec!["hour", "count", "avg_speed"]);
        assert_eq!(result.rows[1]["hour"], Scalar::Int(17));
        assert_eq!(result.rows[1]["count"], Scalar::Int(12456));
        assert_eq!(result.rows[1]["avg_speed"], Scalar::Float(31.0));
    }

    #[test]
    fn missing_required_fields_are_malformed() {
        let no_results = json!({"confidence": 0.9});
        let no_confidence = json!({"results": []});
        for body in [no_results, no_confidence, json!([1, 2])] {
            assert!(matches!(
                parse_response(&body, &peak_columns()),
                Err(RemoteError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn non_finite_text_in_float_column_is_malformed() {
        for raw in ["NaN", "inf", "infinity", "-Infinity"] {
            let body = json!({
                "results": [{"HOUR": 8, "COUNT": 12890, "AVG_SPEED": raw}],
                "confidence": 0.9
            });
            assert!(
                matches!(
                    parse_response(&body, &peak_columns()),
                    Err(RemoteError::MalformedResponse(_))
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn confidence_out_of_range_is_malformed() {
        let body = json!({"results": [], "confidence": 1.5});
        assert!(matches!(
            parse_response(&body, &peak_columns()),
            Err(RemoteError::MalformedResponse(_))
        ));
    }

    #[test]
    fn error_object_is_semantic() {
        let body = json!({"error": {"message": "cannot map 'weather' to a column"}, "results": [], "confidence": 0.0});
        assert_eq!(
            parse_response(&body, &peak_columns()).unwrap_err(),
            RemoteError::SemanticError("cannot map 'weather' to a column".into())
        );
    }

    #[test]
    fn missing_or_uncoercible_column_is_malformed() {
        let missing = json!({"results": [{"HOUR": 8, "COUNT": 1}], "confidence": 0.9});
        let bad_type = json!({"results": [{"HOUR": "eight", "COUNT": 1, "AVG_SPEED": 2.0}], "confidence": 0.9});
        assert!(parse_response(&missing, &peak_columns()).is_err());
        assert!(parse_response(&bad_type, &peak_columns()).is_err());
    }

    #[test]
    fn empty_results_are_valid() {
        let body = json!({"results": [], "confidence": 0.7});
        let result = parse_response(&body, &peak_columns()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.generated_query_text, "");
    }
}
