//! Insight synthesis

use crate::format::{format_for, format_integer};
use crate::stats::ColumnStats;
use deck_model::{AnalysisResult, ColumnSpec, Insight, KeyMetric, Row, Topic};

/// Aggregates that cannot be reported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// Mean, min or max of a metric is NaN or infinite
    #[error("non-finite aggregate for column `{column}`")]
    NonFinite {
        /// Metric column
        column: String,
    },
}

/// Summarize a result for a topic
///
/// Empty rows produce the no-data sentinel. A single row is reported
/// value by value. Otherwise each declared metric is aggregated, and the
/// leading dimension is named at the maximum of the first metric.
///
/// # Errors
/// Returns `SynthesisError::NonFinite` if any aggregate is NaN or infinite
pub fn synthesize(result: &AnalysisResult, topic: &Topic) -> Result<Insight, SynthesisError> {
    if result.rows.is_empty() {
        return Ok(Insight::no_data(&topic.display_name, result.confidence));
    }

    let metrics = metric_stats(&result.rows, topic)?;
    let (summary_text, key_metrics) = match result.rows.as_slice() {
        [row] => single_row(row, topic),
        rows => multi_row(rows, topic, &metrics),
    };

    tracing::debug!(
        "Synthesized {} key metrics for {}",
        key_metrics.len(),
        topic.id
    );

    Ok(Insight {
        summary_text,
        key_metrics,
        confidence: result.confidence,
    })
}

fn metric_stats<'t>(rows: &[Row], topic: &'t Topic) -> Result<Vec<(&'t ColumnSpec, ColumnStats)>, SynthesisError> {
    let mut out = Vec::new();
    for column in topic.metrics() {
        let Some(stats) = ColumnStats::compute(rows, &column.name) else {
            continue;
        };
        if !stats.is_finite() {
            return Err(SynthesisError::NonFinite {
                column: column.name.clone(),
            });
        }
        out.push((column, stats));
    }
    Ok(out)
}

fn single_row(row: &Row, topic: &Topic) -> (String, Vec<KeyMetric>) {
    let key_metrics: Vec<KeyMetric> = topic
        .required_fields
        .iter()
        .filter_map(|column| {
            let value = row.get(&column.name).filter(|v| !v.is_null())?;
            let text = match value.as_f64() {
                Some(v) if column.is_metric() => format_for(v, column.column_type),
                _ => value.to_string(),
            };
            Some(KeyMetric::new(&column.label, text))
        })
        .collect();

    let parts: Vec<String> = key_metrics
        .iter()
        .map(|m| format!("{} {}", m.label, m.value))
        .collect();
    let summary = format!("{}: {}.", topic.display_name, parts.join(", "));
    (summary, key_metrics)
}

fn multi_row(rows: &[Row], topic: &Topic, metrics: &[(&ColumnSpec, ColumnStats)]) -> (String, Vec<KeyMetric>) {
    let row_count = format_integer(i64::try_from(rows.len()).unwrap_or(i64::MAX));
    let mut key_metrics = vec![KeyMetric::new("Data Points", row_count.as_str())];

    let Some(((primary, primary_stats), rest)) = metrics.split_first() else {
        let summary = format!("Across {row_count} rows, no numeric values were reported.");
        return (summary, key_metrics);
    };

    let peak = topic.dimensions().next().and_then(|dimension| {
        rows.get(primary_stats.argmax)
            .and_then(|row| row.get(&dimension.name))
            .filter(|v| !v.is_null())
            .map(|v| (dimension, v.to_string()))
    });

    let mut summary = format!("Across {row_count} rows, {}", primary.label);
    if let Some((dimension, value)) = &peak {
        key_metrics.push(KeyMetric::new(format!("Peak {}", dimension.label), value.as_str()));
        summary.push_str(&format!(
            " peaks at {} for {} {} and",
            format_for(primary_stats.max, primary.column_type),
            dimension.label,
            value
        ));
    }
    summary.push_str(&format!(" averages {}.", describe(primary, primary_stats)));

    key_metrics.push(KeyMetric::new(
        format!("Avg {}", primary.label),
        format_for(primary_stats.mean, primary.column_type),
    ));
    key_metrics.push(KeyMetric::new(
        format!("Max {}", primary.label),
        format_for(primary_stats.max, primary.column_type),
    ));
    key_metrics.push(KeyMetric::new(
        format!("Min {}", primary.label),
        format_for(primary_stats.min, primary.column_type),
    ));

    for (column, stats) in rest {
        summary.push_str(&format!(" {} averages {}.", column.label, describe(column, stats)));
        key_metrics.push(KeyMetric::new(
            format!("Avg {}", column.label),
            format_for(stats.mean, column.column_type),
        ));
    }

    (summary, key_metrics)
}

/// `10,915.8 (range 9,123 to 12,890)`
fn describe(column: &ColumnSpec, stats: &ColumnStats) -> String {
    format!(
        "{} (range {} to {})",
        format_for(stats.mean, column.column_type),
        format_for(stats.min, column.column_type),
        format_for(stats.max, column.column_type)
    )
}
