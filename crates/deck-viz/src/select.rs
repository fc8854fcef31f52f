//! Chart-kind selection and channel encoding
//!
//! Column roles come from the topic's declaration; columns the topic does
//! not declare are classified by their first value (numeric means metric).

use deck_model::{ChartHint, ChartKind, Channel, ColumnRole, Encoding, Row, Topic};
use std::collections::HashSet;

/// Most categories a pie chart may show
pub const MAX_PIE_SLICES: usize = 8;

struct Column<'a> {
    name: &'a str,
    role: ColumnRole,
    time_like: bool,
}

fn classify<'a>(rows: &'a [Row], topic: &Topic) -> Vec<Column<'a>> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };
    first
        .iter()
        .map(|(name, value)| match topic.field(name) {
            Some(spec) => Column {
                name: name.as_str(),
                role: spec.role,
                time_like: spec.time_like,
            },
            None => Column {
                name: name.as_str(),
                role: if value.is_numeric() {
                    ColumnRole::Metric
                } else {
                    ColumnRole::Dimension
                },
                time_like: false,
            },
        })
        .collect()
}

fn distinct_values(rows: &[Row], column: &str) -> usize {
    rows.iter()
        .filter_map(|row| row.get(column))
        .map(deck_model::Scalar::distinct_key)
        .collect::<HashSet<_>>()
        .len()
}

/// Pick a chart family for a result
///
/// 1. no rows: `TABLE`
/// 2. one row with two or more columns, or one numeric column: `GAUGE`
/// 3. one dimension with at most eight distinct values and one metric:
///    `PIE` for distribution topics, `BAR` otherwise
/// 4. any time-like column: `LINE`
/// 5. otherwise `BAR`
#[must_use]
pub fn select_chart_kind(rows: &[Row], topic: &Topic) -> ChartKind {
    let Some(first) = rows.first() else {
        return ChartKind::Table;
    };

    if rows.len() == 1 {
        let single_numeric = first.len() == 1 && first.values().all(deck_model::Scalar::is_numeric);
        if first.len() >= 2 || single_numeric {
            return ChartKind::Gauge;
        }
    }

    let columns = classify(rows, topic);
    let dimensions: Vec<&Column<'_>> = columns.iter().filter(|c| c.role == ColumnRole::Dimension).collect();
    let metric_count = columns.iter().filter(|c| c.role == ColumnRole::Metric).count();

    if let [dimension] = dimensions.as_slice() {
        if metric_count == 1 && distinct_values(rows, dimension.name) <= MAX_PIE_SLICES {
            return if topic.default_chart_hint == ChartHint::Distribution {
                ChartKind::Pie
            } else {
                ChartKind::Bar
            };
        }
    }

    if columns.iter().any(|c| c.time_like) {
        return ChartKind::Line;
    }

    ChartKind::Bar
}

/// Map columns to visual channels for a chart family
///
/// Channels are left out when no suitable column exists; backends report
/// the gap and the selector moves on.
#[must_use]
pub fn encode(kind: ChartKind, rows: &[Row], topic: &Topic) -> Encoding {
    let columns = classify(rows, topic);
    let first_dimension = columns.iter().find(|c| c.role == ColumnRole::Dimension);
    let first_metric = columns.iter().find(|c| c.role == ColumnRole::Metric);
    let mut encoding = Encoding::new();

    match kind {
        ChartKind::Bar => {
            put(&mut encoding, Channel::X, first_dimension);
            put(&mut encoding, Channel::Y, first_metric);
        }
        ChartKind::Line => {
            let x = columns.iter().find(|c| c.time_like).or(first_dimension);
            put(&mut encoding, Channel::X, x);
            put(&mut encoding, Channel::Y, first_metric);
        }
        ChartKind::Pie => {
            put(&mut encoding, Channel::Label, first_dimension);
            put(&mut encoding, Channel::Value, first_metric);
        }
        ChartKind::Gauge => {
            let numeric = rows.first().and_then(|row| {
                columns
                    .iter()
                    .find(|c| row.get(c.name).is_some_and(deck_model::Scalar::is_numeric))
            });
            put(&mut encoding, Channel::Value, numeric);
        }
        ChartKind::Table => {}
    }
    encoding
}

fn put(encoding: &mut Encoding, channel: Channel, column: Option<&Column<'_>>) {
    if let Some(column) = column {
        encoding.insert(channel, column.name.to_string());
    }
}
