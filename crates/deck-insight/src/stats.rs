//! Column aggregates

use deck_model::Row;

/// count/mean/min/max over the numeric values of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ColumnStats {
    pub(crate) count: usize,
    pub(crate) mean: f64,
    pub(crate) min: f64,
    pub(crate) max: f64,
    /// Index of the first row holding `max`
    pub(crate) argmax: usize,
}

impl ColumnStats {
    /// Aggregate a column, skipping nulls and non-numeric cells
    ///
    /// Returns `None` when the column holds no numeric value.
    pub(crate) fn compute(rows: &[Row], column: &str) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut argmax = 0;

        for (idx, value) in rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| row.get(column).and_then(|v| v.as_f64()).map(|v| (idx, v)))
        {
            count += 1;
            sum += value;
            if value < min {
                min = value;
            }
            if count == 1 || value > max {
                max = value;
                argmax = idx;
            }
        }

        (count > 0).then(|| Self {
            count,
            mean: sum / count as f64,
            min,
            max,
            argmax,
        })
    }

    /// Check that every aggregate is finite
    pub(crate) fn is_finite(&self) -> bool {
        self.mean.is_finite() && self.min.is_finite() && self.max.is_finite()
    }
}
