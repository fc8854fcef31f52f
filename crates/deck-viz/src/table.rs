//! Plain text table, the terminal tier

use crate::backend::{RenderBackend, RenderError, RenderRequest};
use deck_model::{Artifact, BackendKind, ChartKind, Row};

/// Text shown when there are no rows
pub const NO_DATA_TEXT: &str = "No data available for visualization";

/// Render rows as an aligned text table
///
/// Columns follow the first row's order; numeric cells are right-aligned.
#[must_use]
pub fn render_table(rows: &[Row]) -> String {
    let Some(first) = rows.first() else {
        return NO_DATA_TEXT.to_string();
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let cells: Vec<Vec<(String, bool)>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| match row.get(*h) {
                    Some(v) => (v.to_string(), v.is_numeric()),
                    None => (String::new(), false),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            cells
                .iter()
                .map(|row| row[idx].0.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    out.push_str(header_line.join(" | ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));

    for row in &cells {
        out.push('\n');
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|((text, numeric), &w)| {
                if *numeric {
                    format!("{text:>w$}")
                } else {
                    format!("{text:<w$}")
                }
            })
            .collect();
        out.push_str(line.join(" | ").trim_end());
    }
    out
}

/// `PLAIN_TABLE` tier; always available, never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTableBackend;

impl RenderBackend for PlainTableBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::PlainTable
    }

    fn is_available(&self) -> bool {
        true
    }

    fn supports(&self, _chart: ChartKind) -> bool {
        true
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifact, RenderError> {
        Ok(Artifact::Table(render_table(request.rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::Scalar;
    use pretty_assertions::assert_eq;

    #[test]
    fn aligned_table() {
        let rows: Vec<Row> = [("Downtown", 12_890), ("Airport", 950)]
            .iter()
            .map(|(location, count)| {
                let mut row = Row::new();
                row.insert("location".into(), Scalar::from(*location));
                row.insert("vehicle_count".into(), Scalar::Int(*count));
                row
            })
            .collect();

        assert_eq!(
            render_table(&rows),
            "location | vehicle_count\n\
             ---------+--------------\n\
             Downtown |         12890\n\
             Airport  |           950"
        );
    }

    #[test]
    fn empty_rows() {
        assert_eq!(render_table(&[]), NO_DATA_TEXT);
    }
}
