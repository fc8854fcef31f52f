//! Demo data
//!
//! Synthesizes rows from a topic's declared columns when the analysis
//! service cannot be used. Output is a pure function of the topic: the
//! generator is seeded from the topic id.

use deck_model::{
    AnalysisResult, ColumnSpec, ColumnType, ErrorDescriptor, ErrorKind, Fingerprint, Parameters,
    Row, SampleDomain, Scalar, Topic,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Query text recorded on demo results
pub const DEMO_QUERY_TEXT: &str = "-- demo data: analysis service unavailable";

/// Sample domain that cannot produce values of its column type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FallbackError {
    /// Domain is empty, inverted or degenerate
    #[error("column `{column}`: {reason}")]
    InvalidDomain {
        /// Offending column
        column: String,
        /// What was wrong
        reason: String,
    },
}

impl FallbackError {
    fn invalid(column: &ColumnSpec, reason: impl Into<String>) -> Self {
        Self::InvalidDomain {
            column: column.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Deterministic demo row generator
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackDataProvider;

impl FallbackDataProvider {
    /// Create new provider
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Demo result for a topic
    ///
    /// Never fails: a schema that cannot be sampled yields an empty result
    /// carrying a `FallbackSchema` descriptor.
    #[must_use]
    pub fn generate(&self, topic: &Topic) -> AnalysisResult {
        match self.rows(topic) {
            Ok(rows) => {
                tracing::debug!("Generated {} demo rows for {}", rows.len(), topic.id);
                AnalysisResult::fallback(rows, DEMO_QUERY_TEXT)
            }
            Err(err) => {
                tracing::warn!("Cannot generate demo data for {}: {}", topic.id, err);
                AnalysisResult::fallback(Vec::new(), DEMO_QUERY_TEXT)
                    .with_error(ErrorDescriptor::new(ErrorKind::FallbackSchema, err.to_string()))
            }
        }
    }

    /// Demo rows in declared column order
    ///
    /// # Errors
    /// Returns `InvalidDomain` for the first column whose domain is unusable
    pub fn rows(&self, topic: &Topic) -> Result<Vec<Row>, FallbackError> {
        for column in &topic.required_fields {
            check_domain(column)?;
        }

        let mut rng = StdRng::seed_from_u64(seed_for(&topic.id));
        (0..topic.fallback_rows)
            .map(|idx| {
                topic
                    .required_fields
                    .iter()
                    .map(|column| Ok((column.name.clone(), sample(column, idx, &mut rng)?)))
                    .collect::<Result<Row, FallbackError>>()
            })
            .collect()
    }
}

fn seed_for(topic_id: &str) -> u64 {
    let digest = Fingerprint::compute(topic_id, &Parameters::new());
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(seed)
}

fn check_domain(column: &ColumnSpec) -> Result<(), FallbackError> {
    match &column.domain {
        SampleDomain::Range { min, max } => {
            if !min.is_finite() || !max.is_finite() {
                return Err(FallbackError::invalid(column, "range bounds must be finite"));
            }
            if min > max {
                return Err(FallbackError::invalid(column, format!("inverted range {min}..{max}")));
            }
        }
        SampleDomain::Categories { values } => {
            if values.is_empty() {
                return Err(FallbackError::invalid(column, "no categories"));
            }
        }
        SampleDomain::Sequence { step, .. } => {
            if *step == 0 {
                return Err(FallbackError::invalid(column, "sequence step is zero"));
            }
        }
    }
    Ok(())
}

fn sample(column: &ColumnSpec, idx: usize, rng: &mut StdRng) -> Result<Scalar, FallbackError> {
    let raw = match &column.domain {
        SampleDomain::Range { min, max } => {
            let value = if min < max { rng.random_range(*min..*max) } else { *min };
            match column.column_type {
                ColumnType::Integer => Scalar::Int(value.round() as i64),
                ColumnType::Float => Scalar::Float((value * 10.0).round() / 10.0),
                ColumnType::Text => Scalar::Text(format!("{value:.1}")),
            }
        }
        SampleDomain::Categories { values } => Scalar::Text(values[idx % values.len()].clone()),
        SampleDomain::Sequence { start, step } => {
            let value = i64::try_from(idx)
                .ok()
                .and_then(|i| step.checked_mul(i))
                .and_then(|offset| start.checked_add(offset))
                .ok_or_else(|| FallbackError::invalid(column, "sequence overflows"))?;
            Scalar::Int(value)
        }
    };

    raw.coerce(column.column_type).ok_or_else(|| {
        FallbackError::invalid(
            column,
            format!("sample {raw} is not {:?}", column.column_type),
        )
    })
}
