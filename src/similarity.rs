//! Per-field similarity between a candidate value and a professor value

use crate::domains::DomainTable;
use crate::embeddings::{cosine_similarity, EmbeddingProvider};
use crate::types::{FieldValue, YEARS_OF_EXPERIENCE};
use anyhow::{Context, Result};
use tracing::debug;

/// Fixed score for domain-adjacent fields of study
pub const RELATED_DOMAIN_SIMILARITY: f64 = 0.8;
pub const EXACT_MATCH_SIMILARITY: f64 = 1.0;
/// Experience gap (years) at which similarity reaches zero
pub const EXPERIENCE_WINDOW_YEARS: f64 = 30.0;

/// Similarity of one field between two profiles.
///
/// Experience values that are blank or read as whole years decay linearly
/// with the gap. Other text pairs go through domain lookup, then exact
/// match, then the embedding provider. Remaining pairs match on numeric
/// equality, and the experience field falls back to the year-gap decay.
/// Results are not clamped: a negative cosine or a gap wider than the
/// window yields a negative value.
///
/// Only a provider failure is returned as an error.
pub async fn field_similarity(
    field: &str,
    candidate: &FieldValue,
    professor: &FieldValue,
    domains: &DomainTable,
    embedder: &dyn EmbeddingProvider,
) -> Result<f64> {
    if field == YEARS_OF_EXPERIENCE && reads_as_years(candidate, professor) {
        if candidate == professor {
            return Ok(EXACT_MATCH_SIMILARITY);
        }
        return Ok(experience_similarity(candidate, professor));
    }

    if let (Some(a), Some(b)) = (candidate.as_text(), professor.as_text()) {
        return text_similarity(a, b, domains, embedder).await;
    }

    if let (FieldValue::Number(a), FieldValue::Number(b)) = (candidate, professor) {
        if a == b {
            return Ok(EXACT_MATCH_SIMILARITY);
        }
    }

    if field == YEARS_OF_EXPERIENCE {
        return Ok(experience_similarity(candidate, professor));
    }

    Ok(0.0)
}

async fn text_similarity(
    a: &str,
    b: &str,
    domains: &DomainTable,
    embedder: &dyn EmbeddingProvider,
) -> Result<f64> {
    if domains.is_related(a, b) {
        return Ok(RELATED_DOMAIN_SIMILARITY);
    }
    if a == b {
        return Ok(EXACT_MATCH_SIMILARITY);
    }
    semantic_similarity(a, b, embedder).await
}

/// Cosine similarity of the two texts' embeddings, as reported
pub async fn semantic_similarity(a: &str, b: &str, embedder: &dyn EmbeddingProvider) -> Result<f64> {
    let texts = [a.to_string(), b.to_string()];
    let vectors = embedder
        .encode(&texts)
        .await
        .with_context(|| format!("{} embedding provider failed", embedder.name()))?;

    match vectors.as_slice() {
        [va, vb] => {
            let sim = cosine_similarity(va, vb);
            debug!("semantic similarity '{}' ~ '{}' = {:.4}", a, b, sim);
            Ok(sim)
        }
        other => anyhow::bail!("expected 2 embeddings, provider returned {}", other.len()),
    }
}

/// Experience pairs that skip the text path: a blank side, or both sides
/// readable as whole years
fn reads_as_years(candidate: &FieldValue, professor: &FieldValue) -> bool {
    candidate.is_missing()
        || professor.is_missing()
        || (candidate.as_years().is_some() && professor.as_years().is_some())
}

/// `1 - |a - b| / 30` on whole years; 0 when either side is unparsable
pub fn experience_similarity(candidate: &FieldValue, professor: &FieldValue) -> f64 {
    match (candidate.as_years(), professor.as_years()) {
        (Some(a), Some(b)) => 1.0 - (a - b).abs() as f64 / EXPERIENCE_WINDOW_YEARS,
        _ => {
            debug!(
                "unparsable experience ('{}', '{}'); similarity 0",
                candidate, professor
            );
            0.0
        }
    }
}
