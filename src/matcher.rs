//! Core PanelMatcher that ranks professors for a candidate

use crate::domains::DomainTable;
use crate::embeddings::EmbeddingProvider;
use crate::error::MatchError;
use crate::ranking::top_k;
use crate::scoring::weighted_score;
use crate::similarity::field_similarity;
use crate::types::*;
use crate::weights::FieldWeights;
use anyhow::Result;
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Scoring engine (thread-safe via Arc).
///
/// Tables are fixed at construction and only read afterwards.
pub struct PanelMatcher {
    weights: FieldWeights,
    domains: DomainTable,
    embedder: Arc<dyn EmbeddingProvider>,
}

pub type SharedPanelMatcher = Arc<PanelMatcher>;

impl PanelMatcher {
    pub fn new(
        weights: FieldWeights,
        domains: DomainTable,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> SharedPanelMatcher {
        Arc::new(Self {
            weights,
            domains,
            embedder,
        })
    }

    /// Default weight and domain tables
    pub fn with_defaults(embedder: Arc<dyn EmbeddingProvider>) -> SharedPanelMatcher {
        Self::new(FieldWeights::default(), DomainTable::default(), embedder)
    }

    pub fn weights(&self) -> &FieldWeights {
        &self.weights
    }

    pub fn domains(&self) -> &DomainTable {
        &self.domains
    }

    pub fn embedder_name(&self) -> &'static str {
        self.embedder.name()
    }

    pub async fn similarity(&self, field: &str, a: &FieldValue, b: &FieldValue) -> Result<f64> {
        field_similarity(field, a, b, &self.domains, self.embedder.as_ref()).await
    }

    pub async fn score(&self, candidate: &Profile, professor: &Profile) -> Result<f64> {
        weighted_score(
            candidate,
            professor,
            &self.weights,
            &self.domains,
            self.embedder.as_ref(),
        )
        .await
    }

    /// Top `k` professors for `candidate`.
    ///
    /// Every pair is scored before ordering; any scoring failure fails the
    /// whole ranking.
    pub async fn rank(
        &self,
        candidate: &Profile,
        professors: &[Profile],
        k: usize,
    ) -> Result<Vec<ScoredCandidate>> {
        if professors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let start = Instant::now();

        let tasks = professors.iter().map(|professor| async move {
            let score = self.score(candidate, professor).await?;
            debug!("score {} ~ {} = {:.4}", candidate.name(), professor.name(), score);
            Ok::<_, anyhow::Error>(ScoredCandidate {
                professor: professor.name(),
                score,
                experience: professor.get(YEARS_OF_EXPERIENCE).as_number(),
            })
        });
        let scored = try_join_all(tasks).await?;

        let ranked = top_k(scored, k);

        info!(
            "Ranked {} professors for '{}' in {}ms, returning {}",
            professors.len(),
            candidate.name(),
            start.elapsed().as_millis(),
            ranked.len()
        );

        Ok(ranked)
    }

    /// Resolve `candidate_name` among `candidates` and rank `professors` for it
    pub async fn match_candidate(
        &self,
        candidate_name: &str,
        candidates: &[Profile],
        professors: &[Profile],
        k: usize,
    ) -> Result<Vec<ScoredCandidate>, MatchError> {
        let candidate = find_candidate(candidates, candidate_name)
            .ok_or_else(|| MatchError::CandidateNotFound(candidate_name.to_string()))?;

        self.rank(candidate, professors, k)
            .await
            .map_err(MatchError::Provider)
    }
}

/// First profile whose `Name` equals `name` exactly
pub fn find_candidate<'a>(candidates: &'a [Profile], name: &str) -> Option<&'a Profile> {
    candidates
        .iter()
        .find(|c| matches!(c.get(NAME_FIELD), FieldValue::Text(n) if n == name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::FailingEmbeddingProvider;

    #[test]
    fn test_find_candidate_exact_and_first() {
        let candidates = vec![
            Profile::new().with(NAME_FIELD, "Ravi").with("Diploma", "first"),
            Profile::new().with(NAME_FIELD, "ravi"),
            Profile::new().with(NAME_FIELD, "Ravi").with("Diploma", "second"),
        ];

        let found = find_candidate(&candidates, "Ravi").unwrap();
        assert_eq!(found.get("Diploma"), &FieldValue::text("first"));
        assert!(find_candidate(&candidates, "Meera").is_none());
    }

    #[test]
    fn test_blank_name_never_matches() {
        let candidates = vec![Profile::new().with("Diploma", "x"), Profile::new().with(NAME_FIELD, 42)];
        assert!(find_candidate(&candidates, "").is_none());
        assert!(find_candidate(&candidates, "42").is_none());
    }

    #[tokio::test]
    async fn test_rank_with_no_professors_is_empty() {
        let matcher = PanelMatcher::with_defaults(Arc::new(FailingEmbeddingProvider));
        let candidate = Profile::new().with(NAME_FIELD, "Ravi");

        for k in [0, 1, 10] {
            assert!(matcher.rank(&candidate, &[], k).await.unwrap().is_empty());
        }
    }
}
