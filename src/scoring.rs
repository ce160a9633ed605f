//! Weighted aggregate score for a (candidate, professor) pair

use crate::domains::DomainTable;
use crate::embeddings::EmbeddingProvider;
use crate::similarity::field_similarity;
use crate::types::Profile;
use crate::weights::FieldWeights;
use anyhow::Result;

/// Sum of `similarity * weight` over the weight table, divided by the total weight.
///
/// Fields outside the table are ignored. The result is nominally in [0, 1]
/// but follows the per-field similarities out of range when they do.
pub async fn weighted_score(
    candidate: &Profile,
    professor: &Profile,
    weights: &FieldWeights,
    domains: &DomainTable,
    embedder: &dyn EmbeddingProvider,
) -> Result<f64> {
    let mut weighted_sum = 0.0;

    for (field, weight) in weights.iter() {
        let sim = field_similarity(
            field,
            candidate.get(field),
            professor.get(field),
            domains,
            embedder,
        )
        .await?;
        weighted_sum += sim * weight;
    }

    Ok(weighted_sum / weights.total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::{FailingEmbeddingProvider, MockEmbeddingProvider};
    use crate::types::YEARS_OF_EXPERIENCE;

    fn candidate() -> Profile {
        Profile::new()
            .with("Name", "Asha")
            .with("Diploma", "Civil Engineering")
            .with("Bachelors Degree", "Computer Science")
            .with("Masters Degree", "Data Science")
            .with("PhD Field", "Machine Learning")
            .with(YEARS_OF_EXPERIENCE, 5)
            .with("Current Department of Work", "Computer Science")
    }

    #[tokio::test]
    async fn test_identical_profiles_score_one() {
        let weights = FieldWeights::default();
        let domains = DomainTable::default();

        let score = weighted_score(&candidate(), &candidate(), &weights, &domains, &FailingEmbeddingProvider)
            .await
            .unwrap();

        assert!((score - 1.0).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_related_bachelors_contribution() {
        let weights = FieldWeights::new(vec![("Bachelors Degree", 1.5), ("PhD Field", 3.0)]).unwrap();
        let domains = DomainTable::default();
        let professor = candidate().with("Bachelors Degree", "Artificial Intelligence");

        let score = weighted_score(&candidate(), &professor, &weights, &domains, &FailingEmbeddingProvider)
            .await
            .unwrap();

        let expected = (0.8 * 1.5 + 1.0 * 3.0) / 4.5;
        assert!((score - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_fields_outside_table_are_ignored() {
        let weights = FieldWeights::new(vec![("PhD Field", 3.0)]).unwrap();
        let domains = DomainTable::default();
        let professor = Profile::new()
            .with("PhD Field", "Machine Learning")
            .with("Name", "Dr. Bose")
            .with("Hobby", "Chess");

        let score = weighted_score(&candidate(), &professor, &weights, &domains, &FailingEmbeddingProvider)
            .await
            .unwrap();

        assert_eq!(score, 1.0);
    }

    #[tokio::test]
    async fn test_order_of_weight_table_does_not_matter() {
        let domains = DomainTable::default();
        let embedder = MockEmbeddingProvider::new(vec![
            ("Machine Learning", vec![1.0, 0.0]),
            ("Plant Genetics", vec![0.6, 0.8]),
        ]);
        let professor = Profile::new()
            .with("PhD Field", "Plant Genetics")
            .with(YEARS_OF_EXPERIENCE, 11)
            .with("Bachelors Degree", "Artificial Intelligence");

        let forward = FieldWeights::new(vec![
            ("Bachelors Degree", 1.5),
            ("PhD Field", 3.0),
            (YEARS_OF_EXPERIENCE, 2.0),
        ])
        .unwrap();
        let reversed = FieldWeights::new(vec![
            (YEARS_OF_EXPERIENCE, 2.0),
            ("PhD Field", 3.0),
            ("Bachelors Degree", 1.5),
        ])
        .unwrap();

        let a = weighted_score(&candidate(), &professor, &forward, &domains, &embedder).await.unwrap();
        let b = weighted_score(&candidate(), &professor, &reversed, &domains, &embedder).await.unwrap();

        assert!((a - b).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_preserved() {
        let weights = FieldWeights::new(vec![(YEARS_OF_EXPERIENCE, 2.0)]).unwrap();
        let domains = DomainTable::default();
        let professor = Profile::new().with(YEARS_OF_EXPERIENCE, 65);

        let score = weighted_score(&candidate(), &professor, &weights, &domains, &FailingEmbeddingProvider)
            .await
            .unwrap();

        assert!((score - (1.0 - 60.0 / 30.0)).abs() < 1e-12);
        assert!(score < 0.0);
    }

    #[tokio::test]
    async fn test_provider_failure_fails_score() {
        let weights = FieldWeights::default();
        let domains = DomainTable::default();
        let professor = candidate().with("PhD Field", "Geology");

        let result = weighted_score(&candidate(), &professor, &weights, &domains, &FailingEmbeddingProvider).await;
        assert!(result.is_err());
    }
}
