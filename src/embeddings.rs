//! Embedding providers for semantic text similarity

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for pluggable sentence encoders.
///
/// Implementations must be deterministic: the same text always encodes to
/// the same vector for the lifetime of the process.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Encode each text into a fixed-length vector, in input order
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Cosine similarity in [-1, 1], reported as-is.
///
/// Zero vectors and mismatched lengths give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

// Fixed keys keep hashed embeddings stable across runs and toolchains.
const HASH_KEY_0: u64 = 0x7061_6e65_6c6d_6174;
const HASH_KEY_1: u64 = 0x6368_2d65_6d62_6564;

pub const DEFAULT_HASH_DIMENSION: usize = 384;

/// Offline encoder using signed feature hashing over lowercase word tokens.
///
/// Texts sharing words land close together; it has no notion of synonyms.
/// Used when no embedding service is configured.
pub struct HashEmbeddingProvider {
    dimension: usize,
}

impl HashEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash(&self, token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_KEY_0, HASH_KEY_1);
        token.hash(&mut hasher);
        hasher.finish()
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            let h = self.hash(&token);
            let idx = (h % self.dimension as u64) as usize;
            // High bit picks the sign so collisions tend to cancel
            let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
            vector[idx] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashEmbeddingProvider {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIMENSION)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[async_trait]
impl EmbeddingProvider for HashEmbeddingProvider {
    fn name(&self) -> &'static str {
        "hash"
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

/// Mock encoder with a fixed lookup table, for tests
pub struct MockEmbeddingProvider {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    pub fn new<I, S>(vectors: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        Self {
            vectors: vectors.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `encode` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|t| {
                self.vectors
                    .get(t)
                    .cloned()
                    .ok_or_else(|| anyhow!("no mock embedding for '{}'", t))
            })
            .collect()
    }
}

/// Encoder that always fails, for exercising error propagation
pub struct FailingEmbeddingProvider;

#[async_trait]
impl EmbeddingProvider for FailingEmbeddingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn encode(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        bail!("embedding provider unavailable")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let a = vec![0.3, 0.4, 0.5];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_opposite_is_negative() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_hash_provider_is_deterministic() {
        let provider = HashEmbeddingProvider::default();
        let texts = vec!["Machine Learning".to_string(), "machine   learning".to_string()];

        let first = provider.encode(&texts).await.unwrap();
        let second = provider.encode(&texts).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].len(), DEFAULT_HASH_DIMENSION);
        // Case and spacing do not change the token bag
        assert!((cosine_similarity(&first[0], &first[1]) - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_hash_provider_empty_text_is_zero_vector() {
        let provider = HashEmbeddingProvider::new(16);
        let out = provider.encode(&["".to_string()]).await.unwrap();
        assert!(out[0].iter().all(|v| *v == 0.0));
    }

    #[tokio::test]
    async fn test_mock_provider_counts_and_fails_on_unknown() {
        let provider = MockEmbeddingProvider::new(vec![("a", vec![1.0, 0.0])]);

        assert!(provider.encode(&["a".to_string()]).await.is_ok());
        assert!(provider.encode(&["b".to_string()]).await.is_err());
        assert_eq!(provider.calls(), 2);
    }
}
