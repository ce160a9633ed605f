//! PanelMatch - Interview Panel Matcher
//!
//! Ranks professors for a candidate by weighted multi-field similarity:
//! - Directed domain-relatedness lookup for fields of study
//! - Exact match, semantic embedding similarity, and experience proximity
//! - Fixed field weights, normalized by total weight
//! - Top-K panel ordered by score, then experience

pub mod types;
pub mod domains;
pub mod weights;
pub mod embeddings;
pub mod http_embeddings;
pub mod similarity;
pub mod scoring;
pub mod ranking;
pub mod matcher;
pub mod error;
pub mod workbook;
pub mod config;
pub mod server;

pub use types::*;
pub use domains::DomainTable;
pub use weights::FieldWeights;
pub use embeddings::{EmbeddingProvider, HashEmbeddingProvider, MockEmbeddingProvider, FailingEmbeddingProvider};
pub use http_embeddings::HttpEmbeddingProvider;
pub use matcher::{PanelMatcher, SharedPanelMatcher};
pub use error::MatchError;
pub use config::AppConfig;
