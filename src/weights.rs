//! Field weight table

use crate::types::YEARS_OF_EXPERIENCE;
use anyhow::{bail, Result};

/// Fields that take part in scoring, with their weights.
///
/// Only the fields listed here are compared; anything else in a profile
/// is ignored. The table is validated on construction and never changes.
#[derive(Debug, Clone)]
pub struct FieldWeights {
    entries: Vec<(String, f64)>,
    total: f64,
}

impl FieldWeights {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut table: Vec<(String, f64)> = Vec::new();
        for (field, weight) in entries {
            let field = field.into();
            if !weight.is_finite() || weight <= 0.0 {
                bail!("weight for '{}' must be positive, got {}", field, weight);
            }
            if table.iter().any(|(existing, _)| *existing == field) {
                bail!("duplicate weight for '{}'", field);
            }
            table.push((field, weight));
        }

        if table.is_empty() {
            bail!("weight table is empty");
        }

        let total = table.iter().map(|(_, w)| w).sum();
        Ok(Self { entries: table, total })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(f, w)| (f.as_str(), *w))
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.iter().find(|(f, _)| *f == field).map(|(_, w)| w)
    }

    /// Normalization denominator
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        let entries = vec![
            ("Diploma".to_string(), 1.0),
            ("Bachelors Degree".to_string(), 1.5),
            ("Masters Degree".to_string(), 2.0),
            ("PhD Field".to_string(), 3.0),
            (YEARS_OF_EXPERIENCE.to_string(), 2.0),
            ("Current Department of Work".to_string(), 2.0),
        ];
        let total = entries.iter().map(|(_, w)| w).sum();
        Self { entries, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = FieldWeights::default();
        assert_eq!(weights.len(), 6);
        assert_eq!(weights.get("PhD Field"), Some(3.0));
        assert_eq!(weights.get("Name"), None);
        assert!((weights.total() - 11.5).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_weights() {
        assert!(FieldWeights::new(vec![("Diploma", 0.0)]).is_err());
        assert!(FieldWeights::new(vec![("Diploma", -1.0)]).is_err());
        assert!(FieldWeights::new(vec![("Diploma", f64::NAN)]).is_err());
        assert!(FieldWeights::new(vec![("Diploma", 1.0), ("Diploma", 2.0)]).is_err());
        assert!(FieldWeights::new(Vec::<(&str, f64)>::new()).is_err());
    }

    #[test]
    fn test_custom_table_total() {
        let weights = FieldWeights::new(vec![("PhD Field", 3.0), ("Diploma", 1.0)]).unwrap();
        assert_eq!(weights.total(), 4.0);
        let fields: Vec<&str> = weights.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["PhD Field", "Diploma"]);
    }
}
