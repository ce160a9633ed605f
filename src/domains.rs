//! Domain relatedness lookup
//!
//! A directed relation: registering `A -> B` says nothing about `B -> A`.
//! Callers consult it in (candidate value, professor value) order.

use std::collections::{HashMap, HashSet};

/// Fixed mapping from a field of study to the fields considered close to it
#[derive(Debug, Clone)]
pub struct DomainTable {
    related: HashMap<String, HashSet<String>>,
}

impl DomainTable {
    /// Empty table
    pub fn new() -> Self {
        Self {
            related: HashMap::new(),
        }
    }

    /// Build from `(domain, related domains)` pairs. Repeated keys merge.
    pub fn from_entries<I, K, R, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, R)>,
        K: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (domain, related) in entries {
            table
                .related
                .entry(domain.into())
                .or_default()
                .extend(related.into_iter().map(Into::into));
        }
        table
    }

    /// True iff `b` is registered as related under key `a`
    pub fn is_related(&self, a: &str, b: &str) -> bool {
        self.related.get(a).is_some_and(|set| set.contains(b))
    }

    pub fn len(&self) -> usize {
        self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

impl Default for DomainTable {
    fn default() -> Self {
        Self::from_entries(DEFAULT_DOMAINS.iter().map(|(k, v)| (*k, v.iter().copied())))
    }
}

const DEFAULT_DOMAINS: &[(&str, &[&str])] = &[
    ("Civil Engineering", &["Structural Engineering", "Environmental Engineering", "Geotechnical Engineering", "Water Resources Engineering"]),
    ("Mechanical Engineering", &["Thermal Engineering", "HVAC Systems", "Manufacturing Engineering", "Automobile Engineering", "Aerospace Engineering"]),
    ("Electrical Engineering", &["Power Systems", "Control Systems", "Electronics Engineering", "Communication Systems", "Signal Processing", "Power Electronics"]),
    ("Electronics & Communication Engineering", &["Signal Processing", "Wireless Communication", "Antenna Design", "Embedded Systems"]),
    ("Electronics Engineering", &["Wireless Communication", "Embedded Systems", "Control Systems", "Telecommunication Engineering"]),
    ("Computer Science", &["Data Science", "Artificial Intelligence", "Machine Learning", "Cybersecurity", "Software Engineering", "Information Technology"]),
    ("Instrumentation Engineering", &["Control Systems Engineering", "Automation Engineering", "Process Control", "Measurement Engineering"]),
    ("Chemical Engineering", &["Process Engineering", "Biochemical Engineering", "Environmental Engineering", "Chemical Process Design"]),
    ("Agriculture", &["Agronomy", "Sustainable Agriculture", "Soil Science", "Horticulture"]),
    ("Environmental Science", &["Environmental Geology", "Environmental Botany", "Environmental Engineering", "Environmental Ecology"]),
    ("Botany", &["Environmental Botany", "Plant Ecology", "Plant Genetics", "Plant Pathology"]),
    ("Library Science", &["Information Management", "Knowledge Management", "Digital Library Systems", "Archival Science"]),
    ("Chemistry", &["Biochemistry", "Chemical Process Design", "Material Science"]),
    ("Geology", &["Environmental Geology", "Earth Science", "Geotechnical Engineering"]),
    ("Automobile Engineering", &["Electric Vehicle Technologies", "Vehicle Design", "Thermal Systems"]),
    ("Structural Engineering", &["Civil Engineering", "Geotechnical Engineering", "Construction Engineering"]),
    ("Cybersecurity", &["Computer Science", "Information Security", "Cryptography"]),
    ("Artificial Intelligence", &["Computer Science", "Data Science", "Machine Learning"]),
    ("Data Science", &["Artificial Intelligence", "Machine Learning", "Computer Science"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_pair_is_related() {
        let table = DomainTable::default();
        assert!(table.is_related("Computer Science", "Artificial Intelligence"));
        assert!(table.is_related("Civil Engineering", "Structural Engineering"));
    }

    #[test]
    fn test_relation_is_directed() {
        let table = DomainTable::default();
        // Agriculture -> Agronomy is registered, the reverse is not
        assert!(table.is_related("Agriculture", "Agronomy"));
        assert!(!table.is_related("Agronomy", "Agriculture"));
    }

    #[test]
    fn test_unknown_key_has_no_relations() {
        let table = DomainTable::default();
        assert!(!table.is_related("Philosophy", "Computer Science"));
        assert!(!table.is_related("Philosophy", "Philosophy"));
        assert!(!table.is_related("Philosophy", ""));
    }

    #[test]
    fn test_repeated_keys_merge() {
        let table = DomainTable::from_entries(vec![
            ("Physics", vec!["Optics"]),
            ("Physics", vec!["Acoustics"]),
        ]);
        assert_eq!(table.len(), 1);
        assert!(table.is_related("Physics", "Optics"));
        assert!(table.is_related("Physics", "Acoustics"));
    }
}
