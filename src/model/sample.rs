//! Sample data model and the ordered sample registry.
//!
//! The registry is fixed for the lifetime of a session. A sample's ordinal is its
//! position in the registry and is what range selection and fills sort by.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlateError;

/// Unique identifier of a sample.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleId(String);

impl SampleId {
    /// Create a sample id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SampleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SampleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SampleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A lab sample that can be placed into wells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Unique identifier
    pub id: SampleId,
    /// Display name
    pub name: String,
    /// Fixed position in the registry
    pub ordinal: usize,
}

/// Ordered, immutable roster of samples.
#[derive(Debug, Clone, Default)]
pub struct SampleRegistry {
    samples: Vec<Sample>,
    ordinals: HashMap<SampleId, usize>,
}

impl SampleRegistry {
    /// Build a registry from `(id, name)` pairs; ordinals follow iteration order.
    pub fn new<I, S, N>(entries: I) -> Result<Self, PlateError>
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        let mut registry = Self::default();
        for (id, name) in entries {
            let id = SampleId::new(id);
            let ordinal = registry.samples.len();
            if registry.ordinals.insert(id.clone(), ordinal).is_some() {
                return Err(PlateError::DuplicateSample(id.0));
            }
            registry.samples.push(Sample {
                id,
                name: name.into(),
                ordinal,
            });
        }
        Ok(registry)
    }

    /// Registry of `count` samples named `S1..Sn` / `Sample 1..n`.
    pub fn generated(count: usize) -> Self {
        let samples: Vec<Sample> = (0..count)
            .map(|i| Sample {
                id: SampleId(format!("S{}", i + 1)),
                name: format!("Sample {}", i + 1),
                ordinal: i,
            })
            .collect();
        let ordinals = samples.iter().map(|s| (s.id.clone(), s.ordinal)).collect();
        Self { samples, ordinals }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the registry holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Look up a sample by id.
    pub fn get(&self, id: &str) -> Option<&Sample> {
        self.ordinals.get(id).map(|&ordinal| &self.samples[ordinal])
    }

    /// Whether a sample with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.ordinals.contains_key(id)
    }

    /// Ordinal of a sample, failing for ids not in the registry.
    pub fn ordinal_of(&self, id: &str) -> Result<usize, PlateError> {
        self.ordinals
            .get(id)
            .copied()
            .ok_or_else(|| PlateError::unknown_sample(id))
    }

    /// Sample at a given ordinal.
    pub fn by_ordinal(&self, ordinal: usize) -> Option<&Sample> {
        self.samples.get(ordinal)
    }

    /// All samples in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Samples whose ordinal lies between `a` and `b` inclusive, in either order.
    pub fn span(&self, a: usize, b: usize) -> &[Sample] {
        if self.samples.is_empty() {
            return &[];
        }
        let last = self.samples.len() - 1;
        let lo = a.min(b).min(last);
        let hi = a.max(b).min(last);
        &self.samples[lo..=hi]
    }

    /// Up to `n` samples starting at `start`, truncated at the end of the registry.
    pub fn window(&self, start: usize, n: usize) -> &[Sample] {
        let start = start.min(self.samples.len());
        let end = start.saturating_add(n).min(self.samples.len());
        &self.samples[start..end]
    }

    /// Sort ids by registry ordinal, dropping duplicates and unknown ids.
    pub fn in_registry_order<'a, I>(&self, ids: I) -> Vec<SampleId>
    where
        I: IntoIterator<Item = &'a SampleId>,
    {
        let mut ordinals: Vec<usize> = ids
            .into_iter()
            .filter_map(|id| self.ordinals.get(id).copied())
            .collect();
        ordinals.sort_unstable();
        ordinals.dedup();
        ordinals
            .into_iter()
            .map(|ordinal| self.samples[ordinal].id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_registry() {
        let registry = SampleRegistry::generated(120);
        assert_eq!(registry.len(), 120);
        let s5 = registry.get("S5").unwrap();
        assert_eq!(s5.name, "Sample 5");
        assert_eq!(s5.ordinal, 4);
        assert_eq!(registry.by_ordinal(119).unwrap().id.as_str(), "S120");
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = SampleRegistry::new([("a", "Alpha"), ("b", "Beta"), ("a", "Again")]);
        assert_eq!(result.unwrap_err(), PlateError::DuplicateSample("a".to_string()));
    }

    #[test]
    fn test_ordinal_of_unknown_sample() {
        let registry = SampleRegistry::generated(3);
        assert_eq!(registry.ordinal_of("S3"), Ok(2));
        assert_eq!(
            registry.ordinal_of("S4"),
            Err(PlateError::UnknownSample("S4".to_string()))
        );
    }

    #[test]
    fn test_span_is_inclusive_and_order_independent() {
        let registry = SampleRegistry::generated(10);
        let forward: Vec<_> = registry.span(2, 5).iter().map(|s| s.ordinal).collect();
        let backward: Vec<_> = registry.span(5, 2).iter().map(|s| s.ordinal).collect();
        assert_eq!(forward, vec![2, 3, 4, 5]);
        assert_eq!(forward, backward);
        assert_eq!(registry.span(7, 7).len(), 1);
    }

    #[test]
    fn test_window_truncates_without_wrapping() {
        let registry = SampleRegistry::generated(120);
        let window = registry.window(100, 96);
        assert_eq!(window.len(), 20);
        assert_eq!(window[0].id.as_str(), "S101");
        assert_eq!(window[19].id.as_str(), "S120");
        assert!(registry.window(200, 5).is_empty());
    }

    #[test]
    fn test_in_registry_order_sorts_and_dedups() {
        let registry = SampleRegistry::generated(10);
        let ids: Vec<SampleId> = ["S7", "S2", "S7", "missing", "S1"]
            .into_iter()
            .map(SampleId::from)
            .collect();
        let ordered = registry.in_registry_order(&ids);
        let names: Vec<&str> = ordered.iter().map(SampleId::as_str).collect();
        assert_eq!(names, vec!["S1", "S2", "S7"]);
    }
}
