use serde::{Deserialize, Serialize};

use super::chunk::ChunkMetadata;

/// A single similarity hit from a corpus query.
///
/// `distance` is cosine distance: non-negative, 0 = identical direction.
/// Sequences returned to callers are always sorted ascending by distance
/// and never exceed the requested `k`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub id: String,
    pub document: String,
    pub metadata: ChunkMetadata,
    pub distance: f64,
}

impl RetrievalResult {
    /// Sort a candidate list ascending by distance (ties keep insertion order).
    pub fn sort_ascending(results: &mut [RetrievalResult]) {
        results.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, distance: f64) -> RetrievalResult {
        RetrievalResult {
            id: id.to_string(),
            document: String::new(),
            metadata: ChunkMetadata::new(),
            distance,
        }
    }

    #[test]
    fn sort_ascending_orders_by_distance() {
        let mut results = vec![hit("c", 0.9), hit("a", 0.1), hit("b", 0.5)];
        RetrievalResult::sort_ascending(&mut results);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
