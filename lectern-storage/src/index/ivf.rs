//! In-memory inverted-file (IVF) coarse index over one corpus.
//!
//! Built after bulk ingestion: vectors are assigned to the nearest of
//! `nlists` centroids (a few Lloyd rounds over sampled seeds). A query
//! probes the `nprobe` nearest lists and the candidates are re-ranked
//! with the exact cosine path, so result ordering matches brute force.

use tracing::debug;

use crate::queries::vector_search::cosine_distance;

/// Inverted-file index: centroids plus per-list chunk ids.
pub struct IvfIndex {
    centroids: Vec<Vec<f32>>,
    lists: Vec<Vec<String>>,
    nprobe: usize,
}

/// Number of Lloyd assignment/update rounds during build.
const LLOYD_ROUNDS: usize = 3;

impl IvfIndex {
    /// Build an index over (id, embedding) rows.
    ///
    /// `nlists` defaults to √n clamped to [1, 256]. Returns `None` when
    /// there are too few rows for the index to pay off (callers keep the
    /// brute-force path).
    pub fn build(rows: &[(String, Vec<f32>)], min_rows: usize, nprobe: usize) -> Option<Self> {
        if rows.len() < min_rows.max(2) {
            return None;
        }

        let nlists = ((rows.len() as f64).sqrt() as usize).clamp(1, 256);

        // Seed centroids with evenly spaced rows.
        let step = rows.len() / nlists;
        let mut centroids: Vec<Vec<f32>> = (0..nlists)
            .map(|i| rows[i * step].1.clone())
            .collect();

        let mut assignments = vec![0usize; rows.len()];
        for _ in 0..LLOYD_ROUNDS {
            // Assign each row to its nearest centroid by cosine distance.
            for (row_idx, (_, vec)) in rows.iter().enumerate() {
                assignments[row_idx] = nearest_centroid(&centroids, vec);
            }

            // Recompute centroids as the per-list mean.
            let dims = rows[0].1.len();
            let mut sums = vec![vec![0.0f64; dims]; nlists];
            let mut counts = vec![0usize; nlists];
            for (row_idx, (_, vec)) in rows.iter().enumerate() {
                let list = assignments[row_idx];
                counts[list] += 1;
                for (d, x) in vec.iter().enumerate() {
                    sums[list][d] += *x as f64;
                }
            }
            for (list, sum) in sums.iter().enumerate() {
                if counts[list] == 0 {
                    continue; // Empty list keeps its old centroid.
                }
                centroids[list] = sum
                    .iter()
                    .map(|s| (*s / counts[list] as f64) as f32)
                    .collect();
            }
        }

        let mut lists: Vec<Vec<String>> = vec![Vec::new(); nlists];
        for (row_idx, (id, _)) in rows.iter().enumerate() {
            lists[assignments[row_idx]].push(id.clone());
        }

        debug!(
            rows = rows.len(),
            nlists,
            nprobe,
            "IVF index built"
        );

        Some(Self {
            centroids,
            lists,
            nprobe: nprobe.max(1),
        })
    }

    /// Ids in the `nprobe` lists whose centroids are nearest to the query.
    pub fn probe(&self, query: &[f32]) -> Vec<String> {
        let mut ranked: Vec<(usize, f64)> = self
            .centroids
            .iter()
            .enumerate()
            .map(|(i, c)| (i, cosine_distance(query, c)))
            .collect();
        ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        ranked
            .iter()
            .take(self.nprobe)
            .flat_map(|(i, _)| self.lists[*i].iter().cloned())
            .collect()
    }

    /// Number of inverted lists.
    pub fn nlists(&self) -> usize {
        self.lists.len()
    }
}

fn nearest_centroid(centroids: &[Vec<f32>], vec: &[f32]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = cosine_distance(vec, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_rows(n_per_axis: usize) -> Vec<(String, Vec<f32>)> {
        // Two tight clusters around the x and y axes.
        let mut rows = Vec::new();
        for i in 0..n_per_axis {
            let eps = 0.01 * i as f32;
            rows.push((format!("x{i}"), vec![1.0, eps, 0.0]));
            rows.push((format!("y{i}"), vec![eps, 1.0, 0.0]));
        }
        rows
    }

    #[test]
    fn too_few_rows_yields_no_index() {
        let rows = axis_rows(1);
        assert!(IvfIndex::build(&rows, 100, 2).is_none());
    }

    #[test]
    fn probe_returns_cluster_members_for_query() {
        let rows = axis_rows(20);
        let index = IvfIndex::build(&rows, 2, 1).expect("index");
        let candidates = index.probe(&[1.0, 0.0, 0.0]);
        assert!(!candidates.is_empty());
        // The probed list should be dominated by x-cluster ids.
        let x_hits = candidates.iter().filter(|id| id.starts_with('x')).count();
        assert!(x_hits * 2 > candidates.len());
    }

    #[test]
    fn probing_all_lists_covers_every_row() {
        let rows = axis_rows(10);
        let index = IvfIndex::build(&rows, 2, 256).expect("index");
        let candidates = index.probe(&[1.0, 0.0, 0.0]);
        assert_eq!(candidates.len(), rows.len());
    }
}
