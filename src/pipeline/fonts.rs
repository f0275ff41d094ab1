//! Font profile clustering: groups the document's font sizes into a small
//! ordered set of heading-level buckets.
//!
//! One whole-document pass runs before any fragment is scored, because the
//! profile needs the full font-size distribution. Clustering is a bounded
//! 1-D k-means with deterministic quantile seeding, so identical input
//! always produces the identical profile.

use log::debug;

use crate::model::Fragment;

/// One group of similar font sizes.
#[derive(Debug, Clone, PartialEq)]
pub struct FontCluster {
    /// Stable cluster identifier
    pub cluster_id: usize,
    /// Mean font size of the cluster's members
    pub representative_size: f32,
    /// Ordinal rank: 0 = largest representative size
    pub rank: usize,
    /// Number of size observations in the cluster
    pub members: usize,
}

/// Document-wide font profile, consumed by the scorer and level assigner
/// and discarded afterwards.
#[derive(Debug, Clone)]
pub struct FontProfile {
    /// Clusters sorted by rank (largest representative size first)
    clusters: Vec<FontCluster>,
}

impl FontProfile {
    /// Maximum number of heading-level buckets.
    pub const MAX_CLUSTERS: usize = 4;

    /// Iteration cap for the k-means refinement loop.
    const MAX_ITERATIONS: usize = 32;

    /// Build the profile from all fragments of one document.
    pub fn build(fragments: &[Fragment]) -> Self {
        // Histogram at 0.1pt precision; keys sorted for determinism
        let mut histogram: Vec<(i32, usize)> = Vec::new();
        for fragment in fragments {
            let key = (fragment.font_size * 10.0).round() as i32;
            match histogram.binary_search_by_key(&key, |(k, _)| *k) {
                Ok(i) => histogram[i].1 += 1,
                Err(i) => histogram.insert(i, (key, 1)),
            }
        }

        if histogram.is_empty() {
            return Self { clusters: vec![] };
        }

        let values: Vec<f32> = histogram.iter().map(|(k, _)| *k as f32 / 10.0).collect();
        let counts: Vec<usize> = histogram.iter().map(|(_, c)| *c).collect();

        if values.len() == 1 {
            // Degenerate: no heading/body distinction from font alone
            return Self {
                clusters: vec![FontCluster {
                    cluster_id: 0,
                    representative_size: values[0],
                    rank: 0,
                    members: counts[0],
                }],
            };
        }

        let k = Self::MAX_CLUSTERS.min(values.len());
        let clusters = kmeans_1d(&values, &counts, k);
        debug!(
            "font profile: {} distinct sizes -> {} clusters",
            values.len(),
            clusters.len()
        );
        Self { clusters }
    }

    /// Whether the document offers no font-based heading/body distinction.
    /// The font-rank signal is unavailable in that case and its fusion
    /// weight is redistributed.
    pub fn is_degenerate(&self) -> bool {
        self.clusters.len() <= 1
    }

    /// Number of distinct ranks.
    pub fn rank_count(&self) -> usize {
        self.clusters.len()
    }

    /// The clusters, sorted by rank.
    pub fn clusters(&self) -> &[FontCluster] {
        &self.clusters
    }

    /// Rank of the cluster nearest to a font size (0 = largest).
    pub fn rank_of(&self, font_size: f32) -> usize {
        let mut best_rank = 0;
        let mut best_distance = f32::INFINITY;
        for cluster in &self.clusters {
            let distance = (cluster.representative_size - font_size).abs();
            if distance < best_distance {
                best_distance = distance;
                best_rank = cluster.rank;
            }
        }
        best_rank
    }
}

/// Bounded 1-D weighted k-means over distinct size values.
///
/// Seeds are placed at sorted quantiles, so the result is reproducible
/// across runs on identical input. Ranking: largest mean first; ties in
/// mean broken by member count, fewer members ranked lower (large and rare
/// reads as heading, small and common as body text).
fn kmeans_1d(values: &[f32], counts: &[usize], k: usize) -> Vec<FontCluster> {
    debug_assert!(k >= 2 && values.len() >= k);

    // Quantile seeds over the sorted distinct values
    let mut centroids: Vec<f32> = (0..k)
        .map(|i| values[i * (values.len() - 1) / (k - 1)])
        .collect();
    centroids.dedup();
    let k = centroids.len();

    let mut assignment = vec![0usize; values.len()];
    for _ in 0..FontProfile::MAX_ITERATIONS {
        let mut changed = false;

        for (i, value) in values.iter().enumerate() {
            let mut best = 0;
            let mut best_distance = f32::INFINITY;
            for (c, centroid) in centroids.iter().enumerate() {
                let distance = (value - centroid).abs();
                if distance < best_distance {
                    best_distance = distance;
                    best = c;
                }
            }
            if assignment[i] != best {
                assignment[i] = best;
                changed = true;
            }
        }

        for (c, centroid) in centroids.iter_mut().enumerate() {
            let mut weight = 0usize;
            let mut sum = 0.0f64;
            for (i, value) in values.iter().enumerate() {
                if assignment[i] == c {
                    weight += counts[i];
                    sum += *value as f64 * counts[i] as f64;
                }
            }
            if weight > 0 {
                *centroid = (sum / weight as f64) as f32;
            }
        }

        if !changed {
            break;
        }
    }

    let mut clusters: Vec<FontCluster> = (0..k)
        .filter_map(|c| {
            let mut members = 0usize;
            let mut sum = 0.0f64;
            for (i, value) in values.iter().enumerate() {
                if assignment[i] == c {
                    members += counts[i];
                    sum += *value as f64 * counts[i] as f64;
                }
            }
            if members == 0 {
                return None;
            }
            Some(FontCluster {
                cluster_id: c,
                representative_size: (sum / members as f64) as f32,
                rank: 0,
                members,
            })
        })
        .collect();

    clusters.sort_by(|a, b| {
        b.representative_size
            .partial_cmp(&a.representative_size)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.members.cmp(&b.members))
    });
    for (rank, cluster) in clusters.iter_mut().enumerate() {
        cluster.rank = rank;
    }
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(size: f32, n: usize) -> Vec<Fragment> {
        (0..n).map(|i| Fragment::new(format!("t{i}"), 1, size)).collect()
    }

    #[test]
    fn test_empty_profile() {
        let profile = FontProfile::build(&[]);
        assert!(profile.is_degenerate());
        assert_eq!(profile.rank_count(), 0);
        assert_eq!(profile.rank_of(12.0), 0);
    }

    #[test]
    fn test_single_size_is_degenerate() {
        let profile = FontProfile::build(&sized(12.0, 10));
        assert!(profile.is_degenerate());
        assert_eq!(profile.rank_count(), 1);
        assert_eq!(profile.rank_of(12.0), 0);
    }

    #[test]
    fn test_two_sizes_rank_largest_first() {
        let mut fragments = sized(18.0, 2);
        fragments.extend(sized(12.0, 20));
        let profile = FontProfile::build(&fragments);

        assert!(!profile.is_degenerate());
        assert_eq!(profile.rank_count(), 2);
        assert_eq!(profile.rank_of(18.0), 0);
        assert_eq!(profile.rank_of(12.0), 1);
        assert_eq!(profile.rank_of(11.5), 1);
    }

    #[test]
    fn test_clusters_capped_at_four() {
        let mut fragments = Vec::new();
        for size in [8.0, 9.0, 10.0, 12.0, 14.0, 18.0, 24.0, 32.0] {
            fragments.extend(sized(size, 3));
        }
        let profile = FontProfile::build(&fragments);
        assert!(profile.rank_count() <= FontProfile::MAX_CLUSTERS);

        // Ranks strictly increase as representative size decreases
        let clusters = profile.clusters();
        for pair in clusters.windows(2) {
            assert!(pair[0].representative_size > pair[1].representative_size);
            assert_eq!(pair[0].rank + 1, pair[1].rank);
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let mut fragments = sized(10.0, 50);
        fragments.extend(sized(13.5, 7));
        fragments.extend(sized(17.0, 3));
        fragments.extend(sized(22.0, 1));

        let a = FontProfile::build(&fragments);
        let b = FontProfile::build(&fragments);
        assert_eq!(a.clusters(), b.clusters());
    }
}
