//! One-dimensional k-means clustering.
//!
//! Used by the column detector to split fragment left edges into groups.
//! The estimator is randomized (initial centers and empty-cluster reseeds),
//! so the random source is passed in explicitly; a seeded
//! [`rand::rngs::StdRng`] makes runs reproducible.

use crate::error::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// Final cluster centers, one per cluster
    pub centers: Vec<f32>,
    /// Cluster index of each input value, consistent with `centers`
    pub labels: Vec<usize>,
    /// Number of center-update rounds performed
    pub iterations: usize,
}

impl Clustering {
    /// Number of points assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centers.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Distance between the outermost centers.
    pub fn center_spread(&self) -> f32 {
        let min = self.centers.iter().copied().fold(f32::INFINITY, f32::min);
        let max = self.centers.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        if self.centers.is_empty() {
            0.0
        } else {
            max - min
        }
    }
}

/// Cluster scalar values into `k` groups with Lloyd's algorithm.
///
/// Initial centers are `k` distinct positions of `data`, taken in index
/// order. Each round assigns every value to its nearest center (the lowest
/// cluster index wins ties), then moves each center to the mean of its
/// members. A cluster that receives no members is reseeded with a random
/// value from `data`. The loop stops early when a round leaves every center
/// unchanged, and in any case after `max_iterations` rounds. Labels are
/// recomputed against the final centers before returning.
///
/// # Errors
///
/// Returns [`Error::InvalidClusterCount`] if `k` is zero and
/// [`Error::InsufficientData`] if `data` has fewer than `k` values.
///
/// # Examples
///
/// ```
/// use column_oxide::layout::kmeans::kmeans_1d;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let result = kmeans_1d(&[1.0, 2.0, 10.0, 11.0], 2, 100, &mut rng).unwrap();
///
/// let mut centers = result.centers.clone();
/// centers.sort_by(|a, b| a.partial_cmp(b).unwrap());
/// assert_eq!(centers, vec![1.5, 10.5]);
/// ```
pub fn kmeans_1d<R>(data: &[f32], k: usize, max_iterations: usize, rng: &mut R) -> Result<Clustering>
where
    R: Rng + ?Sized,
{
    if k == 0 {
        return Err(Error::InvalidClusterCount(k));
    }
    if data.len() < k {
        return Err(Error::InsufficientData {
            points: data.len(),
            clusters: k,
        });
    }

    let mut seeds = index::sample(rng, data.len(), k).into_vec();
    seeds.sort_unstable();
    let mut centers: Vec<f32> = seeds.into_iter().map(|i| data[i]).collect();

    let mut iterations = 0;
    while iterations < max_iterations {
        iterations += 1;

        let mut sums = vec![0.0f64; k];
        let mut counts = vec![0usize; k];
        for &x in data {
            let c = nearest_center(x, &centers);
            sums[c] += f64::from(x);
            counts[c] += 1;
        }

        let new_centers: Vec<f32> = sums
            .iter()
            .zip(&counts)
            .map(|(&sum, &count)| {
                if count > 0 {
                    (sum / count as f64) as f32
                } else {
                    data[rng.gen_range(0..data.len())]
                }
            })
            .collect();

        if new_centers == centers {
            break;
        }
        centers = new_centers;
    }

    let labels = data.iter().map(|&x| nearest_center(x, &centers)).collect();

    log::trace!("k-means: k={} iterations={} centers={:?}", k, iterations, centers);

    Ok(Clustering {
        centers,
        labels,
        iterations,
    })
}

/// Index of the center closest to `x`; the first minimum wins.
fn nearest_center(x: f32, centers: &[f32]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &c) in centers.iter().enumerate() {
        let dist = (x - c).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_nearest_center_ties_pick_lowest_index() {
        assert_eq!(nearest_center(5.0, &[4.0, 6.0]), 0);
        assert_eq!(nearest_center(5.0, &[6.0, 4.0]), 0);
        assert_eq!(nearest_center(5.9, &[4.0, 6.0]), 1);
    }

    #[test]
    fn test_zero_clusters_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = kmeans_1d(&[1.0, 2.0], 0, 10, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidClusterCount(0)));
    }

    #[test]
    fn test_too_few_points_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = kmeans_1d(&[1.0], 2, 10, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientData {
                points: 1,
                clusters: 2
            }
        ));
    }

    #[test]
    fn test_single_cluster_is_mean() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = kmeans_1d(&[2.0, 4.0, 6.0], 1, 100, &mut rng).unwrap();
        assert_eq!(result.centers, vec![4.0]);
        assert_eq!(result.labels, vec![0, 0, 0]);
    }

    #[test]
    fn test_two_clear_groups() {
        let data = [50.0, 51.0, 52.0, 400.0, 401.0, 402.0];
        let mut rng = StdRng::seed_from_u64(11);
        let result = kmeans_1d(&data, 2, 100, &mut rng).unwrap();

        let low = result.labels[0];
        assert!(result.labels[..3].iter().all(|&l| l == low));
        assert!(result.labels[3..].iter().all(|&l| l != low));
        assert_eq!(result.centers[low], 51.0);
        assert_eq!(result.centers[1 - low], 401.0);
        assert_eq!(result.cluster_sizes(), vec![3, 3]);
        assert_eq!(result.center_spread(), 350.0);
    }

    #[test]
    fn test_identical_values_converge_immediately() {
        let mut rng = StdRng::seed_from_u64(5);
        let result = kmeans_1d(&[7.0, 7.0, 7.0], 2, 100, &mut rng).unwrap();
        // Both seeds are 7.0; every point goes to cluster 0, cluster 1 reseeds to 7.0.
        assert_eq!(result.centers, vec![7.0, 7.0]);
        assert_eq!(result.labels, vec![0, 0, 0]);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn test_zero_iterations_keeps_seed_centers() {
        let mut rng = StdRng::seed_from_u64(9);
        let data = [1.0, 2.0];
        let result = kmeans_1d(&data, 2, 0, &mut rng).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.centers, vec![1.0, 2.0]);
        assert_eq!(result.labels, vec![0, 1]);
    }
}
