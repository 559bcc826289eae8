//! K-means: Lloyd iterations with k-means++ seeding.
//!
//! # The Algorithm
//!
//! K-means partitions points into `k` clusters by alternating two steps:
//!
//! 1. **Assign**: each point joins the cluster of its nearest centroid.
//! 2. **Update**: each centroid moves to the mean of its assigned points.
//!
//! Iteration stops when no assignment changes, or after `max_iter` rounds.
//!
//! **Objective**: minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! ## Seeding
//!
//! Initial centroids come from k-means++ (Arthur & Vassilvitskii, 2007):
//! the first centroid is a uniformly chosen point, each later one is drawn
//! with probability proportional to its squared distance from the nearest
//! centroid chosen so far. All draws come from a per-instance seeded RNG,
//! so a given `(data, k, seed)` always produces the same centroids.
//!
//! ## Guarantees
//!
//! - Exactly `k` centroids are returned. Duplicate centroids are possible
//!   when the data itself contains duplicates.
//! - A cluster that loses all its points keeps its previous centroid
//!   instead of collapsing to NaN.
//! - Hitting the iteration cap is not an error: the best centroids found so
//!   far are returned and [`KmeansFit::converged`] is `false`.

use rand::prelude::*;

use super::traits::Clusterer;
use crate::error::{Error, Result};
use crate::point::Point;

/// K-means clustering algorithm.
#[derive(Debug, Clone)]
pub struct Kmeans {
    /// Number of clusters.
    k: usize,
    /// Iteration cap for the assign/update loop.
    max_iter: usize,
    /// RNG seed for centroid initialization.
    seed: u64,
}

/// Default RNG seed. Reproducible runs without any configuration.
const DEFAULT_SEED: u64 = 42;

/// Default iteration cap.
const DEFAULT_MAX_ITER: usize = 100;

/// Result of a full k-means fit.
#[derive(Debug, Clone)]
pub struct KmeansFit {
    /// One centroid per cluster, indexed `0..k`.
    pub centroids: Vec<Point>,
    /// Cluster index of each input point, parallel to the input slice.
    pub labels: Vec<usize>,
    /// Number of assign/update rounds performed.
    pub iterations: usize,
    /// Whether assignments stabilized before the iteration cap.
    pub converged: bool,
}

impl Kmeans {
    /// Create a new k-means clusterer with `k` clusters.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: DEFAULT_MAX_ITER,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the maximum number of Lloyd iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the RNG seed used for centroid initialization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit and return the full result: centroids, per-point labels, and
    /// convergence information.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `data` is empty.
    /// - [`Error::InvalidParameter`] if `k` is zero.
    /// - [`Error::InvalidClusterCount`] if `k` exceeds the number of points.
    pub fn fit_full(&self, data: &[Point]) -> Result<KmeansFit> {
        let n = data.len();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }

        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }

        if self.k > n {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_points: n,
            });
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut centroids = self.seed_centroids(data, &mut rng);

        // usize::MAX forces the first pass to register as a change, so the
        // update step always runs at least once.
        let mut labels = vec![usize::MAX; n];
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter {
            iterations += 1;

            // Assign step.
            let mut changed = false;
            for (label, point) in labels.iter_mut().zip(data) {
                let nearest = Self::nearest_centroid(*point, &centroids);
                if *label != nearest {
                    *label = nearest;
                    changed = true;
                }
            }

            if !changed {
                converged = true;
                break;
            }

            // Update step: each centroid becomes the mean of its points.
            let mut sums = vec![Point::default(); self.k];
            let mut counts = vec![0usize; self.k];
            for (&label, point) in labels.iter().zip(data) {
                sums[label].x += point.x;
                sums[label].y += point.y;
                counts[label] += 1;
            }

            for ((centroid, sum), &count) in
                centroids.iter_mut().zip(&sums).zip(&counts)
            {
                // An emptied cluster keeps its previous centroid.
                if count > 0 {
                    centroid.x = sum.x / count as f64;
                    centroid.y = sum.y / count as f64;
                }
            }
        }

        log::debug!(
            "k-means fit: k={} n={} iterations={} converged={}",
            self.k,
            n,
            iterations,
            converged
        );

        Ok(KmeansFit {
            centroids,
            labels,
            iterations,
            converged,
        })
    }

    /// Index of the centroid nearest to `point`.
    fn nearest_centroid(point: Point, centroids: &[Point]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (idx, centroid) in centroids.iter().enumerate() {
            let dist = point.squared_distance(*centroid);
            if dist < best_dist {
                best_dist = dist;
                best = idx;
            }
        }
        best
    }

    /// k-means++ initialization: D² sampling from the seeded RNG.
    fn seed_centroids(&self, data: &[Point], rng: &mut StdRng) -> Vec<Point> {
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(data[rng.random_range(0..data.len())]);

        while centroids.len() < self.k {
            let weights: Vec<f64> = data
                .iter()
                .map(|p| {
                    centroids
                        .iter()
                        .map(|c| p.squared_distance(*c))
                        .fold(f64::INFINITY, f64::min)
                })
                .collect();

            let total: f64 = weights.iter().sum();
            if total <= 0.0 {
                // Every point coincides with a chosen centroid; fall back
                // to a uniform draw. Duplicate centroids are acceptable.
                centroids.push(data[rng.random_range(0..data.len())]);
                continue;
            }

            let mut target = rng.random::<f64>() * total;
            let mut chosen = data.len() - 1;
            for (idx, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = idx;
                    break;
                }
                target -= w;
            }
            centroids.push(data[chosen]);
        }

        centroids
    }
}

impl Clusterer for Kmeans {
    fn fit(&self, data: &[Point]) -> Result<Vec<Point>> {
        Ok(self.fit_full(data)?.centroids)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}
