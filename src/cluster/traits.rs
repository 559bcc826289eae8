use crate::error::Result;
use crate::point::Point;

/// Common interface for centroid-producing clustering algorithms.
///
/// The anomaly detector is generic over this trait, so the clustering
/// backend (k-means, k-medoids, ...) can be swapped without touching the
/// threshold or decision logic.
pub trait Clusterer {
    /// Fit the model and return one centroid per cluster.
    fn fit(&self, data: &[Point]) -> Result<Vec<Point>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;

    /// Distance from `point` to its nearest centroid.
    ///
    /// The default is Euclidean. Implementations built on a different
    /// metric must override this so training and querying agree on how
    /// distance is measured.
    ///
    /// Returns `f64::INFINITY` when `centroids` is empty.
    fn distance_to_nearest(&self, point: Point, centroids: &[Point]) -> f64 {
        centroids
            .iter()
            .map(|c| point.squared_distance(*c))
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }
}
