//! Anomaly detection against learned operating zones.
//!
//! A [`Detector`] wraps a clustering backend and adds the decision layer:
//! training fits the clusterer to a sample of normal telemetry and derives
//! a distance threshold from that sample; querying measures a point's
//! distance to the nearest learned centroid and compares it against the
//! threshold.
//!
//! The threshold is the tightest boundary that still classifies every
//! training point as normal, inflated by a configurable safety margin to
//! tolerate natural variance in future normal samples.
//!
//! ## Usage
//!
//! ```rust
//! use zoneguard::{Detector, Point};
//!
//! let normal = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.1, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.1, 10.0),
//! ];
//!
//! let mut detector = Detector::new(2);
//! detector.train(&normal).unwrap();
//!
//! let verdict = detector.verify(Point::new(5.0, 5.0)).unwrap();
//! assert!(verdict.is_anomaly);
//! ```

use crate::cluster::{Clusterer, Kmeans};
use crate::error::{Error, Result};
use crate::point::Point;

/// Default safety margin: a 10% buffer beyond the farthest normal point.
const DEFAULT_MARGIN: f64 = 1.1;

/// How the base threshold distance is derived from the training distances.
///
/// The threshold is `policy(distances) * margin`, where `distances` are the
/// nearest-centroid distances of the training points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdPolicy {
    /// Maximum training distance. Every training point ends up inside the
    /// boundary, but a single outlier in the training set widens it.
    Max,
    /// The given percentile (`0 < p <= 100`) of the training distances.
    /// Robust to training outliers; points in the trimmed tail will
    /// classify as anomalous.
    Percentile(f64),
}

/// Verdict for a single query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Whether the point lies beyond the anomaly threshold.
    pub is_anomaly: bool,
    /// Distance from the point to its nearest learned centroid.
    pub distance: f64,
}

/// State learned by a successful training run.
#[derive(Debug, Clone)]
struct TrainedModel {
    centroids: Vec<Point>,
    threshold: f64,
}

/// Anomaly detector: learned zone centroids plus a distance threshold.
///
/// Generic over the clustering backend; defaults to [`Kmeans`].
#[derive(Debug, Clone)]
pub struct Detector<C: Clusterer = Kmeans> {
    clusterer: C,
    margin: f64,
    policy: ThresholdPolicy,
    model: Option<TrainedModel>,
}

impl Detector<Kmeans> {
    /// Create a k-means-backed detector with `k` clusters (one per
    /// operational zone).
    pub fn new(k: usize) -> Self {
        Self::with_clusterer(Kmeans::new(k))
    }

    /// Set the RNG seed used by the inner k-means initialization.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.clusterer = self.clusterer.with_seed(seed);
        self
    }
}

impl<C: Clusterer> Detector<C> {
    /// Create a detector over an arbitrary clustering backend.
    pub fn with_clusterer(clusterer: C) -> Self {
        Self {
            clusterer,
            margin: DEFAULT_MARGIN,
            policy: ThresholdPolicy::Max,
            model: None,
        }
    }

    /// Set the safety margin multiplied into the threshold.
    ///
    /// Must be finite and positive; checked at [`Detector::train`]. Margins
    /// of at least 1.0 guarantee that every training point classifies as
    /// normal immediately after training.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the threshold derivation policy.
    pub fn with_policy(mut self, policy: ThresholdPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether a training run has completed.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Learned centroids, once trained.
    pub fn centroids(&self) -> Option<&[Point]> {
        self.model.as_ref().map(|m| m.centroids.as_slice())
    }

    /// Anomaly threshold, once trained. Always >= 0.
    pub fn threshold(&self) -> Option<f64> {
        self.model.as_ref().map(|m| m.threshold)
    }

    /// Learn the normal-operation boundary from a sample of normal points.
    ///
    /// Fits the clusterer, measures each training point's distance to its
    /// nearest centroid, and sets the threshold to
    /// `policy(distances) * margin`.
    ///
    /// Retraining is allowed: a successful call completely replaces any
    /// previously learned model. On error the previous model is kept.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `normal_points` is empty.
    /// - [`Error::InvalidClusterCount`] if there are fewer points than
    ///   clusters.
    /// - [`Error::InvalidParameter`] if the margin or policy is invalid.
    /// - Any clusterer failure is propagated.
    pub fn train(&mut self, normal_points: &[Point]) -> Result<()> {
        if normal_points.is_empty() {
            return Err(Error::EmptyInput);
        }

        let k = self.clusterer.n_clusters();
        if normal_points.len() < k {
            return Err(Error::InvalidClusterCount {
                requested: k,
                n_points: normal_points.len(),
            });
        }

        if !(self.margin.is_finite() && self.margin > 0.0) {
            return Err(Error::InvalidParameter {
                name: "margin",
                message: "must be finite and positive",
            });
        }

        if let ThresholdPolicy::Percentile(p) = self.policy {
            if !(p > 0.0 && p <= 100.0) {
                return Err(Error::InvalidParameter {
                    name: "percentile",
                    message: "must be in (0, 100]",
                });
            }
        }

        let centroids = self.clusterer.fit(normal_points)?;

        let distances: Vec<f64> = normal_points
            .iter()
            .map(|p| self.clusterer.distance_to_nearest(*p, &centroids))
            .collect();

        let threshold = base_distance(distances, self.policy) * self.margin;

        log::info!(
            "trained on {} points across {} zones, anomaly threshold {:.5}",
            normal_points.len(),
            centroids.len(),
            threshold
        );

        self.model = Some(TrainedModel {
            centroids,
            threshold,
        });
        Ok(())
    }

    /// Classify a point against the trained model.
    ///
    /// The verdict is anomalous iff the distance to the nearest centroid
    /// strictly exceeds the threshold; a point exactly at the threshold is
    /// normal, and a point coinciding with a centroid (distance 0) always
    /// is. Pure read: repeated calls with the same point and model return
    /// identical results.
    ///
    /// # Errors
    ///
    /// - [`Error::NotTrained`] if no training run has completed.
    pub fn verify(&self, point: Point) -> Result<Classification> {
        let model = self.model.as_ref().ok_or(Error::NotTrained)?;

        let distance = self
            .clusterer
            .distance_to_nearest(point, &model.centroids);

        Ok(Classification {
            is_anomaly: distance > model.threshold,
            distance,
        })
    }
}

/// Reduce the training distances to a single base distance per the policy.
///
/// The percentile uses the nearest-rank method on the sorted distances.
fn base_distance(mut distances: Vec<f64>, policy: ThresholdPolicy) -> f64 {
    match policy {
        ThresholdPolicy::Max => distances.iter().copied().fold(0.0, f64::max),
        ThresholdPolicy::Percentile(p) => {
            distances.sort_by(f64::total_cmp);
            let n = distances.len();
            let rank = ((p / 100.0) * n as f64).ceil() as usize;
            distances[rank.clamp(1, n) - 1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two points around a single center; with k=1 the centroid is their
    /// midpoint (1, 0) and the max training distance is exactly 1.
    fn line_pair() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]
    }

    #[test]
    fn test_verify_before_train_fails() {
        let detector = Detector::new(1);
        let result = detector.verify(Point::new(0.0, 0.0));
        assert!(matches!(result, Err(Error::NotTrained)));
    }

    #[test]
    fn test_train_empty_fails() {
        let mut detector = Detector::new(1);
        assert!(matches!(detector.train(&[]), Err(Error::EmptyInput)));
        assert!(!detector.is_trained());
    }

    #[test]
    fn test_train_fewer_points_than_clusters_fails() {
        let mut detector = Detector::new(3);
        let result = detector.train(&line_pair());
        assert!(matches!(
            result,
            Err(Error::InvalidClusterCount {
                requested: 3,
                n_points: 2
            })
        ));
        assert!(!detector.is_trained());
    }

    #[test]
    fn test_invalid_margin_fails() {
        let mut detector = Detector::new(1).with_margin(0.0);
        assert!(matches!(
            detector.train(&line_pair()),
            Err(Error::InvalidParameter { name: "margin", .. })
        ));

        let mut detector = Detector::new(1).with_margin(f64::NAN);
        assert!(detector.train(&line_pair()).is_err());
    }

    #[test]
    fn test_invalid_percentile_fails() {
        let mut detector = Detector::new(1)
            .with_policy(ThresholdPolicy::Percentile(0.0));
        assert!(matches!(
            detector.train(&line_pair()),
            Err(Error::InvalidParameter {
                name: "percentile",
                ..
            })
        ));
    }

    #[test]
    fn test_threshold_boundary_is_normal() {
        // Centroid (1, 0), max distance 1, margin 1.5 => threshold 1.5.
        let mut detector = Detector::new(1).with_margin(1.5);
        detector.train(&line_pair()).unwrap();
        assert_eq!(detector.threshold(), Some(1.5));

        // Exactly at the threshold: normal.
        let at = detector.verify(Point::new(2.5, 0.0)).unwrap();
        assert_eq!(at.distance, 1.5);
        assert!(!at.is_anomaly);

        // Just beyond: anomalous.
        let beyond = detector.verify(Point::new(2.5 + 1e-9, 0.0)).unwrap();
        assert!(beyond.is_anomaly);
    }

    #[test]
    fn test_centroid_coincident_point_is_normal() {
        let mut detector = Detector::new(1);
        detector.train(&line_pair()).unwrap();

        let verdict = detector.verify(Point::new(1.0, 0.0)).unwrap();
        assert_eq!(verdict.distance, 0.0);
        assert!(!verdict.is_anomaly);
    }

    #[test]
    fn test_training_points_verify_normal() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(0.3, 0.1),
            Point::new(10.0, 10.0),
            Point::new(10.2, 9.9),
            Point::new(9.8, 10.1),
        ];

        let mut detector = Detector::new(2);
        detector.train(&points).unwrap();

        for p in &points {
            let verdict = detector.verify(*p).unwrap();
            assert!(!verdict.is_anomaly, "training point {p:?} flagged");
        }
    }

    #[test]
    fn test_verify_is_idempotent() {
        let mut detector = Detector::new(1);
        detector.train(&line_pair()).unwrap();

        let probe = Point::new(3.7, -1.2);
        let first = detector.verify(probe).unwrap();
        let second = detector.verify(probe).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_retrain_overwrites_model() {
        let mut detector = Detector::new(1);
        detector.train(&line_pair()).unwrap();
        let before = detector.threshold().unwrap();

        // Retrain on a much wider spread; the boundary must move.
        detector
            .train(&[Point::new(0.0, 0.0), Point::new(20.0, 0.0)])
            .unwrap();
        let after = detector.threshold().unwrap();
        assert!(after > before);

        // A point normal under the new model but anomalous under the old.
        let verdict = detector.verify(Point::new(5.0, 0.0)).unwrap();
        assert!(!verdict.is_anomaly);
    }

    #[test]
    fn test_percentile_policy_tightens_threshold() {
        // One far outlier among tight points around the centroid.
        let mut points = vec![Point::new(0.0, 0.0); 9];
        points.push(Point::new(100.0, 0.0));

        let max = {
            let mut d = Detector::new(1);
            d.train(&points).unwrap();
            d.threshold().unwrap()
        };
        let p90 = {
            let mut d = Detector::new(1)
                .with_policy(ThresholdPolicy::Percentile(90.0));
            d.train(&points).unwrap();
            d.threshold().unwrap()
        };

        assert!(p90 < max);
    }

    #[test]
    fn test_base_distance_percentile_ranks() {
        let distances = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            base_distance(distances.clone(), ThresholdPolicy::Percentile(100.0)),
            4.0
        );
        assert_eq!(
            base_distance(distances.clone(), ThresholdPolicy::Percentile(50.0)),
            2.0
        );
        assert_eq!(
            base_distance(distances, ThresholdPolicy::Percentile(1.0)),
            1.0
        );
    }

    #[test]
    fn test_custom_clusterer_backend() {
        // Trivial backend: a single fixed centroid at the origin.
        struct FixedOrigin;

        impl Clusterer for FixedOrigin {
            fn fit(&self, _data: &[Point]) -> crate::Result<Vec<Point>> {
                Ok(vec![Point::new(0.0, 0.0)])
            }

            fn n_clusters(&self) -> usize {
                1
            }
        }

        let mut detector = Detector::with_clusterer(FixedOrigin).with_margin(1.0);
        detector.train(&[Point::new(3.0, 4.0)]).unwrap();
        assert_eq!(detector.threshold(), Some(5.0));

        assert!(!detector.verify(Point::new(0.0, 5.0)).unwrap().is_anomaly);
        assert!(detector.verify(Point::new(0.0, 5.1)).unwrap().is_anomaly);
    }
}
