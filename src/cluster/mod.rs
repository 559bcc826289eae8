//! Clustering engine behind the anomaly detector.
//!
//! This module learns the geometry of "normal" telemetry: given a set of
//! 2-D points, it produces one centroid per operational zone.
//!
//! ## K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat until assignments
//! stabilize or an iteration cap is reached.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! For zone monitoring these hold by construction: each operational zone is
//! a roughly isotropic scatter around a known center, and k is the number
//! of zones.
//!
//! ## Swapping the algorithm
//!
//! The detector consumes clustering through the [`Clusterer`] trait, which
//! exposes fitted centroids and a nearest-centroid distance. Any
//! centroid-producing algorithm can stand in for [`Kmeans`].
//!
//! ## Usage
//!
//! ```rust
//! use zoneguard::cluster::{Clusterer, Kmeans};
//! use zoneguard::Point;
//!
//! let data = vec![
//!     Point::new(0.0, 0.0),
//!     Point::new(0.1, 0.1),
//!     Point::new(10.0, 10.0),
//!     Point::new(10.1, 10.1),
//! ];
//!
//! let centroids = Kmeans::new(2).with_seed(42).fit(&data).unwrap();
//! assert_eq!(centroids.len(), 2);
//! ```

mod kmeans;
mod traits;

pub use kmeans::{Kmeans, KmeansFit};
pub use traits::Clusterer;
