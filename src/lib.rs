//! Spatial telemetry anomaly detection.
//!
//! `zoneguard` learns the geometry of "normal" 2-D telemetry (e.g., asset
//! positions on an airport apron) and flags points that stray from it.
//!
//! The pipeline has two parts, consumed in order:
//! - [`cluster`]: a k-means clustering engine that condenses a sample of
//!   normal positions into one centroid per operational zone, behind the
//!   swappable [`Clusterer`] trait.
//! - [`detect`]: an anomaly [`Detector`] that derives a distance threshold
//!   from the training sample and classifies query points against it.
//!
//! [`scenario`] supplies synthetic telemetry (Gaussian scatter around named
//! zones) for training runs and demos.
//!
//! ## Usage
//!
//! ```rust
//! use zoneguard::{Detector, Point, Scenario, Zone};
//!
//! let scenario = Scenario::new(vec![
//!     Zone::new("west stand", Point::new(0.0, 0.0)),
//!     Zone::new("east stand", Point::new(10.0, 10.0)),
//! ])
//! .with_dispersion(0.01)
//! .with_seed(42);
//!
//! let telemetry = scenario.generate().unwrap();
//!
//! let mut detector = Detector::new(2).with_seed(42);
//! detector.train(&telemetry.normal).unwrap();
//!
//! // In-zone telemetry is normal; a point between the zones is not.
//! assert!(!detector.verify(Point::new(0.0, 0.0)).unwrap().is_anomaly);
//! assert!(detector.verify(Point::new(5.0, 5.0)).unwrap().is_anomaly);
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod detect;
pub mod error;
pub mod point;
pub mod scenario;

pub use cluster::{Clusterer, Kmeans, KmeansFit};
pub use detect::{Classification, Detector, ThresholdPolicy};
pub use error::{Error, Result};
pub use point::Point;
pub use scenario::{Scenario, Telemetry, Zone};
