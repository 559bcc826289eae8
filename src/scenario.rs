//! Synthetic telemetry scenarios for training and demonstration.
//!
//! A [`Scenario`] describes a monitored area: named operational zones and,
//! optionally, a list of predefined anomalous probe points. Generating the
//! scenario samples a Gaussian scatter of "normal" positions around each
//! zone center. The anomalous points pass through untouched; they exist to
//! probe a trained detector and are never part of the training sample.
//!
//! Generation is deterministic for a given seed.

use rand::prelude::*;
use rand_distr::Normal;

use crate::error::{Error, Result};
use crate::point::Point;

/// Default number of normal points sampled per zone.
const DEFAULT_POINTS_PER_ZONE: usize = 100;

/// Default Gaussian standard deviation of the scatter around each center.
const DEFAULT_DISPERSION: f64 = 0.005;

/// Default RNG seed.
const DEFAULT_SEED: u64 = 42;

/// A named operational zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Human-readable zone name (e.g., "baggage yard").
    pub name: String,
    /// Zone center coordinates.
    pub center: Point,
}

impl Zone {
    /// Create a zone from a name and its center.
    pub fn new(name: impl Into<String>, center: Point) -> Self {
        Self {
            name: name.into(),
            center,
        }
    }
}

/// Generated telemetry: the data surface consumed by training, querying,
/// and any external plotting.
#[derive(Debug, Clone)]
pub struct Telemetry {
    /// Normal positions, `points_per_zone` per zone, in zone order.
    pub normal: Vec<Point>,
    /// The scenario's predefined anomalous probe points.
    pub anomalous: Vec<Point>,
}

impl Telemetry {
    /// All points, normal first, then anomalous.
    pub fn all(&self) -> impl Iterator<Item = Point> + '_ {
        self.normal.iter().chain(self.anomalous.iter()).copied()
    }
}

/// A monitoring scenario: zones to scatter normal telemetry around, plus
/// predefined anomalous probe points.
#[derive(Debug, Clone)]
pub struct Scenario {
    zones: Vec<Zone>,
    anomalies: Vec<Point>,
    points_per_zone: usize,
    dispersion: f64,
    seed: u64,
}

impl Scenario {
    /// Create a scenario over the given zones.
    pub fn new(zones: Vec<Zone>) -> Self {
        Self {
            zones,
            anomalies: Vec::new(),
            points_per_zone: DEFAULT_POINTS_PER_ZONE,
            dispersion: DEFAULT_DISPERSION,
            seed: DEFAULT_SEED,
        }
    }

    /// Set the predefined anomalous probe points.
    pub fn with_anomalies(mut self, anomalies: Vec<Point>) -> Self {
        self.anomalies = anomalies;
        self
    }

    /// Set how many normal points are sampled per zone.
    pub fn with_points_per_zone(mut self, points_per_zone: usize) -> Self {
        self.points_per_zone = points_per_zone;
        self
    }

    /// Set the Gaussian standard deviation of the scatter around each
    /// zone center.
    pub fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The configured zones.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Sample the scenario's telemetry.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if the scenario has no zones.
    /// - [`Error::InvalidParameter`] if `points_per_zone` is zero or the
    ///   dispersion is negative or non-finite.
    pub fn generate(&self) -> Result<Telemetry> {
        if self.zones.is_empty() {
            return Err(Error::EmptyInput);
        }

        if self.points_per_zone == 0 {
            return Err(Error::InvalidParameter {
                name: "points_per_zone",
                message: "must be at least 1",
            });
        }

        let scatter =
            Normal::new(0.0, self.dispersion).map_err(|_| Error::InvalidParameter {
                name: "dispersion",
                message: "must be finite and non-negative",
            })?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut normal = Vec::with_capacity(self.zones.len() * self.points_per_zone);
        for zone in &self.zones {
            for _ in 0..self.points_per_zone {
                normal.push(Point::new(
                    zone.center.x + scatter.sample(&mut rng),
                    zone.center.y + scatter.sample(&mut rng),
                ));
            }
        }

        log::debug!(
            "generated {} normal points across {} zones ({} anomalous probes)",
            normal.len(),
            self.zones.len(),
            self.anomalies.len()
        );

        Ok(Telemetry {
            normal,
            anomalous: self.anomalies.clone(),
        })
    }
}
