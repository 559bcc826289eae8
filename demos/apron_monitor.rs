//! Monitoring demo: train on simulated apron telemetry, then verify a few
//! probe positions.
//!
//! Run with `RUST_LOG=info` to see the derived anomaly threshold.

use zoneguard::{Detector, Point, Scenario, Zone};

fn main() {
    env_logger::init();

    // Operational zones of the monitored apron.
    let zones = vec![
        Zone::new("baggage yard", Point::new(-12.91, -38.33)),
        Zone::new("maintenance area", Point::new(-12.90, -38.32)),
    ];
    let n_zones = zones.len();

    // Probe positions well outside both zones.
    let anomalies = vec![
        Point::new(-12.93, -38.34), // near the runway
        Point::new(-12.89, -38.35), // near the terminal
    ];

    let scenario = Scenario::new(zones)
        .with_anomalies(anomalies)
        .with_points_per_zone(100)
        .with_dispersion(0.005)
        .with_seed(42);
    let telemetry = scenario.generate().unwrap();

    let mut detector = Detector::new(n_zones).with_seed(42).with_margin(1.1);
    detector.train(&telemetry.normal).unwrap();

    println!("=== Apron monitor ===");
    println!(
        "trained on {} points, threshold {:.5}",
        telemetry.normal.len(),
        detector.threshold().unwrap()
    );

    let mut probes = vec![Point::new(-12.911, -38.331)];
    probes.extend(telemetry.anomalous.iter().copied());

    for probe in probes {
        let verdict = detector.verify(probe).unwrap();
        let tag = if verdict.is_anomaly { "ANOMALY" } else { "normal" };
        println!(
            "  ({:8.3}, {:8.3}) => {:7} (dist: {:.5})",
            probe.x, probe.y, tag, verdict.distance
        );
    }
}
