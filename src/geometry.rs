//! Satellite direction in the receiver local frame.
//!
//! The line of sight is never checked: a null (or NaN) vector
//! propagates as NaN angles.
use crate::{position::ReceiverFrame, prelude::Vector3};

/// Elevation (degrees) of this line of sight (satellite - receiver, ECEF).
pub fn elevation_deg(los: &Vector3<f64>, frame: &ReceiverFrame) -> f64 {
    // rounding may exceed unity at zenith
    (frame.up.dot(los) / los.norm())
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees()
}

/// Azimuth (degrees, clockwise from north) of this line of sight, in [0, 360).
pub fn azimuth_deg(los: &Vector3<f64>, frame: &ReceiverFrame) -> f64 {
    let east = frame.east.dot(los);
    let north = frame.north.dot(los);
    let azimuth = east.atan2(north).to_degrees();
    if azimuth < 0.0 {
        azimuth + 360.0
    } else {
        azimuth
    }
}

/// Returns (elevation, azimuth) in degrees of the satellite
/// located at `sat_ecef` (meters), as seen from this [ReceiverFrame].
pub fn elevation_azimuth(sat_ecef: &Vector3<f64>, frame: &ReceiverFrame) -> (f64, f64) {
    let los = sat_ecef - frame.ecef;
    (elevation_deg(&los, frame), azimuth_deg(&los, frame))
}
