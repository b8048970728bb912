//! Signal transit time and Earth rotation during transit
use nalgebra::{Rotation3, Vector3};

use crate::constants::{
    EARTH_ANGULAR_VEL_RAD, LIGHT_TIME_ITERATIONS, LIGHT_TIME_SEED_S, SPEED_OF_LIGHT_M_S,
};

/// Satellite position consistent with the signal transit time
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LightTimeSolution {
    /// ECEF position at transmission time (m), expressed
    /// in the Earth frame at reception time
    pub position: Vector3<f64>,
    /// Transit time (s)
    pub transit_s: f64,
}

/// Rotates an ECEF position by the rotation of the Earth
/// during `transit_s`.
pub fn earth_rotation(position: &Vector3<f64>, transit_s: f64) -> Vector3<f64> {
    let theta = -EARTH_ANGULAR_VEL_RAD * transit_s;
    Rotation3::from_axis_angle(&Vector3::z_axis(), theta) * position
}

/// Resolves the satellite position at transmission time, for a signal
/// received at `t` (seconds) by a receiver at `receiver` (ECEF, m).
/// `orbit` evaluates the satellite ECEF position (m) at any instant (seconds).
///
/// The transit time is seeded with 70 ms then refined exactly twice.
pub fn light_time_correction<F>(orbit: F, t: f64, receiver: &Vector3<f64>) -> LightTimeSolution
where
    F: Fn(f64) -> Vector3<f64>,
{
    let mut position = orbit(t - LIGHT_TIME_SEED_S);
    let mut transit_s = (position - receiver).norm() / SPEED_OF_LIGHT_M_S;

    for _ in 0..LIGHT_TIME_ITERATIONS {
        position = earth_rotation(&orbit(t - transit_s), transit_s);
        transit_s = (position - receiver).norm() / SPEED_OF_LIGHT_M_S;
    }

    LightTimeSolution {
        position,
        transit_s,
    }
}
