//! Physical and conventional constants.
//! Orbit model constants are the GPS ICD values and are not configurable.

/// Earth angular velocity, in WGS84 frame rad/s
pub const EARTH_ANGULAR_VEL_RAD: f64 = 7.2921151467E-5;

/// Earth gravitational constant (m^3 s-2)
pub const EARTH_GRAVITATION_MU_M3_S2: f64 = 3.986005E14;

/// Speed of light in m.s⁻¹
pub const SPEED_OF_LIGHT_M_S: f64 = 299792458.0;

/// Duration of one GPS week, in seconds
pub const SECONDS_PER_WEEK: f64 = 604800.0;

/// Half a GPS week, in seconds
pub const HALF_WEEK_SECONDS: f64 = 302400.0;

/// Duration of one day, in seconds
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Kepler solver convergence criteria (radians)
pub const KEPLER_TOLERANCE_RAD: f64 = 1.0E-12;

/// Minimal number of Kepler iterations
pub const KEPLER_MIN_ITERATIONS: usize = 3;

/// Transit time initial guess (s)
pub const LIGHT_TIME_SEED_S: f64 = 0.07;

/// Number of light time refinements
pub const LIGHT_TIME_ITERATIONS: usize = 2;

/// Receiver coordinates whose absolute sum is below this value (m)
/// are considered to be the center of the Earth.
pub const EARTH_CENTER_GUARD_M: f64 = 5.0;
