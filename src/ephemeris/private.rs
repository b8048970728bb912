use log::trace;
use nalgebra::{Rotation3, Vector3};

use crate::{
    constants::{
        EARTH_ANGULAR_VEL_RAD, EARTH_GRAVITATION_MU_M3_S2, HALF_WEEK_SECONDS,
        KEPLER_MIN_ITERATIONS, KEPLER_TOLERANCE_RAD, SECONDS_PER_WEEK,
    },
    ephemeris::EphemerisBlock,
};

/// Wraps a time difference (s) into [-half week, +half week[.
pub(crate) fn wrap_half_week(dt: f64) -> f64 {
    (dt - HALF_WEEK_SECONDS).rem_euclid(2.0 * HALF_WEEK_SECONDS) - HALF_WEEK_SECONDS
}

/// Solves Kepler's equation `E = M + e sin(E)` by fixed point iteration.
/// Iterates at least 3 times, then until two successive estimates
/// differ by less than 1E-12 rad. There is no iteration cap.
/// Returns the eccentric anomaly and the number of iterations.
pub(crate) fn solve_kepler(m_k: f64, e: f64) -> (f64, usize) {
    let mut i = 0;
    let mut e_k = m_k;
    let mut e_0 = m_k + e * m_k.sin();

    while i < KEPLER_MIN_ITERATIONS || (e_k - e_0).abs() > KEPLER_TOLERANCE_RAD {
        i += 1;
        e_k = m_k + e * e_0.sin();
        e_0 = m_k + e * e_k.sin();
    }

    (e_k, i)
}

impl EphemerisBlock {
    /// Semi-major axis (m)
    pub fn semi_major_axis_m(&self) -> f64 {
        self.sqrt_a.powi(2)
    }

    /// Time from ephemeris reference (s) at this instant,
    /// wrapped into half a week.
    pub fn time_from_ephemeris(&self, week: u32, sow: f64) -> f64 {
        let t = week as f64 * SECONDS_PER_WEEK + sow;
        wrap_half_week(t - self.toe_s)
    }

    /// Resolves Kepler equations from [EphemerisBlock] and returns
    /// the ECEF position (m) of the satellite at (GPS week, seconds of week).
    pub fn position(&self, week: u32, sow: f64) -> Vector3<f64> {
        let e = self.eccentricity;
        let a = self.semi_major_axis_m();

        let (cus, cuc) = self.cus_cuc_rad;
        let (cis, cic) = self.cis_cic_rad;
        let (crs, crc) = self.crs_crc_m;
        let (i0, idot) = (self.i0_rad, self.idot_rad_s);
        let (omega0, omega, omega_dot) = (self.omega0_rad, self.omega_rad, self.omega_dot_rad_s);

        let t_k = self.time_from_ephemeris(week, sow);

        let n0 = (EARTH_GRAVITATION_MU_M3_S2 / a.powi(3)).sqrt();
        let n = n0 + self.dn_rad;
        let m_k = self.m0_rad + n * t_k;

        let (e_k, _) = solve_kepler(m_k, e);

        let (sin_e_k, cos_e_k) = e_k.sin_cos();
        let v_k = ((1.0 - e.powi(2)).sqrt() * sin_e_k).atan2(cos_e_k - e);

        let phi = v_k + omega;
        let (sin_2phi, cos_2phi) = (2.0 * phi).sin_cos();

        let du_k = cus * sin_2phi + cuc * cos_2phi;
        let dr_k = crs * sin_2phi + crc * cos_2phi;
        let di_k = cis * sin_2phi + cic * cos_2phi;

        let u_k = phi + du_k;
        let r_k = a * (1.0 - e * cos_e_k) + dr_k;
        let i_k = i0 + di_k + idot * t_k;

        let omega_k = omega0 + (omega_dot - EARTH_ANGULAR_VEL_RAD) * t_k
            - EARTH_ANGULAR_VEL_RAD * self.toe_s;

        // orbital plane
        let (x, y, z) = (r_k * u_k.cos(), r_k * u_k.sin(), 0.0);

        // MEO orbit to ECEF rotation matrix
        let rot_x3 = Rotation3::from_axis_angle(&Vector3::x_axis(), i_k);
        let rot_z3 = Rotation3::from_axis_angle(&Vector3::z_axis(), omega_k);
        let rot3 = rot_z3 * rot_x3;

        let ecef = rot3 * Vector3::new(x, y, z);

        trace!(
            "{} kepler solving x={:.3}m y={:.3}m z={:.3}m t_k={}",
            self.sv,
            ecef[0],
            ecef[1],
            ecef[2],
            t_k
        );

        ecef
    }
}
