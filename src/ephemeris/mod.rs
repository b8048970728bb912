use crate::prelude::{Epoch, SV};

pub(crate) mod private;
mod store;

pub use store::EphemerisStore;

/// One broadcast navigation message, for one satellite.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct EphemerisBlock {
    /// [SV]
    pub sv: SV,

    /// GPS week of this message
    pub week: u32,

    /// Time of Clock
    pub toc: Epoch,

    /// Clock bias (s), drift (s.s⁻¹) and drift rate (s.s⁻²)
    pub clock_polynomials: (f64, f64, f64),

    /// Issue of Data (ephemeris)
    pub iode: f64,

    /// Time of Ephemeris (seconds of week)
    pub toe_s: f64,

    /// Square root of the semi-major axis (m^1/2)
    pub sqrt_a: f64,

    /// Eccentricity
    pub eccentricity: f64,

    /// Mean anomaly at reference time (in radians)
    pub m0_rad: f64,

    /// Mean motion correction (in radians/s)
    pub dn_rad: f64,

    /// Inclination at reference time (in radians)
    pub i0_rad: f64,

    /// (in radians/s)
    pub idot_rad_s: f64,

    /// Right ascension of ascending node (in radians)
    pub omega0_rad: f64,

    /// Argument of perigee (in radians)
    pub omega_rad: f64,

    /// Rate of right ascension (in radians/s)
    pub omega_dot_rad_s: f64,

    /// Sine / Cosine (in radians)
    pub cus_cuc_rad: (f64, f64),

    /// Sine / Cosine (in radians)
    pub cis_cic_rad: (f64, f64),

    /// Sine / Cosine (in meters)
    pub crs_crc_m: (f64, f64),

    /// SV accuracy (m)
    pub accuracy_m: f64,

    /// SV health flag
    pub health: f64,

    /// Total group delay (s)
    pub tgd_s: f64,

    /// Issue of Data (clock)
    pub iodc: f64,
}

impl EphemerisBlock {
    /// Time of Ephemeris as seconds elapsed since the origin of GPS time.
    pub fn toe_gps_seconds(&self) -> f64 {
        self.week as f64 * crate::constants::SECONDS_PER_WEEK + self.toe_s
    }
}

/// [EphemerisSource] provides [EphemerisBlock]s to the broadcast orbit model.
pub trait EphemerisSource {
    /// Returns the [EphemerisBlock] of this [SV] whose Time of Ephemeris is
    /// the closest to the instant (GPS week, seconds of week).
    /// None when this [SV] is unknown.
    fn closest(&self, sv: SV, week: u32, sow: f64) -> Option<&EphemerisBlock>;
}
