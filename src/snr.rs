//! SNR records
use crate::{
    prelude::SV,
    rinex::observation::{SnrBand, SnrValues},
};

/// Column layout of an SNR record. Downstream tools expect
/// nine columns from broadcast orbits and eleven from precise orbits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordLayout {
    /// id, elevation, azimuth, seconds of day, 0, 0, S1, S2, S5
    Broadcast,
    /// id, elevation, azimuth, seconds of day, 0, S6, S1, S2, S5, S7, S8
    Precise,
}

/// One output record: one satellite at one epoch
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SnrRecord {
    pub sv: SV,
    /// PRN + constellation addon
    pub id: u16,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    /// Seconds of day
    pub seconds: f64,
    pub values: SnrValues,
    pub layout: RecordLayout,
}

impl SnrRecord {
    pub fn snr(&self, band: SnrBand) -> f64 {
        self.values.get(band)
    }
}

impl std::fmt::Display for SnrRecord {
    /// Formats the record, with its trailing space, without line termination.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:3.0} {:10.4} {:10.4} {:10.0} {:7.2} ",
            self.id as f64, self.elevation_deg, self.azimuth_deg, self.seconds, 0.0,
        )?;
        match self.layout {
            RecordLayout::Broadcast => write!(
                f,
                "{:7.2} {:7.2} {:7.2} {:7.2} ",
                0.0,
                self.snr(SnrBand::S1),
                self.snr(SnrBand::S2),
                self.snr(SnrBand::S5),
            ),
            RecordLayout::Precise => write!(
                f,
                "{:7.2} {:7.2} {:7.2} {:7.2} {:7.2} {:7.2} ",
                self.snr(SnrBand::S6),
                self.snr(SnrBand::S1),
                self.snr(SnrBand::S2),
                self.snr(SnrBand::S5),
                self.snr(SnrBand::S7),
                self.snr(SnrBand::S8),
            ),
        }
    }
}
