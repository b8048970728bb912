//! Precise (tabulated) orbits
use std::path::Path;

use itertools::Itertools;
use log::info;

use crate::{
    constants::SECONDS_PER_WEEK,
    error::Error,
    prelude::{Vector3, SV},
    sv::{from_numeric_id, numeric_id},
};

mod sp3;
mod spline;

pub use spline::QuadraticSpline;

/// One tabulated satellite position
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PreciseOrbitRow {
    /// PRN + constellation addon
    pub id: u16,
    /// GPS week
    pub week: u32,
    /// Seconds of week
    pub sow: f64,
    /// ECEF coordinates (m)
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl PreciseOrbitRow {
    pub fn sv(&self) -> Option<SV> {
        from_numeric_id(self.id)
    }

    fn gps_seconds(&self) -> f64 {
        self.week as f64 * SECONDS_PER_WEEK + self.sow
    }
}

/// Tabulated orbits of a processing day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreciseOrbitTable {
    rows: Vec<PreciseOrbitRow>,
}

/// Quadratic interpolants of one satellite trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteInterpolant {
    /// time origin (GPS seconds)
    t0: f64,
    x: QuadraticSpline,
    y: QuadraticSpline,
    z: QuadraticSpline,
}

impl SatelliteInterpolant {
    /// Interpolated ECEF position (m) at (GPS week, seconds of week).
    /// Extrapolates outside of the tabulated period.
    pub fn position(&self, week: u32, sow: f64) -> Vector3<f64> {
        self.position_at(week as f64 * SECONDS_PER_WEEK + sow)
    }

    /// Interpolated ECEF position (m) at this instant (GPS seconds).
    pub fn position_at(&self, t: f64) -> Vector3<f64> {
        let dt = t - self.t0;
        Vector3::new(self.x.eval(dt), self.y.eval(dt), self.z.eval(dt))
    }
}

impl PreciseOrbitTable {
    pub fn new(rows: Vec<PreciseOrbitRow>) -> Self {
        Self { rows }
    }

    /// Parse [PreciseOrbitTable] from local SP3 file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let table = Self::new(sp3::from_file(path.as_ref())?);
        info!(
            "{}: {} precise positions ({} satellites)",
            path.as_ref().display(),
            table.rows.len(),
            table.satellites().len(),
        );
        Ok(table)
    }

    pub fn rows(&self) -> &[PreciseOrbitRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tabulated [SV]s, sorted.
    pub fn satellites(&self) -> Vec<SV> {
        self.rows
            .iter()
            .filter_map(|row| row.sv())
            .unique()
            .sorted()
            .collect()
    }

    /// Rows of this [SV], in chronological order. Repeated instants are dropped.
    pub fn satellite_rows(&self, sv: SV) -> Vec<&PreciseOrbitRow> {
        let Some(id) = numeric_id(sv) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|row| row.id == id)
            .sorted_by(|a, b| a.gps_seconds().total_cmp(&b.gps_seconds()))
            .dedup_by(|a, b| a.gps_seconds() == b.gps_seconds())
            .collect()
    }

    /// Returns true when at least one position of this [SV] is tabulated.
    pub fn is_tabulated(&self, sv: SV) -> bool {
        numeric_id(sv).is_some_and(|id| self.rows.iter().any(|row| row.id == id))
    }

    /// Builds the interpolants of this [SV].
    /// None when it is not tabulated, or with less than three positions.
    pub fn interpolant(&self, sv: SV) -> Option<SatelliteInterpolant> {
        let rows = self.satellite_rows(sv);
        let t0 = rows.first()?.gps_seconds();

        let t = rows.iter().map(|row| row.gps_seconds() - t0).collect::<Vec<_>>();
        let x = rows.iter().map(|row| row.x_m).collect::<Vec<_>>();
        let y = rows.iter().map(|row| row.y_m).collect::<Vec<_>>();
        let z = rows.iter().map(|row| row.z_m).collect::<Vec<_>>();

        let mut splines = QuadraticSpline::new_multiple(&t, &[&x, &y, &z])?;
        let z = splines.pop()?;
        let y = splines.pop()?;
        let x = splines.pop()?;

        Some(SatelliteInterpolant { t0, x, y, z })
    }
}
