//! Receiver position and local frame
use log::debug;
use map_3d::{ecef2geodetic, Ellipsoid};

use crate::{constants::EARTH_CENTER_GUARD_M, error::Error, prelude::Vector3};

/// [ReceiverFrame] is the receiver ECEF position and its local
/// (up, east, north) unit vectors. It is defined once per observation file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverFrame {
    /// ECEF coordinates in meters
    pub(crate) ecef: Vector3<f64>,
    /// Geodetic coordinates in radians
    pub(crate) geodetic: Vector3<f64>,
    pub(crate) up: Vector3<f64>,
    pub(crate) east: Vector3<f64>,
    pub(crate) north: Vector3<f64>,
}

impl ReceiverFrame {
    /// Builds new [ReceiverFrame] from ECEF coordinates expressed in meter.
    /// Fails on coordinates located at the center of the Earth.
    pub fn from_ecef(ecef: Vector3<f64>) -> Result<Self, Error> {
        if ecef.abs().sum() < EARTH_CENTER_GUARD_M {
            return Err(Error::ReceiverAtEarthCenter);
        }

        let (x, y, z) = (ecef[0], ecef[1], ecef[2]);
        let (lat, lon, h) = ecef2geodetic(x, y, z, Ellipsoid::WGS84);

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();

        let up = Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);
        let east = Vector3::new(-sin_lon, cos_lon, 0.0);
        let north = Vector3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);

        debug!(
            "receiver lat={:.6}°, lon={:.6}°, h={:.3}m",
            lat.to_degrees(),
            lon.to_degrees(),
            h
        );

        Ok(Self {
            ecef,
            geodetic: Vector3::new(lat, lon, h),
            up,
            east,
            north,
        })
    }
    /// Returns ECEF coordinates.
    pub fn ecef(&self) -> Vector3<f64> {
        self.ecef
    }
    /// Returns Geodetic coordinates
    /// - latitude [rad]
    /// - longitude [rad]
    /// - altitude above the ellipsoid [m]
    pub fn geodetic(&self) -> Vector3<f64> {
        self.geodetic
    }
    pub fn up(&self) -> Vector3<f64> {
        self.up
    }
    pub fn east(&self) -> Vector3<f64> {
        self.east
    }
    pub fn north(&self) -> Vector3<f64> {
        self.north
    }
}
