#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

// private modules
mod batch;
mod cfg;
mod constants;
mod demux;
mod ephemeris;
mod error;
mod geometry;
mod lighttime;
mod orbit;
mod position;
mod precise;
mod snr;
mod sv;
mod translator;

// public modules
pub mod rinex;
pub mod time;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::batch::{convert_file, snr_file_name, Batch, Job, SnrFile};
    pub use crate::cfg::{Config, OrbitKind, SnrType};
    pub use crate::demux::{primary_masked, series, zero_filled, FilterPolicy};
    pub use crate::ephemeris::{EphemerisBlock, EphemerisSource, EphemerisStore};
    pub use crate::error::{Error, ParsingError};
    pub use crate::geometry::{azimuth_deg, elevation_azimuth, elevation_deg};
    pub use crate::lighttime::{earth_rotation, light_time_correction, LightTimeSolution};
    pub use crate::orbit::OrbitProvider;
    pub use crate::position::ReceiverFrame;
    pub use crate::precise::{
        PreciseOrbitRow, PreciseOrbitTable, QuadraticSpline, SatelliteInterpolant,
    };
    pub use crate::rinex::observation::{
        ObservationData, ObservationEpoch, ObservationHeader, SnrBand, SnrObservations,
        SnrValues,
    };
    pub use crate::snr::{RecordLayout, SnrRecord};
    pub use crate::sv::{addon, from_numeric_id, numeric_id, PRECISE_CONSTELLATIONS};
    pub use crate::time::day_plan;
    pub use crate::translator::{Summary, Translator};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::Vector3;
}

// pub export
pub use error::{Error, ParsingError};
