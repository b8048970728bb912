//! GPS navigation RINEX (V2 and V3), reduced to [EphemerisBlock]s
use std::{
    collections::HashMap,
    io::{BufReader, Read},
};

use log::debug;

use rinex::{
    navigation::OrbitItem,
    prelude::{Rinex, RinexType},
};

use crate::{
    ephemeris::EphemerisBlock,
    error::{Error, ParsingError},
    prelude::{Constellation, SV},
    rinex::gpst,
};

type Orbits = HashMap<String, OrbitItem>;

/// Broadcast orbit parameter, blank or absent parameters being null.
fn orbit_f64(orbits: &Orbits, key: &str) -> f64 {
    orbits
        .get(key)
        .and_then(|item| item.as_f64().or_else(|| item.as_u32().map(f64::from)))
        .unwrap_or(0.0)
}

/// Keplerian parameter that must be described by the message
fn required_f64(sv: SV, orbits: &Orbits, key: &str) -> Result<f64, ParsingError> {
    orbits
        .get(key)
        .and_then(|item| item.as_f64())
        .ok_or(ParsingError::EphemerisField(sv.to_string(), key.to_string()))
}

/// Reduces a navigation [Rinex] to its GPS [EphemerisBlock]s.
/// Other constellations of mixed files are ignored.
pub fn from_rinex(rinex: &Rinex) -> Result<Vec<EphemerisBlock>, Error> {
    if rinex.header.rinex_type != RinexType::NavigationData {
        return Err(Error::Parsing(ParsingError::NotNavigation(format!(
            "{:?}",
            rinex.header.rinex_type
        ))));
    }

    let mut blocks = Vec::new();

    for (key, ephemeris) in rinex.nav_ephemeris_frames_iter() {
        if key.sv.constellation != Constellation::GPS {
            continue;
        }

        let sv = key.sv;
        let orbits = &ephemeris.orbits;

        let block = EphemerisBlock {
            sv,
            week: orbit_f64(orbits, "week") as u32,
            toc: gpst(key.epoch),
            clock_polynomials: (
                ephemeris.clock_bias,
                ephemeris.clock_drift,
                ephemeris.clock_drift_rate,
            ),
            iode: orbit_f64(orbits, "iode"),
            toe_s: required_f64(sv, orbits, "toe")?,
            sqrt_a: required_f64(sv, orbits, "sqrta")?,
            eccentricity: required_f64(sv, orbits, "e")?,
            m0_rad: orbit_f64(orbits, "m0"),
            dn_rad: orbit_f64(orbits, "deltaN"),
            i0_rad: orbit_f64(orbits, "i0"),
            idot_rad_s: orbit_f64(orbits, "idot"),
            omega0_rad: orbit_f64(orbits, "omega0"),
            omega_rad: orbit_f64(orbits, "omega"),
            omega_dot_rad_s: orbit_f64(orbits, "omegaDot"),
            cus_cuc_rad: (orbit_f64(orbits, "cus"), orbit_f64(orbits, "cuc")),
            cis_cic_rad: (orbit_f64(orbits, "cis"), orbit_f64(orbits, "cic")),
            crs_crc_m: (orbit_f64(orbits, "crs"), orbit_f64(orbits, "crc")),
            accuracy_m: orbit_f64(orbits, "svAccuracy"),
            health: orbit_f64(orbits, "health"),
            tgd_s: orbit_f64(orbits, "tgd"),
            iodc: orbit_f64(orbits, "iodc"),
        };

        debug!("{} - toc={} toe={}s", block.sv, block.toc, block.toe_s);
        blocks.push(block);
    }

    Ok(blocks)
}

/// Parses every GPS [EphemerisBlock] of [Read]able navigation RINEX content.
pub fn parse<R: Read>(reader: &mut BufReader<R>) -> Result<Vec<EphemerisBlock>, Error> {
    let rinex = Rinex::parse(reader)?;
    from_rinex(&rinex)
}
