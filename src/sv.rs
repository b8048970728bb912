//! Numeric satellite identification across constellations
use crate::prelude::{Constellation, SV};

/// Constellations supported by the precise orbit mode, in processing order.
pub const PRECISE_CONSTELLATIONS: [Constellation; 4] = [
    Constellation::GPS,
    Constellation::Galileo,
    Constellation::Glonass,
    Constellation::BeiDou,
];

/// Returns the numeric offset that makes [SV] identifiers unique
/// in a multi constellation context.
pub fn addon(constellation: Constellation) -> Option<u16> {
    match constellation {
        Constellation::GPS => Some(0),
        Constellation::Glonass => Some(100),
        Constellation::Galileo => Some(200),
        Constellation::BeiDou => Some(300),
        _ => None,
    }
}

/// Returns the numeric identifier of this [SV]: PRN + constellation addon.
pub fn numeric_id(sv: SV) -> Option<u16> {
    addon(sv.constellation).map(|addon| addon + sv.prn as u16)
}

/// Recovers the [SV] from its numeric identifier.
pub fn from_numeric_id(id: u16) -> Option<SV> {
    let (constellation, addon) = match id / 100 {
        0 => (Constellation::GPS, 0),
        1 => (Constellation::Glonass, 100),
        2 => (Constellation::Galileo, 200),
        3 => (Constellation::BeiDou, 300),
        _ => return None,
    };
    let prn = id - addon;
    if prn == 0 {
        None
    } else {
        Some(SV::new(constellation, prn as u8))
    }
}
