use std::path::Path;

use crate::{cfg::OrbitKind, ephemeris::EphemerisStore, error::Error, precise::PreciseOrbitTable};

/// [OrbitProvider] is selected once per conversion and describes
/// how satellite positions are obtained.
#[derive(Debug, Clone)]
pub enum OrbitProvider {
    /// Keplerian propagation of broadcast ephemerides (GPS only)
    Broadcast(EphemerisStore),
    /// Interpolation of tabulated precise orbits (GPS, Galileo, Glonass, BeiDou)
    Precise(PreciseOrbitTable),
}

impl From<EphemerisStore> for OrbitProvider {
    fn from(store: EphemerisStore) -> Self {
        Self::Broadcast(store)
    }
}

impl From<PreciseOrbitTable> for OrbitProvider {
    fn from(table: PreciseOrbitTable) -> Self {
        Self::Precise(table)
    }
}

impl OrbitProvider {
    /// Loads orbits of this [OrbitKind] from local file.
    pub fn from_file(path: impl AsRef<Path>, kind: OrbitKind) -> Result<Self, Error> {
        match kind {
            OrbitKind::Broadcast => Ok(Self::Broadcast(EphemerisStore::from_file(path)?)),
            OrbitKind::Precise => Ok(Self::Precise(PreciseOrbitTable::from_file(path)?)),
        }
    }

    pub fn kind(&self) -> OrbitKind {
        match self {
            Self::Broadcast(_) => OrbitKind::Broadcast,
            Self::Precise(_) => OrbitKind::Precise,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Broadcast(store) => store.is_empty(),
            Self::Precise(table) => table.is_empty(),
        }
    }
}
