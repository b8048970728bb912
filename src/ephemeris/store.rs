use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use itertools::Itertools;
use log::info;

use crate::{
    constants::SECONDS_PER_WEEK,
    ephemeris::{EphemerisBlock, EphemerisSource},
    error::Error,
    prelude::SV,
    rinex::navigation,
};

/// [EphemerisStore] holds every [EphemerisBlock] of a processing run,
/// sorted per [SV] and Time of Ephemeris.
#[derive(Debug, Clone, Default)]
pub struct EphemerisStore {
    blocks: BTreeMap<SV, Vec<EphemerisBlock>>,
}

impl EphemerisStore {
    /// Builds a new [EphemerisStore]
    pub fn new(blocks: Vec<EphemerisBlock>) -> Self {
        let blocks = blocks
            .into_iter()
            .into_group_map_by(|block| block.sv)
            .into_iter()
            .map(|(sv, blocks)| {
                let sorted = blocks
                    .into_iter()
                    .sorted_by(|a, b| a.toe_gps_seconds().total_cmp(&b.toe_gps_seconds()))
                    .collect::<Vec<_>>();
                (sv, sorted)
            })
            .collect();
        Self { blocks }
    }

    /// Parse [EphemerisStore] from local navigation RINEX file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let fd = File::open(path.as_ref())?;
        let mut reader = BufReader::new(fd);
        let store = Self::from_reader(&mut reader)?;
        info!(
            "{}: {} ephemeris blocks ({} satellites)",
            path.as_ref().display(),
            store.len(),
            store.blocks.len()
        );
        Ok(store)
    }

    /// Parse [EphemerisStore] from [Read]able navigation RINEX content.
    pub fn from_reader<R: Read>(reader: &mut BufReader<R>) -> Result<Self, Error> {
        let blocks = navigation::parse(reader)?;
        Ok(Self::new(blocks))
    }

    /// Total number of [EphemerisBlock]s
    pub fn len(&self) -> usize {
        self.blocks.values().map(|blocks| blocks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Satellites described by this [EphemerisStore]
    pub fn satellites(&self) -> impl Iterator<Item = SV> + '_ {
        self.blocks.keys().copied()
    }

    /// Every [EphemerisBlock] of this [SV]
    pub fn blocks(&self, sv: SV) -> &[EphemerisBlock] {
        self.blocks.get(&sv).map(|v| v.as_slice()).unwrap_or_default()
    }
}

impl EphemerisSource for EphemerisStore {
    fn closest(&self, sv: SV, week: u32, sow: f64) -> Option<&EphemerisBlock> {
        let t = week as f64 * SECONDS_PER_WEEK + sow;
        self.blocks
            .get(&sv)?
            .iter()
            .min_by(|a, b| {
                let dt_a = (t - a.toe_gps_seconds()).abs();
                let dt_b = (t - b.toe_gps_seconds()).abs();
                dt_a.total_cmp(&dt_b)
            })
    }
}
