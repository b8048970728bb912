//! Observation RINEX (V2 and V3), reduced to SNR observables
use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use itertools::Itertools;
use log::{debug, info, warn};

use rinex::prelude::{obs::EpochFlag, Rinex, RinexType};

use crate::{
    error::{Error, ParsingError},
    prelude::{Constellation, Epoch, TimeScale, Vector3, SV},
    rinex::gpst,
    time::{gps_week_seconds, seconds_of_day},
};

/// SNR frequency bands
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnrBand {
    S1,
    S2,
    S5,
    S6,
    S7,
    S8,
}

impl SnrBand {
    pub const ALL: [SnrBand; 6] = [
        SnrBand::S1,
        SnrBand::S2,
        SnrBand::S5,
        SnrBand::S6,
        SnrBand::S7,
        SnrBand::S8,
    ];

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::S1 => 0,
            Self::S2 => 1,
            Self::S5 => 2,
            Self::S6 => 3,
            Self::S7 => 4,
            Self::S8 => 5,
        }
    }

    /// Band of an SNR observable code ("S1", "S1C", "S7Q"..)
    pub fn from_observable(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        if chars.next() != Some('S') {
            return None;
        }
        match chars.next()? {
            '1' => Some(Self::S1),
            '2' => Some(Self::S2),
            '5' => Some(Self::S5),
            '6' => Some(Self::S6),
            '7' => Some(Self::S7),
            '8' => Some(Self::S8),
            _ => None,
        }
    }
}

impl std::fmt::Display for SnrBand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "S{}", ['1', '2', '5', '6', '7', '8'][self.index()])
    }
}

/// Sparse SNR measurements (dB-Hz) of one satellite at one epoch.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SnrObservations([Option<f64>; 6]);

impl SnrObservations {
    /// Measurement of this band, None when absent.
    pub fn get(&self, band: SnrBand) -> Option<f64> {
        self.0[band.index()]
    }

    pub fn set(&mut self, band: SnrBand, value: f64) {
        self.0[band.index()] = Some(value);
    }

    /// Copies `self` with one more measurement.
    pub fn with(&self, band: SnrBand, value: f64) -> Self {
        let mut s = *self;
        s.set(band, value);
        s
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|value| value.is_none())
    }
}

/// Dense SNR values where 0 means "no data"
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct SnrValues(pub [f64; 6]);

impl SnrValues {
    pub fn get(&self, band: SnrBand) -> f64 {
        self.0[band.index()]
    }
}

/// Observation RINEX header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationHeader {
    /// (major, minor) revision
    pub version: (u8, u8),
    /// Observable codes, per constellation, in header order
    pub observables: HashMap<Constellation, Vec<String>>,
    /// Sampling interval (s) when specified
    pub interval: Option<f64>,
    /// "APPROX POSITION XYZ": receiver ECEF coordinates (m)
    pub receiver_position: Option<Vector3<f64>>,
}

impl ObservationHeader {
    /// Observable codes of this [Constellation]
    pub fn observables(&self, constellation: Constellation) -> &[String] {
        self.observables
            .get(&constellation)
            .map(|codes| codes.as_slice())
            .unwrap_or_default()
    }

    /// Maps the SNR observables of this [Constellation] to their [SnrBand].
    /// When several codes share a band, only the first one is retained.
    pub(crate) fn snr_codes(&self, constellation: Constellation) -> HashMap<String, SnrBand> {
        let mut taken = [false; 6];
        self.observables(constellation)
            .iter()
            .filter_map(|code| {
                let band = SnrBand::from_observable(code)?;
                if taken[band.index()] {
                    None
                } else {
                    taken[band.index()] = true;
                    Some((code.clone(), band))
                }
            })
            .collect()
    }

    /// Returns true when these SNR bands are observed, for at least one constellation.
    pub fn observes(&self, band: SnrBand) -> bool {
        self.observables
            .values()
            .flatten()
            .any(|code| SnrBand::from_observable(code) == Some(band))
    }

    /// Receiver ECEF coordinates (m) from the header.
    pub fn receiver_position(&self) -> Result<Vector3<f64>, Error> {
        self.receiver_position
            .ok_or(Error::MissingReceiverCoordinates)
    }

    fn from_rinex(rinex: &Rinex) -> Self {
        let header = &rinex.header;

        let observables = header
            .obs
            .iter()
            .flat_map(|obs| obs.codes.iter())
            .map(|(constellation, codes)| {
                let codes = codes.iter().map(|code| code.to_string()).collect();
                (*constellation, codes)
            })
            .collect();

        Self {
            version: (header.version.major, header.version.minor),
            observables,
            interval: header.sampling_interval.map(|dt| dt.to_seconds()),
            receiver_position: header.rx_position.map(|(x, y, z)| Vector3::new(x, y, z)),
        }
    }
}

/// One observation epoch, reduced to SNR measurements
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationEpoch {
    /// Sampling instant (GPST)
    pub epoch: Epoch,
    /// Calendar date (GPST)
    pub date: (i32, u8, u8),
    /// Time of day (hours, minutes, seconds)
    pub time: (u8, u8, f64),
    /// Epoch flag (0: ok, 1: power failure)
    pub flag: u8,
    /// Measurements per [SV]
    pub snr: BTreeMap<SV, SnrObservations>,
}

impl ObservationEpoch {
    /// Builds an empty epoch, sampled at this GPST instant
    pub fn new(epoch: Epoch, flag: u8) -> Self {
        let (y, m, d, hh, mm, ss, nanos) = epoch.to_gregorian(TimeScale::GPST);
        Self {
            epoch,
            date: (y, m, d),
            time: (hh, mm, ss as f64 + nanos as f64 * 1.0E-9),
            flag,
            snr: BTreeMap::new(),
        }
    }

    /// Seconds of day, whole seconds only
    pub fn seconds_of_day(&self) -> f64 {
        let (h, m, s) = self.time;
        seconds_of_day(h, m, s)
    }

    /// (GPS week, seconds of week)
    pub fn gps_week_seconds(&self) -> (u32, f64) {
        gps_week_seconds(self.epoch)
    }

    /// SNR measurements of this [SV], None when not observed.
    pub fn observations(&self, sv: SV) -> Option<&SnrObservations> {
        self.snr.get(&sv)
    }
}

/// Parsed observation RINEX
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationData {
    pub header: ObservationHeader,
    /// Epochs, in chronological order
    pub epochs: Vec<ObservationEpoch>,
}

/// Flags of the epochs that carry observations. Events (2 to 5) and
/// cycle slip records (6) are not retained.
fn retained_flag(flag: EpochFlag) -> Option<u8> {
    match flag {
        EpochFlag::Ok => Some(0),
        EpochFlag::PowerFailure => Some(1),
        _ => None,
    }
}

impl ObservationData {
    pub fn new(header: ObservationHeader, epochs: Vec<ObservationEpoch>) -> Self {
        Self { header, epochs }
    }

    /// Parse [ObservationData] from local observation RINEX file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let fd = File::open(path.as_ref())?;
        let mut reader = BufReader::new(fd);
        let data = Self::from_reader(&mut reader)?;
        info!(
            "{}: RINEX V{}.{:02} - {} epochs",
            path.as_ref().display(),
            data.header.version.0,
            data.header.version.1,
            data.epochs.len()
        );
        Ok(data)
    }

    /// Parse [ObservationData] from [Read]able observation RINEX content.
    pub fn from_reader<R: Read>(reader: &mut BufReader<R>) -> Result<Self, Error> {
        let rinex = Rinex::parse(reader)?;
        Self::from_rinex(&rinex)
    }

    /// Reduces an observation [Rinex] to its SNR observations.
    pub fn from_rinex(rinex: &Rinex) -> Result<Self, Error> {
        if rinex.header.rinex_type != RinexType::ObservationData {
            return Err(Error::Parsing(ParsingError::NotObservation(format!(
                "{:?}",
                rinex.header.rinex_type
            ))));
        }

        let header = ObservationHeader::from_rinex(rinex);
        let mut codes = HashMap::<Constellation, HashMap<String, SnrBand>>::new();
        let mut epochs = Vec::new();

        for (key, observations) in rinex.record.as_obs().into_iter().flatten() {
            let Some(flag) = retained_flag(key.flag) else {
                debug!("{:?} epoch is not retained", key.flag);
                continue;
            };

            let mut epoch = ObservationEpoch::new(gpst(key.epoch), flag);

            for signal in observations.signals.iter() {
                let sv = signal.sv;
                let snr = epoch.snr.entry(sv).or_default();

                let bands = codes
                    .entry(sv.constellation)
                    .or_insert_with(|| header.snr_codes(sv.constellation));

                if let Some(band) = bands.get(&signal.observable.to_string()) {
                    snr.set(*band, signal.value);
                }
            }

            epochs.push(epoch);
        }

        Ok(Self { header, epochs })
    }

    /// Observed [SV]s of this [Constellation], sorted.
    pub fn satellites(&self, constellation: Constellation) -> Vec<SV> {
        self.epochs
            .iter()
            .flat_map(|epoch| epoch.snr.keys())
            .filter(|sv| sv.constellation == constellation)
            .copied()
            .unique()
            .sorted()
            .collect()
    }

    /// Sampling interval (s): from the header, or from the first two epochs.
    pub fn sampling_interval(&self) -> Option<f64> {
        if let Some(interval) = self.header.interval {
            return Some(interval);
        }
        let mut epochs = self.epochs.iter();
        let first = epochs.next()?;
        let second = epochs.next()?;
        Some((second.epoch - first.epoch).to_seconds())
    }

    /// Receiver ECEF coordinates (m) from the header.
    pub fn receiver_position(&self) -> Result<Vector3<f64>, Error> {
        self.header.receiver_position()
    }

    /// Warns when neither S1 nor S2 is observed.
    pub(crate) fn check_bands(&self) {
        if !self.header.observes(SnrBand::S1) && !self.header.observes(SnrBand::S2) {
            warn!("no S1 and no S2 observables: output will be empty");
        }
    }
}
