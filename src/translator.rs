//! Observation to SNR record translation
use std::io::Write;

use log::{debug, info, warn};

use crate::{
    cfg::{Config, OrbitKind},
    demux::FilterPolicy,
    ephemeris::{EphemerisSource, EphemerisStore},
    error::Error,
    geometry::elevation_azimuth,
    lighttime::light_time_correction,
    orbit::OrbitProvider,
    position::ReceiverFrame,
    precise::{PreciseOrbitTable, SatelliteInterpolant},
    prelude::{Constellation, SV},
    rinex::observation::{ObservationData, ObservationEpoch, SnrValues},
    snr::{RecordLayout, SnrRecord},
    sv::{numeric_id, PRECISE_CONSTELLATIONS},
    time::{day_start_seconds_of_week, decimation_match},
};

/// Progress report period, in epochs
const PROGRESS_PERIOD: usize = 200;

/// Outcome of a translation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Records that were produced
    pub records: usize,
    /// Epochs retained by decimation
    pub epochs: usize,
    /// Satellites that could not be positioned
    pub skipped: Vec<SV>,
}

/// [Translator] converts observations to [SnrRecord]s
#[derive(Debug, Clone)]
pub struct Translator {
    cfg: Config,
}

/// Candidate position and SNR values, prior elevation filtering
struct Candidate {
    sv: SV,
    position: crate::prelude::Vector3<f64>,
    values: SnrValues,
}

impl Translator {
    pub fn new(cfg: &Config) -> Self {
        Self { cfg: cfg.clone() }
    }

    /// Translates `obs` using these orbits and writes one line per record.
    pub fn translate<W: Write>(
        &self,
        obs: &ObservationData,
        orbits: &OrbitProvider,
        writer: &mut W,
    ) -> Result<Summary, Error> {
        self.run(obs, orbits, |record| {
            writeln!(writer, "{}", record)?;
            Ok(())
        })
    }

    /// Translates `obs` using these orbits and returns all records.
    pub fn records(
        &self,
        obs: &ObservationData,
        orbits: &OrbitProvider,
    ) -> Result<Vec<SnrRecord>, Error> {
        let mut records = Vec::new();
        self.run(obs, orbits, |record| {
            records.push(record);
            Ok(())
        })?;
        Ok(records)
    }

    fn run<F>(&self, obs: &ObservationData, orbits: &OrbitProvider, mut sink: F) -> Result<Summary, Error>
    where
        F: FnMut(SnrRecord) -> Result<(), Error>,
    {
        let receiver = obs.receiver_position()?;
        info!(
            "XYZ from header {:15.5} {:15.5} {:15.5}",
            receiver[0], receiver[1], receiver[2]
        );

        let frame = ReceiverFrame::from_ecef(receiver)?;

        match obs.sampling_interval() {
            Some(interval) => info!("receiver rate: {}s", interval),
            None => info!("receiver rate: unknown"),
        }
        info!("decimation rate: {}s", self.cfg.decimation);
        info!("orbits: {}", orbits.kind());
        info!("SNR type: {}", self.cfg.snr_type);

        obs.check_bands();

        if orbits.is_empty() {
            return Err(match orbits.kind() {
                OrbitKind::Broadcast => Error::EmptyEphemeris,
                OrbitKind::Precise => Error::EmptyOrbitTable,
            });
        }

        let summary = match orbits {
            OrbitProvider::Broadcast(store) => self.broadcast(obs, store, &frame, &mut sink)?,
            OrbitProvider::Precise(table) => self.precise(obs, table, &frame, &mut sink)?,
        };

        info!(
            "{} records from {} epochs ({} skipped satellites)",
            summary.records,
            summary.epochs,
            summary.skipped.len()
        );
        Ok(summary)
    }

    /// Emits the candidates that pass the elevation filter, in order.
    fn emit<F>(
        &self,
        candidates: Vec<Candidate>,
        frame: &ReceiverFrame,
        seconds: f64,
        layout: RecordLayout,
        summary: &mut Summary,
        sink: &mut F,
    ) -> Result<(), Error>
    where
        F: FnMut(SnrRecord) -> Result<(), Error>,
    {
        for candidate in candidates {
            let (elevation_deg, azimuth_deg) = elevation_azimuth(&candidate.position, frame);
            if !self.cfg.snr_type.accepts(elevation_deg) {
                continue;
            }
            let Some(id) = numeric_id(candidate.sv) else {
                continue;
            };
            sink(SnrRecord {
                sv: candidate.sv,
                id,
                elevation_deg,
                azimuth_deg,
                seconds,
                values: candidate.values,
                layout,
            })?;
            summary.records += 1;
        }
        Ok(())
    }

    fn progress(&self, index: usize, total: usize, epoch: &ObservationEpoch) {
        if index % PROGRESS_PERIOD == 0 {
            debug!("epoch {}/{} ({})", index, total, epoch.epoch);
        }
    }

    /// GPS only, using Keplerian propagation of the closest ephemeris.
    /// Time is expressed in whole seconds.
    fn broadcast<F>(
        &self,
        obs: &ObservationData,
        store: &EphemerisStore,
        frame: &ReceiverFrame,
        sink: &mut F,
    ) -> Result<Summary, Error>
    where
        F: FnMut(SnrRecord) -> Result<(), Error>,
    {
        let policy = FilterPolicy::from(OrbitKind::Broadcast);
        let satellites = obs.satellites(Constellation::GPS);
        if satellites.is_empty() {
            warn!("no GPS data");
        }

        let receiver = frame.ecef();
        let mut summary = Summary::default();

        for (index, epoch) in obs.epochs.iter().enumerate() {
            self.progress(index, obs.epochs.len(), epoch);

            let seconds_of_day = epoch.seconds_of_day();
            if !decimation_match(seconds_of_day, self.cfg.decimation) {
                continue;
            }
            summary.epochs += 1;

            let (week, sow) = epoch.gps_week_seconds();
            let sow = sow.floor();

            let mut candidates = Vec::with_capacity(satellites.len());

            for sv in satellites.iter() {
                let Some(values) = policy.select(epoch, *sv) else {
                    continue;
                };

                let Some(block) = store.closest(*sv, week, sow) else {
                    if !summary.skipped.contains(sv) {
                        warn!("{} is not in the navigation file", sv);
                        summary.skipped.push(*sv);
                    }
                    continue;
                };

                let solution = light_time_correction(|t| block.position(week, t), sow, &receiver);

                candidates.push(Candidate {
                    sv: *sv,
                    position: solution.position,
                    values,
                });
            }

            self.emit(
                candidates,
                frame,
                seconds_of_day,
                RecordLayout::Broadcast,
                &mut summary,
                sink,
            )?;
        }

        Ok(summary)
    }

    /// Multi constellation, by interpolation of tabulated orbits.
    /// Time is expressed in seconds of week.
    fn precise<F>(
        &self,
        obs: &ObservationData,
        table: &PreciseOrbitTable,
        frame: &ReceiverFrame,
        sink: &mut F,
    ) -> Result<Summary, Error>
    where
        F: FnMut(SnrRecord) -> Result<(), Error>,
    {
        let policy = FilterPolicy::from(OrbitKind::Precise);
        let mut summary = Summary::default();

        let Some(first) = obs.epochs.first() else {
            return Ok(summary);
        };
        let day_start = day_start_seconds_of_week(first.epoch);

        let mut interpolants = Vec::<(SV, SatelliteInterpolant)>::new();

        for constellation in PRECISE_CONSTELLATIONS {
            let satellites = obs.satellites(constellation);
            if satellites.is_empty() {
                info!("no data for constellation {}", constellation);
                continue;
            }
            info!("found data for constellation {}", constellation);

            for sv in satellites {
                match table.interpolant(sv) {
                    Some(interpolant) => {
                        debug!("{} - addon {:?}", sv, numeric_id(sv));
                        interpolants.push((sv, interpolant));
                    },
                    None if table.is_tabulated(sv) => {
                        warn!("{}: not enough samples to interpolate", sv);
                        summary.skipped.push(sv);
                    },
                    None => {
                        warn!("{} is not in the orbit file", sv);
                        summary.skipped.push(sv);
                    },
                }
            }
        }

        let receiver = frame.ecef();

        for (index, epoch) in obs.epochs.iter().enumerate() {
            self.progress(index, obs.epochs.len(), epoch);

            let (week, sow) = epoch.gps_week_seconds();
            if !decimation_match(sow, self.cfg.decimation) {
                continue;
            }
            summary.epochs += 1;

            let mut candidates = Vec::with_capacity(interpolants.len());

            for (sv, interpolant) in interpolants.iter() {
                let Some(values) = policy.select(epoch, *sv) else {
                    continue;
                };

                let solution =
                    light_time_correction(|t| interpolant.position(week, t), sow, &receiver);

                candidates.push(Candidate {
                    sv: *sv,
                    position: solution.position,
                    values,
                });
            }

            self.emit(
                candidates,
                frame,
                sow - day_start,
                RecordLayout::Precise,
                &mut summary,
                sink,
            )?;
        }

        Ok(summary)
    }
}
