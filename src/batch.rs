//! Per file conversion and batch processing
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{error, info, warn};

use crate::{
    cfg::{Config, OrbitKind, SnrType},
    error::Error,
    orbit::OrbitProvider,
    rinex::observation::ObservationData,
    translator::{Summary, Translator},
};

/// SNR file name of a station and day: `ssssddd0.yy.snrXX`
pub fn snr_file_name(station: &str, year: i32, doy: u16, snr_type: SnrType) -> String {
    format!(
        "{}{:03}0.{:02}.snr{}",
        station,
        doy,
        year.rem_euclid(100),
        snr_type
    )
}

/// One conversion to perform
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    /// Observation RINEX
    pub observation: PathBuf,
    /// Navigation RINEX or SP3 file
    pub orbit: PathBuf,
    pub kind: OrbitKind,
    /// SNR file to produce
    pub output: PathBuf,
}

impl Job {
    pub fn new(
        observation: impl AsRef<Path>,
        orbit: impl AsRef<Path>,
        kind: OrbitKind,
        output: impl AsRef<Path>,
    ) -> Self {
        Self {
            observation: observation.as_ref().to_path_buf(),
            orbit: orbit.as_ref().to_path_buf(),
            kind,
            output: output.as_ref().to_path_buf(),
        }
    }
}

/// Successful conversion
#[derive(Debug, Clone, PartialEq)]
pub struct SnrFile {
    pub path: PathBuf,
    pub summary: Summary,
}

/// Converts one observation file. Any error aborts this conversion only,
/// and no partial output is left behind.
pub fn convert_file(job: &Job, cfg: &Config) -> Result<SnrFile, Error> {
    if job.output.exists() && !cfg.overwrite {
        return Err(Error::OutputExists(job.output.clone()));
    }

    let obs = ObservationData::from_file(&job.observation)?;

    // header is verified prior reading the orbits
    obs.receiver_position()?;

    let orbits = OrbitProvider::from_file(&job.orbit, job.kind)?;

    let fd = File::create(&job.output)?;
    let mut writer = BufWriter::new(fd);

    let result = Translator::new(cfg)
        .translate(&obs, &orbits, &mut writer)
        .and_then(|summary| {
            writer.flush()?;
            Ok(summary)
        });

    drop(writer);

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            let _ = fs::remove_file(&job.output);
            return Err(e);
        },
    };

    if summary.records == 0 {
        warn!("{}: no record was produced", job.output.display());
        if cfg.remove_empty {
            fs::remove_file(&job.output)?;
            return Err(Error::NoRecords);
        }
    }

    Ok(SnrFile {
        path: job.output.clone(),
        summary,
    })
}

/// Ordered list of [Job]s
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    jobs: Vec<Job>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a [Batch] from a (year, day of year) plan. `resolver` designates
    /// the files of each day, or returns None when that day cannot be processed.
    pub fn from_plan<F>(plan: &[(i32, u16)], resolver: F) -> Self
    where
        F: Fn(i32, u16) -> Option<Job>,
    {
        let mut batch = Self::new();
        for (year, doy) in plan {
            match resolver(*year, *doy) {
                Some(job) => batch.push(job),
                None => warn!("{}:{:03} - no input files", year, doy),
            }
        }
        batch
    }

    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Converts every [Job] in order. Failures are reported and do not stop the batch.
    pub fn run(&self, cfg: &Config) -> Vec<Result<SnrFile, Error>> {
        self.jobs
            .iter()
            .map(|job| {
                let result = convert_file(job, cfg);
                match &result {
                    Ok(snr) => info!(
                        "{}: {} records",
                        snr.path.display(),
                        snr.summary.records
                    ),
                    Err(Error::OutputExists(path)) => {
                        info!("{} already exists", path.display())
                    },
                    Err(e) => error!("{}: {}", job.observation.display(), e),
                }
                result
            })
            .collect()
    }
}
