use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while adapting RINEX or SP3 content.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParsingError {
    #[error("invalid epoch \"{0}\"")]
    Epoch(String),

    /// Observation reader was given another kind of RINEX
    #[error("not an observation RINEX: \"{0}\"")]
    NotObservation(String),

    /// Navigation reader was given another kind of RINEX
    #[error("not a navigation RINEX: \"{0}\"")]
    NotNavigation(String),

    /// GPS message lacking one of the Keplerian parameters
    #[error("{0}: missing ephemeris field \"{1}\"")]
    EphemerisField(String, String),
}

/// Conversion errors. Each one aborts the conversion of the current file only.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("rinex error: {0}")]
    Rinex(#[from] rinex::prelude::ParsingError),

    #[error("sp3 error: {0}")]
    Sp3(#[from] sp3::prelude::Error),

    /// Observation header does not define the station coordinates.
    /// This is mandatory to determine the receiver local frame.
    #[error("RINEX file does not have station coordinates")]
    MissingReceiverCoordinates,

    /// Station coordinates are (nearly) null: we cannot define a local frame.
    #[error("receiver coordinates are in the middle of the Earth")]
    ReceiverAtEarthCenter,

    #[error("empty ephemeris data")]
    EmptyEphemeris,

    #[error("empty precise orbit table")]
    EmptyOrbitTable,

    /// Output was produced by a previous run and overwriting was not requested.
    #[error("SNR file already exists: {0}")]
    OutputExists(PathBuf),

    /// Conversion completed but did not retain a single record.
    #[error("no SNR record was produced")]
    NoRecords,
}
