#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SNR file type. The type code is also the SNR file extension
/// and defines the elevation range that is retained.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u16", into = "u16"))]
pub enum SnrType {
    /// 5° to 30°
    Type99,
    /// 0° to 10°
    Type50,
    /// 0° to 30°
    #[default]
    Type66,
    /// 5° to 90°
    Type88,
    /// Any other code, retains 5° to 30°
    Other(u16),
}

impl From<u16> for SnrType {
    fn from(code: u16) -> Self {
        match code {
            99 => Self::Type99,
            50 => Self::Type50,
            66 => Self::Type66,
            88 => Self::Type88,
            code => Self::Other(code),
        }
    }
}

impl From<SnrType> for u16 {
    fn from(snr: SnrType) -> u16 {
        snr.code()
    }
}

impl std::fmt::Display for SnrType {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}", self.code())
    }
}

impl SnrType {
    /// Returns the type code
    pub fn code(&self) -> u16 {
        match self {
            Self::Type99 => 99,
            Self::Type50 => 50,
            Self::Type66 => 66,
            Self::Type88 => 88,
            Self::Other(code) => *code,
        }
    }

    /// Returns (min, max) elevation angles in degrees
    pub fn elevation_limits(&self) -> (f64, f64) {
        match self {
            Self::Type99 => (5.0, 30.0),
            Self::Type50 => (0.0, 10.0),
            Self::Type66 => (0.0, 30.0),
            Self::Type88 => (5.0, 90.0),
            Self::Other(_) => (5.0, 30.0),
        }
    }

    /// Returns true if a record at this elevation (degrees) is retained.
    pub fn accepts(&self, elevation_deg: f64) -> bool {
        let (min, max) = self.elevation_limits();
        elevation_deg >= min && elevation_deg <= max
    }
}

/// Orbit source of a conversion
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrbitKind {
    /// GPS broadcast ephemerides (navigation RINEX)
    #[default]
    Broadcast,
    /// Sampled precise orbits (SP3), multi constellation
    Precise,
}

impl std::fmt::Display for OrbitKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Broadcast => write!(fmt, "nav"),
            Self::Precise => write!(fmt, "sp3"),
        }
    }
}

fn default_decimation() -> u32 {
    0
}

fn default_remove_empty() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
pub struct Config {
    /// SNR file type
    #[cfg_attr(feature = "serde", serde(default))]
    pub snr_type: SnrType,
    /// Decimation interval in seconds: only epochs that are
    /// a multiple of this interval are retained. 0 retains all epochs.
    #[cfg_attr(feature = "serde", serde(default = "default_decimation"))]
    pub decimation: u32,
    /// Replace an SNR file that already exists
    #[cfg_attr(feature = "serde", serde(default))]
    pub overwrite: bool,
    /// Delete the output when no record was retained
    #[cfg_attr(feature = "serde", serde(default = "default_remove_empty"))]
    pub remove_empty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snr_type: SnrType::default(),
            decimation: default_decimation(),
            overwrite: false,
            remove_empty: default_remove_empty(),
        }
    }
}

impl Config {
    /// Preset for this [SnrType] and decimation interval
    pub fn preset(snr_type: SnrType, decimation: u32) -> Self {
        Self {
            snr_type,
            decimation,
            ..Default::default()
        }
    }

    /// Copies and returns [Config] with overwriting enabled
    pub fn with_overwrite(&self) -> Self {
        let mut s = self.clone();
        s.overwrite = true;
        s
    }
}
