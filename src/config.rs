use crate::error::InvalidArgument;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

/// Default look-back in days: long enough for a 31st anchor truncated to
/// the 28th of February.
pub const DEFAULT_WINDOW_DAYS: u32 = 4;

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// 1-based month of the contract term to trigger on.
    pub trigger_month: u32,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl ScanConfig {
    pub fn new(trigger_month: u32, window_days: u32) -> Result<Self, InvalidArgument> {
        let config = Self {
            trigger_month,
            window_days,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if self.trigger_month == 0 {
            return Err(InvalidArgument::ZeroTriggerMonth);
        }
        if self.window_days == 0 {
            return Err(InvalidArgument::ZeroWindow);
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ScanConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: ScanConfig = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(SerdeJsonError),
    Invalid(InvalidArgument),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {err}"),
            ConfigError::Parse(err) => write!(f, "config parse error: {err}"),
            ConfigError::Invalid(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(err) => Some(err),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SerdeJsonError> for ConfigError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Parse(value)
    }
}

impl From<InvalidArgument> for ConfigError {
    fn from(value: InvalidArgument) -> Self {
        Self::Invalid(value)
    }
}
