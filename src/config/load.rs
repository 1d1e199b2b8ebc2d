use super::ConfigError;
use crate::logger::{LogFiles, LogRegistry, Logger, TimestampFormat, TimestampZone};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggerConfig {
    pub logfiles: serde_yaml::Value,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub timestamp_format: Option<String>,
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl LoggerConfig {
    pub fn from_yaml(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_yaml(&raw, &path.display().to_string())?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn build(&self) -> Result<Logger, ConfigError> {
        let files = LogFiles::try_from(self.logfiles.clone())?;
        let mut registry = LogRegistry::new(files)?;
        if let Some(base) = &self.base_dir {
            registry.resolve_relative_to(base);
        }
        let zone = match self.timezone.as_deref() {
            Some(raw) => TimestampZone::parse(raw)?,
            None => TimestampZone::Local,
        };
        let format = match self.timestamp_format.as_deref() {
            Some(raw) => TimestampFormat::parse(raw)?,
            None => TimestampFormat::default(),
        };
        Ok(Logger::from_parts(registry, zone, format))
    }
}

pub fn load_logger(path: &Path) -> Result<Logger, ConfigError> {
    LoggerConfig::from_path(path)?.build()
}
