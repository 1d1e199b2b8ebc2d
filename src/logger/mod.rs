pub mod error;
pub mod format;
pub mod registry;

pub use error::LogError;
pub use format::{
    format_entry, render_timestamp, EntryOptions, LegacyMeta, TimestampFormat, TimestampZone,
    DEFAULT_TIMESTAMP_FORMAT,
};
pub use registry::{LogFiles, LogRegistry, DEFAULT_LOG_NAME};

use crate::shared::fs_append::{append_text, truncate_file};
use chrono::Utc;
use std::ops::{Deref, DerefMut};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    #[default]
    Inactive,
    Active,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerOptions {
    pub timezone: Option<String>,
    pub timestamp_format: Option<String>,
}

#[derive(Debug)]
pub struct Logger {
    registry: LogRegistry,
    zone: TimestampZone,
    timestamp_format: TimestampFormat,
    state: ActivationState,
    last_entry: String,
}

impl Logger {
    pub fn new(logfiles: impl Into<LogFiles>) -> Result<Self, LogError> {
        Self::with_options(logfiles, LoggerOptions::default())
    }

    pub fn with_options(
        logfiles: impl Into<LogFiles>,
        options: LoggerOptions,
    ) -> Result<Self, LogError> {
        let registry = LogRegistry::new(logfiles.into())?;
        let zone = match options.timezone.as_deref() {
            Some(raw) => TimestampZone::parse(raw)?,
            None => TimestampZone::Local,
        };
        let timestamp_format = match options.timestamp_format.as_deref() {
            Some(raw) => TimestampFormat::parse(raw)?,
            None => TimestampFormat::default(),
        };
        Ok(Self::from_parts(registry, zone, timestamp_format))
    }

    pub(crate) fn from_parts(
        registry: LogRegistry,
        zone: TimestampZone,
        timestamp_format: TimestampFormat,
    ) -> Self {
        let mut logger = Self {
            registry,
            zone,
            timestamp_format,
            state: ActivationState::Inactive,
            last_entry: String::new(),
        };
        logger.activate_log();
        logger
    }

    pub fn entry(&mut self, content: &str) -> Result<(), LogError> {
        self.entry_with(content, &EntryOptions::default())
    }

    pub fn entry_with(&mut self, content: &str, options: &EntryOptions) -> Result<(), LogError> {
        let timestamp = if options.timestamp {
            Some(render_timestamp(
                &self.timestamp_format,
                self.zone,
                Utc::now(),
            )?)
        } else {
            None
        };
        self.last_entry = format_entry(content, options.meta.as_slice(), timestamp.as_deref());

        if self.state != ActivationState::Active {
            return Ok(());
        }

        let path = self.registry.path_of(&options.log_name)?;
        if let Err(source) = append_text(path, &self.last_entry) {
            let path = path.display().to_string();
            self.state = ActivationState::Failed;
            return Err(LogError::OpenFailed {
                log_name: options.log_name.clone(),
                path,
                source,
            });
        }
        Ok(())
    }

    pub fn entry_legacy(
        &mut self,
        content: &str,
        meta: impl Into<LegacyMeta>,
        timestamp: bool,
        log_name: &str,
    ) -> Result<(), LogError> {
        let options = EntryOptions::from_legacy(meta.into(), timestamp, log_name);
        self.entry_with(content, &options)
    }

    pub fn clear_log(&self, log_name: &str) -> Result<(), LogError> {
        let path = self.registry.path_of(log_name)?;
        truncate_file(path).map_err(|source| LogError::OpenFailed {
            log_name: log_name.to_string(),
            path: path.display().to_string(),
            source,
        })
    }

    pub fn last_entry(&self) -> &str {
        &self.last_entry
    }

    pub fn activate_log(&mut self) {
        self.state = ActivationState::Active;
    }

    pub fn deactivate_log(&mut self) {
        self.state = ActivationState::Inactive;
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ActivationState::Active
    }

    pub fn path_of(&self, log_name: &str) -> Result<&Path, LogError> {
        self.registry.path_of(log_name)
    }

    pub fn timezone(&self) -> TimestampZone {
        self.zone
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    pub fn session(&mut self) -> LogSession<'_> {
        self.activate_log();
        LogSession { logger: self }
    }
}

#[derive(Debug)]
pub struct LogSession<'a> {
    logger: &'a mut Logger,
}

impl Deref for LogSession<'_> {
    type Target = Logger;

    fn deref(&self) -> &Self::Target {
        self.logger
    }
}

impl DerefMut for LogSession<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.logger
    }
}

impl Drop for LogSession<'_> {
    fn drop(&mut self) {
        self.logger.deactivate_log();
    }
}
