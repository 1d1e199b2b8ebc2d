#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("invalid log files: {0}")]
    Construction(String),
    #[error("invalid timezone `{timezone}`; expected IANA timezone id")]
    InvalidTimezone { timezone: String },
    #[error("invalid timestamp format `{format}`")]
    InvalidTimestampFormat { format: String },
    #[error("can't open log file `{log_name}` at {path}: {source}")]
    OpenFailed {
        log_name: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("log `{log_name}` is not registered")]
    UnknownLog { log_name: String },
}
