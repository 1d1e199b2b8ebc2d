pub mod error;
pub mod load;

pub use error::ConfigError;
pub use load::{load_logger, LoggerConfig};
