pub mod config;
pub mod draw;
pub mod result;
pub mod session;

pub use config::{Config, ConfigError, OutputConfig, OutputFormat, SessionLabels};
pub use draw::{Digit, DrawNumber, DrawRecord};
pub use result::{ResultRow, ResultSet, RESULT_COLUMNS};
pub use session::Session;
