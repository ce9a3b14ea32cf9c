//! Common utilities and helpers

pub mod logging;
pub mod path;
pub mod time;

pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use path::default_output_path;
pub use time::TimeSpec;
