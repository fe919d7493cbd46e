//! Host-side utilities.

pub mod logging;

pub use logging::{default_log_path, init_logging};
