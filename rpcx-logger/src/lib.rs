//! Tracing subscriber setup shared by binaries and tests that embed the chain client.

mod logging;

pub use logging::{init, try_init, LogConfig, LogFormat, LogOutput, LoggerError};
