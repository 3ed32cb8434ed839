//! Logger initialization.
//!
//! Library code only talks to the `log` facade; applications call
//! [`init_logging`] once to route it through `env_logger`.

mod init;

pub use init::{LoggingConfig, init_logging};
