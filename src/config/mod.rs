//! Configuration module for salted
//!
//! This module resolves command-line flags and environment variables into
//! validated run settings:
//! - direction, digest and armor selection
//! - password source (flag, key file or terminal prompt)
//! - input and output locations
//! - log level

pub mod settings;

pub use settings::{Direction, KeySource, LogLevel, Settings, Sink, Source};
