//! Warning counter and fatal error reporting
//!
//! Every message carries the same `RoadNetwork: ` prefix. Warnings are
//! counted and the run is allowed to continue; fatal errors end the process.

use log::{error, warn};
use std::fmt;

const PREFIX: &str = "RoadNetwork: ";

/// Collects the nonfatal problems found while a network is put together
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a nonfatal error and carry on
    pub fn warn(&mut self, message: impl fmt::Display) {
        let message = message.to_string();
        warn!("{}{}", PREFIX, message);
        self.messages.push(message);
    }

    /// Number of warnings reported so far
    pub fn count(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// Report an unrecoverable error and terminate the process
pub fn fatal(message: impl fmt::Display) -> ! {
    error!("{}{}", PREFIX, message);
    std::process::exit(1);
}
