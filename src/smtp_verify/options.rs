use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for the mailbox probe.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// SMTP port on the MX hosts.
    pub port: u16,
    /// Bound on each TCP connect attempt.
    pub connect_timeout: Duration,
    /// Bound on each command write and reply read.
    pub command_timeout: Duration,
    /// Bound on a whole check when the caller supplies no earlier cancellation.
    pub timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            connect_timeout: Duration::from_secs(10),
            command_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(45),
        }
    }
}

impl ProbeOptions {
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
