use std::io;
use std::time::Duration;

use thiserror::Error;

use super::types::{SmtpReply, Stage};

/// Failure of a single SMTP exchange.
#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("{stage}: no reply within {after:?}")]
    Timeout { stage: Stage, after: Duration },
    #[error("{stage}: I/O error: {source}")]
    Io {
        stage: Stage,
        #[source]
        source: io::Error,
    },
    #[error("{stage}: connection closed by server")]
    Closed { stage: Stage },
    #[error("{stage}: malformed reply: {detail}")]
    Malformed { stage: Stage, detail: String },
    #[error("{stage}: rejected with {} {}", reply.code, reply.message)]
    Rejected { stage: Stage, reply: SmtpReply },
}

impl SmtpError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Timeout { stage, .. }
            | Self::Io { stage, .. }
            | Self::Closed { stage }
            | Self::Malformed { stage, .. }
            | Self::Rejected { stage, .. } => *stage,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Io { source, .. } => source.kind() == io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    pub fn reply(&self) -> Option<&SmtpReply> {
        match self {
            Self::Rejected { reply, .. } => Some(reply),
            _ => None,
        }
    }

    pub(crate) fn io(stage: Stage, source: io::Error) -> Self {
        Self::Io { stage, source }
    }

    pub(crate) fn malformed(stage: Stage, detail: impl Into<String>) -> Self {
        Self::Malformed {
            stage,
            detail: detail.into(),
        }
    }
}

/// Failure of a probe, from connecting to the MX hosts to the end of the
/// dialogue.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no MX host to probe")]
    NoHosts,
    #[error("connection to {host}:{port} timed out after {after:?}")]
    ConnectTimeout {
        host: String,
        port: u16,
        after: Duration,
    },
    #[error("connection to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },
    #[error("handshake with {host} failed: {source}")]
    Handshake {
        host: String,
        #[source]
        source: SmtpError,
    },
    #[error("dialogue with {host} failed: {source}")]
    Dialogue {
        host: String,
        #[source]
        source: SmtpError,
    },
    #[error("dialogue task ended without reporting")]
    TaskAborted,
    #[error("check cancelled")]
    Cancelled,
    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl ProbeError {
    /// A silent server is a timeout at every stage, dialogue commands
    /// included; only actual replies and broken connections count as
    /// mailserver failures.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::ConnectTimeout { .. } | Self::Cancelled | Self::DeadlineExceeded(_) => true,
            Self::Connect { source, .. } => source.kind() == io::ErrorKind::TimedOut,
            Self::Handshake { source, .. } | Self::Dialogue { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    pub(crate) fn connect(host: &str, port: u16, source: io::Error) -> Self {
        Self::Connect {
            host: host.to_string(),
            port,
            source,
        }
    }
}
