//! SMTP mailbox probing.
//!
//! [`probe_mailbox`] connects to the MX hosts of a domain one at a time,
//! runs `EHLO`/`MAIL FROM`/`RCPT TO` against the first usable one and stops
//! before `DATA`. The outcome is reported as a [`ProbeOutcome`].

mod cutoff;
mod dialer;
mod error;
mod options;
mod probe;
mod session;
mod types;

pub use cutoff::Cutoff;
pub use dialer::{Dialer, TcpDialer};
pub use error::{ProbeError, SmtpError};
pub use options::ProbeOptions;
pub use probe::{ProbeRequest, probe_mailbox};
pub use types::{DialogueState, ProbeOutcome, ProbeReport, SmtpReply, Stage};
