#![forbid(unsafe_code)]
//! mailprobe: vérifie qu'une adresse e-mail est délivrable sans envoyer de message.
//!
//! A check runs, in order: syntax, disposable-domain lookup, MX resolution
//! and an SMTP probe (`EHLO`, `MAIL FROM`, `RCPT TO`, then `QUIT`). The first
//! definitive step wins and is reported as one of the fixed [`CheckResult`]
//! values.

mod check;
mod classify;
pub mod disposable;
pub mod mx;
mod result;
pub mod smtp_verify;
mod syntax;

pub use check::{CheckError, CheckReport, Validator};
pub use classify::{Outcome, classify};
pub use disposable::{DisposableDomains, is_disposable};
pub use mx::{Error as MxError, LookupMx, MxRecord, MxStatus, check_mx};
pub use result::{CheckResult, ResultDetail, ResultState};
pub use smtp_verify::{
    Cutoff, Dialer, ProbeError, ProbeOptions, ProbeOutcome, ProbeReport, SmtpError, TcpDialer,
};
pub use syntax::{SyntaxChecker, check_syntax};

pub use tokio_util::sync::CancellationToken;
