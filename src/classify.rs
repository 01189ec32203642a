use crate::mx::Error as MxError;
use crate::result::CheckResult;
use crate::smtp_verify::{ProbeError, ProbeOutcome};

/// Where a check stopped. Every path through [`Validator::check`](crate::Validator::check)
/// ends in exactly one of these.
#[derive(Debug)]
pub enum Outcome {
    InvalidSyntax,
    Disposable,
    /// No MX records, or the lookup failed.
    InvalidDomain(Option<MxError>),
    /// The check was cut off before a probe could start.
    Interrupted(ProbeError),
    Probe(ProbeOutcome),
}

/// Maps an outcome onto the fixed result catalogue. Pure.
pub fn classify(outcome: &Outcome) -> CheckResult {
    match outcome {
        Outcome::InvalidSyntax => CheckResult::INVALID_SYNTAX,
        Outcome::Disposable => CheckResult::DISPOSABLE,
        Outcome::InvalidDomain(_) => CheckResult::INVALID_DOMAIN,
        Outcome::Interrupted(_) => CheckResult::TIMEOUT_ERROR,
        Outcome::Probe(probe) => match probe {
            ProbeOutcome::Accepted => CheckResult::VALID,
            ProbeOutcome::MailboxUnavailable => CheckResult::MAILBOX_UNAVAILABLE,
            ProbeOutcome::TimedOut(_) => CheckResult::TIMEOUT_ERROR,
            ProbeOutcome::Network(_) => CheckResult::NETWORK_ERROR,
            ProbeOutcome::Mailserver(_) => CheckResult::MAILSERVER_ERROR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{ResultDetail, ResultState};
    use std::io;

    fn detail(outcome: Outcome) -> (ResultState, ResultDetail) {
        let result = classify(&outcome);
        (result.state(), result.detail())
    }

    #[test]
    fn catalogue_is_fixed() {
        use ResultDetail as D;
        use ResultState as S;

        assert_eq!(detail(Outcome::InvalidSyntax), (S::Invalid, D::InvalidSyntax));
        assert_eq!(detail(Outcome::Disposable), (S::Invalid, D::Disposable));
        assert_eq!(detail(Outcome::InvalidDomain(None)), (S::Invalid, D::InvalidDomain));
        assert_eq!(
            detail(Outcome::InvalidDomain(Some(MxError::EmptyDomain))),
            (S::Invalid, D::InvalidDomain)
        );
        assert_eq!(
            detail(Outcome::Interrupted(ProbeError::Cancelled)),
            (S::Error, D::TimeoutError)
        );
        assert_eq!(
            detail(Outcome::Probe(ProbeOutcome::Accepted)),
            (S::Valid, D::MailboxChecked)
        );
        assert_eq!(
            detail(Outcome::Probe(ProbeOutcome::MailboxUnavailable)),
            (S::Invalid, D::MailboxUnavailable)
        );
        assert_eq!(
            detail(Outcome::Probe(ProbeOutcome::TimedOut(ProbeError::Cancelled))),
            (S::Error, D::TimeoutError)
        );
        assert_eq!(
            detail(Outcome::Probe(ProbeOutcome::Network(ProbeError::Connect {
                host: "mx".into(),
                port: 25,
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            }))),
            (S::Error, D::NetworkError)
        );
        assert_eq!(
            detail(Outcome::Probe(ProbeOutcome::Mailserver(ProbeError::TaskAborted))),
            (S::Error, D::MailserverError)
        );
    }
}
