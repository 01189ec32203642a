use std::fmt;

use super::error::ProbeError;

/// Step of the SMTP dialogue a command or reply belongs to.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Banner,
    Helo,
    MailFrom,
    RcptTo,
    Quit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Banner => "banner",
            Self::Helo => "HELO",
            Self::MailFrom => "MAIL FROM",
            Self::RcptTo => "RCPT TO",
            Self::Quit => "QUIT",
        })
    }
}

/// A raw SMTP reply, preserving the numeric status code and message text.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub message: String,
}

impl SmtpReply {
    pub fn is_positive_completion(&self) -> bool {
        (200..300).contains(&self.code)
    }

    pub fn is_mailbox_unavailable(&self) -> bool {
        self.code == 550
    }
}

/// Progress of one probe dialogue. The last three states are terminal;
/// errors and timeouts may cut in from any earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueState {
    Connected,
    Greeted,
    SenderDeclared,
    RecipientQueried,
    Accepted,
    MailboxUnavailable,
    Errored,
}

/// Raw result of probing the MX hosts of a domain.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// `RCPT TO` was answered with a positive completion.
    Accepted,
    /// `RCPT TO` was answered with 550.
    MailboxUnavailable,
    /// Connect, dialogue or the caller's deadline/cancellation ran out.
    TimedOut(ProbeError),
    /// No connection could be established.
    Network(ProbeError),
    /// The server or the dialogue misbehaved.
    Mailserver(ProbeError),
}

impl ProbeOutcome {
    /// Sorts a failure into timeout, network or mailserver buckets.
    pub fn from_failure(err: ProbeError) -> Self {
        if err.is_timeout() {
            Self::TimedOut(err)
        } else if matches!(err, ProbeError::Connect { .. }) {
            Self::Network(err)
        } else {
            Self::Mailserver(err)
        }
    }

    pub fn into_cause(self) -> Option<ProbeError> {
        match self {
            Self::Accepted | Self::MailboxUnavailable => None,
            Self::TimedOut(err) | Self::Network(err) | Self::Mailserver(err) => Some(err),
        }
    }
}

/// What a probe produced: the outcome plus the evidence gathered on the way.
#[derive(Debug)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    /// MX host the dialogue ran against, if a session was opened.
    pub host: Option<String>,
    /// `C:`/`S:` lines of the dialogue; empty when it was cut off.
    pub transcript: Vec<String>,
}

impl ProbeReport {
    pub(crate) fn without_session(outcome: ProbeOutcome) -> Self {
        Self {
            outcome,
            host: None,
            transcript: Vec::new(),
        }
    }
}
