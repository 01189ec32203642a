use std::fmt;

#[cfg(feature = "with-serde")]
use serde::Serialize;

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultState {
    Valid,
    Invalid,
    Error,
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultDetail {
    MailboxChecked,
    InvalidSyntax,
    Disposable,
    InvalidDomain,
    MailboxUnavailable,
    MailserverError,
    TimeoutError,
    NetworkError,
    ServiceError,
    ClientError,
}

impl ResultDetail {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MailboxChecked => "mailboxChecked",
            Self::InvalidSyntax => "invalidSyntax",
            Self::Disposable => "disposable",
            Self::InvalidDomain => "invalidDomain",
            Self::MailboxUnavailable => "mailboxUnavailable",
            Self::MailserverError => "mailserverError",
            Self::TimeoutError => "timeoutError",
            Self::NetworkError => "networkError",
            Self::ServiceError => "serviceError",
            Self::ClientError => "clientError",
        }
    }
}

impl fmt::Display for ResultDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResultState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Error => "error",
        })
    }
}

/// Outcome of a check. Only the associated constants exist; values are
/// copied around, never built field by field.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckResult {
    #[cfg_attr(feature = "with-serde", serde(rename = "result"))]
    state: ResultState,
    #[cfg_attr(feature = "with-serde", serde(rename = "resultDetail"))]
    detail: ResultDetail,
    message: &'static str,
}

impl CheckResult {
    pub const VALID: Self = Self::new(
        ResultState::Valid,
        ResultDetail::MailboxChecked,
        "The email address is valid.",
    );
    pub const INVALID_SYNTAX: Self = Self::new(
        ResultState::Invalid,
        ResultDetail::InvalidSyntax,
        "The email format is invalid.",
    );
    pub const DISPOSABLE: Self = Self::new(
        ResultState::Invalid,
        ResultDetail::Disposable,
        "The email is a throw-away address.",
    );
    pub const INVALID_DOMAIN: Self = Self::new(
        ResultState::Invalid,
        ResultDetail::InvalidDomain,
        "The email domain does not exist.",
    );
    pub const MAILBOX_UNAVAILABLE: Self = Self::new(
        ResultState::Invalid,
        ResultDetail::MailboxUnavailable,
        "The email username does not exist.",
    );
    pub const MAILSERVER_ERROR: Self = Self::new(
        ResultState::Error,
        ResultDetail::MailserverError,
        "The target mailserver responded with an error.",
    );
    pub const TIMEOUT_ERROR: Self = Self::new(
        ResultState::Error,
        ResultDetail::TimeoutError,
        "The connection to the mailserver timed out.",
    );
    pub const NETWORK_ERROR: Self = Self::new(
        ResultState::Error,
        ResultDetail::NetworkError,
        "The connection to the mailserver failed.",
    );
    pub const SERVICE_ERROR: Self = Self::new(
        ResultState::Error,
        ResultDetail::ServiceError,
        "An internal error occurred while checking.",
    );
    pub const CLIENT_ERROR: Self = Self::new(
        ResultState::Error,
        ResultDetail::ClientError,
        "The request could not be understood.",
    );

    const fn new(state: ResultState, detail: ResultDetail, message: &'static str) -> Self {
        Self {
            state,
            detail,
            message,
        }
    }

    pub fn state(&self) -> ResultState {
        self.state
    }

    pub fn detail(&self) -> ResultDetail {
        self.detail
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    /// `valid` and `invalid` are answers; `error` means "unknown, retry".
    pub fn is_conclusive(&self) -> bool {
        !matches!(self.state, ResultState::Error)
    }

    /// Status code an HTTP front-end answers with for this result.
    pub fn http_status(&self) -> u16 {
        match (self.state, self.detail) {
            (ResultState::Valid | ResultState::Invalid, _) => 200,
            (_, ResultDetail::MailserverError) => 502,
            (_, ResultDetail::ClientError) => 400,
            _ => 500,
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.state, self.detail, self.message)
    }
}
