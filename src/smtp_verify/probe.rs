use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::mx::MxRecord;
use crate::smtp_verify::cutoff::Cutoff;
use crate::smtp_verify::dialer::Dialer;
use crate::smtp_verify::error::{ProbeError, SmtpError};
use crate::smtp_verify::options::ProbeOptions;
use crate::smtp_verify::session::SmtpSession;
use crate::smtp_verify::types::{DialogueState, ProbeOutcome, ProbeReport, SmtpReply, Stage};

/// Envelope of one probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeRequest<'a> {
    /// Envelope sender for `MAIL FROM`.
    pub from: &'a str,
    /// Address proposed with `RCPT TO`.
    pub target: &'a str,
    /// Name announced in `EHLO`/`HELO`.
    pub helo: &'a str,
}

/// Probes `hosts` in order and reports whether the first reachable one
/// accepts `request.target`.
///
/// Hosts are tried one after the other, never concurrently; the first that
/// accepts a connection and sends a 220 banner runs the dialogue. The
/// dialogue itself runs on its own task and is raced against `cutoff`: when
/// the cutoff fires first the outcome is a timeout and the task's late
/// result is dropped, while the task still says `QUIT` and closes its socket.
pub async fn probe_mailbox<D: Dialer>(
    dialer: &D,
    options: &ProbeOptions,
    request: &ProbeRequest<'_>,
    hosts: &[MxRecord],
    cutoff: &Cutoff,
) -> ProbeReport {
    let session = match cutoff.guard(connect_first(dialer, options, hosts)).await {
        Ok(Ok(session)) => session,
        Ok(Err(outcome)) => return ProbeReport::without_session(outcome),
        Err(interrupted) => {
            return ProbeReport::without_session(ProbeOutcome::TimedOut(interrupted));
        }
    };

    let host = session.host().to_string();
    let dialogue = Dialogue {
        from: request.from.to_string(),
        target: request.target.to_string(),
        helo: request.helo.to_string(),
    };
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let report = dialogue.run(session).await;
        if let Err(late) = tx.send(report) {
            tracing::warn!(
                host = ?late.host,
                outcome = ?late.outcome,
                "dialogue finished after the check gave up; result discarded"
            );
        }
    });

    match cutoff.guard(rx).await {
        Ok(Ok(report)) => report,
        Ok(Err(_)) => ProbeReport {
            outcome: ProbeOutcome::Mailserver(ProbeError::TaskAborted),
            host: Some(host),
            transcript: Vec::new(),
        },
        Err(interrupted) => {
            tracing::debug!(%host, error = %interrupted, "dialogue interrupted");
            ProbeReport {
                outcome: ProbeOutcome::TimedOut(interrupted),
                host: Some(host),
                transcript: Vec::new(),
            }
        }
    }
}

async fn connect_first<D: Dialer>(
    dialer: &D,
    options: &ProbeOptions,
    hosts: &[MxRecord],
) -> Result<SmtpSession<TcpStream>, ProbeOutcome> {
    let mut failures = Vec::new();
    for record in hosts {
        match open_session(dialer, options, &record.exchange).await {
            Ok(session) => return Ok(session),
            Err(err) => {
                tracing::debug!(host = %record.exchange, error = %err, "MX host unusable");
                failures.push(err);
            }
        }
    }
    Err(worst_failure(failures))
}

/// Picks the outcome reported when no host could be used: any timeout wins,
/// then a host that connected but failed the handshake, then the last
/// network error.
fn worst_failure(failures: Vec<ProbeError>) -> ProbeOutcome {
    let mut outcome = ProbeOutcome::Mailserver(ProbeError::NoHosts);
    for err in failures {
        let candidate = ProbeOutcome::from_failure(err);
        if failure_rank(&candidate) >= failure_rank(&outcome) {
            outcome = candidate;
        }
    }
    outcome
}

fn failure_rank(outcome: &ProbeOutcome) -> u8 {
    match outcome {
        ProbeOutcome::TimedOut(_) => 3,
        ProbeOutcome::Mailserver(ProbeError::NoHosts) => 0,
        ProbeOutcome::Mailserver(_) => 2,
        ProbeOutcome::Network(_) => 1,
        ProbeOutcome::Accepted | ProbeOutcome::MailboxUnavailable => 0,
    }
}

async fn open_session<D: Dialer>(
    dialer: &D,
    options: &ProbeOptions,
    host: &str,
) -> Result<SmtpSession<TcpStream>, ProbeError> {
    let stream = match timeout(options.connect_timeout, dialer.dial(host, options.port)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(err)) => return Err(ProbeError::connect(host, options.port, err)),
        Err(_) => {
            return Err(ProbeError::ConnectTimeout {
                host: host.to_string(),
                port: options.port,
                after: options.connect_timeout,
            });
        }
    };

    let mut session = SmtpSession::new(host, stream, options.command_timeout);
    match session.read_banner().await {
        Ok(reply) if reply.code == 220 => Ok(session),
        Ok(reply) => {
            session.close().await;
            Err(ProbeError::Handshake {
                host: host.to_string(),
                source: SmtpError::Rejected {
                    stage: Stage::Banner,
                    reply,
                },
            })
        }
        Err(source) => Err(ProbeError::Handshake {
            host: host.to_string(),
            source,
        }),
    }
}

/// Owned copy of the envelope, moved onto the dialogue task.
struct Dialogue {
    from: String,
    target: String,
    helo: String,
}

impl Dialogue {
    async fn run(self, mut session: SmtpSession<TcpStream>) -> ProbeReport {
        let host = session.host().to_string();
        let outcome = match self.converse(&mut session).await {
            Ok(DialogueState::MailboxUnavailable) => ProbeOutcome::MailboxUnavailable,
            Ok(_) => ProbeOutcome::Accepted,
            Err(source) => {
                tracing::debug!(%host, state = ?DialogueState::Errored, error = %source);
                ProbeOutcome::from_failure(ProbeError::Dialogue {
                    host: host.clone(),
                    source,
                })
            }
        };
        let transcript = session.close().await;
        ProbeReport {
            outcome,
            host: Some(host),
            transcript,
        }
    }

    /// Connected -> Greeted -> SenderDeclared -> RecipientQueried, ending in
    /// `Accepted` or `MailboxUnavailable`.
    async fn converse(
        &self,
        session: &mut SmtpSession<TcpStream>,
    ) -> Result<DialogueState, SmtpError> {
        let host = session.host().to_string();
        tracing::debug!(%host, state = ?DialogueState::Connected);

        let ehlo = session
            .command(&format!("EHLO {}", self.helo), Stage::Helo)
            .await?;
        if !ehlo.is_positive_completion() {
            let helo = session
                .command(&format!("HELO {}", self.helo), Stage::Helo)
                .await?;
            expect_positive(helo, Stage::Helo)?;
        }
        tracing::debug!(%host, state = ?DialogueState::Greeted);

        let mail = session
            .command(&format!("MAIL FROM:<{}>", self.from), Stage::MailFrom)
            .await?;
        expect_positive(mail, Stage::MailFrom)?;
        tracing::debug!(%host, state = ?DialogueState::SenderDeclared);

        let rcpt = session
            .command(&format!("RCPT TO:<{}>", self.target), Stage::RcptTo)
            .await?;
        tracing::debug!(%host, state = ?DialogueState::RecipientQueried, code = rcpt.code);
        if rcpt.is_mailbox_unavailable() {
            return Ok(DialogueState::MailboxUnavailable);
        }
        expect_positive(rcpt, Stage::RcptTo)?;
        Ok(DialogueState::Accepted)
    }
}

fn expect_positive(reply: SmtpReply, stage: Stage) -> Result<SmtpReply, SmtpError> {
    if reply.is_positive_completion() {
        Ok(reply)
    } else {
        Err(SmtpError::Rejected { stage, reply })
    }
}
