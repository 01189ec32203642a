use thiserror::Error;
use tokio_util::sync::CancellationToken;
use trust_dns_resolver::TokioAsyncResolver;

use crate::classify::{Outcome, classify};
use crate::disposable::{DisposableDomains, domain_part};
use crate::mx::{self, LookupMx, MxStatus};
use crate::result::CheckResult;
use crate::smtp_verify::{
    Cutoff, Dialer, ProbeError, ProbeOptions, ProbeRequest, TcpDialer, probe_mailbox,
};
use crate::syntax::SyntaxChecker;

/// Diagnostic cause behind a [`CheckResult`]; never needed to interpret the
/// result itself.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Mx(#[from] mx::Error),
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Final report produced by [`Validator::check`].
#[derive(Debug)]
pub struct CheckReport {
    pub result: CheckResult,
    pub cause: Option<CheckError>,
    /// MX host the dialogue ran against.
    pub mx_host: Option<String>,
    pub transcript: Vec<String>,
}

impl CheckReport {
    fn new(outcome: Outcome, mx_host: Option<String>, transcript: Vec<String>) -> Self {
        let result = classify(&outcome);
        let cause = match outcome {
            Outcome::InvalidSyntax | Outcome::Disposable | Outcome::InvalidDomain(None) => None,
            Outcome::InvalidDomain(Some(err)) => Some(CheckError::Mx(err)),
            Outcome::Interrupted(err) => Some(CheckError::Probe(err)),
            Outcome::Probe(probe) => probe.into_cause().map(CheckError::Probe),
        };
        Self {
            result,
            cause,
            mx_host,
            transcript,
        }
    }

    fn short(outcome: Outcome) -> Self {
        Self::new(outcome, None, Vec::new())
    }
}

/// Deliverability checker. Owns everything a check needs, so it is built
/// once and shared; checks do not touch any global state.
pub struct Validator<R = TokioAsyncResolver, D = TcpDialer> {
    syntax: SyntaxChecker,
    disposable: DisposableDomains,
    resolver: R,
    dialer: D,
    options: ProbeOptions,
}

impl Validator {
    /// Production wiring: system DNS configuration and plain TCP.
    pub fn from_system_conf() -> Result<Self, mx::Error> {
        Ok(Self::new(mx::system_resolver()?, TcpDialer))
    }
}

impl<R, D> Validator<R, D>
where
    R: LookupMx,
    D: Dialer,
{
    pub fn new(resolver: R, dialer: D) -> Self {
        Self {
            syntax: SyntaxChecker::new(),
            disposable: DisposableDomains::builtin(),
            resolver,
            dialer,
            options: ProbeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_disposable(mut self, disposable: DisposableDomains) -> Self {
        self.disposable = disposable;
        self
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    pub fn check_syntax(&self, address: &str) -> bool {
        self.syntax.is_valid(address)
    }

    pub fn is_disposable(&self, address: &str) -> bool {
        self.disposable.is_disposable(address)
    }

    /// Checks `target`, announcing `from` as envelope sender. Bounded by
    /// [`ProbeOptions::timeout`].
    pub async fn check(&self, from: &str, target: &str) -> CheckReport {
        self.check_with_cancel(from, target, &CancellationToken::new())
            .await
    }

    /// Like [`check`](Self::check), but also stops as soon as `token` is
    /// cancelled. Syntax and disposable failures never touch the network.
    pub async fn check_with_cancel(
        &self,
        from: &str,
        target: &str,
        token: &CancellationToken,
    ) -> CheckReport {
        let report = self.run(from, target, token).await;
        tracing::info!(
            target_address = target,
            result = %report.result.state(),
            detail = %report.result.detail(),
            mx_host = report.mx_host.as_deref(),
            cause = report.cause.as_ref().map(tracing::field::display),
            "check done"
        );
        report
    }

    async fn run(&self, from: &str, target: &str, token: &CancellationToken) -> CheckReport {
        if !self.syntax.is_valid(target) {
            return CheckReport::short(Outcome::InvalidSyntax);
        }
        if self.disposable.is_disposable(target) {
            return CheckReport::short(Outcome::Disposable);
        }

        let cutoff = Cutoff::new(token.clone(), self.options.timeout);
        let records = match cutoff
            .guard(mx::resolve_mx(&self.resolver, domain_part(target)))
            .await
        {
            Ok(Ok(MxStatus::Records(records))) => records,
            Ok(Ok(MxStatus::NoRecords)) => {
                return CheckReport::short(Outcome::InvalidDomain(None));
            }
            Ok(Err(err)) => return CheckReport::short(Outcome::InvalidDomain(Some(err))),
            Err(interrupted) => return CheckReport::short(Outcome::Interrupted(interrupted)),
        };

        let helo = match cutoff.guard(self.helo_name(from)).await {
            Ok(helo) => helo,
            Err(interrupted) => return CheckReport::short(Outcome::Interrupted(interrupted)),
        };

        let request = ProbeRequest {
            from,
            target,
            helo: &helo,
        };
        let probe = probe_mailbox(&self.dialer, &self.options, &request, &records, &cutoff).await;
        CheckReport::new(
            Outcome::Probe(probe.outcome),
            probe.host,
            probe.transcript,
        )
    }

    /// Name announced in `EHLO`: the preferred MX exchange of the sender's
    /// domain, else the sender domain itself, else `localhost`.
    async fn helo_name(&self, from: &str) -> String {
        let domain = domain_part(from);
        match mx::resolve_mx(&self.resolver, domain).await {
            Ok(MxStatus::Records(records)) => {
                if let Some(first) = records.into_iter().next() {
                    return first.exchange;
                }
            }
            Ok(MxStatus::NoRecords) => {}
            Err(err) => {
                tracing::debug!(sender_domain = domain, error = %err, "sender MX lookup failed");
            }
        }
        match mx::normalize_domain(domain) {
            Ok(ascii) => ascii,
            Err(_) => "localhost".to_string(),
        }
    }
}
