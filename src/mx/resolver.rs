use std::future::Future;

use trust_dns_resolver::{
    TokioAsyncResolver,
    error::{ResolveError, ResolveErrorKind},
};

use super::{Error, MxRecord, MxStatus};

/// Asynchronous MX lookup. Implemented for the trust-dns resolver; tests
/// provide stubs.
pub trait LookupMx: Send + Sync {
    /// Returns the records in resolver order. "No records" must be reported
    /// as an empty list.
    fn lookup_mx(
        &self,
        domain: &str,
    ) -> impl Future<Output = Result<Vec<MxRecord>, ResolveError>> + Send;
}

impl LookupMx for TokioAsyncResolver {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        let lookup = match self.mx_lookup(domain).await {
            Ok(lookup) => lookup,
            Err(err) if is_no_records(&err) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        Ok(lookup
            .iter()
            .map(|mx| {
                let exchange = normalize_exchange(&mx.exchange().to_utf8());
                MxRecord::new(mx.preference(), exchange)
            })
            .collect())
    }
}

/// Resolver built from the host's `/etc/resolv.conf` (or platform
/// equivalent).
pub fn system_resolver() -> Result<TokioAsyncResolver, Error> {
    TokioAsyncResolver::tokio_from_system_conf().map_err(Error::resolver_init)
}

/// Lookup MX records for `domain` using the system resolver.
pub async fn check_mx(domain: &str) -> Result<MxStatus, Error> {
    let resolver = system_resolver()?;
    resolve_mx(&resolver, domain).await
}

/// Normalises `domain` via IDNA and queries `resolver`. Records with an
/// empty exchange are dropped; if none remain the domain has no MX.
pub async fn resolve_mx<R>(resolver: &R, domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx,
{
    let ascii = normalize_domain(domain)?;
    let mut records = resolver
        .lookup_mx(&ascii)
        .await
        .map_err(|err| Error::lookup(&ascii, err))?;
    // Null MX (RFC 7505, `0 .`) means the domain accepts no mail.
    records.retain(|record| !record.exchange.is_empty());

    tracing::debug!(domain = %ascii, count = records.len(), "MX lookup done");

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(Error::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

fn is_no_records(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}
