//! Known throw-away mail domains.
//!
//! The built-in list is a compile-time [`phf::Set`]; callers may extend it
//! once at start-up (for instance from a file) through
//! [`DisposableDomains::with_extra`]. Lookups never touch the network.

mod domains;

use std::collections::HashSet;

use domains::BUILTIN_DOMAINS;

#[derive(Debug, Clone, Default)]
pub struct DisposableDomains {
    extra: HashSet<String>,
}

impl DisposableDomains {
    /// Only the built-in list.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Built-in list plus `domains`. Entries are trimmed, lower-cased and
    /// stripped of a trailing dot; blank entries are ignored.
    pub fn with_extra<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = domains
            .into_iter()
            .map(|d| normalize(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { extra }
    }

    pub fn contains_domain(&self, domain: &str) -> bool {
        let domain = normalize(domain);
        BUILTIN_DOMAINS.contains(domain.as_str()) || self.extra.contains(&domain)
    }

    /// `true` if the domain part of `address` is a throw-away provider.
    pub fn is_disposable(&self, address: &str) -> bool {
        self.contains_domain(domain_part(address))
    }

    pub fn len(&self) -> usize {
        let extra_only = self
            .extra
            .iter()
            .filter(|d| !BUILTIN_DOMAINS.contains(d.as_str()))
            .count();
        BUILTIN_DOMAINS.len() + extra_only
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Checks `address` against the built-in list only.
pub fn is_disposable(address: &str) -> bool {
    BUILTIN_DOMAINS.contains(normalize(domain_part(address)).as_str())
}

/// Everything after the last `@`; the whole input when there is none.
pub(crate) fn domain_part(address: &str) -> &str {
    address
        .rsplit_once('@')
        .map_or(address, |(_, domain)| domain)
}

fn normalize(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}
