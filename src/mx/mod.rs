//! DNS MX resolution.
//!
//! [`resolve_mx`] normalises the domain, queries a [`LookupMx`]
//! implementation and returns a [`MxStatus`]. A missing MX entry is
//! `MxStatus::NoRecords`, not an error; any other resolver failure is an
//! [`Error`].

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{LookupMx, check_mx, resolve_mx, system_resolver};
pub use types::{MxRecord, MxStatus};

pub(crate) use resolver::normalize_domain;
