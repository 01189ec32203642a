//! DNS and TCP stand-ins: MX answers come from a fixed table and every
//! exchange name is routed to a local port.

use std::collections::HashMap;
use std::io;

use mailprobe::{Dialer, LookupMx, MxRecord};
use tokio::net::TcpStream;
use trust_dns_resolver::error::ResolveError;

#[derive(Debug, Default)]
pub struct Zone {
    records: HashMap<String, Vec<MxRecord>>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mx(mut self, domain: &str, preference: u16, exchange: &str) -> Self {
        self.records
            .entry(domain.to_string())
            .or_default()
            .push(MxRecord::new(preference, exchange));
        self
    }
}

impl LookupMx for Zone {
    async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, ResolveError> {
        Ok(self.records.get(domain).cloned().unwrap_or_default())
    }
}

/// Connects `host` to `127.0.0.1:<port>` when `host` is known, refuses
/// otherwise. The port from the probe options is ignored.
#[derive(Debug, Default)]
pub struct LocalDialer {
    ports: HashMap<String, u16>,
}

impl LocalDialer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, host: &str, port: u16) -> Self {
        self.ports.insert(host.to_string(), port);
        self
    }
}

impl Dialer for LocalDialer {
    async fn dial(&self, host: &str, _port: u16) -> io::Result<TcpStream> {
        match self.ports.get(host) {
            Some(port) => TcpStream::connect(("127.0.0.1", *port)).await,
            None => Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("no route to {host}"),
            )),
        }
    }
}
