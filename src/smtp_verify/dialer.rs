use std::future::Future;
use std::io;

use tokio::net::TcpStream;

/// Opens TCP connections to MX hosts.
pub trait Dialer: Send + Sync {
    fn dial(&self, host: &str, port: u16) -> impl Future<Output = io::Result<TcpStream>> + Send;
}

/// Plain `TcpStream::connect`; host names go through the system resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    async fn dial(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port)).await
    }
}
