//! In-process SMTP responder for end-to-end checks.
//!
//! Each [`FakeSmtpServer`] listens on `127.0.0.1:0`, accepts a single
//! connection and plays a fixed script: the banner first, then one
//! [`Action`] per command the client sends. Once the script runs out it
//! answers `QUIT` with 221 and everything else with 502.

mod resolver;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

pub use resolver::{LocalDialer, Zone};

/// What the server does after reading a command (or, for the banner, right
/// after accepting).
#[derive(Debug, Clone)]
pub enum Action {
    /// Reply lines, without the trailing CRLF.
    Reply(&'static str),
    /// Wait, then reply.
    Slow(Duration, &'static str),
    /// Close the connection without answering.
    Hangup,
}

pub struct FakeSmtpServer {
    addr: SocketAddr,
    session: JoinHandle<Vec<String>>,
}

impl FakeSmtpServer {
    pub async fn start(banner: Action, script: Vec<Action>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake SMTP listener");
        let addr = listener.local_addr().expect("listener address");
        let session = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            serve(stream, banner, script).await
        });
        Self { addr, session }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Commands received, in order, once the client has gone away.
    pub async fn received(self) -> Vec<String> {
        tokio::time::timeout(Duration::from_secs(5), self.session)
            .await
            .expect("client never closed the session")
            .expect("fake SMTP session panicked")
    }
}

/// A port nothing listens on.
pub async fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    listener.local_addr().expect("listener address").port()
}

async fn serve(stream: TcpStream, banner: Action, script: Vec<Action>) -> Vec<String> {
    let mut stream = BufReader::new(stream);
    let mut received = Vec::new();
    if !perform(&mut stream, &banner).await {
        return received;
    }

    let mut script = script.into_iter();
    loop {
        let mut line = String::new();
        match stream.read_line(&mut line).await {
            Ok(0) | Err(_) => return received,
            Ok(_) => {}
        }
        let command = line.trim_end().to_string();
        let is_quit = command.eq_ignore_ascii_case("QUIT");
        received.push(command);

        let action = match script.next() {
            Some(action) => action,
            None if is_quit => Action::Reply("221 2.0.0 Bye"),
            None => Action::Reply("502 5.5.2 Unexpected command"),
        };
        if !perform(&mut stream, &action).await || is_quit {
            return received;
        }
    }
}

/// Returns `false` once the connection is gone.
async fn perform(stream: &mut BufReader<TcpStream>, action: &Action) -> bool {
    let text = match action {
        Action::Reply(text) => text,
        Action::Slow(delay, text) => {
            tokio::time::sleep(*delay).await;
            text
        }
        Action::Hangup => return false,
    };
    let payload = format!("{}\r\n", text.replace('\n', "\r\n"));
    let out = stream.get_mut();
    out.write_all(payload.as_bytes()).await.is_ok() && out.flush().await.is_ok()
}
