use std::future::Future;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::timeout;

use super::error::SmtpError;
use super::types::{SmtpReply, Stage};

/// One SMTP client connection. Every read and write is bounded by
/// `command_timeout`, so a session can never hang on a silent server.
pub(crate) struct SmtpSession<S> {
    host: String,
    reader: BufReader<S>,
    command_timeout: Duration,
    transcript: Vec<String>,
}

impl<S> SmtpSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(host: impl Into<String>, stream: S, command_timeout: Duration) -> Self {
        Self {
            host: host.into(),
            reader: BufReader::new(stream),
            command_timeout,
            transcript: Vec::new(),
        }
    }

    pub(crate) fn host(&self) -> &str {
        &self.host
    }

    pub(crate) async fn read_banner(&mut self) -> Result<SmtpReply, SmtpError> {
        self.read_reply(Stage::Banner).await
    }

    /// Sends `command` and reads the reply to it.
    pub(crate) async fn command(
        &mut self,
        command: &str,
        stage: Stage,
    ) -> Result<SmtpReply, SmtpError> {
        self.record("C", command);
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        let stream = self.reader.get_mut();
        bounded(self.command_timeout, stage, async {
            stream.write_all(&line).await?;
            stream.flush().await
        })
        .await?;
        self.read_reply(stage).await
    }

    /// Sends `QUIT`, then shuts the socket down. The socket is released even
    /// when `QUIT` fails; the transcript is handed back to the caller.
    pub(crate) async fn close(mut self) -> Vec<String> {
        if let Err(err) = self.command("QUIT", Stage::Quit).await {
            tracing::warn!(host = %self.host, error = %err, "graceful QUIT failed");
        }
        let stream = self.reader.get_mut();
        if let Ok(Err(err)) = timeout(self.command_timeout, stream.shutdown()).await {
            tracing::debug!(host = %self.host, error = %err, "socket shutdown failed");
        }
        self.transcript
    }

    async fn read_reply(&mut self, stage: Stage) -> Result<SmtpReply, SmtpError> {
        let mut code = None;
        let mut message_lines = Vec::new();
        loop {
            let mut raw = String::new();
            let reader = &mut self.reader;
            let bytes = bounded(self.command_timeout, stage, reader.read_line(&mut raw)).await?;
            if bytes == 0 {
                return Err(SmtpError::Closed { stage });
            }
            let line = parse_reply_line(&raw).map_err(|detail| SmtpError::malformed(stage, detail))?;
            self.record("S", raw.trim_end_matches(['\r', '\n']));
            if let Some(existing) = code {
                if existing != line.code {
                    return Err(SmtpError::malformed(
                        stage,
                        format!("inconsistent reply codes: {existing} vs {}", line.code),
                    ));
                }
            } else {
                code = Some(line.code);
            }
            message_lines.push(line.text);
            if line.last {
                break;
            }
        }
        Ok(SmtpReply {
            code: code.ok_or_else(|| SmtpError::malformed(stage, "reply missing status code"))?,
            message: message_lines.join("\n"),
        })
    }

    fn record(&mut self, direction: &str, message: &str) {
        self.transcript
            .push(format!("[{}] {direction}: {message}", self.host));
    }
}

async fn bounded<T, F>(limit: Duration, stage: Stage, fut: F) -> Result<T, SmtpError>
where
    F: Future<Output = std::io::Result<T>>,
{
    match timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(SmtpError::io(stage, err)),
        Err(_) => Err(SmtpError::Timeout {
            stage,
            after: limit,
        }),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ReplyLine {
    code: u16,
    last: bool,
    text: String,
}

fn parse_reply_line(raw: &str) -> Result<ReplyLine, String> {
    let line = raw.trim_end_matches(['\r', '\n']);
    let code_part = line
        .get(..3)
        .ok_or_else(|| format!("invalid SMTP reply: '{line}'"))?;
    if !code_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid SMTP status code: '{code_part}'"));
    }
    let code = code_part
        .parse::<u16>()
        .map_err(|_| format!("invalid SMTP status code: '{code_part}'"))?;
    let last = match line.as_bytes().get(3) {
        None | Some(b' ') => true,
        Some(b'-') => false,
        Some(_) => return Err(format!("invalid SMTP reply separator: '{line}'")),
    };
    let text = line.get(4..).unwrap_or_default().to_string();
    Ok(ReplyLine { code, last, text })
}
