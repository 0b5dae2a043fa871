//! Transport to the agent runtime
//!
//! Information Hiding:
//! - Process spawning, pipe handling and line framing hidden in `SubprocessTransport`
//! - Exit-status interpretation internalized; callers only see a message stream
//! - Alternate transports (scripted, remote) plug in behind the `Transport` trait

use crate::core::messages::SdkMessage;
use crate::core::options::QueryOptions;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use futures::Stream;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;
use std::task::{Context, Poll};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc::{channel, Receiver, Sender};
use tokio::task::JoinHandle;

/// Upper bound on the stderr tail carried into `ProcessFailed`.
const STDERR_TAIL_BYTES: usize = 4096;

/// Stream of messages from one agent run.
///
/// Ends after the runtime closes its output. A transport failure is
/// delivered as a final `Err` item.
pub struct MessageStream {
    receiver: Receiver<Result<SdkMessage>>,
}

impl MessageStream {
    pub fn new(receiver: Receiver<Result<SdkMessage>>) -> Self {
        Self { receiver }
    }
}

impl Stream for MessageStream {
    type Item = Result<SdkMessage>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Start a run of `prompt` and return its message stream.
    async fn connect(&self, prompt: &str, options: &QueryOptions) -> Result<MessageStream>;
}

/// Runs the agent CLI as a child process and reads stream-json from its stdout.
pub struct SubprocessTransport {
    cli_path: PathBuf,
    buffer_size: usize,
}

impl SubprocessTransport {
    pub fn new(cli_path: impl Into<PathBuf>) -> Self {
        Self {
            cli_path: cli_path.into(),
            buffer_size: 64,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }
}

#[async_trait]
impl Transport for SubprocessTransport {
    async fn connect(&self, prompt: &str, options: &QueryOptions) -> Result<MessageStream> {
        let args = options.to_cli_args(prompt);

        let mut command = Command::new(&self.cli_path);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref cwd) = options.cwd {
            command.current_dir(cwd);
        }

        tracing::debug!(
            cli = %self.cli_path.display(),
            args = args.len(),
            "Spawning agent CLI"
        );

        let mut child = command.spawn().map_err(|source| ResearchError::Spawn {
            path: self.cli_path.clone(),
            source,
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            ResearchError::Io(std::io::Error::other("agent CLI stdout was not captured"))
        })?;
        let stderr_task = child.stderr.take().map(|stderr| tokio::spawn(collect_stderr(stderr)));

        let (tx, rx) = channel(self.buffer_size);
        tokio::spawn(pump_messages(child, stdout, stderr_task, tx));

        Ok(MessageStream::new(rx))
    }
}

async fn pump_messages<R>(
    mut child: Child,
    stdout: R,
    stderr_task: Option<JoinHandle<String>>,
    tx: Sender<Result<SdkMessage>>,
) where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();
    let mut saw_result = false;

    loop {
        let line = match read_line_lossy(&mut reader, &mut buf).await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                let _ = tx.send(Err(ResearchError::Io(e))).await;
                return;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<SdkMessage>(line) {
            Ok(message) => {
                saw_result |= matches!(message, SdkMessage::Result(_));
                if tx.send(Ok(message)).await.is_err() {
                    tracing::debug!("Message stream dropped, stopping agent CLI");
                    return;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, line = %truncate_for_log(line), "Skipping non-message output");
            }
        }
    }

    let status = child.wait().await;
    let stderr = match stderr_task {
        Some(task) => task.await.unwrap_or_default(),
        None => String::new(),
    };

    let outcome = match status {
        Ok(status) if saw_result => {
            tracing::debug!(%status, "Agent CLI exited");
            None
        }
        Ok(status) if status.success() => Some(ResearchError::MissingResult),
        Ok(status) => Some(ResearchError::ProcessFailed {
            status: status.to_string(),
            stderr,
        }),
        Err(e) => Some(ResearchError::Io(e)),
    };

    if let Some(error) = outcome {
        tracing::error!("Agent run failed: {}", error);
        let _ = tx.send(Err(error)).await;
    }
}

async fn collect_stderr<R>(stderr: R) -> String
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    let mut tail = String::new();

    while let Ok(Some(line)) = read_line_lossy(&mut reader, &mut buf).await {
        let line = line.trim_end();
        tracing::debug!(target: "agent_cli", "{}", line);
        if !tail.is_empty() {
            tail.push('\n');
        }
        tail.push_str(line);
        if tail.len() > STDERR_TAIL_BYTES {
            let mut cut = tail.len() - STDERR_TAIL_BYTES;
            while !tail.is_char_boundary(cut) {
                cut += 1;
            }
            tail.drain(..cut);
        }
    }

    tail
}

/// Next newline-terminated line, with invalid UTF-8 replaced rather than
/// failing the read. `Ok(None)` at end of input.
async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

fn truncate_for_log(line: &str) -> String {
    const MAX: usize = 200;
    if line.chars().count() <= MAX {
        line.to_string()
    } else {
        format!("{}...", line.chars().take(MAX).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_missing_cli_is_spawn_error() {
        let transport = SubprocessTransport::new("/nonexistent/agent-cli-for-tests");
        let err = transport
            .connect("hi", &QueryOptions::new())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, ResearchError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/agent-cli-for-tests"));
    }

    #[tokio::test]
    async fn test_message_stream_yields_in_order() {
        let (tx, rx) = channel(4);
        tx.send(Ok(SdkMessage::Other {
            kind: "a".to_string(),
            subtype: None,
        }))
        .await
        .unwrap();
        tx.send(Err(ResearchError::MissingResult)).await.unwrap();
        drop(tx);

        let items: Vec<_> = MessageStream::new(rx).collect().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().kind(), "a");
        assert!(matches!(items[1], Err(ResearchError::MissingResult)));
    }

    #[tokio::test]
    async fn test_stderr_tail_is_bounded() {
        let input = "x".repeat(STDERR_TAIL_BYTES * 3);
        let tail = collect_stderr(input.as_bytes()).await;
        assert!(tail.len() <= STDERR_TAIL_BYTES);
    }

    #[tokio::test]
    async fn test_read_line_lossy_survives_invalid_utf8() {
        let input: &[u8] = b"bad \xff\xfe\n{\"type\":\"x\"}\nlast";
        let mut reader = BufReader::new(input);
        let mut buf = Vec::new();

        let first = read_line_lossy(&mut reader, &mut buf).await.unwrap().unwrap();
        assert!(first.starts_with("bad "));
        assert!(first.contains('\u{FFFD}'));

        let second = read_line_lossy(&mut reader, &mut buf).await.unwrap().unwrap();
        assert_eq!(second.trim(), "{\"type\":\"x\"}");

        let third = read_line_lossy(&mut reader, &mut buf).await.unwrap().unwrap();
        assert_eq!(third, "last");

        assert!(read_line_lossy(&mut reader, &mut buf).await.unwrap().is_none());
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short"), "short");
        let long = "é".repeat(300);
        assert!(truncate_for_log(&long).ends_with("..."));
    }
}
