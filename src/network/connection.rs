//! Connection - Handles an individual client connection.
//!
//! Each connection runs two tasks:
//!
//! ```text
//!  socket ─▶ FramedRead<LineCodec> ─▶ DispatcherHandle::line
//!  socket ◀─ FramedWrite<LineCodec> ◀─ mpsc<Arc<Message>> ◀─ dispatcher
//! ```
//!
//! The writer is the only task that writes this socket. A line starting
//! with `QUIT` never reaches the dispatcher: the reader answers it by
//! closing the link. Oversized lines are dropped by the codec and answered
//! with a numeric; the connection stays up.

use super::DispatcherHandle;
use crate::config::LimitsConfig;
use futures_util::{SinkExt, StreamExt};
use slrelay_proto::{Command, CommandKind, Inbound, LineCodec, Message};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Span, debug, info, instrument, warn};

/// Why the read loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Quit,
    Eof,
    ReadError,
    WriteFailed,
}

/// A client connection handler.
pub struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    dispatcher: DispatcherHandle,
    limits: LimitsConfig,
}

impl Connection {
    pub fn new(stream: TcpStream, addr: SocketAddr, dispatcher: DispatcherHandle, limits: LimitsConfig) -> Self {
        Self {
            stream,
            addr,
            dispatcher,
            limits,
        }
    }

    /// Serve the connection until the peer quits or the link fails.
    #[instrument(skip(self), fields(addr = %self.addr, client = tracing::field::Empty), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        let (read_half, write_half) = self.stream.into_split();
        let mut reader = FramedRead::new(read_half, LineCodec::with_max_len(self.limits.max_line_len));
        let max_len = reader.decoder().max_len();
        let writer = FramedWrite::new(write_half, LineCodec::with_max_len(self.limits.max_line_len));

        let (tx, rx) = mpsc::channel(self.limits.send_queue);
        let client = self.dispatcher.connect(self.addr, tx).await?;
        Span::current().record("client", tracing::field::display(client));
        debug!("Connection registered");

        let mut writer_task = tokio::spawn(write_loop(writer, rx, self.limits.write_timeout()));
        let mut writer_done = false;

        let exit = loop {
            tokio::select! {
                frame = reader.next() => match frame {
                    Some(Ok(Inbound::TooLong { len })) => {
                        warn!(len, limit = max_len, "Input line too long - discarded");
                        if let Err(e) = self.dispatcher.oversized(client).await {
                            warn!(error = %e, "Dropping connection");
                            break Exit::ReadError;
                        }
                    }
                    Some(Ok(Inbound::Line(line))) => {
                        if is_quit(&line) {
                            break Exit::Quit;
                        }
                        debug!(line = %line, "Received");
                        if let Err(e) = self.dispatcher.line(client, line).await {
                            warn!(error = %e, "Dropping connection");
                            break Exit::ReadError;
                        }
                    }
                    Some(Err(e)) => {
                        warn!(error = %e, "Read error");
                        break Exit::ReadError;
                    }
                    None => break Exit::Eof,
                },
                result = &mut writer_task => {
                    writer_done = true;
                    match result {
                        Ok(Err(e)) => warn!(error = %e, "Write failed"),
                        Err(e) => warn!(error = %e, "Writer task failed"),
                        Ok(Ok(())) => {}
                    }
                    break Exit::WriteFailed;
                }
            }
        };

        let farewell = (exit == Exit::Quit).then(|| closing_link(self.addr));
        self.dispatcher.disconnect(client, farewell).await;

        // The writer drains whatever is queued and stops once the dispatcher
        // drops this client's sender.
        if !writer_done {
            match writer_task.await {
                Ok(Err(e)) => debug!(error = %e, "Write failed while closing"),
                Err(e) => warn!(error = %e, "Writer task failed"),
                Ok(Ok(())) => {}
            }
        }

        info!(reason = ?exit, "Connection closed");
        Ok(())
    }
}

/// Drain `rx` onto the socket, one flushed line at a time.
async fn write_loop(
    mut writer: FramedWrite<OwnedWriteHalf, LineCodec>,
    mut rx: mpsc::Receiver<Arc<Message>>,
    write_timeout: Duration,
) -> anyhow::Result<()> {
    while let Some(msg) = rx.recv().await {
        match tokio::time::timeout(write_timeout, writer.send(msg.to_string())).await {
            Ok(result) => result?,
            Err(_) => anyhow::bail!("write timed out after {write_timeout:?}"),
        }
    }
    Ok(())
}

/// True for a line whose command is `QUIT`, in any case.
fn is_quit(line: &str) -> bool {
    Command::parse(line).is_some_and(|cmd| cmd.kind == Some(CommandKind::Quit))
}

fn closing_link(addr: SocketAddr) -> Message {
    Message::new("ERROR").with_trailing(format!("Closing Link: {} (Client Quit)", addr.ip()))
}
