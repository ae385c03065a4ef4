//! Test client.
//!
//! Speaks raw protocol lines so tests can assert on exact wire output.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        // Split stream for reading and writing
        let (read_half, write_half) = stream.into_split();
        let reader = BufReader::new(read_half);
        let writer = BufWriter::new(write_half);

        Ok(Self {
            reader,
            writer,
            nick: nick.to_string(),
        })
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a raw line, adding `\r\n` if missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Send bytes exactly as given, with no terminator added.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line, terminator stripped.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. EOF is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed");
        }
        anyhow::ensure!(line.ends_with("\r\n"), "line not CRLF-terminated: {line:?}");
        Ok(line.trim_end_matches("\r\n").to_string())
    }

    /// Receive lines until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                break;
            }
        }
        Ok(lines)
    }

    /// Assert that nothing arrives within `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("{} unexpectedly received {line:?}", self.nick),
            Err(_) => Ok(()),
        }
    }

    /// True once the server has closed the connection.
    pub async fn is_closed(&mut self, dur: Duration) -> bool {
        let mut line = String::new();
        matches!(timeout(dur, self.reader.read_line(&mut line)).await, Ok(Ok(0)) | Ok(Err(_)))
    }

    /// Round-trip a PING so every line caused by earlier commands from this
    /// client has already been queued.
    pub async fn sync(&mut self) -> anyhow::Result<Vec<String>> {
        self.send_raw("PING :sync").await?;
        let mut lines = self.recv_until(|l| l.ends_with(" :sync") && l.starts_with("PONG ")).await?;
        lines.pop();
        Ok(lines)
    }

    /// Register with the server (USER + NICK) and return the welcome lines.
    pub async fn register(&mut self) -> anyhow::Result<Vec<String>> {
        let nick = self.nick.clone();
        self.send_raw(&format!("USER {nick} 0 {nick}.test :Test User {nick}")).await?;
        self.send_raw(&format!("NICK {nick}")).await?;

        let lines = self.recv_until(|l| l.contains(" 422 ") || l.contains(" 433 ")).await?;
        if lines.iter().any(|l| l.contains(" 001 ")) {
            Ok(lines)
        } else {
            anyhow::bail!("Registration failed: {lines:?}")
        }
    }

    /// Join a room and wait for the end of its member list.
    pub async fn join(&mut self, room: &str) -> anyhow::Result<Vec<String>> {
        self.send_raw(&format!("JOIN {room}")).await?;
        self.recv_until(|l| l.contains(" 366 ")).await
    }

    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PRIVMSG {target} :{text}")).await
    }

    pub async fn quit(&mut self) -> anyhow::Result<()> {
        self.send_raw("QUIT").await
    }
}
