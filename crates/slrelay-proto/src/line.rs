//! Line-based codec for tokio.
//!
//! Inbound records end with `\n`, optionally preceded by `\r`; both are
//! stripped before the line is handed out. Outbound records always end
//! with `\r\n`.
//!
//! Framing problems never end the stream. Bytes that are not UTF-8 are
//! replaced with U+FFFD, and a record over the limit is discarded up to its
//! terminator and reported as [`Inbound::TooLong`].

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{ProtocolError, Result};

/// Default line limit in bytes, terminator included.
pub const DEFAULT_MAX_LINE_LEN: usize = 512;

/// One decoded inbound record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A complete line with its terminator removed.
    Line(String),
    /// A record over the limit was dropped.
    TooLong {
        /// Bytes seen before the record was cut off.
        len: usize,
    },
}

/// Line-based codec that handles newline-terminated text records.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length, terminator included
    max_len: usize,
    /// Skipping the tail of an overlong record
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default 512-byte limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LINE_LEN)
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    /// The configured line limit.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Cut an outgoing record at its first embedded line ending so a single
    /// message can never smuggle a second record onto the wire.
    pub fn sanitize(mut data: String) -> String {
        if let Some(pos) = data.find(&['\r', '\n'][..]) {
            data.truncate(pos);
        }
        data
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = Inbound;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Inbound>> {
        if self.discarding {
            match src.iter().position(|b| *b == b'\n') {
                Some(offset) => {
                    src.advance(offset + 1);
                    self.discarding = false;
                    self.next_index = 0;
                }
                None => {
                    src.clear();
                    return Ok(None);
                }
            }
        }

        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let end = self.next_index + offset + 1;
            self.next_index = 0;

            if end > self.max_len {
                src.advance(end);
                return Ok(Some(Inbound::TooLong { len: end }));
            }

            let line = src.split_to(end);
            let mut body = &line[..line.len() - 1];
            if let Some(stripped) = body.strip_suffix(b"\r") {
                body = stripped;
            }

            Ok(Some(Inbound::Line(String::from_utf8_lossy(body).into_owned())))
        } else if src.len() > self.max_len {
            // No terminator within the limit: drop what we have and skip
            // the rest of the record when it arrives.
            let len = src.len();
            src.clear();
            self.next_index = 0;
            self.discarding = true;
            Ok(Some(Inbound::TooLong { len }))
        } else {
            // No complete line yet - remember where we stopped
            self.next_index = src.len();
            Ok(None)
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: String, dst: &mut BytesMut) -> Result<()> {
        let line = Self::sanitize(msg);
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
