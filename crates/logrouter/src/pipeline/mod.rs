//! Pipeline — reads input lines and drives decode → normalize → dispatch.
//!
//! Lines are handled one at a time, in input order. Per-line failures are
//! logged and counted; only a failure to read the input ends the run early.
//!
//! When the decoder has a line limit, at most that many bytes of a line are
//! buffered; the remainder of an oversized line is skipped unread.

mod stats;

pub use stats::PipelineStats;

use std::future::Future;
use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};
use tracing::{debug, error, info};

use crate::client::StructuredLogger;
use crate::dispatch::{dispatch, Dispatch};
use crate::parser::{DecodeError, FieldDecoder};
use crate::record::normalize;

pub struct Pipeline<'a> {
    decoder: Box<dyn FieldDecoder>,
    logger: &'a dyn StructuredLogger,
    stats: PipelineStats,
}

impl<'a> Pipeline<'a> {
    pub fn new(decoder: Box<dyn FieldDecoder>, logger: &'a dyn StructuredLogger) -> Self {
        Self {
            decoder,
            logger,
            stats: PipelineStats::default(),
        }
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Process every line of `reader` until end of input.
    pub async fn run<R>(&mut self, reader: R) -> io::Result<PipelineStats>
    where
        R: AsyncBufRead + Unpin,
    {
        self.run_until(reader, std::future::pending()).await
    }

    /// Like [`run`](Self::run), but stop reading once `shutdown` resolves.
    ///
    /// A line already being processed is finished first.
    pub async fn run_until<R, F>(&mut self, mut reader: R, shutdown: F) -> io::Result<PipelineStats>
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut buf = Vec::new();
        let limit = self.decoder.max_line_bytes();

        info!("Reading {} records from input", self.decoder.format());

        loop {
            buf.clear();
            let read = tokio::select! {
                read = read_line(&mut reader, &mut buf, limit) => read?,
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer reading input");
                    break;
                }
            };

            match read {
                ReadLine::Eof => {
                    debug!("End of input");
                    break;
                }
                ReadLine::Line => {
                    let line = String::from_utf8_lossy(strip_line_ending(&buf));
                    self.process_line(&line).await;
                }
                ReadLine::TooLong { len, limit } => {
                    self.stats.lines += 1;
                    self.decode_failed(DecodeError::LineTooLarge(len, limit));
                }
            }
        }

        info!("Pipeline finished: {}", self.stats);
        Ok(self.stats.clone())
    }

    /// Decode, normalize and dispatch a single line.
    pub async fn process_line(&mut self, line: &str) {
        self.stats.lines += 1;
        let line_no = self.stats.lines;

        let decoded = match self.decoder.decode(line) {
            Ok(decoded) => decoded,
            Err(e) => {
                self.decode_failed(e);
                return;
            }
        };

        match dispatch(self.logger, normalize(decoded)).await {
            Ok(Dispatch::Emitted(severity)) => {
                self.stats.emitted += 1;
                debug!(line = line_no, %severity, "Forwarded record");
            }
            Ok(Dispatch::Dropped(indicator)) => {
                self.stats.dropped += 1;
                debug!(line = line_no, ?indicator, "Dropped record without a recognized level");
            }
            Err(e) => {
                self.stats.send_failures += 1;
                error!(line = line_no, "Failed to send record: {}", e);
            }
        }
    }

    fn decode_failed(&mut self, e: DecodeError) {
        self.stats.decode_failures += 1;
        error!(line = self.stats.lines, format = %self.decoder.format(), "Failed to decode line: {}", e);
    }
}

enum ReadLine {
    Eof,
    Line,
    TooLong { len: usize, limit: usize },
}

/// Read one line into `buf`, keeping at most `limit` bytes plus a CRLF
/// terminator and one byte of overflow.
async fn read_line<R>(reader: &mut R, buf: &mut Vec<u8>, limit: Option<usize>) -> io::Result<ReadLine>
where
    R: AsyncBufRead + Unpin,
{
    let Some(limit) = limit else {
        return Ok(match reader.read_until(b'\n', buf).await? {
            0 => ReadLine::Eof,
            _ => ReadLine::Line,
        });
    };

    let cap = limit.saturating_add(2);
    let read = (&mut *reader).take(cap as u64).read_until(b'\n', buf).await?;
    if read == 0 {
        return Ok(ReadLine::Eof);
    }
    if read < cap || buf.ends_with(b"\n") {
        return Ok(ReadLine::Line);
    }

    let skipped = skip_line(reader).await?;
    Ok(ReadLine::TooLong {
        len: read.saturating_add(skipped),
        limit,
    })
}

/// Discard input up to and including the next `\n`. Returns the number of
/// bytes skipped before the newline.
async fn skip_line<R>(reader: &mut R) -> io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut skipped = 0usize;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(skipped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(skipped.saturating_add(end));
            }
            None => {
                let len = available.len();
                reader.consume(len);
                skipped = skipped.saturating_add(len);
            }
        }
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
