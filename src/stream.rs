//! Accumulation of streamed recipe text.
//!
//! The accumulator owns one growing buffer. Every chunk is appended and the
//! whole buffer is handed out again as an immutable [`Snapshot`], which
//! consumers re-parse from scratch.

use std::collections::VecDeque;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::model::Section;
use crate::parser;
use crate::GenerateError;

/// Producer side of a text stream: ordered chunks, `None` once done.
///
/// Chunks carry no alignment guarantee; a chunk may end mid-line or even in
/// the middle of a UTF-8 sequence.
#[async_trait]
pub trait ChunkSource: Send {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, GenerateError>;
}

/// Full text received so far, plus whether the stream has finished.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub text: String,
    /// Presentation hint only; parsing ignores it.
    pub complete: bool,
}

impl Snapshot {
    pub fn sections(&self) -> Vec<Section> {
        parser::parse_sections(&self.text)
    }

    pub fn title(&self) -> String {
        parser::extract_title(&self.text)
    }
}

/// Single-writer buffer that turns chunks into snapshots.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    buffer: String,
    /// Trailing bytes of an incomplete UTF-8 sequence.
    pending: Vec<u8>,
    complete: bool,
    chunks: usize,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw chunk bytes and return the new snapshot.
    pub fn push(&mut self, chunk: &[u8]) -> Snapshot {
        self.chunks += 1;
        self.pending.extend_from_slice(chunk);
        self.decode_pending();
        self.snapshot()
    }

    pub fn push_str(&mut self, chunk: &str) -> Snapshot {
        self.push(chunk.as_bytes())
    }

    /// Mark the stream done, flushing any dangling partial character.
    pub fn finish(&mut self) -> Snapshot {
        if !self.pending.is_empty() {
            self.buffer.push_str(&String::from_utf8_lossy(&self.pending));
            self.pending.clear();
        }
        self.complete = true;
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.buffer.clone(),
            complete: self.complete,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Number of chunks pushed so far.
    pub fn chunks(&self) -> usize {
        self.chunks
    }

    fn decode_pending(&mut self) {
        let mut start = 0;
        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    self.buffer.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    // valid_up_to guarantees this range is UTF-8
                    if let Ok(valid) = std::str::from_utf8(&self.pending[start..valid_end]) {
                        self.buffer.push_str(valid);
                    }
                    match e.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        None => {
                            // incomplete sequence at the end, wait for more bytes
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }
        self.pending.drain(..start);
    }
}

/// How a driven stream ended.
#[derive(Debug)]
pub struct StreamOutcome {
    /// Everything received; `complete` is false if the stream broke off.
    pub snapshot: Snapshot,
    pub error: Option<GenerateError>,
}

impl StreamOutcome {
    pub fn is_complete(&self) -> bool {
        self.snapshot.complete
    }
}

/// Drain `source` into an accumulator, reporting a snapshot after every chunk
/// and once more when the stream completes.
///
/// A transport error stops the loop but keeps all text received so far.
pub async fn accumulate<S, F>(source: &mut S, mut on_update: F) -> StreamOutcome
where
    S: ChunkSource + ?Sized,
    F: FnMut(&Snapshot),
{
    let mut accumulator = StreamAccumulator::new();

    loop {
        match source.next_chunk().await {
            Ok(Some(chunk)) => {
                let snapshot = accumulator.push(&chunk);
                debug!(
                    "chunk {}: {} bytes, buffer now {} bytes",
                    accumulator.chunks(),
                    chunk.len(),
                    snapshot.text.len()
                );
                on_update(&snapshot);
            }
            Ok(None) => {
                let snapshot = accumulator.finish();
                info!(
                    "Stream complete after {} chunks ({} bytes)",
                    accumulator.chunks(),
                    snapshot.text.len()
                );
                on_update(&snapshot);
                return StreamOutcome {
                    snapshot,
                    error: None,
                };
            }
            Err(e) => {
                warn!(
                    "Stream interrupted after {} chunks: {}",
                    accumulator.chunks(),
                    e
                );
                return StreamOutcome {
                    snapshot: accumulator.snapshot(),
                    error: Some(e),
                };
            }
        }
    }
}

/// Replays pre-recorded chunks, e.g. a saved response or a test fixture.
#[derive(Debug, Default)]
pub struct ReplaySource {
    chunks: VecDeque<Vec<u8>>,
}

impl ReplaySource {
    pub fn new<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Vec<u8>>,
    {
        ReplaySource {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }

    /// Split `text` into chunks of at most `chunk_bytes` bytes, ignoring
    /// character boundaries the way a network transport would.
    pub fn from_text(text: &str, chunk_bytes: usize) -> Self {
        let chunk_bytes = chunk_bytes.max(1);
        Self::new(text.as_bytes().chunks(chunk_bytes).map(<[u8]>::to_vec))
    }
}

#[async_trait]
impl ChunkSource for ReplaySource {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, GenerateError> {
        Ok(self.chunks.pop_front())
    }
}
