use std::collections::VecDeque;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Response;
use serde_json::Value;

use crate::stream::ChunkSource;
use crate::GenerateError;

/// Incremental Server-Sent-Events framing.
///
/// Bytes go in as they arrive; complete event payloads (the joined `data:`
/// lines of one event) come out.
#[derive(Debug, Default)]
pub struct SseDecoder {
    line: Vec<u8>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut events = Vec::new();
        for &byte in bytes {
            if byte == b'\n' {
                let line = std::mem::take(&mut self.line);
                self.handle_line(&line, &mut events);
            } else {
                self.line.push(byte);
            }
        }
        events
    }

    /// Dispatch whatever is buffered when the connection closes.
    pub fn finish(&mut self) -> Vec<String> {
        let mut events = Vec::new();
        if !self.line.is_empty() {
            let line = std::mem::take(&mut self.line);
            self.handle_line(&line, &mut events);
        }
        self.dispatch(&mut events);
        events
    }

    fn handle_line(&mut self, line: &[u8], events: &mut Vec<String>) {
        let decoded = String::from_utf8_lossy(line);
        let line = decoded.strip_suffix('\r').unwrap_or(&*decoded);

        if line.is_empty() {
            self.dispatch(events);
        } else if let Some(value) = line.strip_prefix("data:") {
            self.data
                .push(value.strip_prefix(' ').unwrap_or(value).to_string());
        }
        // comments (":") and other fields (event, id, retry) are not used
    }

    fn dispatch(&mut self, events: &mut Vec<String>) {
        if !self.data.is_empty() {
            events.push(self.data.join("\n"));
            self.data.clear();
        }
    }
}

/// Pulls the generated text out of one decoded provider event.
pub type TextExtractor = fn(&Value) -> Option<String>;

/// Adapts a streaming HTTP response into a [`ChunkSource`] of plain text.
pub struct SseTextStream {
    response: Response,
    decoder: SseDecoder,
    extract: TextExtractor,
    ready: VecDeque<String>,
    /// Error event seen mid-stream, reported once `ready` is drained.
    failed: Option<GenerateError>,
    done: bool,
}

impl SseTextStream {
    pub fn new(response: Response, extract: TextExtractor) -> Self {
        SseTextStream {
            response,
            decoder: SseDecoder::new(),
            extract,
            ready: VecDeque::new(),
            failed: None,
            done: false,
        }
    }

    fn take_events(&mut self, events: Vec<String>) {
        for payload in events {
            if payload == "[DONE]" {
                self.done = true;
                continue;
            }
            let value: Value = match serde_json::from_str(&payload) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Skipping malformed stream event: {}", e);
                    continue;
                }
            };
            if let Some(message) = value["error"]["message"].as_str() {
                self.failed = Some(GenerateError::ProviderError(message.to_string()));
                self.done = true;
                return;
            }
            match (self.extract)(&value) {
                Some(text) if !text.is_empty() => self.ready.push_back(text),
                _ => debug!("stream event without text: {}", payload),
            }
        }
    }
}

#[async_trait]
impl ChunkSource for SseTextStream {
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, GenerateError> {
        loop {
            if let Some(text) = self.ready.pop_front() {
                return Ok(Some(text.into_bytes()));
            }
            if let Some(e) = self.failed.take() {
                return Err(e);
            }
            if self.done {
                return Ok(None);
            }
            match self.response.chunk().await? {
                Some(bytes) => {
                    let events = self.decoder.push(&bytes);
                    self.take_events(events);
                }
                None => {
                    let events = self.decoder.finish();
                    self.take_events(events);
                    self.done = true;
                }
            }
        }
    }
}

/// Fail with the provider's own message on a non-success status.
pub async fn check_status(response: Response) -> Result<Response, GenerateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GenerateError::ProviderError(format!(
        "request failed with status {}: {}",
        status,
        body.trim()
    )))
}
