//! Incremental server-sent-event parser.
//!
//! Bytes arrive in arbitrary chunks from a single response body. The parser
//! decodes them as streaming UTF-8, reassembles lines, and groups lines into
//! `(event, data)` records terminated by a blank line.
//!
//! The last incomplete line of every chunk stays buffered until the next
//! chunk (or [`SseParser::finish`]) completes it, so records are emitted in
//! arrival order no matter where chunk boundaries fall.

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;

/// One complete server-sent-event record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SseRecord {
    /// Trimmed, non-empty event name.
    pub event: String,
    /// Data lines joined with `\n`. May be empty when the record carried a
    /// single `data:` line with no payload.
    pub data: String,
}

impl SseRecord {
    #[must_use]
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self { event: event.into(), data: data.into() }
    }
}

/// Line-buffering SSE parser for a single response body.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Trailing bytes of an incomplete UTF-8 sequence.
    pending_bytes: Vec<u8>,
    /// Decoded text after the last line break.
    buffer: String,
    event: Option<String>,
    data_lines: Vec<String>,
}

impl SseParser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk and return every record it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseRecord> {
        self.decode(chunk);

        let Some(last_break) = self.buffer.rfind('\n') else {
            return Vec::new();
        };
        let rest = self.buffer.split_off(last_break + 1);
        let complete = std::mem::replace(&mut self.buffer, rest);

        complete
            .split_terminator('\n')
            .filter_map(|line| self.process_line(strip_carriage_return(line)))
            .collect()
    }

    /// Flush the stream after the body ended.
    ///
    /// A non-blank unterminated line is processed as a final line, then one
    /// synthetic terminator closes any open record. The parser is empty
    /// afterwards, so calling this twice never yields the same record again.
    pub fn finish(&mut self) -> Option<SseRecord> {
        if !self.pending_bytes.is_empty() {
            let tail = String::from_utf8_lossy(&self.pending_bytes).into_owned();
            self.buffer.push_str(&tail);
            self.pending_bytes.clear();
        }

        let remaining = std::mem::take(&mut self.buffer);
        if !remaining.trim().is_empty() {
            // Only terminators emit, and a non-blank line is never one.
            let _ = self.process_line(strip_carriage_return(&remaining));
        }
        self.terminate()
    }

    /// True when an event name or data lines are waiting for a terminator.
    #[must_use]
    pub fn has_open_record(&self) -> bool {
        self.event.is_some() || !self.data_lines.is_empty()
    }

    fn decode(&mut self, chunk: &[u8]) {
        self.pending_bytes.extend_from_slice(chunk);

        let mut consumed = 0;
        while consumed < self.pending_bytes.len() {
            match std::str::from_utf8(&self.pending_bytes[consumed..]) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    consumed = self.pending_bytes.len();
                }
                Err(err) => {
                    let valid_end = consumed + err.valid_up_to();
                    self.buffer
                        .push_str(&String::from_utf8_lossy(&self.pending_bytes[consumed..valid_end]));
                    match err.error_len() {
                        Some(invalid_len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            consumed = valid_end + invalid_len;
                        }
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            consumed = valid_end;
                            break;
                        }
                    }
                }
            }
        }
        self.pending_bytes.drain(..consumed);
    }

    fn process_line(&mut self, line: &str) -> Option<SseRecord> {
        if line.trim().is_empty() {
            return self.terminate();
        }

        if let Some(name) = line.strip_prefix("event:") {
            let name = name.trim();
            self.event = (!name.is_empty()).then(|| name.to_owned());
        } else if let Some(payload) = line.strip_prefix("data:") {
            let payload = payload.strip_prefix(' ').unwrap_or(payload);
            self.data_lines.push(payload.to_owned());
        }
        // Comments (`:`) and other fields (`id:`, `retry:`) carry nothing we use.
        None
    }

    fn terminate(&mut self) -> Option<SseRecord> {
        let event = self.event.take();
        let data_lines = std::mem::take(&mut self.data_lines);
        match event {
            Some(event) if !data_lines.is_empty() => Some(SseRecord { event, data: data_lines.join("\n") }),
            _ => None,
        }
    }
}

fn strip_carriage_return(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}
