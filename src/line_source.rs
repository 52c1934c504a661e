//! Incremental physical line reader with blank line skipping
//!
//! Lines are pulled one at a time with `BufRead::read_until`; the source is
//! never drained with `read_to_end` or `read_to_string`. A small replay queue
//! lets dialect detection look ahead at a bounded sample without losing it.

use crate::error::{CsvError, Result};
use log::trace;
use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read};

const BOM: char = '\u{feff}';

/// A physical line with its terminator removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based physical line number in the source
    pub number: u64,
    /// Line contents without `\n` / `\r\n`
    pub text: String,
}

impl Line {
    /// Check if the line is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Pulls lines from a reader on demand
///
/// The reader is dropped as soon as end of stream (or a read error) is
/// reached, so files and sockets are released without waiting for the
/// `LineSource` itself to go away.
pub struct LineSource<R> {
    reader: Option<BufReader<R>>,
    replay: VecDeque<Line>,
    buffer: Vec<u8>,
    line_number: u64,
}

impl<R: Read> LineSource<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(BufReader::new(reader)),
            replay: VecDeque::new(),
            buffer: Vec::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Next non-blank line, or `None` at end of stream
    ///
    /// Lines buffered by [`prefetch`](Self::prefetch) are returned first.
    pub fn next_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.replay.pop_front() {
            return Ok(Some(line));
        }
        self.read_non_blank()
    }

    /// Next physical line, blank or not
    pub fn next_physical_line(&mut self) -> Result<Option<Line>> {
        if let Some(line) = self.replay.pop_front() {
            return Ok(Some(line));
        }
        self.read_physical()
    }

    /// Buffer up to `count` non-blank lines for replay
    ///
    /// Returns how many lines are buffered, which is less than `count` only
    /// when the stream ended first.
    pub fn prefetch(&mut self, count: usize) -> Result<usize> {
        while self.replay.len() < count {
            match self.read_non_blank()? {
                Some(line) => self.replay.push_back(line),
                None => break,
            }
        }
        Ok(self.replay.len())
    }

    /// Text of the lines currently buffered for replay
    pub fn buffered(&self) -> impl Iterator<Item = &str> {
        self.replay.iter().map(|line| line.text.as_str())
    }

    /// Number of physical lines read from the underlying reader so far
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Check if the underlying reader has been released
    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }

    /// Drop the underlying reader and any buffered lines
    pub fn release(&mut self) {
        self.reader = None;
        self.replay.clear();
    }

    fn read_non_blank(&mut self) -> Result<Option<Line>> {
        while let Some(line) = self.read_physical()? {
            if line.is_blank() {
                trace!("Skipping blank line {}", line.number);
                continue;
            }
            return Ok(Some(line));
        }
        Ok(None)
    }

    fn read_physical(&mut self) -> Result<Option<Line>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        self.buffer.clear();
        let bytes_read = match reader.read_until(b'\n', &mut self.buffer) {
            Ok(n) => n,
            Err(e) => {
                self.reader = None;
                return Err(e.into());
            }
        };

        if bytes_read == 0 {
            trace!("End of stream after {} lines", self.line_number);
            self.reader = None;
            return Ok(None);
        }

        self.line_number += 1;

        if self.buffer.ends_with(b"\n") {
            self.buffer.pop();
            if self.buffer.ends_with(b"\r") {
                self.buffer.pop();
            }
        }

        // Decode in place so the buffer keeps its capacity for the next line
        let mut text = std::str::from_utf8(&self.buffer).map_err(|_| CsvError::Encoding {
            line: self.line_number,
        })?;

        if self.line_number == 1 {
            text = text.strip_prefix(BOM).unwrap_or(text);
        }
        let text = text.to_owned();

        Ok(Some(Line {
            number: self.line_number,
            text,
        }))
    }
}
