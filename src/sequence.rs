//! Lazy, single-pass CSV record sequence

use crate::config::ParserConfig;
use crate::csv::{Dialect, Tokenizer};
use crate::error::{CsvError, Result};
use crate::header::Header;
use crate::line_source::LineSource;
use crate::record::Record;
use log::{debug, trace};
use std::io::Read;
use std::iter::FusedIterator;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing read yet; skipping, detection and header run on first pull
    Start,
    Streaming,
    Exhausted,
}

/// Forward-only sequence of CSV records
///
/// Reads from the source only when a record is requested, one line at a
/// time. On the first pull it discards `skip_lines` physical lines, samples
/// a few lines for dialect detection when `auto_detect` is on (those lines
/// are replayed, not lost) and reads the header row unless
/// `read_first_line` is set. Blank lines never produce records.
///
/// The source is dropped as soon as the end of input or a read error is
/// reached; dropping the sequence early releases it as well.
///
/// # Examples
///
/// ```
/// let records: Vec<_> = csvstream::parse("Letter,Word,Number\na,paris,5\nh,drink,60")
///     .collect::<Result<_, _>>()?;
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].get("Letter"), Some("a"));
/// assert_eq!(records[1].get("Number"), Some("60"));
/// # Ok::<(), csvstream::CsvError>(())
/// ```
///
/// # Peeking
///
/// ```
/// let mut records = csvstream::parse("id\n1\n");
///
/// assert!(records.has_next()?);
/// assert_eq!(records.next_record()?.get("id"), Some("1"));
/// assert!(!records.has_next()?);
/// assert!(records.next_record().unwrap_err().is_exhausted());
/// # Ok::<(), csvstream::CsvError>(())
/// ```
pub struct CsvSequence<R> {
    source: LineSource<R>,
    config: ParserConfig,
    state: State,
    tokenizer: Tokenizer,
    dialect: Dialect,
    header: Option<Arc<Header>>,
    peeked: Option<Record>,
    record_count: u64,
}

impl<R: Read> CsvSequence<R> {
    /// Create a sequence over a reader; nothing is read until the first pull
    pub fn new(reader: R, config: ParserConfig) -> Self {
        let dialect = config.dialect();
        Self {
            source: LineSource::new(reader),
            tokenizer: dialect.tokenizer(),
            dialect,
            config,
            state: State::Start,
            header: None,
            peeked: None,
            record_count: 0,
        }
    }

    /// Check if another record is available, without consuming it
    pub fn has_next(&mut self) -> Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.pull()?;
        }
        Ok(self.peeked.is_some())
    }

    /// Read the next record
    ///
    /// Returns `Ok(None)` once the input is exhausted, and keeps doing so.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let record = match self.peeked.take() {
            Some(record) => Some(record),
            None => self.pull()?,
        };
        if record.is_some() {
            self.record_count += 1;
        }
        Ok(record)
    }

    /// Read the next record, failing with [`CsvError::Exhausted`] at the end
    pub fn next_record(&mut self) -> Result<Record> {
        self.read_record()?.ok_or(CsvError::Exhausted)
    }

    /// Header row, reading it first if no record was requested yet
    ///
    /// `None` with `read_first_line` or when the input has no lines.
    pub fn headers(&mut self) -> Result<Option<&Header>> {
        self.ensure_started()?;
        Ok(self.header.as_deref())
    }

    /// Effective dialect, running detection first if needed
    pub fn dialect(&mut self) -> Result<Dialect> {
        self.ensure_started()?;
        Ok(self.dialect)
    }

    /// Number of records handed out so far
    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    /// Check if the end of input has been reached
    pub fn is_exhausted(&self) -> bool {
        self.state == State::Exhausted && self.peeked.is_none()
    }

    fn ensure_started(&mut self) -> Result<()> {
        if self.state == State::Start {
            if let Err(e) = self.start() {
                self.finish();
                return Err(e);
            }
        }
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        for _ in 0..self.config.skip_lines {
            match self.source.next_physical_line()? {
                Some(line) => trace!("Skipped line {}", line.number),
                None => break,
            }
        }

        if self.config.auto_detect {
            let sampled = self.source.prefetch(self.config.sample_lines)?;
            debug!("Sampled {} lines for dialect detection", sampled);
        }

        let dialect = self.config.resolve_dialect(self.source.buffered());
        ParserConfig::validate_dialect(&dialect)?;
        debug!(
            "Using separator {:?}, quote {:?}, escape {:?}",
            dialect.separator, dialect.quote_char, dialect.escape_char
        );
        self.dialect = dialect;
        self.tokenizer = dialect.tokenizer();

        if !self.config.read_first_line {
            if let Some(line) = self.source.next_line()? {
                let header = Header::from_fields(
                    self.tokenizer.parse_line(&line.text),
                    self.config.trim_whitespace_from_column_names,
                );
                debug!("Header on line {}: {:?}", line.number, header.names());
                self.header = Some(Arc::new(header));
            }
        }

        self.state = State::Streaming;
        Ok(())
    }

    fn pull(&mut self) -> Result<Option<Record>> {
        self.ensure_started()?;
        if self.state == State::Exhausted {
            return Ok(None);
        }

        match self.source.next_line() {
            Ok(Some(line)) => {
                let fields = self.tokenizer.parse_line(&line.text);
                trace!("Line {}: {} fields", line.number, fields.len());
                Ok(Some(Record::new(fields, self.header.clone(), line.number)))
            }
            Ok(None) => {
                self.finish();
                Ok(None)
            }
            Err(e) => {
                self.finish();
                Err(e)
            }
        }
    }

    fn finish(&mut self) {
        if self.state != State::Exhausted {
            debug!(
                "CSV sequence finished after {} lines",
                self.source.line_number()
            );
        }
        self.state = State::Exhausted;
        self.source.release();
    }
}

impl<R: Read> Iterator for CsvSequence<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

impl<R: Read> FusedIterator for CsvSequence<R> {}
