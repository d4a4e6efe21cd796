//! Alignment sources for the read partitioner.
//!
//! A source is any iterator of `Result<AlignmentSpan>`. [`SamSpans`] adapts a
//! SAM file; in-memory vectors work just as well.

use std::fs::File;
use std::io::{
    self,
    BufRead,
    BufReader,
};
use std::path::Path;

use hashbrown::HashMap;
use log::debug;
use noodles::sam;
use noodles::sam::alignment::record::cigar::op::Kind;

use crate::data_structs::typedef::{
    ChromStr,
    PosType,
};
use crate::error::{
    Result,
    SjError,
};

/// Reference footprint of one aligned read, 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentSpan {
    pub query_name: String,
    pub chrom:      ChromStr,
    pub start:      PosType,
    pub end:        PosType,
}

impl AlignmentSpan {
    pub fn new(
        query_name: impl Into<String>,
        chrom: impl Into<ChromStr>,
        start: PosType,
        end: PosType,
    ) -> Self {
        Self {
            query_name: query_name.into(),
            chrom: chrom.into(),
            start,
            end,
        }
    }
}

/// Iterates the mapped records of a SAM stream as [`AlignmentSpan`]s.
///
/// Unmapped records are skipped and counted. A record whose flags,
/// reference, position or CIGAR cannot be decoded yields a
/// [`SjError::RecordDecode`] and iteration continues with the next one.
/// Any other read failure yields [`SjError::Io`] once and ends the iteration.
pub struct SamSpans<R> {
    reader:   sam::io::Reader<R>,
    record:   sam::Record,
    label:    String,
    chroms:   HashMap<String, ChromStr>,
    n_read:   usize,
    unmapped: usize,
    failed:   bool,
}

impl SamSpans<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::new(BufReader::new(file), path.display().to_string())
    }
}

impl<R: BufRead> SamSpans<R> {
    /// Wraps a SAM stream and consumes its header. `label` names the source
    /// in decode errors.
    pub fn new(
        inner: R,
        label: impl Into<String>,
    ) -> Result<Self> {
        let label = label.into();
        let mut reader = sam::io::Reader::new(inner);
        reader.read_header().map_err(|e| {
            SjError::record_decode(label.as_str(), "header", e.to_string())
        })?;
        Ok(Self {
            reader,
            record: sam::Record::default(),
            label,
            chroms: HashMap::new(),
            n_read: 0,
            unmapped: 0,
            failed: false,
        })
    }

    /// Number of unmapped records skipped so far.
    pub fn unmapped(&self) -> usize {
        self.unmapped
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn decode_error(
        &self,
        message: impl ToString,
    ) -> SjError {
        let record = match self.record.name() {
            Some(name) => format!("#{} ({})", self.n_read, name),
            None => format!("#{}", self.n_read),
        };
        SjError::record_decode(self.label.as_str(), record, message.to_string())
    }

    /// Error for a line that could not be split into fields. The reused
    /// record holds stale bounds at that point, so only the line number is
    /// reported.
    fn read_error(
        &mut self,
        err: io::Error,
    ) -> SjError {
        self.record = sam::Record::default();
        match err.kind() {
            io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
                SjError::record_decode(
                    self.label.as_str(),
                    format!("#{}", self.n_read),
                    err.to_string(),
                )
            },
            _ => {
                self.failed = true;
                SjError::Io(err)
            },
        }
    }

    fn intern(
        &mut self,
        chrom: &str,
    ) -> ChromStr {
        if let Some(interned) = self.chroms.get(chrom) {
            return interned.clone();
        }
        let interned = ChromStr::from(chrom);
        self.chroms.insert(chrom.to_string(), interned.clone());
        interned
    }

    /// `None` for unmapped records.
    fn decode(&mut self) -> Result<Option<AlignmentSpan>> {
        let flags = self
            .record
            .flags()
            .map_err(|e| self.decode_error(format!("invalid flags: {}", e)))?;
        if flags.is_unmapped() {
            return Ok(None);
        }

        let chrom = match self.record.reference_sequence_name() {
            Some(name) => name.to_string(),
            None => return Err(self.decode_error("missing reference sequence")),
        };
        let start = match self.record.alignment_start() {
            Some(Ok(position)) => position.get(),
            Some(Err(e)) => {
                return Err(self.decode_error(format!("invalid position: {}", e)))
            },
            None => return Err(self.decode_error("missing position")),
        };

        let mut ref_len = 0usize;
        for op in self.record.cigar().iter() {
            let op =
                op.map_err(|e| self.decode_error(format!("invalid CIGAR: {}", e)))?;
            match op.kind() {
                Kind::Match
                | Kind::SequenceMatch
                | Kind::SequenceMismatch
                | Kind::Deletion
                | Kind::Skip => ref_len += op.len(),
                _ => {},
            }
        }
        if ref_len == 0 {
            return Err(self.decode_error("CIGAR does not consume reference"));
        }

        let end = start + ref_len - 1;
        let (start, end) =
            match (PosType::try_from(start), PosType::try_from(end)) {
                (Ok(start), Ok(end)) => (start, end),
                _ => {
                    return Err(self.decode_error(format!(
                        "alignment {}-{} out of coordinate range",
                        start, end
                    )))
                },
            };
        let query_name = self
            .record
            .name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "*".to_string());
        let chrom = self.intern(&chrom);
        Ok(Some(AlignmentSpan {
            query_name,
            chrom,
            start,
            end,
        }))
    }
}

impl<R: BufRead> Iterator for SamSpans<R> {
    type Item = Result<AlignmentSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(0) => {
                    debug!(
                        "{}: read {} records, {} unmapped",
                        self.label, self.n_read, self.unmapped
                    );
                    return None;
                },
                Ok(_) => self.n_read += 1,
                Err(e) => {
                    self.n_read += 1;
                    return Some(Err(self.read_error(e)));
                },
            }
            match self.decode() {
                Ok(Some(span)) => return Some(Ok(span)),
                Ok(None) => self.unmapped += 1,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
