use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::{
    ChromStr,
    PosType,
};

/// Genomic window on a single chromosome with inclusive bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    chrom: ChromStr,
    start: PosType,
    end:   PosType,
}

impl Interval {
    /// Creates a new `Interval`.
    pub fn new(
        chrom: ChromStr,
        start: PosType,
        end: PosType,
    ) -> Self {
        assert!(
            start <= end,
            "Start position must be less than or equal to end position"
        );
        Self { chrom, start, end }
    }

    /// Returns the chromosome name.
    pub fn chrom(&self) -> &ChromStr {
        &self.chrom
    }

    /// Returns the window start.
    pub fn start(&self) -> PosType {
        self.start
    }

    /// Returns the window end.
    pub fn end(&self) -> PosType {
        self.end
    }

    /// Number of bases covered.
    pub fn length(&self) -> PosType {
        self.end - self.start + 1
    }

    /// Grows the window so that it ends at least at `end`.
    pub fn extend_to(
        &mut self,
        end: PosType,
    ) {
        self.end = self.end.max(end);
    }

    /// Checks whether `[start, end]` on `chrom` lies fully inside the window.
    pub fn contains(
        &self,
        chrom: &str,
        start: PosType,
        end: PosType,
    ) -> bool {
        self.chrom.as_str() == chrom && start >= self.start && end <= self.end
    }

    /// Checks whether `[start, end]` overlaps or touches the window end.
    pub fn reaches(
        &self,
        chrom: &str,
        start: PosType,
    ) -> bool {
        self.chrom.as_str() == chrom && start <= self.end
    }

    pub fn as_tuple(&self) -> (&str, PosType, PosType) {
        (self.chrom.as_str(), self.start, self.end)
    }
}

impl PartialEq<(&str, PosType, PosType)> for Interval {
    fn eq(
        &self,
        other: &(&str, PosType, PosType),
    ) -> bool {
        self.as_tuple() == *other
    }
}

impl From<&Interval> for bio::io::bed::Record {
    /// Converts into a BED record. BED is 0-based half-open.
    fn from(value: &Interval) -> Self {
        let mut record = bio::io::bed::Record::new();
        record.set_chrom(value.chrom.as_str());
        record.set_start(value.start.saturating_sub(1) as u64);
        record.set_end(value.end as u64);
        record
    }
}

impl Display for Interval {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}
