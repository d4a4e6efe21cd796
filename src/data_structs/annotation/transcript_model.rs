use itertools::Itertools;

use crate::data_structs::coords::OrientedSpan;
use crate::data_structs::enums::Strand;
use crate::data_structs::typedef::{
    ChromStr,
    PosType,
};
use crate::error::{
    Result,
    SjError,
};

/// Structured annotation of one transcript, as produced by an annotation
/// reader: exon bounds in genomic order plus strand and chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    pub tid:     ChromStr,
    pub gene_id: Option<ChromStr>,
    pub chrom:   ChromStr,
    pub strand:  Strand,
    /// `(lo, hi)` genomic bounds of each exon, inclusive, any order.
    pub exons:   Vec<(PosType, PosType)>,
}

impl TranscriptModel {
    pub fn new(
        tid: impl Into<ChromStr>,
        chrom: impl Into<ChromStr>,
        strand: Strand,
        exons: Vec<(PosType, PosType)>,
    ) -> Self {
        Self {
            tid: tid.into(),
            gene_id: None,
            chrom: chrom.into(),
            strand,
            exons,
        }
    }

    pub fn with_gene_id(
        mut self,
        gene_id: Option<impl Into<ChromStr>>,
    ) -> Self {
        self.gene_id = gene_id.map(Into::into);
        self
    }

    /// Exons sorted along the direction of transcription, each oriented 5'
    /// to 3'.
    ///
    /// Fails if the transcript has no exons, no usable strand, an exon with
    /// reversed bounds, or exons that overlap or share a boundary.
    pub fn oriented_exons(&self) -> Result<Vec<OrientedSpan>> {
        if self.exons.is_empty() {
            return Err(SjError::validation(format!(
                "transcript '{}' on {} has no exons",
                self.tid, self.chrom
            )));
        }
        if !self.strand.is_stranded() {
            return Err(SjError::validation(format!(
                "transcript '{}' on {} has no strand",
                self.tid, self.chrom
            )));
        }
        if let Some((lo, hi)) = self.exons.iter().find(|(lo, hi)| lo > hi) {
            return Err(SjError::validation(format!(
                "transcript '{}' has exon {}:{}-{} with start after end",
                self.tid, self.chrom, lo, hi
            )));
        }

        let sorted = self.exons.iter().copied().sorted().collect_vec();
        if let Some(((_, prev_hi), (next_lo, _))) = sorted
            .iter()
            .tuple_windows()
            .find(|((_, prev_hi), (next_lo, _))| next_lo <= prev_hi)
        {
            return Err(SjError::validation(format!(
                "transcript '{}' has overlapping exons at {}:{}-{}",
                self.tid, self.chrom, next_lo, prev_hi
            )));
        }

        let oriented = sorted
            .into_iter()
            .map(|(lo, hi)| OrientedSpan::from_genomic(lo, hi, self.strand))
            .collect::<Result<Vec<_>>>()?;
        Ok(match self.strand {
            Strand::Reverse => oriented.into_iter().rev().collect(),
            _ => oriented,
        })
    }
}
