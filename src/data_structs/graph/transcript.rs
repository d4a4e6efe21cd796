use hashbrown::HashMap;
use serde::Serialize;

use super::EdgeId;
use crate::data_structs::enums::{
    EdgeKind,
    Strand,
};
use crate::data_structs::typedef::{
    ChromStr,
    RowId,
    VertexId,
};
use crate::error::{
    Result,
    SjError,
};

/// A transcript as an ordered walk through the splice graph.
///
/// `path` lists vertex ids 5' to 3'. Consecutive pairs alternate between
/// exon and intron edges, starting (and ending) with an exon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub row_id:  RowId,
    pub tid:     ChromStr,
    pub gene_id: Option<ChromStr>,
    pub chrom:   ChromStr,
    pub strand:  Strand,
    pub path:    Vec<VertexId>,
}

impl Transcript {
    pub fn n_exons(&self) -> usize {
        self.path.len() / 2
    }

    /// Edges of the given kind traversed by this transcript, 5' to 3'.
    pub fn edges(
        &self,
        kind: EdgeKind,
    ) -> impl Iterator<Item = EdgeId> + '_ {
        self.path
            .windows(2)
            .skip(kind.path_offset())
            .step_by(2)
            .map(|pair| EdgeId::new(pair[0], pair[1]))
    }
}

/// Transcripts in insertion order, unique by name and by row id.
#[derive(Debug, Clone, Default)]
pub struct TranscriptTable {
    rows:     Vec<Transcript>,
    by_tid:   HashMap<ChromStr, usize>,
    by_rowid: HashMap<RowId, usize>,
}

impl TranscriptTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        transcript: Transcript,
    ) -> Result<()> {
        if self.by_tid.contains_key(&transcript.tid) {
            return Err(SjError::collision(format!(
                "duplicate transcript id '{}' on {}",
                transcript.tid, transcript.chrom
            )));
        }
        if self.by_rowid.contains_key(&transcript.row_id) {
            return Err(SjError::collision(format!(
                "transcript row id {} already assigned (transcript '{}')",
                transcript.row_id, transcript.tid
            )));
        }
        let idx = self.rows.len();
        self.by_tid.insert(transcript.tid.clone(), idx);
        self.by_rowid.insert(transcript.row_id, idx);
        self.rows.push(transcript);
        Ok(())
    }

    pub fn contains_tid(
        &self,
        tid: &str,
    ) -> bool {
        self.by_tid.contains_key(tid)
    }

    pub fn get(
        &self,
        tid: &str,
    ) -> Option<&Transcript> {
        self.by_tid.get(tid).map(|idx| &self.rows[*idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transcript> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Transcript] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
