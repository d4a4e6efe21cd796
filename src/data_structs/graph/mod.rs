//! Splice graph tables.
//!
//! An [`AnnotationGraph`] bundles three tables:
//!
//! - [`LocationTable`]: one vertex per unique `(chrom, coord)`.
//! - [`EdgeTable`]: exon and intron edges between vertices, with coordinates
//!   oriented 5' to 3'.
//! - [`TranscriptTable`]: transcripts as vertex paths.
//!
//! Tables are append-only. Once built a graph is treated as read-only and
//! can be shared between worker threads.

mod edge;
mod ids;
mod location;
mod transcript;

pub use edge::{
    Edge,
    EdgeId,
    EdgeTable,
};
pub use ids::{
    GraphIdCounters,
    IdAllocator,
    IdRange,
    IdSource,
};
pub use location::{
    Location,
    LocationTable,
};
pub use transcript::{
    Transcript,
    TranscriptTable,
};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default)]
pub struct AnnotationGraph {
    pub locations:   LocationTable,
    pub edges:       EdgeTable,
    pub transcripts: TranscriptTable,
}

/// Table sizes at a point in time, see [`AnnotationGraph::rows_since`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableMark {
    locations:   usize,
    edges:       usize,
    transcripts: usize,
}

/// Rows appended to a graph after a [`TableMark`] was taken.
#[derive(Debug, Clone, Copy)]
pub struct GraphDelta<'a> {
    pub locations:   &'a [Location],
    pub edges:       &'a [Edge],
    pub transcripts: &'a [Transcript],
}

impl GraphDelta<'_> {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.edges.is_empty()
            && self.transcripts.is_empty()
    }
}

impl AnnotationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) -> TableMark {
        TableMark {
            locations:   self.locations.len(),
            edges:       self.edges.len(),
            transcripts: self.transcripts.len(),
        }
    }

    pub fn rows_since(
        &self,
        mark: TableMark,
    ) -> GraphDelta<'_> {
        GraphDelta {
            locations:   &self.locations.as_slice()[mark.locations..],
            edges:       &self.edges.as_slice()[mark.edges..],
            transcripts: &self.transcripts.as_slice()[mark.transcripts..],
        }
    }

    /// All rows of the graph.
    pub fn all_rows(&self) -> GraphDelta<'_> {
        self.rows_since(TableMark::default())
    }

    /// Largest vertex, edge and transcript ids in use, `0` for empty tables.
    pub fn max_ids(&self) -> (u64, u64, u64) {
        (
            self.locations
                .iter()
                .map(|l| l.vertex_id)
                .max()
                .unwrap_or(0),
            self.edges.iter().map(|e| e.row_id).max().unwrap_or(0),
            self.transcripts
                .iter()
                .map(|t| t.row_id)
                .max()
                .unwrap_or(0),
        )
    }

    /// Counters continuing after the largest ids already present.
    pub fn next_counters(&self) -> GraphIdCounters {
        let (vertex, edge, transcript) = self.max_ids();
        GraphIdCounters::after(vertex, edge, transcript)
    }
}
