//! Attribution of edges to the transcripts whose paths traverse them.

use std::fmt::Display;
use std::str::FromStr;

use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use crate::data_structs::graph::{
    Edge,
    EdgeId,
    TranscriptTable,
};
use crate::data_structs::typedef::ChromStr;
use crate::data_structs::EdgeKind;
use crate::error::Result;
use crate::tools::novelty::{
    ClassifiedEdge,
    Novelty,
};

/// Sentinel written for edges no transcript claims.
pub const ANTISENSE: &str = "antisense";

/// Transcripts traversing an edge, in transcript table order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TidAssignment {
    Transcripts(Vec<ChromStr>),
    /// No transcript of the table traverses the edge.
    Antisense,
}

impl TidAssignment {
    pub fn is_antisense(&self) -> bool {
        matches!(self, TidAssignment::Antisense)
    }

    pub fn tids(&self) -> &[ChromStr] {
        match self {
            TidAssignment::Transcripts(tids) => tids,
            TidAssignment::Antisense => &[],
        }
    }
}

impl Display for TidAssignment {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            TidAssignment::Transcripts(tids) => {
                write!(f, "{}", tids.iter().join(","))
            },
            TidAssignment::Antisense => write!(f, "{}", ANTISENSE),
        }
    }
}

/// A classified edge with its transcript attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributedEdge {
    pub edge:    Edge,
    pub novelty: Novelty,
    pub tids:    TidAssignment,
}

/// Maps vertex pairs of one edge kind to the transcripts traversing them.
///
/// The adjacency index is built once from the transcript paths, so each
/// lookup is a single hash probe. Pairs are directional: `(v1, v2)` never
/// matches a path stepping `v2 -> v1`.
#[derive(Debug)]
pub struct TranscriptAssigner<'a> {
    transcripts: &'a TranscriptTable,
    mode:        EdgeKind,
    adjacency:   HashMap<EdgeId, Vec<usize>>,
}

impl<'a> TranscriptAssigner<'a> {
    pub fn new(
        transcripts: &'a TranscriptTable,
        mode: EdgeKind,
    ) -> Self {
        let mut adjacency: HashMap<EdgeId, Vec<usize>> = HashMap::new();
        for (idx, transcript) in transcripts.iter().enumerate() {
            for edge_id in transcript.edges(mode) {
                let entry = adjacency.entry(edge_id).or_default();
                if entry.last() != Some(&idx) {
                    entry.push(idx);
                }
            }
        }
        debug!(
            "Indexed {} {} pairs of {} transcripts",
            adjacency.len(),
            mode,
            transcripts.len()
        );
        Self {
            transcripts,
            mode,
            adjacency,
        }
    }

    pub fn mode(&self) -> EdgeKind {
        self.mode
    }

    pub fn tids_for(
        &self,
        edge_id: EdgeId,
    ) -> TidAssignment {
        match self.adjacency.get(&edge_id) {
            Some(indices) if !indices.is_empty() => {
                let rows = self.transcripts.as_slice();
                TidAssignment::Transcripts(
                    indices
                        .iter()
                        .map(|idx| rows[*idx].tid.clone())
                        .unique()
                        .collect(),
                )
            },
            _ => TidAssignment::Antisense,
        }
    }

    pub fn assign(
        &self,
        edges: Vec<ClassifiedEdge>,
    ) -> Vec<AttributedEdge> {
        edges
            .into_iter()
            .map(|classified| {
                let tids = self.tids_for(classified.edge.edge_id);
                AttributedEdge {
                    edge: classified.edge,
                    novelty: classified.novelty,
                    tids,
                }
            })
            .collect()
    }
}

/// Attributes classified edges to transcripts, `mode` being `"exon"` or
/// `"intron"`.
pub fn assign_transcripts(
    edges: Vec<ClassifiedEdge>,
    transcripts: &TranscriptTable,
    mode: &str,
) -> Result<Vec<AttributedEdge>> {
    let mode = EdgeKind::from_str(mode)?;
    Ok(TranscriptAssigner::new(transcripts, mode).assign(edges))
}

#[cfg(test)]
mod tests {
    use rstest::{
        fixture,
        rstest,
    };

    use super::*;
    use crate::data_structs::annotation::{
        AnnotationGraphBuilder,
        TranscriptModel,
    };
    use crate::data_structs::graph::AnnotationGraph;
    use crate::data_structs::Strand;
    use crate::error::ErrorKind;
    use crate::tools::novelty::filter_by_kind;

    #[fixture]
    fn query() -> AnnotationGraph {
        let mut builder = AnnotationGraphBuilder::default();
        builder
            .extend([
                TranscriptModel::new("test1", "chr1", Strand::Forward, vec![(
                    1, 100,
                )]),
                TranscriptModel::new("test2", "chr1", Strand::Forward, vec![
                    (1, 100),
                    (900, 1000),
                ]),
                TranscriptModel::new("test3", "chr1", Strand::Reverse, vec![(
                    1, 100,
                )]),
            ])
            .unwrap();
        builder.finish()
    }

    fn unclassified(edges: Vec<Edge>) -> Vec<ClassifiedEdge> {
        edges
            .into_iter()
            .map(|edge| {
                ClassifiedEdge {
                    edge,
                    novelty: Novelty::default(),
                }
            })
            .collect()
    }

    #[rstest]
    fn test_exon_assignment(query: AnnotationGraph) {
        let edges = unclassified(filter_by_kind(query.edges.iter(), EdgeKind::Exon));
        let got = assign_transcripts(edges, &query.transcripts, "exon")
            .unwrap()
            .into_iter()
            .map(|e| (e.edge.start(), e.edge.stop(), e.tids.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(got, vec![
            (1, 100, "test1,test2".to_string()),
            (900, 1000, "test2".to_string()),
            (100, 1, "test3".to_string()),
        ]);
    }

    #[rstest]
    fn test_intron_assignment(query: AnnotationGraph) {
        let edges =
            unclassified(filter_by_kind(query.edges.iter(), EdgeKind::Intron));
        let got = assign_transcripts(edges, &query.transcripts, "intron").unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].edge.span.pair(), (100, 900));
        assert_eq!(got[0].tids.tids(), &[ChromStr::from("test2")]);
    }

    #[rstest]
    fn test_unclaimed_edge_is_antisense(query: AnnotationGraph) {
        let assigner = TranscriptAssigner::new(&query.transcripts, EdgeKind::Exon);
        let exon = query
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Exon && e.strand == Strand::Forward)
            .unwrap();
        let reversed = EdgeId::new(exon.edge_id.v2, exon.edge_id.v1);
        // direction matters, (100, 1) is only walked by test3
        assert_eq!(assigner.tids_for(reversed).to_string(), "test3");

        let intron = query
            .edges
            .iter()
            .find(|e| e.kind == EdgeKind::Intron)
            .unwrap();
        let got = assigner.tids_for(intron.edge_id);
        assert!(got.is_antisense());
        assert_eq!(got.to_string(), ANTISENSE);
    }

    #[rstest]
    fn test_assignment_is_idempotent(query: AnnotationGraph) {
        let edges = unclassified(query.edges.as_slice().to_vec());
        let assigner = TranscriptAssigner::new(&query.transcripts, EdgeKind::Exon);
        assert_eq!(assigner.assign(edges.clone()), assigner.assign(edges));
    }

    #[rstest]
    fn test_invalid_mode(query: AnnotationGraph) {
        let err = assign_transcripts(vec![], &query.transcripts, "gene").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMode);
    }
}
