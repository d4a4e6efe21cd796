//! Splice junction (and exon) novelty table of a query annotation.

use std::str::FromStr;

use log::info;

use crate::data_structs::graph::AnnotationGraph;
use crate::data_structs::EdgeKind;
use crate::error::Result;
use crate::tools::assign::{
    AttributedEdge,
    TranscriptAssigner,
};
use crate::tools::novelty::{
    filter_by_kind,
    EdgeClassifier,
};

/// Classifies the `mode` edges of `query` against those of `reference` and
/// attributes each to the query transcripts using it.
///
/// Rows follow the query's edge order.
pub fn get_sjs(
    query: &AnnotationGraph,
    reference: &AnnotationGraph,
    mode: &str,
) -> Result<Vec<AttributedEdge>> {
    let kind = EdgeKind::from_str(mode)?;
    let query_edges = filter_by_kind(query.edges.iter(), kind);
    let reference_edges = filter_by_kind(reference.edges.iter(), kind);

    let classifier = EdgeClassifier::new(&reference_edges);
    let classified = classifier.classify(&query_edges);
    let attributed =
        TranscriptAssigner::new(&query.transcripts, kind).assign(classified);

    info!(
        "Compared {} query {}s against {} reference {}s ({} novel)",
        attributed.len(),
        kind,
        reference_edges.len(),
        kind,
        attributed.iter().filter(|e| e.novelty.is_novel()).count()
    );
    Ok(attributed)
}
