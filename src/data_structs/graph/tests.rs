use std::collections::HashSet;
use std::sync::Arc;

use arcstr::ArcStr;
use rstest::{
    fixture,
    rstest,
};

use super::*;
use crate::data_structs::coords::OrientedSpan;
use crate::data_structs::{
    EdgeKind,
    Strand,
};
use crate::error::ErrorKind;

fn location(
    chrom: &str,
    coord: u32,
    vertex_id: u64,
) -> Location {
    Location {
        chrom: ArcStr::from(chrom),
        coord,
        vertex_id,
    }
}

fn edge(
    v1: u64,
    v2: u64,
    row_id: u64,
    kind: EdgeKind,
) -> Edge {
    Edge {
        edge_id: EdgeId::new(v1, v2),
        row_id,
        kind,
        strand: Strand::Forward,
        chrom: ArcStr::from("chr1"),
        span: OrientedSpan::new(v1 as u32 * 100, v2 as u32 * 100),
    }
}

#[fixture]
fn transcript() -> Transcript {
    Transcript {
        row_id:  1,
        tid:     ArcStr::from("ENST01"),
        gene_id: Some(ArcStr::from("ENSG01")),
        chrom:   ArcStr::from("chr1"),
        strand:  Strand::Forward,
        path:    vec![1, 2, 3, 4, 5, 6],
    }
}

#[test]
fn test_allocator_is_monotonic() {
    let allocator = IdAllocator::default();
    assert_eq!(allocator.next_id(), 1);
    assert_eq!(allocator.next_id(), 2);
    assert_eq!(allocator.last_issued(), 2);

    let mut range = allocator.reserve(3);
    assert_eq!(range.remaining(), 3);
    assert_eq!(allocator.next_id(), 6);
    assert_eq!(range.allocate(), Some(3));
    assert_eq!(range.allocate(), Some(4));
    assert_eq!(range.allocate(), Some(5));
    assert_eq!(range.allocate(), None);
}

#[test]
fn test_allocator_concurrent_ids_are_unique() {
    let allocator = Arc::new(IdAllocator::after(10));
    let handles = (0..4)
        .map(|_| {
            let allocator = allocator.clone();
            std::thread::spawn(move || {
                (0..250).map(|_| allocator.next_id()).collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();
    let ids = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), 1000);
    assert_eq!(ids.iter().min(), Some(&11));
    assert_eq!(ids.iter().max(), Some(&1010));
}

#[test]
fn test_reserved_source_exhaustion() {
    let counters = GraphIdCounters::default();
    let mut block = counters.reserve_block(1).unwrap();
    assert_eq!(block.vertex.allocate("vertex").unwrap(), 1);
    let err = block.vertex.allocate("vertex").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierCollision);

    // blocks cannot be split further
    assert!(block.reserve_block(1).is_err());

    // the shared counters continue after the reserved block
    let mut shared = counters.clone();
    assert_eq!(shared.vertex.allocate("vertex").unwrap(), 2);
}

#[test]
fn test_worker_blocks_are_disjoint() {
    let counters = GraphIdCounters::after(100, 0, 0);
    let mut a = counters.reserve_block(2).unwrap();
    let mut b = counters.reserve_block(2).unwrap();
    let from_a = [
        a.vertex.allocate("vertex").unwrap(),
        a.vertex.allocate("vertex").unwrap(),
    ];
    let from_b = [
        b.vertex.allocate("vertex").unwrap(),
        b.vertex.allocate("vertex").unwrap(),
    ];
    assert_eq!(from_a, [101, 102]);
    assert_eq!(from_b, [103, 104]);
}

#[test]
fn test_location_table_collisions() {
    let mut table = LocationTable::new();
    table.insert(location("chr1", 100, 1)).unwrap();
    table.insert(location("chr2", 100, 2)).unwrap();

    let err = table.insert(location("chr1", 200, 1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierCollision);
    let err = table.insert(location("chr1", 100, 3)).unwrap_err();
    assert!(err.to_string().contains("chr1:100"));

    assert_eq!(table.len(), 2);
    assert_eq!(
        table.lookup(&ArcStr::from("chr2"), 100).map(|l| l.vertex_id),
        Some(2)
    );
    assert_eq!(table.get(1).map(|l| l.coord), Some(100));
    assert!(table.lookup(&ArcStr::from("chr1"), 101).is_none());
}

#[test]
fn test_edge_table_keys_by_pair_and_kind() {
    let mut table = EdgeTable::new();
    table.insert(edge(1, 2, 1, EdgeKind::Exon)).unwrap();
    table.insert(edge(1, 2, 2, EdgeKind::Intron)).unwrap();

    let err = table.insert(edge(1, 2, 3, EdgeKind::Exon)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierCollision);
    let err = table.insert(edge(5, 6, 1, EdgeKind::Exon)).unwrap_err();
    assert!(err.to_string().contains("row id 1"));

    assert_eq!(
        table.get(EdgeId::new(1, 2), EdgeKind::Intron).map(|e| e.row_id),
        Some(2)
    );
    assert_eq!(table.len(), 2);
}

#[rstest]
fn test_transcript_edges(transcript: Transcript) {
    let exons = transcript.edges(EdgeKind::Exon).collect::<Vec<_>>();
    let introns = transcript.edges(EdgeKind::Intron).collect::<Vec<_>>();
    assert_eq!(exons, vec![
        EdgeId::new(1, 2),
        EdgeId::new(3, 4),
        EdgeId::new(5, 6)
    ]);
    assert_eq!(introns, vec![EdgeId::new(2, 3), EdgeId::new(4, 5)]);
    assert_eq!(transcript.n_exons(), 3);
}

#[rstest]
fn test_transcript_table_rejects_duplicate_tid(transcript: Transcript) {
    let mut table = TranscriptTable::new();
    table.insert(transcript.clone()).unwrap();
    let mut dup = transcript;
    dup.row_id = 2;
    let err = table.insert(dup).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierCollision);
    assert!(err.to_string().contains("ENST01"));
    assert!(table.contains_tid("ENST01"));
}

#[test]
fn test_graph_mark_and_delta() {
    let mut graph = AnnotationGraph::new();
    graph.locations.insert(location("chr1", 1, 1)).unwrap();
    let mark = graph.mark();
    graph.locations.insert(location("chr1", 2, 2)).unwrap();
    graph.edges.insert(edge(1, 2, 7, EdgeKind::Exon)).unwrap();

    let delta = graph.rows_since(mark);
    assert_eq!(delta.locations.len(), 1);
    assert_eq!(delta.locations[0].vertex_id, 2);
    assert_eq!(delta.edges.len(), 1);
    assert!(delta.transcripts.is_empty());
    assert!(graph.rows_since(graph.mark()).is_empty());

    assert_eq!(graph.max_ids(), (2, 7, 0));
    let mut counters = graph.next_counters();
    assert_eq!(counters.edge.allocate("edge").unwrap(), 8);
}
