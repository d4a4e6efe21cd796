use rstest::{
    fixture,
    rstest,
};

use super::*;
use crate::data_structs::annotation::{
    AnnotationGraphBuilder,
    TranscriptModel,
};
use crate::data_structs::graph::{
    AnnotationGraph,
    Edge,
};
use crate::data_structs::{
    EdgeKind,
    Strand,
};
use crate::error::ErrorKind;

fn graph(models: Vec<TranscriptModel>) -> AnnotationGraph {
    let mut builder = AnnotationGraphBuilder::default();
    builder.extend(models).unwrap();
    builder.finish()
}

#[fixture]
fn reference() -> AnnotationGraph {
    graph(vec![TranscriptModel::new(
        "ENST01",
        "chr1",
        Strand::Forward,
        vec![(1, 100), (500, 600), (900, 1000)],
    )])
}

fn classify_one(
    reference: &AnnotationGraph,
    query: TranscriptModel,
    kind: EdgeKind,
) -> Vec<(u32, u32, Novelty)> {
    let query = graph(vec![query]);
    let classifier =
        EdgeClassifier::new(&filter_by_kind(reference.edges.iter(), kind));
    classifier
        .classify(&filter_by_kind(query.edges.iter(), kind))
        .into_iter()
        .map(|c| (c.edge.start(), c.edge.stop(), c.novelty))
        .collect()
}

fn novelty(
    start_known: bool,
    stop_known: bool,
    combination_known: bool,
) -> Novelty {
    Novelty {
        start_known,
        stop_known,
        combination_known,
    }
}

#[rstest]
#[case::nic(vec![(1, 100), (900, 1000)], (100, 900), novelty(true, true, false))]
#[case::novel_donor(vec![(1, 90), (900, 1000)], (90, 900), novelty(false, true, false))]
#[case::novel_acceptor(vec![(1, 100), (800, 1000)], (100, 800), novelty(true, false, false))]
#[case::known(vec![(1, 100), (500, 600)], (100, 500), novelty(true, true, true))]
fn test_intron_novelty(
    reference: AnnotationGraph,
    #[case] exons: Vec<(u32, u32)>,
    #[case] intron: (u32, u32),
    #[case] expected: Novelty,
) {
    let query = TranscriptModel::new("q", "chr1", Strand::Forward, exons);
    let got = classify_one(&reference, query, EdgeKind::Intron);
    assert_eq!(got, vec![(intron.0, intron.1, expected)]);
}

#[rstest]
#[case::known_start(vec![(1, 90)], novelty(true, false, false))]
#[case::known_stop(vec![(800, 1000)], novelty(false, true, false))]
#[case::known(vec![(500, 600)], novelty(true, true, true))]
#[case::novel(vec![(2000, 3000)], novelty(false, false, false))]
fn test_exon_novelty(
    reference: AnnotationGraph,
    #[case] exons: Vec<(u32, u32)>,
    #[case] expected: Novelty,
) {
    let query = TranscriptModel::new("q", "chr1", Strand::Forward, exons);
    let got = classify_one(&reference, query, EdgeKind::Exon);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].2, expected);
}

#[rstest]
fn test_opposite_strand_never_matches(reference: AnnotationGraph) {
    let query = TranscriptModel::new("as", "chr1", Strand::Reverse, vec![
        (500, 600),
        (1000, 1200),
    ]);
    let got = classify_one(&reference, query, EdgeKind::Intron);
    assert_eq!(got, vec![(1000, 600, Novelty::default())]);
    assert!(got[0].2.is_novel());

    // same coordinates, opposite strand, as exons
    let query = TranscriptModel::new("as", "chr1", Strand::Reverse, vec![(
        1, 100,
    )]);
    let got = classify_one(&reference, query, EdgeKind::Exon);
    assert_eq!(got, vec![(100, 1, Novelty::default())]);
}

#[rstest]
fn test_other_chromosome_never_matches(reference: AnnotationGraph) {
    let query = TranscriptModel::new("q", "chr2", Strand::Forward, vec![
        (1, 100),
        (500, 600),
    ]);
    let got = classify_one(&reference, query, EdgeKind::Intron);
    assert_eq!(got[0].2, Novelty::default());
}

#[rstest]
fn test_classification_is_ordered_and_idempotent(reference: AnnotationGraph) {
    let query = graph(vec![
        TranscriptModel::new("a", "chr1", Strand::Forward, vec![
            (1, 100),
            (500, 600),
            (800, 1000),
        ]),
        TranscriptModel::new("b", "chr1", Strand::Reverse, vec![
            (1, 100),
            (500, 600),
        ]),
    ]);
    let classifier = EdgeClassifier::new(reference.edges.iter());
    assert_eq!(classifier.n_reference(), 5);

    let first = classifier.classify(query.edges.as_slice());
    let second = classifier.classify(query.edges.as_slice());
    assert_eq!(first, second);
    let order = first.iter().map(|c| c.edge.row_id).collect::<Vec<_>>();
    let expected = query.edges.iter().map(|e| e.row_id).collect::<Vec<_>>();
    assert_eq!(order, expected);

    for classified in first {
        let n = classified.novelty;
        assert!(!n.combination_known || (n.start_known && n.stop_known));
    }
}

#[rstest]
fn test_filter_edges(reference: AnnotationGraph) {
    let introns = filter_edges(reference.edges.iter(), "intron").unwrap();
    assert_eq!(introns.len(), 2);
    assert!(introns.iter().all(|e| e.kind == EdgeKind::Intron));
    assert_eq!(
        introns.iter().map(Edge::start).collect::<Vec<_>>(),
        vec![100, 600]
    );

    let exons = filter_edges(reference.edges.iter(), "exon").unwrap();
    assert_eq!(exons.len(), 3);
    assert_eq!(exons[0], reference.edges.as_slice()[0]);
}

#[rstest]
#[case("Intron")]
#[case("junction")]
#[case("")]
fn test_filter_rejects_unknown_mode(
    reference: AnnotationGraph,
    #[case] mode: &str,
) {
    let err = filter_edges(reference.edges.iter(), mode).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidMode);
    assert!(err.to_string().contains(mode));
}
