use std::path::PathBuf;

use itertools::Itertools;
use rstest::rstest;
use splicegraph::prelude::*;

fn toy_sam() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("toy_reads_for_partition_test.sam")
}

#[test]
fn test_partition_reads() {
    let source = SamSpans::from_path(toy_sam()).unwrap();
    let partition =
        partition_reads(vec![source], &["dataset1"], &PartitionConfig::default())
            .unwrap();
    assert_eq!(partition.skipped, 0);

    let (read_groups, intervals) = partition.into_parts();
    assert_eq!(read_groups.len(), 2);
    assert_eq!(
        read_groups[0]
            .iter()
            .map(|r| r.span.query_name.as_str())
            .collect_vec(),
        vec!["read_1", "read_2"]
    );
    assert_eq!(
        read_groups[1]
            .iter()
            .map(|r| r.span.query_name.as_str())
            .collect_vec(),
        vec!["read_3"]
    );
    assert_eq!(intervals[0], Interval::new("chr1".into(), 1, 1000));
    assert_eq!(intervals[1], Interval::new("chr2".into(), 1, 100));
}

#[test]
fn test_unmapped_records_are_counted() {
    let mut source = SamSpans::from_path(toy_sam()).unwrap();
    let spans = source.by_ref().collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(spans.len(), 3);
    assert_eq!(source.unmapped(), 1);

    // read_2 spans an N and read_3 a D operation
    assert_eq!((spans[1].start, spans[1].end), (400, 1000));
    assert_eq!((spans[2].start, spans[2].end), (1, 100));
}

#[rstest]
#[case::same_file_twice(2)]
#[case::single(1)]
fn test_datasets_are_pooled(#[case] n_sources: usize) {
    let sources = (0..n_sources)
        .map(|_| SamSpans::from_path(toy_sam()).unwrap())
        .collect_vec();
    let labels = (0..n_sources)
        .map(|i| format!("dataset{}", i + 1))
        .collect_vec();
    let partition =
        partition_reads(sources, &labels, &PartitionConfig::default()).unwrap();

    assert_eq!(partition.len(), 2);
    let first = &partition.groups[0];
    assert_eq!(first.len(), 2 * n_sources);
    // records stay in traversal order across datasets
    assert!(first.records.iter().map(|r| r.order).tuple_windows().all(|(a, b)| a < b));
    assert_eq!(
        first.records.iter().map(|r| r.dataset.as_str()).dedup().collect_vec(),
        labels.iter().map(String::as_str).collect_vec()
    );
}

#[test]
fn test_bed_output() {
    let source = SamSpans::from_path(toy_sam()).unwrap();
    let partition =
        partition_reads(vec![source], &["dataset1"], &PartitionConfig::default())
            .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("windows.bed");
    {
        let mut writer = bio::io::bed::Writer::to_file(&path).unwrap();
        for record in partition.to_bed_records() {
            writer.write(&record).unwrap();
        }
    }
    let written = std::fs::read_to_string(&path).unwrap();
    let lines = written.lines().collect_vec();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("chr1\t0\t1000"));
    assert!(lines[1].starts_with("chr2\t0\t100"));
}

#[test]
fn test_unsplittable_line_is_skipped() {
    let text = "@HD\tVN:1.6\n\
                @SQ\tSN:chr1\tLN:5000\n\
                read_000001\t0\tchr1\t1\t60\t10M\t*\t0\t0\t*\t*\n\
                x\n\
                r1\t0\tchr1\t5\t60\t10M\t*\t0\t0\t*\t*\n";
    let source =
        SamSpans::new(std::io::Cursor::new(text.as_bytes().to_vec()), "inline.sam")
            .unwrap();
    let partition =
        partition_reads(vec![source], &["dataset1"], &PartitionConfig::default())
            .unwrap();
    assert_eq!(partition.skipped, 1);
    assert_eq!(partition.len(), 1);
    assert_eq!(partition.groups[0].len(), 2);
}
