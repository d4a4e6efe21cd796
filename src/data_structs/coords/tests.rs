use arcstr::ArcStr;
use rstest::rstest;

use super::*;
use crate::data_structs::Strand;
use crate::error::ErrorKind;

#[rstest]
#[case(Strand::Forward, (100, 500))]
#[case(Strand::Reverse, (500, 100))]
fn test_span_orientation(
    #[case] strand: Strand,
    #[case] expected: (u32, u32),
) {
    let span = OrientedSpan::from_genomic(100, 500, strand).unwrap();
    assert_eq!(span.pair(), expected);
    assert_eq!(span.genomic_bounds(), (100, 500));
    assert!(span.agrees_with(strand));
    assert!(!span.agrees_with(strand.opposite()));
}

#[test]
fn test_span_requires_strand() {
    let err = OrientedSpan::from_genomic(1, 10, Strand::None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_span_rejects_reversed_bounds() {
    assert!(OrientedSpan::from_genomic(10, 1, Strand::Forward).is_err());
}

#[test]
fn test_single_base_span_agrees_with_both_strands() {
    let span = OrientedSpan::new(42, 42);
    assert!(span.agrees_with(Strand::Forward));
    assert!(span.agrees_with(Strand::Reverse));
}

#[test]
fn test_interval_contains_and_reaches() {
    let mut interval = Interval::new(ArcStr::from("chr1"), 1, 500);
    assert!(interval.contains("chr1", 1, 500));
    assert!(!interval.contains("chr1", 400, 1000));
    assert!(!interval.contains("chr2", 1, 10));

    assert!(interval.reaches("chr1", 500));
    assert!(!interval.reaches("chr1", 501));

    interval.extend_to(1000);
    interval.extend_to(700);
    assert_eq!(interval, ("chr1", 1, 1000));
    assert_eq!(interval.length(), 1000);
    assert_eq!(interval.to_string(), "chr1:1-1000");
}

#[test]
#[should_panic]
fn test_interval_rejects_reversed_bounds() {
    Interval::new(ArcStr::from("chr1"), 10, 1);
}

#[test]
fn test_interval_to_bed() {
    let interval = Interval::new(ArcStr::from("chr2"), 1, 100);
    let record = bio::io::bed::Record::from(&interval);
    assert_eq!(record.chrom(), "chr2");
    assert_eq!(record.start(), 0);
    assert_eq!(record.end(), 100);
}
