//! Partitioning of alignment records into independent genomic windows.
//!
//! Records from all sources are pooled, sorted by `(chrom, start)` and swept
//! once. A window stays open while the next record starts at or before its
//! current end, so overlapping and end-to-end touching spans always share a
//! window, and the resulting windows never overlap or touch each other.
//! Every window can then be processed on its own.

use bio::io::bed;
use log::{
    debug,
    info,
    warn,
};
use rayon::prelude::*;

use crate::data_structs::coords::Interval;
use crate::data_structs::typedef::ChromStr;
use crate::error::{
    ErrorKind,
    Result,
    SjError,
};
use crate::io::alignment::AlignmentSpan;
use crate::with_field_fn;

/// How malformed alignment records are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionConfig {
    /// Skip and count records that fail to decode instead of aborting.
    skip_malformed: bool,
    /// Abort once more than this many records were skipped.
    max_skipped:    Option<usize>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            skip_malformed: true,
            max_skipped:    None,
        }
    }
}

impl PartitionConfig {
    with_field_fn!(skip_malformed, bool);

    with_field_fn!(max_skipped, Option<usize>);

    /// Fails on the first malformed record.
    pub fn strict() -> Self {
        Self::default().with_skip_malformed(false)
    }

    pub fn skip_malformed(&self) -> bool {
        self.skip_malformed
    }

    pub fn max_skipped(&self) -> Option<usize> {
        self.max_skipped
    }
}

/// An alignment span tagged with its dataset and its position in the pooled
/// input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub span:    AlignmentSpan,
    pub dataset: ChromStr,
    /// Index in traversal order over all sources.
    pub order:   usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroup {
    pub interval: Interval,
    /// Members in traversal order.
    pub records:  Vec<AlignmentRecord>,
}

impl ReadGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Windows ordered by chromosome, then start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub groups:  Vec<ReadGroup>,
    /// Malformed records skipped while pooling.
    pub skipped: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn intervals(&self) -> impl Iterator<Item = &Interval> {
        self.groups.iter().map(|g| &g.interval)
    }

    /// Splits into `(read_groups, intervals)`, index-aligned.
    pub fn into_parts(self) -> (Vec<Vec<AlignmentRecord>>, Vec<Interval>) {
        self.groups
            .into_iter()
            .map(|g| (g.records, g.interval))
            .unzip()
    }

    /// Parallel iterator over the windows, for per-window fan-out.
    pub fn par_groups(&self) -> rayon::slice::Iter<'_, ReadGroup> {
        self.groups.par_iter()
    }

    pub fn to_bed_records(&self) -> Vec<bed::Record> {
        self.groups
            .iter()
            .map(|g| bed::Record::from(&g.interval))
            .collect()
    }
}

/// Pools alignment spans of several sources and merges them into windows.
///
/// `datasets` labels the sources one to one. Malformed records are handled
/// according to `config`; errors other than record decoding always abort.
pub fn partition_reads<S, D>(
    sources: Vec<S>,
    datasets: &[D],
    config: &PartitionConfig,
) -> Result<Partition>
where
    S: IntoIterator<Item = Result<AlignmentSpan>>,
    D: AsRef<str>, {
    if sources.len() != datasets.len() {
        return Err(SjError::validation(format!(
            "{} alignment sources but {} dataset labels",
            sources.len(),
            datasets.len()
        )));
    }

    let mut pooled = Vec::new();
    let mut skipped = 0usize;
    for (source, dataset) in sources.into_iter().zip(datasets.iter()) {
        let dataset = ChromStr::from(dataset.as_ref());
        let before = (pooled.len(), skipped);
        for item in source {
            let span = match item.and_then(checked) {
                Ok(span) => span,
                Err(err) => {
                    skip_or_fail(err, config, &mut skipped)?;
                    continue;
                },
            };
            pooled.push(AlignmentRecord {
                span,
                dataset: dataset.clone(),
                order: pooled.len(),
            });
        }
        debug!(
            "Dataset {}: {} records, {} skipped",
            dataset,
            pooled.len() - before.0,
            skipped - before.1
        );
    }

    let groups = sweep(pooled);
    info!(
        "Partitioned reads into {} windows ({} malformed records skipped)",
        groups.len(),
        skipped
    );
    Ok(Partition { groups, skipped })
}

fn checked(span: AlignmentSpan) -> Result<AlignmentSpan> {
    if span.start == 0 || span.start > span.end {
        return Err(SjError::record_decode(
            span.chrom.as_str(),
            span.query_name.as_str(),
            format!("invalid span {}-{}", span.start, span.end),
        ));
    }
    Ok(span)
}

fn skip_or_fail(
    err: SjError,
    config: &PartitionConfig,
    skipped: &mut usize,
) -> Result<()> {
    if err.kind() != ErrorKind::RecordDecode || !config.skip_malformed {
        return Err(err);
    }
    *skipped += 1;
    warn!("Skipping malformed record: {}", err);
    match config.max_skipped {
        Some(limit) if *skipped > limit => {
            Err(SjError::record_decode(
                "partition",
                format!("{} skipped", skipped),
                format!("more than {} malformed records", limit),
            ))
        },
        _ => Ok(()),
    }
}

fn sweep(mut records: Vec<AlignmentRecord>) -> Vec<ReadGroup> {
    // stable, so equal starts keep traversal order
    records.sort_by(|a, b| {
        (a.span.chrom.as_str(), a.span.start)
            .cmp(&(b.span.chrom.as_str(), b.span.start))
    });

    let mut groups: Vec<ReadGroup> = Vec::new();
    let mut current: Option<ReadGroup> = None;
    for record in records {
        match current.as_mut() {
            Some(group)
                if group
                    .interval
                    .reaches(record.span.chrom.as_str(), record.span.start) =>
            {
                group.interval.extend_to(record.span.end);
                group.records.push(record);
            },
            _ => {
                let interval = Interval::new(
                    record.span.chrom.clone(),
                    record.span.start,
                    record.span.end,
                );
                if let Some(done) = current.replace(ReadGroup {
                    interval,
                    records: vec![record],
                }) {
                    groups.push(done);
                }
            },
        }
    }
    groups.extend(current);

    for group in groups.iter_mut() {
        group.records.sort_by_key(|r| r.order);
    }
    groups
}
