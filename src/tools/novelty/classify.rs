use hashbrown::{
    HashMap,
    HashSet,
};
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::data_structs::graph::Edge;
use crate::data_structs::typedef::{
    ChromStr,
    PosType,
};
use crate::data_structs::Strand;
use crate::utils::{
    n_threads,
    THREAD_POOL,
};

/// How a query edge relates to the reference edges on the same chromosome
/// and strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Novelty {
    /// Some reference edge starts at the same coordinate.
    pub start_known:       bool,
    /// Some reference edge stops at the same coordinate.
    pub stop_known:        bool,
    /// A single reference edge has the same `(start, stop)`.
    pub combination_known: bool,
}

impl Novelty {
    /// Neither end nor the pair is known.
    pub fn is_novel(&self) -> bool {
        !(self.start_known || self.stop_known || self.combination_known)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEdge {
    pub edge:    Edge,
    pub novelty: Novelty,
}

#[derive(Debug, Default)]
struct PartitionIndex {
    starts: HashSet<PosType>,
    stops:  HashSet<PosType>,
    pairs:  HashSet<(PosType, PosType)>,
}

/// Reference edges indexed by `(chrom, strand)`, then by start, stop and
/// `(start, stop)`.
///
/// Lookups are exact and strand-aware: an edge on the opposite strand never
/// matches, even at identical coordinates.
#[derive(Debug, Default)]
pub struct EdgeClassifier {
    index:       HashMap<(ChromStr, Strand), PartitionIndex>,
    n_reference: usize,
}

impl EdgeClassifier {
    pub fn new<'a, I>(reference: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>, {
        let mut index: HashMap<(ChromStr, Strand), PartitionIndex> =
            HashMap::new();
        let mut n_reference = 0;
        for edge in reference {
            let partition = index
                .entry((edge.chrom.clone(), edge.strand))
                .or_default();
            partition.starts.insert(edge.start());
            partition.stops.insert(edge.stop());
            partition.pairs.insert(edge.span.pair());
            n_reference += 1;
        }
        debug!(
            "Indexed {} reference edges in {} chromosome/strand partitions",
            n_reference,
            index.len()
        );
        Self { index, n_reference }
    }

    pub fn n_reference(&self) -> usize {
        self.n_reference
    }

    pub fn novelty(
        &self,
        edge: &Edge,
    ) -> Novelty {
        match self.index.get(&(edge.chrom.clone(), edge.strand)) {
            Some(partition) => {
                Novelty {
                    start_known:       partition.starts.contains(&edge.start()),
                    stop_known:        partition.stops.contains(&edge.stop()),
                    combination_known: partition
                        .pairs
                        .contains(&edge.span.pair()),
                }
            },
            None => Novelty::default(),
        }
    }

    /// Attaches novelty flags to every query edge. Runs on the shared
    /// thread pool; output order matches `query`.
    pub fn classify(
        &self,
        query: &[Edge],
    ) -> Vec<ClassifiedEdge> {
        debug!(
            "Classifying {} edges on {} threads",
            query.len(),
            n_threads()
        );
        THREAD_POOL.install(|| {
            query
                .par_iter()
                .map(|edge| {
                    ClassifiedEdge {
                        edge:    edge.clone(),
                        novelty: self.novelty(edge),
                    }
                })
                .collect()
        })
    }
}
