//! Explicit identifier allocation for vertices, edges and transcripts.
//!
//! New identifiers must be globally unique and strictly increasing across a
//! run. Workers either share one [`IdAllocator`] (atomic, so concurrent
//! allocation is safe) or draw from disjoint [`IdRange`]s reserved up front.

use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::sync::Arc;

use crate::error::{
    Result,
    SjError,
};

/// Monotonic id counter. `next_id` never returns the same value twice.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdAllocator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Allocator whose first id follows `last_issued`.
    pub fn after(last_issued: u64) -> Self {
        Self::starting_at(last_issued + 1)
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Reserves `n` consecutive ids for exclusive use by one worker.
    pub fn reserve(
        &self,
        n: u64,
    ) -> IdRange {
        let start = self.next.fetch_add(n, Ordering::SeqCst);
        IdRange {
            next: start,
            end:  start + n,
        }
    }

    /// The id the next call to [`IdAllocator::next_id`] would return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }

    /// Largest id issued so far, `0` if none.
    pub fn last_issued(&self) -> u64 {
        self.peek().saturating_sub(1)
    }
}

/// Half-open block `[next, end)` of pre-reserved ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdRange {
    next: u64,
    end:  u64,
}

impl IdRange {
    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }

    pub fn allocate(&mut self) -> Option<u64> {
        if self.next < self.end {
            let id = self.next;
            self.next += 1;
            Some(id)
        }
        else {
            None
        }
    }
}

/// Where a builder draws new ids from.
#[derive(Debug, Clone)]
pub enum IdSource {
    Shared(Arc<IdAllocator>),
    Reserved(IdRange),
}

impl IdSource {
    pub fn allocate(
        &mut self,
        category: &str,
    ) -> Result<u64> {
        match self {
            IdSource::Shared(allocator) => Ok(allocator.next_id()),
            IdSource::Reserved(range) => {
                range.allocate().ok_or_else(|| {
                    SjError::collision(format!(
                        "reserved {} id range exhausted",
                        category
                    ))
                })
            },
        }
    }
}

impl From<Arc<IdAllocator>> for IdSource {
    fn from(value: Arc<IdAllocator>) -> Self {
        IdSource::Shared(value)
    }
}

impl From<IdRange> for IdSource {
    fn from(value: IdRange) -> Self {
        IdSource::Reserved(value)
    }
}

/// Id state owned by an [`AnnotationGraphBuilder`](crate::data_structs::annotation::AnnotationGraphBuilder).
#[derive(Debug, Clone)]
pub struct GraphIdCounters {
    pub vertex:     IdSource,
    pub edge:       IdSource,
    pub transcript: IdSource,
}

impl Default for GraphIdCounters {
    fn default() -> Self {
        Self::after(0, 0, 0)
    }
}

impl GraphIdCounters {
    /// Fresh shared counters continuing after the given last-issued ids.
    pub fn after(
        vertex: u64,
        edge: u64,
        transcript: u64,
    ) -> Self {
        Self {
            vertex:     Arc::new(IdAllocator::after(vertex)).into(),
            edge:       Arc::new(IdAllocator::after(edge)).into(),
            transcript: Arc::new(IdAllocator::after(transcript)).into(),
        }
    }

    /// Carves a per-worker block of `n` ids of each category out of these
    /// counters. Only shared counters can be split.
    pub fn reserve_block(
        &self,
        n: u64,
    ) -> Result<GraphIdCounters> {
        let carve = |source: &IdSource, category: &str| -> Result<IdSource> {
            match source {
                IdSource::Shared(allocator) => {
                    Ok(IdSource::Reserved(allocator.reserve(n)))
                },
                IdSource::Reserved(_) => {
                    Err(SjError::collision(format!(
                        "cannot sub-reserve {} ids from a reserved range",
                        category
                    )))
                },
            }
        };
        Ok(GraphIdCounters {
            vertex:     carve(&self.vertex, "vertex")?,
            edge:       carve(&self.edge, "edge")?,
            transcript: carve(&self.transcript, "transcript")?,
        })
    }
}
