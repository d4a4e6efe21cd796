//! Edge filtering and novelty classification against a reference.

mod classify;
mod filter;

pub use classify::{
    ClassifiedEdge,
    EdgeClassifier,
    Novelty,
};
pub use filter::{
    filter_by_kind,
    filter_edges,
};

#[cfg(test)]
mod tests;
