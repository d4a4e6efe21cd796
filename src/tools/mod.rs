//! Comparison and partitioning stages built on the splice graph tables.
//!
//! - [`novelty`]: restricting edges to one kind and classifying query edges
//!   against reference edges.
//! - [`assign`]: attributing edges to the transcripts that traverse them.
//! - [`partition`]: merging alignment spans into independent windows.
//! - [`sjs`]: the full query-versus-reference novelty table.

pub mod assign;
pub mod novelty;
pub mod partition;
pub mod sjs;
