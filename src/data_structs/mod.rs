//! Core data structures for splice graph comparison.
//!
//! - [`annotation`]: transcript models as read from an annotation and the
//!   [`AnnotationGraphBuilder`](annotation::AnnotationGraphBuilder) turning
//!   them into graph tables.
//! - [`coords`]: oriented edge spans and chromosome intervals.
//! - [`graph`]: the Location/Edge/Transcript tables and identifier
//!   allocation.
//! - [`Strand`] and [`EdgeKind`], used by every table.
//! - [`typedef`]: aliases for positions, ids and chromosome names.

pub mod annotation;
pub mod coords;
mod enums;
pub mod graph;
pub mod typedef;

pub use enums::{
    EdgeKind,
    Strand,
};
