//! Readers and writers at the edges of the pipeline: GTF annotations, the
//! SQLite annotation store, SAM alignments and the novelty table.

pub mod alignment;
pub mod gtf;
pub mod report;
pub mod store;
