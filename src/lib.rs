//! # splicegraph
//!
//! `splicegraph` is the annotation-comparison core of a long-read transcript
//! pipeline. It builds a splice graph (vertices, exon/intron edges and
//! transcript paths) from a GTF annotation or a SQLite annotation store,
//! classifies how novel the edges of a query annotation are with respect to
//! a reference, attributes every edge to the transcripts using it, and
//! partitions alignment records into independent genomic windows.
//!
//! Number of threads used by the parallel stages can be configured with the
//! `SPLICEGRAPH_NUM_THREADS` environment variable.
//!
//! ## Structure
//!
//! * [`data_structs`]: coordinates, graph tables, id allocation and the graph
//!   builder.
//! * [`io`]: GTF reader, annotation store, SAM alignment source and the
//!   novelty table writer.
//! * [`tools`]: edge filtering, novelty classification, transcript
//!   attribution and read partitioning.
//! * [`error`]: the [`SjError`] taxonomy.
//!
//! ## Usage
//!
//! ```no_run
//! use splicegraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let options = GtfReadOptions::default();
//!     let reference =
//!         AnnotationGraphBuilder::from_gtf_path("gencode.gtf", &options)?;
//!     let query = AnnotationGraphBuilder::from_gtf_path("sample.gtf", &options)?;
//!
//!     let introns = get_sjs(&query, &reference, "intron")?;
//!     write_sj_table(std::io::stdout(), &introns)?;
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use crate::data_structs::annotation::AnnotationGraphBuilder;
pub use crate::data_structs::graph::AnnotationGraph;
pub use crate::error::{
    Result,
    SjError,
};
pub use crate::tools::partition::partition_reads;
pub use crate::tools::sjs::get_sjs;
