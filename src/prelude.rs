pub use crate::data_structs::annotation::{
    AnnotationGraphBuilder,
    TranscriptModel,
};
pub use crate::data_structs::coords::{
    Interval,
    OrientedSpan,
};
pub use crate::data_structs::graph::{
    AnnotationGraph,
    Edge,
    EdgeId,
    GraphIdCounters,
    Location,
    Transcript,
};
pub use crate::data_structs::typedef::*;
pub use crate::data_structs::{
    EdgeKind,
    Strand,
};
pub use crate::error::{
    ErrorKind,
    Result,
    SjError,
};
pub use crate::io::alignment::{
    AlignmentSpan,
    SamSpans,
};
pub use crate::io::gtf::GtfReadOptions;
pub use crate::io::report::{
    write_sj_table,
    SjTableWriter,
};
pub use crate::io::store::AnnotationStore;
pub use crate::tools::assign::{
    AttributedEdge,
    TidAssignment,
    TranscriptAssigner,
};
pub use crate::tools::novelty::{
    filter_edges,
    ClassifiedEdge,
    EdgeClassifier,
    Novelty,
};
pub use crate::tools::partition::{
    partition_reads,
    Partition,
    PartitionConfig,
    ReadGroup,
};
pub use crate::tools::sjs::get_sjs;
