use arcstr::ArcStr;

/// Genomic coordinate, 1-based.
pub type PosType = u32;
/// Identifier of a splice graph vertex (a unique `(chrom, coord)` location).
pub type VertexId = u64;
/// Numeric row identifier of an edge or transcript in the annotation store.
pub type RowId = u64;
/// Chromosome (sequence) name. Cheap to clone, shared between many rows.
pub type ChromStr = ArcStr;
