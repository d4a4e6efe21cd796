use std::str::FromStr;

use crate::data_structs::graph::Edge;
use crate::data_structs::EdgeKind;
use crate::error::Result;

/// Keeps only edges of the kind named by `mode` (`"exon"` or `"intron"`).
///
/// Any other mode fails with [`SjError::InvalidMode`](crate::error::SjError::InvalidMode).
pub fn filter_edges<'a, I>(
    edges: I,
    mode: &str,
) -> Result<Vec<Edge>>
where
    I: IntoIterator<Item = &'a Edge>, {
    let kind = EdgeKind::from_str(mode)?;
    Ok(filter_by_kind(edges, kind))
}

/// Edges of `kind`, unchanged and in input order.
pub fn filter_by_kind<'a, I>(
    edges: I,
    kind: EdgeKind,
) -> Vec<Edge>
where
    I: IntoIterator<Item = &'a Edge>, {
    edges
        .into_iter()
        .filter(|edge| edge.kind == kind)
        .cloned()
        .collect()
}
