use std::fmt::Display;

use hashbrown::HashMap;
use serde::Serialize;

use crate::data_structs::coords::OrientedSpan;
use crate::data_structs::enums::{
    EdgeKind,
    Strand,
};
use crate::data_structs::typedef::{
    ChromStr,
    PosType,
    RowId,
    VertexId,
};
use crate::error::{
    Result,
    SjError,
};

/// Directed vertex pair identifying an edge, `v1` is the 5' end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeId {
    pub v1: VertexId,
    pub v2: VertexId,
}

impl EdgeId {
    pub fn new(
        v1: VertexId,
        v2: VertexId,
    ) -> Self {
        Self { v1, v2 }
    }
}

impl From<(VertexId, VertexId)> for EdgeId {
    fn from(value: (VertexId, VertexId)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl Display for EdgeId {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "({}, {})", self.v1, self.v2)
    }
}

/// An exon or intron of one or more transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub row_id:  RowId,
    pub kind:    EdgeKind,
    pub strand:  Strand,
    pub chrom:   ChromStr,
    pub span:    OrientedSpan,
}

impl Edge {
    /// 5' coordinate.
    pub fn start(&self) -> PosType {
        self.span.start()
    }

    /// 3' coordinate.
    pub fn stop(&self) -> PosType {
        self.span.stop()
    }
}

/// Edges in insertion order. An edge is unique by its vertex pair and kind:
/// the same pair may be an exon of one transcript and an intron of another.
#[derive(Debug, Clone, Default)]
pub struct EdgeTable {
    rows:     Vec<Edge>,
    by_key:   HashMap<(EdgeId, EdgeKind), usize>,
    by_rowid: HashMap<RowId, usize>,
}

impl EdgeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        edge: Edge,
    ) -> Result<()> {
        if let Some(idx) = self.by_key.get(&(edge.edge_id, edge.kind)) {
            let existing = &self.rows[*idx];
            return Err(SjError::collision(format!(
                "{} edge {} already present on {}:{} ({}), new row {}",
                edge.kind,
                edge.edge_id,
                existing.chrom,
                existing.span,
                existing.strand,
                edge.row_id
            )));
        }
        if self.by_rowid.contains_key(&edge.row_id) {
            return Err(SjError::collision(format!(
                "edge row id {} already assigned ({} {} on {})",
                edge.row_id, edge.kind, edge.edge_id, edge.chrom
            )));
        }
        let idx = self.rows.len();
        self.by_key.insert((edge.edge_id, edge.kind), idx);
        self.by_rowid.insert(edge.row_id, idx);
        self.rows.push(edge);
        Ok(())
    }

    pub fn get(
        &self,
        edge_id: EdgeId,
        kind: EdgeKind,
    ) -> Option<&Edge> {
        self.by_key.get(&(edge_id, kind)).map(|idx| &self.rows[*idx])
    }

    pub fn get_by_row_id(
        &self,
        row_id: RowId,
    ) -> Option<&Edge> {
        self.by_rowid.get(&row_id).map(|idx| &self.rows[*idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
