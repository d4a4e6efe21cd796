use hashbrown::HashMap;
use serde::Serialize;

use crate::data_structs::typedef::{
    ChromStr,
    PosType,
    VertexId,
};
use crate::error::{
    Result,
    SjError,
};

/// A splice graph vertex: one unique genomic position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub chrom:     ChromStr,
    pub coord:     PosType,
    pub vertex_id: VertexId,
}

/// Vertices in insertion order, indexed both by id and by `(chrom, coord)`.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    rows:   Vec<Location>,
    by_id:  HashMap<VertexId, usize>,
    by_pos: HashMap<(ChromStr, PosType), usize>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex. Both the id and the position must be new.
    pub fn insert(
        &mut self,
        location: Location,
    ) -> Result<()> {
        if self.by_id.contains_key(&location.vertex_id) {
            return Err(SjError::collision(format!(
                "vertex id {} already assigned ({}:{})",
                location.vertex_id, location.chrom, location.coord
            )));
        }
        let key = (location.chrom.clone(), location.coord);
        if let Some(idx) = self.by_pos.get(&key) {
            return Err(SjError::collision(format!(
                "position {}:{} already has vertex {} (new id {})",
                location.chrom,
                location.coord,
                self.rows[*idx].vertex_id,
                location.vertex_id
            )));
        }
        let idx = self.rows.len();
        self.by_id.insert(location.vertex_id, idx);
        self.by_pos.insert(key, idx);
        self.rows.push(location);
        Ok(())
    }

    pub fn get(
        &self,
        vertex_id: VertexId,
    ) -> Option<&Location> {
        self.by_id.get(&vertex_id).map(|idx| &self.rows[*idx])
    }

    /// Vertex at `chrom:coord`, if any.
    pub fn lookup(
        &self,
        chrom: &ChromStr,
        coord: PosType,
    ) -> Option<&Location> {
        self.by_pos
            .get(&(chrom.clone(), coord))
            .map(|idx| &self.rows[*idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Location] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
