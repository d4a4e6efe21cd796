use std::str::FromStr;

use hashbrown::HashMap;
use log::{
    debug,
    info,
};
use rusqlite::{
    params,
    OptionalExtension,
};

use super::schema::{
    EDGE_COUNTER,
    GENE_ID_ATTR,
    TRANSCRIPT_COUNTER,
    TRANSCRIPT_ID_ATTR,
    VERTEX_COUNTER,
};
use super::AnnotationStore;
use crate::data_structs::coords::OrientedSpan;
use crate::data_structs::graph::{
    AnnotationGraph,
    Edge,
    EdgeId,
    GraphIdCounters,
    Location,
    Transcript,
};
use crate::data_structs::typedef::{
    ChromStr,
    PosType,
    VertexId,
};
use crate::data_structs::{
    EdgeKind,
    Strand,
};
use crate::error::{
    Result,
    SjError,
};

struct TranscriptRow {
    transcript_id: i64,
    start_exon:    i64,
    jn_path:       Option<String>,
    start_vertex:  i64,
    end_vertex:    i64,
    n_exons:       i64,
    name:          Option<String>,
    gene:          Option<String>,
}

impl AnnotationStore {
    /// Reads the stored splice graph.
    ///
    /// With `build` set, only locations of that genome build are loaded and
    /// every edge or transcript must refer to them.
    pub fn read_graph(
        &self,
        build: Option<&str>,
    ) -> Result<AnnotationGraph> {
        let mut graph = AnnotationGraph::new();
        self.read_locations(&mut graph, build)?;
        self.read_edges(&mut graph)?;
        self.read_transcripts(&mut graph)?;
        info!(
            "Read annotation store (build {}): {} locations, {} edges, {} \
             transcripts",
            build.unwrap_or("*"),
            graph.locations.len(),
            graph.edges.len(),
            graph.transcripts.len()
        );
        Ok(graph)
    }

    /// Id counters continuing after everything already in the store.
    ///
    /// Uses the larger of the `counters` row and the largest id present in
    /// the corresponding table, so a stale counter never causes reuse.
    pub fn load_counters(&self) -> Result<GraphIdCounters> {
        let vertex = self.last_id(VERTEX_COUNTER, "location", "location_ID")?;
        let edge = self.last_id(EDGE_COUNTER, "edge", "edge_ID")?;
        let transcript =
            self.last_id(TRANSCRIPT_COUNTER, "transcripts", "transcript_ID")?;
        debug!(
            "Store counters: vertex {}, edge {}, transcript {}",
            vertex, edge, transcript
        );
        Ok(GraphIdCounters::after(vertex, edge, transcript))
    }

    fn last_id(
        &self,
        category: &str,
        table: &str,
        column: &str,
    ) -> Result<u64> {
        let counter: Option<i64> = self
            .conn
            .query_row(
                "SELECT count FROM counters WHERE category = ?1",
                params![category],
                |row| row.get(0),
            )
            .optional()?;
        let max_in_table: i64 = self.conn.query_row(
            &format!("SELECT COALESCE(MAX({}), 0) FROM {}", column, table),
            [],
            |row| row.get(0),
        )?;
        to_id(counter.unwrap_or(0).max(max_in_table), category)
    }

    fn read_locations(
        &self,
        graph: &mut AnnotationGraph,
        build: Option<&str>,
    ) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "SELECT location_ID, chromosome, position FROM location
             WHERE ?1 IS NULL OR genome_build = ?1
             ORDER BY location_ID",
        )?;
        let rows = stmt.query_map(params![build], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;

        let mut chroms: HashMap<String, ChromStr> = HashMap::new();
        for row in rows {
            let (vertex_id, chrom, position) = row?;
            let chrom = match chroms.get(&chrom) {
                Some(interned) => interned.clone(),
                None => {
                    let interned = ChromStr::from(chrom.as_str());
                    chroms.insert(chrom, interned.clone());
                    interned
                },
            };
            let coord = PosType::try_from(position).map_err(|_| {
                SjError::validation(format!(
                    "location {} has invalid position {}:{}",
                    vertex_id, chrom, position
                ))
            })?;
            graph.locations.insert(Location {
                chrom,
                coord,
                vertex_id: to_id(vertex_id, "location")?,
            })?;
        }
        Ok(())
    }

    fn read_edges(
        &self,
        graph: &mut AnnotationGraph,
    ) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "SELECT edge_ID, v1, v2, edge_type, strand FROM edge
             ORDER BY edge_ID",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        for row in rows {
            let (row_id, v1, v2, edge_type, strand) = row?;
            let row_id = to_id(row_id, "edge")?;
            let kind = EdgeKind::from_str(&edge_type).map_err(|_| {
                SjError::validation(format!(
                    "edge {} has unknown type '{}'",
                    row_id, edge_type
                ))
            })?;
            let strand = Strand::from_str(&strand).unwrap_or(Strand::None);
            if !strand.is_stranded() {
                return Err(SjError::validation(format!(
                    "edge {} has no strand",
                    row_id
                )));
            }

            let (v1, v2) = (to_id(v1, "vertex")?, to_id(v2, "vertex")?);
            let start = known_location(graph, v1, "edge", row_id)?;
            let stop = known_location(graph, v2, "edge", row_id)?;
            if start.chrom != stop.chrom {
                return Err(SjError::validation(format!(
                    "edge {} joins {}:{} and {}:{}",
                    row_id, start.chrom, start.coord, stop.chrom, stop.coord
                )));
            }
            let span = OrientedSpan::new(start.coord, stop.coord);
            if !span.agrees_with(strand) {
                return Err(SjError::validation(format!(
                    "edge {} at {}:{} is not oriented along strand {}",
                    row_id, start.chrom, span, strand
                )));
            }
            let chrom = start.chrom.clone();

            graph.edges.insert(Edge {
                edge_id: EdgeId::new(v1, v2),
                row_id,
                kind,
                strand,
                chrom,
                span,
            })?;
        }
        Ok(())
    }

    fn read_transcripts(
        &self,
        graph: &mut AnnotationGraph,
    ) -> Result<()> {
        let mut stmt = self.conn.prepare(
            "SELECT t.transcript_ID, t.start_exon, t.jn_path, t.start_vertex,
                    t.end_vertex, t.n_exons,
                    (SELECT value FROM transcript_annotations
                     WHERE ID = t.transcript_ID AND attribute = ?1 LIMIT 1),
                    (SELECT value FROM transcript_annotations
                     WHERE ID = t.transcript_ID AND attribute = ?2 LIMIT 1)
             FROM transcripts t
             ORDER BY t.transcript_ID",
        )?;
        let rows =
            stmt.query_map(params![TRANSCRIPT_ID_ATTR, GENE_ID_ATTR], |row| {
                Ok(TranscriptRow {
                    transcript_id: row.get(0)?,
                    start_exon:    row.get(1)?,
                    jn_path:       row.get(2)?,
                    start_vertex:  row.get(3)?,
                    end_vertex:    row.get(4)?,
                    n_exons:       row.get(5)?,
                    name:          row.get(6)?,
                    gene:          row.get(7)?,
                })
            })?;

        for row in rows {
            let transcript = transcript_from_row(graph, row?)?;
            graph.transcripts.insert(transcript)?;
        }
        Ok(())
    }
}

fn transcript_from_row(
    graph: &AnnotationGraph,
    row: TranscriptRow,
) -> Result<Transcript> {
    let row_id = to_id(row.transcript_id, "transcript")?;
    let tid = row
        .name
        .map(ChromStr::from)
        .unwrap_or_else(|| ChromStr::from(row_id.to_string()));

    let n_vertices = usize::try_from(row.n_exons)
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| n.checked_mul(2))
        .ok_or_else(|| {
            SjError::validation(format!(
                "transcript '{}' has invalid exon count {}",
                tid, row.n_exons
            ))
        })?;

    let mut path = Vec::new();
    path.push(to_id(row.start_vertex, "vertex")?);
    if let Some(jn_path) = row.jn_path.as_deref() {
        for vertex in jn_path.split(',').map(str::trim).filter(|v| !v.is_empty())
        {
            let vertex = vertex.parse::<VertexId>().map_err(|_| {
                SjError::validation(format!(
                    "transcript '{}' has malformed jn_path entry '{}'",
                    tid, vertex
                ))
            })?;
            path.push(vertex);
        }
    }
    path.push(to_id(row.end_vertex, "vertex")?);

    if path.len() != n_vertices {
        return Err(SjError::validation(format!(
            "transcript '{}' has {} path vertices for {} exons",
            tid,
            path.len(),
            row.n_exons
        )));
    }
    for vertex in path.iter() {
        known_location(graph, *vertex, "transcript", row_id)?;
    }
    let chrom = known_location(graph, path[0], "transcript", row_id)?
        .chrom
        .clone();

    let start_exon = to_id(row.start_exon, "edge")?;
    let strand = graph
        .edges
        .get_by_row_id(start_exon)
        .map(|e| e.strand)
        .ok_or_else(|| {
            SjError::validation(format!(
                "transcript '{}' starts with unknown exon edge {}",
                tid, start_exon
            ))
        })?;

    Ok(Transcript {
        row_id,
        tid,
        gene_id: row.gene.map(ChromStr::from),
        chrom,
        strand,
        path,
    })
}

fn known_location<'a>(
    graph: &'a AnnotationGraph,
    vertex_id: VertexId,
    table: &str,
    row_id: u64,
) -> Result<&'a Location> {
    graph.locations.get(vertex_id).ok_or_else(|| {
        SjError::validation(format!(
            "{} {} refers to unknown vertex {}",
            table, row_id, vertex_id
        ))
    })
}

fn to_id(
    value: i64,
    what: &str,
) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        SjError::validation(format!("negative {} id {}", what, value))
    })
}
