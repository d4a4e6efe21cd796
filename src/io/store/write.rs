use itertools::Itertools;
use log::{
    debug,
    info,
};
use rusqlite::{
    params,
    ErrorCode,
    OptionalExtension,
    Transaction,
};

use super::schema::{
    EDGE_COUNTER,
    GENE_ID_ATTR,
    TRANSCRIPT_COUNTER,
    TRANSCRIPT_ID_ATTR,
    VERTEX_COUNTER,
};
use super::AnnotationStore;
use crate::data_structs::graph::{
    GraphDelta,
    Transcript,
};
use crate::data_structs::typedef::VertexId;
use crate::data_structs::EdgeKind;
use crate::error::{
    Result,
    SjError,
};

const ANNOTATION_SOURCE: &str = "splicegraph";

impl AnnotationStore {
    /// Persists rows added to a graph, typically
    /// [`AnnotationGraph::rows_since`](crate::data_structs::graph::AnnotationGraph::rows_since).
    ///
    /// Locations are written under `build`, transcript names under
    /// `annot_name`. Everything happens in one transaction: on any error
    /// nothing is written. Ids already present in the store are rejected
    /// with an identifier collision.
    pub fn write_rows(
        &mut self,
        delta: GraphDelta<'_>,
        build: &str,
        annot_name: &str,
    ) -> Result<()> {
        if delta.is_empty() {
            debug!("Nothing to write to annotation store");
            return Ok(());
        }
        let tx = self.conn.transaction()?;
        write_locations(&tx, &delta, build)?;
        write_edges(&tx, &delta)?;
        write_transcripts(&tx, &delta, annot_name)?;
        advance_counters(&tx, &delta)?;
        tx.commit()?;

        info!(
            "Wrote {} locations, {} edges, {} transcripts to annotation store",
            delta.locations.len(),
            delta.edges.len(),
            delta.transcripts.len()
        );
        Ok(())
    }
}

fn write_locations(
    tx: &Transaction<'_>,
    delta: &GraphDelta<'_>,
    build: &str,
) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO location (genome_build, location_ID, chromosome, position)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for location in delta.locations {
        stmt.execute(params![
            build,
            sql_id(location.vertex_id)?,
            location.chrom.as_str(),
            location.coord
        ])
        .map_err(|e| {
            insert_error(
                e,
                format!(
                    "location {} ({}:{})",
                    location.vertex_id, location.chrom, location.coord
                ),
            )
        })?;
    }
    Ok(())
}

fn write_edges(
    tx: &Transaction<'_>,
    delta: &GraphDelta<'_>,
) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO edge (edge_ID, v1, v2, edge_type, strand)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for edge in delta.edges {
        stmt.execute(params![
            sql_id(edge.row_id)?,
            sql_id(edge.edge_id.v1)?,
            sql_id(edge.edge_id.v2)?,
            edge.kind.as_str(),
            edge.strand.to_string()
        ])
        .map_err(|e| {
            insert_error(
                e,
                format!(
                    "{} edge {} at {}:{}",
                    edge.kind, edge.row_id, edge.chrom, edge.span
                ),
            )
        })?;
    }
    Ok(())
}

fn write_transcripts(
    tx: &Transaction<'_>,
    delta: &GraphDelta<'_>,
    annot_name: &str,
) -> Result<()> {
    let mut insert = tx.prepare(
        "INSERT INTO transcripts
         (transcript_ID, gene_ID, start_exon, jn_path, end_exon,
          start_vertex, end_vertex, n_exons)
         VALUES (?1, NULL, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    let mut annotate = tx.prepare(
        "INSERT OR REPLACE INTO transcript_annotations
         (ID, annot_name, source, attribute, value)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;

    for transcript in delta.transcripts {
        let n = transcript.path.len();
        let (first, last) = match (transcript.path.first(), transcript.path.last())
        {
            (Some(first), Some(last)) if n >= 2 => (*first, *last),
            _ => {
                return Err(SjError::validation(format!(
                    "transcript '{}' has an empty path",
                    transcript.tid
                )))
            },
        };
        let start_exon =
            exon_edge_id(tx, transcript, first, transcript.path[1])?;
        let end_exon =
            exon_edge_id(tx, transcript, transcript.path[n - 2], last)?;
        let jn_path = if n > 2 {
            Some(transcript.path[1..n - 1].iter().join(","))
        }
        else {
            None
        };

        let row_id = sql_id(transcript.row_id)?;
        insert
            .execute(params![
                row_id,
                start_exon,
                jn_path,
                end_exon,
                sql_id(first)?,
                sql_id(last)?,
                transcript.n_exons() as i64
            ])
            .map_err(|e| {
                insert_error(
                    e,
                    format!(
                        "transcript {} ('{}')",
                        transcript.row_id, transcript.tid
                    ),
                )
            })?;
        annotate.execute(params![
            row_id,
            annot_name,
            ANNOTATION_SOURCE,
            TRANSCRIPT_ID_ATTR,
            transcript.tid.as_str()
        ])?;
        if let Some(gene_id) = transcript.gene_id.as_ref() {
            annotate.execute(params![
                row_id,
                annot_name,
                ANNOTATION_SOURCE,
                GENE_ID_ATTR,
                gene_id.as_str()
            ])?;
        }
    }
    Ok(())
}

/// Row id of the exon edge `v1 -> v2`, which must already be stored (either
/// from an earlier write or from this transaction).
fn exon_edge_id(
    tx: &Transaction<'_>,
    transcript: &Transcript,
    v1: VertexId,
    v2: VertexId,
) -> Result<i64> {
    tx.query_row(
        "SELECT edge_ID FROM edge WHERE v1 = ?1 AND v2 = ?2 AND edge_type = ?3",
        params![sql_id(v1)?, sql_id(v2)?, EdgeKind::Exon.as_str()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| {
        SjError::validation(format!(
            "transcript '{}' uses exon ({}, {}) which is not stored",
            transcript.tid, v1, v2
        ))
    })
}

fn advance_counters(
    tx: &Transaction<'_>,
    delta: &GraphDelta<'_>,
) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO counters (category, count) VALUES (?1, ?2)
         ON CONFLICT(category) DO UPDATE SET count = MAX(count, excluded.count)",
    )?;
    let last = [
        (
            VERTEX_COUNTER,
            delta.locations.iter().map(|l| l.vertex_id).max(),
        ),
        (EDGE_COUNTER, delta.edges.iter().map(|e| e.row_id).max()),
        (
            TRANSCRIPT_COUNTER,
            delta.transcripts.iter().map(|t| t.row_id).max(),
        ),
    ];
    for (category, max_id) in last {
        if let Some(max_id) = max_id {
            stmt.execute(params![category, sql_id(max_id)?])?;
        }
    }
    Ok(())
}

fn sql_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| {
        SjError::collision(format!("id {} does not fit the store", id))
    })
}

fn insert_error(
    err: rusqlite::Error,
    row: String,
) -> SjError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        SjError::collision(format!("{} already exists in store", row))
    }
    else {
        SjError::Storage {
            message: format!("cannot insert {}: {}", row, err),
            source:  Some(err),
        }
    }
}
