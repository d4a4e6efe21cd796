use std::io::Read;
use std::path::Path;

use log::{
    debug,
    info,
};

use super::TranscriptModel;
use crate::data_structs::coords::OrientedSpan;
use crate::data_structs::enums::{
    EdgeKind,
    Strand,
};
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
use crate::error::{
    Result,
    SjError,
};
use crate::io::gtf::{
    read_gtf,
    read_gtf_path,
    GtfReadOptions,
};
use crate::io::store::AnnotationStore;

/// Turns structured transcript annotations into Location/Edge/Transcript
/// tables.
///
/// Vertices are shared by every transcript touching the same `(chrom,
/// coord)`, and edges by every transcript traversing the same vertex pair
/// with the same kind. New ids come from the builder's [`GraphIdCounters`].
#[derive(Debug)]
pub struct AnnotationGraphBuilder {
    graph:    AnnotationGraph,
    counters: GraphIdCounters,
}

impl Default for AnnotationGraphBuilder {
    fn default() -> Self {
        Self::new(GraphIdCounters::default())
    }
}

impl AnnotationGraphBuilder {
    pub fn new(counters: GraphIdCounters) -> Self {
        Self {
            graph: AnnotationGraph::new(),
            counters,
        }
    }

    /// Continues building on top of an existing graph. Known positions and
    /// edges are reused; everything new draws ids from `counters`.
    pub fn resume(
        graph: AnnotationGraph,
        counters: GraphIdCounters,
    ) -> Self {
        Self { graph, counters }
    }

    /// Builds a graph from a GTF annotation.
    pub fn from_gtf<R: Read>(
        reader: R,
        options: &GtfReadOptions,
    ) -> Result<AnnotationGraph> {
        let models = read_gtf(reader, options)?;
        let mut builder = Self::default();
        builder.extend(models)?;
        Ok(builder.finish())
    }

    pub fn from_gtf_path<P: AsRef<Path>>(
        path: P,
        options: &GtfReadOptions,
    ) -> Result<AnnotationGraph> {
        info!("Reading annotation from {}", path.as_ref().display());
        let models = read_gtf_path(path, options)?;
        let mut builder = Self::default();
        builder.extend(models)?;
        Ok(builder.finish())
    }

    /// Reads the already materialized graph of an annotation store.
    pub fn from_store(
        store: &AnnotationStore,
        build: Option<&str>,
    ) -> Result<AnnotationGraph> {
        store.read_graph(build)
    }

    pub fn graph(&self) -> &AnnotationGraph {
        &self.graph
    }

    pub fn extend<I>(
        &mut self,
        models: I,
    ) -> Result<()>
    where
        I: IntoIterator<Item = TranscriptModel>, {
        for model in models {
            self.add_transcript(&model)?;
        }
        Ok(())
    }

    /// Adds one transcript with its vertices and edges.
    ///
    /// Nothing is added if the transcript fails validation.
    pub fn add_transcript(
        &mut self,
        model: &TranscriptModel,
    ) -> Result<&Transcript> {
        if self.graph.transcripts.contains_tid(&model.tid) {
            return Err(SjError::validation(format!(
                "duplicate transcript id '{}' on {}",
                model.tid, model.chrom
            )));
        }
        let exons = model.oriented_exons()?;
        if let Some(err) = self.pending_conflicts(model, &exons) {
            return Err(err);
        }

        let mut path = Vec::with_capacity(exons.len() * 2);
        for exon in exons.iter() {
            path.push(self.vertex(&model.chrom, exon.start())?);
            path.push(self.vertex(&model.chrom, exon.stop())?);
        }

        for (idx, pair) in path.windows(2).enumerate() {
            let kind = if idx % 2 == 0 {
                EdgeKind::Exon
            }
            else {
                EdgeKind::Intron
            };
            let span = OrientedSpan::new(
                self.coord_of(pair[0])?,
                self.coord_of(pair[1])?,
            );
            self.edge(
                EdgeId::new(pair[0], pair[1]),
                kind,
                model.strand,
                &model.chrom,
                span,
            )?;
        }

        let row_id = self.counters.transcript.allocate("transcript")?;
        self.graph.transcripts.insert(Transcript {
            row_id,
            tid: model.tid.clone(),
            gene_id: model.gene_id.clone(),
            chrom: model.chrom.clone(),
            strand: model.strand,
            path,
        })?;
        debug!(
            "Added transcript {} ({} exons) on {}",
            model.tid,
            exons.len(),
            model.chrom
        );
        self.graph
            .transcripts
            .get(&model.tid)
            .ok_or_else(|| SjError::validation("transcript lost after insert"))
    }

    pub fn finish(self) -> AnnotationGraph {
        info!(
            "Built annotation graph: {} locations, {} edges, {} transcripts",
            self.graph.locations.len(),
            self.graph.edges.len(),
            self.graph.transcripts.len()
        );
        self.graph
    }

    /// Existing edges that the transcript would traverse on another strand.
    /// Checked up front so a failing transcript leaves no partial rows.
    fn pending_conflicts(
        &self,
        model: &TranscriptModel,
        exons: &[OrientedSpan],
    ) -> Option<SjError> {
        let coords = exons
            .iter()
            .flat_map(|e| [e.start(), e.stop()])
            .collect::<Vec<_>>();
        for (idx, pair) in coords.windows(2).enumerate() {
            let kind = if idx % 2 == 0 {
                EdgeKind::Exon
            }
            else {
                EdgeKind::Intron
            };
            let (Some(v1), Some(v2)) = (
                self.graph.locations.lookup(&model.chrom, pair[0]),
                self.graph.locations.lookup(&model.chrom, pair[1]),
            )
            else {
                continue;
            };
            if let Some(existing) = self
                .graph
                .edges
                .get(EdgeId::new(v1.vertex_id, v2.vertex_id), kind)
            {
                if existing.strand != model.strand {
                    return Some(SjError::collision(format!(
                        "transcript '{}': {} edge {}:{} already exists on \
                         strand {}",
                        model.tid,
                        kind,
                        model.chrom,
                        existing.span,
                        existing.strand
                    )));
                }
            }
        }
        None
    }

    fn vertex(
        &mut self,
        chrom: &ChromStr,
        coord: PosType,
    ) -> Result<VertexId> {
        if let Some(location) = self.graph.locations.lookup(chrom, coord) {
            return Ok(location.vertex_id);
        }
        let vertex_id = self.counters.vertex.allocate("vertex")?;
        self.graph.locations.insert(Location {
            chrom: chrom.clone(),
            coord,
            vertex_id,
        })?;
        Ok(vertex_id)
    }

    fn coord_of(
        &self,
        vertex_id: VertexId,
    ) -> Result<PosType> {
        self.graph
            .locations
            .get(vertex_id)
            .map(|l| l.coord)
            .ok_or_else(|| {
                SjError::validation(format!("unknown vertex {}", vertex_id))
            })
    }

    fn edge(
        &mut self,
        edge_id: EdgeId,
        kind: EdgeKind,
        strand: Strand,
        chrom: &ChromStr,
        span: OrientedSpan,
    ) -> Result<()> {
        if self.graph.edges.get(edge_id, kind).is_some() {
            return Ok(());
        }
        let row_id = self.counters.edge.allocate("edge")?;
        self.graph.edges.insert(Edge {
            edge_id,
            row_id,
            kind,
            strand,
            chrom: chrom.clone(),
            span,
        })
    }
}
