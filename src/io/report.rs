//! Tab-separated novelty table writer.
//!
//! Columns: `chrom, start, stop, strand, start_known, stop_known,
//! combination_known, tids`. Booleans are written `True`/`False`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;
use serde::{
    Serialize,
    Serializer,
};

use crate::data_structs::typedef::PosType;
use crate::data_structs::Strand;
use crate::error::Result;
use crate::tools::assign::AttributedEdge;

#[derive(Debug, Serialize)]
struct SjRow<'a> {
    chrom:             &'a str,
    start:             PosType,
    stop:              PosType,
    strand:            Strand,
    #[serde(serialize_with = "title_case_bool")]
    start_known:       bool,
    #[serde(serialize_with = "title_case_bool")]
    stop_known:        bool,
    #[serde(serialize_with = "title_case_bool")]
    combination_known: bool,
    tids:              String,
}

impl<'a> From<&'a AttributedEdge> for SjRow<'a> {
    fn from(value: &'a AttributedEdge) -> Self {
        Self {
            chrom:             value.edge.chrom.as_str(),
            start:             value.edge.start(),
            stop:              value.edge.stop(),
            strand:            value.edge.strand,
            start_known:       value.novelty.start_known,
            stop_known:        value.novelty.stop_known,
            combination_known: value.novelty.combination_known,
            tids:              value.tids.to_string(),
        }
    }
}

fn title_case_bool<S: Serializer>(
    value: &bool,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

/// Streams attributed edges into a TSV sink.
pub struct SjTableWriter<W: Write> {
    writer:    csv::Writer<W>,
    n_written: usize,
}

impl SjTableWriter<File> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> SjTableWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::default()
            .delimiter(b'\t')
            .has_headers(true)
            .from_writer(sink);
        Self {
            writer,
            n_written: 0,
        }
    }

    pub fn write_edge(
        &mut self,
        edge: &AttributedEdge,
    ) -> Result<()> {
        self.writer.serialize(SjRow::from(edge))?;
        self.n_written += 1;
        Ok(())
    }

    /// Flushes and returns the number of rows written. An empty table still
    /// gets its header line.
    pub fn finish(mut self) -> Result<usize> {
        if self.n_written == 0 {
            self.writer.write_record(HEADER)?;
        }
        self.writer.flush()?;
        debug!("Wrote {} novelty rows", self.n_written);
        Ok(self.n_written)
    }
}

/// Writes a whole table, header included even when `edges` is empty.
pub fn write_sj_table<W: Write>(
    sink: W,
    edges: &[AttributedEdge],
) -> Result<usize> {
    let mut writer = SjTableWriter::new(sink);
    for edge in edges {
        writer.write_edge(edge)?;
    }
    writer.finish()
}

const HEADER: [&str; 8] = [
    "chrom",
    "start",
    "stop",
    "strand",
    "start_known",
    "stop_known",
    "combination_known",
    "tids",
];
