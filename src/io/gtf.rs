//! GTF annotation reader.
//!
//! Exon records are grouped into [`TranscriptModel`]s by their transcript id
//! attribute. Transcripts keep the order in which they first appear in the
//! file, so identifiers allocated downstream are reproducible.

use std::fs::File;
use std::io::{
    BufReader,
    Read,
};
use std::path::Path;

use bio::io::gff;
use indexmap::IndexMap;
use log::{
    debug,
    warn,
};

use crate::data_structs::annotation::TranscriptModel;
use crate::data_structs::typedef::ChromStr;
use crate::data_structs::Strand;
use crate::error::{
    Result,
    SjError,
};
use crate::{
    getter_fn,
    with_field_fn,
};

/// Which GTF records and attributes make up a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtfReadOptions {
    transcript_id_key: String,
    gene_id_key:       String,
    exon_feature:      String,
}

impl Default for GtfReadOptions {
    fn default() -> Self {
        Self {
            transcript_id_key: "transcript_id".to_string(),
            gene_id_key:       "gene_id".to_string(),
            exon_feature:      "exon".to_string(),
        }
    }
}

impl GtfReadOptions {
    with_field_fn!(transcript_id_key, String);

    with_field_fn!(gene_id_key, String);

    with_field_fn!(exon_feature, String);

    pub fn transcript_id_key(&self) -> &str {
        &self.transcript_id_key
    }

    pub fn exon_feature(&self) -> &str {
        &self.exon_feature
    }

    getter_fn!(gene_id_key, String);
}

/// Reads every transcript defined by the exon records of a GTF stream.
///
/// Records of other feature types are ignored. An exon without a transcript
/// id, or exons of one transcript disagreeing on chromosome or strand, make
/// the whole annotation invalid.
pub fn read_gtf<R: Read>(
    reader: R,
    options: &GtfReadOptions,
) -> Result<Vec<TranscriptModel>> {
    let mut reader = gff::Reader::new(reader, gff::GffType::GTF2);
    let mut models: IndexMap<ChromStr, TranscriptModel> = IndexMap::new();
    let mut skipped_features = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            SjError::validation(format!(
                "malformed GTF record #{}: {}",
                line + 1,
                e
            ))
        })?;
        if record.feature_type() != options.exon_feature {
            skipped_features += 1;
            continue;
        }

        let tid: ChromStr = record
            .attributes()
            .get(&options.transcript_id_key)
            .map(|s| ChromStr::from(s.as_str()))
            .ok_or_else(|| {
                SjError::validation(format!(
                    "{} record at {}:{}-{} has no '{}' attribute",
                    options.exon_feature,
                    record.seqname(),
                    record.start(),
                    record.end(),
                    options.transcript_id_key
                ))
            })?;
        let gene_id = record
            .attributes()
            .get(&options.gene_id_key)
            .map(|s| ChromStr::from(s.as_str()));
        let strand = record
            .strand()
            .map(Strand::from)
            .unwrap_or(Strand::None);
        let exon = (
            to_pos(*record.start(), &tid)?,
            to_pos(*record.end(), &tid)?,
        );

        match models.get_mut(&tid) {
            Some(model) => {
                if model.chrom.as_str() != record.seqname()
                    || model.strand != strand
                {
                    return Err(SjError::validation(format!(
                        "transcript '{}' has exons on both {}({}) and {}({})",
                        tid,
                        model.chrom,
                        model.strand,
                        record.seqname(),
                        strand
                    )));
                }
                if model.gene_id.is_none() {
                    model.gene_id = gene_id;
                }
                model.exons.push(exon);
            },
            None => {
                let model = TranscriptModel::new(
                    tid.clone(),
                    record.seqname(),
                    strand,
                    vec![exon],
                )
                .with_gene_id(gene_id);
                models.insert(tid, model);
            },
        }
    }

    if models.is_empty() {
        warn!(
            "No '{}' records found in annotation",
            options.exon_feature
        );
    }
    debug!(
        "Read {} transcripts, ignored {} non-{} records",
        models.len(),
        skipped_features,
        options.exon_feature
    );
    Ok(models.into_values().collect())
}

pub fn read_gtf_path<P: AsRef<Path>>(
    path: P,
    options: &GtfReadOptions,
) -> Result<Vec<TranscriptModel>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SjError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    read_gtf(BufReader::new(file), options)
}

fn to_pos(
    value: u64,
    tid: &str,
) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        SjError::validation(format!(
            "transcript '{}' has coordinate {} out of range",
            tid, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::ErrorKind;

    const GTF: &str = "\
chr1\tHAVANA\tgene\t1\t1000\t.\t+\t.\tgene_id \"ENSG01\";
chr1\tHAVANA\ttranscript\t1\t1000\t.\t+\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\";
chr1\tHAVANA\texon\t1\t100\t.\t+\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\";
chr1\tHAVANA\texon\t500\t600\t.\t+\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\";
chr4\tHAVANA\texon\t1000\t4000\t.\t-\t.\tgene_id \"ENSG07\"; transcript_id \"ENST07\";
chr1\tHAVANA\texon\t900\t1000\t.\t+\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\";
";

    #[test]
    fn test_groups_exons_by_transcript() {
        let models = read_gtf(GTF.as_bytes(), &GtfReadOptions::default()).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].tid.as_str(), "ENST01");
        assert_eq!(models[0].gene_id.as_deref(), Some("ENSG01"));
        assert_eq!(models[0].exons, vec![(1, 100), (500, 600), (900, 1000)]);
        assert_eq!(models[1].tid.as_str(), "ENST07");
        assert_eq!(models[1].strand, Strand::Reverse);
        assert_eq!(models[1].chrom.as_str(), "chr4");
    }

    #[test]
    fn test_custom_feature() {
        let options = GtfReadOptions::default()
            .with_exon_feature("transcript".to_string());
        let models = read_gtf(GTF.as_bytes(), &options).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].exons, vec![(1, 1000)]);
    }

    #[rstest]
    #[case::missing_tid(
        "chr1\tX\texon\t1\t100\t.\t+\t.\tgene_id \"G\";\n"
    )]
    #[case::mixed_strand(
        "chr1\tX\texon\t1\t100\t.\t+\t.\ttranscript_id \"T\";\n\
         chr1\tX\texon\t200\t300\t.\t-\t.\ttranscript_id \"T\";\n"
    )]
    #[case::mixed_chrom(
        "chr1\tX\texon\t1\t100\t.\t+\t.\ttranscript_id \"T\";\n\
         chr2\tX\texon\t200\t300\t.\t+\t.\ttranscript_id \"T\";\n"
    )]
    fn test_invalid_annotation(#[case] gtf: &str) {
        let err = read_gtf(gtf.as_bytes(), &GtfReadOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
