use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    bail,
    Context,
};
use clap::Args;
use console::style;
use itertools::Itertools;
use log::info;
use splicegraph::prelude::*;

use crate::strings::sjs as strings;
use crate::utils::{
    init_spinner,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct SjsArgs {
    #[arg(
        long,
        conflicts_with = "db",
        required_unless_present = "db",
        help = strings::GTF
    )]
    gtf:       Option<PathBuf>,
    #[arg(long, help = strings::DB)]
    db:        Option<PathBuf>,
    #[arg(long, requires = "db", help = strings::BUILD)]
    build:     Option<String>,
    #[arg(long = "ref", required = true, help = strings::REFERENCE)]
    reference: PathBuf,
    #[arg(
        long,
        required = true,
        value_parser = ["exon", "intron"],
        help = strings::MODE
    )]
    mode:      Vec<String>,
    #[arg(short = 'o', long, required = true, help = strings::OUTPREFIX)]
    outprefix: String,
}

impl SjsArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        for path in self.inputs() {
            if !path.is_file() {
                bail!("Path {} is not a file.", style(path.display()).red());
            }
        }

        let spinner = if utils.progress {
            Some(init_spinner("Loading annotations")?)
        }
        else {
            None
        };

        let options = GtfReadOptions::default();
        let query = self.load_query(&options)?;
        let reference =
            AnnotationGraphBuilder::from_gtf_path(&self.reference, &options)
                .with_context(|| {
                    format!("reading reference {}", self.reference.display())
                })?;

        for mode in self.mode.iter().unique() {
            if let Some(spinner) = spinner.as_ref() {
                spinner.set_message(format!("Classifying {}s", mode));
            }
            let rows = get_sjs(&query, &reference, mode)?;
            let out_path = format!("{}_{}s.tsv", self.outprefix, mode);
            let written = write_table(&out_path, &rows)
                .with_context(|| format!("writing {}", out_path))?;
            info!("Wrote {} {} rows to {}", written, mode, out_path);
        }

        if let Some(spinner) = spinner {
            spinner.finish_with_message("Done");
        }
        Ok(())
    }

    fn inputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.gtf
            .iter()
            .chain(self.db.iter())
            .chain(std::iter::once(&self.reference))
    }

    fn load_query(
        &self,
        options: &GtfReadOptions,
    ) -> anyhow::Result<AnnotationGraph> {
        match (&self.gtf, &self.db) {
            (Some(gtf), None) => {
                AnnotationGraphBuilder::from_gtf_path(gtf, options)
                    .with_context(|| format!("reading query {}", gtf.display()))
            },
            (None, Some(db)) => {
                let store = AnnotationStore::open(db)?;
                AnnotationGraphBuilder::from_store(&store, self.build.as_deref())
                    .with_context(|| format!("reading store {}", db.display()))
            },
            _ => bail!("Exactly one of --gtf and --db must be given."),
        }
    }
}

fn write_table(
    path: impl AsRef<Path>,
    rows: &[AttributedEdge],
) -> anyhow::Result<usize> {
    let mut writer = SjTableWriter::from_path(path)?;
    for row in rows {
        writer.write_edge(row)?;
    }
    Ok(writer.finish()?)
}
