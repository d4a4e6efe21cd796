use std::path::PathBuf;

use anyhow::bail;
use clap::Args;
use console::style;
use itertools::Itertools;
use log::{
    info,
    warn,
};
use splicegraph::prelude::*;

use crate::strings::partition as strings;
use crate::utils::{
    init_pbar,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct PartitionArgs {
    #[arg(long, num_args = 1.., required = true, help = strings::SAM)]
    sam:         Vec<PathBuf>,
    #[arg(long, num_args = 1.., help = strings::DATASETS)]
    datasets:    Vec<String>,
    #[arg(short = 'o', long, required = true, help = strings::OUTPUT)]
    output:      PathBuf,
    #[arg(long, default_value_t = false, help = strings::STRICT)]
    strict:      bool,
    #[arg(long, conflicts_with = "strict", help = strings::MAX_SKIPPED)]
    max_skipped: Option<usize>,
}

impl PartitionArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        for path in self.sam.iter() {
            if !path.is_file() {
                bail!("Path {} is not a file.", style(path.display()).red());
            }
        }
        let datasets = self.dataset_labels()?;

        let mut sources = self
            .sam
            .iter()
            .map(SamSpans::from_path)
            .collect::<Result<Vec<_>>>()?;

        let partition = partition_reads(
            sources.iter_mut().collect_vec(),
            &datasets,
            &self.config(),
        )?;

        let unmapped: usize = sources.iter().map(|s| s.unmapped()).sum();
        if partition.skipped > 0 {
            warn!(
                "Skipped {} malformed alignment records",
                style(partition.skipped).yellow()
            );
        }
        info!("Skipped {} unmapped records", unmapped);

        let pbar = if utils.progress {
            Some(init_pbar(partition.len())?)
        }
        else {
            None
        };
        let mut writer = bio::io::bed::Writer::to_file(&self.output)?;
        for record in partition.to_bed_records() {
            writer.write(&record)?;
            if let Some(pbar) = pbar.as_ref() {
                pbar.inc(1);
            }
        }
        if let Some(pbar) = pbar {
            pbar.finish_with_message("Done");
        }

        info!(
            "Wrote {} windows ({} records) to {}",
            partition.len(),
            partition.groups.iter().map(|g| g.len()).sum::<usize>(),
            self.output.display()
        );
        Ok(())
    }

    fn config(&self) -> PartitionConfig {
        if self.strict {
            PartitionConfig::strict()
        }
        else {
            PartitionConfig::default().with_max_skipped(self.max_skipped)
        }
    }

    fn dataset_labels(&self) -> anyhow::Result<Vec<String>> {
        if self.datasets.is_empty() {
            return Ok(self
                .sam
                .iter()
                .map(|path| {
                    path.file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string())
                })
                .collect());
        }
        if self.datasets.len() != self.sam.len() {
            bail!(
                "Got {} dataset labels for {} alignment files.",
                style(self.datasets.len()).red(),
                self.sam.len()
            );
        }
        Ok(self.datasets.clone())
    }
}
