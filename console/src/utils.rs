use clap::Args;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        global = true,
        default_value_t = false,
        help = "Log progress information (overridden by RUST_LOG)."
    )]
    pub verbose:  bool,
    #[arg(
        long,
        global = true,
        help = "Number of worker threads (default: all cores)."
    )]
    pub threads:  Option<usize>,
    #[arg(
        long,
        global = true,
        default_value_t = false,
        help = "Display a progress bar."
    )]
    pub progress: bool,
}

impl UtilsArgs {
    /// Configures logging and the worker pool. Must run before any library
    /// call touches the thread pool.
    pub fn setup(&self) -> anyhow::Result<()> {
        if let Some(threads) = self.threads {
            std::env::set_var("SPLICEGRAPH_NUM_THREADS", threads.to_string());
        }
        init_logger(self.verbose)
    }
}

pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let mut builder = pretty_env_logger::formatted_builder();
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    else if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    else {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.try_init()?;
    Ok(())
}

pub fn init_pbar(total: usize) -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}, ETA: {eta}] \
                 [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}",
            )?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

pub fn init_spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    Ok(spinner)
}
