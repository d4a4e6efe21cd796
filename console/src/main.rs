mod partition;
mod sjs;
mod strings;
pub mod utils;

use clap::{
    Parser,
    Subcommand,
};
use partition::PartitionArgs;
use sjs::SjsArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Novelty of the splice junctions (and exons) of a query annotation.
    Sjs {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  SjsArgs,
    },

    /// Merge alignment records into independent genomic windows.
    Partition {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  PartitionArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Sjs { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Partition { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
