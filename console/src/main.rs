mod convert;
mod splicesites;
mod strings;
mod utils;

use clap::{
    Parser,
    Subcommand,
};
use convert::{
    Gff2GtfArgs,
    Gtf2BedArgs,
    Gtf2GffArgs,
    Gtf2GtfArgs,
};
use splicesites::SpliceSitesArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

pub(crate) trait PipelineCommand {
    fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()>;
}

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
    #[command(name = "gff2gtf", about = strings::menu::GFF2GTF)]
    Gff2Gtf {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  Gff2GtfArgs,
    },
    #[command(name = "gtf2gtf", about = strings::menu::GTF2GTF)]
    Gtf2Gtf {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  Gtf2GtfArgs,
    },
    #[command(name = "gtf2gff", about = strings::menu::GTF2GFF)]
    Gtf2Gff {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  Gtf2GffArgs,
    },
    #[command(name = "gtf2bed", about = strings::menu::GTF2BED)]
    Gtf2Bed {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  Gtf2BedArgs,
    },
    #[command(name = "splicesites", about = strings::menu::SPLICESITES)]
    SpliceSites {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  SpliceSitesArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Gff2Gtf { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Gtf2Gtf { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Gtf2Gff { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Gtf2Bed { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::SpliceSites { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
    }
    Ok(())
}
