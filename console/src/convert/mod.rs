mod bed;
mod gff;
mod gtf;

use std::path::PathBuf;

pub(crate) use bed::Gtf2BedArgs;
use clap::Args;
pub(crate) use gff::Gtf2GffArgs;
pub(crate) use gtf::{
    Gff2GtfArgs,
    Gtf2GtfArgs,
};

use crate::strings::io as strings;

#[derive(Debug, Clone, Args)]
pub(crate) struct IoArgs {
    #[arg(short = 'i', long, required = true, help = strings::INPUT)]
    pub input:  PathBuf,
    #[arg(short = 'o', long, required = true, help = strings::OUTPUT)]
    pub output: PathBuf,
}
