use annoconv::tools::convert::{
    to_gtf,
    ToGtfConfig,
    DEFAULT_GTF_FEATURES,
};
use clap::Args;
use log::info;

use super::IoArgs;
use crate::strings::convert as strings;
use crate::utils::{
    create_checked,
    finish_output,
    open_tracked,
    report_done,
    UtilsArgs,
};
use crate::PipelineCommand;

#[derive(Debug, Clone, Args)]
pub(crate) struct GtfOutputArgs {
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_GTF_FEATURES.map(String::from).to_vec(),
        help = strings::FEATURES
    )]
    features:  Vec<String>,
    #[arg(long, default_value_t = false, help = strings::NO_HEADER)]
    no_header: bool,
}

impl GtfOutputArgs {
    fn config(
        &self,
        base: ToGtfConfig,
    ) -> ToGtfConfig {
        base.with_retained_features(self.features.clone())
            .with_write_header(!self.no_header)
    }
}

fn run_to_gtf(
    io: &IoArgs,
    config: ToGtfConfig,
    utils: &UtilsArgs,
) -> anyhow::Result<()> {
    let (reader, progress_bar) = open_tracked(&io.input, utils)?;
    let mut writer = create_checked(&io.output)?;
    info!(
        "Converting {} to GTF at {}",
        io.input.display(),
        io.output.display()
    );

    let stats = to_gtf(reader, &mut writer, &config)?;
    finish_output(writer, &io.output)?;
    report_done(
        progress_bar,
        &io.output,
        format!(
            "{} records, {} genes, {} transcripts",
            stats.records_written, stats.genes, stats.transcripts
        ),
    );
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Gff2GtfArgs {
    #[clap(flatten)]
    io:  IoArgs,
    #[clap(flatten)]
    gtf: GtfOutputArgs,
}

impl PipelineCommand for Gff2GtfArgs {
    fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        run_to_gtf(&self.io, self.gtf.config(ToGtfConfig::default()), utils)
    }
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Gtf2GtfArgs {
    #[clap(flatten)]
    io:  IoArgs,
    #[clap(flatten)]
    gtf: GtfOutputArgs,
}

impl PipelineCommand for Gtf2GtfArgs {
    fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        run_to_gtf(&self.io, self.gtf.config(ToGtfConfig::normalize()), utils)
    }
}
