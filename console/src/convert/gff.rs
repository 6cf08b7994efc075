use annoconv::tools::convert::{
    to_gff3,
    ToGff3Config,
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
pub(crate) struct Gtf2GffArgs {
    #[clap(flatten)]
    io:        IoArgs,
    #[arg(long, default_value_t = false, help = strings::NO_HEADER)]
    no_header: bool,
}

impl PipelineCommand for Gtf2GffArgs {
    fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let (reader, progress_bar) = open_tracked(&self.io.input, utils)?;
        let mut writer = create_checked(&self.io.output)?;
        info!(
            "Converting {} to GFF3 at {}",
            self.io.input.display(),
            self.io.output.display()
        );

        let config = ToGff3Config::default().with_write_header(!self.no_header);
        let stats = to_gff3(reader, &mut writer, &config)?;
        finish_output(writer, &self.io.output)?;
        report_done(
            progress_bar,
            &self.io.output,
            format!("{} records", stats.records_written),
        );
        Ok(())
    }
}
