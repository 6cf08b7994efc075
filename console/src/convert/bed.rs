use annoconv::tools::convert::to_bed12;
use clap::Args;
use log::info;

use super::IoArgs;
use crate::utils::{
    create_checked,
    finish_output,
    open_tracked,
    report_done,
    UtilsArgs,
};
use crate::PipelineCommand;

#[derive(Debug, Clone, Args)]
pub(crate) struct Gtf2BedArgs {
    #[clap(flatten)]
    io: IoArgs,
}

impl PipelineCommand for Gtf2BedArgs {
    fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let (reader, progress_bar) = open_tracked(&self.io.input, utils)?;
        let mut writer = create_checked(&self.io.output)?;
        info!(
            "Converting {} to BED12 at {}",
            self.io.input.display(),
            self.io.output.display()
        );

        let stats = to_bed12(reader, &mut writer)?;
        finish_output(writer, &self.io.output)?;
        report_done(
            progress_bar,
            &self.io.output,
            format!("{} transcripts", stats.records_written),
        );
        Ok(())
    }
}
