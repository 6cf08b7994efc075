use std::ffi::OsString;
use std::path::PathBuf;

use annoconv::tools::junctions::extract_junctions;
use clap::Args;
use log::info;

use crate::strings::splicesites as strings;
use crate::utils::{
    create_checked,
    finish_output,
    open_tracked,
    report_done,
    UtilsArgs,
};
use crate::PipelineCommand;

const JUNCTIONS_SUFFIX: &str = ".junctions";

#[derive(Debug, Clone, Args)]
pub(crate) struct SpliceSitesArgs {
    #[arg(short = 'i', long, required = true, help = strings::INPUT)]
    input:     PathBuf,
    #[arg(short = 'o', long, required = true, help = strings::OUTPUT)]
    output:    PathBuf,
    #[arg(short = 'j', long, help = strings::JUNCTIONS)]
    junctions: Option<PathBuf>,
}

impl SpliceSitesArgs {
    pub fn junctions_path(&self) -> PathBuf {
        self.junctions.clone().unwrap_or_else(|| {
            let mut path = OsString::from(self.output.as_os_str());
            path.push(JUNCTIONS_SUFFIX);
            PathBuf::from(path)
        })
    }
}

impl PipelineCommand for SpliceSitesArgs {
    fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let junctions_path = self.junctions_path();
        let (reader, progress_bar) = open_tracked(&self.input, utils)?;
        let mut summary = create_checked(&self.output)?;
        let mut table = create_checked(&junctions_path)?;
        info!(
            "Extracting junctions from {} into {} and {}",
            self.input.display(),
            self.output.display(),
            junctions_path.display()
        );

        let stats = extract_junctions(reader, &mut summary, &mut table)?;
        finish_output(summary, &self.output)?;
        finish_output(table, &junctions_path)?;
        report_done(
            progress_bar,
            &junctions_path,
            format!(
                "{} alignments, {} distinct junctions",
                stats.alignments, stats.distinct_junctions
            ),
        );
        Ok(())
    }
}
