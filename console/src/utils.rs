use std::fs::{
    self,
    File,
};
use std::io::{
    BufRead,
    BufReader,
    IsTerminal,
};
use std::path::{
    Path,
    PathBuf,
};

use annoconv::io::compression::Compression;
use annoconv::utils::OutputFile;
use annoconv::ConvertError;
use anyhow::Context;
use clap::{
    ArgAction,
    Args,
};
use console::style;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::{
    debug,
    LevelFilter,
};

use crate::strings::utils as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(short, long, action = ArgAction::Count, help = strings::VERBOSE)]
    pub verbose:  u8,
    #[arg(
        long = "no-progress",
        action = ArgAction::SetFalse,
        help = strings::NO_PROGRESS
    )]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }

    /// Initializes the logger. `RUST_LOG` overrides the verbosity flags.
    pub fn setup(&self) -> anyhow::Result<()> {
        let mut builder = pretty_env_logger::formatted_builder();
        match std::env::var("RUST_LOG") {
            Ok(filters) => builder.parse_filters(&filters),
            Err(_) => builder.filter_level(self.level()),
        };
        builder
            .try_init()
            .context("Logger is already initialized")?;
        Ok(())
    }

    /// Progress bar over `total` input bytes, hidden when disabled or when
    /// stderr is not a terminal.
    pub fn progress_bar(
        &self,
        total: u64,
    ) -> anyhow::Result<ProgressBar> {
        if self.progress && std::io::stderr().is_terminal() {
            init_progress(Some(total))
        }
        else {
            init_hidden()
        }
    }
}

pub fn init_progress(total: Option<u64>) -> anyhow::Result<ProgressBar> {
    let progress_bar = match total {
        Some(total) => ProgressBar::new(total),
        None => ProgressBar::new_spinner(),
    };
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}, ETA: {eta}] \
                 [{bar:40.cyan/blue}] {bytes:>10.green}/{total_bytes:10} {msg}",
            )?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}

pub fn init_hidden() -> anyhow::Result<ProgressBar> { Ok(ProgressBar::hidden()) }

pub fn validate_input(path: &Path) -> anyhow::Result<PathBuf> {
    if !path.is_file() {
        return Err(ConvertError::InputNotFound(path.to_path_buf()).into());
    }
    Ok(path.to_path_buf())
}

/// Creates the parent directory of `path` when it does not exist yet.
pub fn validate_output(path: &Path) -> anyhow::Result<PathBuf> {
    if let Some(parent) = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        if !parent.exists() {
            debug!("Creating directory {}", parent.display());
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create directory {}", parent.display())
            })?;
        }
    }
    Ok(path.to_path_buf())
}

/// Opens `path` for reading with its bytes counted by `progress_bar`.
pub fn open_tracked(
    path: &Path,
    utils: &UtilsArgs,
) -> anyhow::Result<(Box<dyn BufRead>, ProgressBar)> {
    let path = validate_input(path)?;
    let file = File::open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let size = file.metadata()?.len();
    let progress_bar = utils.progress_bar(size)?;

    let compression = Compression::from_path(&path);
    debug!("Reading {} ({})", path.display(), compression);
    let decoder = compression
        .get_decoder(progress_bar.wrap_read(file))
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok((Box::new(BufReader::new(decoder)), progress_bar))
}

/// Creates `path` and any missing parent directories.
pub fn create_checked(path: &Path) -> anyhow::Result<OutputFile> {
    let path = validate_output(path)?;
    annoconv::create_output(&path)
        .with_context(|| format!("Failed to create {}", path.display()))
}

/// Writes the compression trailer of `output` and flushes it to disk.
pub fn finish_output(
    output: OutputFile,
    path: &Path,
) -> anyhow::Result<()> {
    output
        .finish()
        .with_context(|| format!("Failed to finish {}", path.display()))?;
    Ok(())
}

pub fn report_done(
    progress_bar: ProgressBar,
    output: &Path,
    summary: impl std::fmt::Display,
) {
    progress_bar.finish_and_clear();
    eprintln!(
        "{} {} ({})",
        style("Written").green().bold(),
        style(output.display()).cyan(),
        summary
    );
}
