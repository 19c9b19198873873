use std::path::PathBuf;
use std::sync::mpsc::sync_channel;

use bnx_convert::{ConvertOptions, Progress};
use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use rayon::prelude::*;
use tracing::info;
use walkdir::WalkDir;

use crate::commands::pack::{extract_package, write_package};
use crate::commands::TargetPlatform;

#[derive(Args)]
pub struct ConvertArgs {
    /// An input mod package
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target package, defaults to replacing the input
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Platform the converted assets should target
    #[arg(short, long, value_enum, default_value_t = TargetPlatform::Nx)]
    platform: TargetPlatform,
}

impl ConvertArgs {
    pub fn handle(&self) -> Result<()> {
        let workdir = tempfile::tempdir()
            .into_diagnostic()
            .context("creating working directory")?;
        extract_package(&self.file, workdir.path())?;

        let files = WalkDir::new(workdir.path())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .map(|e| e.into_path())
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("mod package is empty"));
        }

        // Progress events arrive from worker threads; printing happens on one
        let (sender, receiver) = sync_channel::<Progress>(256);
        let reporter = std::thread::spawn(move || {
            for event in receiver {
                println!("{} {}", "fixed".green(), event.name);
            }
        });

        let options = ConvertOptions::builder()
            .platform(self.platform.into())
            .progress(sender)
            .build();

        let outcomes: Vec<Result<bool>> = files
            .par_iter()
            .map(|path| {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                let data = std::fs::read(path)
                    .into_diagnostic()
                    .context(format!("reading {}", path.display()))?;

                match bnx_convert::convert_file(name, &data, &options)? {
                    Some(converted) => {
                        std::fs::write(path, converted)
                            .into_diagnostic()
                            .context(format!("writing {}", path.display()))?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            })
            .collect();

        drop(options);
        reporter
            .join()
            .map_err(|_| miette!("progress reporter panicked"))?;

        // Every file ran to completion; fail before touching the package so a broken
        // entry never produces a half-converted archive
        let mut converted = 0usize;
        let mut failure = None;
        for outcome in outcomes {
            match outcome {
                Ok(true) => converted += 1,
                Ok(false) => {}
                Err(error) => {
                    failure.get_or_insert(error);
                }
            }
        }
        if let Some(error) = failure {
            return Err(error);
        }

        let target = self.output.as_ref().unwrap_or(&self.file);
        info!("writing {}", target.display());
        write_package(workdir.path(), target)?;

        println!(
            "{} converted {} of {} files into {}",
            "✔".green(),
            converted.green(),
            files.len(),
            target.display()
        );

        Ok(())
    }
}
