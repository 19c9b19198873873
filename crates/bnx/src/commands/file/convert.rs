use std::path::PathBuf;

use bnx_convert::ConvertOptions;
use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use tracing::info;

use crate::commands::TargetPlatform;

#[derive(Args)]
pub struct ConvertArgs {
    /// An input asset file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target path, defaults to rewriting the input in place
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Platform the converted asset should target
    #[arg(short, long, value_enum, default_value_t = TargetPlatform::Nx)]
    platform: TargetPlatform,
}

impl ConvertArgs {
    pub fn handle(&self) -> Result<()> {
        let name = self
            .file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or(miette!("unable to convert {} to a string", self.file.display()))?;

        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", self.file.display()))?;

        let options = ConvertOptions::builder()
            .platform(self.platform.into())
            .build();

        match bnx_convert::convert_file(name, &data, &options)? {
            Some(converted) => {
                let target = self.output.as_ref().unwrap_or(&self.file);
                info!("writing {}", target.display());

                std::fs::write(target, converted)
                    .into_diagnostic()
                    .context(format!("writing {}", target.display()))?;

                println!("{} {}", "✔".green(), name);
            }
            None => println!("{name}: no conversion needed"),
        }

        Ok(())
    }
}
