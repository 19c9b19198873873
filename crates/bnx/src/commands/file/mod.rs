pub mod convert;

#[derive(clap::Subcommand)]
pub enum FileCommands {
    /// Convert a single asset file
    Convert(convert::ConvertArgs),
}

impl FileCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            FileCommands::Convert(convert) => convert.handle(),
        }
    }
}
