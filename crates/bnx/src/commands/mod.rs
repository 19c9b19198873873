pub mod file;
pub mod pack;

/// Platform whose asset layout converted files should use
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetPlatform {
    /// Nintendo Switch
    #[default]
    Nx,
    /// Wii U
    Wiiu,
}

impl From<TargetPlatform> for bnx_convert::Platform {
    fn from(value: TargetPlatform) -> Self {
        match value {
            TargetPlatform::Nx => bnx_convert::Platform::Nx,
            TargetPlatform::Wiiu => bnx_convert::Platform::WiiU,
        }
    }
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle packaged mod archives
    Pack {
        #[command(subcommand)]
        command: pack::PackCommands,
    },
    /// Handle individual asset files
    File {
        #[command(subcommand)]
        command: file::FileCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Pack { command } => command.handle(),
            Commands::File { command } => command.handle(),
        }
    }
}
