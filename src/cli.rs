use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hordestats")]
#[command(version, about = "Export AI Horde text model usage as CSV and Excel tables")]
pub struct Cli {
    /// Directory holding the whitelist and output files
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Rebuild tables from the saved snapshot instead of fetching
    #[arg(long = "offline")]
    pub offline: bool,

    /// Print current configuration
    #[arg(long = "print")]
    pub print: bool,

    /// Initialize config file
    #[arg(long = "init")]
    pub init: bool,

    /// Check configuration
    #[arg(long = "check")]
    pub check: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
