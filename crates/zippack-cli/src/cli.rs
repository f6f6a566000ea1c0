//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zippack")]
#[command(author, version)]
#[command(about = "Packs files and directories into a ZIP archive", long_about = None)]
pub struct Cli {
    /// Source files or directories to pack
    #[arg(value_name = "SOURCE", required = true)]
    pub sources: Vec<PathBuf>,

    /// Archive file name (".zip" is appended if missing)
    #[arg(short, long, default_value = "archive.zip", value_name = "NAME")]
    pub name: String,

    /// Directory the finished archive is saved to (created if missing)
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub dest: PathBuf,

    /// Working directory for the temporary archive (default: system temp)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Output the result in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,
}
