//! Zippack CLI - packs files and directories into a ZIP archive and saves
//! it to a destination directory.

mod cli;
mod error;

use anyhow::Result;
use clap::Parser;
use zippack_core::ZipBuilder;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let mut builder = match &cli.work_dir {
        Some(dir) => ZipBuilder::with_work_dir(&cli.name, dir),
        None => ZipBuilder::new(&cli.name),
    }
    .map_err(error::convert_pack_error)?;

    for source in &cli.sources {
        if source.is_dir() {
            builder.add_dir(source)
        } else {
            builder.add_file(source)
        }
        .map_err(error::convert_pack_error)?;
    }

    let entries = builder.entry_count();
    let saved = builder
        .save_to(&cli.dest)
        .map_err(error::convert_pack_error)?;

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "status": "success",
                "archive": saved,
                "sources": entries,
            })
        );
    } else if !cli.quiet {
        println!("Created {}", saved.display());
    }

    Ok(())
}
