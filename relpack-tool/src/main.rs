use clap::Parser;
use relpack_lib::{DIST_DIR, Layout};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod fs_utils;
mod naming;
mod packaging;
mod process;

use crate::error::PackError;
use crate::packaging::zip::Compressor;
use crate::process::{Options, Outcome};

#[derive(Parser, Debug)]
#[command(name = "relpack", author, version, about = "Package a module into a versioned release zip", long_about = None)]
pub struct Cli {
    /// Project root containing module.json
    #[arg(short = 'C', long, env = "RELPACK_PROJECT_DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Output directory, relative to the project root unless absolute
    #[arg(short = 'o', long, env = "RELPACK_DIST_DIR", default_value = DIST_DIR)]
    pub dist_dir: PathBuf,

    /// Dry run (list planned entries, write nothing)
    #[arg(short, long, env = "RELPACK_DRY", action = clap::ArgAction::SetTrue)]
    pub dry: bool,

    /// Store entries without compression
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub stored: bool,
}

impl Cli {
    fn into_options(self) -> Options {
        let dist_dir = self.project_dir.join(&self.dist_dir);
        Options {
            project_dir: self.project_dir,
            dist_dir,
            layout: Layout::DEFAULT,
            compressor: if self.stored {
                Compressor::Stored
            } else {
                Compressor::Deflate
            },
            dry: self.dry,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        let code = err
            .downcast_ref::<PackError>()
            .map(PackError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = cli.into_options();
    match process::run(&options)? {
        Outcome::Written { archive, entries } => {
            info!(path = %archive.display(), entries, "release packaged");
        }
        Outcome::DryRun { archive, entries } => {
            info!(path = %archive.display(), entries, "dry run, nothing written");
        }
    }
    println!("Done!");
    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn no_arguments_means_current_dir_and_dist() {
        let cli = Cli::try_parse_from(["relpack"]).expect("no args is valid");
        let options = cli.into_options();
        assert_eq!(options.project_dir, PathBuf::from("."));
        assert_eq!(options.dist_dir, Path::new(".").join("dist"));
        assert_eq!(options.compressor, Compressor::Deflate);
        assert!(!options.dry);
        assert_eq!(options.layout, Layout::DEFAULT);
    }

    #[test]
    fn dist_dir_resolves_against_project_dir() {
        let cli = Cli::try_parse_from(["relpack", "-C", "/work/mod", "-o", "out"]).expect("args");
        assert_eq!(cli.into_options().dist_dir, PathBuf::from("/work/mod/out"));
    }

    #[test]
    fn absolute_dist_dir_is_kept() {
        let cli = Cli::try_parse_from(["relpack", "-C", "/work/mod", "--dist-dir", "/tmp/releases"])
            .expect("args");
        assert_eq!(cli.into_options().dist_dir, PathBuf::from("/tmp/releases"));
    }

    #[test]
    fn flags_select_dry_run_and_stored() {
        let cli = Cli::try_parse_from(["relpack", "--dry", "--stored"]).expect("args");
        let options = cli.into_options();
        assert!(options.dry);
        assert_eq!(options.compressor, Compressor::Stored);
    }

    #[test]
    fn positional_arguments_are_rejected() {
        Cli::try_parse_from(["relpack", "extra"]).expect_err("no positionals");
    }
}
