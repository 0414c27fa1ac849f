use std::path::{Path, PathBuf};

use relpack_lib::{Layout, MANIFEST_FILE, Manifest};
use tracing::debug;

use crate::error::PackError;
use crate::fs_utils::{encode_size, ensure_dir, total_size};
use crate::naming::archive_path;
use crate::packaging::{PackagePlan, plan_entries, zip::Compressor, zip::write_zip};

/// Resolved settings for one packaging run.
#[derive(Debug, Clone)]
pub struct Options {
    pub project_dir: PathBuf,
    pub dist_dir: PathBuf,
    pub layout: Layout,
    pub compressor: Compressor,
    pub dry: bool,
}

/// What a run produced.
#[derive(Debug)]
pub enum Outcome {
    Written { archive: PathBuf, entries: usize },
    DryRun { archive: PathBuf, entries: usize },
}

/// Manifest, output directory, archive; the first failure ends the run.
pub fn run(options: &Options) -> Result<Outcome, PackError> {
    let manifest = Manifest::load(&options.project_dir.join(MANIFEST_FILE))?;
    println!("Packaging {} v{}...", manifest.id, manifest.version);

    let archive = archive_path(&options.dist_dir, &manifest);
    let mut plan = plan_entries(&options.project_dir, &options.layout)?;
    // The archive itself must never be packaged, even when dist lives in a packaged folder.
    plan.exclude(&archive);
    for missing in &plan.missing {
        println!("{missing}");
    }

    if options.dry {
        print_dry_run(&manifest, &archive, &plan)?;
        return Ok(Outcome::DryRun {
            archive,
            entries: plan.entries.len(),
        });
    }

    ensure_dir(&options.dist_dir)?;
    write_zip(&archive, &plan.entries, options.compressor)?;
    println!("Zip file '{}' created successfully.", archive.display());

    Ok(Outcome::Written {
        archive,
        entries: plan.entries.len(),
    })
}

fn print_dry_run(
    manifest: &Manifest,
    archive: &Path,
    plan: &PackagePlan,
) -> Result<(), PackError> {
    let total = total_size(&plan.source_paths())?;
    debug!(?manifest, "dry run");
    println!("--- DRY RUN ---");
    println!("Output: {}", archive.display());
    println!("Total files: {}", plan.entries.len());
    println!("Total size: {}", encode_size(total));
    for entry in &plan.entries {
        println!("  {} -> {}", entry.path.display(), entry.name_in_archive);
    }
    Ok(())
}
